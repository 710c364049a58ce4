//! ezdeploy - deployment bundle generator for small multi-container web projects
//!
//! Given a description of a project (its containers, their ports and
//! environment variables, the Git repository, the public domain and the
//! target directory on the server), ezdeploy writes everything needed to run
//! the project on a single Ubuntu host behind Nginx with TLS:
//!
//! - a Dockerfile per container built from source
//! - `docker-compose.yml` wiring the containers together
//! - env files, with secrets replaced by placeholders unless asked otherwise
//! - an Nginx site that terminates TLS and routes paths to containers
//! - `deploy.sh` for first-time provisioning and `update.sh` for redeploys
//!
//! # Example
//!
//! ```no_run
//! use ezdeploy::{Generator, GeneratorConfig, ProjectConfig};
//! use std::path::Path;
//!
//! let project = ProjectConfig::from_path(Path::new("ezdeploy.yaml")).unwrap();
//! let result = Generator::new(GeneratorConfig::default()).generate(&project, Path::new("."));
//! for file in &result.files {
//!     println!("{:?} {}", file.status, file.path);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`catalog`]: supported container kinds and their defaults
//! - [`topology`]: dependency wiring between frontend, backend and database tiers
//! - [`artifacts`]: text compilers for each generated file
//! - [`pipeline`]: preflight, validation, compilation and writing

pub mod artifacts;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod env_files;
pub mod error;
pub mod fs;
pub mod patchers;
pub mod pipeline;
pub mod preflight;
pub mod project;
pub mod redaction;
pub mod topology;
pub mod util;
pub mod validation;

pub use catalog::ContainerRegistry;
pub use config::{ConfigError, GeneratorConfig};
pub use error::{ErrorKind, GenerationError};
pub use pipeline::{GenerationResult, Generator};
pub use project::ProjectConfig;
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_ezdeploy() {
        assert_eq!(NAME, "ezdeploy");
    }
}
