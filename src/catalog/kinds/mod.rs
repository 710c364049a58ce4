//! Container kind definitions
//!
//! Each supported kind declares its tier, the port it listens on inside the
//! container, the image it runs when it is not built from source, and the
//! Dockerfile template used when it is. Adding a kind means adding a
//! `ContainerKindId` variant, a file here, and a registry entry.

use crate::catalog::{ContainerKindId, TypeClass};
use crate::patchers::ConfigPatcher;

/// Framework- or engine-specific behavior of one container kind
pub trait ContainerKind: Send + Sync {
    fn id(&self) -> ContainerKindId;

    /// Tier used for dependency wiring. `None` keeps the container out of it.
    fn type_class(&self) -> Option<TypeClass>;

    /// Port the process listens on inside the container
    fn internal_port(&self) -> u16;

    /// Off-the-shelf image reference. `None` means "build from source".
    fn image(&self) -> Option<&'static str> {
        None
    }

    /// Variables the kind needs to start correctly (e.g. database credentials)
    fn default_env_keys(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Directory that must survive container restarts, mounted to a named volume
    fn data_dir(&self) -> Option<&'static str> {
        None
    }

    /// Origin/base-URL keys peers need verbatim, so they are never redacted
    fn public_origin_keys(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Whether the kind reads its variables from the project-root env file
    fn centralizes_env_at_root(&self) -> bool {
        false
    }

    /// Dockerfile text for buildable kinds, exposing `internal_port`
    fn dockerfile(&self, _internal_port: u16) -> Option<String> {
        None
    }

    /// Patcher that adjusts the framework's own build configuration
    fn config_patcher(&self) -> Option<Box<dyn ConfigPatcher>> {
        None
    }

    fn is_prebuilt(&self) -> bool {
        self.image().is_some()
    }
}

pub mod adminer;
pub mod express;
pub mod laravel;
pub mod mysql;
pub mod next;
pub mod nuxt;
pub mod postgres;
pub mod redis;
pub mod sveltekit;

pub use adminer::AdminerKind;
pub use express::ExpressKind;
pub use laravel::LaravelKind;
pub use mysql::MySqlKind;
pub use next::NextKind;
pub use nuxt::NuxtKind;
pub use postgres::PostgresKind;
pub use redis::RedisKind;
pub use sveltekit::SvelteKitKind;
