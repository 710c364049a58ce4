//! Artifact compilers
//!
//! Every compiler is a pure function from the project configuration (plus
//! the resolved topology and env plan) to text. Nothing here touches disk;
//! [`crate::fs::materialize`] writes the result.
//!
//! ```
//! use ezdeploy::artifacts::compile_all;
//! use ezdeploy::catalog::ContainerRegistry;
//! use ezdeploy::project::ProjectConfig;
//!
//! let config: ProjectConfig = serde_json::from_value(serde_json::json!({
//!     "containers": [{ "internalName": "web", "externalPort": 3000, "kind": "next", "proxyPath": "/" }],
//!     "repository": { "uri": "github.com/acme/shop" },
//!     "domain": "shop.example.com",
//!     "contactEmail": "ops@example.com",
//!     "remoteDeployPath": "/shop"
//! })).unwrap();
//!
//! let set = compile_all(&config, &ContainerRegistry::with_defaults());
//! assert!(set.get("docker-compose.yml").is_some());
//! assert!(set.get("Dockerfile").is_some());
//! ```

pub mod compose;
pub mod deploy_script;
pub mod dockerfile;
pub mod gitignore;
pub mod nginx;
pub mod shell;
pub mod update_script;

use crate::catalog::ContainerRegistry;
use crate::env_files::{EnvPlan, EnvResolver};
use crate::project::types::to_slash;
use crate::project::ProjectConfig;
use crate::topology::Topology;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const DEPLOY_SCRIPT: &str = "deploy.sh";
pub const UPDATE_SCRIPT: &str = "update.sh";

/// One generated file, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub executable: bool,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn path_str(&self) -> String {
        to_slash(&self.path)
    }
}

/// Compiled artifacts in write order, plus soft warnings from derivation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtifactSet {
    pub artifacts: Vec<Artifact>,
    pub warnings: Vec<String>,
}

impl ArtifactSet {
    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path_str() == path)
    }

    pub fn paths(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.path_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Everything the compilers derive from one configuration
pub struct CompileContext<'a> {
    pub config: &'a ProjectConfig,
    pub registry: &'a ContainerRegistry,
    pub topology: Topology,
    pub env_plan: EnvPlan,
}

impl<'a> CompileContext<'a> {
    pub fn new(config: &'a ProjectConfig, registry: &'a ContainerRegistry) -> Self {
        let topology = Topology::resolve(&config.containers, registry);
        let env_plan = EnvResolver::new(config, registry, &topology).plan();
        Self {
            config,
            registry,
            topology,
            env_plan,
        }
    }

    pub fn env(&self) -> EnvResolver<'_> {
        EnvResolver::new(self.config, self.registry, &self.topology)
    }
}

/// Compile Dockerfiles, compose file, proxy site and both scripts
pub fn compile_all(config: &ProjectConfig, registry: &ContainerRegistry) -> ArtifactSet {
    let ctx = CompileContext::new(config, registry);
    let mut artifacts = dockerfile::compile_all(&ctx);

    artifacts.push(Artifact::new(COMPOSE_FILE, compose::compile(&ctx)));
    artifacts.push(Artifact::new(
        config.proxy_config_name.clone(),
        nginx::compile(config),
    ));
    artifacts.push(Artifact::new(DEPLOY_SCRIPT, deploy_script::compile(&ctx)).executable());
    artifacts.push(Artifact::new(UPDATE_SCRIPT, update_script::compile(&ctx)).executable());

    debug!(count = artifacts.len(), "Compiled artifacts");

    ArtifactSet {
        artifacts,
        warnings: ctx.env_plan.warnings.clone(),
    }
}
