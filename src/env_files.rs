//! Environment wiring shared by the compose file and both scripts.
//!
//! Computes the effective value of every declared variable (the API-URL key
//! is rewritten to the chosen backend's internal address) and lays the
//! variables out into env files: one root `.env` for project-wide values and
//! root-centralizing frontends, one file per remaining container.

use crate::catalog::{ContainerRegistry, TypeClass};
use crate::project::types::to_slash;
use crate::project::{ContainerInstance, EnvVariable, ProjectConfig};
use crate::redaction::SecretPolicy;
use crate::topology::Topology;
use std::path::PathBuf;
use tracing::warn;

pub const ROOT_ENV_FILE: &str = ".env";

/// One env file to materialize on the target host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    /// Relative to the project root
    pub path: PathBuf,
    /// Values after redaction, in declaration order
    pub entries: Vec<EnvVariable>,
}

impl EnvFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
        }
    }

    /// Later keys replace earlier ones in place
    fn upsert(&mut self, variable: EnvVariable) {
        match self.entries.iter_mut().find(|e| e.key == variable.key) {
            Some(existing) => existing.value = variable.value,
            None => self.entries.push(variable),
        }
    }

    pub fn path_str(&self) -> String {
        to_slash(&self.path)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvPlan {
    pub files: Vec<EnvFile>,
    pub warnings: Vec<String>,
}

impl EnvPlan {
    pub fn file(&self, path: &str) -> Option<&EnvFile> {
        self.files.iter().find(|f| f.path_str() == path)
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(EnvFile::path_str).collect()
    }
}

pub struct EnvResolver<'a> {
    config: &'a ProjectConfig,
    registry: &'a ContainerRegistry,
    topology: &'a Topology,
}

impl<'a> EnvResolver<'a> {
    pub fn new(
        config: &'a ProjectConfig,
        registry: &'a ContainerRegistry,
        topology: &'a Topology,
    ) -> Self {
        Self {
            config,
            registry,
            topology,
        }
    }

    pub fn is_api_url_key(&self, key: &str) -> bool {
        key == self.config.api_url_variable_name
    }

    /// Effective value, or `None` when the API-URL key has no backend to point at
    pub fn effective(&self, variable: &EnvVariable) -> Option<EnvVariable> {
        if self.is_api_url_key(&variable.key) {
            let url = self.topology.api_url()?;
            return Some(EnvVariable::new(variable.key.clone(), url));
        }
        Some(variable.clone())
    }

    /// Effective variables of one container, unresolvable ones dropped
    pub fn container_env(&self, container: &ContainerInstance) -> Vec<EnvVariable> {
        container
            .env_variables
            .iter()
            .filter_map(|v| self.effective(v))
            .collect()
    }

    /// Messages for API-URL variables that had to be dropped
    pub fn unresolved(&self) -> Vec<String> {
        if self.topology.api_backend().is_some() {
            return Vec::new();
        }

        let mut messages = Vec::new();
        for container in &self.config.containers {
            if container
                .env_variables
                .iter()
                .any(|v| self.is_api_url_key(&v.key))
            {
                messages.push(format!(
                    "Container '{}' declares {} but no backend container exists; the variable was omitted",
                    container.internal_name, self.config.api_url_variable_name
                ));
            }
        }
        messages
    }

    /// Where a container's own variables are written
    pub fn env_file_path(&self, container: &ContainerInstance) -> PathBuf {
        let centralizes = self.registry.type_class(&container.kind) == Some(TypeClass::Frontend)
            && self.registry.centralizes_env_at_root(&container.kind);

        if centralizes {
            return PathBuf::from(ROOT_ENV_FILE);
        }

        match container.context_dir() {
            Some(dir) => dir.join(ROOT_ENV_FILE),
            None => PathBuf::from(format!("{}.{}", ROOT_ENV_FILE, container.internal_name)),
        }
    }

    pub fn plan(&self) -> EnvPlan {
        let policy = SecretPolicy::new(self.config, self.registry);
        let mut files: Vec<EnvFile> = Vec::new();

        let mut root = EnvFile::new(PathBuf::from(ROOT_ENV_FILE));
        for variable in &self.config.global_env_variables {
            if let Some(effective) = self.effective(variable) {
                let value = policy.value_for(&effective, None);
                root.upsert(EnvVariable::new(effective.key, value));
            }
        }
        files.push(root);

        for container in &self.config.containers {
            let variables = self.container_env(container);
            if variables.is_empty() {
                continue;
            }

            let path = self.env_file_path(container);
            let index = match files.iter().position(|f| f.path == path) {
                Some(index) => index,
                None => {
                    files.push(EnvFile::new(path));
                    files.len() - 1
                }
            };

            for variable in variables {
                let value = policy.value_for(&variable, Some(container));
                files[index].upsert(EnvVariable::new(variable.key, value));
            }
        }

        files.retain(|f| !f.entries.is_empty());

        let warnings = self.unresolved();
        for message in &warnings {
            warn!("{}", message);
        }

        EnvPlan { files, warnings }
    }
}
