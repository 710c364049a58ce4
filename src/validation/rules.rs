use crate::project::ProjectConfig;
use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Component, Path};

const NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$";
const ENV_KEY_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const REPOSITORY_PATTERN: &str = r"^[A-Za-z0-9.-]+\.[A-Za-z]+/[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$";
const BRANCH_PATTERN: &str = r"^[A-Za-z0-9._/-]+$";
const DOMAIN_PATTERN: &str = r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)+$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const FILE_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$";
const DEPLOY_PATH_PATTERN: &str = r"^~?[A-Za-z0-9_./-]+$";

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, config: &ProjectConfig) -> Result<()>;
}

pub struct ContainersPresentRule;

impl ValidationRule for ContainersPresentRule {
    fn name(&self) -> &'static str {
        "ContainersPresent"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        if config.containers.is_empty() {
            anyhow::bail!("At least one container is required");
        }
        Ok(())
    }
}

pub struct ContainerNamesRule;

impl ValidationRule for ContainerNamesRule {
    fn name(&self) -> &'static str {
        "ContainerNames"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let re = Regex::new(NAME_PATTERN)?;
        let mut seen = HashSet::new();

        for container in &config.containers {
            let name = container.internal_name.as_str();
            if name.is_empty() {
                anyhow::bail!("Container name cannot be empty");
            }
            if !re.is_match(name) {
                anyhow::bail!(
                    "Container name '{}' may only contain letters, digits, '_', '.' and '-'",
                    name
                );
            }
            if !seen.insert(name) {
                anyhow::bail!("Duplicate container name '{}'", name);
            }
        }
        Ok(())
    }
}

pub struct ExternalPortsRule;

impl ValidationRule for ExternalPortsRule {
    fn name(&self) -> &'static str {
        "ExternalPorts"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let mut seen = HashSet::new();
        for container in &config.containers {
            if container.external_port == 0 {
                anyhow::bail!("Container '{}' needs a port above 0", container.internal_name);
            }
            if !seen.insert(container.external_port) {
                anyhow::bail!(
                    "Port {} is published by more than one container",
                    container.external_port
                );
            }
        }
        Ok(())
    }
}

pub struct EnvVariablesRule;

impl EnvVariablesRule {
    fn check(re: &Regex, owner: &str, variables: &[crate::project::EnvVariable]) -> Result<()> {
        let mut seen = HashSet::new();
        for variable in variables {
            if !re.is_match(&variable.key) {
                anyhow::bail!("Invalid environment variable name '{}' in {}", variable.key, owner);
            }
            if !seen.insert(variable.key.as_str()) {
                anyhow::bail!("Duplicate environment variable '{}' in {}", variable.key, owner);
            }
            if variable.value.contains(['\n', '\r']) {
                anyhow::bail!("Value of '{}' in {} must be a single line", variable.key, owner);
            }
            if variable.value.contains('\'') {
                anyhow::bail!(
                    "Value of '{}' in {} cannot contain a single quote",
                    variable.key,
                    owner
                );
            }
        }
        Ok(())
    }
}

impl ValidationRule for EnvVariablesRule {
    fn name(&self) -> &'static str {
        "EnvVariables"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let re = Regex::new(ENV_KEY_PATTERN)?;

        Self::check(&re, "global variables", &config.global_env_variables)?;
        for container in &config.containers {
            let owner = format!("container '{}'", container.internal_name);
            Self::check(&re, &owner, &container.env_variables)?;
        }

        if !re.is_match(&config.api_url_variable_name) {
            anyhow::bail!(
                "API URL variable name '{}' is not a valid environment variable name",
                config.api_url_variable_name
            );
        }
        Ok(())
    }
}

pub struct NetworkNameRule;

impl ValidationRule for NetworkNameRule {
    fn name(&self) -> &'static str {
        "NetworkName"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        match config.network_name.as_deref() {
            None if config.containers.len() > 1 => {
                anyhow::bail!("A network name is required when there is more than one container")
            }
            Some(name) if !Regex::new(NAME_PATTERN)?.is_match(name) => {
                anyhow::bail!("Network name '{}' may only contain letters, digits, '_', '.' and '-'", name)
            }
            _ => Ok(()),
        }
    }
}

pub struct ProxyPathsRule;

impl ValidationRule for ProxyPathsRule {
    fn name(&self) -> &'static str {
        "ProxyPaths"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let mut seen = HashSet::new();
        for container in config.proxied_containers() {
            let raw = container.proxy_path.as_deref().unwrap_or_default().trim();
            if !raw.starts_with('/') {
                anyhow::bail!(
                    "Proxy path '{}' of container '{}' must start with '/'",
                    raw,
                    container.internal_name
                );
            }
            if raw.contains(char::is_whitespace) || raw.contains(['{', '}', ';']) {
                anyhow::bail!("Proxy path '{}' contains characters Nginx cannot route", raw);
            }
            if let Some(location) = container.location_path() {
                if !seen.insert(location.clone()) {
                    anyhow::bail!("Proxy path '{}' is used by more than one container", location);
                }
            }
        }
        Ok(())
    }
}

pub struct BuildContextRule;

impl BuildContextRule {
    fn escapes_root(context: &Path) -> bool {
        let mut depth: i32 = 0;
        for component in context.components() {
            match component {
                Component::ParentDir => depth -= 1,
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return true,
            }
            if depth < 0 {
                return true;
            }
        }
        false
    }
}

impl ValidationRule for BuildContextRule {
    fn name(&self) -> &'static str {
        "BuildContext"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        for container in &config.containers {
            let Some(context) = container.build_context.as_deref() else {
                continue;
            };
            if Self::escapes_root(Path::new(context.trim())) {
                anyhow::bail!(
                    "Build context '{}' of container '{}' must be a path inside the project",
                    context,
                    container.internal_name
                );
            }
        }
        Ok(())
    }
}

pub struct RepositoryRule;

impl ValidationRule for RepositoryRule {
    fn name(&self) -> &'static str {
        "Repository"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let repository = &config.repository;
        if repository.uri.contains("://") {
            anyhow::bail!(
                "Repository '{}' must be written without a scheme, e.g. github.com/owner/repo",
                repository.uri
            );
        }
        if !Regex::new(REPOSITORY_PATTERN)?.is_match(repository.clone_path()) {
            anyhow::bail!(
                "Repository '{}' must look like host/owner/repo, e.g. github.com/owner/repo",
                repository.uri
            );
        }
        if !Regex::new(BRANCH_PATTERN)?.is_match(&repository.branch) {
            anyhow::bail!("Invalid branch name '{}'", repository.branch);
        }
        Ok(())
    }
}

pub struct ContactRule;

impl ValidationRule for ContactRule {
    fn name(&self) -> &'static str {
        "Contact"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let domain = config.domain.trim();
        if domain.is_empty() {
            anyhow::bail!("Domain is required");
        }
        if !Regex::new(DOMAIN_PATTERN)?.is_match(domain) {
            anyhow::bail!("'{}' is not a valid domain name", domain);
        }

        let email = config.contact_email.trim();
        if email.is_empty() {
            anyhow::bail!("Contact email is required for certificate registration");
        }
        if !Regex::new(EMAIL_PATTERN)?.is_match(email) || email.contains(['"', '\'', '$', '`']) {
            anyhow::bail!("'{}' is not a valid email address", email);
        }
        Ok(())
    }
}

pub struct DeployTargetRule;

impl ValidationRule for DeployTargetRule {
    fn name(&self) -> &'static str {
        "DeployTarget"
    }

    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let path = config.remote_deploy_path.trim();
        if path.is_empty() {
            anyhow::bail!("Remote deploy path is required");
        }
        if !Regex::new(DEPLOY_PATH_PATTERN)?.is_match(path) || path.split('/').any(|s| s == "..") {
            anyhow::bail!("Remote deploy path '{}' must be a plain directory path", path);
        }

        let name = config.proxy_config_name.as_str();
        if !Regex::new(FILE_NAME_PATTERN)?.is_match(name) {
            anyhow::bail!("Proxy config name '{}' must be a plain file name", name);
        }
        Ok(())
    }
}
