use crate::catalog::ContainerRegistry;
use crate::project::ProjectConfig;
use crate::validation::rules::{
    BuildContextRule, ContactRule, ContainerNamesRule, ContainersPresentRule, DeployTargetRule,
    EnvVariablesRule, ExternalPortsRule, NetworkNameRule, ProxyPathsRule, RepositoryRule,
    ValidationRule,
};
use anyhow::Result;

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    /// Every rule violation, prefixed with the rule name
    pub fn errors(&self, config: &ProjectConfig) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.validate(config)
                    .err()
                    .map(|e| format!("[{}] {}", rule.name(), e))
            })
            .collect()
    }

    pub fn validate(&self, config: &ProjectConfig) -> Result<()> {
        let errors = self.errors(config);
        if !errors.is_empty() {
            anyhow::bail!("{}", errors.join("; "));
        }
        Ok(())
    }

    /// Non-fatal findings: unknown kinds, missing startup variables and
    /// build contexts that a prebuilt image ignores
    pub fn warnings(&self, config: &ProjectConfig, registry: &ContainerRegistry) -> Vec<String> {
        let mut warnings = Vec::new();

        for container in &config.containers {
            let Some(kind) = registry.get(&container.kind) else {
                let slug = container.kind.slug();
                warnings.push(match registry.suggest(slug) {
                    Some(suggestion) => format!(
                        "Container '{}' has unknown kind '{}' (did you mean '{}'?); it gets no Dockerfile or dependency wiring",
                        container.internal_name, slug, suggestion
                    ),
                    None => format!(
                        "Container '{}' has unknown kind '{}'; it gets no Dockerfile or dependency wiring",
                        container.internal_name, slug
                    ),
                });
                continue;
            };

            let missing: Vec<&str> = kind
                .default_env_keys()
                .into_iter()
                .filter(|key| !container.env_variables.iter().any(|v| v.key == *key))
                .collect();
            if !missing.is_empty() {
                warnings.push(format!(
                    "Container '{}' ({}) is missing {}; the image may refuse to start without them",
                    container.internal_name,
                    kind.id().display_name(),
                    missing.join(", ")
                ));
            }

            if registry.is_prebuilt(&container.kind) && container.context_dir().is_some() {
                warnings.push(format!(
                    "Container '{}' runs a prebuilt image; its build context is ignored",
                    container.internal_name
                ));
            }
        }

        warnings
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(ContainersPresentRule),
                Box::new(ContainerNamesRule),
                Box::new(ExternalPortsRule),
                Box::new(EnvVariablesRule),
                Box::new(NetworkNameRule),
                Box::new(ProxyPathsRule),
                Box::new(BuildContextRule),
                Box::new(RepositoryRule),
                Box::new(ContactRule),
                Box::new(DeployTargetRule),
            ],
        }
    }
}
