//! Secret Redaction Policy
//!
//! Decides, per environment variable, whether the real value or a fixed
//! placeholder is written into generated artifacts. Every compiler that
//! serializes variable values goes through [`SecretPolicy::value_for`].

use crate::catalog::{ContainerRegistry, TypeClass};
use crate::project::{ContainerInstance, EnvVariable, ProjectConfig};
use serde::Serialize;

/// Written in place of every redacted value
pub const REDACTED_PLACEHOLDER: &str = "very_secret_value";

/// Why a value was or was not written verbatim, in rule priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disclosure {
    /// `includeSensitiveValues` is on
    SensitiveIncluded,
    /// Frontend API base URL, needed by peers to route
    ApiUrl,
    /// Framework public-origin key of the owning frontend
    PublicOrigin,
    Redacted,
}

impl Disclosure {
    pub fn is_revealed(self) -> bool {
        self != Disclosure::Redacted
    }
}

pub struct SecretPolicy<'a> {
    config: &'a ProjectConfig,
    registry: &'a ContainerRegistry,
}

impl<'a> SecretPolicy<'a> {
    pub fn new(config: &'a ProjectConfig, registry: &'a ContainerRegistry) -> Self {
        Self { config, registry }
    }

    /// `container` is `None` for project-wide variables.
    pub fn decide(&self, key: &str, container: Option<&ContainerInstance>) -> Disclosure {
        if self.config.include_sensitive_values {
            return Disclosure::SensitiveIncluded;
        }

        let Some(container) = container else {
            return Disclosure::Redacted;
        };

        if self.registry.type_class(&container.kind) != Some(TypeClass::Frontend) {
            return Disclosure::Redacted;
        }

        if key == self.config.api_url_variable_name {
            return Disclosure::ApiUrl;
        }

        if self
            .registry
            .public_origin_keys(&container.kind)
            .contains(&key)
        {
            return Disclosure::PublicOrigin;
        }

        Disclosure::Redacted
    }

    /// Value to serialize for `variable`, whose `value` is already the
    /// effective one (topology-derived for the API URL key).
    pub fn value_for(&self, variable: &EnvVariable, container: Option<&ContainerInstance>) -> String {
        if self.decide(&variable.key, container).is_revealed() {
            variable.value.clone()
        } else {
            REDACTED_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContainerKindId;
    use crate::project::Repository;

    fn config(include_sensitive_values: bool) -> ProjectConfig {
        ProjectConfig {
            containers: vec![],
            global_env_variables: vec![],
            network_name: None,
            repository: Repository {
                is_private: false,
                uri: "github.com/acme/shop".into(),
                branch: "main".into(),
            },
            domain: "shop.example.com".into(),
            contact_email: "ops@example.com".into(),
            api_url_variable_name: "API_URL".into(),
            include_sensitive_values,
            remote_deploy_path: "/shop".into(),
            proxy_config_name: "shop".into(),
        }
    }

    #[test]
    fn test_include_sensitive_reveals_everything() {
        let config = config(true);
        let registry = ContainerRegistry::with_defaults();
        let policy = SecretPolicy::new(&config, &registry);
        let db = ContainerInstance::new("db", 5432, ContainerKindId::Postgres);

        let var = EnvVariable::new("POSTGRES_PASSWORD", "hunter2");
        assert_eq!(policy.value_for(&var, Some(&db)), "hunter2");
        assert_eq!(policy.value_for(&var, None), "hunter2");
    }

    #[test]
    fn test_frontend_api_url_is_never_redacted() {
        let config = config(false);
        let registry = ContainerRegistry::with_defaults();
        let policy = SecretPolicy::new(&config, &registry);
        let web = ContainerInstance::new("web", 3000, ContainerKindId::Next);

        let var = EnvVariable::new("API_URL", "http://api");
        assert_eq!(policy.decide("API_URL", Some(&web)), Disclosure::ApiUrl);
        assert_eq!(policy.value_for(&var, Some(&web)), "http://api");
    }

    #[test]
    fn test_api_url_on_backend_is_redacted() {
        let config = config(false);
        let registry = ContainerRegistry::with_defaults();
        let policy = SecretPolicy::new(&config, &registry);
        let api = ContainerInstance::new("api", 8080, ContainerKindId::Laravel);

        assert_eq!(policy.decide("API_URL", Some(&api)), Disclosure::Redacted);
    }

    #[test]
    fn test_public_origin_only_for_owning_framework() {
        let config = config(false);
        let registry = ContainerRegistry::with_defaults();
        let policy = SecretPolicy::new(&config, &registry);
        let svelte = ContainerInstance::new("web", 3000, ContainerKindId::SvelteKit);
        let next = ContainerInstance::new("web", 3000, ContainerKindId::Next);

        assert_eq!(policy.decide("ORIGIN", Some(&svelte)), Disclosure::PublicOrigin);
        assert_eq!(policy.decide("ORIGIN", Some(&next)), Disclosure::Redacted);
        assert_eq!(
            policy.decide("NEXTAUTH_URL", Some(&next)),
            Disclosure::PublicOrigin
        );
    }

    #[test]
    fn test_plain_secret_gets_placeholder() {
        let config = config(false);
        let registry = ContainerRegistry::with_defaults();
        let policy = SecretPolicy::new(&config, &registry);
        let web = ContainerInstance::new("web", 3000, ContainerKindId::Next);

        let var = EnvVariable::new("STRIPE_KEY", "sk_live_123");
        assert_eq!(policy.value_for(&var, Some(&web)), REDACTED_PLACEHOLDER);
        assert_eq!(policy.value_for(&var, None), REDACTED_PLACEHOLDER);
    }
}
