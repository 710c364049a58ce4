//! ProjectConfig: the single source of truth for one generation request.
//!
//! Field names follow the camelCase wire format. The snake_case names used by
//! the web form submission are accepted as aliases so a saved form state
//! can be fed in unchanged.

use crate::catalog::ContainerKindId;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_API_URL_VARIABLE: &str = "API_URL";
pub const DEFAULT_NETWORK_NAME: &str = "custom_network";
pub const DEFAULT_PROXY_CONFIG_NAME: &str = "default";
pub const DEFAULT_BRANCH: &str = "main";

fn default_api_url_variable() -> String {
    DEFAULT_API_URL_VARIABLE.to_string()
}

fn default_proxy_config_name() -> String {
    DEFAULT_PROXY_CONFIG_NAME.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Treats `""` and `null` the same as a missing value
fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn deserialize_api_url_variable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_blank_as_none(deserializer)?.unwrap_or_else(default_api_url_variable))
}

/// Ports arrive as numbers from files and as strings from the form
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortRepr {
        Number(u64),
        Text(String),
    }

    let number = match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(n) => n,
        PortRepr::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("port '{}' is not a number", s)))?,
    };

    u16::try_from(number)
        .map_err(|_| serde::de::Error::custom(format!("port {} is out of range", number)))
}

/// Accepts either `"site"` or the form's `{ "configName": "site" }`
fn deserialize_proxy_config_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ProxyConfigRepr {
        Name(String),
        Nested {
            #[serde(rename = "configName")]
            config_name: String,
        },
    }

    let name = match Option::<ProxyConfigRepr>::deserialize(deserializer)? {
        Some(ProxyConfigRepr::Name(name)) => name,
        Some(ProxyConfigRepr::Nested { config_name }) => config_name,
        None => String::new(),
    };

    if name.trim().is_empty() {
        Ok(default_proxy_config_name())
    } else {
        Ok(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
}

impl EnvVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInstance {
    #[serde(alias = "name")]
    pub internal_name: String,

    #[serde(alias = "port", deserialize_with = "deserialize_port")]
    pub external_port: u16,

    #[serde(alias = "id")]
    pub kind: ContainerKindId,

    /// Relative build context; `None` means prebuilt image or project root
    #[serde(
        default,
        alias = "context",
        deserialize_with = "deserialize_blank_as_none"
    )]
    pub build_context: Option<String>,

    /// URL prefix routed to this container; `None` keeps it off the proxy
    #[serde(
        default,
        alias = "proxy",
        deserialize_with = "deserialize_blank_as_none"
    )]
    pub proxy_path: Option<String>,

    #[serde(default, alias = "env_variables")]
    pub env_variables: Vec<EnvVariable>,
}

impl ContainerInstance {
    pub fn new(name: impl Into<String>, external_port: u16, kind: ContainerKindId) -> Self {
        Self {
            internal_name: name.into(),
            external_port,
            kind,
            build_context: None,
            proxy_path: None,
            env_variables: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.build_context = Some(context.into());
        self
    }

    pub fn with_proxy(mut self, path: impl Into<String>) -> Self {
        self.proxy_path = Some(path.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_variables.push(EnvVariable::new(key, value));
        self
    }

    /// Build context as a clean relative directory. `None` for the project root.
    pub fn context_dir(&self) -> Option<PathBuf> {
        let context = self.build_context.as_deref()?;
        let cleaned: PathBuf = Path::new(context)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        if cleaned.as_os_str().is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Compose `build.context` value. Root context renders as `.`.
    pub fn compose_context(&self) -> String {
        match self.context_dir() {
            Some(dir) => format!("./{}", to_slash(&dir)),
            None => ".".to_string(),
        }
    }

    /// Proxy prefix as an nginx location: `/` stays as is, anything else
    /// gets exactly one leading and one trailing slash.
    pub fn location_path(&self) -> Option<String> {
        let raw = self.proxy_path.as_deref()?.trim();
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            Some("/".to_string())
        } else {
            Some(format!("/{}/", trimmed))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default)]
    pub is_private: bool,

    /// `host/owner/repo`, no scheme
    pub uri: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Repository {
    /// Host path without a trailing `.git` or slash, safe to wrap in `https://...git`
    pub fn clone_path(&self) -> &str {
        let uri = self.uri.trim().trim_end_matches('/');
        uri.strip_suffix(".git").unwrap_or(uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub containers: Vec<ContainerInstance>,

    #[serde(default, alias = "env_variables")]
    pub global_env_variables: Vec<EnvVariable>,

    /// Only meaningful with more than one container
    #[serde(
        default,
        alias = "network_name",
        deserialize_with = "deserialize_blank_as_none"
    )]
    pub network_name: Option<String>,

    #[serde(alias = "github")]
    pub repository: Repository,

    pub domain: String,

    #[serde(alias = "email")]
    pub contact_email: String,

    #[serde(
        default = "default_api_url_variable",
        alias = "api_url_env",
        deserialize_with = "deserialize_api_url_variable"
    )]
    pub api_url_variable_name: String,

    #[serde(default, alias = "include_sensitive_env_variables")]
    pub include_sensitive_values: bool,

    #[serde(alias = "location")]
    pub remote_deploy_path: String,

    #[serde(
        default = "default_proxy_config_name",
        alias = "nginx",
        deserialize_with = "deserialize_proxy_config_name"
    )]
    pub proxy_config_name: String,
}

impl ProjectConfig {
    pub fn container(&self, name: &str) -> Option<&ContainerInstance> {
        self.containers.iter().find(|c| c.internal_name == name)
    }

    pub fn network_name_or_default(&self) -> &str {
        self.network_name.as_deref().unwrap_or(DEFAULT_NETWORK_NAME)
    }

    pub fn proxied_containers(&self) -> impl Iterator<Item = &ContainerInstance> {
        self.containers.iter().filter(|c| c.proxy_path.is_some())
    }
}

pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_dir_strips_current_dir() {
        let c = ContainerInstance::new("web", 3000, ContainerKindId::Next).with_context("./frontend");
        assert_eq!(c.context_dir(), Some(PathBuf::from("frontend")));
        assert_eq!(c.compose_context(), "./frontend");

        let root = ContainerInstance::new("web", 3000, ContainerKindId::Next).with_context("./");
        assert_eq!(root.context_dir(), None);
        assert_eq!(root.compose_context(), ".");
    }

    #[test]
    fn test_location_path_normalization() {
        let base = ContainerInstance::new("api", 8080, ContainerKindId::Laravel);
        assert_eq!(base.clone().with_proxy("/").location_path().as_deref(), Some("/"));
        assert_eq!(base.clone().with_proxy("/api").location_path().as_deref(), Some("/api/"));
        assert_eq!(base.clone().with_proxy("api/").location_path().as_deref(), Some("/api/"));
        assert_eq!(base.location_path(), None);
    }

    #[test]
    fn test_clone_path_strips_git_suffix() {
        let repo = Repository {
            is_private: false,
            uri: "github.com/acme/shop.git".to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        };
        assert_eq!(repo.clone_path(), "github.com/acme/shop");
    }

    #[test]
    fn test_deserialize_form_submission() {
        let json = r#"{
            "containers": [
                {"name": "web", "port": "3004", "id": "next", "context": "./frontend",
                 "proxy": "/", "env_variables": [{"key": "API_URL", "value": "x"}]},
                {"name": "db", "port": "9891", "id": "postgres", "context": null,
                 "proxy": null, "env_variables": []}
            ],
            "github": {"isPrivate": true, "uri": "github.com/acme/shop"},
            "env_variables": [],
            "network_name": "",
            "domain": "shop.example.com",
            "email": "ops@example.com",
            "api_url_env": "API_URL",
            "include_sensitive_env_variables": false,
            "location": "/shop",
            "nginx": {"configName": "shop"}
        }"#;

        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.containers.len(), 2);
        assert_eq!(config.containers[0].external_port, 3004);
        assert_eq!(config.containers[0].kind, ContainerKindId::Next);
        assert_eq!(config.containers[1].build_context, None);
        assert_eq!(config.network_name, None);
        assert_eq!(config.proxy_config_name, "shop");
        assert_eq!(config.repository.branch, "main");
        assert!(config.repository.is_private);
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "containers": [{"internalName": "api", "externalPort": 8080, "kind": "laravel"}],
            "repository": {"uri": "github.com/acme/api"},
            "domain": "api.example.com",
            "contactEmail": "ops@example.com",
            "remoteDeployPath": "/api"
        }"#;

        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url_variable_name, DEFAULT_API_URL_VARIABLE);
        assert_eq!(config.proxy_config_name, DEFAULT_PROXY_CONFIG_NAME);
        assert!(!config.include_sensitive_values);
        assert!(!config.repository.is_private);
        assert_eq!(config.network_name_or_default(), DEFAULT_NETWORK_NAME);
    }

    #[test]
    fn test_port_out_of_range_is_rejected() {
        let json = r#"{"internalName": "api", "externalPort": 70000, "kind": "laravel"}"#;
        let err = serde_json::from_str::<ContainerInstance>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
