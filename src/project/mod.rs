//! Project configuration model and loading

pub mod loader;
pub mod types;

pub use loader::{ConfigFormat, LoadError};
pub use types::{
    ContainerInstance, EnvVariable, ProjectConfig, Repository, DEFAULT_API_URL_VARIABLE,
    DEFAULT_BRANCH, DEFAULT_NETWORK_NAME, DEFAULT_PROXY_CONFIG_NAME,
};
