//! Generator settings
//!
//! Settings come from environment variables with defaults; CLI flags
//! override them after loading.
//!
//! # Environment Variables
//!
//! - `EZDEPLOY_SKIP_PREFLIGHT`: Skip the uncommitted-changes check - default: "false"
//! - `EZDEPLOY_UPDATE_GITIGNORE`: Add script and env-file entries to `.gitignore` - default: "true"
//! - `EZDEPLOY_PATCH_CONFIGS`: Patch framework configs for standalone builds - default: "true"
//! - `EZDEPLOY_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```
//! use ezdeploy::GeneratorConfig;
//!
//! let config = GeneratorConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SKIP_PREFLIGHT: bool = false;
const DEFAULT_UPDATE_GITIGNORE: bool = true;
const DEFAULT_PATCH_CONFIGS: bool = true;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Generate even when the working tree is dirty or not a repository
    pub skip_preflight: bool,

    pub update_gitignore: bool,

    /// Rewrite `next.config.*` / `svelte.config.js` for standalone server builds
    pub patch_framework_configs: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneratorConfig {
    /// Loads `EZDEPLOY_*` variables, falling back to defaults for anything
    /// missing or unparsable
    fn default() -> Self {
        let flag = |key: &str, default: bool| {
            env::var(key)
                .ok()
                .and_then(|v| parse_bool(key, &v).ok())
                .unwrap_or(default)
        };

        Self {
            skip_preflight: flag("EZDEPLOY_SKIP_PREFLIGHT", DEFAULT_SKIP_PREFLIGHT),
            update_gitignore: flag("EZDEPLOY_UPDATE_GITIGNORE", DEFAULT_UPDATE_GITIGNORE),
            patch_framework_configs: flag("EZDEPLOY_PATCH_CONFIGS", DEFAULT_PATCH_CONFIGS),
            log_level: env::var("EZDEPLOY_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`
pub fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::ParseError {
            field: field.to_string(),
            error: format!("expected a boolean, got '{}'", other),
        }),
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }

    pub fn with_skip_preflight(mut self, skip: bool) -> Self {
        self.skip_preflight = skip;
        self
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Skip Preflight: {}", self.skip_preflight)?;
        writeln!(f, "  Update .gitignore: {}", self.update_gitignore)?;
        writeln!(f, "  Patch Framework Configs: {}", self.patch_framework_configs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn remove(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::remove("EZDEPLOY_SKIP_PREFLIGHT"),
            EnvGuard::remove("EZDEPLOY_UPDATE_GITIGNORE"),
            EnvGuard::remove("EZDEPLOY_PATCH_CONFIGS"),
            EnvGuard::remove("EZDEPLOY_LOG_LEVEL"),
        ];

        let config = GeneratorConfig::default();

        assert!(!config.skip_preflight);
        assert!(config.update_gitignore);
        assert!(config.patch_framework_configs);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guards = vec![
            EnvGuard::set("EZDEPLOY_SKIP_PREFLIGHT", "yes"),
            EnvGuard::set("EZDEPLOY_UPDATE_GITIGNORE", "0"),
            EnvGuard::set("EZDEPLOY_PATCH_CONFIGS", "off"),
            EnvGuard::set("EZDEPLOY_LOG_LEVEL", "DEBUG"),
        ];

        let config = GeneratorConfig::default();

        assert!(config.skip_preflight);
        assert!(!config.update_gitignore);
        assert!(!config.patch_framework_configs);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unparsable_flag_falls_back_to_default() {
        let _guard = EnvGuard::set("EZDEPLOY_UPDATE_GITIGNORE", "sometimes");
        assert!(GeneratorConfig::default().update_gitignore);
    }

    #[test]
    #[serial]
    fn test_invalid_log_level() {
        let _guard = EnvGuard::set("EZDEPLOY_LOG_LEVEL", "loud");
        let err = GeneratorConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level: loud"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", " no ").unwrap());
        assert!(matches!(
            parse_bool("X", "maybe"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_display() {
        let text = GeneratorConfig {
            skip_preflight: true,
            update_gitignore: true,
            patch_framework_configs: false,
            log_level: "warn".into(),
        }
        .to_string();

        assert!(text.contains("Skip Preflight: true"));
        assert!(text.contains("Patch Framework Configs: false"));
    }
}
