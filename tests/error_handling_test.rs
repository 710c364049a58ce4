//! Error handling integration tests
//!
//! Covers the failure paths a caller sees:
//! - Unreadable or malformed project configs
//! - Invalid field values collected by validation
//! - Failed results carrying a stable error kind

use ezdeploy::project::{ConfigFormat, LoadError};
use ezdeploy::{ErrorKind, GenerationError, GenerationResult, Generator, ProjectConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_JSON: &str = r#"{
  "containers": [
    { "internalName": "web", "externalPort": 3000, "kind": "nuxt", "buildContext": ".", "proxyPath": "/" }
  ],
  "repository": { "uri": "github.com/acme/site" },
  "domain": "site.example.com",
  "contactEmail": "ops@example.com",
  "remoteDeployPath": "/site"
}"#;

#[test]
fn test_missing_config_file() {
    let path = PathBuf::from("/nonexistent/ezdeploy.json");
    match ProjectConfig::from_path(&path) {
        Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_malformed_json() {
    let err = ProjectConfig::parse("{ \"containers\": [", ConfigFormat::Json).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
    assert!(err.to_string().starts_with("Invalid JSON project config"));
}

#[test]
fn test_port_out_of_range() {
    let json = VALID_JSON.replace("\"externalPort\": 3000", "\"externalPort\": 70000");
    let err = ProjectConfig::parse(&json, ConfigFormat::Json).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn test_port_not_a_number() {
    let json = VALID_JSON.replace("\"externalPort\": 3000", "\"externalPort\": \"http\"");
    let err = ProjectConfig::parse(&json, ConfigFormat::Json).unwrap_err();
    assert!(err.to_string().contains("is not a number"));
}

#[test]
fn test_missing_required_field() {
    let json = VALID_JSON.replace("\"domain\": \"site.example.com\",", "");
    let err = ProjectConfig::parse(&json, ConfigFormat::Json).unwrap_err();
    assert!(err.to_string().contains("domain"));
}

#[test]
fn test_validation_collects_every_problem() {
    let mut config = ProjectConfig::parse(VALID_JSON, ConfigFormat::Json).unwrap();
    config.domain = "localhost".into();
    config.contact_email = "nobody".into();
    config.repository.uri = "https://github.com/acme/site".into();

    match Generator::default().render(&config) {
        Err(GenerationError::InvalidConfig(errors)) => {
            assert_eq!(errors.len(), 2, "{:?}", errors);
            assert!(errors.iter().any(|e| e.starts_with("[Repository]")));
            assert!(errors.iter().any(|e| e.starts_with("[Contact]")));
        }
        other => panic!("Expected InvalidConfig, got {:?}", other.map(|s| s.paths())),
    }
}

#[test]
fn test_single_container_needs_no_network() {
    let config = ProjectConfig::parse(VALID_JSON, ConfigFormat::Json).unwrap();
    let set = Generator::default().render(&config).unwrap();
    assert_eq!(set.paths()[0], "Dockerfile");
}

#[test]
fn test_failed_result_serializes_error_kind() {
    let err = GenerationError::UncommittedChanges {
        changed: vec!["README.md".into()],
    };
    let result = GenerationResult::failed(&err, vec![], vec![]);

    assert_eq!(result.error, Some(ErrorKind::UncommittedChanges));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "uncommitted-changes");
    assert!(json["message"].as_str().unwrap().contains("uncommitted changes"));
}

#[test]
fn test_generate_into_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ezdeploy.json");
    fs::write(&path, VALID_JSON).unwrap();
    let config = ProjectConfig::from_path(&path).unwrap();

    let result = Generator::default().generate(&config, &temp_dir.path().join("missing"));
    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorKind::GenerationError));
    assert!(result.files.is_empty());
}
