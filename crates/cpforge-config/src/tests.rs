//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"

        [assignment]
        missing_element = "insert"
        initial_capacity = 16
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.assignment.missing_element, MissingElementPolicy::Insert);
    assert_eq!(config.assignment.initial_capacity, Some(16));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        assignment:
          missing_element: fail
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.assignment.missing_element, MissingElementPolicy::Fail);
    assert_eq!(config.assignment.initial_capacity, None);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert!(!config.environment_mode.is_asserted());
}

#[test]
fn test_unknown_policy_rejected() {
    let toml = r#"
        [assignment]
        missing_element = "ignore"
    "#;

    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_zero_capacity_rejected() {
    let toml = r#"
        [assignment]
        initial_capacity = 0
    "#;

    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SolverConfig::load("/nonexistent/cpforge/solver.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_environment_mode(EnvironmentMode::FastAssert)
        .with_missing_element_policy(MissingElementPolicy::Insert);

    assert!(config.environment_mode.is_asserted());
    assert_eq!(config.assignment.missing_element, MissingElementPolicy::Insert);
}

#[test]
fn test_environment_mode_levels() {
    let levels: Vec<_> = [
        EnvironmentMode::NonReproducible,
        EnvironmentMode::Reproducible,
        EnvironmentMode::FastAssert,
        EnvironmentMode::FullAssert,
    ]
    .iter()
    .map(|mode| (mode.is_asserted(), mode.is_fully_asserted()))
    .collect();

    assert_eq!(
        levels,
        vec![(false, false), (false, false), (true, false), (true, true)]
    );
}
