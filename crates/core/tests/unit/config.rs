//! # Configuration Tests
//!
//! Defaults, JSON deserialization, and validation.

use memsched_core::common::ConfigError;
use memsched_core::config::{AdmissionPolicy, Config};
use memsched_core::Simulator;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.capacity_mb, 1024);
    assert_eq!(config.admission, AdmissionPolicy::HeadOfLine);
    assert_eq!(config.history_tail, 10);
    assert_eq!(config.tick_interval_ms, 1000);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_document_overrides() {
    let config =
        Config::from_json(r#"{ "capacity_mb": 500, "admission": "first_fit" }"#).unwrap();
    assert_eq!(config.capacity_mb, 500);
    assert_eq!(config.admission, AdmissionPolicy::FirstFit);
    assert_eq!(config.history_tail, 10);
}

#[test]
fn test_policy_aliases() {
    let config = Config::from_json(r#"{ "admission": "HeadOfLine" }"#).unwrap();
    assert_eq!(config.admission, AdmissionPolicy::HeadOfLine);
    let config = Config::from_json(r#"{ "admission": "FirstFit" }"#).unwrap();
    assert_eq!(config.admission, AdmissionPolicy::FirstFit);
}

#[test]
fn test_zero_capacity_rejected() {
    let err = Config::from_json(r#"{ "capacity_mb": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroCapacity));
    assert!(Simulator::with_capacity(0).is_err());
}

#[test]
fn test_zero_history_tail_rejected() {
    let err = Config::from_json(r#"{ "history_tail": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroHistoryTail));
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_json(r#"{ "cores": 4 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_negative_capacity_is_parse_error() {
    let err = Config::from_json(r#"{ "capacity_mb": -5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
