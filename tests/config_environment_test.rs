// ABOUTME: Unit tests for environment-based platform configuration
// ABOUTME: Validates tenant provider parsing, monitoring settings, and failure modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use elevportal::config::environment::{Environment, PlatformConfig, ProviderConfig};
use serial_test::serial;
use std::env;

fn clear_platform_env() {
    let tenant_keys: Vec<String> = env::vars()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("TENANT_"))
        .collect();
    for key in tenant_keys {
        env::remove_var(key);
    }
    for key in [
        "TENANTS",
        "ENVIRONMENT",
        "MONITORING_ENABLED",
        "TELEMETRY_ENDPOINT",
        "TELEMETRY_BATCH_SIZE",
        "TELEMETRY_FLUSH_INTERVAL_MS",
        "TELEMETRY_MAX_PENDING",
        "DEFAULT_MUNICIPALITY",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_with_no_tenants() {
    clear_platform_env();
    let config = PlatformConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.default_municipality, "malmo_stad");
    assert!(config.tenants.is_empty());
    assert!(config.monitoring.enabled);
    assert!(config.monitoring.endpoint.is_none());
    assert_eq!(config.monitoring.batch_size, 50);
    assert_eq!(config.monitoring.flush_interval_ms, 30_000);
}

#[test]
#[serial]
fn test_saml_tenant_is_loaded() {
    clear_platform_env();
    env::set_var("TENANTS", "malmo_stad");
    env::set_var("TENANT_MALMO_STAD_SAML_ENTRY_POINT", "https://idp.malmo.se/sso");
    env::set_var("TENANT_MALMO_STAD_SAML_ISSUER", "elevportal-malmo");
    env::set_var("TENANT_MALMO_STAD_SAML_CERT", "cert-pem");

    let config = PlatformConfig::from_env().unwrap();
    assert_eq!(config.tenants.tenant_ids(), vec!["malmo_stad"]);
    match config.tenants.get("malmo_stad") {
        Some(ProviderConfig::Saml(saml)) => {
            assert_eq!(saml.entry_point, "https://idp.malmo.se/sso");
            assert_eq!(saml.issuer, "elevportal-malmo");
            // Default NameID format applies when unset
            assert!(saml.identifier_format.contains("emailAddress"));
        }
        other => panic!("expected SAML config, got {other:?}"),
    }
    clear_platform_env();
}

#[test]
#[serial]
fn test_oauth_tenant_is_loaded_with_scope_list() {
    clear_platform_env();
    env::set_var("TENANTS", "berlin_bezirk");
    env::set_var("TENANT_BERLIN_BEZIRK_OAUTH_CLIENT_ID", "elevportal-berlin");
    env::set_var("TENANT_BERLIN_BEZIRK_OAUTH_AUTHORITY", "https://login.berlin.de");
    env::set_var("TENANT_BERLIN_BEZIRK_OAUTH_SCOPES", "openid, profile,email");

    let config = PlatformConfig::from_env().unwrap();
    match config.tenants.get("berlin_bezirk") {
        Some(ProviderConfig::OAuth(oauth)) => {
            assert_eq!(oauth.client_id, "elevportal-berlin");
            assert_eq!(oauth.scopes, vec!["openid", "profile", "email"]);
        }
        other => panic!("expected OAuth config, got {other:?}"),
    }
    clear_platform_env();
}

#[test]
#[serial]
fn test_tenant_without_provider_block_fails() {
    clear_platform_env();
    env::set_var("TENANTS", "ghost_kommun");

    let err = PlatformConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("ghost_kommun"));
    clear_platform_env();
}

#[test]
#[serial]
fn test_incomplete_saml_block_fails() {
    clear_platform_env();
    env::set_var("TENANTS", "malmo_stad");
    env::set_var("TENANT_MALMO_STAD_SAML_ENTRY_POINT", "https://idp.malmo.se/sso");
    // issuer and cert missing

    assert!(PlatformConfig::from_env().is_err());
    clear_platform_env();
}

#[test]
#[serial]
fn test_monitoring_can_be_disabled() {
    clear_platform_env();
    env::set_var("MONITORING_ENABLED", "false");
    let config = PlatformConfig::from_env().unwrap();
    assert!(!config.monitoring.enabled);
    clear_platform_env();
}

#[test]
#[serial]
fn test_invalid_telemetry_endpoint_fails() {
    clear_platform_env();
    env::set_var("TELEMETRY_ENDPOINT", "not a url");
    assert!(PlatformConfig::from_env().is_err());
    clear_platform_env();
}

#[test]
#[serial]
fn test_telemetry_tuning_from_env() {
    clear_platform_env();
    env::set_var("TELEMETRY_ENDPOINT", "https://telemetry.elevportal.se/v1/batch");
    env::set_var("TELEMETRY_BATCH_SIZE", "25");
    env::set_var("TELEMETRY_FLUSH_INTERVAL_MS", "5000");
    env::set_var("ENVIRONMENT", "production");

    let config = PlatformConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert!(config.environment.is_production());
    assert_eq!(config.monitoring.batch_size, 25);
    assert_eq!(config.monitoring.flush_interval_ms, 5000);
    assert_eq!(
        config.monitoring.endpoint.as_deref(),
        Some("https://telemetry.elevportal.se/v1/batch")
    );
    clear_platform_env();
}
