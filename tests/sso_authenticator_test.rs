// ABOUTME: Unit tests for the enterprise SSO authenticator
// ABOUTME: Validates provider lookup, error shaping, and authenticated user composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use elevportal::config::environment::{
    OAuthProviderConfig, ProviderConfig, SamlProviderConfig, TenantConfig,
};
use elevportal::culture::CulturalTag;
use elevportal::errors::AuthError;
use elevportal::models::SsoProfile;
use elevportal::sso::{OAuthTokenValidator, SamlAssertionValidator, SsoAuthenticator};
use std::sync::Arc;

/// Fake SAML validator: accepts the credential "valid-assertion", rejects
/// everything else with a provider-specific error message.
struct FakeSamlValidator;

#[async_trait::async_trait]
impl SamlAssertionValidator for FakeSamlValidator {
    async fn validate_post_response(
        &self,
        response: &str,
        _config: &SamlProviderConfig,
    ) -> anyhow::Result<SsoProfile> {
        if response == "valid-assertion" {
            Ok(SsoProfile {
                name_id: "test-user-123".into(),
                email: "test@malmo.se".into(),
                display_name: "Test User".into(),
            })
        } else {
            anyhow::bail!("signature verification failed: digest mismatch")
        }
    }
}

/// Fake OAuth validator: accepts "valid-token" only.
struct FakeOAuthValidator;

#[async_trait::async_trait]
impl OAuthTokenValidator for FakeOAuthValidator {
    async fn validate_token(
        &self,
        token: &str,
        _config: &OAuthProviderConfig,
    ) -> anyhow::Result<SsoProfile> {
        if token == "valid-token" {
            Ok(SsoProfile {
                name_id: "oauth-user-7".into(),
                email: "lehrer@berlin.de".into(),
                display_name: "Oauth Lehrer".into(),
            })
        } else {
            anyhow::bail!("token introspection returned active=false")
        }
    }
}

fn test_tenants() -> TenantConfig {
    let mut tenants = TenantConfig::new();
    tenants.insert(
        "malmo_stad",
        ProviderConfig::Saml(SamlProviderConfig {
            entry_point: "https://idp.malmo.se/sso".into(),
            issuer: "elevportal-malmo".into(),
            certificate: "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----".into(),
            identifier_format: "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress".into(),
        }),
    );
    tenants.insert(
        "berlin_bezirk",
        ProviderConfig::OAuth(OAuthProviderConfig {
            client_id: "elevportal-berlin".into(),
            authority: "https://login.berlin.de".into(),
            scopes: vec!["openid".into(), "profile".into(), "email".into()],
        }),
    );
    tenants
}

fn test_authenticator() -> SsoAuthenticator {
    SsoAuthenticator::new(
        test_tenants(),
        Arc::new(FakeSamlValidator),
        Arc::new(FakeOAuthValidator),
    )
}

#[tokio::test]
async fn test_saml_authentication_success() {
    let auth = test_authenticator();
    let user = auth
        .authenticate("malmo_stad", "saml", "valid-assertion")
        .await
        .unwrap();

    assert_eq!(user.id, "malmo_stad:test-user-123");
    assert_eq!(user.tenant_id, "malmo_stad");
    assert_eq!(user.email, "test@malmo.se");
    assert_eq!(user.display_name, "Test User");
    assert_eq!(user.cultural_context, CulturalTag::SwedishMobile);
    assert_eq!(
        user.session_namespace,
        "tenant:malmo_stad:user:test-user-123"
    );
}

#[tokio::test]
async fn test_oauth_authentication_success() {
    let auth = test_authenticator();
    let user = auth
        .authenticate("berlin_bezirk", "oauth", "valid-token")
        .await
        .unwrap();

    assert_eq!(user.id, "berlin_bezirk:oauth-user-7");
    assert_eq!(user.cultural_context, CulturalTag::GermanSystematic);
    assert_eq!(user.session_namespace, "tenant:berlin_bezirk:user:oauth-user-7");
}

#[tokio::test]
async fn test_permissions_include_base_set_and_tenant_grant() {
    let auth = test_authenticator();
    let user = auth
        .authenticate("malmo_stad", "saml", "valid-assertion")
        .await
        .unwrap();

    assert_eq!(
        user.permissions,
        vec![
            "read:content".to_owned(),
            "write:progress".to_owned(),
            "access:analytics".to_owned(),
            "tenant:malmo_stad:all".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_unknown_tenant_fails_with_configuration_not_found() {
    let auth = test_authenticator();
    let err = auth
        .authenticate("invalid_tenant", "saml", "valid-assertion")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid_tenant"));
    match err {
        AuthError::ConfigurationNotFound { tenant_id } => {
            assert_eq!(tenant_id, "invalid_tenant");
        }
        other => panic!("expected ConfigurationNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_method_mismatch_fails_with_configuration_not_found() {
    // malmo_stad is SAML-only; asking for oauth is a missing configuration
    let auth = test_authenticator();
    let err = auth
        .authenticate("malmo_stad", "oauth", "valid-token")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::ConfigurationNotFound { .. }));
}

#[tokio::test]
async fn test_invalid_method_is_rejected() {
    let auth = test_authenticator();
    let err = auth
        .authenticate("malmo_stad", "kerberos", "anything")
        .await
        .unwrap_err();
    match err {
        AuthError::InvalidMethod(method) => assert_eq!(method, "kerberos"),
        other => panic!("expected InvalidMethod, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validator_rejection_is_opaque_to_callers() {
    let auth = test_authenticator();
    let err = auth
        .authenticate("malmo_stad", "saml", "tampered-assertion")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::AuthenticationFailed));
    // The provider-specific cause must not leak through the error message
    let message = err.to_string();
    assert_eq!(message, "Enterprise SSO authentication failed");
    assert!(!message.contains("signature"));
}

#[tokio::test]
async fn test_oauth_rejection_is_equally_opaque() {
    let auth = test_authenticator();
    let err = auth
        .authenticate("berlin_bezirk", "oauth", "expired-token")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AuthenticationFailed));
    assert_eq!(err.to_string(), "Enterprise SSO authentication failed");
}
