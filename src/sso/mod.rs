// ABOUTME: Enterprise SSO authentication against per-tenant SAML and OAuth providers
// ABOUTME: Delegates credential validation to collaborator traits and composes authenticated users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Enterprise SSO Module
//!
//! Thin authentication adapter: provider protocol handling lives in the
//! validator collaborators, this module owns tenant config lookup, error
//! shaping, and composition of the [`AuthenticatedUser`] record.
//!
//! Validation failures are logged with tenant context and then collapsed
//! into an opaque [`AuthError::AuthenticationFailed`] so callers cannot
//! probe provider behavior through error differences.

use crate::config::environment::{OAuthProviderConfig, ProviderConfig, SamlProviderConfig, TenantConfig};
use crate::constants::permissions;
use crate::culture;
use crate::errors::{AuthError, AuthResult};
use crate::logging;
use crate::models::{AuthenticatedUser, SsoProfile};
use std::sync::Arc;
use tracing::error;

/// Validates a SAML POST response against a tenant's provider configuration.
///
/// Implementations wrap a SAML library; signature and assertion handling is
/// entirely theirs.
#[async_trait::async_trait]
pub trait SamlAssertionValidator: Send + Sync {
    /// Validate a POST-binding response and extract the asserted profile
    async fn validate_post_response(
        &self,
        response: &str,
        config: &SamlProviderConfig,
    ) -> anyhow::Result<SsoProfile>;
}

/// Validates an OAuth access token against a tenant's authority.
#[async_trait::async_trait]
pub trait OAuthTokenValidator: Send + Sync {
    /// Validate a bearer token and extract the subject profile
    async fn validate_token(
        &self,
        token: &str,
        config: &OAuthProviderConfig,
    ) -> anyhow::Result<SsoProfile>;
}

/// Enterprise SSO authenticator for all configured tenants
pub struct SsoAuthenticator {
    tenants: TenantConfig,
    saml: Arc<dyn SamlAssertionValidator>,
    oauth: Arc<dyn OAuthTokenValidator>,
}

impl SsoAuthenticator {
    /// Create an authenticator over a tenant registry and validator pair
    #[must_use]
    pub fn new(
        tenants: TenantConfig,
        saml: Arc<dyn SamlAssertionValidator>,
        oauth: Arc<dyn OAuthTokenValidator>,
    ) -> Self {
        Self {
            tenants,
            saml,
            oauth,
        }
    }

    /// Authenticate an external credential for a tenant.
    ///
    /// `method` selects the provider protocol: `"saml"` or `"oauth"`.
    ///
    /// # Errors
    /// - [`AuthError::ConfigurationNotFound`] when the tenant has no provider
    ///   configuration for the requested method
    /// - [`AuthError::InvalidMethod`] for any other method string
    /// - [`AuthError::AuthenticationFailed`] when the validator rejects the
    ///   credential; the underlying cause is logged, not returned
    pub async fn authenticate(
        &self,
        tenant_id: &str,
        method: &str,
        credential: &str,
    ) -> AuthResult<AuthenticatedUser> {
        let validated = match method {
            "saml" => {
                let config = self.saml_config(tenant_id)?;
                self.saml.validate_post_response(credential, config).await
            }
            "oauth" => {
                let config = self.oauth_config(tenant_id)?;
                self.oauth.validate_token(credential, config).await
            }
            other => {
                logging::log_auth_event(tenant_id, other, false, Some("unsupported method"));
                return Err(AuthError::InvalidMethod(other.to_owned()));
            }
        };

        let profile = validated.map_err(|cause| {
            error!(
                tenant_id = %tenant_id,
                auth_method = %method,
                cause = %cause,
                event_type = "authentication",
                "Enterprise SSO authentication failed"
            );
            AuthError::AuthenticationFailed
        })?;

        let user = self.compose_user(tenant_id, profile).await;
        logging::log_auth_event(tenant_id, method, true, None);
        Ok(user)
    }

    fn saml_config(&self, tenant_id: &str) -> AuthResult<&SamlProviderConfig> {
        match self.tenants.get(tenant_id) {
            Some(ProviderConfig::Saml(config)) => Ok(config),
            _ => Err(self.missing_config(tenant_id, "saml")),
        }
    }

    fn oauth_config(&self, tenant_id: &str) -> AuthResult<&OAuthProviderConfig> {
        match self.tenants.get(tenant_id) {
            Some(ProviderConfig::OAuth(config)) => Ok(config),
            _ => Err(self.missing_config(tenant_id, "oauth")),
        }
    }

    fn missing_config(&self, tenant_id: &str, method: &str) -> AuthError {
        logging::log_auth_event(tenant_id, method, false, Some("no provider configuration"));
        AuthError::ConfigurationNotFound {
            tenant_id: tenant_id.to_owned(),
        }
    }

    /// Compose the authenticated user from a validated profile
    async fn compose_user(&self, tenant_id: &str, profile: SsoProfile) -> AuthenticatedUser {
        AuthenticatedUser {
            id: format!("{tenant_id}:{}", profile.name_id),
            session_namespace: format!("tenant:{tenant_id}:user:{}", profile.name_id),
            email: profile.email,
            display_name: profile.display_name,
            tenant_id: tenant_id.to_owned(),
            cultural_context: culture::resolve(tenant_id),
            permissions: Self::lookup_permissions(tenant_id).await,
        }
    }

    /// Permission lookup for an authenticated user. Currently a static
    /// template; async so a directory-backed lookup can replace it without
    /// touching call sites.
    async fn lookup_permissions(tenant_id: &str) -> Vec<String> {
        let mut perms: Vec<String> = permissions::BASE.iter().map(|&p| p.to_owned()).collect();
        perms.push(format!("tenant:{tenant_id}:all"));
        perms
    }
}
