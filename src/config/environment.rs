// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses tenant SSO provider config and telemetry tuning from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! Environment-based configuration management for production deployment

use crate::constants::{env_config, telemetry};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use tracing::{info, warn};
use url::Url;

/// Environment type for logging and telemetry labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// SAML provider configuration for a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamlProviderConfig {
    /// IdP entry point URL the client is redirected to
    pub entry_point: String,
    /// Issuer string this deployment identifies as
    pub issuer: String,
    /// IdP signing certificate, PEM
    pub certificate: String,
    /// NameID format requested from the IdP
    pub identifier_format: String,
}

/// OAuth provider configuration for a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// Registered client identifier
    pub client_id: String,
    /// Authority (issuer) URL tokens are validated against
    pub authority: String,
    /// Scopes requested during the authorization flow
    pub scopes: Vec<String>,
}

/// Provider configuration variants a tenant may carry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// SAML 2.0 POST-binding provider
    Saml(SamlProviderConfig),
    /// OAuth 2.0 / OIDC provider
    OAuth(OAuthProviderConfig),
}

/// Per-tenant provider registry, immutable after load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantConfig {
    providers: HashMap<String, ProviderConfig>,
}

impl TenantConfig {
    /// Empty registry, for tests and manual assembly
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant's provider configuration
    pub fn insert(&mut self, tenant_id: impl Into<String>, provider: ProviderConfig) {
        self.providers.insert(tenant_id.into(), provider);
    }

    /// Look up a tenant's provider configuration
    #[must_use]
    pub fn get(&self, tenant_id: &str) -> Option<&ProviderConfig> {
        self.providers.get(tenant_id)
    }

    /// Number of configured tenants
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether any tenant is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Configured tenant identifiers
    #[must_use]
    pub fn tenant_ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

/// Telemetry and monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Global capture toggle; when false all captures are no-ops
    pub enabled: bool,
    /// Remote collector endpoint; batches are dropped when absent
    pub endpoint: Option<String>,
    /// Queue length that triggers an immediate flush
    pub batch_size: usize,
    /// Timer-driven flush period in milliseconds; 0 disables the timer
    pub flush_interval_ms: u64,
    /// Cap on records retained across failed flushes
    pub max_pending: usize,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            batch_size: telemetry::DEFAULT_BATCH_SIZE,
            flush_interval_ms: telemetry::DEFAULT_FLUSH_INTERVAL_MS,
            max_pending: telemetry::DEFAULT_MAX_PENDING,
        }
    }
}

/// Complete platform configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Municipality label recorded on telemetry
    pub default_municipality: String,
    /// Per-tenant SSO provider registry
    pub tenants: TenantConfig,
    /// Telemetry configuration
    pub monitoring: MonitoringConfig,
}

impl PlatformConfig {
    /// Load configuration from environment variables.
    ///
    /// Tenants are declared in `TENANTS` as a comma-separated list of ids;
    /// each id then carries either a SAML block
    /// (`TENANT_<ID>_SAML_ENTRY_POINT`, `_SAML_ISSUER`, `_SAML_CERT`,
    /// optional `_SAML_IDENTIFIER_FORMAT`) or an OAuth block
    /// (`TENANT_<ID>_OAUTH_CLIENT_ID`, `_OAUTH_AUTHORITY`, optional
    /// `_OAUTH_SCOPES`).
    ///
    /// # Errors
    /// Returns an error when a declared tenant has no complete provider
    /// block, or when the telemetry endpoint is not a valid URL.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let mut tenants = TenantConfig::new();
        if let Ok(list) = env::var("TENANTS") {
            for tenant_id in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let provider = Self::load_tenant_provider(tenant_id)
                    .with_context(|| format!("invalid provider config for tenant {tenant_id}"))?;
                tenants.insert(tenant_id, provider);
            }
        }

        let endpoint = env::var("TELEMETRY_ENDPOINT").ok();
        if let Some(url) = &endpoint {
            Url::parse(url).with_context(|| format!("invalid TELEMETRY_ENDPOINT: {url}"))?;
        }

        let monitoring = MonitoringConfig {
            enabled: env_config::monitoring_enabled(),
            endpoint,
            batch_size: env_config::telemetry_batch_size(),
            flush_interval_ms: env_config::telemetry_flush_interval_ms(),
            max_pending: env_config::telemetry_max_pending(),
        };

        let config = Self {
            environment,
            default_municipality: env_config::default_municipality(),
            tenants,
            monitoring,
        };
        config.log_summary();
        Ok(config)
    }

    /// Read one tenant's provider block from the environment
    fn load_tenant_provider(tenant_id: &str) -> Result<ProviderConfig> {
        let key = |suffix: &str| {
            format!(
                "TENANT_{}_{suffix}",
                tenant_id.to_uppercase().replace('-', "_")
            )
        };

        if let Ok(entry_point) = env::var(key("SAML_ENTRY_POINT")) {
            let issuer = env::var(key("SAML_ISSUER"))
                .with_context(|| format!("{} is required", key("SAML_ISSUER")))?;
            let certificate = env::var(key("SAML_CERT"))
                .with_context(|| format!("{} is required", key("SAML_CERT")))?;
            let identifier_format = env::var(key("SAML_IDENTIFIER_FORMAT")).unwrap_or_else(|_| {
                "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress".into()
            });
            return Ok(ProviderConfig::Saml(SamlProviderConfig {
                entry_point,
                issuer,
                certificate,
                identifier_format,
            }));
        }

        if let Ok(client_id) = env::var(key("OAUTH_CLIENT_ID")) {
            let authority = env::var(key("OAUTH_AUTHORITY"))
                .with_context(|| format!("{} is required", key("OAUTH_AUTHORITY")))?;
            let scopes = env::var(key("OAUTH_SCOPES"))
                .unwrap_or_else(|_| "openid,profile,email".into())
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
            return Ok(ProviderConfig::OAuth(OAuthProviderConfig {
                client_id,
                authority,
                scopes,
            }));
        }

        bail!("tenant {tenant_id} declares neither a SAML nor an OAuth provider block")
    }

    /// Log a startup summary of the loaded configuration
    fn log_summary(&self) {
        info!(
            environment = %self.environment,
            municipality = %self.default_municipality,
            tenants = self.tenants.len(),
            tenant_ids = ?self.tenants.tenant_ids(),
            monitoring_enabled = self.monitoring.enabled,
            "Platform configuration loaded"
        );
        if self.monitoring.enabled && self.monitoring.endpoint.is_none() {
            warn!("monitoring enabled but TELEMETRY_ENDPOINT is unset; batches will be dropped");
        }
    }
}
