// ABOUTME: Configuration management module for platform settings
// ABOUTME: Handles environment-sourced tenant provider and telemetry configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! Configuration module for the platform core
//!
//! Configuration is environment-only: one `PlatformConfig::from_env()` call
//! at startup, immutable afterwards. Provides:
//!
//! - **Environment**: deployment mode, default municipality
//! - **Tenants**: per-tenant SAML/OAuth provider configuration
//! - **Monitoring**: telemetry toggle, collector endpoint, batch tuning

/// Environment and platform configuration
pub mod environment;

pub use environment::{
    Environment, MonitoringConfig, OAuthProviderConfig, PlatformConfig, ProviderConfig,
    SamlProviderConfig, TenantConfig,
};
