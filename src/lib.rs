// ABOUTME: Main library entry point for the elevportal municipal e-learning core
// ABOUTME: Provides multi-tenant SSO, session isolation, and buffered telemetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

#![deny(unsafe_code)]

//! # Elevportal Core
//!
//! Backend core shared by municipal e-learning deployments. Each municipality
//! is a tenant with its own SSO provider configuration and isolated session
//! namespace. This crate provides:
//!
//! - **Enterprise SSO**: Per-tenant SAML/OAuth authentication against
//!   pluggable validator collaborators
//! - **Tenant isolation**: Session descriptors with namespaced identifiers,
//!   permission grants, and data-access scoping
//! - **Cultural context**: Locale-driven UI preference profiles resolved from
//!   tenant identifiers
//! - **Telemetry**: Buffered error/metric capture with batched delivery to a
//!   remote collector
//! - **Game analytics**: Aggregation over recorded gameplay metrics
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use elevportal::config::environment::PlatformConfig;
//! use elevportal::tenant::TenantIsolationManager;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PlatformConfig::from_env()?;
//!     let isolation = TenantIsolationManager::new();
//!     let session = isolation.isolate_session("anna.larsson", "malmo_stad").await;
//!     println!("session namespace: {}", session.namespace);
//!     Ok(())
//! }
//! ```

/// Game analytics aggregation over recorded metrics
pub mod analytics;
/// Configuration management from environment variables
pub mod config;
/// System-wide constants and environment-overridable defaults
pub mod constants;
/// Cultural context resolution for tenant UI preferences
pub mod culture;
/// Error types for authentication and telemetry
pub mod errors;
/// Structured logging configuration and auth event helpers
pub mod logging;
/// Core data models shared across modules
pub mod models;
/// Error/metric telemetry buffering and batch delivery
pub mod monitoring;
/// Enterprise SSO authentication against per-tenant providers
pub mod sso;
/// Multi-tenant session isolation
pub mod tenant;

pub use culture::{CulturalPreferences, CulturalTag};
pub use errors::{AuthError, AuthResult, TelemetryError};
pub use models::{AuthenticatedUser, ErrorRecord, MetricRecord, SessionDescriptor};
pub use monitoring::{SessionStore, TelemetryBuffer};
pub use sso::SsoAuthenticator;
pub use tenant::TenantIsolationManager;
