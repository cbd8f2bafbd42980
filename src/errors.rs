// ABOUTME: Error types for SSO authentication and telemetry delivery
// ABOUTME: Defines per-domain error enums and result aliases used across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Error Handling
//!
//! Per-domain error enums for the platform core. Authentication failures are
//! deliberately opaque toward callers: the underlying validator error is
//! logged with tenant context and then discarded, so a caller can never
//! distinguish a bad signature from an expired assertion.

use thiserror::Error;

/// Errors surfaced by the SSO authenticator
#[derive(Debug, Error)]
pub enum AuthError {
    /// Tenant has no provider configuration for the requested method
    #[error("No SSO provider configuration found for tenant: {tenant_id}")]
    ConfigurationNotFound {
        /// Tenant that was looked up
        tenant_id: String,
    },

    /// Credential validation failed. The underlying cause is logged, not
    /// carried here.
    #[error("Enterprise SSO authentication failed")]
    AuthenticationFailed,

    /// Unsupported authentication method string
    #[error("Unsupported authentication method: {0}")]
    InvalidMethod(String),
}

/// Errors raised while delivering telemetry batches
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Network or transport failure during batch send
    #[error("Telemetry flush failed: {0}")]
    FlushFailure(String),

    /// Collector endpoint answered with a non-success status
    #[error("Telemetry endpoint returned status {0}")]
    EndpointStatus(u16),
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        err.status().map_or_else(
            || Self::FlushFailure(err.to_string()),
            |status| Self::EndpointStatus(status.as_u16()),
        )
    }
}

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias for telemetry delivery
pub type TelemetryResult<T> = Result<T, TelemetryError>;
