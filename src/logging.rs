// ABOUTME: Logging configuration and structured logging setup for observability
// ABOUTME: Configures tracing subscriber output and provides tenant-aware auth event logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! Structured logging configuration with environment-driven output format

use std::env;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Service name for structured logging
    pub service_name: String,
    /// Environment label (development, production, testing)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            service_name: "elevportal".into(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self {
            level,
            format,
            service_name: "elevportal".into(),
            environment,
        }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// # Errors
    /// Returns an error when the level filter cannot be parsed or a global
    /// subscriber is already installed.
    pub fn init(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(&self.level)?;
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?,
            LogFormat::Pretty => registry
                .with(tracing_subscriber::fmt::layer().with_target(true))
                .try_init()?,
            LogFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(false),
                )
                .try_init()?,
        }

        info!(
            service = %self.service_name,
            environment = %self.environment,
            level = %self.level,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Log an authentication event with tenant context
pub fn log_auth_event(tenant_id: &str, auth_method: &str, success: bool, detail: Option<&str>) {
    if success {
        info!(
            tenant_id = %tenant_id,
            auth_method = %auth_method,
            success = %success,
            event_type = "authentication",
            "Authentication successful"
        );
    } else {
        warn!(
            tenant_id = %tenant_id,
            auth_method = %auth_method,
            success = %success,
            detail = ?detail,
            event_type = "authentication",
            "Authentication failed"
        );
    }
}
