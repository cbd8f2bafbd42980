// ABOUTME: System-wide constants and configuration defaults for the platform core
// ABOUTME: Contains session, permission, and telemetry constants plus env-overridable getters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Constants Module
//!
//! Fixed platform constants and environment-overridable defaults. Values that
//! deployments tune (batch size, flush interval) expose getter functions that
//! consult the environment; structural values (session timeout, restricted
//! operations) are plain constants.

use std::env;

/// Session and namespace constants
pub mod session {
    /// Fixed session timeout: 8 hours in milliseconds
    pub const TIMEOUT_MS: u64 = 28_800_000;

    /// Schema shared read-only by every tenant
    pub const SHARED_CONTENT_SCHEMA: &str = "shared_content";

    /// Tables no tenant session may touch, regardless of tenant
    pub const RESTRICTED_TABLES: &[&str] =
        &["tenant_registry", "platform_audit", "billing_records"];

    /// Operations denied to every tenant session
    pub const RESTRICTED_OPERATIONS: &[&str] = &["cross_tenant_access", "admin_operations"];
}

/// Permission strings granted to every authenticated user
pub mod permissions {
    /// Base permission set, before the per-tenant grant is appended
    pub const BASE: &[&str] = &["read:content", "write:progress", "access:analytics"];
}

/// Telemetry buffering defaults
pub mod telemetry {
    /// Records per queue before an immediate flush is triggered
    pub const DEFAULT_BATCH_SIZE: usize = 50;

    /// Timer-driven flush period in milliseconds
    pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 30_000;

    /// Cap on re-queued records after repeated flush failures
    pub const DEFAULT_MAX_PENDING: usize = 500;

    /// Viewport widths below this are classified as mobile
    pub const MOBILE_MAX_WIDTH: u32 = 768;

    /// Viewport widths below this (and at least mobile) are tablets
    pub const TABLET_MAX_WIDTH: u32 = 1024;

    /// WCAG conformance level recorded on accessibility errors
    pub const WCAG_LEVEL: &str = "AA";
}

/// Environment-based configuration getters
pub mod env_config {
    use super::env;

    /// Telemetry batch size from environment or default
    #[must_use]
    pub fn telemetry_batch_size() -> usize {
        env::var("TELEMETRY_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(super::telemetry::DEFAULT_BATCH_SIZE)
    }

    /// Timer flush interval from environment or default
    #[must_use]
    pub fn telemetry_flush_interval_ms() -> u64 {
        env::var("TELEMETRY_FLUSH_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(super::telemetry::DEFAULT_FLUSH_INTERVAL_MS)
    }

    /// Re-queue cap from environment or default
    #[must_use]
    pub fn telemetry_max_pending() -> usize {
        env::var("TELEMETRY_MAX_PENDING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(super::telemetry::DEFAULT_MAX_PENDING)
    }

    /// Whether telemetry capture is enabled at all
    #[must_use]
    pub fn monitoring_enabled() -> bool {
        env::var("MONITORING_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or(true)
    }

    /// Municipality recorded on telemetry when no tenant context applies
    #[must_use]
    pub fn default_municipality() -> String {
        env::var("DEFAULT_MUNICIPALITY").unwrap_or_else(|_| "malmo_stad".into())
    }
}
