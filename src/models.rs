// ABOUTME: Core data models for sessions, authenticated users, and telemetry records
// ABOUTME: Serde-serializable structures shared across the SSO, tenant, and monitoring modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Data Models
//!
//! Shared data structures for the platform core.
//!
//! ## Design Principles
//!
//! - **Tenant scoped**: every identifier that crosses a module boundary
//!   carries its tenant prefix
//! - **Serializable**: all models serialize to camelCase JSON for the client
//!   and the telemetry collector
//! - **Defensive telemetry**: error/metric records accept partial input;
//!   capture must never fail on a malformed record

use crate::culture::{CulturalPreferences, CulturalTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Profile shape returned by SSO validator collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoProfile {
    /// Subject identifier from the provider (SAML NameID / OAuth subject)
    pub name_id: String,
    /// Email address asserted by the provider
    pub email: String,
    /// Human-readable display name
    pub display_name: String,
}

/// User record produced by a successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Composite identifier: `{tenant_id}:{name_id}`
    pub id: String,
    /// Email asserted by the provider
    pub email: String,
    /// Display name asserted by the provider
    pub display_name: String,
    /// Owning tenant
    pub tenant_id: String,
    /// Cultural context resolved from the tenant identifier
    pub cultural_context: CulturalTag,
    /// Ordered permission strings
    pub permissions: Vec<String>,
    /// Namespace the session store keys this user under
    pub session_namespace: String,
}

/// A resource/actions permission grant within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    /// Resource the grant applies to
    pub resource: String,
    /// Allowed actions on the resource
    pub actions: Vec<String>,
}

impl PermissionGrant {
    /// Create a grant from a resource and action list
    #[must_use]
    pub fn new(resource: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            resource: resource.into(),
            actions: actions.iter().map(|&a| a.into()).collect(),
        }
    }
}

/// Data-access scope attached to a tenant session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAccessScope {
    /// Schemas the session may read
    pub allowed_schemas: Vec<String>,
    /// Tables denied regardless of tenant
    pub restricted_tables: Vec<String>,
    /// Operations denied regardless of tenant
    pub restricted_operations: Vec<String>,
    /// Row-level-security predicate handed to the data layer. Constructed,
    /// not enforced, here: it must reference exactly the owning tenant.
    pub row_level_security: String,
}

/// Session descriptor produced by the tenant isolation manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    /// Namespace string: `tenant:{tenant_id}:user:{user_id}`
    pub namespace: String,
    /// Fixed session timeout in milliseconds
    pub session_timeout_ms: u64,
    /// Resolved cultural preferences for the tenant
    pub cultural_preferences: CulturalPreferences,
    /// Permission grants for this session
    pub permissions: Vec<PermissionGrant>,
    /// Data-access scoping for the session
    pub data_access: DataAccessScope,
}

/// Severity attached to captured error records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic or informational
    Low,
    /// Default severity for captured errors
    #[default]
    Medium,
    /// Degraded experience, needs attention
    High,
    /// Logged immediately, ahead of batch flush
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Category a captured error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// Errors raised by game content or mechanics
    GameContent,
    /// WCAG/accessibility violations
    Accessibility,
    /// Operations exceeding their duration threshold
    Performance,
    /// SSO and session failures
    Authentication,
    /// Transport-level failures
    Network,
    /// Category could not be determined from the capture site
    #[default]
    Unknown,
}

/// Device class derived from viewport width at capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Width below the mobile breakpoint
    Mobile,
    /// Width between the mobile and tablet breakpoints
    Tablet,
    /// Width at or above the tablet breakpoint
    Desktop,
}

/// Ambient context snapshot attached to every captured record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringContext {
    /// Session identifier, generated when the ambient store has none
    pub session_id: String,
    /// User identifier from the ambient store, when present
    pub user_id: Option<String>,
    /// Active game identifier, when a game state is present
    pub game_id: Option<String>,
    /// Active scene within the game, when present
    pub scene_id: Option<String>,
    /// Municipality the deployment serves
    pub municipality: String,
    /// Device class at capture time
    pub device_type: DeviceType,
    /// Deployment environment label
    pub environment: String,
    /// Capture timestamp
    pub timestamp: DateTime<Utc>,
}

/// A captured error. All fields beyond the message are optional or
/// defaulted; a partially-filled record is stored as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Error message; empty when the capture site supplied none
    #[serde(default)]
    pub message: String,
    /// Error category
    #[serde(default)]
    pub category: ErrorCategory,
    /// Severity
    #[serde(default)]
    pub severity: Severity,
    /// Free-form metadata from the capture site
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Ambient context, attached by the buffer at capture time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<MonitoringContext>,
}

impl ErrorRecord {
    /// Create a record with message, category, and severity
    #[must_use]
    pub fn new(message: impl Into<String>, category: ErrorCategory, severity: Severity) -> Self {
        Self {
            message: message.into(),
            category,
            severity,
            metadata: HashMap::new(),
            context: None,
        }
    }

    /// Attach a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A captured metric sample
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Metric name, typically the operation measured
    pub name: String,
    /// Sample value
    pub value: f64,
    /// Unit label, e.g. "ms"
    pub unit: String,
    /// Free-form metadata from the capture site
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Ambient context, attached by the buffer at capture time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<MonitoringContext>,
}

impl MetricRecord {
    /// Create a metric sample
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            metadata: HashMap::new(),
            context: None,
        }
    }

    /// Attach a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
