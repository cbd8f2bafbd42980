// ABOUTME: Game analytics aggregation over recorded Q2 mechanic attempts
// ABOUTME: Computes per-mechanic completion rates and durations, keyed by tenant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Game Analytics
//!
//! Aggregation over recorded gameplay attempts for the Q2 mechanic family.
//! The contract is intentionally small (record an attempt, read per-mechanic
//! stats, read a session summary) so a warehouse-backed implementation can
//! replace the in-memory one without touching callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// One recorded gameplay attempt
#[derive(Debug, Clone)]
struct AttemptSample {
    mechanic: String,
    duration_ms: f64,
    completed: bool,
}

/// Aggregated statistics for a single Q2 mechanic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicStats {
    /// Mechanic identifier
    pub mechanic: String,
    /// Total attempts recorded
    pub attempts: u64,
    /// Attempts that reached completion
    pub completions: u64,
    /// completions / attempts, 0.0 when no attempts
    pub completion_rate: f64,
    /// Mean attempt duration in milliseconds, 0.0 when no attempts
    pub avg_duration_ms: f64,
}

impl MechanicStats {
    fn empty(mechanic: &str) -> Self {
        Self {
            mechanic: mechanic.to_owned(),
            attempts: 0,
            completions: 0,
            completion_rate: 0.0,
            avg_duration_ms: 0.0,
        }
    }
}

/// Tenant-level summary across all recorded mechanics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Tenant the summary covers
    pub tenant_id: String,
    /// Total attempts across all mechanics
    pub total_attempts: u64,
    /// Completion rate across all mechanics
    pub completion_rate: f64,
    /// Mean attempt duration across all mechanics, milliseconds
    pub avg_duration_ms: f64,
    /// Per-mechanic breakdowns, sorted by mechanic id
    pub mechanics: Vec<MechanicStats>,
}

/// In-memory analytics aggregator, keyed by tenant
#[derive(Debug, Default)]
pub struct GameAnalytics {
    samples: RwLock<HashMap<String, Vec<AttemptSample>>>,
}

impl GameAnalytics {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one gameplay attempt for a tenant
    pub fn record_attempt(
        &self,
        tenant_id: &str,
        mechanic: &str,
        duration_ms: f64,
        completed: bool,
    ) {
        if let Ok(mut samples) = self.samples.write() {
            samples
                .entry(tenant_id.to_owned())
                .or_default()
                .push(AttemptSample {
                    mechanic: mechanic.to_owned(),
                    duration_ms,
                    completed,
                });
        }
    }

    /// Aggregate statistics for one mechanic within a tenant
    #[must_use]
    pub fn q2_mechanic_stats(&self, tenant_id: &str, mechanic: &str) -> MechanicStats {
        let samples = match self.samples.read() {
            Ok(samples) => samples,
            Err(_) => return MechanicStats::empty(mechanic),
        };
        let relevant: Vec<&AttemptSample> = samples
            .get(tenant_id)
            .map(|v| v.iter().filter(|s| s.mechanic == mechanic).collect())
            .unwrap_or_default();
        Self::aggregate(mechanic, &relevant)
    }

    /// Summary across all mechanics recorded for a tenant
    #[must_use]
    pub fn session_summary(&self, tenant_id: &str) -> SessionSummary {
        let samples = self.samples.read().ok();
        let tenant_samples: &[AttemptSample] = samples
            .as_ref()
            .and_then(|map| map.get(tenant_id))
            .map_or(&[], Vec::as_slice);

        let mut by_mechanic: HashMap<&str, Vec<&AttemptSample>> = HashMap::new();
        for sample in tenant_samples {
            by_mechanic
                .entry(sample.mechanic.as_str())
                .or_default()
                .push(sample);
        }

        let mut mechanics: Vec<MechanicStats> = by_mechanic
            .iter()
            .map(|(mechanic, group)| Self::aggregate(mechanic, group))
            .collect();
        mechanics.sort_by(|a, b| a.mechanic.cmp(&b.mechanic));

        let total_attempts = tenant_samples.len() as u64;
        let completions = tenant_samples.iter().filter(|s| s.completed).count() as u64;
        let total_duration: f64 = tenant_samples.iter().map(|s| s.duration_ms).sum();

        SessionSummary {
            tenant_id: tenant_id.to_owned(),
            total_attempts,
            completion_rate: Self::rate(completions, total_attempts),
            avg_duration_ms: Self::mean(total_duration, total_attempts),
            mechanics,
        }
    }

    fn aggregate(mechanic: &str, group: &[&AttemptSample]) -> MechanicStats {
        let attempts = group.len() as u64;
        let completions = group.iter().filter(|s| s.completed).count() as u64;
        let total_duration: f64 = group.iter().map(|s| s.duration_ms).sum();
        MechanicStats {
            mechanic: mechanic.to_owned(),
            attempts,
            completions,
            completion_rate: Self::rate(completions, attempts),
            avg_duration_ms: Self::mean(total_duration, attempts),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn rate(completions: u64, attempts: u64) -> f64 {
        if attempts == 0 {
            0.0
        } else {
            completions as f64 / attempts as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(total: f64, count: u64) -> f64 {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}
