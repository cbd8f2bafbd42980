// ABOUTME: In-memory telemetry buffer with threshold and timer-driven batch flushing
// ABOUTME: Captures error/metric records, posts batches to the collector, re-queues on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

use super::context::ContextSource;
use crate::config::environment::MonitoringConfig;
use crate::constants::telemetry;
use crate::errors::{TelemetryError, TelemetryResult};
use crate::models::{ErrorCategory, ErrorRecord, MetricRecord, Severity};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Payload shape posted to the collector endpoint
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct TelemetryBatch {
    errors: Vec<ErrorRecord>,
    metrics: Vec<MetricRecord>,
}

impl TelemetryBatch {
    fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.metrics.is_empty()
    }

    fn len(&self) -> usize {
        self.errors.len() + self.metrics.len()
    }
}

struct BufferInner {
    enabled: bool,
    endpoint: Option<String>,
    batch_size: usize,
    max_pending: usize,
    errors: Mutex<Vec<ErrorRecord>>,
    metrics: Mutex<Vec<MetricRecord>>,
    // Guards timer/manual flushes against overlapping: a flush attempt while
    // one is in progress returns without draining.
    flushing: AtomicBool,
    client: reqwest::Client,
    context: ContextSource,
}

/// Buffered telemetry capture with batched delivery.
///
/// Captures are synchronous and fire-and-forget: they attach an ambient
/// context snapshot, append to an in-memory queue, and return. When a queue
/// reaches the batch size it is drained on the spot and the batch is handed
/// to a background send; a repeating timer flushes whatever accumulated in
/// between. Delivery failures re-queue the batch, bounded by `max_pending`
/// with oldest records dropped first.
///
/// When monitoring is disabled in configuration every capture is a no-op.
#[derive(Clone)]
pub struct TelemetryBuffer {
    inner: Arc<BufferInner>,
    shutdown_tx: Option<Arc<tokio::sync::mpsc::Sender<()>>>,
}

impl TelemetryBuffer {
    /// Create a buffer and, when enabled with a non-zero interval, spawn the
    /// timer flush task. Must be called within a tokio runtime when the
    /// timer is active.
    #[must_use]
    pub fn new(config: &MonitoringConfig, context: ContextSource) -> Self {
        let inner = Arc::new(BufferInner {
            enabled: config.enabled,
            endpoint: config.endpoint.clone(),
            batch_size: config.batch_size.max(1),
            max_pending: config.max_pending.max(1),
            errors: Mutex::new(Vec::new()),
            metrics: Mutex::new(Vec::new()),
            flushing: AtomicBool::new(false),
            client: reqwest::Client::new(),
            context,
        });

        let shutdown_tx = if config.enabled && config.flush_interval_ms > 0 {
            let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
            let inner_clone = inner.clone();
            let period = Duration::from_millis(config.flush_interval_ms);

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.tick().await; // first tick completes immediately
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            inner_clone.flush_once().await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("Telemetry flush task received shutdown signal");
                            inner_clone.flush_once().await;
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self { inner, shutdown_tx }
    }

    /// Capture an error record. No-op when monitoring is disabled. Partial
    /// records are stored as-is; capture never fails.
    ///
    /// Reaching the batch size drains the queue on the spot and spawns
    /// delivery onto the current tokio runtime; outside a runtime the
    /// drained batch is re-queued for the next explicit flush.
    pub fn capture_error(&self, mut record: ErrorRecord) {
        if !self.inner.enabled {
            return;
        }
        record.context = Some(self.inner.context.snapshot());

        // Critical failures are logged immediately, ahead of any batch flush
        if record.severity == Severity::Critical {
            error!(
                category = ?record.category,
                message = %record.message,
                event_type = "critical_error",
                "Critical error captured"
            );
        }

        let drained = {
            let mut queue = match self.inner.errors.lock() {
                Ok(queue) => queue,
                Err(poisoned) => poisoned.into_inner(),
            };
            queue.push(record);
            if queue.len() >= self.inner.batch_size {
                Some(std::mem::take(&mut *queue))
            } else {
                None
            }
        };
        if let Some(errors) = drained {
            self.spawn_delivery(TelemetryBatch {
                errors,
                metrics: Vec::new(),
            });
        }
    }

    /// Capture a metric sample. No-op when monitoring is disabled. Batch
    /// delivery behaves as for [`Self::capture_error`].
    pub fn capture_metric(&self, mut record: MetricRecord) {
        if !self.inner.enabled {
            return;
        }
        record.context = Some(self.inner.context.snapshot());

        let drained = {
            let mut queue = match self.inner.metrics.lock() {
                Ok(queue) => queue,
                Err(poisoned) => poisoned.into_inner(),
            };
            queue.push(record);
            if queue.len() >= self.inner.batch_size {
                Some(std::mem::take(&mut *queue))
            } else {
                None
            }
        };
        if let Some(metrics) = drained {
            self.spawn_delivery(TelemetryBatch {
                errors: Vec::new(),
                metrics,
            });
        }
    }

    /// Capture an error raised by game content
    pub fn capture_game_error(
        &self,
        message: impl Into<String>,
        game_id: Option<&str>,
        severity: Option<Severity>,
    ) {
        let mut record = ErrorRecord::new(
            message,
            ErrorCategory::GameContent,
            severity.unwrap_or_default(),
        );
        if let Some(game_id) = game_id {
            record = record.with_metadata("gameId", serde_json::Value::String(game_id.into()));
        }
        self.capture_error(record);
    }

    /// Capture an accessibility violation, tagged with the platform's WCAG
    /// conformance level
    pub fn capture_accessibility_error(
        &self,
        message: impl Into<String>,
        component: Option<&str>,
        severity: Option<Severity>,
    ) {
        let mut record = ErrorRecord::new(
            message,
            ErrorCategory::Accessibility,
            severity.unwrap_or_default(),
        )
        .with_metadata(
            "wcagLevel",
            serde_json::Value::String(telemetry::WCAG_LEVEL.into()),
        );
        if let Some(component) = component {
            record = record.with_metadata("component", serde_json::Value::String(component.into()));
        }
        self.capture_error(record);
    }

    /// Capture a timed operation. Always records a metric; additionally
    /// records an error when the duration exceeds its threshold, escalating
    /// to high severity past twice the threshold.
    pub fn capture_performance_issue(&self, operation: &str, duration_ms: f64, threshold_ms: f64) {
        let metric = MetricRecord::new(operation, duration_ms, "ms")
            .with_metadata("thresholdMs", serde_json::json!(threshold_ms));
        self.capture_metric(metric);

        if duration_ms > threshold_ms {
            let severity = if duration_ms > threshold_ms * 2.0 {
                Severity::High
            } else {
                Severity::Medium
            };
            let record = ErrorRecord::new(
                format!(
                    "Performance threshold exceeded for {operation}: {duration_ms}ms > {threshold_ms}ms"
                ),
                ErrorCategory::Performance,
                severity,
            )
            .with_metadata("durationMs", serde_json::json!(duration_ms))
            .with_metadata("thresholdMs", serde_json::json!(threshold_ms));
            self.capture_error(record);
        }
    }

    /// Flush both queues now, awaiting delivery
    pub async fn flush(&self) {
        self.inner.flush_once().await;
    }

    /// Stop the timer flush task and flush whatever is still queued.
    /// Returns once the queues are drained.
    pub async fn shutdown(&self) {
        if let Some(tx) = &self.shutdown_tx {
            let _ = tx.send(()).await;
        }
        // The timer task also flushes on shutdown, but it races the signal;
        // flushing here guarantees the queues are empty on return
        self.inner.flush_once().await;
    }

    /// Error records currently queued
    #[must_use]
    pub fn pending_errors(&self) -> usize {
        self.inner.errors.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Metric records currently queued
    #[must_use]
    pub fn pending_metrics(&self) -> usize {
        self.inner.metrics.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Clone of the queued error records, for diagnostics and tests
    #[must_use]
    pub fn queued_errors(&self) -> Vec<ErrorRecord> {
        self.inner
            .errors
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    /// Clone of the queued metric records, for diagnostics and tests
    #[must_use]
    pub fn queued_metrics(&self) -> Vec<MetricRecord> {
        self.inner
            .metrics
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn spawn_delivery(&self, batch: TelemetryBatch) {
        // Threshold-drained batches are already off the queues; no endpoint
        // means nothing can deliver them, so drop instead of spawning
        if self.inner.endpoint.is_none() {
            debug!(
                records = batch.len(),
                "No telemetry endpoint configured; dropping drained batch"
            );
            return;
        }
        let inner = self.inner.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    inner.deliver(batch).await;
                });
            }
            Err(_) => {
                // No runtime to deliver on; keep the batch for a later flush
                warn!(
                    records = batch.len(),
                    "Threshold flush reached outside an async runtime; re-queueing batch"
                );
                inner.requeue(batch);
            }
        }
    }
}

impl BufferInner {
    /// Timer/manual flush: drain both queues and deliver. Skipped when a
    /// flush is already in progress.
    async fn flush_once(&self) {
        if self.flushing.swap(true, Ordering::SeqCst) {
            return;
        }
        let batch = self.drain();
        if !batch.is_empty() {
            self.deliver(batch).await;
        }
        self.flushing.store(false, Ordering::SeqCst);
    }

    fn drain(&self) -> TelemetryBatch {
        let errors = match self.errors.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let metrics = match self.metrics.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        TelemetryBatch { errors, metrics }
    }

    /// Deliver a batch, re-queueing it on failure. Never propagates errors
    /// to capture callers.
    async fn deliver(&self, batch: TelemetryBatch) {
        match self.send(&batch).await {
            Ok(()) => {
                debug!(records = batch.len(), "Telemetry batch delivered");
            }
            Err(err) => {
                warn!(
                    records = batch.len(),
                    error = %err,
                    "Telemetry flush failed; re-queueing batch"
                );
                self.requeue(batch);
            }
        }
    }

    async fn send(&self, batch: &TelemetryBatch) -> TelemetryResult<()> {
        let Some(endpoint) = &self.endpoint else {
            debug!(
                records = batch.len(),
                "No telemetry endpoint configured; dropping batch"
            );
            return Ok(());
        };
        let response = self.client.post(endpoint).json(batch).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::EndpointStatus(status.as_u16()));
        }
        Ok(())
    }

    /// Put a failed batch back at the front of the queues, dropping the
    /// oldest records past the pending cap.
    fn requeue(&self, batch: TelemetryBatch) {
        let TelemetryBatch { errors, metrics } = batch;
        Self::requeue_into(&self.errors, errors, self.max_pending);
        Self::requeue_into(&self.metrics, metrics, self.max_pending);
    }

    fn requeue_into<T>(queue: &Mutex<Vec<T>>, mut failed: Vec<T>, max_pending: usize) {
        if failed.is_empty() {
            return;
        }
        let mut guard = match queue.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Failed records predate anything captured since the drain
        failed.append(&mut guard);
        *guard = failed;
        if guard.len() > max_pending {
            let overflow = guard.len() - max_pending;
            guard.drain(0..overflow);
            warn!(dropped = overflow, "Pending telemetry cap reached; dropped oldest records");
        }
    }
}
