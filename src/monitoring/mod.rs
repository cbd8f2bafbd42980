// ABOUTME: Telemetry module organizing error/metric capture and batch delivery
// ABOUTME: Centralizes the ambient context source, session store trait, and buffered flushing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Telemetry Monitoring Module
//!
//! Fire-and-forget error and metric capture for client and server code.
//! Captures are synchronous appends onto in-memory queues; a background
//! timer, or either queue reaching its batch size, flushes accumulated
//! records to the remote collector. Failed flushes re-queue their batch
//! (bounded) rather than dropping it silently, and capture callers never
//! see delivery errors.

/// Buffered capture queues and batch flushing
pub mod buffer;
/// Ambient context snapshots and the session store collaborator
pub mod context;

pub use buffer::TelemetryBuffer;
pub use context::{ContextSource, InMemorySessionStore, SessionStore};
