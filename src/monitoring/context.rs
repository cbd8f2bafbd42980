// ABOUTME: Ambient context assembly for telemetry captures
// ABOUTME: Reads session state from a pluggable store and classifies device type by viewport width
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

use crate::constants::telemetry;
use crate::models::{DeviceType, MonitoringContext};
use chrono::Utc;
use serde::Deserialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Ambient key-value session store collaborator.
///
/// Mirrors the browser session-storage contract: string keys, string values,
/// no error channel. Server deployments back this with their session layer;
/// tests use [`InMemorySessionStore`].
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when absent
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value
    fn set(&self, key: &str, value: &str);
}

/// In-memory session store for tests and single-process deployments
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<std::collections::HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .map(|map| map.get(key).cloned())
            .unwrap_or(None)
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(key.to_owned(), value.to_owned());
        }
    }
}

/// Game state shape stored by the client under `currentGameState`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGameState {
    game_id: Option<String>,
    scene_id: Option<String>,
}

/// Assembles [`MonitoringContext`] snapshots from ambient state.
///
/// Session and user identifiers come from the session store; when no session
/// id exists one is generated and written back so subsequent captures
/// correlate. Invalid JSON in the stored game state is treated as absent
/// state, never an error.
pub struct ContextSource {
    store: Arc<dyn SessionStore>,
    municipality: String,
    environment: String,
    viewport_width: AtomicU32,
}

impl ContextSource {
    /// Session id key in the ambient store
    pub const SESSION_ID_KEY: &'static str = "sessionId";
    /// User id key in the ambient store
    pub const USER_ID_KEY: &'static str = "userId";
    /// Game state key in the ambient store, JSON-encoded
    pub const GAME_STATE_KEY: &'static str = "currentGameState";

    /// Create a context source over a session store
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        municipality: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            store,
            municipality: municipality.into(),
            environment: environment.into(),
            // Desktop-width default until the client reports a viewport
            viewport_width: AtomicU32::new(1280),
        }
    }

    /// Record the client viewport width used for device classification
    pub fn set_viewport_width(&self, width: u32) {
        self.viewport_width.store(width, Ordering::Relaxed);
    }

    /// Classify a viewport width into a device type
    #[must_use]
    pub fn classify_device(width: u32) -> DeviceType {
        if width < telemetry::MOBILE_MAX_WIDTH {
            DeviceType::Mobile
        } else if width < telemetry::TABLET_MAX_WIDTH {
            DeviceType::Tablet
        } else {
            DeviceType::Desktop
        }
    }

    /// Assemble a context snapshot from current ambient state
    #[must_use]
    pub fn snapshot(&self) -> MonitoringContext {
        let session_id = self.store.get(Self::SESSION_ID_KEY).unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            self.store.set(Self::SESSION_ID_KEY, &generated);
            generated
        });

        let game_state: Option<StoredGameState> = self
            .store
            .get(Self::GAME_STATE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        MonitoringContext {
            session_id,
            user_id: self.store.get(Self::USER_ID_KEY),
            game_id: game_state.as_ref().and_then(|s| s.game_id.clone()),
            scene_id: game_state.as_ref().and_then(|s| s.scene_id.clone()),
            municipality: self.municipality.clone(),
            device_type: Self::classify_device(self.viewport_width.load(Ordering::Relaxed)),
            environment: self.environment.clone(),
            timestamp: Utc::now(),
        }
    }
}
