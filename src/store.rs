//! ==============================================================================
//! store.rs - Latest-Reading Store
//! ==============================================================================
//!
//! purpose:
//!     owns the single "latest reading" slot. the HTTP handlers only see the
//!     `ReadingStore` trait, so the in-memory slot can be swapped for a test
//!     double or a real datastore without touching handler logic.
//!
//! concurrency:
//!     one slot behind a tokio RwLock. writers hold the lock for the
//!     overwrite only; last write wins by lock-acquisition order. there is
//!     no cross-request ordering guarantee - acceptable for one sensor that
//!     tolerates overwritten updates.
//!
//! ==============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;

use crate::domain::Reading;

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// current reading, including the zeroed default before any ingestion
    async fn latest(&self) -> Reading;

    /// wholesale overwrite with a fresh hub-side timestamp; returns the
    /// value actually stored
    async fn replace(&self, fill_level: f64, distance: f64) -> Reading;
}

/// process-memory store: everything is lost on restart, by design
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Reading>,
}

impl MemoryStore {
    pub fn shared() -> Arc<dyn ReadingStore> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ReadingStore for MemoryStore {
    async fn latest(&self) -> Reading {
        self.slot.read().await.clone()
    }

    async fn replace(&self, fill_level: f64, distance: f64) -> Reading {
        // millisecond precision with a Z suffix, byte-compatible with the
        // JS Date.toISOString() format existing consumers parse
        let reading = Reading {
            fill_level,
            distance,
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        };
        *self.slot.write().await = reading.clone();
        reading
    }
}
