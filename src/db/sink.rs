//! Signal sink interface and the in-process implementation.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{Signal, SignalRecord};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("signal store connection failed: {0}")]
    Connection(String),
    #[error("failed to store signal: {0}")]
    Write(String),
}

/// Durable destination for finalized signals.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn store_signal(&self, signal: &Signal) -> Result<(), SinkError>;
}

/// Keeps records in memory. Used for dry runs without a database.
#[derive(Default)]
pub struct MemorySignalSink {
    records: RwLock<Vec<SignalRecord>>,
}

impl MemorySignalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SignalRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SignalSink for MemorySignalSink {
    async fn store_signal(&self, signal: &Signal) -> Result<(), SinkError> {
        let record = signal.to_record();
        info!(
            symbol = %record.symbol,
            direction = %record.direction,
            score = record.score,
            "Recorded signal in memory store"
        );
        self.records.write().await.push(record);
        Ok(())
    }
}
