//! The channel source trait and in-memory source.

use std::collections::VecDeque;

use async_trait::async_trait;
use surge_core::{ChannelRecord, Error, Result};
use tokio::sync::Mutex;

/// A collaborator that can produce the node's current channel list.
///
/// Transport, authentication and retry policy live behind this trait; the
/// store only consumes the materialized batch.
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &str;

    /// Fetch the current channel list.
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>>;
}

/// A source that serves pre-built batches from memory.
///
/// Each fetch returns the next queued batch; once a single batch remains
/// it is served repeatedly. Useful for tests and demos.
pub struct StaticSource {
    batches: Mutex<VecDeque<Vec<ChannelRecord>>>,
}

impl StaticSource {
    /// Create a source over a sequence of batches.
    pub fn new(batches: Vec<Vec<ChannelRecord>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
        }
    }

    /// Create a source that always serves the same batch.
    pub fn single(batch: Vec<ChannelRecord>) -> Self {
        Self::new(vec![batch])
    }
}

#[async_trait]
impl ChannelSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_channels(&self) -> Result<Vec<ChannelRecord>> {
        let mut batches = self.batches.lock().await;
        if batches.len() > 1 {
            Ok(batches.pop_front().unwrap_or_default())
        } else {
            batches
                .front()
                .cloned()
                .ok_or_else(|| Error::Source("static source has no batches".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            remote_balance: 70,
            local_balance: 30,
            capacity: 100,
            active: true,
            uptime_percent: 100.0,
            remote_pubkey: "02".repeat(33),
        }
    }

    #[tokio::test]
    async fn static_source_advances_then_repeats() {
        let source = StaticSource::new(vec![vec![record("a")], vec![record("b")]]);

        assert_eq!(source.list_channels().await.unwrap()[0].id, "a");
        assert_eq!(source.list_channels().await.unwrap()[0].id, "b");
        assert_eq!(source.list_channels().await.unwrap()[0].id, "b");
    }

    #[tokio::test]
    async fn empty_static_source_errors() {
        let source = StaticSource::new(vec![]);
        assert!(source.list_channels().await.is_err());
    }
}
