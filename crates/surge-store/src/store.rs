//! The fetch/reconcile driver.

use surge_core::{
    BalanceThresholds, Channel, ChannelCollection, ReconcileSummary, Result,
};
use surge_source::ChannelSource;
use tracing::info;

/// Owns the channel collection and the source that feeds it.
///
/// All mutation goes through [`ChannelStore::refresh`]. The store itself
/// is not thread-safe; share it behind an `Arc<Mutex<_>>`, which also
/// serializes reconciliation cycles.
pub struct ChannelStore {
    collection: ChannelCollection,
    source: Box<dyn ChannelSource>,
}

impl ChannelStore {
    /// Create a store over the given source with default thresholds.
    pub fn new(source: Box<dyn ChannelSource>) -> Self {
        Self::with_thresholds(source, BalanceThresholds::default())
    }

    /// Create a store with custom balance thresholds.
    pub fn with_thresholds(source: Box<dyn ChannelSource>, thresholds: BalanceThresholds) -> Self {
        Self {
            collection: ChannelCollection::with_thresholds(thresholds),
            source,
        }
    }

    /// Fetch the current channel list and merge it into local state.
    ///
    /// Source and consistency failures are returned to the caller; the
    /// collection keeps its last consistent state in either case.
    pub async fn refresh(&mut self) -> Result<ReconcileSummary> {
        info!(source = self.source.name(), "fetching channels");
        let records = self.source.list_channels().await?;
        let summary = self.collection.reconcile(records)?;
        info!(
            inserted = summary.inserted,
            updated = summary.updated,
            removed = summary.removed,
            rejected = summary.rejected,
            "updated channels"
        );
        Ok(summary)
    }

    /// Read access to the underlying collection.
    pub fn collection(&self) -> &ChannelCollection {
        &self.collection
    }

    /// Look up a channel by id.
    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.collection.get(id)
    }

    /// Sum of remote balances over all channels (satoshis).
    pub fn total_inbound(&self) -> u64 {
        self.collection.total_inbound()
    }

    /// Sum of local balances over all channels (satoshis).
    pub fn total_outbound(&self) -> u64 {
        self.collection.total_outbound()
    }

    /// Owned snapshot of the sorted channel list, for consumers that
    /// outlive the store lock.
    pub fn sorted_snapshot(&self) -> Vec<Channel> {
        self.collection
            .sorted_channels()
            .into_iter()
            .cloned()
            .collect()
    }
}
