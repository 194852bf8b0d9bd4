//! Channel collection and reconciliation.

use std::collections::{HashMap, HashSet};

use crate::channel::{Channel, ChannelRecord};
use crate::config::BalanceThresholds;
use crate::{Error, Result};

/// Counts describing the effect of one reconciliation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Channels created for previously-unseen ids.
    pub inserted: usize,
    /// Existing channels updated in place.
    pub updated: usize,
    /// Channels removed because their id left the batch.
    pub removed: usize,
    /// Records rejected by validation.
    pub rejected: usize,
}

/// The set of locally-known channels, keyed by channel id.
///
/// After every reconciliation the key set equals exactly the ids accepted
/// from the latest batch. Map iteration order carries no meaning; ordered
/// consumers use [`ChannelCollection::sorted_channels`].
#[derive(Debug, Clone, Default)]
pub struct ChannelCollection {
    channels: HashMap<String, Channel>,
    thresholds: BalanceThresholds,
}

impl ChannelCollection {
    /// Create an empty collection with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with custom balance thresholds.
    pub fn with_thresholds(thresholds: BalanceThresholds) -> Self {
        Self {
            channels: HashMap::new(),
            thresholds,
        }
    }

    /// Merge a freshly fetched batch into the collection.
    ///
    /// Existing channels are mutated field-by-field rather than replaced,
    /// so references held by consumers stay stable across cycles. Unseen
    /// ids are inserted, ids absent from the batch are removed, and
    /// records that fail validation are skipped and counted in the
    /// summary without touching the collection.
    ///
    /// A duplicate id within one batch is fatal for the cycle: the error
    /// is returned before any mutation and the collection keeps its
    /// previous state. Reconciling the same batch twice is a no-op for
    /// the resulting state.
    pub fn reconcile(
        &mut self,
        records: impl IntoIterator<Item = ChannelRecord>,
    ) -> Result<ReconcileSummary> {
        let records: Vec<ChannelRecord> = records.into_iter().collect();

        // A batch with duplicate ids is ambiguous; refuse it whole.
        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateChannel(record.id.clone()));
            }
        }

        let mut summary = ReconcileSummary::default();
        let mut accepted: HashSet<String> = HashSet::with_capacity(records.len());

        for record in records {
            if let Err(err) = record.validate() {
                tracing::warn!("rejecting channel record: {err}");
                summary.rejected += 1;
                continue;
            }

            accepted.insert(record.id.clone());
            if let Some(existing) = self.channels.get_mut(&record.id) {
                existing.apply(record, self.thresholds);
                summary.updated += 1;
            } else {
                let channel = Channel::from_record(record, self.thresholds);
                self.channels.insert(channel.id.clone(), channel);
                summary.inserted += 1;
            }
        }

        // Drop channels the node no longer reports.
        let stale: Vec<String> = self
            .channels
            .keys()
            .filter(|id| !accepted.contains(*id))
            .cloned()
            .collect();
        for id in stale {
            self.channels.remove(&id);
            summary.removed += 1;
        }

        Ok(summary)
    }

    /// Channels sorted by balance percent descending, id ascending on ties.
    ///
    /// A fresh snapshot is computed on every call.
    pub fn sorted_channels(&self) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> = self.channels.values().collect();
        channels.sort_by(|a, b| {
            b.balance_percent
                .total_cmp(&a.balance_percent)
                .then_with(|| a.id.cmp(&b.id))
        });
        channels
    }

    /// Sum of remote balances over all channels (satoshis).
    pub fn total_inbound(&self) -> u64 {
        self.channels.values().map(|c| c.remote_balance).sum()
    }

    /// Sum of local balances over all channels (satoshis).
    pub fn total_outbound(&self) -> u64 {
        self.channels.values().map(|c| c.local_balance).sum()
    }

    /// Look up a channel by id.
    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.channels.get(id)
    }

    /// Number of channels currently held.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over the channels in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }
}
