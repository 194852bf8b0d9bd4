//! Channel record and entity types.

use serde::{Deserialize, Serialize};

use crate::config::BalanceThresholds;
use crate::{Error, Result};

/// A channel as reported by the node on one fetch cycle.
///
/// Records are immutable once produced; the reconciler consumes them to
/// create or update long-lived [`Channel`] entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Channel identifier, stable across fetches.
    pub id: String,
    /// Balance on the remote side (satoshis).
    pub remote_balance: u64,
    /// Balance on the local side (satoshis).
    pub local_balance: u64,
    /// Total channel capacity (satoshis).
    pub capacity: u64,
    /// Whether the channel is currently active.
    pub active: bool,
    /// Channel uptime as a percentage (0-100).
    pub uptime_percent: f64,
    /// Hex-encoded public key of the remote peer.
    pub remote_pubkey: String,
}

impl ChannelRecord {
    /// Check this record against the domain invariants.
    ///
    /// Returns [`Error::InvalidRecord`] naming the first violated
    /// invariant. Invariants: non-empty id, combined balances within
    /// capacity, uptime within 0-100.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(self.invalid("empty channel id"));
        }

        match self.local_balance.checked_add(self.remote_balance) {
            Some(total) if total <= self.capacity => {}
            _ => return Err(self.invalid("combined balances exceed capacity")),
        }

        if !(0.0..=100.0).contains(&self.uptime_percent) {
            return Err(self.invalid("uptime percent out of range"));
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::InvalidRecord {
            id: if self.id.is_empty() {
                "<unknown>".to_string()
            } else {
                self.id.clone()
            },
            reason: reason.to_string(),
        }
    }
}

/// Categorical health of a channel's local balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceLevel {
    /// Local balance below the low threshold.
    Bad,
    /// Local balance between the thresholds.
    Warn,
    /// Local balance at or above the high threshold.
    Good,
}

impl std::fmt::Display for BalanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceLevel::Bad => write!(f, "bad"),
            BalanceLevel::Warn => write!(f, "warn"),
            BalanceLevel::Good => write!(f, "good"),
        }
    }
}

/// Channel status as presented to consumers.
///
/// Inactive channels report [`ChannelStatus::Inactive`] regardless of
/// their balance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// The channel is not currently active.
    Inactive,
    /// Active with a bad balance level.
    Bad,
    /// Active with a warn balance level.
    Warn,
    /// Active with a good balance level.
    Good,
}

/// Long-lived local representation of a channel.
///
/// Created when an unseen id is reconciled, mutated in place on every
/// re-sight so references held by consumers stay stable, and removed when
/// the id vanishes from a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel identifier.
    pub id: String,
    /// Balance on the remote side (satoshis).
    pub remote_balance: u64,
    /// Balance on the local side (satoshis).
    pub local_balance: u64,
    /// Total channel capacity (satoshis).
    pub capacity: u64,
    /// Whether the channel is currently active.
    pub active: bool,
    /// Channel uptime as a percentage (0-100).
    pub uptime_percent: f64,
    /// Hex-encoded public key of the remote peer.
    pub remote_pubkey: String,
    /// Local balance as a fraction of capacity (0.0-1.0).
    pub balance_percent: f64,
    /// Categorical level derived from `balance_percent`.
    pub balance_level: BalanceLevel,
}

impl Channel {
    /// Build a new channel from a validated record.
    pub fn from_record(record: ChannelRecord, thresholds: BalanceThresholds) -> Self {
        let balance_percent = balance_percent(record.local_balance, record.capacity);
        Self {
            id: record.id,
            remote_balance: record.remote_balance,
            local_balance: record.local_balance,
            capacity: record.capacity,
            active: record.active,
            uptime_percent: record.uptime_percent,
            remote_pubkey: record.remote_pubkey,
            balance_percent,
            balance_level: thresholds.level_for(balance_percent),
        }
    }

    /// Overwrite this channel's fields from a newer record.
    ///
    /// The derived `balance_percent` and `balance_level` are recomputed.
    /// The record must carry the same id as this channel.
    pub fn apply(&mut self, record: ChannelRecord, thresholds: BalanceThresholds) {
        debug_assert_eq!(self.id, record.id);
        self.remote_balance = record.remote_balance;
        self.local_balance = record.local_balance;
        self.capacity = record.capacity;
        self.active = record.active;
        self.uptime_percent = record.uptime_percent;
        self.remote_pubkey = record.remote_pubkey;
        self.balance_percent = balance_percent(self.local_balance, self.capacity);
        self.balance_level = thresholds.level_for(self.balance_percent);
    }

    /// Status combining activity and balance level.
    pub fn status(&self) -> ChannelStatus {
        if !self.active {
            return ChannelStatus::Inactive;
        }
        match self.balance_level {
            BalanceLevel::Bad => ChannelStatus::Bad,
            BalanceLevel::Warn => ChannelStatus::Warn,
            BalanceLevel::Good => ChannelStatus::Good,
        }
    }
}

/// Local balance as a fraction of capacity. Zero capacity maps to 0.0.
#[allow(clippy::cast_precision_loss)]
fn balance_percent(local_balance: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        local_balance as f64 / capacity as f64
    }
}
