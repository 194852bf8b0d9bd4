//! Core channel state for Surge.
//!
//! This crate provides the channel data model, the reconciliation engine
//! that merges node-reported batches into long-lived local state, and the
//! aggregate views derived from that state.

mod channel;
mod collection;
mod config;
mod error;

pub use channel::{BalanceLevel, Channel, ChannelRecord, ChannelStatus};
pub use collection::{ChannelCollection, ReconcileSummary};
pub use config::{BalanceThresholds, Config};
pub use error::{Error, Result};
