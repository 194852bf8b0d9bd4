//! LND channel list parsing and the file-backed source.

use std::path::PathBuf;

use async_trait::async_trait;
use surge_core::{ChannelRecord, Error, Result};

use crate::source::ChannelSource;

/// Parse the JSON document produced by `lncli listchannels`.
///
/// LND encodes satoshi amounts as decimal strings and reports `uptime`
/// and `lifetime` in seconds; the pair is reduced to a percentage here.
pub fn parse_list_channels(json: &str) -> Result<Vec<ChannelRecord>> {
    let doc: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::Source(format!("failed to parse channel list: {e}")))?;

    let channels = doc["channels"]
        .as_array()
        .ok_or_else(|| Error::Source("no channels array in response".to_string()))?;

    channels.iter().map(parse_channel).collect()
}

fn parse_channel(ch: &serde_json::Value) -> Result<ChannelRecord> {
    Ok(ChannelRecord {
        id: str_field(ch, "chan_id")?,
        remote_balance: sat_field(ch, "remote_balance")?,
        local_balance: sat_field(ch, "local_balance")?,
        capacity: sat_field(ch, "capacity")?,
        active: ch["active"].as_bool().unwrap_or(false),
        uptime_percent: uptime_percent(ch),
        remote_pubkey: str_field(ch, "remote_pubkey")?,
    })
}

fn str_field(ch: &serde_json::Value, name: &str) -> Result<String> {
    ch[name]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| Error::Source(format!("missing or invalid {name}")))
}

/// Satoshi amounts come over the wire as decimal strings, but some
/// builds emit plain numbers.
fn sat_field(ch: &serde_json::Value, name: &str) -> Result<u64> {
    ch[name]
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| ch[name].as_u64())
        .ok_or_else(|| Error::Source(format!("missing or invalid {name}")))
}

/// Uptime over lifetime, in percent. A zero lifetime means the channel
/// has not been monitored yet and maps to 0.
#[allow(clippy::cast_precision_loss)]
fn uptime_percent(ch: &serde_json::Value) -> f64 {
    let seconds = |name: &str| {
        ch[name]
            .as_str()
            .and_then(|s| s.parse::<u64>().ok())
            .or_else(|| ch[name].as_u64())
            .unwrap_or(0)
    };

    let uptime = seconds("uptime");
    let lifetime = seconds("lifetime");
    if lifetime == 0 {
        0.0
    } else {
        (uptime.min(lifetime) as f64 / lifetime as f64) * 100.0
    }
}

/// Reads an `lncli listchannels` JSON dump from disk on every fetch.
///
/// Useful for regtest workflows where the channel list is exported
/// periodically, and for driving the CLI without a live node.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ChannelSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn list_channels(&self) -> Result<Vec<ChannelRecord>> {
        tracing::debug!(path = %self.path.display(), "reading channel list");
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_list_channels(&content)
    }
}
