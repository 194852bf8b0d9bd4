//! Interval polling for the channel store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::ChannelStore;

/// Drive [`ChannelStore::refresh`] on a fixed interval.
///
/// The store mutex is held for the duration of each cycle, so at most
/// one reconciliation is in flight at a time. A failed fetch is logged
/// and the loop waits for the next tick; the tick cadence is the retry
/// policy. The loop exits once `shutdown` observes `true`.
pub async fn poll(
    store: Arc<Mutex<ChannelStore>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut store = store.lock().await;
                match store.refresh().await {
                    Ok(summary) => debug!(?summary, "reconcile cycle complete"),
                    Err(err) => warn!("channel refresh failed: {err}"),
                }
            }
            changed = shutdown.changed() => {
                // A dropped sender also ends the loop.
                if changed.is_err() || *shutdown.borrow() {
                    debug!("poll loop shutting down");
                    break;
                }
            }
        }
    }
}
