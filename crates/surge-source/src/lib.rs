//! Channel sources for Surge.
//!
//! Implementations of the input boundary: anything that can produce the
//! current batch of channel records for the reconciler.

mod lnd;
mod source;

pub use lnd::{FileSource, parse_list_channels};
pub use source::{ChannelSource, StaticSource};
