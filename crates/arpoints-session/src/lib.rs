#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Distance announcement formatting.
pub mod announce;

/// Thread-safe last-distance cache.
pub mod cache;

/// Tracking frame snapshot types.
pub mod frame;

/// Frame log recording and replay.
pub mod replay;

/// Session tracking status.
pub mod status;

/// Per-frame nearest-point tracking cycle.
pub mod tracker;
