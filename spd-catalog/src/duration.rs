//! Recording duration estimation
//!
//! The storage listing reports byte sizes but no media metadata, so the
//! dashboard estimates durations from an assumed constant bitrate:
//!
//! ```text
//! seconds = size_bytes * 8 / (bitrate_kbps * 1000)
//! ```
//!
//! Display-only: lookup correctness never depends on these numbers.

use crate::types::AudioAsset;

/// Assumed constant bitrate when none is configured (kbps)
pub const DEFAULT_BITRATE_KBPS: u32 = 128;

/// Estimated duration of one file in seconds.
///
/// # Examples
///
/// ```
/// use spd_catalog::duration::estimate_duration_secs;
///
/// // 1.92 MB at 128 kbps is 2 minutes
/// assert_eq!(estimate_duration_secs(1_920_000, 128), 120.0);
/// ```
pub fn estimate_duration_secs(size_bytes: u64, bitrate_kbps: u32) -> f64 {
    // A zero bitrate would divide to infinity; config validation rejects it,
    // clamp here for direct callers
    let bitrate_kbps = bitrate_kbps.max(1);
    (size_bytes as f64 * 8.0) / (bitrate_kbps as f64 * 1000.0)
}

/// Aggregate estimated duration across a space's audio assets.
///
/// `partial` is set when any asset lacks a reported size: the total then
/// covers only the sized assets and must be displayed as incomplete rather
/// than silently under-reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationTotal {
    /// Sum of estimates across assets that report a size
    pub seconds: f64,
    /// At least one asset had no size; the sum is a lower bound
    pub partial: bool,
}

/// Sum the estimated durations of several assets
pub fn estimate_total(assets: &[AudioAsset], bitrate_kbps: u32) -> DurationTotal {
    let mut seconds = 0.0;
    let mut partial = false;

    for asset in assets {
        match asset.size_bytes {
            Some(size) => seconds += estimate_duration_secs(size, bitrate_kbps),
            None => partial = true,
        }
    }

    DurationTotal { seconds, partial }
}
