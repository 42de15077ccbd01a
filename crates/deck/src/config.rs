//! Tuning knobs for deck hydration and swipe settling.

use std::time::Duration;

/// Engine pacing configuration.
///
/// The default profile matches what the discovery screen ships with.
/// Devices flagged as resource constrained (low memory, metered or
/// poor connectivity) use [`DeckConfig::resource_constrained`], which
/// trades hydration throughput for smaller bursts.
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// How many detail fetches run concurrently per hydration batch.
    pub batch_size: usize,
    /// Deadline for a single detail fetch before the one retry fires.
    pub per_item_timeout: Duration,
    /// Pause between consecutive hydration batches.
    pub inter_batch_delay: Duration,
    /// Deck extension triggers when this many unswiped cards remain.
    pub refetch_threshold: usize,
    /// How long the in-flight guard holds after a swipe settles.
    pub settle_delay: Duration,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            per_item_timeout: Duration::from_secs(15),
            inter_batch_delay: Duration::from_millis(150),
            refetch_threshold: 3,
            settle_delay: Duration::from_millis(300),
        }
    }
}

impl DeckConfig {
    /// Reduced profile for constrained devices: smaller batches, a
    /// tighter per-item deadline, and a longer pause between bursts.
    pub fn resource_constrained() -> Self {
        Self {
            batch_size: 3,
            per_item_timeout: Duration::from_secs(10),
            inter_batch_delay: Duration::from_millis(300),
            refetch_threshold: 2,
            settle_delay: Duration::from_millis(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_values() {
        let config = DeckConfig::default();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.per_item_timeout, Duration::from_secs(15));
        assert_eq!(config.inter_batch_delay, Duration::from_millis(150));
        assert_eq!(config.refetch_threshold, 3);
        assert_eq!(config.settle_delay, Duration::from_millis(300));
    }

    #[test]
    fn constrained_profile_is_gentler_than_default() {
        let default = DeckConfig::default();
        let constrained = DeckConfig::resource_constrained();

        assert!(constrained.batch_size < default.batch_size);
        assert!(constrained.per_item_timeout < default.per_item_timeout);
        assert!(constrained.inter_batch_delay > default.inter_batch_delay);
        assert!(constrained.refetch_threshold < default.refetch_threshold);
        // Settle hold is a UX constant, identical across profiles.
        assert_eq!(constrained.settle_delay, default.settle_delay);
    }
}
