use std::time::Duration;

use crate::{COOL_DOWN, COOL_DOWN_EVERY, PAGE_INTERVAL};

/// Static two-tier backoff: a short wait after every page and a long cool-down
/// after every `batch_size` pages, unless that page is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub interval: Duration,
    /// 0 disables the cool-down.
    pub batch_size: usize,
    pub cool_down: Duration,
}

/// Waits owed after a processed page, in the order they must be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pause {
    pub interval: Duration,
    pub cool_down: Option<Duration>,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            interval: PAGE_INTERVAL,
            batch_size: COOL_DOWN_EVERY,
            cool_down: COOL_DOWN,
        }
    }
}

impl RateLimitPolicy {
    /// Policy that never waits.
    pub fn immediate() -> Self {
        Self {
            interval: Duration::ZERO,
            batch_size: 0,
            cool_down: Duration::ZERO,
        }
    }

    /// `index` is the 0-based position of the page just processed out of `total`.
    pub fn pause_after(&self, index: usize, total: usize) -> Pause {
        let processed = index + 1;
        let cool_down = (self.batch_size > 0
            && processed % self.batch_size == 0
            && processed < total)
            .then_some(self.cool_down);

        Pause {
            interval: self.interval,
            cool_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(batch_size: usize) -> RateLimitPolicy {
        RateLimitPolicy {
            interval: Duration::from_millis(300),
            batch_size,
            cool_down: Duration::from_secs(60),
        }
    }

    #[test]
    fn defaults_match_anilist_limits() {
        let policy = RateLimitPolicy::default();

        assert_eq!(policy.interval, Duration::from_millis(300));
        assert_eq!(policy.batch_size, 20);
        assert_eq!(policy.cool_down, Duration::from_secs(60));
    }

    #[test]
    fn interval_follows_every_page() {
        let policy = policy(20);

        for index in 0..45 {
            assert_eq!(policy.pause_after(index, 45).interval, policy.interval);
        }
    }

    #[test]
    fn cool_down_after_every_batch() {
        let policy = policy(20);

        let cooled: Vec<_> = (0..45)
            .filter(|&i| policy.pause_after(i, 45).cool_down.is_some())
            .collect();

        assert_eq!(cooled, vec![19, 39]);
    }

    #[test]
    fn no_cool_down_after_last_page() {
        let policy = policy(20);

        assert_eq!(policy.pause_after(19, 20).cool_down, None);
        assert_eq!(policy.pause_after(39, 40).cool_down, None);
        assert_eq!(
            policy.pause_after(19, 40).cool_down,
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn zero_batch_size_disables_cool_down() {
        let policy = policy(0);

        assert!((0..100).all(|i| policy.pause_after(i, 100).cool_down.is_none()));
    }
}
