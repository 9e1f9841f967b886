//! Global spacing between registry lookups

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive registry calls across all
/// workers sharing it. DNS lookups never go through here.
#[derive(Debug)]
pub struct WhoisThrottle {
    min_delay: Duration,
    last_slot: Mutex<Option<Instant>>,
}

impl WhoisThrottle {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_slot: Mutex::new(None),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait for this caller's slot. The slot is reserved under the lock and
    /// the sleep happens after the lock is released.
    pub async fn acquire(&self) {
        if self.min_delay.is_zero() {
            return;
        }

        let slot = {
            let mut last = self.last_slot.lock();
            let now = Instant::now();
            let slot = match *last {
                Some(prev) => (prev + self.min_delay).max(now),
                None => now,
            };
            *last = Some(slot);
            slot
        };

        tokio::time::sleep_until(slot).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_acquires_are_spaced() {
        let throttle = WhoisThrottle::new(Duration::from_millis(500));
        let start = Instant::now();

        throttle.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(500));

        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_get_distinct_slots() {
        let throttle = Arc::new(WhoisThrottle::new(Duration::from_millis(100)));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..5 {
            let throttle = Arc::clone(&throttle);
            handles.push(tokio::spawn(async move {
                throttle.acquire().await;
                Instant::now()
            }));
        }

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap());
        }
        times.sort();

        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
        assert!(*times.last().unwrap() - start >= Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let throttle = WhoisThrottle::new(Duration::ZERO);
        for _ in 0..100 {
            throttle.acquire().await;
        }
        assert_eq!(throttle.min_delay(), Duration::ZERO);
    }
}
