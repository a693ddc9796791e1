use std::time::Duration;
use tokio::time::Instant;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Absolute-time emission schedule for a fixed-rate worker.
///
/// Fire times are computed as `start + i / rate`, anchored to `start` rather
/// than to the previous event, so one slow operation never pushes the rest of
/// the schedule later. A rate of `0` yields an empty schedule.
#[derive(Debug, Clone)]
pub(crate) struct RateSchedule {
    start: Instant,
    rate: u32,
    total: u64,
    next: u64,
}

impl RateSchedule {
    pub fn new(start: Instant, rate: u32, duration: Duration) -> Self {
        // Integer arithmetic keeps floor(rate * duration) exact; going
        // through f64 seconds misrounds the count near integer boundaries.
        let total = (duration.as_nanos() * rate as u128 / NANOS_PER_SEC) as u64;
        Self {
            start,
            rate,
            total,
            next: 0,
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn len(&self) -> u64 {
        self.total
    }

    #[allow(unused)]
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for RateSchedule {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        if self.next >= self.total {
            return None;
        }
        let offset = Duration::from_secs_f64(self.next as f64 / self.rate as f64);
        self.next += 1;
        Some(self.start + offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}
