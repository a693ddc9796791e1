use crate::client::ScenarioKind;
use metrics_util::AtomicBucket;
use std::time::Duration;

/// One recorded operation outcome. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sample {
    pub kind: ScenarioKind,
    /// Offset from the run start at which the operation began.
    pub offset: Duration,
    pub latency: Duration,
    pub error: Option<String>,
}

impl Sample {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Concurrent append-only sink for worker samples.
///
/// Workers push from their hot loops without locking; `drain` is only called
/// once every worker has stopped, so it observes every prior `record`. Each
/// scenario has a single writer, and `drain` returns its samples in record
/// order.
pub(crate) struct SampleRecorder {
    buckets: [AtomicBucket<Sample>; 3],
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self {
            buckets: [
                AtomicBucket::new(),
                AtomicBucket::new(),
                AtomicBucket::new(),
            ],
        }
    }

    pub fn record(&self, sample: Sample) {
        self.buckets[sample.kind.index()].push(sample);
    }

    /// Returns and clears all recorded samples, in record order per scenario.
    pub fn drain(&self) -> Vec<Sample> {
        let mut samples = Vec::new();
        for bucket in &self.buckets {
            let start = samples.len();
            bucket.clear_with(|block| samples.extend_from_slice(block));
            // The bucket hands back blocks newest-first; restore the
            // scenario's record order.
            samples[start..].sort_by_key(|s| s.offset);
        }
        samples
    }
}
