use crate::client::ScenarioKind;
use crate::error::ConfigError;
use std::num::NonZeroU32;
use std::time::Duration;

/// Bounded extra wait for workers to observe shutdown before being abandoned.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Configuration for a single benchmark run. Immutable once the run starts.
///
/// A rate of `0` disables that scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkConfig {
    pub duration: Duration,
    pub transaction_rate: u32,
    pub block_production_rate: u32,
    pub consensus_rate: u32,
    pub node_count: u32,
    pub payload_size: usize,
    pub grace_period: Duration,
}

impl BenchmarkConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            transaction_rate: 0,
            block_production_rate: 0,
            consensus_rate: 0,
            node_count: 1,
            payload_size: 0,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Target transaction submissions per second.
    pub fn transactions(mut self, rate: u32) -> Self {
        self.transaction_rate = rate;
        self
    }

    /// Target block-production waits per second.
    pub fn block_production(mut self, rate: u32) -> Self {
        self.block_production_rate = rate;
        self
    }

    /// Target consensus-round waits per second.
    pub fn consensus(mut self, rate: u32) -> Self {
        self.consensus_rate = rate;
        self
    }

    pub fn node_count(mut self, node_count: u32) -> Self {
        self.node_count = node_count;
        self
    }

    /// Transaction payload size in bytes.
    pub fn payload_size(mut self, payload_size: usize) -> Self {
        self.payload_size = payload_size;
        self
    }

    pub fn grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.node_count == 0 {
            return Err(ConfigError::ZeroNodeCount);
        }
        Ok(())
    }

    pub(crate) fn rate(&self, kind: ScenarioKind) -> u32 {
        match kind {
            ScenarioKind::Transactions => self.transaction_rate,
            ScenarioKind::BlockProduction => self.block_production_rate,
            ScenarioKind::Consensus => self.consensus_rate,
        }
    }

    /// Scenarios with a non-zero target rate, in declaration order.
    pub(crate) fn enabled(&self) -> impl Iterator<Item = (ScenarioKind, NonZeroU32)> + '_ {
        ScenarioKind::ALL
            .iter()
            .filter_map(|kind| NonZeroU32::new(self.rate(*kind)).map(|rate| (*kind, rate)))
    }
}
