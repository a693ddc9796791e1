use crate::client::ScenarioKind;
use crate::config::BenchmarkConfig;
use crate::recorder::Sample;
use pdatastructs::tdigest::{TDigest, K1};
use std::fmt;
use std::time::Duration;

const TDIGEST_BACKLOG_SIZE: usize = 100;

/// Aggregate statistics for one scenario.
///
/// Latency statistics cover successful operations only; a scenario with no
/// successes reports `None` rather than a misleading zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSummary {
    pub kind: ScenarioKind,
    pub count: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub mean_latency: Option<Duration>,
    pub latency_p50: Option<Duration>,
    pub latency_p95: Option<Duration>,
    pub latency_p99: Option<Duration>,
    /// Recorded operations per second of wall-clock run time.
    pub achieved_rate: f64,
    /// The worker did not honor shutdown within the grace period.
    pub stalled: bool,
}

/// Statistics for a completed run. Produced once; immutable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub scenarios: Vec<ScenarioSummary>,
    /// Wall-clock time from run start until all workers stopped or the grace
    /// period expired. Shared by every achieved-rate computation.
    pub duration: Duration,
    pub node_count: u32,
}

/// Folds drained samples into a [`RunSummary`]. Pure function of its inputs.
pub(crate) fn summarize(
    samples: &[Sample],
    elapsed: Duration,
    config: &BenchmarkConfig,
    stalled: &[ScenarioKind],
) -> RunSummary {
    let wall_clock = elapsed.as_secs_f64();

    let mut scenarios = Vec::new();
    for (kind, _) in config.enabled() {
        let mut success_count = 0u64;
        let mut error_count = 0u64;
        let mut latency_sum = Duration::ZERO;
        let mut digest = latency_digest();

        for sample in samples.iter().filter(|s| s.kind == kind) {
            if sample.is_success() {
                success_count += 1;
                latency_sum += sample.latency;
                digest.insert(sample.latency.as_secs_f64());
            } else {
                error_count += 1;
            }
        }

        let count = success_count + error_count;
        let (mean_latency, p50, p95, p99) = if success_count > 0 {
            (
                Some(latency_sum / success_count as u32),
                Some(quantile(&digest, 0.50)),
                Some(quantile(&digest, 0.95)),
                Some(quantile(&digest, 0.99)),
            )
        } else {
            (None, None, None, None)
        };

        scenarios.push(ScenarioSummary {
            kind,
            count,
            success_count,
            error_count,
            mean_latency,
            latency_p50: p50,
            latency_p95: p95,
            latency_p99: p99,
            achieved_rate: if wall_clock > 0. {
                count as f64 / wall_clock
            } else {
                0.
            },
            stalled: stalled.contains(&kind),
        });
    }

    RunSummary {
        scenarios,
        duration: elapsed,
        node_count: config.node_count,
    }
}

fn latency_digest() -> TDigest<K1> {
    TDigest::new(K1::new(10.), TDIGEST_BACKLOG_SIZE)
}

fn quantile(digest: &TDigest<K1>, q: f64) -> Duration {
    Duration::from_secs_f64(digest.quantile(q))
}

impl fmt::Display for ScenarioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ops ({} failed), {:.1} op/s",
            self.kind, self.count, self.error_count, self.achieved_rate
        )?;
        match (self.mean_latency, self.latency_p50, self.latency_p95, self.latency_p99) {
            (Some(mean), Some(p50), Some(p95), Some(p99)) => write!(
                f,
                ", latency mean {} / p50 {} / p95 {} / p99 {}",
                humantime::format_duration(mean),
                humantime::format_duration(p50),
                humantime::format_duration(p95),
                humantime::format_duration(p99),
            )?,
            _ => write!(f, ", latency n/a")?,
        }
        if self.stalled {
            write!(f, " [stalled]")?;
        }
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "benchmark over {} node(s) in {}",
            self.node_count,
            humantime::format_duration(self.duration)
        )?;
        for scenario in &self.scenarios {
            writeln!(f, "  {scenario}")?;
        }
        Ok(())
    }
}
