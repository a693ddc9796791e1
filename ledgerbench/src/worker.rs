use crate::client::{ScenarioKind, TargetClient};
use crate::recorder::{Sample, SampleRecorder};
use crate::schedule::RateSchedule;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Drives one scenario until its schedule is exhausted or shutdown fires.
///
/// Each scheduled slot waits for its absolute fire time, invokes the target
/// client once, and records the outcome. Shutdown aborts a pacing wait
/// immediately; an in-flight operation is allowed to complete and be recorded.
pub(crate) async fn run_worker<C: TargetClient>(
    kind: ScenarioKind,
    schedule: RateSchedule,
    payload: Vec<u8>,
    client: Arc<C>,
    recorder: Arc<SampleRecorder>,
    mut shutdown: watch::Receiver<bool>,
) {
    let start = schedule.start();
    let mut sent = 0u64;

    for target in schedule {
        if *shutdown.borrow() {
            break;
        }
        tokio::select! {
            _ = time::sleep_until(target) => {}
            _ = shutdown.changed() => break,
        }

        let begin = Instant::now();
        let result = match kind {
            ScenarioKind::Transactions => client.submit_transaction(&payload).await,
            ScenarioKind::BlockProduction => client.await_block_production().await,
            ScenarioKind::Consensus => client.await_consensus_round().await,
        };
        let latency = begin.elapsed();

        #[cfg(feature = "metrics")]
        {
            metrics::histogram!("ledgerbench.latency", "scenario" => kind.as_str())
                .record(latency.as_nanos() as f64);
            if result.is_ok() {
                metrics::counter!("ledgerbench.success", "scenario" => kind.as_str()).increment(1);
            } else {
                metrics::counter!("ledgerbench.error", "scenario" => kind.as_str()).increment(1);
            }
        }
        if let Err(err) = &result {
            trace!("{kind} operation failed: {err}");
        }

        recorder.record(Sample {
            kind,
            offset: begin.duration_since(start),
            latency,
            error: result.err().map(|err| err.to_string()),
        });
        sent += 1;
    }

    debug!("{kind} worker exiting after {sent} operation(s)");
}
