use crate::client::{ScenarioKind, TargetClient};
use crate::config::BenchmarkConfig;
use crate::error::ConfigError;
use crate::recorder::SampleRecorder;
use crate::schedule::RateSchedule;
use crate::summary::{summarize, RunSummary};
use crate::worker::run_worker;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant};
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};

/// One benchmark run against a target client.
///
/// A `Benchmark` is single-use: [`run`](Benchmark::run) consumes it, so a
/// finished run can never be restarted with stale state. Obtain a
/// [`CancelHandle`] before calling `run` to stop the run early.
pub struct Benchmark<C> {
    config: BenchmarkConfig,
    client: Arc<C>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

/// Stops a running benchmark before its configured duration elapses.
#[derive(Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Signals the run to stop. Idempotent; later calls are no-ops.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl<C: TargetClient> Benchmark<C> {
    pub fn new(config: BenchmarkConfig, client: C) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            client: Arc::new(client),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    /// Runs the benchmark to completion and returns its summary.
    ///
    /// Fails fast with [`ConfigError`] before any worker starts; every other
    /// failure mode is captured in the summary (failed samples, stalled
    /// workers) rather than surfaced as an error.
    #[instrument(name = "benchmark", skip_all)]
    pub async fn run(self) -> Result<RunSummary, ConfigError> {
        self.config.validate()?;
        info!(
            "starting benchmark against {} node(s): {:?}",
            self.config.node_count, self.config
        );

        let recorder = Arc::new(SampleRecorder::new());
        let start = Instant::now();

        let mut workers = Vec::new();
        for (kind, rate) in self.config.enabled() {
            let schedule = RateSchedule::new(start, rate.get(), self.config.duration);
            debug!(
                "spawning {kind} worker: {} operation(s) over {}",
                schedule.len(),
                humantime::format_duration(self.config.duration),
            );
            let payload = match kind {
                ScenarioKind::Transactions => vec![0u8; self.config.payload_size],
                _ => Vec::new(),
            };
            workers.push((
                kind,
                tokio::spawn(run_worker(
                    kind,
                    schedule,
                    payload,
                    Arc::clone(&self.client),
                    Arc::clone(&recorder),
                    self.shutdown_rx.clone(),
                )),
            ));
        }
        if workers.is_empty() {
            warn!("every scenario rate is zero; the run will idle for the configured duration");
        }

        let mut cancel_rx = self.shutdown_rx.clone();
        tokio::select! {
            _ = time::sleep_until(start + self.config.duration) => {
                debug!("configured duration elapsed");
            }
            _ = cancel_rx.changed() => {
                info!("benchmark cancelled early");
            }
        }

        // Stopping: signal the workers once, then join each within the shared
        // grace-period deadline.
        let _ = self.shutdown_tx.send(true);
        let mut stalled = Vec::new();
        let deadline = Instant::now() + self.config.grace_period;
        for (kind, mut handle) in workers {
            match time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!("{kind} worker failed to join: {err}"),
                Err(_) => {
                    warn!("{kind} worker did not stop within the grace period; abandoning it");
                    handle.abort();
                    // The abort lands at the task's next await point; join it
                    // so no late record can race the drain below.
                    let _ = handle.await;
                    stalled.push(kind);
                }
            }
        }
        let elapsed = start.elapsed();
        info!(
            "benchmark stopped after {}",
            humantime::format_duration(elapsed)
        );

        let samples = recorder.drain();
        Ok(summarize(&samples, elapsed, &self.config, &stalled))
    }
}
