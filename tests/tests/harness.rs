#[allow(unused)]
use utils::*;

use ledgerbench::prelude::*;
use ledgerbench::OperationError;
use rand_distr::{Distribution, SkewNormal};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn steady_rates_hit_target_throughput() {
    init();

    let config = BenchmarkConfig::new(Duration::from_secs(2))
        .transactions(10)
        .block_production(5)
        .consensus(2)
        .node_count(4)
        .payload_size(256);

    let client = FixedLatencyClient::ok(Duration::from_millis(5));
    let summary = Benchmark::new(config, client).run().await.unwrap();

    assert_eq!(summary.node_count, 4);
    assert!(summary.duration >= Duration::from_secs(2));
    assert!(summary.duration <= Duration::from_millis(2_500));

    let expected = [
        (ScenarioKind::Transactions, 20u64, 10.),
        (ScenarioKind::BlockProduction, 10, 5.),
        (ScenarioKind::Consensus, 4, 2.),
    ];
    assert_eq!(summary.scenarios.len(), 3);
    for ((kind, count, rate), scenario) in expected.iter().zip(&summary.scenarios) {
        assert_eq!(scenario.kind, *kind);
        assert!(
            scenario.count >= count - 1 && scenario.count <= count + 1,
            "{kind}: count was {}",
            scenario.count
        );
        assert_eq!(scenario.success_count, scenario.count);
        assert_eq!(scenario.error_count, 0);
        assert!(!scenario.stalled);

        let mean = scenario.mean_latency.unwrap();
        assert!(mean >= Duration::from_micros(4_900) && mean <= Duration::from_micros(5_500));
        assert!((scenario.achieved_rate - rate).abs() < 0.6);
    }
}

#[tokio::test(start_paused = true)]
async fn failing_target_is_measured_not_masked() {
    init();

    let config = BenchmarkConfig::new(Duration::from_secs(1)).transactions(20);
    let client = FixedLatencyClient::failing(Duration::from_millis(2));
    let summary = Benchmark::new(config, client).run().await.unwrap();

    let tx = &summary.scenarios[0];
    assert!(tx.count >= 19 && tx.count <= 21);
    assert_eq!(tx.success_count, 0);
    assert_eq!(tx.error_count, tx.count);
    assert_eq!(tx.mean_latency, None);
    assert_eq!(tx.latency_p50, None);
    assert_eq!(tx.latency_p95, None);
    assert_eq!(tx.latency_p99, None);
}

#[tokio::test(start_paused = true)]
async fn cancellation_returns_a_partial_summary() {
    init();

    let config = BenchmarkConfig::new(Duration::from_secs(10)).transactions(10);
    let benchmark = Benchmark::new(config, FixedLatencyClient::ok(Duration::from_millis(1)));
    let cancel = benchmark.cancel_handle();

    let run = tokio::spawn(benchmark.run());
    tokio::time::sleep(Duration::from_secs(1)).await;
    cancel.cancel();

    let summary = run.await.unwrap().unwrap();
    assert!(summary.duration >= Duration::from_millis(900));
    assert!(summary.duration <= Duration::from_secs(2));

    let tx = &summary.scenarios[0];
    assert!(tx.count >= 9 && tx.count <= 11, "count was {}", tx.count);
    assert_eq!(tx.error_count, 0);
}

#[tokio::test(start_paused = true)]
async fn stalled_worker_is_abandoned_and_flagged() {
    init();

    let config = BenchmarkConfig::new(Duration::from_secs(2))
        .consensus(1)
        .grace_period(Duration::from_secs(1));
    let summary = Benchmark::new(config, StallingClient).run().await.unwrap();

    // Duration elapses at 2s, the grace period expires at 3s.
    assert!(summary.duration >= Duration::from_millis(2_900));
    assert!(summary.duration <= Duration::from_millis(3_500));

    let consensus = &summary.scenarios[0];
    assert_eq!(consensus.kind, ScenarioKind::Consensus);
    assert!(consensus.stalled);
    assert_eq!(consensus.count, 0);
    assert_eq!(consensus.mean_latency, None);
}

#[tokio::test]
async fn zero_duration_is_rejected_up_front() {
    init();

    let config = BenchmarkConfig::new(Duration::ZERO).transactions(1_000);
    let result = Benchmark::new(config, FixedLatencyClient::ok(Duration::ZERO))
        .run()
        .await;
    assert_eq!(result.unwrap_err(), ConfigError::ZeroDuration);
}

/// Target client with skew-normal latency jitter.
#[derive(Clone)]
struct JitteredClient {
    mean: Duration,
    std: Duration,
}

impl JitteredClient {
    async fn operate(&self) -> Result<(), OperationError> {
        let normal = SkewNormal::new(self.mean.as_secs_f64(), self.std.as_secs_f64(), 20.)
            .map_err(|err| OperationError::new(err.to_string()))?;
        let delay: f64 = normal.sample(&mut rand::thread_rng()).max(0.);
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
        Ok(())
    }
}

impl TargetClient for JitteredClient {
    async fn submit_transaction(&self, _payload: &[u8]) -> Result<(), OperationError> {
        self.operate().await
    }

    async fn await_block_production(&self) -> Result<(), OperationError> {
        self.operate().await
    }

    async fn await_consensus_round(&self) -> Result<(), OperationError> {
        self.operate().await
    }
}

#[tokio::test(start_paused = true)]
async fn jittered_latency_still_paces_to_the_target_rate() {
    init();

    let config = BenchmarkConfig::new(Duration::from_secs(1)).transactions(50);
    let client = JitteredClient {
        mean: Duration::from_millis(10),
        std: Duration::from_millis(2),
    };
    let summary = Benchmark::new(config, client).run().await.unwrap();

    let tx = &summary.scenarios[0];
    assert!(tx.count >= 49 && tx.count <= 51, "count was {}", tx.count);
    assert_eq!(tx.success_count, tx.count);

    let mean = tx.mean_latency.unwrap();
    assert!(mean >= Duration::from_millis(5) && mean <= Duration::from_millis(25));
    assert!((tx.achieved_rate - 50.).abs() < 2.);
}

#[test]
#[ntest::timeout(100)]
fn summary_display_is_log_friendly() {
    let summary = RunSummary {
        scenarios: vec![
            ScenarioSummary {
                kind: ScenarioKind::Transactions,
                count: 20,
                success_count: 18,
                error_count: 2,
                mean_latency: Some(Duration::from_millis(5)),
                latency_p50: Some(Duration::from_millis(5)),
                latency_p95: Some(Duration::from_millis(7)),
                latency_p99: Some(Duration::from_millis(9)),
                achieved_rate: 10.,
                stalled: false,
            },
            ScenarioSummary {
                kind: ScenarioKind::Consensus,
                count: 0,
                success_count: 0,
                error_count: 0,
                mean_latency: None,
                latency_p50: None,
                latency_p95: None,
                latency_p99: None,
                achieved_rate: 0.,
                stalled: true,
            },
        ],
        duration: Duration::from_secs(2),
        node_count: 4,
    };

    let rendered = summary.to_string();
    assert!(rendered.contains("transactions: 20 ops (2 failed)"));
    assert!(rendered.contains("consensus: 0 ops (0 failed)"));
    assert!(rendered.contains("latency n/a"));
    assert!(rendered.contains("[stalled]"));
}
