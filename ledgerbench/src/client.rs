use crate::error::OperationError;
use std::fmt;
use std::future::Future;

/// The three operation kinds the harness drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScenarioKind {
    Transactions,
    BlockProduction,
    Consensus,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Transactions,
        ScenarioKind::BlockProduction,
        ScenarioKind::Consensus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Transactions => "transactions",
            ScenarioKind::BlockProduction => "block_production",
            ScenarioKind::Consensus => "consensus",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ScenarioKind::Transactions => 0,
            ScenarioKind::BlockProduction => 1,
            ScenarioKind::Consensus => 2,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface to the system under test.
///
/// Implementations decide how operations reach real nodes (RPC, an in-process
/// simulation, ...). The harness measures whatever latency the implementation
/// exhibits; a returned error is recorded as a failed sample and never
/// retried, so implementations should not mask failures themselves.
pub trait TargetClient: Send + Sync + 'static {
    /// Submit one transaction carrying the configured payload.
    fn submit_transaction(
        &self,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), OperationError>> + Send;

    /// Wait for the network to produce one block.
    fn await_block_production(&self) -> impl Future<Output = Result<(), OperationError>> + Send;

    /// Wait for one consensus round to complete.
    fn await_consensus_round(&self) -> impl Future<Output = Result<(), OperationError>> + Send;
}
