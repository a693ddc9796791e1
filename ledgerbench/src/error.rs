use thiserror::Error;

/// Invalid configuration, rejected before any worker starts.
///
/// This is the only error that ever escapes [`Benchmark::run`](crate::Benchmark::run).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("benchmark duration must be greater than zero")]
    ZeroDuration,

    #[error("node count must be greater than zero")]
    ZeroNodeCount,
}

/// A single failed target-client operation.
///
/// Captured as a failed sample and counted against the scenario's error rate;
/// never retried and never aborts a worker or the run.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for OperationError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for OperationError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
