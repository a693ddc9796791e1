#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod benchmark;
pub mod client;
pub mod config;
pub mod error;
pub mod summary;

pub(crate) mod recorder;
pub(crate) mod schedule;
pub(crate) mod worker;

pub use benchmark::{Benchmark, CancelHandle};
pub use client::{ScenarioKind, TargetClient};
pub use config::BenchmarkConfig;
pub use error::{ConfigError, OperationError};
pub use summary::{RunSummary, ScenarioSummary};

pub mod prelude {
    pub use crate::benchmark::{Benchmark, CancelHandle};
    pub use crate::client::{ScenarioKind, TargetClient};
    pub use crate::config::BenchmarkConfig;
    pub use crate::error::{ConfigError, OperationError};
    pub use crate::summary::{RunSummary, ScenarioSummary};
}
