use smc_engine::AnalysisError;
use thiserror::Error;

use crate::{feed::FeedError, sink::SinkError};

/// Why a single job failed.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl RunnerError {
    /// `true` when another run already holds the target for this symbol/timeframe.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RunnerError::Sink(SinkError::AnalysisInFlight { .. }))
    }
}
