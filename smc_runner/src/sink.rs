use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use shared_utils::fs::{FsError, LockFile, write_atomic};
use smc_engine::{AnalysisResult, Timeframe};
use snafu::{Backtrace, ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Another run holds the lock for this symbol/timeframe.
    #[snafu(display("Analysis already in flight for {symbol} {timeframe} (lock {})", path.display()))]
    AnalysisInFlight {
        symbol: String,
        timeframe: Timeframe,
        path: PathBuf,
    },

    /// The lock file could not be created for a reason other than contention.
    #[snafu(display("Failed to take lock {}: {source}", path.display()))]
    Lock {
        path: PathBuf,
        source: FsError,
        backtrace: Backtrace,
    },

    /// The result could not be converted into the destination format.
    #[snafu(display("Failed to serialize result: {source}"))]
    Serialize {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Writing or renaming the artifact failed.
    #[snafu(display("Failed to publish {}: {source}", path.display()))]
    Publish {
        path: PathBuf,
        source: FsError,
        backtrace: Backtrace,
    },
}

pub trait ResultSink {
    /// The type returned after a successful publish.
    ///
    /// A file sink returns the path it wrote; other sinks may return whatever identifies
    /// the published artifact.
    type Output;

    /// Held for the duration of one analysis; dropping it releases the slot.
    type Guard;

    /// Claims the slot for `symbol`/`timeframe` before any work starts.
    ///
    /// Fails with [`SinkError::AnalysisInFlight`] if another run holds it.
    fn reserve(&self, symbol: &str, timeframe: Timeframe) -> Result<Self::Guard, SinkError>;

    /// Publishes `result`, replacing any previous artifact for the same key.
    fn publish(&self, result: &AnalysisResult) -> Result<Self::Output, SinkError>;
}

/// Writes `<dir>/smc_<SYMBOL>_<TF>.json`, swapping the file in with a rename.
#[derive(Debug, Clone)]
pub struct AtomicJsonSink {
    dir: PathBuf,
    stale_after: Option<Duration>,
}

impl AtomicJsonSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stale_after: None,
        }
    }

    /// Take over lock files at least `stale_after` old; `None` never does.
    pub fn with_stale_after(self, stale_after: Option<Duration>) -> Self {
        Self {
            stale_after,
            ..self
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the artifact for `symbol`/`timeframe` lives.
    pub fn target_path(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.dir.join(format!("smc_{symbol}_{timeframe}.json"))
    }

    pub fn lock_path(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        let mut name = self.target_path(symbol, timeframe).into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }
}

impl ResultSink for AtomicJsonSink {
    type Output = PathBuf;
    type Guard = LockFile;

    fn reserve(&self, symbol: &str, timeframe: Timeframe) -> Result<LockFile, SinkError> {
        let path = self.lock_path(symbol, timeframe);
        let acquired = match self.stale_after {
            Some(age) => LockFile::acquire_or_reclaim(&path, age),
            None => LockFile::acquire(&path),
        };
        match acquired {
            Ok(lock) => Ok(lock),
            Err(FsError::Locked { path }) => AnalysisInFlightSnafu {
                symbol,
                timeframe,
                path,
            }
            .fail(),
            Err(source) => Err(source).context(LockSnafu { path }),
        }
    }

    fn publish(&self, result: &AnalysisResult) -> Result<PathBuf, SinkError> {
        let path = self.target_path(&result.symbol, result.timeframe);
        let bytes = serde_json::to_vec_pretty(result).context(SerializeSnafu)?;
        write_atomic(&path, &bytes).context(PublishSnafu { path: &path })?;
        Ok(path)
    }
}
