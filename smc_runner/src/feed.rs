//! Price feeds.
//!
//! A [`BarSource`] hands the runner an ordered list of [`FeedBar`]s, oldest first. The only
//! implementation shipped here reads a JSON array of OHLC records from disk.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use smc_engine::FeedBar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric timestamp outside chrono's representable range.
    #[error("record {index} in {}: timestamp {value} is out of range", path.display())]
    Timestamp {
        path: PathBuf,
        index: usize,
        value: i64,
    },
}

pub trait BarSource {
    /// Loads the bars, oldest first.
    fn load(&self) -> Result<Vec<FeedBar>, FeedError>;
}

/// Interval open time as found in exported bar files: RFC 3339 or Unix seconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedTime {
    Rfc3339(DateTime<Utc>),
    UnixSeconds(i64),
}

/// One record of a bar file. Extra fields such as `tick_volume` or `spread` are ignored.
#[derive(Debug, Deserialize)]
struct FeedRecord {
    time: FeedTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Reads a JSON array of `{time, open, high, low, close}` records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_bar(&self, index: usize, record: FeedRecord) -> Result<FeedBar, FeedError> {
        let time = match record.time {
            FeedTime::Rfc3339(time) => time,
            FeedTime::UnixSeconds(value) => {
                DateTime::from_timestamp(value, 0).ok_or_else(|| FeedError::Timestamp {
                    path: self.path.clone(),
                    index,
                    value,
                })?
            }
        };
        Ok(FeedBar {
            time,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        })
    }
}

impl BarSource for JsonFileSource {
    fn load(&self) -> Result<Vec<FeedBar>, FeedError> {
        let text = fs::read_to_string(&self.path).map_err(|source| FeedError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<FeedRecord> =
            serde_json::from_str(&text).map_err(|source| FeedError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let bars = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.to_bar(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(path = %self.path.display(), bars = bars.len(), "feed loaded");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::TimeZone;

    use super::*;

    fn source_with(content: &str) -> (tempfile::NamedTempFile, JsonFileSource) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let source = JsonFileSource::new(file.path());
        (file, source)
    }

    #[test]
    fn reads_rfc3339_and_unix_times() {
        let (_file, source) = source_with(
            r#"[
                {"time": "2024-03-01T10:00:00Z", "open": 1.1, "high": 1.2, "low": 1.0, "close": 1.15},
                {"time": 1709290800, "open": 1.15, "high": 1.25, "low": 1.1, "close": 1.2, "tick_volume": 42}
            ]"#,
        );
        let bars = source.load().unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].time, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(bars[1].time, Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap());
        assert_eq!(bars[1].close, 1.2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(source.load(), Err(FeedError::Read { .. })));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let (_file, source) = source_with(r#"[{"time": 0, "open": 1.0, "high": 1.0, "low": 1.0}]"#);
        assert!(matches!(source.load(), Err(FeedError::Parse { .. })));
    }

    #[test]
    fn out_of_range_timestamp_is_reported() {
        let (_file, source) = source_with(&format!(
            r#"[{{"time": {}, "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0}}]"#,
            i64::MAX
        ));
        assert!(matches!(
            source.load(),
            Err(FeedError::Timestamp { index: 0, .. })
        ));
    }
}
