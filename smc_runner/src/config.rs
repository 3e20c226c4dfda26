//! Runner configuration: parsing, normalization, and loading.
//!
//! A TOML file describes the shared analysis parameters, where results are published, the
//! optional render hints, and the jobs to run:
//!
//! ```toml
//! [analysis]
//! strength = 5
//!
//! [output]
//! dir = "out"
//! stale_lock_secs = 900
//!
//! [jobs.eurusd_h1]
//! symbol = "EURUSD"
//! timeframe = "H1"
//! input = "data/eurusd_h1.json"
//! bars = 500
//! ```
//!
//! Jobs keep file order. Normalization trims and uppercases symbols and rejects two jobs
//! that would publish to the same `(symbol, timeframe)` target.
//!
//! Entrypoints: [`load_config_str`], [`load_config_path`], [`resolve_config_path`].

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var;
use smc_engine::{AnalysisParams, RenderHints, Timeframe};

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "SMC_RUNNER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    #[serde(default)]
    pub analysis: AnalysisParams,
    #[serde(default)]
    pub output: OutputCfg,
    #[serde(default)]
    pub render: RenderHints,
    /// Job name -> job. Run order is file order.
    #[serde(default)]
    pub jobs: IndexMap<String, JobCfg>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputCfg {
    /// Directory results are published into.
    pub dir: PathBuf,
    /// Age after which a lock file left by a dead run is taken over. `0` never reclaims.
    #[serde(default = "default_stale_lock_secs")]
    pub stale_lock_secs: u64,
}

fn default_stale_lock_secs() -> u64 {
    900
}

impl OutputCfg {
    pub fn stale_after(&self) -> Option<Duration> {
        (self.stale_lock_secs > 0).then(|| Duration::from_secs(self.stale_lock_secs))
    }
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            stale_lock_secs: default_stale_lock_secs(),
        }
    }
}

/// One symbol/timeframe to analyse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JobCfg {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// JSON bar file read by [`JsonFileSource`](crate::feed::JsonFileSource).
    pub input: PathBuf,
    /// Analyse only the most recent `bars` bars of the feed.
    #[serde(default)]
    pub bars: Option<usize>,
}

/// What normalization changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Symbols that changed when trimming/uppercasing.
    pub symbols_rewritten: usize,
}

/// Trims and uppercases a symbol, rejecting empty ones.
///
/// The symbol becomes part of the published file name, so path separators and `..` are
/// rejected as well.
pub fn normalize_symbol(raw: &str) -> anyhow::Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        bail!("symbol cannot be empty after trimming");
    }
    if symbol.contains(['/', '\\', '\0']) || symbol.contains("..") {
        bail!("symbol '{symbol}' must not contain path separators or '..'");
    }
    Ok(symbol)
}

/// Normalizes `cfg` in place.
///
/// Errors:
/// - Empty symbol after trimming
/// - `bars = 0`
/// - Two jobs sharing a `(symbol, timeframe)` pair after normalization
pub fn normalize_config(cfg: &mut RunnerConfig) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();
    let mut targets = HashSet::new();

    for (name, job) in cfg.jobs.iter_mut() {
        let symbol = normalize_symbol(&job.symbol).with_context(|| format!("job '{name}'"))?;
        if symbol != job.symbol {
            report.symbols_rewritten += 1;
            job.symbol = symbol;
        }
        if job.bars == Some(0) {
            bail!("job '{name}': bars must be at least 1");
        }
        if !targets.insert((job.symbol.clone(), job.timeframe)) {
            bail!(
                "job '{name}': duplicate target {} {} after normalization",
                job.symbol,
                job.timeframe
            );
        }
    }
    Ok(report)
}

/// Parse and normalize a config from a TOML string.
///
/// Analysis parameters are validated here too so a bad `[analysis]` table fails at load
/// time instead of once per job.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<RunnerConfig> {
    let mut cfg: RunnerConfig = toml::from_str(toml_str).context("failed to parse runner TOML")?;
    cfg.analysis
        .validate()
        .context("invalid [analysis] table")?;
    let report = normalize_config(&mut cfg).context("normalize_config failed")?;
    tracing::debug!(?report, jobs = cfg.jobs.len(), "config loaded");
    Ok(cfg)
}

/// Read a config file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<RunnerConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

/// The `--config` flag if given, else [`CONFIG_ENV`] if set.
pub fn resolve_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| get_env_var(CONFIG_ENV).ok().map(PathBuf::from))
}
