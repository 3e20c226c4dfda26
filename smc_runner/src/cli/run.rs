use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, bail};
use tracing::{error, info};

use super::commands::{AnalyzeArgs, Cli, Commands};
use crate::{
    config::{
        CONFIG_ENV, JobCfg, RunnerConfig, load_config_path, normalize_symbol, resolve_config_path,
    },
    feed::JsonFileSource,
    job::run_job,
    sink::AtomicJsonSink,
};

/// Dispatches a parsed command line. Published paths go to stdout, one per line.
pub fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = resolve_config_path(cli.config);
    match cli.command {
        Commands::Analyze(args) => {
            let cfg = match config_path {
                Some(path) => load_config_path(&path)?,
                None => RunnerConfig::default(),
            };
            analyze_one(cfg, args)
        }
        Commands::Batch => {
            let Some(path) = config_path else {
                bail!("batch needs a config file: pass --config or set {CONFIG_ENV}");
            };
            batch(load_config_path(&path)?)
        }
    }
}

/// Applies command-line overrides on top of the config.
pub fn apply_overrides(
    mut cfg: RunnerConfig,
    args: AnalyzeArgs,
) -> anyhow::Result<(RunnerConfig, JobCfg)> {
    if let Some(strength) = args.strength {
        cfg.analysis.strength = strength;
    }
    if let Some(lookback) = args.lookback {
        cfg.analysis.lookback = lookback;
    }
    if let Some(max_order_blocks) = args.max_order_blocks {
        cfg.analysis.max_order_blocks = max_order_blocks;
    }
    if let Some(out) = args.out {
        cfg.output.dir = out;
    }
    if args.bars == Some(0) {
        bail!("--bars must be at least 1");
    }

    let job = JobCfg {
        symbol: normalize_symbol(&args.symbol).context("--symbol")?,
        timeframe: args.timeframe,
        input: args.input,
        bars: args.bars,
    };
    Ok((cfg, job))
}

fn analyze_one(cfg: RunnerConfig, args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let (cfg, job) = apply_overrides(cfg, args)?;
    let sink = AtomicJsonSink::new(&cfg.output.dir).with_stale_after(cfg.output.stale_after());
    let path = run_job(
        &job,
        &JsonFileSource::new(&job.input),
        &sink,
        &cfg.analysis,
        &cfg.render,
    )
    .with_context(|| format!("{} {}", job.symbol, job.timeframe))?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub published: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Runs every job of `cfg`; a failing job is logged and counted, the rest still run.
pub fn run_batch(cfg: &RunnerConfig) -> BatchSummary {
    let sink = AtomicJsonSink::new(&cfg.output.dir).with_stale_after(cfg.output.stale_after());
    let mut summary = BatchSummary::default();

    for (name, job) in &cfg.jobs {
        let source = JsonFileSource::new(&job.input);
        match run_job(job, &source, &sink, &cfg.analysis, &cfg.render) {
            Ok(path) => summary.published.push(path),
            Err(err) => {
                error!(job = %name, in_flight = err.is_in_flight(), error = %err, "job failed");
                summary.failed.push(name.clone());
            }
        }
    }
    summary
}

fn batch(cfg: RunnerConfig) -> anyhow::Result<ExitCode> {
    info!(jobs = cfg.jobs.len(), dir = %cfg.output.dir.display(), "batch start");
    let summary = run_batch(&cfg);

    for path in &summary.published {
        println!("{}", path.display());
    }
    // stderr, so it does not mix with the paths on stdout
    eprintln!(
        "SUMMARY: {} succeeded, {} failed",
        summary.published.len(),
        summary.failed.len()
    );

    Ok(if summary.failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use smc_engine::Timeframe;

    use super::*;

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "smc-runner",
            "analyze",
            "--input",
            "bars.json",
            "--symbol",
            "eurusd",
            "--timeframe",
            "h4",
            "--strength",
            "3",
            "--bars",
            "300",
        ])
        .unwrap();

        assert!(cli.config.is_none());
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.timeframe, Timeframe::H4);

        let (cfg, job) = apply_overrides(RunnerConfig::default(), args).unwrap();
        assert_eq!(cfg.analysis.strength, 3);
        assert_eq!(cfg.analysis.lookback, 10);
        assert_eq!(job.symbol, "EURUSD");
        assert_eq!(job.bars, Some(300));
    }

    #[test]
    fn rejects_unknown_timeframe() {
        let parsed = Cli::try_parse_from([
            "smc-runner", "analyze", "--input", "x.json", "--symbol", "EURUSD", "--timeframe", "H7x",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn out_flag_overrides_config_dir() {
        let cli = Cli::try_parse_from([
            "smc-runner", "--config", "runner.toml", "analyze", "--input", "x.json", "--symbol",
            "EURUSD", "--timeframe", "M15", "--out", "/tmp/smc",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("runner.toml")));

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let (cfg, _) = apply_overrides(RunnerConfig::default(), args).unwrap();
        assert_eq!(cfg.output.dir, PathBuf::from("/tmp/smc"));
    }
}
