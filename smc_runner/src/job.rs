//! One analysis job: reserve → load → analyze → publish.

use chrono::Utc;
use smc_engine::{AnalysisParams, BarSeries, RenderHints, analyze};
use tracing::{info, instrument};

use crate::{config::JobCfg, errors::RunnerError, feed::BarSource, sink::ResultSink};

/// Runs `job` against `source` and publishes through `sink`.
///
/// The sink slot is claimed before the feed is read and held until the function returns,
/// so a concurrent run for the same key fails fast instead of racing. Nothing is published
/// unless the analysis succeeds.
#[instrument(skip_all, fields(symbol = %job.symbol, timeframe = %job.timeframe))]
pub fn run_job<S, K>(
    job: &JobCfg,
    source: &S,
    sink: &K,
    params: &AnalysisParams,
    hints: &RenderHints,
) -> Result<K::Output, RunnerError>
where
    S: BarSource,
    K: ResultSink,
{
    let _guard = sink.reserve(&job.symbol, job.timeframe)?;

    let feed = source.load()?;
    let mut series = BarSeries::from_feed(job.symbol.clone(), job.timeframe, feed);
    if let Some(count) = job.bars {
        series = series.latest(count);
    }

    let result = analyze(&series, params, hints.clone(), Utc::now())?;
    let output = sink.publish(&result)?;
    info!(
        swings = result.swings.len(),
        bos = result.bos.len(),
        choch = result.choch.len(),
        order_blocks = result.order_blocks.len(),
        "published"
    );
    Ok(output)
}
