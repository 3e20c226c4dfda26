//! Host side of the market-structure engine.
//!
//! Loads bar windows from a price feed, runs [`smc_engine::analyze`] once per configured
//! job and publishes each result as `smc_<SYMBOL>_<TF>.json` for the chart renderer to pick up.

pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod job;
pub mod sink;
