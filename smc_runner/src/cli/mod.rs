pub mod commands;
pub mod run;

pub use commands::{AnalyzeArgs, Cli, Commands};
pub use run::execute;
