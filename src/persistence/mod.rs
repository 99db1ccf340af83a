//! File formats produced by headless runs
//!
//! - `match_log`: the saved-match text format (header plus one integer per line)
//! - `export`: JSON-lines stream of recorded training histories

pub mod export;
pub mod match_log;

pub use export::TrainingExporter;
pub use match_log::MatchLog;
