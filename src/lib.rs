pub mod error;
pub mod model;
pub mod report;
pub mod results;
pub mod scorecard;
pub mod store;
pub mod xlsx;

pub use error::{GolfError, Result};
pub use model::*;
pub use report::{format_report, format_shareable_report, ReportConfig};
pub use results::{compute_results, compute_results_for_game, PlayerResult, ResultsMap};
pub use store::{GameStore, MemoryStore};
