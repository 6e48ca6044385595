pub mod writer;

pub use writer::write_game_to_xlsx;
pub use writer::write_results_to_xlsx;
