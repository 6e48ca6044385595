use thiserror::Error;

#[derive(Error, Debug)]
pub enum GolfError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid hole number: {0} (expected 1-18)")]
    InvalidHole(u8),

    #[error("Invalid par {par} on hole {hole} (expected 3-5)")]
    InvalidPar { hole: u8, par: u8 },

    #[error("Invalid score {strokes} on hole {hole} (expected 1-{limit})")]
    InvalidScore { hole: u8, strokes: u32, limit: u32 },

    #[error("Invalid bet unit: {0}")]
    InvalidBetUnit(f64),

    #[error("Invalid team pairing: {0}")]
    InvalidPairing(String),

    #[error("Player {0} not found")]
    PlayerNotFound(u32),

    #[error("Game {0} not found")]
    GameNotFound(u32),

    #[error("Duplicate record: {0}")]
    DuplicateRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, GolfError>;
