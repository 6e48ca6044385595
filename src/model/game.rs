use super::player::PlayerId;
use crate::error::{GolfError, Result};
use lazy_static::lazy_static;
use regex::Regex;

pub type GameId = u32;

pub const HOLES: u8 = 18;
pub const DEFAULT_PAR: u8 = 4;
pub const MIN_PAR: u8 = 3;
pub const MAX_PAR: u8 = 5;
pub const DEFAULT_MAX_SCORE: u32 = 10;

/// Iterate hole numbers 1..=18
pub fn all_holes() -> impl Iterator<Item = u8> {
    1..=HOLES
}

pub fn validate_hole(hole: u8) -> Result<()> {
    if (1..=HOLES).contains(&hole) {
        Ok(())
    } else {
        Err(GolfError::InvalidHole(hole))
    }
}

/// A round of golf with its betting setup
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub location: String,
    pub date: String,
    /// Money per win unit
    pub bet_unit: f64,
    pub starting_hole: u8,
    /// Where play resumes
    pub current_hole: u8,
    pub is_completed: bool,
    /// Input ceiling for strokes on a hole; not used by scoring
    pub max_score_limit: u32,
}

impl Game {
    pub fn new(id: GameId, location: impl Into<String>, date: &str, bet_unit: f64) -> Self {
        Self {
            id,
            location: location.into(),
            date: normalize_date(date),
            bet_unit,
            starting_hole: 1,
            current_hole: 1,
            is_completed: false,
            max_score_limit: DEFAULT_MAX_SCORE,
        }
    }

    /// Starting hole also becomes the resume pointer
    pub fn with_starting_hole(mut self, hole: u8) -> Self {
        self.starting_hole = hole;
        self.current_hole = hole;
        self
    }

    pub fn with_max_score(mut self, limit: u32) -> Self {
        self.max_score_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_hole(self.starting_hole)?;
        validate_hole(self.current_hole)?;
        if !self.bet_unit.is_finite() || self.bet_unit < 0.0 {
            return Err(GolfError::InvalidBetUnit(self.bet_unit));
        }
        Ok(())
    }

    /// Holes in playing order, starting from the starting hole
    pub fn playing_order(&self) -> Vec<u8> {
        (0..HOLES)
            .map(|i| (self.starting_hole - 1 + i) % HOLES + 1)
            .collect()
    }
}

/// Normalize "MM/DD/YYYY" to ISO; anything else is kept as entered
pub fn normalize_date(date: &str) -> String {
    lazy_static! {
        static ref US_DATE: Regex = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap();
        static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }

    let date = date.trim();
    if ISO_DATE.is_match(date) {
        return date.to_string();
    }
    match US_DATE.captures(date) {
        Some(caps) => format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]),
        None => date.to_string(),
    }
}

/// Strokes for one player on one hole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub hole: u8,
    pub strokes: u32,
    pub par: u8,
}

impl Score {
    pub fn new(game_id: GameId, player_id: PlayerId, hole: u8, strokes: u32) -> Self {
        Self {
            game_id,
            player_id,
            hole,
            strokes,
            par: DEFAULT_PAR,
        }
    }

    pub fn with_par(mut self, par: u8) -> Self {
        self.par = par;
        self
    }

    /// Composite key (game, player, hole)
    pub fn key(&self) -> (GameId, PlayerId, u8) {
        (self.game_id, self.player_id, self.hole)
    }

    /// Entry-time checks: hole 1-18, par 3-5, strokes 1..=limit
    pub fn validate(&self, max_score_limit: u32) -> Result<()> {
        validate_hole(self.hole)?;
        if !(MIN_PAR..=MAX_PAR).contains(&self.par) {
            return Err(GolfError::InvalidPar {
                hole: self.hole,
                par: self.par,
            });
        }
        if self.strokes == 0 || self.strokes > max_score_limit {
            return Err(GolfError::InvalidScore {
                hole: self.hole,
                strokes: self.strokes,
                limit: max_score_limit,
            });
        }
        Ok(())
    }

    /// Strokes relative to par (negative is under par)
    pub fn to_par(&self) -> i32 {
        self.strokes as i32 - self.par as i32
    }
}
