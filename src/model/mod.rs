pub mod game;
pub mod pairing;
pub mod player;
pub mod scoring;
pub mod section;

pub use game::{all_holes, normalize_date, validate_hole, Game, GameId, Score, DEFAULT_PAR, HOLES};
pub use pairing::{seated_four, validate_pairings, Partition, Side, TeamPairing};
pub use player::{sort_by_seat, Player, PlayerId};
pub use scoring::{evaluate_individual_hole, evaluate_team_hole, ContestTally, HoleResult, Outcome, TeamScore};
pub use section::{holes_in_section, section_for, SECTIONS};
