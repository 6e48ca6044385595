//! Record access for the scoring engine
//!
//! The engine only reads through [`GameStore`]. [`MemoryStore`] is the
//! in-process implementation with full create/update/delete support, and
//! [`reader`] loads or saves one as a directory of CSV tables.

pub mod memory;
pub mod reader;
pub mod tables;

pub use memory::MemoryStore;
pub use reader::{read_csv_dir, write_csv_dir};

use crate::error::Result;
use crate::model::{Game, GameId, Player, PlayerId, Score, TeamPairing};

/// Read side of the persistence layer.
///
/// Every list is an owned snapshot; nothing returned here changes while a
/// computation runs over it.
pub trait GameStore {
    fn get_game(&self, game_id: GameId) -> Result<Game>;

    fn get_player(&self, player_id: PlayerId) -> Result<Player>;

    fn list_players_for_game(&self, game_id: GameId) -> Result<Vec<Player>>;

    fn list_scores_for_game(&self, game_id: GameId) -> Result<Vec<Score>>;

    /// Zero to three pairings, one per section
    fn list_team_pairings_for_game(&self, game_id: GameId) -> Result<Vec<TeamPairing>>;
}
