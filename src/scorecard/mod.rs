//! Scorecard files: one game per file as `[Tag "value"]` lines

pub mod reader;
pub mod writer;

pub use reader::{read_scorecard, read_scorecard_file};
pub use writer::{write_scorecard, write_scorecard_file};

use crate::error::Result;
use crate::model::{Game, GameId, Player, Score, TeamPairing};
use crate::store::{GameStore, MemoryStore};

/// Everything recorded for one game
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub game: Game,
    pub players: Vec<Player>,
    pub scores: Vec<Score>,
    pub pairings: Vec<TeamPairing>,
}

impl Scorecard {
    /// Load into a store, applying the store's entry checks
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();
        store.create_game(self.game)?;
        for player in self.players {
            store.insert_player(player)?;
        }
        for score in self.scores {
            store.upsert_score(score)?;
        }
        for pairing in self.pairings {
            store.upsert_pairing(pairing)?;
        }
        Ok(store)
    }

    pub fn from_store<S: GameStore + ?Sized>(store: &S, game_id: GameId) -> Result<Self> {
        Ok(Self {
            game: store.get_game(game_id)?,
            players: store.list_players_for_game(game_id)?,
            scores: store.list_scores_for_game(game_id)?,
            pairings: store.list_team_pairings_for_game(game_id)?,
        })
    }
}
