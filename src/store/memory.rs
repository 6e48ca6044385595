use super::GameStore;
use crate::error::{GolfError, Result};
use crate::model::{
    all_holes, seated_four, validate_hole, validate_pairings, Game, GameId, Partition, Player,
    PlayerId, Score, TeamPairing,
};
use std::collections::BTreeMap;

/// In-memory records for any number of games
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: BTreeMap<GameId, Game>,
    players: BTreeMap<PlayerId, Player>,
    scores: BTreeMap<(GameId, PlayerId, u8), Score>,
    pairings: BTreeMap<(GameId, u8), TeamPairing>,
    last_game_id: GameId,
    last_player_id: PlayerId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> Vec<Game> {
        self.games.values().cloned().collect()
    }

    fn game(&self, game_id: GameId) -> Result<&Game> {
        self.games.get(&game_id).ok_or(GolfError::GameNotFound(game_id))
    }

    fn game_mut(&mut self, game_id: GameId) -> Result<&mut Game> {
        self.games
            .get_mut(&game_id)
            .ok_or(GolfError::GameNotFound(game_id))
    }

    // ------------------------------------------------------------------
    // Games
    // ------------------------------------------------------------------

    /// Insert a game; id 0 means "assign the next id"
    pub fn create_game(&mut self, mut game: Game) -> Result<GameId> {
        game.validate()?;
        if game.id == 0 {
            game.id = self.last_game_id + 1;
        } else if self.games.contains_key(&game.id) {
            return Err(GolfError::DuplicateRecord(format!("game {}", game.id)));
        }
        self.last_game_id = self.last_game_id.max(game.id);
        let id = game.id;
        self.games.insert(id, game);
        Ok(id)
    }

    pub fn update_game(&mut self, game: Game) -> Result<()> {
        game.validate()?;
        let id = game.id;
        *self.game_mut(id)? = game;
        Ok(())
    }

    /// Delete a game along with its players, scores and pairings
    pub fn delete_game(&mut self, game_id: GameId) -> Result<()> {
        self.games
            .remove(&game_id)
            .ok_or(GolfError::GameNotFound(game_id))?;
        self.players.retain(|_, p| p.game_id != game_id);
        self.scores.retain(|&(g, _, _), _| g != game_id);
        self.pairings.retain(|&(g, _), _| g != game_id);
        log::info!("Deleted game {} and its records", game_id);
        Ok(())
    }

    pub fn set_current_hole(&mut self, game_id: GameId, hole: u8) -> Result<()> {
        validate_hole(hole)?;
        self.game_mut(game_id)?.current_hole = hole;
        Ok(())
    }

    pub fn complete_game(&mut self, game_id: GameId) -> Result<()> {
        self.game_mut(game_id)?.is_completed = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// Seat a new player at the next position; returns the new id
    pub fn add_player(&mut self, game_id: GameId, name: &str) -> Result<PlayerId> {
        self.game(game_id)?;
        let position = self.players.values().filter(|p| p.game_id == game_id).count() as u8 + 1;
        self.insert_player(Player::new(0, game_id, name).with_position(position))
    }

    /// Insert a fully formed player; id 0 means "assign the next id"
    pub fn insert_player(&mut self, mut player: Player) -> Result<PlayerId> {
        self.game(player.game_id)?;
        if player.id == 0 {
            player.id = self.last_player_id + 1;
        } else if self.players.contains_key(&player.id) {
            return Err(GolfError::DuplicateRecord(format!("player {}", player.id)));
        }
        self.last_player_id = self.last_player_id.max(player.id);
        let id = player.id;
        self.players.insert(id, player);
        Ok(id)
    }

    pub fn update_player(&mut self, player: Player) -> Result<()> {
        let slot = self
            .players
            .get_mut(&player.id)
            .ok_or(GolfError::PlayerNotFound(player.id))?;
        *slot = player;
        Ok(())
    }

    pub fn set_individual(&mut self, player_id: PlayerId, participates: bool) -> Result<()> {
        self.players
            .get_mut(&player_id)
            .ok_or(GolfError::PlayerNotFound(player_id))?
            .participates_in_individual = participates;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scores
    // ------------------------------------------------------------------

    /// Insert or replace the score for (game, player, hole)
    pub fn upsert_score(&mut self, score: Score) -> Result<()> {
        let game = self.game(score.game_id)?;
        score.validate(game.max_score_limit)?;
        match self.players.get(&score.player_id) {
            Some(p) if p.game_id == score.game_id => {}
            _ => return Err(GolfError::PlayerNotFound(score.player_id)),
        }
        self.scores.insert(score.key(), score);
        Ok(())
    }

    pub fn delete_score(&mut self, game_id: GameId, player_id: PlayerId, hole: u8) -> Option<Score> {
        self.scores.remove(&(game_id, player_id, hole))
    }

    /// A hole is complete once every player in the game has a score on it
    pub fn is_hole_complete(&self, game_id: GameId, hole: u8) -> Result<bool> {
        validate_hole(hole)?;
        let players = self.list_players_for_game(game_id)?;
        Ok(!players.is_empty()
            && players
                .iter()
                .all(|p| self.scores.contains_key(&(game_id, p.id, hole))))
    }

    pub fn all_holes_complete(&self, game_id: GameId) -> Result<bool> {
        for hole in all_holes() {
            if !self.is_hole_complete(game_id, hole)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Pairings
    // ------------------------------------------------------------------

    /// Insert or replace the pairing for its section, keeping the game's
    /// pairings valid as a whole
    pub fn upsert_pairing(&mut self, pairing: TeamPairing) -> Result<()> {
        self.game(pairing.game_id)?;
        let players = self.list_players_for_game(pairing.game_id)?;
        let mut pairings: Vec<TeamPairing> = self
            .list_team_pairings_for_game(pairing.game_id)?
            .into_iter()
            .filter(|p| p.section != pairing.section)
            .collect();
        pairings.push(pairing);
        validate_pairings(&pairings, &players)?;
        self.pairings.insert((pairing.game_id, pairing.section), pairing);
        Ok(())
    }

    /// Choose splits for sections 1 and 2; section 3 gets the one left over
    pub fn assign_pairings(
        &mut self,
        game_id: GameId,
        first: Partition,
        second: Partition,
    ) -> Result<[TeamPairing; 3]> {
        let third = Partition::remaining(first, second).ok_or_else(|| {
            GolfError::InvalidPairing(format!("sections 1 and 2 both use {}", first))
        })?;
        self.game(game_id)?;
        let seats = seated_four(&self.list_players_for_game(game_id)?)?;

        let pairings = [
            first.to_pairing(game_id, 1, seats),
            second.to_pairing(game_id, 2, seats),
            third.to_pairing(game_id, 3, seats),
        ];
        self.reset_pairings(game_id);
        for pairing in pairings {
            self.pairings.insert((game_id, pairing.section), pairing);
        }
        Ok(pairings)
    }

    /// Drop all pairings for a game so selection can start over
    pub fn reset_pairings(&mut self, game_id: GameId) -> usize {
        let before = self.pairings.len();
        self.pairings.retain(|&(g, _), _| g != game_id);
        before - self.pairings.len()
    }
}

impl GameStore for MemoryStore {
    fn get_game(&self, game_id: GameId) -> Result<Game> {
        self.game(game_id).cloned()
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.players
            .get(&player_id)
            .cloned()
            .ok_or(GolfError::PlayerNotFound(player_id))
    }

    fn list_players_for_game(&self, game_id: GameId) -> Result<Vec<Player>> {
        self.game(game_id)?;
        let mut players: Vec<Player> = self
            .players
            .values()
            .filter(|p| p.game_id == game_id)
            .cloned()
            .collect();
        crate::model::sort_by_seat(&mut players);
        Ok(players)
    }

    fn list_scores_for_game(&self, game_id: GameId) -> Result<Vec<Score>> {
        self.game(game_id)?;
        Ok(self
            .scores
            .range((game_id, 0, 0)..=(game_id, PlayerId::MAX, u8::MAX))
            .map(|(_, s)| *s)
            .collect())
    }

    fn list_team_pairings_for_game(&self, game_id: GameId) -> Result<Vec<TeamPairing>> {
        self.game(game_id)?;
        Ok(self
            .pairings
            .range((game_id, 0)..=(game_id, u8::MAX))
            .map(|(_, p)| *p)
            .collect())
    }
}
