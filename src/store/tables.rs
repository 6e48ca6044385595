use crate::model::{Game, Player, Score, TeamPairing, DEFAULT_PAR};
use serde::{Deserialize, Serialize};

/// A row of games.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRow {
    pub id: u32,
    pub location: String,
    pub date: String,
    pub bet_unit: f64,
    pub starting_hole: u8,
    pub current_hole: Option<u8>,
    #[serde(default)]
    pub is_completed: bool,
    pub max_score_limit: Option<u32>,
}

/// A row of players.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: u32,
    pub game_id: u32,
    pub name: String,
    pub position: u8,
    pub participates_in_individual: bool,
}

/// A row of scores.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRow {
    pub game_id: u32,
    pub player_id: u32,
    pub hole: u8,
    pub score: u32,
    pub par: Option<u8>,
}

/// A row of pairings.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingRow {
    pub game_id: u32,
    pub section: u8,
    pub team1_player1_id: u32,
    pub team1_player2_id: u32,
    pub team2_player1_id: u32,
    pub team2_player2_id: u32,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        let mut game = Game::new(row.id, row.location, &row.date, row.bet_unit)
            .with_starting_hole(row.starting_hole);
        if let Some(current) = row.current_hole {
            game.current_hole = current;
        }
        if let Some(limit) = row.max_score_limit {
            game.max_score_limit = limit;
        }
        game.is_completed = row.is_completed;
        game
    }
}

impl From<&Game> for GameRow {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            location: game.location.clone(),
            date: game.date.clone(),
            bet_unit: game.bet_unit,
            starting_hole: game.starting_hole,
            current_hole: Some(game.current_hole),
            is_completed: game.is_completed,
            max_score_limit: Some(game.max_score_limit),
        }
    }
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player::new(row.id, row.game_id, row.name)
            .with_position(row.position)
            .with_individual(row.participates_in_individual)
    }
}

impl From<&Player> for PlayerRow {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            game_id: player.game_id,
            name: player.name.clone(),
            position: player.position,
            participates_in_individual: player.participates_in_individual,
        }
    }
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Score::new(row.game_id, row.player_id, row.hole, row.score)
            .with_par(row.par.unwrap_or(DEFAULT_PAR))
    }
}

impl From<&Score> for ScoreRow {
    fn from(score: &Score) -> Self {
        Self {
            game_id: score.game_id,
            player_id: score.player_id,
            hole: score.hole,
            score: score.strokes,
            par: Some(score.par),
        }
    }
}

impl From<PairingRow> for TeamPairing {
    fn from(row: PairingRow) -> Self {
        TeamPairing::new(
            row.game_id,
            row.section,
            [row.team1_player1_id, row.team1_player2_id],
            [row.team2_player1_id, row.team2_player2_id],
        )
    }
}

impl From<&TeamPairing> for PairingRow {
    fn from(p: &TeamPairing) -> Self {
        Self {
            game_id: p.game_id,
            section: p.section,
            team1_player1_id: p.team1_player1_id,
            team1_player2_id: p.team1_player2_id,
            team2_player1_id: p.team2_player1_id,
            team2_player2_id: p.team2_player2_id,
        }
    }
}
