use super::memory::MemoryStore;
use super::tables::*;
use super::GameStore;
use crate::error::Result;
use crate::model::{Game, Player, Score, TeamPairing};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub const GAMES_FILE: &str = "games.csv";
pub const PLAYERS_FILE: &str = "players.csv";
pub const SCORES_FILE: &str = "scores.csv";
pub const PAIRINGS_FILE: &str = "pairings.csv";

/// Read every well-formed row of a table; malformed rows are logged and skipped
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("{} row {}: {}", path.display(), idx + 1, e),
        }
    }
    Ok(rows)
}

/// Read a table that may be absent
fn read_optional_table<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    if path.exists() {
        read_table(&path)
    } else {
        log::debug!("{} not present", path.display());
        Ok(Vec::new())
    }
}

/// Load a directory of CSV tables into a store.
///
/// `games.csv` is required; players, scores and pairings tables are optional.
/// Records go through the store's normal checks, so an invalid score or
/// pairing fails the load.
pub fn read_csv_dir(dir: &Path) -> Result<MemoryStore> {
    let mut store = MemoryStore::new();

    let games: Vec<GameRow> = read_table(&dir.join(GAMES_FILE))?;
    for row in games {
        store.create_game(Game::from(row))?;
    }

    let players: Vec<PlayerRow> = read_optional_table(dir, PLAYERS_FILE)?;
    for row in players {
        store.insert_player(Player::from(row))?;
    }

    let scores: Vec<ScoreRow> = read_optional_table(dir, SCORES_FILE)?;
    let score_count = scores.len();
    for row in scores {
        store.upsert_score(Score::from(row))?;
    }

    let pairings: Vec<PairingRow> = read_optional_table(dir, PAIRINGS_FILE)?;
    for row in pairings {
        store.upsert_pairing(TeamPairing::from(row))?;
    }

    log::info!(
        "Loaded {} games and {} scores from {}",
        store.games().len(),
        score_count,
        dir.display()
    );
    Ok(store)
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save every game in a store as a directory of CSV tables
pub fn write_csv_dir(store: &MemoryStore, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let games = store.games();
    let mut players = Vec::new();
    let mut scores = Vec::new();
    let mut pairings = Vec::new();
    for game in &games {
        players.extend(store.list_players_for_game(game.id)?.iter().map(PlayerRow::from));
        scores.extend(store.list_scores_for_game(game.id)?.iter().map(ScoreRow::from));
        pairings.extend(
            store
                .list_team_pairings_for_game(game.id)?
                .iter()
                .map(PairingRow::from),
        );
    }
    let games: Vec<GameRow> = games.iter().map(GameRow::from).collect();

    write_table(&dir.join(GAMES_FILE), &games)?;
    write_table(&dir.join(PLAYERS_FILE), &players)?;
    write_table(&dir.join(SCORES_FILE), &scores)?;
    write_table(&dir.join(PAIRINGS_FILE), &pairings)?;
    Ok(())
}
