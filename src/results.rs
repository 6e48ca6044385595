//! Per-player settlement across all 18 holes
//!
//! Runs the individual and team games over every hole of a game snapshot and
//! sums each player's record. Pure: the same snapshot always gives the same
//! results, and holes with missing data simply contribute nothing.

use crate::error::{GolfError, Result};
use crate::model::{
    all_holes, evaluate_individual_hole, evaluate_team_hole, section_for, sort_by_seat,
    ContestTally, Game, GameId, Player, PlayerId, Score, TeamPairing,
};
use crate::store::GameStore;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Final figures for one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerResult {
    pub player: Player,
    /// Sum of strokes over the holes the player has scored
    pub total_score: u32,
    pub individual: ContestTally,
    pub team: ContestTally,
    pub combined_winnings: f64,
}

impl PlayerResult {
    fn new(player: Player) -> Self {
        Self {
            player,
            total_score: 0,
            individual: ContestTally::default(),
            team: ContestTally::default(),
            combined_winnings: 0.0,
        }
    }
}

pub type ResultsMap = BTreeMap<PlayerId, PlayerResult>;

/// Compute every player's results from a snapshot of one game.
///
/// A score or pairing that names a player missing from `players` is a data
/// integrity failure and aborts the computation.
pub fn compute_results(
    game: &Game,
    players: &[Player],
    scores: &[Score],
    pairings: &[TeamPairing],
) -> Result<ResultsMap> {
    let known: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    let opted_in: HashSet<PlayerId> = players
        .iter()
        .filter(|p| p.participates_in_individual)
        .map(|p| p.id)
        .collect();

    // Strokes keyed by hole, then player; a later row for the same key wins
    let mut by_hole: BTreeMap<u8, BTreeMap<PlayerId, u32>> = BTreeMap::new();
    for score in scores.iter().filter(|s| s.game_id == game.id) {
        if !known.contains(&score.player_id) {
            return Err(GolfError::PlayerNotFound(score.player_id));
        }
        by_hole
            .entry(score.hole)
            .or_default()
            .insert(score.player_id, score.strokes);
    }

    let mut by_section: HashMap<u8, &TeamPairing> = HashMap::new();
    for pairing in pairings.iter().filter(|p| p.game_id == game.id) {
        if let Some(stranger) = pairing.players().into_iter().find(|id| !known.contains(id)) {
            return Err(GolfError::PlayerNotFound(stranger));
        }
        by_section.insert(pairing.section, pairing);
    }

    let mut results: ResultsMap = players
        .iter()
        .map(|p| (p.id, PlayerResult::new(p.clone())))
        .collect();

    for hole in all_holes() {
        let hole_scores: Vec<(PlayerId, u32)> = by_hole
            .get(&hole)
            .map(|m| m.iter().map(|(&id, &s)| (id, s)).collect())
            .unwrap_or_default();
        if hole_scores.is_empty() {
            log::debug!("Game {} hole {}: no scores", game.id, hole);
            continue;
        }

        for &(id, strokes) in &hole_scores {
            if let Some(result) = results.get_mut(&id) {
                result.total_score += strokes;
            }
        }

        let individual_scores: Vec<(PlayerId, u32)> = hole_scores
            .iter()
            .copied()
            .filter(|(id, _)| opted_in.contains(id))
            .collect();
        for hole_result in evaluate_individual_hole(&individual_scores, game.bet_unit) {
            if let Some(result) = results.get_mut(&hole_result.player_id) {
                result.individual.record(&hole_result);
            }
        }

        let section = section_for(hole, game.starting_hole);
        match by_section.get(&section) {
            Some(pairing) => {
                let team_results = evaluate_team_hole(pairing, &hole_scores, game.bet_unit);
                if team_results.is_empty() {
                    log::debug!("Game {} hole {}: team game incomplete", game.id, hole);
                }
                for hole_result in team_results {
                    if let Some(result) = results.get_mut(&hole_result.player_id) {
                        result.team.record(&hole_result);
                    }
                }
            }
            None => log::debug!(
                "Game {} hole {}: no pairing for section {}",
                game.id,
                hole,
                section
            ),
        }
    }

    for result in results.values_mut() {
        result.combined_winnings = result.individual.winnings + result.team.winnings;
    }

    Ok(results)
}

/// Load a game's snapshot from the store and compute its results
pub fn compute_results_for_game<S: GameStore + ?Sized>(store: &S, game_id: GameId) -> Result<ResultsMap> {
    let game = store.get_game(game_id)?;
    let mut players = store.list_players_for_game(game_id)?;
    let scores = store.list_scores_for_game(game_id)?;
    let pairings = store.list_team_pairings_for_game(game_id)?;

    // Anyone referenced but not listed must still resolve to a Player record
    let mut listed: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    let referenced = scores
        .iter()
        .map(|s| s.player_id)
        .chain(pairings.iter().flat_map(|p| p.players()));
    for id in referenced {
        if listed.insert(id) {
            players.push(store.get_player(id)?);
        }
    }
    sort_by_seat(&mut players);

    compute_results(&game, &players, &scores, &pairings)
}

/// Players ordered by descending combined winnings; ties keep seat order
pub fn standings(results: &ResultsMap) -> Vec<&PlayerResult> {
    let mut ordered: Vec<&PlayerResult> = results.values().collect();
    ordered.sort_by(|a, b| {
        a.player
            .position
            .cmp(&b.player.position)
            .then(a.player.id.cmp(&b.player.id))
    });
    ordered.sort_by(|a, b| b.combined_winnings.total_cmp(&a.combined_winnings));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Partition;
    use crate::store::MemoryStore;

    fn players() -> Vec<Player> {
        ["Ann", "Bob", "Cat", "Dan"]
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as u32 + 1, 1, *name).with_position(i as u8 + 1))
            .collect()
    }

    fn all_pairings() -> Vec<TeamPairing> {
        Partition::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| p.to_pairing(1, i as u8 + 1, [1, 2, 3, 4]))
            .collect()
    }

    fn hole(hole: u8, strokes: [u32; 4]) -> Vec<Score> {
        strokes
            .iter()
            .enumerate()
            .map(|(i, &s)| Score::new(1, i as u32 + 1, hole, s))
            .collect()
    }

    #[test]
    fn test_single_hole_individual_win() {
        let game = Game::new(1, "Links", "2024-06-01", 5.0);
        let results = compute_results(&game, &players(), &hole(5, [4, 5, 5, 6]), &[]).unwrap();

        assert_eq!(results[&1].individual.wins, 1);
        assert_eq!(results[&1].individual.winnings, 15.0);
        for id in 2..=4 {
            assert_eq!(results[&id].individual.losses, 1);
            assert_eq!(results[&id].individual.winnings, -5.0);
        }
        // No pairings, so no team game
        assert!(results.values().all(|r| r.team.holes() == 0));
        assert_eq!(results[&4].total_score, 6);
    }

    #[test]
    fn test_team_draw_on_tied_balls() {
        let game = Game::new(1, "Links", "2024-06-01", 1.0);
        let results =
            compute_results(&game, &players(), &hole(3, [4, 5, 5, 4]), &all_pairings()).unwrap();
        for r in results.values() {
            assert_eq!(r.team.draws, 1);
            assert_eq!(r.team.winnings, 0.0);
        }
    }

    #[test]
    fn test_sections_rotate_partners() {
        // Starting on 7: hole 7 is section 1 (P1P2 vs P3P4), hole 13 is section 2
        // (P1P3 vs P2P4), hole 1 is section 3 (P1P4 vs P2P3)
        let game = Game::new(1, "Links", "", 1.0).with_starting_hole(7);
        let mut scores = hole(7, [3, 5, 5, 5]);
        scores.extend(hole(13, [3, 5, 5, 5]));
        scores.extend(hole(1, [3, 5, 5, 5]));
        let results = compute_results(&game, &players(), &scores, &all_pairings()).unwrap();

        assert_eq!(results[&1].team.wins, 3);
        assert_eq!(results[&2].team.wins, 1);
        assert_eq!(results[&3].team.wins, 1);
        assert_eq!(results[&4].team.wins, 1);
        assert_eq!(results[&2].team.losses, 2);
        let net: f64 = results.values().map(|r| r.team.winnings).sum();
        assert_eq!(net, 0.0);
    }

    #[test]
    fn test_lone_individual_score_is_a_win() {
        let game = Game::new(1, "Links", "", 5.0);
        let results = compute_results(&game, &players(), &[Score::new(1, 1, 1, 4)], &[]).unwrap();
        assert_eq!(results[&1].individual.wins, 1);
        assert_eq!(results[&1].individual.winnings, 0.0);
        assert!((2..=4).all(|id| results[&id].individual.holes() == 0));
    }

    #[test]
    fn test_single_opted_in_player_wins_every_scored_hole() {
        let ps: Vec<Player> = players()
            .into_iter()
            .map(|p| {
                let opted_in = p.id == 2;
                p.with_individual(opted_in)
            })
            .collect();
        let game = Game::new(1, "Links", "", 5.0);
        let mut scores = hole(1, [3, 6, 4, 4]);
        scores.extend(hole(2, [4, 5, 5, 5]));
        let results = compute_results(&game, &ps, &scores, &[]).unwrap();

        assert_eq!(results[&2].individual.wins, 2);
        assert_eq!(results[&2].individual.winnings, 0.0);
        assert_eq!(results[&1].individual.holes(), 0);
    }

    #[test]
    fn test_opted_out_player_skips_individual_only() {
        let mut ps = players();
        ps[3].participates_in_individual = false;
        let game = Game::new(1, "Links", "", 2.0);
        let results = compute_results(&game, &ps, &hole(1, [4, 5, 5, 3]), &all_pairings()).unwrap();

        // Dan's 3 does not count in the individual game, Ann wins it from two others
        assert_eq!(results[&4].individual.holes(), 0);
        assert_eq!(results[&1].individual.winnings, 4.0);
        // Dan still plays the team game: P1P2 (4,5) vs P3P4 (5,3) -> team 2 wins on best ball
        assert_eq!(results[&4].team.wins, 1);
        assert_eq!(results[&4].combined_winnings, 2.0);
    }

    #[test]
    fn test_partial_hole_skips_team_game() {
        let game = Game::new(1, "Links", "", 1.0);
        let mut scores = hole(2, [4, 4, 4, 4]);
        scores.pop();
        let results = compute_results(&game, &players(), &scores, &all_pairings()).unwrap();
        assert!(results.values().all(|r| r.team.holes() == 0));
        assert_eq!(results[&1].individual.draws, 1);
        assert_eq!(results[&4].individual.holes(), 0);
    }

    #[test]
    fn test_unknown_player_aborts() {
        let game = Game::new(1, "Links", "", 1.0);
        let scores = vec![Score::new(1, 42, 1, 4)];
        assert!(matches!(
            compute_results(&game, &players(), &scores, &[]),
            Err(GolfError::PlayerNotFound(42))
        ));
    }

    #[test]
    fn test_combined_and_idempotent() {
        let game = Game::new(1, "Links", "", 1.0);
        let mut scores = Vec::new();
        scores.extend(hole(1, [3, 4, 4, 4]));
        scores.extend(hole(2, [4, 4, 5, 6]));
        scores.extend(hole(3, [5, 4, 6, 6]));
        let pairings = all_pairings();
        let first = compute_results(&game, &players(), &scores, &pairings).unwrap();
        let second = compute_results(&game, &players(), &scores, &pairings).unwrap();
        assert_eq!(first, second);

        for r in first.values() {
            assert_eq!(r.combined_winnings, r.individual.winnings + r.team.winnings);
        }
        assert_eq!(first[&1].individual.wins, 1);
        assert_eq!(first[&2].individual.wins, 1);
        assert_eq!(first[&2].individual.draws, 1);
    }

    #[test]
    fn test_standings_order() {
        let game = Game::new(1, "Links", "", 1.0);
        let results = compute_results(&game, &players(), &hole(1, [5, 3, 5, 5]), &[]).unwrap();
        let order: Vec<PlayerId> = standings(&results).iter().map(|r| r.player.id).collect();
        assert_eq!(order, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_compute_from_store() {
        let mut store = MemoryStore::new();
        let game_id = store.create_game(Game::new(0, "Links", "", 5.0)).unwrap();
        let ids: Vec<PlayerId> = ["Ann", "Bob", "Cat", "Dan"]
            .iter()
            .map(|name| store.add_player(game_id, name).unwrap())
            .collect();
        for (id, strokes) in ids.iter().zip([4, 5, 5, 6]) {
            store.upsert_score(Score::new(game_id, *id, 5, strokes)).unwrap();
        }
        store
            .assign_pairings(game_id, Partition::P12vP34, Partition::P13vP24)
            .unwrap();

        let results = compute_results_for_game(&store, game_id).unwrap();
        assert_eq!(results[&ids[0]].individual.winnings, 15.0);
        // Hole 5 is section 1: Ann+Bob (4,5) beat Cat+Dan (5,6)
        assert_eq!(results[&ids[1]].team.winnings, 5.0);
        assert_eq!(results[&ids[3]].combined_winnings, -10.0);

        assert!(matches!(
            compute_results_for_game(&store, 99),
            Err(GolfError::GameNotFound(99))
        ));
    }
}
