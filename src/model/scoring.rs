//! Per-hole scoring for the individual and team games

use super::pairing::{Side, TeamPairing};
use super::player::PlayerId;
use std::cmp::Ordering;
use std::fmt;

/// Result of one hole for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "W"),
            Outcome::Draw => write!(f, "D"),
            Outcome::Loss => write!(f, "L"),
        }
    }
}

/// A player's outcome on a hole and the money that moves with it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleResult {
    pub player_id: PlayerId,
    pub outcome: Outcome,
    pub winnings: f64,
}

impl HoleResult {
    fn new(player_id: PlayerId, outcome: Outcome, winnings: f64) -> Self {
        Self {
            player_id,
            outcome,
            winnings,
        }
    }
}

/// Running win/draw/loss record and net winnings for one game format
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContestTally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub winnings: f64,
}

impl ContestTally {
    pub fn record(&mut self, result: &HoleResult) {
        match result.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.winnings += result.winnings;
    }

    pub fn holes(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Score the individual game on one hole.
///
/// `scores` holds (player, strokes) for the opted-in players who scored the
/// hole. A lone low score wins one unit from every other player; a shared low
/// score makes the hole a draw for everyone. No scores means no contest.
pub fn evaluate_individual_hole(scores: &[(PlayerId, u32)], bet_unit: f64) -> Vec<HoleResult> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().map(|&(_, s)| s).min().unwrap_or_default();
    let low_count = scores.iter().filter(|&&(_, s)| s == min).count();

    if low_count > 1 {
        return scores
            .iter()
            .map(|&(id, _)| HoleResult::new(id, Outcome::Draw, 0.0))
            .collect();
    }

    let others = (scores.len() - 1) as f64;
    scores
        .iter()
        .map(|&(id, s)| {
            if s == min {
                HoleResult::new(id, Outcome::Win, bet_unit * others)
            } else {
                HoleResult::new(id, Outcome::Loss, -bet_unit)
            }
        })
        .collect()
}

/// A team's two scores on a hole, low first.
/// Field order makes the derived ordering compare best, then second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TeamScore {
    pub best: u32,
    pub second: u32,
}

impl TeamScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            best: a.min(b),
            second: a.max(b),
        }
    }
}

fn team_score(team: [PlayerId; 2], scores: &[(PlayerId, u32)]) -> Option<TeamScore> {
    let lookup = |player: PlayerId| {
        scores
            .iter()
            .find(|&&(id, _)| id == player)
            .map(|&(_, s)| s)
    };
    Some(TeamScore::new(lookup(team[0])?, lookup(team[1])?))
}

/// Score the team game on one hole under the given pairing.
///
/// Lower best ball wins; a tied best ball falls back to the second ball; both
/// tied is a draw. Every player wins or loses one unit. Returns nothing unless
/// all four players scored.
pub fn evaluate_team_hole(
    pairing: &TeamPairing,
    scores: &[(PlayerId, u32)],
    bet_unit: f64,
) -> Vec<HoleResult> {
    let (team1, team2) = match (
        team_score(pairing.team1(), scores),
        team_score(pairing.team2(), scores),
    ) {
        (Some(t1), Some(t2)) => (t1, t2),
        _ => return Vec::new(),
    };

    let winner = match team1.cmp(&team2) {
        Ordering::Less => Side::Team1,
        Ordering::Greater => Side::Team2,
        Ordering::Equal => {
            return pairing
                .players()
                .into_iter()
                .map(|id| HoleResult::new(id, Outcome::Draw, 0.0))
                .collect()
        }
    };

    let mut results = Vec::with_capacity(4);
    for id in pairing.team(winner) {
        results.push(HoleResult::new(id, Outcome::Win, bet_unit));
    }
    for id in pairing.team(winner.opponent()) {
        results.push(HoleResult::new(id, Outcome::Loss, -bet_unit));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn find(results: &[HoleResult], id: PlayerId) -> HoleResult {
        *results.iter().find(|r| r.player_id == id).unwrap()
    }

    #[test]
    fn test_individual_outright_win() {
        let results = evaluate_individual_hole(&[(1, 4), (2, 5), (3, 5), (4, 6)], 5.0);
        assert_eq!(find(&results, 1).outcome, Outcome::Win);
        assert_eq!(find(&results, 1).winnings, 15.0);
        for id in 2..=4 {
            assert_eq!(find(&results, id).outcome, Outcome::Loss);
            assert_eq!(find(&results, id).winnings, -5.0);
        }
    }

    #[test]
    fn test_individual_tied_low_is_draw_for_all() {
        let results = evaluate_individual_hole(&[(1, 4), (2, 4), (3, 5), (4, 7)], 2.0);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.outcome == Outcome::Draw && r.winnings == 0.0));
    }

    #[test]
    fn test_individual_three_players() {
        // One player sat out the individual game
        let results = evaluate_individual_hole(&[(1, 6), (2, 3), (4, 5)], 1.5);
        assert_eq!(find(&results, 2).winnings, 3.0);
        assert_eq!(find(&results, 1).winnings, -1.5);
        assert_eq!(find(&results, 4).outcome, Outcome::Loss);
    }

    #[test]
    fn test_individual_lone_score_wins_nothing() {
        assert!(evaluate_individual_hole(&[], 5.0).is_empty());
        let results = evaluate_individual_hole(&[(1, 4)], 5.0);
        assert_eq!(results, vec![HoleResult::new(1, Outcome::Win, 0.0)]);
    }

    #[test]
    fn test_team_best_ball_wins() {
        let pairing = TeamPairing::new(1, 1, [1, 2], [3, 4]);
        let results = evaluate_team_hole(&pairing, &[(1, 3), (2, 7), (3, 4), (4, 4)], 2.0);
        assert_eq!(find(&results, 1).outcome, Outcome::Win);
        assert_eq!(find(&results, 2).winnings, 2.0);
        assert_eq!(find(&results, 3).outcome, Outcome::Loss);
        assert_eq!(find(&results, 4).winnings, -2.0);
    }

    #[test]
    fn test_team_second_ball_breaks_tie() {
        let pairing = TeamPairing::new(1, 1, [1, 2], [3, 4]);
        let results = evaluate_team_hole(&pairing, &[(1, 4), (2, 6), (3, 4), (4, 5)], 1.0);
        assert_eq!(find(&results, 3).outcome, Outcome::Win);
        assert_eq!(find(&results, 4).outcome, Outcome::Win);
        assert_eq!(find(&results, 1).outcome, Outcome::Loss);
        assert_eq!(find(&results, 2).winnings, -1.0);
    }

    #[test]
    fn test_team_full_tie_is_draw() {
        let pairing = TeamPairing::new(1, 1, [1, 2], [3, 4]);
        let results = evaluate_team_hole(&pairing, &[(1, 4), (2, 5), (3, 5), (4, 4)], 1.0);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.outcome == Outcome::Draw && r.winnings == 0.0));
    }

    #[test]
    fn test_team_skips_incomplete_hole() {
        let pairing = TeamPairing::new(1, 1, [1, 2], [3, 4]);
        assert!(evaluate_team_hole(&pairing, &[(1, 4), (2, 5), (3, 5)], 1.0).is_empty());
    }

    #[test]
    fn test_tally_record() {
        let mut tally = ContestTally::default();
        tally.record(&HoleResult::new(1, Outcome::Win, 15.0));
        tally.record(&HoleResult::new(1, Outcome::Loss, -5.0));
        tally.record(&HoleResult::new(1, Outcome::Draw, 0.0));
        assert_eq!((tally.wins, tally.draws, tally.losses), (1, 1, 1));
        assert_eq!(tally.winnings, 10.0);
        assert_eq!(tally.holes(), 3);
    }

    proptest! {
        #[test]
        fn prop_individual_is_zero_sum(
            strokes in prop::collection::vec(1u32..=10, 2..=4),
            unit in 0u32..=20,
        ) {
            let scores: Vec<(PlayerId, u32)> =
                strokes.iter().enumerate().map(|(i, &s)| (i as PlayerId + 1, s)).collect();
            let results = evaluate_individual_hole(&scores, unit as f64);
            prop_assert_eq!(results.len(), scores.len());
            let total: f64 = results.iter().map(|r| r.winnings).sum();
            prop_assert_eq!(total, 0.0);

            let min = *strokes.iter().min().unwrap();
            let lows = strokes.iter().filter(|&&s| s == min).count();
            let wins = results.iter().filter(|r| r.outcome == Outcome::Win).count();
            if lows == 1 {
                prop_assert_eq!(wins, 1);
            } else {
                prop_assert!(results.iter().all(|r| r.outcome == Outcome::Draw));
            }
        }

        #[test]
        fn prop_team_is_zero_sum(a in 1u32..=10, b in 1u32..=10, c in 1u32..=10, d in 1u32..=10) {
            let pairing = TeamPairing::new(1, 1, [1, 2], [3, 4]);
            let results = evaluate_team_hole(&pairing, &[(1, a), (2, b), (3, c), (4, d)], 3.0);
            prop_assert_eq!(results.len(), 4);
            let total: f64 = results.iter().map(|r| r.winnings).sum();
            prop_assert_eq!(total, 0.0);
            prop_assert_eq!(find(&results, 1).outcome, find(&results, 2).outcome);
            prop_assert_eq!(find(&results, 3).outcome, find(&results, 4).outcome);
        }
    }
}
