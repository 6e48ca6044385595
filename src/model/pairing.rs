use super::game::GameId;
use super::player::{Player, PlayerId};
use super::section::SECTIONS;
use crate::error::{GolfError, Result};
use std::collections::HashSet;
use std::fmt;

/// Which team a player is on for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

/// The two-vs-two teams in force for one section of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPairing {
    pub game_id: GameId,
    pub section: u8,
    pub team1_player1_id: PlayerId,
    pub team1_player2_id: PlayerId,
    pub team2_player1_id: PlayerId,
    pub team2_player2_id: PlayerId,
}

impl TeamPairing {
    pub fn new(game_id: GameId, section: u8, team1: [PlayerId; 2], team2: [PlayerId; 2]) -> Self {
        Self {
            game_id,
            section,
            team1_player1_id: team1[0],
            team1_player2_id: team1[1],
            team2_player1_id: team2[0],
            team2_player2_id: team2[1],
        }
    }

    pub fn team1(&self) -> [PlayerId; 2] {
        [self.team1_player1_id, self.team1_player2_id]
    }

    pub fn team2(&self) -> [PlayerId; 2] {
        [self.team2_player1_id, self.team2_player2_id]
    }

    pub fn team(&self, side: Side) -> [PlayerId; 2] {
        match side {
            Side::Team1 => self.team1(),
            Side::Team2 => self.team2(),
        }
    }

    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.team1_player1_id,
            self.team1_player2_id,
            self.team2_player1_id,
            self.team2_player2_id,
        ]
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.team1().contains(&player) {
            Some(Side::Team1)
        } else if self.team2().contains(&player) {
            Some(Side::Team2)
        } else {
            None
        }
    }

    pub fn partner_of(&self, player: PlayerId) -> Option<PlayerId> {
        let team = self.team(self.side_of(player)?);
        team.into_iter().find(|&p| p != player)
    }
}

/// One of the three ways to split four seated players into two pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// P1+P2 vs P3+P4
    P12vP34,
    /// P1+P3 vs P2+P4
    P13vP24,
    /// P1+P4 vs P2+P3
    P14vP23,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::P12vP34, Partition::P13vP24, Partition::P14vP23];

    /// Seat indices (0-based) of each team
    fn seats(&self) -> ([usize; 2], [usize; 2]) {
        match self {
            Partition::P12vP34 => ([0, 1], [2, 3]),
            Partition::P13vP24 => ([0, 2], [1, 3]),
            Partition::P14vP23 => ([0, 3], [1, 2]),
        }
    }

    /// Teams for the given players listed in seating order
    pub fn teams(&self, players: [PlayerId; 4]) -> ([PlayerId; 2], [PlayerId; 2]) {
        let (a, b) = self.seats();
        ([players[a[0]], players[a[1]]], [players[b[0]], players[b[1]]])
    }

    pub fn to_pairing(&self, game_id: GameId, section: u8, players: [PlayerId; 4]) -> TeamPairing {
        let (team1, team2) = self.teams(players);
        TeamPairing::new(game_id, section, team1, team2)
    }

    /// Identify which canonical split a pairing uses
    pub fn of_pairing(pairing: &TeamPairing, players: [PlayerId; 4]) -> Option<Partition> {
        let partner = pairing.partner_of(players[0])?;
        let idx = players.iter().position(|&p| p == partner)?;
        let partition = match idx {
            1 => Partition::P12vP34,
            2 => Partition::P13vP24,
            3 => Partition::P14vP23,
            _ => return None,
        };
        // The other two seats must make up the opposing team
        let (_, other) = partition.teams(players);
        let side = pairing.side_of(other[0])?;
        if pairing.side_of(other[1]) == Some(side) && pairing.side_of(players[0]) != Some(side) {
            Some(partition)
        } else {
            None
        }
    }

    /// The split left over once two sections are chosen
    pub fn remaining(first: Partition, second: Partition) -> Option<Partition> {
        if first == second {
            return None;
        }
        Partition::ALL
            .into_iter()
            .find(|p| *p != first && *p != second)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::P12vP34 => write!(f, "P1P2 vs P3P4"),
            Partition::P13vP24 => write!(f, "P1P3 vs P2P4"),
            Partition::P14vP23 => write!(f, "P1P4 vs P2P3"),
        }
    }
}

/// The four players of a game in seating order
pub fn seated_four(players: &[Player]) -> Result<[PlayerId; 4]> {
    let mut seated: Vec<&Player> = players.iter().collect();
    seated.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
    match seated.as_slice() {
        [a, b, c, d] => Ok([a.id, b.id, c.id, d.id]),
        _ => Err(GolfError::InvalidPairing(format!(
            "team game needs exactly 4 players, found {}",
            players.len()
        ))),
    }
}

/// Check that a game's pairings are consistent with its players.
///
/// At most one pairing per section, sections 1-3 only, four distinct game
/// players per pairing, and no split repeated across sections.
pub fn validate_pairings(pairings: &[TeamPairing], players: &[Player]) -> Result<()> {
    if pairings.is_empty() {
        return Ok(());
    }
    let seats = seated_four(players)?;

    let mut sections = HashSet::new();
    let mut partitions = HashSet::new();
    for pairing in pairings {
        if pairing.section < 1 || pairing.section > SECTIONS {
            return Err(GolfError::InvalidPairing(format!(
                "section {} out of range",
                pairing.section
            )));
        }
        if !sections.insert(pairing.section) {
            return Err(GolfError::InvalidPairing(format!(
                "section {} has more than one pairing",
                pairing.section
            )));
        }

        let ids: HashSet<PlayerId> = pairing.players().into_iter().collect();
        if ids.len() != 4 {
            return Err(GolfError::InvalidPairing(format!(
                "section {} repeats a player",
                pairing.section
            )));
        }
        if let Some(stranger) = pairing.players().into_iter().find(|id| !seats.contains(id)) {
            return Err(GolfError::PlayerNotFound(stranger));
        }

        // Four distinct players drawn from the seated four always form a split
        if let Some(partition) = Partition::of_pairing(pairing, seats) {
            if !partitions.insert(partition) {
                return Err(GolfError::InvalidPairing(format!(
                    "section {} repeats teams {}",
                    pairing.section, partition
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four() -> Vec<Player> {
        (1..=4)
            .map(|i| Player::new(i, 1, format!("P{}", i)).with_position(i as u8))
            .collect()
    }

    #[test]
    fn test_side_and_partner() {
        let p = TeamPairing::new(1, 1, [1, 2], [3, 4]);
        assert_eq!(p.side_of(1), Some(Side::Team1));
        assert_eq!(p.side_of(4), Some(Side::Team2));
        assert_eq!(p.side_of(9), None);
        assert_eq!(p.partner_of(3), Some(4));
        assert_eq!(Side::Team1.opponent(), Side::Team2);
    }

    #[test]
    fn test_remaining_partition() {
        assert_eq!(
            Partition::remaining(Partition::P12vP34, Partition::P14vP23),
            Some(Partition::P13vP24)
        );
        assert_eq!(
            Partition::remaining(Partition::P13vP24, Partition::P12vP34),
            Some(Partition::P14vP23)
        );
        assert_eq!(Partition::remaining(Partition::P13vP24, Partition::P13vP24), None);
    }

    #[test]
    fn test_partition_round_trip() {
        let seats = [10, 20, 30, 40];
        for partition in Partition::ALL {
            let pairing = partition.to_pairing(1, 1, seats);
            assert_eq!(Partition::of_pairing(&pairing, seats), Some(partition));
        }
        // Team order and in-team order do not matter
        let swapped = TeamPairing::new(1, 2, [40, 20], [30, 10]);
        assert_eq!(Partition::of_pairing(&swapped, seats), Some(Partition::P13vP24));
    }

    #[test]
    fn test_validate_pairings_accepts_three_splits() {
        let players = four();
        let seats = seated_four(&players).unwrap();
        let pairings: Vec<_> = Partition::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| p.to_pairing(1, i as u8 + 1, seats))
            .collect();
        assert!(validate_pairings(&pairings, &players).is_ok());
    }

    #[test]
    fn test_validate_pairings_rejects_repeat() {
        let players = four();
        let pairings = vec![
            TeamPairing::new(1, 1, [1, 2], [3, 4]),
            TeamPairing::new(1, 2, [3, 4], [2, 1]),
        ];
        let err = validate_pairings(&pairings, &players).unwrap_err();
        assert!(err.to_string().contains("repeats teams"));
    }

    #[test]
    fn test_validate_pairings_rejects_bad_rows() {
        let players = four();
        let dup_section = vec![
            TeamPairing::new(1, 1, [1, 2], [3, 4]),
            TeamPairing::new(1, 1, [1, 3], [2, 4]),
        ];
        assert!(validate_pairings(&dup_section, &players).is_err());

        let dup_player = vec![TeamPairing::new(1, 1, [1, 1], [3, 4])];
        assert!(validate_pairings(&dup_player, &players).is_err());

        let stranger = vec![TeamPairing::new(1, 1, [1, 2], [3, 99])];
        assert!(matches!(
            validate_pairings(&stranger, &players),
            Err(GolfError::PlayerNotFound(99))
        ));

        let bad_section = vec![TeamPairing::new(1, 4, [1, 2], [3, 4])];
        assert!(validate_pairings(&bad_section, &players).is_err());
    }
}
