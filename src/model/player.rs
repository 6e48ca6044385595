use super::game::GameId;
use std::fmt;

pub type PlayerId = u32;

/// A golfer in one game
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    pub name: String,
    /// Seating order 1-4, used to name the canonical team splits
    pub position: u8,
    /// Opt-out flag for the individual game only; everyone plays the team game
    pub participates_in_individual: bool,
}

impl Player {
    pub fn new(id: PlayerId, game_id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            game_id,
            name: name.into(),
            position: 0,
            participates_in_individual: true,
        }
    }

    pub fn with_position(mut self, position: u8) -> Self {
        self.position = position;
        self
    }

    pub fn with_individual(mut self, participates: bool) -> Self {
        self.participates_in_individual = participates;
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Order players by seating position, then id
pub fn sort_by_seat(players: &mut [Player]) {
    players.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let p = Player::new(7, 1, "Alice");
        assert_eq!(p.name, "Alice");
        assert!(p.participates_in_individual);
        assert_eq!(p.to_string(), "Alice");
    }

    #[test]
    fn test_sort_by_seat() {
        let mut players = vec![
            Player::new(3, 1, "C").with_position(2),
            Player::new(1, 1, "A").with_position(1),
            Player::new(2, 1, "B").with_position(2),
        ];
        sort_by_seat(&mut players);
        let ids: Vec<_> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
