use crate::{Error, Result};

/// One of the two sides of the game
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Builds a player from its numeric id (1 or 2)
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(Error::InvalidBoard(format!("unknown player id {}", id))),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}
