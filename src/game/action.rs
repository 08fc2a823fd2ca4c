use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected external action representation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("invalid action code {0}, expected 0..=3")]
    InvalidCode(i64),
    #[error("invalid action token {0:?}, expected one of n, s, e, w")]
    InvalidToken(String),
}

/// Direction the snake can travel; also the only action an agent can take.
///
/// "Keep going" is expressed by resubmitting the current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in action-code order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::North, Direction::South)
                | (Direction::South, Direction::North)
                | (Direction::East, Direction::West)
                | (Direction::West, Direction::East)
        )
    }

    /// Returns the (row, col) delta for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Integer action code (0 = North, 1 = South, 2 = East, 3 = West)
    pub fn code(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Single-letter token used by text interfaces
    pub fn token(&self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl TryFrom<i64> for Direction {
    type Error = ActionError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::North),
            1 => Ok(Direction::South),
            2 => Ok(Direction::East),
            3 => Ok(Direction::West),
            other => Err(ActionError::InvalidCode(other)),
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = ActionError;

    fn try_from(code: usize) -> Result<Self, Self::Error> {
        let code = i64::try_from(code).unwrap_or(i64::MAX);
        Direction::try_from(code)
    }
}

impl TryFrom<char> for Direction {
    type Error = ActionError;

    fn try_from(token: char) -> Result<Self, Self::Error> {
        match token.to_ascii_lowercase() {
            'n' => Ok(Direction::North),
            's' => Ok(Direction::South),
            'e' => Ok(Direction::East),
            'w' => Ok(Direction::West),
            _ => Err(ActionError::InvalidToken(token.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(ActionError::InvalidToken(s.to_string())),
        }
    }
}
