use thiserror::Error;

use super::board::Point;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot place {mine_count} mines on a {size}x{size} board")]
    InvalidConfiguration { size: usize, mine_count: usize },
    #[error("Cell at {0} is outside the board")]
    OutOfBounds(Point),
    #[error("Game already over, no new moves are accepted")]
    AlreadyOver,
}

pub type Result<T> = std::result::Result<T, GameError>;
