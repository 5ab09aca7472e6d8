//! Error types for moves and position parsing.
//!
//! Configuration inputs are never errors: out-of-range board sizes, player
//! counts and winning lengths are clamped where they enter the engine.

use derive_more::{Display, Error};

use crate::player::Player;
use crate::position::Position;

/// Why a move was not made. The board and roster are left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum MoveError<const D: usize = 2> {
    #[display("cell {position} is already occupied by {occupant}")]
    CellOccupied {
        position: Position<D>,
        occupant: Player,
    },

    #[display("cell {position} is outside a board of side {side_length}")]
    OutOfBounds {
        position: Position<D>,
        side_length: usize,
    },

    #[display("no player is active")]
    NoActivePlayer,

    #[display("the game is already finished")]
    GameFinished,
}

#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ParsePositionError {
    #[display("expected {expected} axes, found {found}")]
    WrongAxisCount { expected: usize, found: usize },

    #[display("invalid axis value {value:?}")]
    InvalidAxis { value: String },
}
