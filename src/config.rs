use tracing::debug;

use crate::board::{clamp_side_length, CLASSIC_SIDE_SIZE};
use crate::player::DEFAULT_NUMBER_OF_PLAYERS;
use crate::roster::clamp_number_of_players;

pub const MIN_WINNING_LINE_LENGTH: usize = 2;

/// Settings for one game session.
///
/// Nothing here is ever rejected: [`GameConfig::clamped`] pulls every value
/// into its supported range, and [`crate::game::Game`] always clamps the
/// config it is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub side_length: usize,
    pub number_of_players: usize,
    /// Length a line must reach for its owner to win.
    pub winning_length: usize,
}

impl GameConfig {
    /// 3x3 board, X and O, three in a row.
    pub fn classic() -> Self {
        Self::new(CLASSIC_SIDE_SIZE)
    }

    /// Two players; a line must span the whole side to win.
    pub fn new(side_length: usize) -> Self {
        GameConfig {
            side_length,
            number_of_players: DEFAULT_NUMBER_OF_PLAYERS,
            winning_length: side_length,
        }
    }

    pub fn with_players(mut self, number_of_players: usize) -> Self {
        self.number_of_players = number_of_players;
        self
    }

    pub fn with_winning_length(mut self, winning_length: usize) -> Self {
        self.winning_length = winning_length;
        self
    }

    /// The same config with every value inside its supported range.
    ///
    /// The winning length is bounded by the clamped side length, since no
    /// line on the board can be longer than that.
    pub fn clamped(&self) -> Self {
        let side_length = clamp_side_length(self.side_length);
        let winning_length = self
            .winning_length
            .clamp(MIN_WINNING_LINE_LENGTH, side_length);
        if winning_length != self.winning_length {
            debug!(
                requested = self.winning_length,
                clamped = winning_length,
                "winning length clamped"
            );
        }
        GameConfig {
            side_length,
            number_of_players: clamp_number_of_players(self.number_of_players),
            winning_length,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
