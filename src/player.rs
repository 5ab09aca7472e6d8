use std::fmt;

pub const MIN_NUMBER_OF_PLAYERS: usize = 2;
pub const MAX_NUMBER_OF_PLAYERS: usize = 62;
pub const DEFAULT_NUMBER_OF_PLAYERS: usize = MIN_NUMBER_OF_PLAYERS;

/// Symbol printed for a cell nobody has marked.
pub const SYMBOL_FOR_ABSENT_MARK: char = '.';

const GENERIC_SYMBOLS: &[u8; MAX_NUMBER_OF_PLAYERS] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A participant in a session.
///
/// `index` is the player's place in the roster and drives turn rotation;
/// `symbol` is what the board shows for the player's marks. An empty cell
/// or a finished game is expressed as `Option::<Player>::None`, so a
/// `Player` value is always a real, line-forming mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    index: usize,
    symbol: char,
}

impl Player {
    /// Crosses: first in a classic two-player game.
    pub const X: Player = Player {
        index: 0,
        symbol: 'X',
    };

    /// Noughts: moves after `X`.
    pub const O: Player = Player {
        index: 1,
        symbol: 'O',
    };

    /// Player for seat `index` of a roster that is not the classic X/O pair.
    ///
    /// Seats past [`MAX_NUMBER_OF_PLAYERS`] share the last symbol; rosters
    /// are clamped well before that.
    pub fn numbered(index: usize) -> Self {
        let symbol = GENERIC_SYMBOLS
            .get(index)
            .or(GENERIC_SYMBOLS.last())
            .map_or('?', |&b| b as char);
        Player { index, symbol }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
