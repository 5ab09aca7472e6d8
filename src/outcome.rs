use crate::player::Player;
use crate::position::Position;

/// What a successful move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome<const D: usize = 2> {
    /// The mark was placed and the game goes on.
    Placed {
        position: Position<D>,
        player: Player,
        longest_line: usize,
    },
    /// The mark completed a line of at least the winning length.
    Won {
        position: Position<D>,
        player: Player,
        longest_line: usize,
    },
    /// The mark filled the last free cell without winning.
    Drawn {
        position: Position<D>,
        player: Player,
        longest_line: usize,
    },
}

impl<const D: usize> MoveOutcome<D> {
    pub fn position(&self) -> Position<D> {
        match *self {
            MoveOutcome::Placed { position, .. }
            | MoveOutcome::Won { position, .. }
            | MoveOutcome::Drawn { position, .. } => position,
        }
    }

    pub fn player(&self) -> Player {
        match *self {
            MoveOutcome::Placed { player, .. }
            | MoveOutcome::Won { player, .. }
            | MoveOutcome::Drawn { player, .. } => player,
        }
    }

    /// Longest line through the new mark; 0 when it touches no mark of its owner.
    pub fn longest_line(&self) -> usize {
        match *self {
            MoveOutcome::Placed { longest_line, .. }
            | MoveOutcome::Won { longest_line, .. }
            | MoveOutcome::Drawn { longest_line, .. } => longest_line,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, MoveOutcome::Won { .. })
    }

    pub fn ends_game(&self) -> bool {
        !matches!(self, MoveOutcome::Placed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(*player),
            GameOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{} wins", player),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}
