use tracing::debug;

use crate::player::{Player, DEFAULT_NUMBER_OF_PLAYERS, MAX_NUMBER_OF_PLAYERS, MIN_NUMBER_OF_PLAYERS};

/// Clamps a requested player count into the supported range.
pub fn clamp_number_of_players(desired: usize) -> usize {
    let clamped = desired.clamp(MIN_NUMBER_OF_PLAYERS, MAX_NUMBER_OF_PLAYERS);
    if clamped != desired {
        debug!(requested = desired, clamped, "number of players clamped");
    }
    clamped
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// No player has been picked yet.
    NotStarted,
    /// `active` holds the player expected to move next.
    InProgress,
    /// The rotation was stopped by a win.
    Finished,
}

/// Ordered players of one session plus whoever moves next.
///
/// Each session owns its roster, so independent games never share turn state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
    active: Option<Player>,
    finished: bool,
}

impl Roster {
    /// Builds a roster for `desired` players, clamped to the supported range.
    ///
    /// Exactly two players get the classic X/O pair; any other count gets
    /// numbered players. No player is active until [`Roster::advance`].
    pub fn prepare(desired: usize) -> Self {
        let count = clamp_number_of_players(desired);
        let players: Vec<Player> = if count == MIN_NUMBER_OF_PLAYERS {
            vec![Player::X, Player::O]
        } else {
            (0..count).map(Player::numbered).collect()
        };
        debug!(count, ?players, "roster prepared");
        Roster {
            players,
            active: None,
            finished: false,
        }
    }

    pub fn classic() -> Self {
        Self::prepare(DEFAULT_NUMBER_OF_PLAYERS)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn active(&self) -> Option<Player> {
        self.active
    }

    pub fn state(&self) -> TurnState {
        match (self.active, self.finished) {
            (Some(_), _) => TurnState::InProgress,
            (None, true) => TurnState::Finished,
            (None, false) => TurnState::NotStarted,
        }
    }

    /// Hands the turn to the next player in the ring.
    ///
    /// A won game stops the rotation: nobody is active afterwards. Otherwise
    /// the first player follows both "nobody yet" and the last player.
    pub fn advance(&mut self, game_already_won: bool) -> Option<Player> {
        self.active = if game_already_won {
            self.finished = true;
            None
        } else {
            match self.active {
                Some(current) if current.index() + 1 < self.players.len() => {
                    self.players.get(current.index() + 1).copied()
                }
                _ => self.players.first().copied(),
            }
        };
        debug!(active = ?self.active, game_already_won, "active player set");
        self.active
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::classic()
    }
}
