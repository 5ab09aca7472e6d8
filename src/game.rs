use tracing::{debug, instrument};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::outcome::{GameOutcome, MoveOutcome};
use crate::player::Player;
use crate::position::Position;
use crate::roster::{Roster, TurnState};

/// One game session: a board, its roster and the rules it is played by.
///
/// Every session owns its own turn state, so any number of games can run
/// side by side. Callers that share a session across threads must wrap the
/// whole `Game` in a single lock.
#[derive(Clone, Debug)]
pub struct Game<const D: usize = 2> {
    board: Board<D>,
    roster: Roster,
    config: GameConfig,
    last_move: Option<MoveOutcome<D>>,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

pub type Game2D = Game<2>;
pub type Game3D = Game<3>;

impl<const D: usize> Game<D> {
    /// Starts a session; the first player of the roster is active right away.
    pub fn new(config: GameConfig) -> Self {
        let config = config.clamped();
        let mut roster = Roster::prepare(config.number_of_players);
        roster.advance(false);
        debug!(?config, "new game prepared");
        Game {
            board: Board::new(config.side_length),
            roster,
            config,
            last_move: None,
            outcome: None,
            move_count: 0,
        }
    }

    pub fn classic() -> Self {
        Self::new(GameConfig::classic())
    }

    pub fn with_options(side_length: usize, number_of_players: usize, winning_length: usize) -> Self {
        Self::new(
            GameConfig::new(side_length)
                .with_players(number_of_players)
                .with_winning_length(winning_length),
        )
    }

    /// Throws the current session away and starts a fresh one.
    pub fn prepare(&mut self, config: GameConfig) {
        *self = Self::new(config);
    }

    /// Replaces the roster with `desired` players (clamped) on a cleared board.
    ///
    /// Nobody is active afterwards; the first move without an explicit player
    /// goes to the first player of the new roster.
    pub fn prepare_roster(&mut self, desired: usize) -> &[Player] {
        self.roster = Roster::prepare(desired);
        self.config.number_of_players = self.roster.len();
        self.board.clear();
        self.last_move = None;
        self.outcome = None;
        self.move_count = 0;
        self.roster.players()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn winning_length(&self) -> usize {
        self.config.winning_length
    }

    pub fn board(&self) -> &Board<D> {
        &self.board
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn active_player(&self) -> Option<Player> {
        self.roster.active()
    }

    pub fn turn_state(&self) -> TurnState {
        self.roster.state()
    }

    pub fn mark_at(&self, position: &Position<D>) -> Option<Player> {
        self.board.mark_at(position)
    }

    pub fn is_ready(&self) -> bool {
        self.board.is_ready() && self.outcome.is_none()
    }

    /// True until somebody wins or the board fills up.
    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        self.outcome.and_then(|outcome| outcome.winner())
    }

    pub fn last_move(&self) -> Option<MoveOutcome<D>> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Moves for the active player.
    pub fn play(&mut self, position: Position<D>) -> Result<MoveOutcome<D>, MoveError<D>> {
        self.make_move(position, None)
    }

    /// Places a mark for `player`, or for the active player when `None`.
    ///
    /// On success the longest line through the new mark decides whether the
    /// game is won, and the turn passes to the roster member after the
    /// active one, whoever actually moved. On error nothing changes.
    #[instrument(skip(self))]
    pub fn make_move(
        &mut self,
        position: Position<D>,
        player: Option<Player>,
    ) -> Result<MoveOutcome<D>, MoveError<D>> {
        if self.outcome.is_some() {
            return Err(MoveError::GameFinished);
        }

        let not_started = self.roster.state() == TurnState::NotStarted;
        let player = player
            .or(self.roster.active())
            .or_else(|| not_started.then(|| self.roster.players().first().copied()).flatten())
            .ok_or(MoveError::NoActivePlayer)?;

        if !self.board.place(position, player) {
            return Err(match self.board.mark_at(&position) {
                Some(occupant) => MoveError::CellOccupied { position, occupant },
                None => MoveError::OutOfBounds {
                    position,
                    side_length: self.board.side_length(),
                },
            });
        }
        self.move_count += 1;

        let longest_line = self.board.longest_line_through(&position).unwrap_or(0);
        let won = longest_line >= self.config.winning_length;
        let drawn = !won && self.board.is_full();

        if not_started {
            self.roster.advance(false);
        }
        self.roster.advance(won || drawn);

        let result = if won {
            debug!(%player, %position, longest_line, "game won");
            self.outcome = Some(GameOutcome::Win(player));
            MoveOutcome::Won {
                position,
                player,
                longest_line,
            }
        } else if drawn {
            debug!(%player, %position, "board is full, game drawn");
            self.outcome = Some(GameOutcome::Draw);
            MoveOutcome::Drawn {
                position,
                player,
                longest_line,
            }
        } else {
            MoveOutcome::Placed {
                position,
                player,
                longest_line,
            }
        };
        self.last_move = Some(result);
        Ok(result)
    }
}

impl Default for Game<2> {
    fn default() -> Self {
        Self::classic()
    }
}

impl<const D: usize> std::fmt::Display for Game<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self
            .roster
            .active()
            .map_or_else(|| "none".to_string(), |player| player.to_string());
        write!(f, "Game(active: {}, outcome: ", active)?;
        match self.outcome {
            Some(outcome) => write!(f, "{}", outcome)?,
            None => write!(f, "in progress")?,
        }
        write!(f, ")\n{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{MAX_NUMBER_OF_PLAYERS, MIN_NUMBER_OF_PLAYERS};
    use crate::test_support::init_logging;

    fn classic_game() -> Game {
        init_logging();
        Game::classic()
    }

    fn play_all(game: &mut Game, moves: &[(i32, i32)]) -> Vec<MoveOutcome> {
        moves
            .iter()
            .map(|&(x, y)| game.play(Position::xy(x, y)).expect("move should be legal"))
            .collect()
    }

    #[test]
    fn test_new_game() {
        let game = classic_game();
        assert!(game.is_active());
        assert!(game.is_ready());
        assert_eq!(game.active_player(), Some(Player::X));
        assert_eq!(game.turn_state(), TurnState::InProgress);
        assert_eq!(game.winning_length(), 3);
        assert!(game.last_move().is_none());
    }

    #[test]
    fn test_row_of_one_player_wins() {
        let mut game = classic_game();
        let x = Some(Player::X);
        assert!(game.make_move(Position::xy(0, 0), x).is_ok());
        assert!(game.make_move(Position::xy(1, 0), x).is_ok());
        let last = game
            .make_move(Position::xy(2, 0), x)
            .expect("third mark is legal");

        assert_eq!(game.board().longest_line_through(&Position::xy(2, 0)), Some(3));
        assert!(last.is_win());
        assert_eq!(last.longest_line(), 3);
        assert_eq!(game.winner(), Some(Player::X));
        assert_eq!(game.active_player(), None);
        assert_eq!(game.turn_state(), TurnState::Finished);
    }

    #[test]
    fn test_field_with_multiple_possible_lines() {
        // . X X
        // . X O
        // O X O
        let mut game = classic_game();
        let (a, b) = (Some(Player::X), Some(Player::O));
        let moves = [
            ((1, 1), a),
            ((2, 1), b),
            ((2, 0), a),
            ((0, 2), b),
            ((1, 2), a),
            ((2, 2), b),
        ];
        for ((x, y), player) in moves {
            let outcome = game
                .make_move(Position::xy(x, y), player)
                .expect("move is legal");
            assert!(!outcome.ends_game());
        }
        let last = game
            .make_move(Position::xy(1, 0), a)
            .expect("move is legal");
        assert!(last.is_win());
        assert!(!game.is_active(), "Game should have been won");
        assert_eq!(game.winner(), Some(Player::X));
    }

    #[test]
    fn test_alternating_players_o_wins() {
        let mut game = classic_game();
        let outcomes = play_all(&mut game, &[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1), (1, 2)]);

        let players: Vec<Player> = outcomes.iter().map(|o| o.player()).collect();
        assert_eq!(
            players,
            vec![Player::X, Player::O, Player::X, Player::O, Player::X, Player::O]
        );
        assert!(outcomes[..5].iter().all(|o| !o.ends_game()));
        assert_eq!(game.winner(), Some(Player::O));
        assert_eq!(game.last_move().map(|m| m.longest_line()), Some(3));
    }

    #[test]
    fn test_adjacent_marks_of_sequential_players_form_no_line() {
        let mut game = classic_game();
        let first = game.play(Position::xy(0, 0)).expect("legal");
        let second = game.play(Position::xy(1, 0)).expect("legal");
        assert_eq!(first.player(), Player::X);
        assert_eq!(second.player(), Player::O);
        assert_eq!(first.longest_line(), 0);
        assert_eq!(second.longest_line(), 0);
    }

    #[test]
    fn test_occupied_cell_keeps_previous_mark() {
        let mut game = classic_game();
        let spot = Position::xy(1, 1);
        assert!(game.make_move(spot, Some(Player::X)).is_ok());
        let active_before = game.active_player();

        let err = game
            .make_move(spot, Some(Player::O))
            .expect_err("cell is taken");
        assert_eq!(
            err,
            MoveError::CellOccupied {
                position: spot,
                occupant: Player::X
            }
        );
        assert_eq!(game.mark_at(&spot), Some(Player::X));
        assert_eq!(game.active_player(), active_before);
        assert_eq!(game.move_count(), 1);
        assert_eq!(err.to_string(), "cell (1, 1) is already occupied by X");
    }

    #[test]
    fn test_out_of_bounds_move_changes_nothing() {
        let mut game = classic_game();
        let err = game.play(Position::xy(3, 1)).expect_err("off the board");
        assert_eq!(
            err,
            MoveError::OutOfBounds {
                position: Position::xy(3, 1),
                side_length: 3
            }
        );
        assert!(game.is_ready());
        assert_eq!(game.active_player(), Some(Player::X));
    }

    #[test]
    fn test_rotation_without_win() {
        let mut game = Game::<2>::new(GameConfig::new(10).with_winning_length(10));
        let roster: Vec<Player> = game.players().to_vec();
        for n in 0..12 {
            assert_eq!(game.active_player(), Some(roster[n % 2]));
            let x = (n % 10) as i32;
            let y = (n / 10) as i32 * 5;
            game.play(Position::xy(x, y)).expect("legal");
        }
        assert_eq!(game.active_player(), Some(roster[0]));
    }

    #[test]
    fn test_explicit_player_does_not_skip_rotation() {
        let mut game = classic_game();
        game.make_move(Position::xy(0, 0), Some(Player::O))
            .expect("legal");
        // Rotation moves on from the active player, not from whoever moved.
        assert_eq!(game.active_player(), Some(Player::O));
    }

    #[test]
    fn test_moves_after_win_are_rejected() {
        let mut game = classic_game();
        play_all(&mut game, &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        assert_eq!(game.winner(), Some(Player::X));
        assert_eq!(game.play(Position::xy(2, 2)), Err(MoveError::GameFinished));
        assert_eq!(
            game.make_move(Position::xy(2, 2), Some(Player::O)),
            Err(MoveError::GameFinished)
        );
        assert_eq!(game.mark_at(&Position::xy(2, 2)), None);
    }

    #[test]
    fn test_draw() {
        // X O X
        // X O O
        // O X X
        let mut game = classic_game();
        let outcomes = play_all(
            &mut game,
            &[
                (0, 0),
                (1, 0),
                (2, 0),
                (1, 1),
                (0, 1),
                (2, 1),
                (1, 2),
                (0, 2),
                (2, 2),
            ],
        );
        assert!(outcomes[..8].iter().all(|o| !o.ends_game()));
        assert!(matches!(outcomes[8], MoveOutcome::Drawn { .. }));
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
        assert_eq!(game.winner(), None);
        assert_eq!(game.active_player(), None);
    }

    #[test]
    fn test_joining_segments_on_5x5_wins() {
        init_logging();
        let mut game = Game::<2>::new(GameConfig::new(5));
        let x = Some(Player::X);
        for (px, py) in [(0, 0), (1, 0), (3, 0), (4, 0)] {
            let outcome = game.make_move(Position::xy(px, py), x).expect("legal");
            assert!(!outcome.is_win());
        }
        let last = game.make_move(Position::xy(2, 0), x).expect("legal");
        assert!(last.is_win());
        assert_eq!(last.longest_line(), 5);
    }

    #[test]
    fn test_winning_length_shorter_than_side() {
        let mut game = Game2D::with_options(7, 2, 4);
        let outcomes = play_all(
            &mut game,
            &[(0, 0), (6, 6), (1, 1), (6, 5), (2, 2), (6, 4), (3, 3)],
        );
        assert!(outcomes[6].is_win());
        assert_eq!(game.winner(), Some(Player::X));
    }

    #[test]
    fn test_three_players() {
        let mut game = Game2D::with_options(4, 3, 3);
        let symbols: String = game.players().iter().map(|p| p.symbol()).collect();
        assert_eq!(symbols, "ABC");

        // A . B C
        // A B C .
        // A . . .
        let outcomes = play_all(
            &mut game,
            &[(0, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1), (0, 2)],
        );
        let order: Vec<usize> = outcomes.iter().map(|o| o.player().index()).collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(game.winner(), Some(Player::numbered(0)));
    }

    #[test]
    fn test_prepare_roster() {
        let mut game = classic_game();
        game.play(Position::xy(0, 0)).expect("legal");

        assert_eq!(game.prepare_roster(1).len(), MIN_NUMBER_OF_PLAYERS);
        assert_eq!(game.turn_state(), TurnState::NotStarted);
        assert_eq!(game.active_player(), None);
        assert!(game.is_ready());

        let first = game.play(Position::xy(1, 1)).expect("first move of the new roster");
        assert_eq!(first.player(), Player::X);
        assert_eq!(game.active_player(), Some(Player::O));

        assert_eq!(game.prepare_roster(usize::MAX).len(), MAX_NUMBER_OF_PLAYERS);
        assert_eq!(game.config().number_of_players, MAX_NUMBER_OF_PLAYERS);
    }

    #[test]
    fn test_prepare_starts_over() {
        let mut game = classic_game();
        play_all(&mut game, &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        game.prepare(GameConfig::new(4));
        assert!(game.is_ready());
        assert!(game.is_active());
        assert_eq!(game.board().side_length(), 4);
        assert_eq!(game.active_player(), Some(Player::X));
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = classic_game();
        let second = classic_game();
        first.play(Position::xy(0, 0)).expect("legal");
        assert_eq!(first.active_player(), Some(Player::O));
        assert_eq!(second.active_player(), Some(Player::X));
    }

    #[test]
    fn test_3d_space_diagonal_wins() {
        init_logging();
        let mut game = Game3D::new(GameConfig::new(3));
        let moves = [(0, 0, 0), (0, 0, 1), (1, 1, 1), (0, 0, 2), (2, 2, 2)];
        let mut last = None;
        for (x, y, z) in moves {
            last = Some(game.play(Position::xyz(x, y, z)).expect("legal"));
        }
        assert!(last.is_some_and(|o| o.is_win()));
        assert_eq!(game.winner(), Some(Player::X));
    }

    #[test]
    fn test_config_is_clamped() {
        let game = Game2D::with_options(1, 0, 99);
        assert_eq!(game.board().side_length(), 2);
        assert_eq!(game.players().len(), 2);
        assert_eq!(game.winning_length(), 2);
    }

    #[test]
    fn test_display() {
        let mut game = classic_game();
        play_all(&mut game, &[(1, 1), (0, 0)]);
        assert_eq!(
            game.to_string(),
            "Game(active: X, outcome: in progress)\nO . .\n. X .\n. . .\n"
        );
    }
}
