pub mod board;
pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod outcome;
pub mod player;
pub mod position;
pub mod roster;

#[cfg(feature = "serde")]
pub mod serde_support;


#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn attt(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use python_bindings::*;
    m.add_class::<PyGame>()?;
    m.add("MIN_GAME_FIELD_SIDE_SIZE", board::MIN_GAME_FIELD_SIDE_SIZE)?;
    m.add("MAX_GAME_FIELD_SIDE_SIZE", board::MAX_GAME_FIELD_SIDE_SIZE)?;
    m.add("MIN_NUMBER_OF_PLAYERS", player::MIN_NUMBER_OF_PLAYERS)?;
    m.add("MAX_NUMBER_OF_PLAYERS", player::MAX_NUMBER_OF_PLAYERS)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;
    use crate::position::Position;

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        #[pyo3(signature = (side_length=3, players=2, winning_length=None))]
        pub fn new(side_length: usize, players: usize, winning_length: Option<usize>) -> Self {
            let config = GameConfig::new(side_length)
                .with_players(players)
                .with_winning_length(winning_length.unwrap_or(side_length));
            PyGame {
                game: Game::new(config),
            }
        }

        #[staticmethod]
        pub fn classic() -> Self {
            PyGame {
                game: Game::classic(),
            }
        }

        pub fn side_length(&self) -> usize {
            self.game.board().side_length()
        }

        pub fn winning_length(&self) -> usize {
            self.game.winning_length()
        }

        pub fn players(&self) -> Vec<char> {
            self.game.players().iter().map(|p| p.symbol()).collect()
        }

        /// Moves for the active player; `False` when the move was not made.
        pub fn make_move(&mut self, x: i32, y: i32) -> bool {
            self.game.play(Position::xy(x, y)).is_ok()
        }

        pub fn mark_at(&self, x: i32, y: i32) -> Option<char> {
            self.game.mark_at(&Position::xy(x, y)).map(|p| p.symbol())
        }

        pub fn active_player(&self) -> Option<char> {
            self.game.active_player().map(|p| p.symbol())
        }

        pub fn is_active(&self) -> bool {
            self.game.is_active()
        }

        pub fn is_ready(&self) -> bool {
            self.game.is_ready()
        }

        pub fn winner(&self) -> Option<char> {
            self.game.winner().map(|p| p.symbol())
        }

        /// Longest line through the most recent mark.
        pub fn longest_line(&self) -> Option<usize> {
            self.game.last_move().map(|m| m.longest_line())
        }

        pub fn move_count(&self) -> usize {
            self.game.move_count()
        }

        pub fn snapshot(&self) -> Vec<Option<char>> {
            self.game
                .board()
                .snapshot()
                .into_iter()
                .map(|cell| cell.map(|p| p.symbol()))
                .collect()
        }

        pub fn clone(&self) -> PyGame {
            PyGame {
                game: self.game.clone(),
            }
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(side_length={}, players={}, winning_length={}, active={})",
                self.game.board().side_length(),
                self.game.players().len(),
                self.game.winning_length(),
                self.game.is_active()
            )
        }
    }
}
