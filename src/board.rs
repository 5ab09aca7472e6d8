use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::direction::Direction;
use crate::player::{Player, SYMBOL_FOR_ABSENT_MARK};
use crate::position::Position;

pub const MIN_GAME_FIELD_SIDE_SIZE: usize = 2;
pub const MAX_GAME_FIELD_SIDE_SIZE: usize = 1000;
pub const CLASSIC_SIDE_SIZE: usize = 3;

/// Clamps a requested side length into the supported range.
pub fn clamp_side_length(side_length: usize) -> usize {
    let clamped = side_length.clamp(MIN_GAME_FIELD_SIDE_SIZE, MAX_GAME_FIELD_SIDE_SIZE);
    if clamped != side_length {
        debug!(requested = side_length, clamped, "side length clamped");
    }
    clamped
}

/// The field of one game session.
///
/// Only occupied cells are stored; a missing key is an empty cell. Every key
/// is valid for `side_length` and cells are never removed during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board<const D: usize = 2> {
    side_length: usize,
    marks: HashMap<Position<D>, Player>,
}

pub type Board2D = Board<2>;
pub type Board3D = Board<3>;

impl<const D: usize> Board<D> {
    pub fn new(side_length: usize) -> Self {
        Board {
            side_length: clamp_side_length(side_length),
            marks: HashMap::new(),
        }
    }

    pub fn classic() -> Self {
        Self::new(CLASSIC_SIDE_SIZE)
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn cell_count(&self) -> usize {
        self.side_length.pow(D as u32)
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_full(&self) -> bool {
        self.marks.len() >= self.cell_count()
    }

    /// True when the board is empty and correctly sized, so a new game can start on it.
    pub fn is_ready(&self) -> bool {
        (MIN_GAME_FIELD_SIDE_SIZE..=MAX_GAME_FIELD_SIDE_SIZE).contains(&self.side_length)
            && self.marks.is_empty()
    }

    pub fn contains(&self, position: &Position<D>) -> bool {
        position.is_valid_on(self.side_length)
    }

    pub fn mark_at(&self, position: &Position<D>) -> Option<Player> {
        self.marks.get(position).copied()
    }

    /// Places `player`'s mark on an empty cell.
    ///
    /// Returns `false` and leaves the board unchanged when the cell is already
    /// taken or lies outside the board.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn place(&mut self, position: Position<D>, player: Player) -> bool {
        if !self.contains(&position) {
            debug!(%position, %player, side_length = self.side_length, "mark outside the board");
            return false;
        }
        if let Some(occupant) = self.marks.get(&position) {
            debug!(%position, %player, %occupant, "attempting to set a mark on an occupied cell");
            return false;
        }
        self.marks.insert(position, player);
        true
    }

    /// Removes every mark, keeping the side length.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Occupied cells in no particular order.
    pub fn marks(&self) -> impl Iterator<Item = (&Position<D>, &Player)> {
        self.marks.iter()
    }

    /// Every cell of the board, axis 0 changing fastest.
    pub fn positions(&self) -> impl Iterator<Item = Position<D>> + '_ {
        (0..self.cell_count()).map(move |index| Position::from_index(index, self.side_length))
    }

    /// Marks of every cell in [`Board::positions`] order.
    pub fn snapshot(&self) -> Vec<Option<Player>> {
        self.positions().map(|pos| self.mark_at(&pos)).collect()
    }

    /// Length of the longest same-player line passing through `position`.
    ///
    /// `None` when the cell is empty. `Some(0)` when the mark has no
    /// same-player neighbour in any direction; otherwise the line length
    /// counted in both directions, so a mark that joins two segments reports
    /// their combined length.
    #[instrument(level = "trace", skip(self), fields(position = %position))]
    pub fn longest_line_through(&self, position: &Position<D>) -> Option<usize> {
        let player = self.mark_at(position)?;
        let longest = self
            .line_directions(position, player)
            .into_iter()
            .map(|direction| self.measure_full_length(position, direction))
            .max()
            .unwrap_or(0);
        trace!(%player, longest, "longest line measured");
        Some(longest)
    }

    /// Directions in which `position` has an adjacent mark of `player`.
    pub fn line_directions(&self, position: &Position<D>, player: Player) -> Vec<Direction<D>> {
        if !self.contains(position) {
            return Vec::new();
        }
        Direction::all()
            .filter(|&direction| {
                let found = position
                    .next_within(direction, self.side_length)
                    .is_some_and(|next| self.mark_at(&next) == Some(player));
                if found {
                    trace!(%position, %direction, "line exists in direction");
                }
                found
            })
            .collect()
    }

    fn measure_full_length(&self, start: &Position<D>, direction: Direction<D>) -> usize {
        // `direction` was detected, so the neighbour exists and shares the mark.
        match start.next_within(direction, self.side_length) {
            Some(neighbor) => {
                let length = self.measure_line_from(&neighbor, direction, 2)
                    + self.measure_line_from(start, direction.opposite(), 0);
                trace!(%start, %direction, length, "full line length");
                length
            }
            None => 0,
        }
    }

    /// Walks from `start` in `direction` while the next cell holds the same
    /// player as the current one, adding one to `starting_length` per step.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn measure_line_from(
        &self,
        start: &Position<D>,
        direction: Direction<D>,
        starting_length: usize,
    ) -> usize {
        if direction.is_none() || !self.contains(start) {
            return starting_length;
        }
        let mut length = starting_length;
        let mut current = *start;
        while let Some(next) = current.next_within(direction, self.side_length) {
            if !self.belong_to_the_same_player(&current, &next) {
                break;
            }
            current = next;
            length += 1;
        }
        length
    }

    fn belong_to_the_same_player(&self, given: &Position<D>, spot: &Position<D>) -> bool {
        match (self.marks.get(given), self.marks.get(spot)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for Board<2> {
    fn default() -> Self {
        Self::classic()
    }
}

/// One row per line, cells separated by spaces, `.` for empty cells.
/// 3D boards print each z-layer as its own block.
impl<const D: usize> fmt::Display for Board<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side_length;
        let layer = side * side;
        let cells = self.cell_count();
        for (index, pos) in self.positions().enumerate() {
            let symbol = self
                .mark_at(&pos)
                .map_or(SYMBOL_FOR_ABSENT_MARK, |player| player.symbol());
            write!(f, "{}", symbol)?;

            if (index + 1) % side != 0 {
                write!(f, " ")?;
                continue;
            }
            writeln!(f)?;
            if D > 2 && (index + 1) % layer == 0 && index + 1 < cells {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
