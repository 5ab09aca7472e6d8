use std::fmt;
use std::str::FromStr;

use crate::direction::Direction;
use crate::error::ParsePositionError;

/// A cell on a `D`-dimensional board.
///
/// Axes are signed so that stepping off an edge produces an invalid position
/// instead of wrapping around; validity is always checked against a board
/// side length, never assumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position<const D: usize> {
    axes: [i32; D],
}

pub type Position2D = Position<2>;
pub type Position3D = Position<3>;

impl<const D: usize> Position<D> {
    pub const fn from_axes(axes: [i32; D]) -> Self {
        Position { axes }
    }

    pub fn axes(&self) -> [i32; D] {
        self.axes
    }

    #[inline]
    pub fn axis(&self, index: usize) -> Option<i32> {
        self.axes.get(index).copied()
    }

    pub fn x(&self) -> i32 {
        self.axis(0).unwrap_or(0)
    }

    pub fn y(&self) -> i32 {
        self.axis(1).unwrap_or(0)
    }

    /// Adds each step of `direction` to the matching axis. No bounds checking;
    /// axes saturate at the `i32` limits.
    #[inline]
    pub fn offset(&self, direction: Direction<D>) -> Self {
        let steps = direction.steps();
        let mut axes = self.axes;
        for (axis, step) in axes.iter_mut().zip(steps) {
            *axis = axis.saturating_add(i32::from(step));
        }
        Position { axes }
    }

    /// Like [`Position::offset`], but `None` when an axis would overflow.
    #[inline]
    pub fn checked_offset(&self, direction: Direction<D>) -> Option<Self> {
        let steps = direction.steps();
        let mut axes = self.axes;
        for (axis, step) in axes.iter_mut().zip(steps) {
            *axis = axis.checked_add(i32::from(step))?;
        }
        Some(Position { axes })
    }

    #[inline]
    pub fn is_valid_on(&self, side_length: usize) -> bool {
        self.axes
            .iter()
            .all(|&axis| axis >= 0 && (axis as usize) < side_length)
    }

    /// The neighbour in `direction`, or `None` when it would fall off the board.
    #[inline]
    pub fn next_within(&self, direction: Direction<D>, side_length: usize) -> Option<Self> {
        self.checked_offset(direction)
            .filter(|next| next.is_valid_on(side_length))
    }

    /// Index into a row-major snapshot where axis 0 changes fastest.
    pub fn to_index(&self, side_length: usize) -> Option<usize> {
        if !self.is_valid_on(side_length) {
            return None;
        }
        let mut index = 0;
        for &axis in self.axes.iter().rev() {
            index = index * side_length + axis as usize;
        }
        Some(index)
    }

    /// Inverse of [`Position::to_index`]. A zero side length yields the origin.
    pub(crate) fn from_index(index: usize, side_length: usize) -> Self {
        let mut axes = [0; D];
        if side_length == 0 {
            return Position { axes };
        }
        let mut rest = index;
        for axis in axes.iter_mut() {
            *axis = (rest % side_length) as i32;
            rest /= side_length;
        }
        Position { axes }
    }
}

impl Position<2> {
    pub const fn xy(x: i32, y: i32) -> Self {
        Position { axes: [x, y] }
    }
}

impl Position<3> {
    pub const fn xyz(x: i32, y: i32, z: i32) -> Self {
        Position { axes: [x, y, z] }
    }

    pub fn z(&self) -> i32 {
        self.axes[2]
    }
}

impl From<(i32, i32)> for Position<2> {
    fn from((x, y): (i32, i32)) -> Self {
        Position::xy(x, y)
    }
}

impl From<(i32, i32, i32)> for Position<3> {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Position::xyz(x, y, z)
    }
}

impl<const D: usize> fmt::Display for Position<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, axis) in self.axes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", axis)?;
        }
        write!(f, ")")
    }
}

/// Parses `"x,y"` (or `"x,y,z"` in 3D); surrounding parentheses and spaces are ignored.
impl<const D: usize> FromStr for Position<D> {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != D {
            return Err(ParsePositionError::WrongAxisCount {
                expected: D,
                found: parts.len(),
            });
        }

        let mut axes = [0; D];
        for (axis, part) in axes.iter_mut().zip(parts) {
            *axis = part
                .parse()
                .map_err(|_| ParsePositionError::InvalidAxis {
                    value: part.to_string(),
                })?;
        }
        Ok(Position { axes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_has_no_bounds_checking() {
        let corner = Position::xy(0, 0);
        assert_eq!(corner.offset(Direction::XM_YM), Position::xy(-1, -1));
        assert_eq!(corner.offset(Direction::XP_Y0), Position::xy(1, 0));
    }

    #[test]
    fn test_is_valid_on() {
        assert!(Position::xy(0, 0).is_valid_on(3));
        assert!(Position::xy(2, 2).is_valid_on(3));
        assert!(!Position::xy(3, 0).is_valid_on(3));
        assert!(!Position::xy(0, -1).is_valid_on(3));
        assert!(Position::xyz(1, 2, 0).is_valid_on(3));
        assert!(!Position::xyz(1, 2, 3).is_valid_on(3));
    }

    #[test]
    fn test_next_within_stops_at_border() {
        assert_eq!(Position::xy(2, 1).next_within(Direction::XP_Y0, 3), None);
        assert_eq!(
            Position::xy(1, 1).next_within(Direction::XP_YP, 3),
            Some(Position::xy(2, 2))
        );
    }

    #[test]
    fn test_next_within_at_axis_limits() {
        let far = Position::xy(i32::MAX, 0);
        assert_eq!(far.next_within(Direction::XP_Y0, 3), None);
        assert_eq!(far.checked_offset(Direction::XP_YP), None);
        assert_eq!(far.offset(Direction::XP_Y0), far);
        assert_eq!(
            Position::xy(i32::MIN, 0).next_within(Direction::XM_Y0, 3),
            None
        );
    }

    #[test]
    fn test_from_index_with_zero_side() {
        assert_eq!(Position::<2>::from_index(7, 0), Position::xy(0, 0));
    }

    #[test]
    fn test_index_roundtrip_3d() {
        let pos = Position::xyz(1, 2, 3);
        let index = pos.to_index(4).expect("position is on a 4-sided board");
        assert_eq!(index, 1 + 2 * 4 + 3 * 16);
        assert_eq!(Position::<3>::from_index(index, 4), pos);
        assert_eq!(Position::xy(5, 0).to_index(4), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1,2".parse::<Position2D>(), Ok(Position::xy(1, 2)));
        assert_eq!(" (0, 1, 2) ".parse::<Position3D>(), Ok(Position::xyz(0, 1, 2)));
        assert_eq!(
            "1,2,3".parse::<Position2D>(),
            Err(ParsePositionError::WrongAxisCount {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            "1,b".parse::<Position2D>(),
            Err(ParsePositionError::InvalidAxis {
                value: "b".to_string()
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::xy(1, 2).to_string(), "(1, 2)");
        assert_eq!(Position::xyz(0, 1, 2).to_string(), "(0, 1, 2)");
    }
}
