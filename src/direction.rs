use std::fmt;

/// A unit step on a `D`-dimensional board: every component is -1, 0 or +1.
///
/// The all-zero vector is kept as the [`Direction::NONE`] sentinel so that
/// [`Direction::opposite`] stays total; [`Direction::all`] never yields it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction<const D: usize> {
    steps: [i8; D],
}

impl<const D: usize> Direction<D> {
    pub const NONE: Self = Direction { steps: [0; D] };

    /// `None` if any component lies outside `-1..=1`.
    pub fn from_steps(steps: [i8; D]) -> Option<Self> {
        steps
            .iter()
            .all(|step| (-1..=1).contains(step))
            .then_some(Direction { steps })
    }

    #[inline]
    pub fn steps(&self) -> [i8; D] {
        self.steps
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.steps.iter().all(|&step| step == 0)
    }

    #[inline]
    pub fn opposite(&self) -> Self {
        let mut steps = self.steps;
        for step in steps.iter_mut() {
            *step = -*step;
        }
        Direction { steps }
    }

    /// Number of directions yielded by [`Direction::all`]: 8 in 2D, 26 in 3D.
    pub const fn count() -> usize {
        3usize.pow(D as u32) - 1
    }

    /// Every non-zero direction, in a fixed order.
    ///
    /// Directions are the base-3 digits of `0..3^D` mapped onto `-1, 0, +1`,
    /// axis 0 first; the zero vector sits in the middle and is skipped.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..3usize.pow(D as u32))
            .map(|code| {
                let mut steps = [0i8; D];
                let mut rest = code;
                for step in steps.iter_mut() {
                    *step = (rest % 3) as i8 - 1;
                    rest /= 3;
                }
                Direction { steps }
            })
            .filter(|direction| !direction.is_none())
    }
}

impl Direction<2> {
    pub const XM_Y0: Self = Direction { steps: [-1, 0] };
    pub const XP_Y0: Self = Direction { steps: [1, 0] };
    pub const X0_YM: Self = Direction { steps: [0, -1] };
    pub const X0_YP: Self = Direction { steps: [0, 1] };
    pub const XM_YM: Self = Direction { steps: [-1, -1] };
    pub const XP_YP: Self = Direction { steps: [1, 1] };
    pub const XM_YP: Self = Direction { steps: [-1, 1] };
    pub const XP_YM: Self = Direction { steps: [1, -1] };
}

impl<const D: usize> fmt::Display for Direction<D> {
    /// Axis-by-axis form such as `XpYm` or `X0YpZm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const AXIS_NAMES: [char; 3] = ['X', 'Y', 'Z'];
        for (i, step) in self.steps.iter().enumerate() {
            let sign = match step {
                -1 => "m",
                1 => "p",
                _ => "0",
            };
            match AXIS_NAMES.get(i) {
                Some(name) => write!(f, "{}{}", name, sign)?,
                None => write!(f, "A{}{}", i, sign)?,
            }
        }
        Ok(())
    }
}
