use std::fmt::{Display, Formatter};

pub(crate) type Coord = ndarray::Ix;

/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
///
/// The derived ordering is row-major, which is the order islands must be added to a
/// [`BoardBuilder`](crate::BoardBuilder).
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row, counted from the top.
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, counted from the left.
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    // position in a row-major array with `cols` columns
    pub(crate) fn flat_index(&self, cols: Coord) -> usize {
        self.0 * cols + self.1
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
