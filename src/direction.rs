use strum::VariantArray;

/// The four directions a bridge may leave an island in.
///
/// The discriminants double as slot indices into an island's neighbour table.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Down,
}

impl Direction {
    /// The directions an island is responsible for while searching, in the order they are filled.
    ///
    /// Islands are visited in row-major order, so anything [`Up`](Self::Up) or [`Left`](Self::Left) of an island has
    /// already been settled by the time the island itself is considered.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}
