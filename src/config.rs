use crate::location::Coord;

/// Upper bounds on the tables a board is built into.
///
/// Building fails with [`BuildError::CapacityExceeded`](crate::BuildError::CapacityExceeded) as soon as any of these
/// runs out, before any searching happens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Capacity {
    /// Number of islands.
    pub islands: usize,
    /// Number of connections between neighbouring islands.
    pub connections: usize,
    /// Number of crossing (vertical, horizontal) connection pairs.
    pub crossings: usize,
    /// Cells in the visited bitmap used by the connectivity check; must cover `rows * cols`.
    pub visited: usize,
    /// Rows and columns must be strictly below this.
    pub max_coordinate: Coord,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            islands: 150,
            connections: 300,
            crossings: 150,
            visited: 10_000,
            max_coordinate: 127,
        }
    }
}

impl Capacity {
    /// The smallest capacity guaranteed to hold any puzzle of `rows` by `cols`.
    pub fn for_grid(rows: usize, cols: usize) -> Self {
        let cells = rows.saturating_mul(cols);
        Self {
            islands: cells,
            // every connection is the right or down connection of exactly one island
            connections: cells.saturating_mul(2),
            // a crossing pins one empty cell, and a cell lies under at most one connection each way
            crossings: cells,
            visited: cells,
            max_coordinate: rows.max(cols),
        }
    }

    /// [`Self::for_grid`] using the extent of the islands in puzzle `text`.
    pub fn for_text(text: &str) -> Self {
        let (rows, cols) = crate::parse::island_extent(text);
        Self::for_grid(rows, cols)
    }
}
