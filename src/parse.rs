//! The puzzle text format.
//!
//! Each character is one cell of a row: `.` or `0` for open water and `1` to `9` for an island expecting that many
//! bridges. A `/` or a line break starts the next row. Anything else is skipped, so `2.2/.../2.2` and the same grid
//! written over three lines describe the same puzzle.

use std::str::FromStr;

use crate::board::Board;
use crate::builder::BoardBuilder;
use crate::error::BuildError;
use crate::location::Location;

/// Walk `text`, yielding every island with the number of bridges it expects.
fn islands(text: &str) -> impl Iterator<Item = (Location, u8)> + '_ {
    text.chars().scan(Location(0, 0), |cursor, c| {
        Some(match c {
            '/' | '\n' => {
                *cursor = Location(cursor.row() + 1, 0);
                None
            }
            '.' | '0' => {
                cursor.1 += 1;
                None
            }
            '1'..='9' => {
                let island = (*cursor, c as u8 - b'0');
                cursor.1 += 1;
                Some(island)
            }
            _ => None,
        })
    }).flatten()
}

/// Rows and columns spanned by the islands in `text`.
pub(crate) fn island_extent(text: &str) -> (usize, usize) {
    islands(text).fold((0, 0), |(rows, cols), (location, _)| {
        (rows.max(location.row() + 1), cols.max(location.col() + 1))
    })
}

impl BoardBuilder {
    /// Add every island described by puzzle `text`.
    ///
    /// `.` or `0` is open water, `1` to `9` an island, and `/` or a line break starts a new row; other characters are
    /// ignored. A `9` is passed on like any other digit and so makes the builder invalid.
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        for (location, expected) in islands(text) {
            self.add_island(location, expected);
        }

        self
    }
}

impl FromStr for Board {
    type Err = BuildError;

    /// Parse a puzzle with the default [`Capacity`](crate::Capacity).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = BoardBuilder::default();
        builder.add_text(s);
        builder.build()
    }
}
