#![warn(missing_docs)]

//! # `hashi`
//!
//! Finds every solution of a [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero) ("bridges") puzzle.
//! Begin by building a board with a [`BoardBuilder`], or parse one from text with [`str::parse`].
//! Then enumerate its solutions with [`Board::for_each_solution`], or collect them with [`Board::solutions`].
//!
//! ```
//! use hashi::{Board, Location};
//!
//! let mut board: Board = "2.3/.../1.2".parse().unwrap();
//! let solutions = board.solutions();
//! assert_eq!(solutions.len(), 2);
//! assert!(solutions.iter().all(|solution| solution.total_bridges() == 4));
//! assert_eq!(solutions[0].bridges_between(Location(0, 0), Location(0, 2)), 2);
//! ```
//!
//! # Rules
//! Islands sit on a rectangular grid, each showing how many bridges must end on it. Bridges run horizontally or
//! vertically between two islands with nothing in between, at most two between any pair. Bridges may not cross,
//! and all islands must end up joined into one group.
//!
//! # Internals
//! A board is an undirected graph: islands are vertices and every pair of islands which could be bridged, a
//! "connection", is an edge. While building, each connection also records the connections which cross it.
//!
//! The search is a plain backtracking search with no deduction. Islands are taken in row-major order, and each only
//! decides its bridges to the right and downwards. All bridge changes go through two primitives which refuse
//! anything breaking a rule, so every complete assignment found already satisfies every rule but connectivity,
//! which is checked last.

pub use board::{Board, MAX_EXPECTED_BRIDGES};
pub use builder::BoardBuilder;
pub use config::Capacity;
pub use direction::Direction;
pub use error::{BuildError, ErrorKind, Table};
pub use location::Location;
pub use solver::{SearchStats, Solution};

pub(crate) mod board;
mod tests;
pub(crate) mod bridges;
pub(crate) mod location;
pub(crate) mod direction;
pub(crate) mod cell;
pub(crate) mod render;
pub(crate) mod connectivity;
pub(crate) mod parse;
pub mod builder;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod solver;
