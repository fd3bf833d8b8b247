use strum::Display;
use thiserror::Error;

use crate::location::{Coord, Location};

/// Broad classes of [`BuildError`], for callers which only care why a puzzle was refused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The puzzle text asked for something no island can hold.
    MalformedInput,
    /// An island was placed somewhere it cannot go.
    InvalidPlacement,
    /// A table sized by [`Capacity`](crate::Capacity) ran out.
    CapacityExceeded,
}

/// The tables bounded by a [`Capacity`](crate::Capacity).
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Table {
    /// Islands on the board.
    Islands,
    /// Connections between neighbouring islands.
    Connections,
    /// Pairs of crossing connections.
    Crossings,
    /// The visited bitmap of the connectivity check.
    Visited,
}

/// Reasons a [`BoardBuilder`](crate::BoardBuilder) refuses to produce a board.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[allow(missing_docs)]
pub enum BuildError {
    /// An island expects a number of bridges outside `1..=8`.
    #[error("island at {location} expects {expected} bridges, but an island holds between 1 and 8")]
    BadBridgeCount { location: Location, expected: u8 },
    /// Two islands share a location.
    #[error("island at {location} was already placed")]
    Duplicate { location: Location },
    /// Islands were not supplied in row-major order.
    #[error("island at {location} comes before {previous} in row-major order")]
    OutOfOrder { location: Location, previous: Location },
    /// A row or column is at least [`Capacity::max_coordinate`](crate::Capacity::max_coordinate).
    #[error("island at {location} is beyond the largest coordinate allowed ({max})")]
    OutOfBounds { location: Location, max: Coord },
    /// One of the tables bounded by [`Capacity`](crate::Capacity) is full.
    #[error("{table} capacity of {capacity} exhausted")]
    CapacityExceeded { table: Table, capacity: usize },
}

impl BuildError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadBridgeCount { .. } => ErrorKind::MalformedInput,
            Self::Duplicate { .. } | Self::OutOfOrder { .. } | Self::OutOfBounds { .. } => ErrorKind::InvalidPlacement,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }
}
