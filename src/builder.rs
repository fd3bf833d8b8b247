//! Turning a list of islands into a [`Board`], checking every placement and table limit on the way.

use std::collections::HashMap;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace, warn};
use unordered_pair::UnorderedPair;

use crate::board::{Board, Connection, Island, Link, MAX_EXPECTED_BRIDGES};
use crate::config::Capacity;
use crate::direction::Direction;
use crate::error::{BuildError, Table};
use crate::location::Location;

/// Builds a [`Board`] one island at a time.
///
/// Islands must be added in row-major order: top to bottom, and left to right within a row.
/// The first mistake puts the builder in an invalid state; from then on, adding islands does nothing and
/// [`build`](Self::build) reports that mistake.
///
/// ```
/// use hashi::{BoardBuilder, Location};
///
/// let mut builder = BoardBuilder::default();
/// builder.add_island(Location(0, 0), 1).add_island(Location(0, 2), 1);
/// let mut board = builder.build().unwrap();
/// assert_eq!(board.count_solutions(), 1);
/// ```
#[derive(Clone)]
pub struct BoardBuilder {
    capacity: Capacity,
    graph: UnGraph<Island, Connection>,
    rows: usize,
    cols: usize,
    crossings: usize,
    invalid_reason: Option<BuildError>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_capacity(Capacity::default())
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] whose tables are limited by `capacity`.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            capacity,
            // tables grow as islands arrive; `capacity` only bounds them
            graph: UnGraph::default(),
            rows: 0,
            cols: 0,
            crossings: 0,
            invalid_reason: None,
        }
    }

    /// Add an island at `location` which needs `expected` bridges.
    ///
    /// The island is immediately connected to its nearest neighbours to the left and above, and any connections
    /// which the new vertical connection crosses are recorded.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_island(&mut self, location: Location, expected: u8) -> &mut Self {
        if self.invalid_reason.is_some() {
            return self;
        }

        if let Err(reason) = self.try_add_island(location, expected) {
            warn!(%reason, "refusing island");
            self.invalid_reason = Some(reason);
        }

        self
    }

    /// Returns `None` if the builder is valid, or the reason it became invalid otherwise.
    pub fn invalid_reason(&self) -> Option<&BuildError> {
        self.invalid_reason.as_ref()
    }

    /// Convert the state of this builder into a [`Board`].
    ///
    /// Besides any error met while adding islands, this fails if the visited bitmap cannot cover every cell.
    pub fn build(self) -> Result<Board, BuildError> {
        if let Some(reason) = self.invalid_reason {
            return Err(reason);
        }

        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= self.capacity.visited => {}
            cells => {
                warn!(?cells, rows = self.rows, cols = self.cols, capacity = self.capacity.visited, "visited bitmap too small");
                return Err(BuildError::CapacityExceeded { table: Table::Visited, capacity: self.capacity.visited });
            }
        }

        let connection_index: HashMap<_, _> = self.graph.edge_references()
            .map(|edge| (
                UnorderedPair(self.graph[edge.source()].location, self.graph[edge.target()].location),
                edge.id(),
            ))
            .collect();

        debug!(
            islands = self.graph.node_count(),
            connections = self.graph.edge_count(),
            crossings = self.crossings,
            rows = self.rows,
            cols = self.cols,
            "built board"
        );

        Ok(Board {
            graph: self.graph,
            rows: self.rows,
            cols: self.cols,
            visited: Array2::from_elem((self.rows, self.cols), false),
            crossings: self.crossings,
            connection_index,
        })
    }

    fn try_add_island(&mut self, location: Location, expected: u8) -> Result<(), BuildError> {
        if location.row() >= self.capacity.max_coordinate || location.col() >= self.capacity.max_coordinate {
            return Err(BuildError::OutOfBounds { location, max: self.capacity.max_coordinate });
        }

        if let Some(previous) = self.graph.raw_nodes().last().map(|node| node.weight.location) {
            if location == previous {
                return Err(BuildError::Duplicate { location });
            }
            if location < previous {
                return Err(BuildError::OutOfOrder { location, previous });
            }
        }

        if !(1..=MAX_EXPECTED_BRIDGES).contains(&expected) {
            return Err(BuildError::BadBridgeCount { location, expected });
        }

        if self.graph.node_count() >= self.capacity.islands {
            return Err(BuildError::CapacityExceeded { table: Table::Islands, capacity: self.capacity.islands });
        }

        let island = self.graph.add_node(Island::new(location, expected));
        self.rows = self.rows.max(location.row() + 1);
        self.cols = self.cols.max(location.col() + 1);
        trace!(%location, expected, "added island");

        if let Some(left) = self.nearest(island, Direction::Left) {
            self.connect(left, island, Direction::Right)?;
        }

        if let Some(up) = self.nearest(island, Direction::Up) {
            let vertical = self.connect(up, island, Direction::Down)?;
            self.register_crossings(up, island, vertical)?;
        }

        Ok(())
    }

    /// Find the closest island already added in `direction` from `island`.
    /// Only [`Left`](Direction::Left) and [`Up`](Direction::Up) make sense, since nothing after `island` exists yet.
    fn nearest(&self, island: NodeIndex, direction: Direction) -> Option<NodeIndex> {
        let location = self.graph[island].location;
        let mut earlier = (0..island.index()).rev().map(NodeIndex::new);

        match direction {
            // only the island immediately before can share the row
            Direction::Left => earlier.next().filter(|other| self.graph[*other].location.row() == location.row()),
            Direction::Up => earlier.find(|other| self.graph[*other].location.col() == location.col()),
            Direction::Right | Direction::Down => None,
        }
    }

    /// Create the connection from `from` to `to`, where `to` lies in `direction` from `from`, and link both islands
    /// to it.
    fn connect(&mut self, from: NodeIndex, to: NodeIndex, direction: Direction) -> Result<EdgeIndex, BuildError> {
        if self.graph.edge_count() >= self.capacity.connections {
            return Err(BuildError::CapacityExceeded { table: Table::Connections, capacity: self.capacity.connections });
        }

        let connection = self.graph.add_edge(from, to, Connection::default());
        self.graph[from].links[direction.slot()] = Link::Island { island: to, connection };
        self.graph[to].links[direction.invert().slot()] = Link::Island { island: from, connection };

        trace!(from = %self.graph[from].location, to = %self.graph[to].location, "connected");
        Ok(connection)
    }

    /// Record every horizontal connection which the new `vertical` connection from `up` down to `down` crosses.
    ///
    /// Such a connection must start from an island in a row strictly between the two, left of the vertical, and end
    /// right of it. Those islands all come between `up` and `down` in row-major order and have all their neighbours
    /// to the right already.
    fn register_crossings(&mut self, up: NodeIndex, down: NodeIndex, vertical: EdgeIndex) -> Result<(), BuildError> {
        let col = self.graph[up].location.col();
        let (top, bottom) = (self.graph[up].location.row(), self.graph[down].location.row());

        let crossed = (up.index() + 1..down.index())
            .map(NodeIndex::new)
            .filter(|between| {
                let location = self.graph[*between].location;
                location.row() > top && location.row() < bottom && location.col() < col
            })
            .filter_map(|between| match self.graph[between].link(Direction::Right) {
                Link::Island { island: right, connection } if self.graph[right].location.col() > col => Some(connection),
                _ => None,
            })
            .collect_vec();

        for horizontal in crossed {
            if self.crossings >= self.capacity.crossings {
                return Err(BuildError::CapacityExceeded { table: Table::Crossings, capacity: self.capacity.crossings });
            }

            self.graph[vertical].crossings.push(horizontal);
            self.graph[horizontal].crossings.push(vertical);
            self.crossings += 1;
        }

        Ok(())
    }
}
