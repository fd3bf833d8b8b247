use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::{Dfs, EdgeFiltered};
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::location::Location;
use crate::render;
use crate::solver::Solution;

/// Most bridges a single connection may carry.
pub(crate) const MAX_CONNECTION_BRIDGES: u8 = 2;
/// Most bridges an island may ask for, i.e. a double bridge in every direction.
pub const MAX_EXPECTED_BRIDGES: u8 = MAX_CONNECTION_BRIDGES * 4;

/// What lies in one direction from an island.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Link {
    /// The nearest island that way, and the connection shared with it.
    Island { island: NodeIndex, connection: EdgeIndex },
    #[default]
    Outside,
}

impl Link {
    pub(crate) fn island(self) -> Option<NodeIndex> {
        match self {
            Link::Island { island, .. } => Some(island),
            Link::Outside => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Island {
    pub(crate) location: Location,
    pub(crate) expected: u8,
    // bridges still to be placed; never above `expected`
    pub(crate) pending: u8,
    // indexed by `Direction::slot`
    pub(crate) links: [Link; 4],
}

impl Island {
    pub(crate) fn new(location: Location, expected: u8) -> Self {
        Self {
            location,
            expected,
            pending: expected,
            links: Default::default(),
        }
    }

    pub(crate) fn link(&self, direction: Direction) -> Link {
        self.links[direction.slot()]
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Connection {
    pub(crate) bridges: u8,
    // connections which may not carry bridges while this one does, and vice versa
    pub(crate) crossings: Vec<EdgeIndex>,
}

// stands in for every connection leading off the board; nothing ever mutates it
static OUTSIDE: Connection = Connection {
    bridges: 0,
    crossings: Vec::new(),
};

/// A Hashiwokakero board: islands in row-major order, the connections between neighbouring islands and which of
/// those connections cross.
///
/// [`Board`]s are made with a [`BoardBuilder`](crate::BoardBuilder) or parsed from text with [`str::parse`].
/// Searching (see [`Board::for_each_solution`]) mutates bridge counts in place but always leaves the board as it
/// found it.
pub struct Board {
    // node indices follow row-major order; lookups below depend on it
    pub(crate) graph: UnGraph<Island, Connection>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) visited: Array2<bool>,
    pub(crate) crossings: usize,
    pub(crate) connection_index: HashMap<UnorderedPair<Location>, EdgeIndex>,
}

impl Board {
    /// Number of rows spanned by islands.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns spanned by islands.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of islands.
    pub fn island_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of connections, i.e. pairs of islands which may be bridged.
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of pairs of connections which cross one another.
    pub fn crossing_count(&self) -> usize {
        self.crossings
    }

    /// The locations of all islands, in row-major order.
    pub fn islands(&self) -> impl Iterator<Item = Location> + '_ {
        self.graph.raw_nodes().iter().map(|node| node.weight.location)
    }

    pub(crate) fn island_at(&self, location: Location) -> Option<NodeIndex> {
        self.graph.raw_nodes()
            .binary_search_by_key(&location, |node| node.weight.location)
            .ok()
            .map(NodeIndex::new)
    }

    pub(crate) fn connection(&self, link: Link) -> &Connection {
        match link {
            Link::Island { connection, .. } => &self.graph[connection],
            Link::Outside => &OUTSIDE,
        }
    }

    /// The number of bridges the island at `location` expects, if there is one.
    pub fn expected_at(&self, location: Location) -> Option<u8> {
        self.island_at(location).map(|island| self.graph[island].expected)
    }

    /// The nearest island from `location` in `direction`, if there is an island at `location` and one that way.
    pub fn neighbor(&self, location: Location, direction: Direction) -> Option<Location> {
        let island = self.island_at(location)?;
        self.graph[island].link(direction).island().map(|other| self.graph[other].location)
    }

    /// The bridges currently between the islands at `a` and `b`, or [`None`] if they are not neighbours.
    pub fn bridges_between(&self, a: Location, b: Location) -> Option<u8> {
        self.connection_index.get(&UnorderedPair(a, b)).map(|connection| self.graph[*connection].bridges)
    }

    /// Whether the connection joining the pair `a` crosses the one joining `b`, so that at most one of them may carry
    /// bridges. Pairs which are not neighbours cross nothing.
    pub fn crosses(&self, a: UnorderedPair<Location>, b: UnorderedPair<Location>) -> bool {
        match (self.connection_index.get(&a), self.connection_index.get(&b)) {
            (Some(first), Some(second)) => self.graph[*first].crossings.contains(second),
            _ => false,
        }
    }

    /// Check the current bridges against every rule: all islands complete, no occupied crossings, one connected
    /// group.
    ///
    /// This walks the graph independently of the search and so also serves as a check on it.
    pub fn is_solved(&self) -> bool {
        let complete = self.graph.raw_nodes().iter().map(|node| &node.weight).all(|island| {
            let placed: u8 = Direction::VARIANTS.iter()
                .map(|direction| self.connection(island.link(*direction)).bridges)
                .sum();
            island.pending == 0 && placed == island.expected
        });

        let uncrossed = self.graph.raw_edges().iter()
            .map(|edge| &edge.weight)
            .filter(|connection| connection.bridges > 0)
            .all(|connection| connection.crossings.iter().all(|other| self.graph[*other].bridges == 0));

        let Some(start) = self.graph.node_indices().next() else {
            return complete && uncrossed;
        };
        let bridged = EdgeFiltered::from_fn(&self.graph, |edge| edge.weight().bridges > 0);
        let mut dfs = Dfs::new(&bridged, start);
        let mut reached = 0;
        while dfs.next(&bridged).is_some() {
            reached += 1;
        }

        complete && uncrossed && reached == self.island_count()
    }

    /// Record the current bridges.
    pub fn snapshot(&self) -> Solution {
        Solution::from_connections(self.graph.edge_indices().filter_map(|connection| {
            let (a, b) = self.graph.edge_endpoints(connection)?;
            Some((self.graph[a].location, self.graph[b].location, self.graph[connection].bridges))
        }))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render::print(&render::to_array(self)))
    }
}
