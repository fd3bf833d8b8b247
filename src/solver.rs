use std::collections::BTreeMap;
use std::ops::ControlFlow;

use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use crate::board::Board;
use crate::location::Location;

/// The bridge count of every connection on a board at one moment, usually a solution.
///
/// Two [`Solution`]s are equal exactly when every pair of neighbouring islands carries the same number of bridges.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Solution {
    // keyed by (earlier, later) endpoint in row-major order
    bridges: BTreeMap<(Location, Location), u8>,
}

impl Solution {
    pub(crate) fn from_connections(connections: impl Iterator<Item = (Location, Location, u8)>) -> Self {
        Self {
            bridges: connections.map(|(a, b, bridges)| (ordered(a, b), bridges)).collect(),
        }
    }

    /// Bridges between the islands at `a` and `b`; `0` if they are not neighbours.
    pub fn bridges_between(&self, a: Location, b: Location) -> u8 {
        self.bridges.get(&ordered(a, b)).copied().unwrap_or(0)
    }

    /// Every connection as `(earlier, later, bridges)`, in row-major order of the earlier island.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Location, u8)> + '_ {
        self.bridges.iter().map(|((a, b), bridges)| (*a, *b, *bridges))
    }

    /// Total number of bridges placed.
    pub fn total_bridges(&self) -> usize {
        self.bridges.values().map(|bridges| *bridges as usize).sum()
    }
}

fn ordered(a: Location, b: Location) -> (Location, Location) {
    if a <= b { (a, b) } else { (b, a) }
}

/// What a search saw.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Complete assignments which formed one connected group and were handed to the visitor.
    pub solutions: usize,
    /// Complete assignments thrown away because the bridges formed more than one group.
    pub disconnected: usize,
    /// Whether the visitor stopped the search early.
    pub stopped: bool,
}

/// The bridges to the right of and below one island, held for as long as the search explores beneath this split.
///
/// Dropping it removes those bridges, so however the search leaves a frame the board is back to how the frame
/// found it.
struct ForwardSplit<'a> {
    board: &'a mut Board,
    island: NodeIndex,
}

impl<'a> ForwardSplit<'a> {
    fn fill(board: &'a mut Board, island: NodeIndex) -> Option<Self> {
        if board.fill_forward(island) {
            Some(Self { board, island })
        } else {
            None
        }
    }

    fn reorder(&mut self) -> bool {
        self.board.reorder_forward(self.island)
    }
}

impl Drop for ForwardSplit<'_> {
    fn drop(&mut self) {
        self.board.clear_forward(self.island);
    }
}

impl Board {
    /// Enumerate every solution, calling `visitor` with the board in each solved state.
    ///
    /// The visitor returns [`ControlFlow::Break`] to end the search early. Either way the board is left without any
    /// bridges afterwards. A board without islands has no solutions.
    ///
    /// # Method
    /// Islands are visited in row-major order. Each island is only responsible for its bridges to the right and
    /// downwards, since the ones to the left and upwards were decided by islands before it. It first takes as many
    /// bridges to the right as it can, then the rest downwards; after everything beneath that split has been
    /// explored, one bridge at a time moves from the right to downwards. Once all islands are complete, the
    /// assignment is kept only if the bridges join all islands together.
    pub fn for_each_solution<F>(&mut self, mut visitor: F) -> SearchStats
    where
        F: FnMut(&Board) -> ControlFlow<()>,
    {
        let mut stats = SearchStats::default();
        if self.island_count() > 0 {
            stats.stopped = self.search_from(0, &mut stats, &mut visitor).is_break();
        }

        debug!(
            solutions = stats.solutions,
            disconnected = stats.disconnected,
            stopped = stats.stopped,
            "search finished"
        );
        stats
    }

    /// Collect every solution.
    pub fn solutions(&mut self) -> Vec<Solution> {
        let mut found = Vec::new();
        self.for_each_solution(|board| {
            found.push(board.snapshot());
            ControlFlow::Continue(())
        });
        found
    }

    /// Count the solutions without keeping them.
    pub fn count_solutions(&mut self) -> usize {
        self.for_each_solution(|_| ControlFlow::Continue(())).solutions
    }

    fn search_from<F>(&mut self, index: usize, stats: &mut SearchStats, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&Board) -> ControlFlow<()>,
    {
        if index == self.island_count() {
            if !self.is_connected() {
                stats.disconnected += 1;
                return ControlFlow::Continue(());
            }

            stats.solutions += 1;
            trace!(solution = stats.solutions, "found solution");
            return visitor(self);
        }

        let Some(mut split) = ForwardSplit::fill(self, NodeIndex::new(index)) else {
            return ControlFlow::Continue(());
        };

        loop {
            split.board.search_from(index + 1, stats, visitor)?;
            if !split.reorder() {
                break;
            }
        }

        ControlFlow::Continue(())
    }
}
