//! The only code which changes bridge counts.
//!
//! Every operation here either succeeds, or fails having left the board exactly as it was.

use petgraph::graph::NodeIndex;

use crate::board::{Board, Link, MAX_CONNECTION_BRIDGES};
use crate::direction::Direction;

impl Board {
    /// Place one more bridge along `link`.
    ///
    /// Refused if the connection is full, either end needs no more bridges, or a crossing connection is in use.
    /// Always refused for [`Link::Outside`].
    pub(crate) fn add_bridge(&mut self, link: Link) -> bool {
        let Link::Island { connection, .. } = link else {
            return false;
        };
        let Some((a, b)) = self.graph.edge_endpoints(connection) else {
            return false;
        };

        let current = &self.graph[connection];
        if current.bridges >= MAX_CONNECTION_BRIDGES || self.graph[a].pending == 0 || self.graph[b].pending == 0 {
            return false;
        }
        if current.crossings.iter().any(|crossing| self.graph[*crossing].bridges > 0) {
            return false;
        }

        self.graph[connection].bridges += 1;
        self.graph[a].pending -= 1;
        self.graph[b].pending -= 1;
        true
    }

    /// Take one bridge away from `link`, if it has any.
    pub(crate) fn remove_bridge(&mut self, link: Link) -> bool {
        let Link::Island { connection, .. } = link else {
            return false;
        };
        let Some((a, b)) = self.graph.edge_endpoints(connection) else {
            return false;
        };

        if self.graph[connection].bridges == 0 {
            return false;
        }

        self.graph[connection].bridges -= 1;
        self.graph[a].pending += 1;
        self.graph[b].pending += 1;
        true
    }

    /// Remove every bridge to the right of and below `island`.
    pub(crate) fn clear_forward(&mut self, island: NodeIndex) {
        for direction in Direction::FORWARD_VARIANTS {
            let link = self.graph[island].link(*direction);
            while self.remove_bridge(link) {}
        }
    }

    /// Greedily satisfy `island` with bridges to the right, then downwards.
    ///
    /// Expects no bridges to the right of or below `island` yet. If the island cannot be completed, all bridges placed
    /// here are removed again and `false` is returned.
    pub(crate) fn fill_forward(&mut self, island: NodeIndex) -> bool {
        let mut directions = Direction::FORWARD_VARIANTS.iter();
        let mut current = directions.next();

        while self.graph[island].pending > 0 {
            let Some(direction) = current else {
                break;
            };

            let link = self.graph[island].link(*direction);
            if !self.add_bridge(link) {
                current = directions.next();
            }
        }

        if self.graph[island].pending > 0 {
            self.clear_forward(island);
            return false;
        }

        true
    }

    /// Move one of the bridges of a satisfied `island` from the right to below it, giving the next way of splitting
    /// its bridges between those two directions.
    ///
    /// Splits run from most bridges on the right to fewest, so starting from [`Self::fill_forward`] every split is
    /// seen once. When there is no next split, the bridges to the right of and below `island` are all removed and
    /// `false` is returned.
    pub(crate) fn reorder_forward(&mut self, island: NodeIndex) -> bool {
        let right = self.graph[island].link(Direction::Right);
        let down = self.graph[island].link(Direction::Down);

        if self.remove_bridge(right) && self.add_bridge(down) {
            return true;
        }

        self.clear_forward(island);
        false
    }
}
