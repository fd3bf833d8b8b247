use strum::VariantArray;

use crate::board::{Board, Link};
use crate::direction::Direction;

impl Board {
    /// Whether the bridges currently placed join every island into one group.
    ///
    /// Walks bridged connections from the first island, marking islands in the visited bitmap. Only the prefix of the
    /// bitmap up to the furthest island reached is cleared afterwards, so the bitmap is ready for the next call.
    pub(crate) fn is_connected(&mut self) -> bool {
        let Some(start) = self.graph.node_indices().next() else {
            return true;
        };

        let mut reached = 0;
        let mut touched = 0;
        let mut stack = vec![start];

        while let Some(island) = stack.pop() {
            let location = self.graph[island].location;
            let visited = &mut self.visited[location.as_index()];
            if *visited {
                continue;
            }
            *visited = true;
            reached += 1;
            touched = touched.max(location.flat_index(self.cols) + 1);

            for direction in Direction::VARIANTS {
                let link = self.graph[island].link(*direction);
                if let Link::Island { island: next, connection } = link {
                    if self.graph[connection].bridges > 0 {
                        stack.push(next);
                    }
                }
            }
        }

        // row-major iteration, so this is exactly the flat prefix
        self.visited.iter_mut().take(touched).for_each(|cell| *cell = false);

        reached == self.island_count()
    }
}
