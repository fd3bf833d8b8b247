#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};
    use std::ops::ControlFlow;

    use itertools::Itertools;
    use petgraph::graph::NodeIndex;
    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::board::Link;
    use crate::{Board, BoardBuilder, BuildError, Capacity, Direction, ErrorKind, Location, Solution, Table};

    // 13 islands, 4 crossings, exactly one solution
    const UNIQUE: &str = "2.3...3/.2...2./......./.5..2.4/......./..2..3./.3..2.3";
    // 13 islands, 3 crossings, two solutions
    const TWO_WAYS: &str = "23...3./....2.1/3....1./.2..4.3/......./3...4.3/.......";

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn rendered_solutions(board: &mut Board) -> Vec<String> {
        let mut rendered = Vec::new();
        board.for_each_solution(|solved| {
            rendered.push(format!("{}", solved));
            ControlFlow::Continue(())
        });
        rendered
    }

    /// Check `solution` against every rule using only the public view of `board`.
    fn assert_obeys_rules(board: &Board, solution: &Solution) {
        for location in board.islands() {
            let placed: u8 = Direction::VARIANTS.iter()
                .filter_map(|direction| board.neighbor(location, *direction))
                .map(|neighbor| solution.bridges_between(location, neighbor))
                .sum();
            assert_eq!(Some(placed), board.expected_at(location), "island at {}", location);
        }

        let bridged = solution.iter().filter(|(_, _, bridges)| *bridges > 0).collect_vec();
        assert!(solution.iter().all(|(_, _, bridges)| bridges <= 2));

        for ((a1, b1, _), (a2, b2, _)) in bridged.iter().tuple_combinations() {
            assert!(
                !board.crosses(UnorderedPair(*a1, *b1), UnorderedPair(*a2, *b2)),
                "{}-{} crosses {}-{}", a1, b1, a2, b2,
            );
        }

        let mut reached = HashSet::new();
        let mut queue = board.islands().take(1).collect::<VecDeque<_>>();
        while let Some(location) = queue.pop_front() {
            if !reached.insert(location) {
                continue;
            }
            for (a, b, _) in &bridged {
                if *a == location {
                    queue.push_back(*b);
                } else if *b == location {
                    queue.push_back(*a);
                }
            }
        }
        assert_eq!(reached.len(), board.island_count());
    }

    fn assert_pristine(board: &Board) {
        assert_eq!(board.snapshot().total_bridges(), 0);
        assert!(board.graph.raw_nodes().iter().all(|node| node.weight.pending == node.weight.expected));
        assert!(board.visited.iter().all(|visited| !visited));
    }

    #[test]
    fn single_bridge() {
        let mut board = board("11");
        assert_eq!(format!("{}", board), "(1)  (1)\n");

        let solutions = board.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].bridges_between(Location(0, 0), Location(0, 1)), 1);
        assert_eq!(rendered_solutions(&mut board), vec!["(1)--(1)\n"]);
    }

    #[test]
    fn double_bridge() {
        let mut board = board("22");

        let solutions = board.solutions();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].bridges_between(Location(0, 1), Location(0, 0)), 2);
        assert_eq!(rendered_solutions(&mut board), vec!["(2)==(2)\n"]);
    }

    #[test]
    fn vertical_double_bridge() {
        let mut board = board("2/2");
        assert_eq!(format!("{}", board), "(2)

(2)
");

        assert_eq!(rendered_solutions(&mut board), vec!["(2)
 !!
(2)
"]);
    }

    #[test]
    fn bridge_over_open_water() {
        let mut board = board("1.1");
        assert_eq!(format!("{}", board), "(1)   -   (1)\n");
        assert_eq!(rendered_solutions(&mut board), vec!["(1)-------(1)\n"]);
    }

    #[test]
    fn every_split_is_found() {
        let mut board = board("3.2/.../2.1");
        assert_eq!(format!("{}", board), "(3)   -   (2)

 '    .    '

(2)   -   (1)
");

        // most bridges to the right first
        let solutions = board.solutions();
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].bridges_between(Location(0, 0), Location(0, 2)), 2);
        assert_eq!(solutions[1].bridges_between(Location(0, 0), Location(0, 2)), 1);

        assert_eq!(rendered_solutions(&mut board), vec![
            "(3)=======(2)
 !
 !    .    '
 !
(2)-------(1)
",
            "(3)-------(2)
 !!        !
 !!   .    !
 !!        !
(2)   -   (1)
",
        ]);
    }

    #[test]
    fn square_of_twos() {
        // two double bridges either way round would leave two separate pairs
        let mut board = board("22/22");
        assert_eq!(format!("{}", board), "(2)  (2)

(2)  (2)
");

        let mut rendered = Vec::new();
        let stats = board.for_each_solution(|solved| {
            rendered.push(format!("{}", solved));
            ControlFlow::Continue(())
        });

        assert_eq!(stats.solutions, 1);
        assert_eq!(stats.disconnected, 2);
        assert!(!stats.stopped);
        assert_eq!(rendered, vec!["(2)--(2)
 !    !
(2)--(2)
"]);
    }

    #[test]
    fn separate_groups_are_rejected() {
        let mut board = board("11/../11");

        let stats = board.for_each_solution(|_| ControlFlow::Continue(()));
        assert_eq!(stats.solutions, 0);
        assert_eq!(stats.disconnected, 2);
        assert_pristine(&board);
    }

    #[test]
    fn crossing_bridges_are_exclusive() {
        let mut board = board(".1./1.1/.1.");
        assert_eq!(board.crossing_count(), 1);
        assert!(board.crosses(
            UnorderedPair(Location(0, 1), Location(2, 1)),
            UnorderedPair(Location(1, 2), Location(1, 0)),
        ));
        assert_eq!(format!("{}", board), " .   (1)   .

(1)   +   (1)

 .   (1)   .
");

        assert_eq!(board.count_solutions(), 0);
        assert_pristine(&board);
    }

    #[test]
    fn solve_unique() {
        let mut board = board(UNIQUE);
        assert_eq!(board.island_count(), 13);
        assert_eq!(board.connection_count(), 15);
        assert_eq!(board.crossing_count(), 4);
        assert_eq!((board.rows(), board.cols()), (7, 7));

        assert_eq!(format!("{}", board), "(2)   -   (3)   -    -    -   (3)

 .   (2)   +    -    -   (2)   '

 .    '    '    .    .    '    '

 .   (5)   +    -   (2)   +   (4)

 .    '    '    .    '    '    '

 .    '   (2)   -    +   (3)   '

 .   (3)   -    -   (2)   -   (3)
");

        assert_eq!(rendered_solutions(&mut board), vec!["(2)=======(3)-----------------(3)
                               !!
 .   (2)-----------------(2)   !!
      !                   !    !!
 .    !    '    .    .    !    !!
      !                   !    !!
 .   (5)============(2)   !   (4)
      !!                  !    !!
 .    !!   '    .    '    !    !!
      !!                  !    !!
 .    !!  (2)============(3)   !!
      !!                       !!
 .   (3)------------(2)-------(3)
"]);
    }

    #[test]
    fn solutions_obey_rules() {
        for text in [UNIQUE, TWO_WAYS, "3.2/.../2.1", "22/22", "2.3/.../1.2"] {
            let mut board = board(text);

            let mut solved_states = 0;
            board.for_each_solution(|solved| {
                assert!(solved.is_solved());
                solved_states += 1;
                ControlFlow::Continue(())
            });
            assert_pristine(&board);

            let solutions = board.solutions();
            assert_eq!(solutions.len(), solved_states);
            for solution in &solutions {
                assert_obeys_rules(&board, solution);
            }

            let distinct: HashSet<_> = solutions.iter().collect();
            assert_eq!(distinct.len(), solutions.len(), "duplicate solutions for {}", text);
        }
    }

    #[test]
    fn repeated_searches_agree() {
        let mut board = board(TWO_WAYS);
        let first = board.solutions();
        let second = board.solutions();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);

        let rebuilt = self::board(TWO_WAYS).solutions();
        assert_eq!(first.into_iter().collect::<HashSet<_>>(), rebuilt.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn stop_early() {
        let mut board = board(TWO_WAYS);
        let empty = format!("{}", board);

        let mut seen = 0;
        let stats = board.for_each_solution(|_| {
            seen += 1;
            ControlFlow::Break(())
        });

        assert_eq!(seen, 1);
        assert_eq!(stats.solutions, 1);
        assert!(stats.stopped);
        assert_pristine(&board);
        assert_eq!(format!("{}", board), empty);
    }

    #[test]
    fn no_islands() {
        let mut board = board("../...");
        assert_eq!(board.island_count(), 0);
        assert_eq!(format!("{}", board), "");
        assert!(board.solutions().is_empty());
    }

    #[test]
    fn parse_row_separators() {
        let slashes = board("2.2/.../2.2");
        let lines = board("2.2\r\n000\n2 . 2\n");

        assert_eq!(slashes.islands().collect_vec(), lines.islands().collect_vec());
        assert_eq!(format!("{}", slashes), format!("{}", lines));
        assert_eq!(slashes.expected_at(Location(2, 2)), Some(2));
        assert_eq!(slashes.expected_at(Location(1, 1)), None);
    }

    #[test]
    fn nearest_neighbors() {
        let board = board("111/.../1.2/.3.");

        assert_eq!(board.neighbor(Location(0, 0), Direction::Right), Some(Location(0, 1)));
        assert_eq!(board.neighbor(Location(0, 2), Direction::Left), Some(Location(0, 1)));
        assert_eq!(board.neighbor(Location(0, 0), Direction::Down), Some(Location(2, 0)));
        assert_eq!(board.neighbor(Location(3, 1), Direction::Up), Some(Location(0, 1)));
        assert_eq!(board.neighbor(Location(0, 1), Direction::Down), Some(Location(3, 1)));
        assert_eq!(board.neighbor(Location(0, 0), Direction::Up), None);
        assert_eq!(board.neighbor(Location(2, 2), Direction::Right), None);
        assert_eq!(board.neighbor(Location(1, 1), Direction::Up), None);

        // (0, 1) down to (3, 1) passes between (2, 0) and (2, 2)
        assert_eq!(board.connection_count(), 6);
        assert_eq!(board.crossing_count(), 1);
        assert!(board.crosses(
            UnorderedPair(Location(0, 1), Location(3, 1)),
            UnorderedPair(Location(2, 0), Location(2, 2)),
        ));
        assert_eq!(board.bridges_between(Location(0, 0), Location(0, 2)), None);
        assert_eq!(board.bridges_between(Location(0, 0), Location(0, 1)), Some(0));
    }

    #[test]
    fn bridge_limits() {
        let mut board = board("22");
        let right = board.graph[NodeIndex::new(0)].link(Direction::Right);

        assert!(board.add_bridge(right));
        assert!(board.add_bridge(right));
        assert!(!board.add_bridge(right));
        assert_eq!(board.bridges_between(Location(0, 0), Location(0, 1)), Some(2));
        assert_eq!(board.graph[NodeIndex::new(1)].pending, 0);

        assert!(board.remove_bridge(right));
        assert_eq!(board.graph[NodeIndex::new(0)].pending, 1);
        assert_eq!(board.graph[NodeIndex::new(1)].pending, 1);
        assert!(board.remove_bridge(right));
        assert!(!board.remove_bridge(right));
        assert_pristine(&board);

        assert!(!board.add_bridge(Link::Outside));
        assert!(!board.remove_bridge(Link::Outside));
    }

    #[test]
    fn bridge_needs_pending_on_both_ends() {
        let mut board = board("13");
        let right = board.graph[NodeIndex::new(0)].link(Direction::Right);

        assert!(board.add_bridge(right));
        assert!(!board.add_bridge(right));
        assert_eq!(board.graph[NodeIndex::new(1)].pending, 2);
    }

    #[test]
    fn bridge_blocked_by_crossing() {
        let mut board = board(".1./1.1/.1.");
        let vertical = board.graph[NodeIndex::new(0)].link(Direction::Down);
        let horizontal = board.graph[NodeIndex::new(1)].link(Direction::Right);

        assert!(board.add_bridge(vertical));
        assert!(!board.add_bridge(horizontal));
        assert!(board.remove_bridge(vertical));
        assert!(board.add_bridge(horizontal));
        assert!(!board.add_bridge(vertical));
    }

    #[test]
    fn failed_fill_leaves_no_trace() {
        let mut board = board("31");

        assert!(!board.fill_forward(NodeIndex::new(0)));
        assert_pristine(&board);
    }

    #[test]
    fn reorder_walks_every_split() {
        let mut board = board("34/4.");
        let island = NodeIndex::new(0);
        let right = (Location(0, 0), Location(0, 1));
        let down = (Location(0, 0), Location(1, 0));
        let split = |board: &Board| (
            board.bridges_between(right.0, right.1).unwrap(),
            board.bridges_between(down.0, down.1).unwrap(),
        );

        assert!(board.fill_forward(island));
        assert_eq!(split(&board), (2, 1));
        assert!(board.reorder_forward(island));
        assert_eq!(split(&board), (1, 2));
        assert!(!board.reorder_forward(island));
        assert_pristine(&board);
    }

    #[test]
    fn connectivity_check_resets_bitmap() {
        let mut board = board("11/../11");
        let top = board.graph[NodeIndex::new(0)].link(Direction::Right);
        let bottom = board.graph[NodeIndex::new(2)].link(Direction::Right);

        assert!(board.add_bridge(top));
        assert!(board.add_bridge(bottom));
        assert!(!board.is_connected());
        assert!(board.visited.iter().all(|visited| !visited));
        assert!(!board.is_solved());
    }

    #[test]
    fn bad_bridge_count() {
        let error = "1.9".parse::<Board>().err().unwrap();
        assert_eq!(error, BuildError::BadBridgeCount { location: Location(0, 2), expected: 9 });
        assert_eq!(error.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn placement_errors() {
        let mut builder = BoardBuilder::default();
        builder.add_island(Location(1, 0), 1).add_island(Location(0, 3), 1);
        assert_eq!(
            builder.invalid_reason(),
            Some(&BuildError::OutOfOrder { location: Location(0, 3), previous: Location(1, 0) }),
        );
        assert_eq!(builder.invalid_reason().map(BuildError::kind), Some(ErrorKind::InvalidPlacement));

        let mut builder = BoardBuilder::default();
        builder.add_island(Location(0, 0), 1).add_island(Location(0, 0), 1);
        assert_eq!(builder.build().err(), Some(BuildError::Duplicate { location: Location(0, 0) }));

        let mut builder = BoardBuilder::with_capacity(Capacity { max_coordinate: 2, ..Default::default() });
        builder.add_text("..1");
        let error = builder.build().err().unwrap();
        assert_eq!(error, BuildError::OutOfBounds { location: Location(0, 2), max: 2 });
        assert_eq!(error.kind(), ErrorKind::InvalidPlacement);
    }

    #[test]
    fn first_error_sticks() {
        let mut builder = BoardBuilder::default();
        builder.add_island(Location(0, 0), 0).add_island(Location(0, 0), 1).add_island(Location(0, 1), 1);
        assert_eq!(
            builder.build().err(),
            Some(BuildError::BadBridgeCount { location: Location(0, 0), expected: 0 }),
        );
    }

    #[test]
    fn capacity_errors() {
        let cases = [
            (Capacity { islands: 1, ..Default::default() }, "11", Table::Islands, 1),
            (Capacity { connections: 0, ..Default::default() }, "11", Table::Connections, 0),
            (Capacity { crossings: 0, ..Default::default() }, ".1./1.1/.1.", Table::Crossings, 0),
            (Capacity { visited: 1, ..Default::default() }, "11", Table::Visited, 1),
        ];

        for (capacity, text, table, limit) in cases {
            let mut builder = BoardBuilder::with_capacity(capacity);
            builder.add_text(text);
            let error = builder.build().err().unwrap();
            assert_eq!(error, BuildError::CapacityExceeded { table, capacity: limit });
            assert_eq!(error.kind(), ErrorKind::CapacityExceeded);
        }

        assert_eq!(
            BuildError::CapacityExceeded { table: Table::Islands, capacity: 1 }.to_string(),
            "islands capacity of 1 exhausted",
        );
    }

    #[test]
    fn capacity_from_puzzle() {
        let capacity = Capacity::for_text(UNIQUE);
        assert_eq!(capacity, Capacity::for_grid(7, 7));
        assert_eq!(capacity.visited, 49);

        let mut builder = BoardBuilder::with_capacity(capacity);
        builder.add_text(UNIQUE);
        assert_eq!(builder.build().unwrap().count_solutions(), 1);

        // the trailing empty row holds no islands
        assert_eq!(Capacity::for_text(TWO_WAYS), Capacity::for_grid(6, 7));
    }

    #[test]
    fn large_limits_allocate_nothing_up_front() {
        let mut builder = BoardBuilder::with_capacity(Capacity {
            islands: usize::MAX,
            connections: usize::MAX,
            crossings: usize::MAX,
            ..Default::default()
        });
        builder.add_text("11");

        let mut board = builder.build().unwrap();
        assert_eq!(rendered_solutions(&mut board), vec!["(1)--(1)\n"]);
    }

    #[test]
    fn oversized_grid_is_refused() {
        let far = 1 << (usize::BITS / 2);
        let mut builder = BoardBuilder::with_capacity(Capacity {
            visited: usize::MAX,
            max_coordinate: usize::MAX,
            ..Default::default()
        });
        builder.add_island(Location(far, far), 1);

        assert_eq!(
            builder.build().err(),
            Some(BuildError::CapacityExceeded { table: Table::Visited, capacity: usize::MAX }),
        );
        assert_eq!(Capacity::for_grid(far + 1, far + 1).visited, usize::MAX);
    }
}
