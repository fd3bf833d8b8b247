use ndarray::Array2;

use crate::board::Board;
use crate::cell::{Cell, Slot};

/// Lay `board` out on a grid of [`Cell`]s: island positions at even indices, the gaps between them at odd ones.
pub(crate) fn to_array(board: &Board) -> Array2<Cell> {
    let mut grid = Array2::from_elem(((2 * board.rows).saturating_sub(1), (2 * board.cols).saturating_sub(1)), Cell::default());

    for node in board.graph.raw_nodes() {
        let location = node.weight.location;
        grid[(2 * location.row(), 2 * location.col())] = Cell::Island { expected: node.weight.expected };
    }

    for edge in board.graph.raw_edges() {
        let (a, b) = (board.graph[edge.source()].location, board.graph[edge.target()].location);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let bridges = Some(edge.weight.bridges);

        if start.row() == end.row() {
            for col in 2 * start.col() + 1..2 * end.col() {
                if let Cell::Water { across, .. } = &mut grid[(2 * start.row(), col)] {
                    *across = bridges;
                }
            }
        } else {
            for row in 2 * start.row() + 1..2 * end.row() {
                if let Cell::Water { down, .. } = &mut grid[(row, 2 * start.col())] {
                    *down = bridges;
                }
            }
        }
    }

    grid
}

/// Dump `grid` line by line, without trailing whitespace.
pub(crate) fn print(grid: &Array2<Cell>) -> String {
    let mut out = String::with_capacity(grid.nrows() * (3 * grid.ncols() + 1));

    for (y, row) in grid.rows().into_iter().enumerate() {
        let mut line = String::with_capacity(3 * row.len());
        for (x, cell) in row.iter().enumerate() {
            cell.write_glyph(Slot::of((y, x)), &mut line);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
