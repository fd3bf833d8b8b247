/// One slot of the printed board, frozen for output.
///
/// Positions on the grid alternate with gaps between columns and between rows; a water slot may lie under a horizontal
/// connection, a vertical one, or neither. `Some(n)` means a connection passes with `n` bridges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cell {
    Island { expected: u8 },
    Water { across: Option<u8>, down: Option<u8> },
}

impl Default for Cell {
    fn default() -> Self {
        Self::Water { across: None, down: None }
    }
}

/// Where in the printed grid a [`Cell`] sits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    Position,
    // between two columns
    ColumnGap,
    // between two rows
    RowGap,
    Corner,
}

impl Slot {
    pub(crate) fn of(index: (usize, usize)) -> Self {
        match (index.0 % 2, index.1 % 2) {
            (0, 0) => Self::Position,
            (0, _) => Self::ColumnGap,
            (_, 0) => Self::RowGap,
            _ => Self::Corner,
        }
    }
}

impl Cell {
    pub(crate) fn write_glyph(&self, slot: Slot, out: &mut String) {
        let (across, down) = match *self {
            Cell::Island { expected } => {
                out.push_str(&format!("({expected})"));
                return;
            }
            Cell::Water { across, down } => (across, down),
        };

        out.push_str(match slot {
            Slot::Position => match (across, down) {
                (Some(1), _) => "---",
                (Some(2), _) => "===",
                (_, Some(1)) => " ! ",
                (_, Some(2)) => " !!",
                // only unused connections are left
                (Some(_), Some(_)) => " + ",
                (Some(_), None) => " - ",
                (None, Some(_)) => " ' ",
                (None, None) => " . ",
            },
            Slot::ColumnGap => match across {
                Some(1) => "--",
                Some(2) => "==",
                _ => "  ",
            },
            Slot::RowGap => match down {
                Some(1) => " ! ",
                Some(2) => " !!",
                _ => "   ",
            },
            Slot::Corner => "  ",
        });
    }
}
