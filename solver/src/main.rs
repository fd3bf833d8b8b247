use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser};
use hashi::{BoardBuilder, Capacity};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashi")]
#[command(version, about = "Print every solution of a Hashiwokakero puzzle", long_about = None)]
struct Cli {
    /// Puzzle file; read from stdin if neither this nor --puzzle is given
    input: Option<PathBuf>,

    /// Puzzle given inline, e.g. `2.3/.../1.2`
    #[arg(short, long, conflicts_with = "input")]
    puzzle: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Stop after this many solutions
    #[arg(short, long)]
    limit: Option<NonZeroUsize>,

    /// Only print how many solutions there are
    #[arg(short, long)]
    count: bool,

    /// Size every table from the puzzle itself, ignoring the capacity flags
    #[arg(long)]
    fit: bool,

    #[command(flatten)]
    capacity: CapacityArgs,
}

#[derive(Args)]
struct CapacityArgs {
    /// Most islands a puzzle may hold
    #[arg(long, default_value_t = Capacity::default().islands)]
    max_islands: usize,

    /// Most connections between neighbouring islands
    #[arg(long, default_value_t = Capacity::default().connections)]
    max_connections: usize,

    /// Most pairs of crossing connections
    #[arg(long, default_value_t = Capacity::default().crossings)]
    max_crossings: usize,

    /// Most cells the puzzle may span
    #[arg(long, default_value_t = Capacity::default().visited)]
    max_cells: usize,

    /// Rows and columns must be below this
    #[arg(long, default_value_t = Capacity::default().max_coordinate)]
    max_coordinate: usize,
}

impl From<CapacityArgs> for Capacity {
    fn from(args: CapacityArgs) -> Self {
        Self {
            islands: args.max_islands,
            connections: args.max_connections,
            crossings: args.max_crossings,
            visited: args.max_cells,
            max_coordinate: args.max_coordinate,
        }
    }
}

fn read_puzzle(cli: &Cli) -> anyhow::Result<String> {
    if let Some(puzzle) = &cli.puzzle {
        return Ok(puzzle.clone());
    }

    match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let text = read_puzzle(&cli)?;
    let capacity = if cli.fit { Capacity::for_text(&text) } else { cli.capacity.into() };

    let mut builder = BoardBuilder::with_capacity(capacity);
    builder.add_text(&text);
    let mut board = builder.build().context("invalid puzzle")?;
    info!(islands = board.island_count(), rows = board.rows(), cols = board.cols(), "loaded puzzle");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let limit = cli.limit.map_or(usize::MAX, NonZeroUsize::get);

    if !cli.count {
        writeln!(out, "{}", board)?;
    }

    let mut failure = None;
    let mut printed = 0;
    let stats = board.for_each_solution(|solved| {
        if !cli.count {
            if let Err(error) = writeln!(out, "{}", solved) {
                failure = Some(error);
                return ControlFlow::Break(());
            }
        }

        printed += 1;
        if printed >= limit { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    });

    if let Some(error) = failure {
        return Err(error).context("writing solution");
    }
    info!(solutions = stats.solutions, disconnected = stats.disconnected, stopped = stats.stopped, "done");

    if cli.count {
        writeln!(out, "{}", stats.solutions)?;
    }
    out.flush()?;

    Ok(())
}
