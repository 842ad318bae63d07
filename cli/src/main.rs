use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minefield_core::{CellCount, Coord, GameConfig, RandomMinefieldGenerator, WinRule};

use crate::session::{Flow, OutputFormat, Session};

mod command;
mod render;
mod session;
mod stopwatch;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of rows, adjusted into 2..=70
    #[arg(short, long, default_value_t = 9)]
    rows: u32,

    /// Number of columns, adjusted into 2..=70
    #[arg(short, long, default_value_t = 9)]
    columns: u32,

    /// Number of mines, adjusted into 1..rows*columns
    #[arg(short, long, default_value_t = 10)]
    mines: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Win once revealed and flagged cells cover the board
    #[arg(long)]
    flag_sum: bool,

    /// Print updates as JSON lines instead of drawing the board
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Settings as the engine accepts them, warning about every adjusted value.
    fn game_config(&self) -> GameConfig {
        let rows = Coord::try_from(self.rows).unwrap_or(Coord::MAX);
        let columns = Coord::try_from(self.columns).unwrap_or(Coord::MAX);
        let mines = CellCount::try_from(self.mines).unwrap_or(CellCount::MAX);
        let config = GameConfig::clamped(rows, columns, mines);

        if u32::from(config.rows) != self.rows {
            log::warn!("rows adjusted from {} to {}", self.rows, config.rows);
        }
        if u32::from(config.columns) != self.columns {
            log::warn!("columns adjusted from {} to {}", self.columns, config.columns);
        }
        if u32::from(config.mines) != self.mines {
            log::warn!("mines adjusted from {} to {}", self.mines, config.mines);
        }

        let win_rule = if self.flag_sum {
            WinRule::RevealedPlusFlagged
        } else {
            WinRule::RevealAllSafe
        };
        config.with_win_rule(win_rule)
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn init_logging(filter: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp()) as u64
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let config = args.game_config();
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("seed: {}", seed);

    let generator = RandomMinefieldGenerator::new(seed);
    let mut session = Session::new(config, generator, args.output_format())
        .context("could not start a game")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.print_board(&mut out)?;
    if !args.json {
        writeln!(
            out,
            "seed {}, type `help` for commands",
            session.generator().seed()
        )?;
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("could not read input")?;
        if session.handle_line(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    log::debug!("bye");
    Ok(())
}
