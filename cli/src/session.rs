use std::io::Write;

use anyhow::Result;
use minefield_core::*;

use crate::command::{Command, CommandError, HELP};
use crate::render::render_board;
use crate::stopwatch::{Stopwatch, format_clock};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON document per line.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front-end around one engine: parses commands, prints deltas, keeps the clock.
pub struct Session<G> {
    engine: MinefieldEngine,
    generator: G,
    config: GameConfig,
    stopwatch: Stopwatch,
    format: OutputFormat,
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn new(config: GameConfig, generator: G, format: OutputFormat) -> Result<Self> {
        let mut session = Self {
            engine: MinefieldEngine::new(),
            generator,
            config,
            stopwatch: Stopwatch::default(),
            format,
        };
        session.start_new_game()?;
        Ok(session)
    }

    pub fn engine(&self) -> &MinefieldEngine {
        &self.engine
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    fn start_new_game(&mut self) -> Result<()> {
        self.engine.new_game(self.config, &mut self.generator)?;
        self.stopwatch.reset();
        self.stopwatch.observe(self.engine.status());
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command, out),
            Err(CommandError::Empty) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        let before = self.engine.status();

        match command {
            Command::Reveal(coords) => match self.engine.reveal(coords) {
                Ok(updates) => self.print_reveal(&updates, out)?,
                Err(err) => writeln!(out, "{err} {coords:?}")?,
            },
            Command::Flag(coords) => match self.engine.toggle_flag(coords) {
                Ok(update) => self.print_flag(update, out)?,
                Err(err) => writeln!(out, "{err} {coords:?}")?,
            },
            Command::NewGame => {
                self.start_new_game()?;
                self.print_board(out)?;
            }
            Command::Board => self.print_board(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        let status = self.engine.status();
        self.stopwatch.observe(status);
        if before.is_active() && status.is_finished() {
            self.print_game_over(command, out)?;
        }
        Ok(Flow::Continue)
    }

    pub fn print_board(&self, out: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_board(&self.engine))?,
            OutputFormat::Json => {
                for update in self.engine.board() {
                    writeln!(out, "{}", serde_json::to_string(&update)?)?;
                }
            }
        }
        Ok(())
    }

    fn print_reveal(&self, updates: &[CellUpdate], out: &mut impl Write) -> Result<()> {
        if updates.is_empty() {
            log::debug!("reveal changed nothing");
            return Ok(());
        }
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_board(&self.engine))?,
            OutputFormat::Json => {
                for update in updates {
                    writeln!(out, "{}", serde_json::to_string(update)?)?;
                }
            }
        }
        Ok(())
    }

    fn print_flag(&self, update: FlagUpdate, out: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_board(&self.engine))?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&update)?)?,
        }
        Ok(())
    }

    fn print_game_over(&self, command: Command, out: &mut impl Write) -> Result<()> {
        let elapsed = format_clock(self.stopwatch.elapsed_secs());
        let status = self.engine.status();

        // a flag can only end the game under the flag-sum rule, and its delta has no final board
        if matches!(command, Command::Flag(_)) {
            self.print_board(out)?;
        }

        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({ "status": status, "elapsed": elapsed });
                writeln!(out, "{summary}")?;
            }
            OutputFormat::Text if status == GameStatus::Lost => {
                writeln!(out, "You have tapped a mine, the game is over.")?;
            }
            OutputFormat::Text => match self.engine.win_rule() {
                WinRule::RevealAllSafe => writeln!(
                    out,
                    "You've revealed all cells without tapping a single mine in {elapsed}! Congratulations!"
                )?,
                WinRule::RevealedPlusFlagged => {
                    writeln!(out, "You've found all mines in {elapsed}!")?
                }
            },
        }
        log::info!("game finished with {:?} after {}", status, elapsed);
        Ok(())
    }
}
