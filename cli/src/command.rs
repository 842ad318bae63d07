use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Board,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    MissingCoords(&'static str),
    #[error("{0:?} is not a valid row or column")]
    InvalidNumber(String),
    #[error("Too many arguments for `{0}`")]
    TooManyArguments(&'static str),
}

pub const HELP: &str = "\
commands:
  r, reveal ROW COL   reveal a cell
  f, flag ROW COL     toggle a flag
  n, new              start a new game with the same settings
  b, board            print the board again
  h, help             show this message
  q, quit             leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let (name, command): (&'static str, fn(Coord2) -> Command) =
            match verb.to_ascii_lowercase().as_str() {
                "r" | "reveal" => ("reveal", Command::Reveal),
                "f" | "flag" => ("flag", Command::Flag),
                "n" | "new" => return no_arguments("new", words, Command::NewGame),
                "b" | "board" => return no_arguments("board", words, Command::Board),
                "h" | "help" | "?" => return no_arguments("help", words, Command::Help),
                "q" | "quit" | "exit" => return no_arguments("quit", words, Command::Quit),
                _ => return Err(CommandError::Unknown(verb.to_owned())),
            };

        let (Some(row), Some(col)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingCoords(name));
        };
        let coords = (parse_coord(row)?, parse_coord(col)?);
        no_arguments(name, words, command(coords))
    }
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_owned()))
}

fn no_arguments<'a>(
    name: &'static str,
    mut rest: impl Iterator<Item = &'a str>,
    command: Command,
) -> Result<Command, CommandError> {
    match rest.next() {
        Some(_) => Err(CommandError::TooManyArguments(name)),
        None => Ok(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  reveal  10 70 ".parse::<Command>(), Ok(Command::Reveal((10, 70))));
        assert_eq!("F 1 2".parse::<Command>(), Ok(Command::Flag((1, 2))));
        assert_eq!("new".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("b".parse::<Command>(), Ok(Command::Board));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_owned()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingCoords("reveal"))
        );
        assert_eq!(
            "f one 2".parse::<Command>(),
            Err(CommandError::InvalidNumber("one".to_owned()))
        );
        assert_eq!(
            "r 1 300".parse::<Command>(),
            Err(CommandError::InvalidNumber("300".to_owned()))
        );
        assert_eq!(
            "r 1 2 3".parse::<Command>(),
            Err(CommandError::TooManyArguments("reveal"))
        );
        assert_eq!(
            "q now".parse::<Command>(),
            Err(CommandError::TooManyArguments("quit"))
        );
    }
}
