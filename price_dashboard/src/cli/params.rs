use std::str::FromStr;

use thiserror::Error;

use crate::chart::BrushSelection;

/// One line of input in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Select(String),
    Brush(BrushSelection),
    Refresh,
    Assets,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid index '{0}': expected a non-negative integer")]
    InvalidIndex(String),
}

pub const HELP: &str = "\
commands:
  select SYMBOL     switch to another asset
  brush START END   change between two point indices
  refresh           re-fetch the current asset
  assets            list selectable assets
  status            print the current summary
  quit              exit";

fn parse_index(raw: &str) -> Result<usize, ParseCommandError> {
    raw.parse()
        .map_err(|_| ParseCommandError::InvalidIndex(raw.to_string()))
}

impl FromStr for InteractiveCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let no_args = |cmd: InteractiveCommand, usage| {
            if args.is_empty() {
                Ok(cmd)
            } else {
                Err(ParseCommandError::Usage(usage))
            }
        };

        match head.to_lowercase().as_str() {
            "select" | "s" => match args.as_slice() {
                [symbol] => Ok(InteractiveCommand::Select(symbol.to_string())),
                _ => Err(ParseCommandError::Usage("select SYMBOL")),
            },
            "brush" | "b" => match args.as_slice() {
                [start, end] => Ok(InteractiveCommand::Brush(BrushSelection::new(
                    parse_index(start)?,
                    parse_index(end)?,
                ))),
                _ => Err(ParseCommandError::Usage("brush START END")),
            },
            "refresh" | "r" => no_args(InteractiveCommand::Refresh, "refresh"),
            "assets" | "ls" => no_args(InteractiveCommand::Assets, "assets"),
            "status" => no_args(InteractiveCommand::Status, "status"),
            "help" | "?" => Ok(InteractiveCommand::Help),
            "quit" | "exit" | "q" => Ok(InteractiveCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Turns the two values of `--brush START END` into a selection.
pub fn brush_from_args(args: &[usize]) -> Option<BrushSelection> {
    match args {
        [start, end] => Some(BrushSelection::new(*start, *end)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        // Symbols are matched exactly, so lower-case tickers stay selectable.
        assert_eq!(
            "select btc-usd".parse::<InteractiveCommand>(),
            Ok(InteractiveCommand::Select("btc-usd".into()))
        );
        assert_eq!(
            "  s   GOOGL ".parse::<InteractiveCommand>(),
            Ok(InteractiveCommand::Select("GOOGL".into()))
        );
        assert_eq!(
            "select".parse::<InteractiveCommand>(),
            Err(ParseCommandError::Usage("select SYMBOL"))
        );
    }

    #[test]
    fn test_parse_brush() {
        assert_eq!(
            "brush 0 12".parse::<InteractiveCommand>(),
            Ok(InteractiveCommand::Brush(BrushSelection::new(0, 12)))
        );
        assert_eq!(
            "brush 0 -1".parse::<InteractiveCommand>(),
            Err(ParseCommandError::InvalidIndex("-1".into()))
        );
        assert_eq!(
            "brush 4".parse::<InteractiveCommand>(),
            Err(ParseCommandError::Usage("brush START END"))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("refresh".parse::<InteractiveCommand>(), Ok(InteractiveCommand::Refresh));
        assert_eq!("ASSETS".parse::<InteractiveCommand>(), Ok(InteractiveCommand::Assets));
        assert_eq!("status".parse::<InteractiveCommand>(), Ok(InteractiveCommand::Status));
        assert_eq!("q".parse::<InteractiveCommand>(), Ok(InteractiveCommand::Quit));
        assert_eq!(
            "refresh now".parse::<InteractiveCommand>(),
            Err(ParseCommandError::Usage("refresh"))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("   ".parse::<InteractiveCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "buy AAPL".parse::<InteractiveCommand>(),
            Err(ParseCommandError::Unknown("buy".into()))
        );
    }

    #[test]
    fn test_brush_from_args() {
        assert_eq!(brush_from_args(&[2, 1]), Some(BrushSelection::new(2, 1)));
        assert_eq!(brush_from_args(&[2]), None);
    }
}
