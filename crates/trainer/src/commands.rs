//! Prompt commands for the terminal trainer.

use shakmaty::Square;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  e2e4 | e2 e4 | e2-e4   drop a piece from one square onto another
  next / prev            step through the loaded variation
  reset                  back to the start of the variation (or empty board in free play)
  undo                   back to your last correct move after a wrong one
  load <id> <variation>  practice a variation, e.g. `load 1 Morphy Defense`
  random                 practice a random variation
  free                   switch to free play
  list                   list openings
  detail <id>            show an opening's description and games
  board                  redraw the board
  help                   show this text
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Drop { from: Square, to: Square },
    Next,
    Prev,
    Reset,
    Undo,
    Load { opening_id: u32, variation_name: String },
    Random,
    Free,
    List,
    Detail(u32),
    Board,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Type a command (or `help`).")]
    Empty,

    #[error("Unknown command `{0}`. Type `help` for a list.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "reset" => Ok(Command::Reset),
        "undo" => Ok(Command::Undo),
        "random" => Ok(Command::Random),
        "free" => Ok(Command::Free),
        "list" => Ok(Command::List),
        "board" => Ok(Command::Board),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "load" => {
            let (id, name) = rest
                .split_once(char::is_whitespace)
                .ok_or(CommandError::Usage("load <id> <variation>"))?;
            let opening_id = id
                .parse()
                .map_err(|_| CommandError::Usage("load <id> <variation>"))?;
            Ok(Command::Load {
                opening_id,
                variation_name: name.trim().to_string(),
            })
        }
        "detail" => rest
            .parse()
            .map(Command::Detail)
            .map_err(|_| CommandError::Usage("detail <id>")),
        _ => parse_drop(input).ok_or_else(|| CommandError::Unknown(input.to_string())),
    }
}

fn parse_drop(input: &str) -> Option<Command> {
    let squares: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if squares.len() != 4 || !squares.is_ascii() {
        return None;
    }
    let from = squares[..2].to_ascii_lowercase().parse().ok()?;
    let to = squares[2..].to_ascii_lowercase().parse().ok()?;
    Some(Command::Drop { from, to })
}
