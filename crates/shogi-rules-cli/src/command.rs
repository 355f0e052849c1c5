//! Console commands

use anyhow::{anyhow, bail, Result};
use shogi_rules::{Color, Origin, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Action text for the engine, optionally for an explicit player
    Act { actor: Option<Color>, text: String },
    Board,
    Moves(Origin),
    Log,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  7g7f | 8h2b+ | P*5e | resign | restart   act for the side to move
  1 <action> | 2 <action>                  act for player 1 or 2
  moves <square|piece>                     legal destinations, e.g. moves 7g, moves P
  board | log | json | help | quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        bail!("empty command");
    };
    let rest: Vec<&str> = words.collect();

    let command = match (first.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("board", []) => Command::Board,
        ("log", []) => Command::Log,
        ("json", []) => Command::Json,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        ("moves", [target]) => Command::Moves(parse_origin(target)?),
        ("moves", _) => bail!("usage: moves <square|piece>"),
        ("1" | "2", [text]) => Command::Act {
            actor: first.parse().ok().and_then(Color::from_player_number),
            text: (*text).to_string(),
        },
        (_, []) => Command::Act {
            actor: None,
            text: first.to_string(),
        },
        _ => bail!("unrecognised command: {line}"),
    };
    Ok(command)
}

fn parse_origin(text: &str) -> Result<Origin> {
    if let Ok(square) = text.parse::<Square>() {
        return Ok(Origin::Board(square));
    }
    let mut chars = text.chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind), None) => Ok(Origin::Hand(kind)),
        _ => Err(anyhow!("expected a square like 7g or a piece letter like P, got {text}")),
    }
}
