// Console front end for the shogi rules engine

mod command;
mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use command::{parse_command, Command, HELP};
use config::PlayConfig;
use shogi_rules::{Color, Game, LogObserver};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout file, overrides the config file
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Print a JSON snapshot after every accepted action
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    };
    if let Some(path) = args.layout {
        config.game.layout = None;
        config.game.layout_path = Some(path);
    }
    config.json |= args.json;

    let mut game = Game::from_config(&config.game, Box::new(LogObserver))?;
    log::info!("Game started, {} to move", game.side_to_move());

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_board(&mut out, &game)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => handle(&mut out, &mut game, command, config.json)?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn handle(out: &mut impl Write, game: &mut Game, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Act { actor, text } => {
            let actor = actor.unwrap_or_else(|| game.side_to_move());
            match game.submit(actor, &text) {
                Ok(next) => {
                    if json {
                        writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;
                    } else {
                        print_board(out, game)?;
                    }
                    match game.outcome() {
                        Some(outcome) => writeln!(out, "game over: {outcome}")?,
                        None => writeln!(out, "ok, {next} to move")?,
                    }
                }
                Err(e) => writeln!(out, "rejected: {e}")?,
            }
        }
        Command::Board => print_board(out, game)?,
        Command::Moves(origin) => {
            let squares: Vec<String> = game
                .legal_destinations(origin)
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(out, "{}", if squares.is_empty() { "-".to_string() } else { squares.join(" ") })?;
        }
        Command::Log => {
            for (i, record) in game.move_log().iter().enumerate() {
                writeln!(out, "{:>3}. {record}", i + 1)?;
            }
        }
        Command::Json => writeln!(out, "{}", serde_json::to_string_pretty(&game.snapshot())?)?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn print_board(out: &mut impl Write, game: &Game) -> Result<()> {
    writeln!(out, "{}", game.board())?;
    for color in Color::ALL {
        writeln!(out, "{color} hand: {}", game.player(color).hand())?;
    }
    let player = game.player(game.side_to_move());
    let check = if player.in_check() { " (in check)" } else { "" };
    writeln!(out, "{} to move{check}", game.side_to_move())?;
    Ok(())
}
