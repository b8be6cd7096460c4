use chess_engine::game_state::fen::INITIAL_POSITION;
use chess_engine::game_state::{ChessError, Color, GameState};
use chess_engine::perft::perft_divide;
use chess_engine::{Driver, PlayConfig};
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let fen_arg = || arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION);

    let matches = command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play a game in the terminal")
                .arg(fen_arg())
                .arg(arg!(-c --computer <COLOR> "Side played by the computer").value_parser(["white", "black"]))
                .arg(
                    arg!(-s --seed <SEED> "Seed of the computer player")
                        .default_value("42")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("perft")
                .about("Count pseudo-legal move paths")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("moves")
                .about("List the moves of the side to move")
                .arg(fen_arg()),
        )
        .get_matches();

    init_tracing(matches.get_flag("debug"));

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches),
        Some(("perft", arg_matches)) => perft(arg_matches),
        Some(("moves", arg_matches)) => list_moves(arg_matches),
        None => play_with_config(INITIAL_POSITION, PlayConfig::default()),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so that stdout only carries the game.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Chess(#[from] ChessError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn play(arg_matches: &ArgMatches) -> Result<(), CliError> {
    let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, String::as_str);
    let computer = arg_matches.get_one::<String>("computer").map(|c| match c.as_str() {
        "white" => Color::White,
        _ => Color::Black,
    });
    let seed = arg_matches.get_one::<u64>("seed").copied().unwrap_or(42);
    play_with_config(fen, PlayConfig { computer, seed })
}

#[instrument]
fn play_with_config(fen: &str, config: PlayConfig) -> Result<(), CliError> {
    let state = GameState::from_fen(fen)?;
    let stdin = io::stdin();
    let mut driver = Driver::new(state, config, stdin.lock(), io::stdout());
    driver.run()?;
    Ok(())
}

/// Sets up the position from `--fen` and plays the `--moves` on it.
fn position_from_args(arg_matches: &ArgMatches) -> Result<GameState, ChessError> {
    let fen = arg_matches.get_one::<String>("fen").map_or(INITIAL_POSITION, String::as_str);
    let mut state = GameState::from_fen(fen)?;
    let moves = arg_matches
        .try_get_many::<String>("moves")
        .ok()
        .flatten()
        .unwrap_or_default()
        .filter(|v| !v.is_empty());
    for m in moves {
        let mv = state.find_algebraic_move(m)?;
        state.make_move(mv)?;
    }
    Ok(state)
}

#[derive(Tabled)]
struct PerftRow {
    #[tabled(rename = "move")]
    mv: String,
    nodes: u64,
}

fn perft(arg_matches: &ArgMatches) -> Result<(), CliError> {
    let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
    let mut state = position_from_args(arg_matches)?;
    println!("Perft test for {} with depth {}", state.to_fen(), depth);

    let start_time = Instant::now();
    let rows: Vec<PerftRow> = perft_divide(&mut state, depth)?
        .into_iter()
        .map(|(mv, nodes)| PerftRow { mv, nodes })
        .collect();
    let elapsed = start_time.elapsed();

    let num_nodes: u64 = rows.iter().map(|r| r.nodes).sum();
    println!("{}", Table::new(rows).with(Style::modern()));
    println!("\nNodes searched: {}", num_nodes);
    info!(depth, nodes = num_nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    Ok(())
}

#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "move")]
    mv: String,
    piece: char,
    captures: String,
}

fn list_moves(arg_matches: &ArgMatches) -> Result<(), CliError> {
    let state = position_from_args(arg_matches)?;
    let rows: Vec<MoveRow> = state
        .valid_moves()
        .into_iter()
        .map(|mv| MoveRow {
            mv: mv.as_algebraic(),
            piece: mv.piece_moved.to_char(),
            captures: mv.piece_captured.piece().map(|p| p.to_char().to_string()).unwrap_or_default(),
        })
        .collect();

    print!("{}", state.render_to_string());
    println!("{} to move, {} moves", state.active_color(), rows.len());
    println!("{}", Table::new(rows).with(Style::modern()));
    Ok(())
}
