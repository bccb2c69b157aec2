use clap::Parser;
use pushsearch::logging::Verbosity;
use pushsearch::sokoban::{load_push_log, Board, Location, PushReplay};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Check that a push log solves a level.
struct Cli {
    #[arg(help = "The built-in level the log is for")]
    level: String,
    #[arg(help = "The push log to replay")]
    log: PathBuf,
    #[arg(
        help = "Level file to use instead of the built-in level",
        short = 'l',
        long = "level-file",
        id = "LEVEL_FILE"
    )]
    level_file: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let board = match &cli.level_file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| Board::new(cli.level.as_str(), &text).map_err(|e| e.to_string())),
        None => Board::builtin(&cli.level).map_err(|e| e.to_string()),
    };
    let mut board = match board {
        Ok(board) => board,
        Err(e) => {
            error!("failed to load level {}: {e}", cli.level);
            return ExitCode::FAILURE;
        }
    };

    let records = match load_push_log(&cli.log) {
        Ok(Some(records)) => records,
        Ok(None) => {
            error!(log = %cli.log.display(), "push log is missing or empty");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let total = records.len();
    let mut replay = PushReplay::new(records, Location::new(0, 0));
    if let Err(e) = replay.replay_on(&mut board) {
        error!("{e}");
        println!("{board}");
        return ExitCode::FAILURE;
    }

    println!("{board}");
    if board.is_solved() {
        info!(pushes = replay.pushes_done(), total, "push log solves the level");
        println!("Valid: {} pushes", replay.pushes_done());
        ExitCode::SUCCESS
    } else {
        error!(
            traps = board.traps_remaining(),
            "push log ends with traps still open"
        );
        ExitCode::FAILURE
    }
}
