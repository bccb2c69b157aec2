use clap::{Parser, Subcommand};
use pushsearch::config::SolverConfig;
use pushsearch::logging::Verbosity;
use pushsearch::sokoban::{
    identify_screen, levels, load_push_log, push_log_path, Board, Location, PushReplay, PushSolver,
};
use pushsearch::tally::MajorityTally;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(version)]
/// Push boulders into traps, one boulder at a time.
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(help = "A TOML config file", short = 'f', long = "config", id = "CONFIG")]
    config: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in levels and whether a push log exists for each.
    List,
    /// Let the solver play a level until it is solved or gets stuck. A level
    /// that already has a push log is replayed instead.
    Auto {
        #[arg(help = "A built-in level name or a level file")]
        level: String,
        #[arg(help = "Solve again even if a push log exists", long = "fresh")]
        fresh: bool,
    },
    /// Play a level from standard input. Each line is a string of vi keys,
    /// `.` asks the solver for one move, and `q` quits.
    Play {
        #[arg(help = "A built-in level name or a level file")]
        level: String,
    },
    /// Work out which built-in level a set of screen dumps shows. The level
    /// named by most of the dumps wins.
    Identify {
        #[arg(help = "Screen dump files", required = true)]
        screens: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(io::stderr)
        .compact()
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let config = SolverConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::List => {
            list(&config);
            Ok(true)
        }
        Commands::Auto { level, fresh } => auto(&config, load_board(&level)?, fresh),
        Commands::Play { level } => play(&config, load_board(&level)?),
        Commands::Identify { screens } => identify(&screens),
    }
}

/// A built-in level by name, otherwise a level file named after its stem.
fn load_board(level: &str) -> Result<Board, Box<dyn Error>> {
    if levels::level_text(level).is_some() {
        return Ok(Board::builtin(level)?);
    }
    let path = Path::new(level);
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map_or_else(|| level.to_string(), |stem| stem.to_string_lossy().into_owned());
    Ok(Board::new(name, &text)?)
}

fn list(config: &SolverConfig) {
    for name in levels::level_names() {
        let solved = push_log_path(&config.log_dir, name).exists();
        println!("{name}\t{}", if solved { "logged" } else { "-" });
    }
}

fn auto(config: &SolverConfig, mut board: Board, fresh: bool) -> Result<bool, Box<dyn Error>> {
    let log_path = push_log_path(&config.log_dir, board.name());
    if !fresh {
        if let Some(records) = load_push_log(&log_path)? {
            info!(path = %log_path.display(), "replaying push log");
            let pushes = PushReplay::new(records, Location::new(0, 0)).replay_on(&mut board)?;
            println!("{board}");
            println!("Replayed {pushes} pushes, solved: {}", board.is_solved());
            return Ok(board.is_solved());
        }
    }

    let mut solver = PushSolver::with_config(board, config);
    let mut turns = 0;
    while !solver.is_solved() && turns < config.max_turns {
        if !solver.process_command('.') {
            break;
        }
        turns += 1;
    }
    println!("{}", solver.board());
    println!(
        "Moves: {turns}, pushes: {}, traps remaining: {}",
        solver.board().push_records().len(),
        solver.board().traps_remaining()
    );
    if !solver.is_solved() {
        warn!(turns, "solver stopped before the level was solved");
        return Ok(false);
    }
    solver.write_push_log(&config.log_dir)?;
    Ok(true)
}

fn play(config: &SolverConfig, board: Board) -> Result<bool, Box<dyn Error>> {
    let mut solver = PushSolver::with_config(board, config);
    let stdout = io::stdout();
    println!("{}", solver.board());
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim() == "q" {
            break;
        }
        for key in line.chars().filter(|key| !key.is_whitespace()) {
            if !solver.process_command(key) {
                info!(%key, "no move made");
            }
        }
        let mut out = stdout.lock();
        writeln!(out, "{}", solver.board())?;
        match solver.plan().front() {
            Some(command) => writeln!(
                out,
                "Next push: stand at {} and push {:?} ({} left)",
                command.stand,
                command.direction,
                solver.plan().len()
            )?,
            None if solver.is_solved() => writeln!(out, "Solved")?,
            None => writeln!(out, "No plan")?,
        }
        if solver.is_solved() {
            let path = solver.write_push_log(&config.log_dir)?;
            writeln!(out, "Push log written to {}", path.display())?;
            return Ok(true);
        }
    }
    Ok(solver.is_solved())
}

fn identify(screens: &[PathBuf]) -> Result<bool, Box<dyn Error>> {
    let mut tally = MajorityTally::new();
    for screen in screens {
        let text = std::fs::read_to_string(screen)?;
        match identify_screen(&text)? {
            Some(name) => {
                info!(screen = %screen.display(), level = name, "identified");
                tally.observe(name);
            }
            None => info!(screen = %screen.display(), "no level matched"),
        }
    }
    match tally.winner() {
        Some(name) => {
            println!("{name} ({} of {} screens)", tally.count(name), screens.len());
            Ok(true)
        }
        None => {
            println!("No level matched");
            Ok(false)
        }
    }
}
