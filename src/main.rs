//! Hoop Sort Solver
//!
//! Loads a puzzle file, searches for a sequence of moves that sorts every
//! pole into a single color and prints it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use hoop_sort::solver::{LogProgress, SearchLimits, DEFAULT_PROGRESS_INTERVAL};
use hoop_sort::{load_puzzle, report, solve_with, GameState, Outcome, SolverConfig};

/// Solves hoop sort puzzles.
#[derive(Parser)]
#[command(name = "hoop-sort")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Log search progress at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    solve: SolveArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a solution (the default).
    Solve(SolveArgs),
    /// Print the puzzle, its score and its available moves.
    Show {
        /// The puzzle file to parse.
        game_file: PathBuf,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// The puzzle file to parse.
    game_file: Option<PathBuf>,

    /// Give up after generating this many moves.
    #[arg(long)]
    max_examined: Option<usize>,

    /// Give up after this many seconds.
    #[arg(long)]
    time_limit: Option<f64>,

    /// Generated moves between two progress messages.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: usize,
}

impl SolveArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            progress_interval: self.progress_interval,
            limits: SearchLimits {
                max_examined: self.max_examined,
                time_limit: self
                    .time_limit
                    .filter(|secs| secs.is_finite() && *secs >= 0.0)
                    .map(Duration::from_secs_f64),
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Show { game_file }) => run_show(&game_file),
        None => run_solve(&cli.solve),
    }
}

/// Sets up `tracing` output; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "hoop_sort=debug"
    } else {
        "hoop_sort=info"
    };
    let filter = EnvFilter::builder()
        .with_default_directive(
            default_directive
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads a puzzle, printing the failure if there is one.
fn load(path: &Path) -> Option<GameState> {
    match load_puzzle(path) {
        Ok(game) => Some(game),
        Err(e) => {
            eprintln!("Failure: {e}");
            None
        }
    }
}

/// Loads the puzzle, searches and prints the outcome.
fn run_solve(args: &SolveArgs) -> ExitCode {
    let Some(path) = args.game_file.as_deref() else {
        eprintln!("Failure: no puzzle file given");
        return ExitCode::FAILURE;
    };
    let Some(game) = load(path) else {
        return ExitCode::FAILURE;
    };

    println!("Loaded game state");
    println!("{}", report::format_state(&game));
    println!("Current score is {}", game.score());

    let started = Instant::now();
    let outcome = solve_with(&game, &args.config(), LogProgress);
    let elapsed = started.elapsed();

    print!("{}", report::format_outcome(&outcome, game.colors()));
    match outcome {
        Outcome::Solved(_) => {
            println!("Solved in {}ms.", elapsed.as_millis());
            ExitCode::SUCCESS
        }
        Outcome::Unsolvable { .. } | Outcome::Cancelled { .. } => ExitCode::from(2),
    }
}

/// Prints a puzzle without searching it.
fn run_show(path: &Path) -> ExitCode {
    let Some(game) = load(path) else {
        return ExitCode::FAILURE;
    };

    println!("{}", report::format_state(&game));
    println!("Current score is {}", game.score());
    if game.is_win() {
        println!("The game is already solved.");
        return ExitCode::SUCCESS;
    }

    let moves = game.list_available_moves();
    println!("{} moves available:", moves.len());
    for mv in &moves {
        println!(" - {} (score {})", mv, mv.record.score);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoop_sort::parse_puzzle;

    #[test]
    fn test_cli_parses_default_solve() {
        let cli = Cli::parse_from(["hoop-sort", "puzzles/three_colors.txt", "--max-examined", "50"]);

        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert_eq!(
            cli.solve.game_file.as_deref(),
            Some(Path::new("puzzles/three_colors.txt"))
        );
        let config = cli.solve.config();
        assert_eq!(config.limits.max_examined, Some(50));
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["hoop-sort", "solve", "p.txt", "--time-limit", "2.5"]);
        match cli.command {
            Some(Command::Solve(args)) => {
                assert_eq!(
                    args.config().limits.time_limit,
                    Some(Duration::from_millis(2500))
                );
            }
            _ => panic!("expected the solve subcommand"),
        }

        let cli = Cli::parse_from(["hoop-sort", "show", "p.txt"]);
        assert!(matches!(cli.command, Some(Command::Show { .. })));

        let cli = Cli::parse_from(["hoop-sort", "-v", "p.txt"]);
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_solve_sample_puzzles() {
        let solved = parse_puzzle(include_str!("../puzzles/solved.txt")).unwrap();
        let outcome = solve_with(&solved, &SolverConfig::default(), LogProgress);
        insta::assert_snapshot!(report::format_outcome(&outcome, solved.colors()), @"The game is already solved.");

        let unsolvable = parse_puzzle(include_str!("../puzzles/unsolvable.txt")).unwrap();
        let outcome = solve_with(&unsolvable, &SolverConfig::default(), LogProgress);
        assert!(matches!(outcome, Outcome::Unsolvable { .. }));

        let game = parse_puzzle(include_str!("../puzzles/three_colors.txt")).unwrap();
        let outcome = solve_with(&game, &SolverConfig::default(), LogProgress);
        assert!(outcome.is_solved());
    }
}
