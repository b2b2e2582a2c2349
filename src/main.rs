use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use sudoku_pair::game::{GeneratorConfig, PairSolver, PuzzleGenerator, Settings, SolveOutcome};
use sudoku_pair::io::{emit_solution, read_pair, write_pair, OutputFormat};

#[derive(Parser)]
#[command(name = "sudoku-pair")]
#[command(version, about = "Generates and solves sudoku pairs with a SAT solver", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON settings file providing defaults for the options below
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random puzzle pair and its solution
    Generate(GenerateArgs),
    /// Complete a partially filled pair read from CSV
    Solve(SolveArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// k value for a k-sudoku (grids are k² × k²)
    #[arg(short, long)]
    k: Option<usize>,

    /// Also require both diagonals to hold every digit
    #[arg(short = 'd', long)]
    diagonal: bool,

    /// Where to write the puzzle CSV
    #[arg(short = 'p', long)]
    path: Option<PathBuf>,

    /// Where to write the solution CSV
    #[arg(short = 's', long)]
    solnpath: Option<PathBuf>,

    /// RNG seed (defaults to $SEED, then a random one)
    #[arg(long)]
    seed: Option<u64>,

    /// Random seed sets to try before giving up
    #[arg(long)]
    max_seed_attempts: Option<usize>,

    /// Write a JSON summary of the run here
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct SolveArgs {
    /// k value for a k-sudoku (grids are k² × k²)
    #[arg(short, long)]
    k: Option<usize>,

    /// Also require both diagonals to hold every digit
    #[arg(short = 'd', long)]
    diagonal: bool,

    /// Puzzle CSV to solve
    #[arg(short = 'p', long)]
    path: Option<PathBuf>,

    /// 0: digits with block separators, 1: digits only, 2: write sudoku_soln.csv
    #[arg(short = 'o', long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    outputformat: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn generate(settings: Settings, args: GenerateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        dimension: settings.dimension()?,
        diagonal: args.diagonal || settings.diagonal,
        max_seed_attempts: args.max_seed_attempts.unwrap_or(settings.max_seed_attempts),
        seed: args.seed.or_else(Settings::seed_from_env),
    };
    let puzzle_path = args.path.unwrap_or(settings.puzzle_path);
    let solution_path = args.solnpath.unwrap_or(settings.solution_path);
    let report_path = args.report.or(settings.report_path);

    let started = Instant::now();
    let mut generator = PuzzleGenerator::with_varisat(&config)?;
    let solution = generator.generate_solution()?;
    write_pair(&solution_path, &solution)
        .with_context(|| format!("writing solution to {}", solution_path.display()))?;

    let puzzle = generator.minimize(&solution)?;
    write_pair(&puzzle_path, &puzzle)
        .with_context(|| format!("writing puzzle to {}", puzzle_path.display()))?;

    let mut stats = generator.stats().clone();
    stats.givens = puzzle.filled_count();
    stats.elapsed = started.elapsed();
    drop(generator);
    info!(
        "Puzzle {} (seed {}) has {} givens",
        stats.puzzle_id, stats.seed, stats.givens
    );

    if let Some(report_path) = report_path {
        write_report(&report_path, &stats.to_json()?)?;
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))
}

fn solve(settings: Settings, args: SolveArgs) -> anyhow::Result<()> {
    let dimension = settings.dimension()?;
    let diagonal = args.diagonal || settings.diagonal;
    let path = args.path.unwrap_or(settings.puzzle_path);
    let format = OutputFormat::from_index(args.outputformat).unwrap_or_default();

    let partial = read_pair(&path, dimension)?;
    let mut solver = PairSolver::with_varisat(dimension, diagonal)?;
    match solver.solve(&partial)? {
        SolveOutcome::Solved(solution) => {
            emit_solution(&solution, format, &mut std::io::stdout().lock())?;
        }
        SolveOutcome::NoSolution => println!("None"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref());
    match cli.command {
        Commands::Generate(args) => {
            if let Some(k) = args.k {
                settings.k = k;
            }
            generate(settings, args)
        }
        Commands::Solve(args) => {
            if let Some(k) = args.k {
                settings.k = k;
            }
            solve(settings, args)
        }
    }
}
