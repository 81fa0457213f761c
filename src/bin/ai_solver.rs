use clap::{Parser, ValueEnum};
use npuzzle_solver::engine::Puzzle;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::player::{Engine, Player};
use npuzzle_solver::utils::puzzle_from_rows;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    /// Best-first search over a priority queue (A* when the heuristic is optimal)
    BestFirst,
    /// Iterative deepening (IDA* when the heuristic is informed)
    IterativeDeepening,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    /// Every state scores zero; brute-force search
    Naive,
    /// Number of tiles not in their goal cell
    OutOfPlace,
    /// Sum of tile distances to their goal cells
    Manhattan,
    /// Manhattan distance plus linear-conflict penalty
    LinearConflict,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of rows in the board
    #[clap(short = 'm', long, default_value_t = 3)]
    rows: usize,

    /// Number of columns in the board
    #[clap(short = 'n', long, default_value_t = 3)]
    cols: usize,

    /// Number of random moves used to scramble the board
    #[clap(short, long, default_value_t = 20)]
    scramble: u32,

    /// Seed for the scrambling RNG (random if omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Search engine to solve with
    #[clap(short, long, value_enum, default_value_t = EngineArg::BestFirst)]
    engine: EngineArg,

    /// Heuristic evaluator to guide the search
    #[clap(short = 'u', long, value_enum, default_value_t = HeuristicArg::Manhattan)]
    heuristic: HeuristicArg,

    /// Drop the depth term from the evaluator: faster, but the solution
    /// is no longer guaranteed shortest
    #[clap(short, long)]
    fast: bool,

    /// Cap on the iterative-deepening bound schedule
    #[clap(short, long)]
    bound_limit: Option<u32>,

    /// Number of trials to average over (0 solves once and prints the moves)
    #[clap(short, long, default_value_t = 0)]
    trials: u32,

    /// Path to a board file (one row per line, cells whitespace-separated,
    /// '_' for the blank); overrides scrambling
    board_file: Option<PathBuf>,
}

fn heuristic_from_args(args: &Args) -> Heuristic {
    let optimal = !args.fast;
    match args.heuristic {
        HeuristicArg::Naive => Heuristic::Naive,
        HeuristicArg::OutOfPlace => Heuristic::OutOfPlace { optimal },
        HeuristicArg::Manhattan => Heuristic::Manhattan { optimal },
        HeuristicArg::LinearConflict => Heuristic::LinearConflict { optimal },
    }
}

fn read_board_file(path: &PathBuf) -> Result<Puzzle, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    puzzle_from_rows(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn make_puzzle(args: &Args, trial: u64) -> Result<Puzzle, String> {
    match &args.board_file {
        Some(path) => read_board_file(path),
        None => {
            let puzzle = match args.seed {
                // A fixed seed still varies per trial, so trials differ but
                // the whole run is reproducible.
                Some(seed) => Puzzle::new_scrambled_with_seed(
                    args.rows,
                    args.cols,
                    args.scramble,
                    seed.wrapping_add(trial),
                ),
                None => Puzzle::new_scrambled(args.rows, args.cols, args.scramble),
            };
            Ok(puzzle)
        }
    }
}

fn make_player(args: &Args, puzzle: Puzzle) -> Player {
    let engine = match args.engine {
        EngineArg::BestFirst => Engine::BestFirst,
        EngineArg::IterativeDeepening => Engine::IterativeDeepening,
    };
    let mut player = Player::new(puzzle, engine, heuristic_from_args(args));
    if let Some(limit) = args.bound_limit {
        player = player.with_bound_limit(limit);
    }
    player
}

fn solve_once(args: &Args) -> Result<(), String> {
    let puzzle = make_puzzle(args, 0)?;
    println!("Initial board state:\n{}", puzzle);

    let mut player = make_player(args, puzzle);
    let start = Instant::now();
    let mut moves = Vec::new();
    loop {
        match player.step() {
            Ok(Some(mv)) => moves.push(mv),
            Ok(None) => break,
            Err(e) => return Err(format!("Search failed: {}", e)),
        }
    }
    let elapsed = start.elapsed();

    let stats = player.stats();
    println!("Solution found:\n");
    println!("Moves ({}):", moves.len());
    if moves.is_empty() {
        println!("  Already solved.");
    } else {
        for (i, mv) in moves.iter().enumerate() {
            println!("  Move {}: {}", i + 1, mv);
        }
    }
    println!("\nFinal board state:\n{}", player.puzzle());
    println!("Solution length:      {}", stats.solution_length);
    println!("Total nodes explored: {}", stats.nodes_expanded);
    println!("Time (sec):           {:.6}", elapsed.as_secs_f64());
    if !heuristic_from_args(args).is_optimal() {
        println!("(fast mode: solution length is not guaranteed minimal)");
    }
    Ok(())
}

fn solve_trials(args: &Args) -> Result<(), String> {
    let mut total_time = 0.0;
    let mut total_length = 0u64;
    let mut total_nodes = 0u64;

    for trial in 0..args.trials {
        println!("Starting trial {}...", trial + 1);
        let puzzle = make_puzzle(args, trial as u64)?;
        let mut player = make_player(args, puzzle);

        let start = Instant::now();
        player.solve().map_err(|e| format!("Search failed: {}", e))?;
        total_time += start.elapsed().as_secs_f64();

        let stats = player.stats();
        total_length += stats.solution_length;
        total_nodes += stats.nodes_expanded;
    }

    let trials = args.trials as f64;
    println!("Average time (sec):           {:.6}", total_time / trials);
    println!(
        "Average solution length:      {:.2}",
        total_length as f64 / trials
    );
    println!(
        "Average total nodes explored: {:.2}",
        total_nodes as f64 / trials
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let result = if args.trials == 0 {
        solve_once(&args)
    } else {
        solve_trials(&args)
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
