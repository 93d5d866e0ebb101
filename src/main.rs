mod error;
mod puzzle;
mod solver;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use error::Error;
use puzzle::Board;

#[derive(Parser)]
#[command(about = "Greedy 8-puzzle solver: mean move count over scrambled trials")]
struct Args {
    /// Number of scramble-and-solve trials to run
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,

    /// Seed for the random number generator; omitted means a fresh
    /// entropy-based seed each run
    #[arg(long)]
    seed: Option<u64>,

    /// Solve this one board instead of running scrambled trials, given as
    /// nine comma-separated values with 9 for the blank,
    /// e.g. "4,3,8,9,7,2,6,1,5"
    #[arg(long)]
    board: Option<String>,

    /// Print each trial's scrambled board and move count
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> error::Result<()> {
    // one RNG per process; all trials advance the same stream
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(input) = &args.board {
        let mut board = parse_board(input)?;
        if args.verbose {
            println!("solving (distance {}):\n{}", board.distance(), board);
        }
        let moves = solver::solve(&mut board, &mut rng)?;
        println!("solved in {} moves", moves);
        return Ok(());
    }

    let mut total: u64 = 0;
    for trial in 0..args.trials {
        let mut board = Board::solved();
        puzzle::scramble(&mut board, &mut rng)?;
        if args.verbose {
            println!(
                "trial {} scrambled (distance {}):\n{}",
                trial,
                board.distance(),
                board
            );
        }
        let moves = solver::solve(&mut board, &mut rng)?;
        if args.verbose {
            println!("trial {} solved in {} moves", trial, moves);
        }
        total += u64::from(moves);
    }

    println!("mean of movements: {}", total / u64::from(args.trials));
    Ok(())
}

fn parse_board(input: &str) -> error::Result<Board> {
    let values = input
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| Error::InvalidBoard {
            reason: e.to_string(),
        })?;
    let cells: [u8; 9] = values.try_into().map_err(|_| Error::InvalidBoard {
        reason: "expected 9 comma-separated values".to_string(),
    })?;
    Board::from_cells(cells)
}
