use npuzzle_solver::engine::Puzzle;
use std::io::{self, Write};

fn main() {
    let mut puzzle = Puzzle::new_scrambled(3, 3, 20);
    let mut steps = 0u32;
    println!("Welcome to the N-Puzzle!");
    println!("Slide tiles into the blank until the board reads 0..{} in order.", puzzle.blank_value() - 1);

    loop {
        println!("---------------------");
        println!("Steps: {}", steps);
        println!("{}", puzzle);

        if puzzle.is_goal() {
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Steps: {}", steps);
            println!("---------------------");
            break;
        }

        print!("Enter the tile to slide, or 'q' to quit: ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        match trimmed_input.parse::<u8>() {
            Ok(tile) if tile < puzzle.blank_value() => {
                if puzzle.move_tile(tile) {
                    steps += 1;
                } else {
                    println!("Invalid move: tile {} is not next to the blank.", tile);
                }
            }
            Ok(tile) => {
                println!(
                    "Invalid tile: {} is out of range (tiles are 0 to {}).",
                    tile,
                    puzzle.blank_value() - 1
                );
            }
            Err(_) => {
                println!("Invalid input: enter a tile number (e.g., '4') or 'q'.");
            }
        }
    }
}
