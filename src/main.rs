use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::Level;

use std::cell::Cell;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use fox_hounds_ai::{
    arena::{self, FoxPolicy},
    manager::GameManager,
    strategy::Difficulty,
};

mod terminal;
use terminal::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Fox and Hounds against the computer", long_about = None)]
struct Args {
    /// Hound strategy: easy, medium or hard
    #[arg(long, default_value = "easy", global = true)]
    difficulty: Difficulty,
    /// Seed for the computer's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Pause before the Hounds reply, in milliseconds
    #[arg(long, default_value_t = 500)]
    ai_delay_ms: u64,
    /// Start from a board diagram file instead of the usual layout
    #[arg(long)]
    position: Option<PathBuf>,
    /// Log more (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play as the Fox (the default)
    Play,
    /// Pit the Hounds against a scripted Fox and report the results
    Arena {
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Fox policy: random or greedy
        #[arg(long, default_value = "random")]
        fox: FoxPolicy,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level)?;

    match &args.command {
        Some(Command::Arena { games, fox }) => {
            let seed = args.seed.unwrap_or_else(rand::random);
            println!("Arena seed: {}", seed);
            let report = arena::run(args.difficulty, *fox, *games, seed);
            println!("{}", report);
            Ok(())
        }
        Some(Command::Play) | None => play(&args),
    }
}

fn play(args: &Args) -> Result<()> {
    let mut game = match &args.position {
        Some(path) => GameManager::from_diagram(std::fs::read_to_string(path)?)?,
        None => GameManager::new(),
    };
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    game.set_difficulty(args.difficulty);

    // redraw only after the game has actually changed
    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    game.subscribe(move || flag.set(true));

    let stdin = stdin();

    println!("Welcome to Fox and Hounds\n");
    println!("{}\n", HELP);

    loop {
        if dirty.replace(false) {
            display(&game)?;
        }

        let (game_over, fox_turn) = (
            game.game_state().is_game_over(),
            game.game_state().is_fox_turn(),
        );
        if !game_over && !fox_turn {
            std::thread::sleep(Duration::from_millis(args.ai_delay_ms));
            game.request_ai_move();
            if let Some(decision) = game.last_decision() {
                println!("{}", decision.mv);
            }
            continue;
        }
        if game_over {
            println!("Type 'new' to play again or 'quit' to leave.");
        }

        print!("Move input > ");
        stdout().flush()?;
        let mut buffer = String::new();
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }

        match Input::parse(&buffer) {
            Err(err) => println!("{}", err),
            Ok(Input::Move(row, col)) => {
                if !game.submit_fox_move(row, col) {
                    println!("The fox cannot move to ({}, {})", row, col);
                }
            }
            Ok(Input::New) => game.new_game(),
            Ok(Input::Difficulty(difficulty)) => {
                game.set_difficulty(difficulty);
                println!("Difficulty set to {}", difficulty);
            }
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Quit) => break,
        }
    }
    Ok(())
}
