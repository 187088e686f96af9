//! Self-play between a scripted Fox and the computer Hounds
//!
//! Used to compare the difficulty levels over many games. Each game gets its
//! own [`GameManager`] so games can run in parallel.

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::game_state::Winner;
use crate::manager::GameManager;
use crate::search::find_paths_to_top_row;
use crate::strategy::Difficulty;

/// Games still running after this many plies are abandoned
pub const MAX_PLIES: usize = 200;

// keeps the Fox's random stream apart from the Hounds' for the same game seed
const FOX_SEED_SALT: u64 = 0x5DEE_CE66_D1CE_F0C5;

/// How the scripted Fox picks its moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FoxPolicy {
    /// Any legal move, uniformly
    Random,
    /// Escape when possible, otherwise head for the nearest open top-row cell
    Greedy,
}

impl FoxPolicy {
    /// The Fox's next destination, `None` if it cannot move
    pub fn choose<R: Rng + ?Sized>(&self, game: &GameManager, rng: &mut R) -> Option<(i32, i32)> {
        let moves = game.fox_moves();
        match self {
            FoxPolicy::Random => moves.choose(rng).copied(),
            FoxPolicy::Greedy => {
                if let Some(&escape) = moves.iter().find(|(row, _)| *row == 0) {
                    return Some(escape);
                }

                let (fox_row, fox_col) = game.fox().position();
                let mut best: Option<((i32, i32), usize)> = None;
                for &(row, col) in moves.iter() {
                    let mut board = game.board().clone();
                    board.move_piece(fox_row, fox_col, row, col);
                    if let Some(length) = find_paths_to_top_row((row, col), &board).shortest_length() {
                        if best.map_or(true, |(_, shortest)| length < shortest) {
                            best = Some(((row, col), length));
                        }
                    }
                }
                best.map(|(to, _)| to).or_else(|| moves.first().copied())
            }
        }
    }
}

impl fmt::Display for FoxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoxPolicy::Random => write!(f, "random"),
            FoxPolicy::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for FoxPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(FoxPolicy::Random),
            "greedy" => Ok(FoxPolicy::Greedy),
            _ => Err(anyhow!("unknown fox policy '{}', expected random or greedy", s)),
        }
    }
}

/// How a single arena game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameOutcome {
    /// `None` for a game abandoned at [`MAX_PLIES`]
    pub winner: Option<Winner>,
    pub plies: usize,
}

#[derive(Clone, Debug)]
pub struct ArenaReport {
    pub difficulty: Difficulty,
    pub policy: FoxPolicy,
    pub games: usize,
    pub fox_wins: usize,
    pub hound_wins: usize,
    pub unfinished: usize,
    pub total_plies: usize,
}

impl ArenaReport {
    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }
}

impl fmt::Display for ArenaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} hounds vs {} fox over {} games",
            self.difficulty, self.policy, self.games
        )?;
        writeln!(f, "  Hounds win: {}", self.hound_wins)?;
        writeln!(f, "  Fox wins:   {}", self.fox_wins)?;
        writeln!(f, "  Unfinished: {}", self.unfinished)?;
        write!(f, "  Average length: {:.1} plies", self.average_plies())
    }
}

/// Plays one complete game from the starting position
pub fn play_game(difficulty: Difficulty, policy: FoxPolicy, seed: u64) -> GameOutcome {
    let mut game = GameManager::new()
        .with_seed(seed)
        .with_difficulty(difficulty);
    let mut fox_rng = StdRng::seed_from_u64(seed ^ FOX_SEED_SALT);

    let mut plies = 0;
    while !game.game_state().is_game_over() && plies < MAX_PLIES {
        if game.game_state().is_fox_turn() {
            let moved = match policy.choose(&game, &mut fox_rng) {
                Some((row, col)) => game.submit_fox_move(row, col),
                None => false,
            };
            if !moved {
                break;
            }
            plies += 1;
        } else if game.request_ai_move() {
            plies += 1;
        }
    }

    GameOutcome {
        winner: game.game_state().winner(),
        plies,
    }
}

/// Plays `games` games in parallel, game `i` seeded with `seed + i`
pub fn run(difficulty: Difficulty, policy: FoxPolicy, games: usize, seed: u64) -> ArenaReport {
    let start = Instant::now();

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing {msg}: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    progress.set_message(&format!("{} vs {}", difficulty, policy));

    let outcomes: Vec<GameOutcome> = (0..games)
        .into_par_iter()
        .map(|index| {
            let outcome = play_game(difficulty, policy, seed.wrapping_add(index as u64));
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish();

    let mut report = ArenaReport {
        difficulty,
        policy,
        games,
        fox_wins: 0,
        hound_wins: 0,
        unfinished: 0,
        total_plies: 0,
    };
    for outcome in outcomes.iter() {
        match outcome.winner {
            Some(Winner::Fox) => report.fox_wins += 1,
            Some(Winner::Hounds) => report.hound_wins += 1,
            None => report.unfinished += 1,
        }
        report.total_plies += outcome.plies;
    }

    info!(
        "arena finished {} games in {:.1}s",
        games,
        start.elapsed().as_secs_f64()
    );
    report
}
