//! Hound strategies
//!
//! Each difficulty is an ordered cascade of tactics: the first tactic that
//! produces a move decides the turn. The random source is passed in by the
//! caller so that games can be replayed from a seed.

use anyhow::{anyhow, Result};
use log::debug;
use rand::Rng;

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::moves::Move;
use crate::pieces::{Fox, Hound};
use crate::BOARD_SIZE;

pub(crate) mod easy;
pub(crate) mod hard;
pub(crate) mod medium;

pub use hard::evaluate_position;

/// The column the centre-control scores measure from
const BOARD_CENTER: i32 = BOARD_SIZE as i32 / 2;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Picks the Hounds' next move, reporting which tactic chose it
    ///
    /// `hounds` and `board` are used as scratch space while candidate moves are
    /// tried, and are returned exactly as they were given. Returns `None` only
    /// when no hound has a legal move.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        hounds: &mut [Hound],
        fox: &Fox,
        board: &mut Board,
        rng: &mut R,
    ) -> Option<Decision> {
        let decision = match self {
            Difficulty::Easy => easy::decide(hounds, fox, board, rng),
            Difficulty::Medium => medium::decide(hounds, fox, board, rng),
            Difficulty::Hard => hard::decide(hounds, fox, board),
        };
        match &decision {
            Some(decision) => debug!(
                "{} hounds chose {} by {:?}",
                self.name(),
                decision.mv,
                decision.tactic
            ),
            None => debug!("{} hounds have no legal move", self.name()),
        }
        decision
    }

    pub fn best_move<R: Rng + ?Sized>(
        &self,
        hounds: &mut [Hound],
        fox: &Fox,
        board: &mut Board,
        rng: &mut R,
    ) -> Option<Move> {
        self.decide(hounds, fox, board, rng).map(|decision| decision.mv)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown difficulty '{}', expected easy, medium or hard", s))
    }
}

/// The cascade step that produced a decision
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Tactic {
    Trap,
    EmergencyBlock,
    Approach,
    Random,
    PathReduction,
    DefensiveRow,
    Tactical,
    ComprehensiveBlock,
    DiagonalWall,
    Strategic,
    AnyValid,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Decision {
    pub mv: Move,
    pub tactic: Tactic,
}

impl Decision {
    fn new(mv: Move, tactic: Tactic) -> Self {
        Self { mv, tactic }
    }
}

/// The highest scoring legal move, first candidate on ties
fn best_scored_move<F>(hounds: &[Hound], board: &Board, mut score: F) -> Option<Move>
where
    F: FnMut(usize, &Hound, (i32, i32)) -> i32,
{
    let mut best: Option<(i32, Move)> = None;
    for (index, hound) in hounds.iter().enumerate() {
        for to in hound.possible_moves(board) {
            let value = score(index, hound, to);
            if best.map_or(true, |(best_value, _)| value > best_value) {
                best = Some((value, Move::hound(index, hound.position(), to)));
            }
        }
    }
    best.map(|(_, mv)| mv)
}

fn center_distance(col: i32) -> i32 {
    (col - BOARD_CENTER).abs()
}
