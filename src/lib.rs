//! An engine and computer opponent for the board game 'Fox and Hounds'
//!
//! One Fox, controlled by a human, tries to reach the top row of an 8x8 board
//! while four computer-controlled Hounds try to trap it. Every piece moves one
//! square diagonally; Hounds may only move down the board.
//!
//! The Hounds are driven by one of three strategies (see [`strategy::Difficulty`]),
//! each an ordered cascade of tactics built on the shared search utilities in
//! [`search`].
//!
//! # Basic Usage
//!
//! ```
//! use fox_hounds_ai::{manager::GameManager, strategy::Difficulty};
//!
//! let mut game = GameManager::new().with_seed(7);
//! game.set_difficulty(Difficulty::Hard);
//!
//! assert!(game.submit_fox_move(6, 1));
//! assert!(game.request_ai_move());
//! assert!(game.game_state().is_fox_turn());
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod pieces;

pub mod moves;

pub mod game_state;

pub mod search;

pub mod strategy;

pub mod manager;

pub mod arena;

mod test;

/// The width and height of the game board in tiles
pub const BOARD_SIZE: usize = 8;

/// The number of Hounds in play
pub const NUM_HOUNDS: usize = 4;

// ensure that every cell of the board fits in a u64 mask for the search scratch state
const_assert!(BOARD_SIZE * BOARD_SIZE <= 64);
// the Hounds start on alternate squares of the top row
const_assert_eq!(NUM_HOUNDS * 2, BOARD_SIZE);
