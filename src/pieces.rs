//! The Fox and the Hounds
//!
//! Pieces only record where they stand. Keeping that record in step with the
//! [`Board`] is the job of whoever moves them.

use crate::board::Board;

/// Fox step directions as (row, col) deltas: up-left, up-right, down-left, down-right
pub const FOX_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Hound step directions as (row, col) deltas: down-left, down-right
pub const HOUND_DIRECTIONS: [(i32, i32); 2] = [(1, -1), (1, 1)];

/// Manhattan distance between two cells
pub fn manhattan_distance(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Fox {
    row: i32,
    col: i32,
}

impl Fox {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn move_to(&mut self, row: i32, col: i32) {
        self.row = row;
        self.col = col;
    }

    /// Legal destinations, in [`FOX_DIRECTIONS`] order
    pub fn possible_moves(&self, board: &Board) -> Vec<(i32, i32)> {
        FOX_DIRECTIONS
            .iter()
            .map(|(d_row, d_col)| (self.row + d_row, self.col + d_col))
            .filter(|&(row, col)| board.is_valid_move(self.row, self.col, row, col, true))
            .collect()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Hound {
    row: i32,
    col: i32,
}

impl Hound {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn move_to(&mut self, row: i32, col: i32) {
        self.row = row;
        self.col = col;
    }

    /// Legal destinations, in [`HOUND_DIRECTIONS`] order
    pub fn possible_moves(&self, board: &Board) -> Vec<(i32, i32)> {
        HOUND_DIRECTIONS
            .iter()
            .map(|(d_row, d_col)| (self.row + d_row, self.col + d_col))
            .filter(|&(row, col)| board.is_valid_move(self.row, self.col, row, col, false))
            .collect()
    }

    pub fn distance_to_fox(&self, fox: &Fox) -> i32 {
        manhattan_distance(self.position(), fox.position())
    }
}
