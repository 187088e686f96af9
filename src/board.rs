use anyhow::{anyhow, Result};

use std::fmt;

use crate::pieces::{Fox, Hound, FOX_DIRECTIONS};
use crate::{BOARD_SIZE, NUM_HOUNDS};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CellState {
    Empty,
    Fox,
    Hound,
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Fox => 'F',
            CellState::Hound => 'H',
        }
    }
}

/// The authoritative grid of the game
///
/// Cells are stored top-to-bottom, left-to-right at `row * BOARD_SIZE + col`.
/// A separate mask mirrors which cells are occupied; a bit is set in the mask
/// exactly when the stored cell is not [`CellState::Empty`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [CellState; BOARD_SIZE * BOARD_SIZE],
    // mask of all occupied cells
    occupied: u64,
}

impl Board {
    /// Creates a board with no pieces on it
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; BOARD_SIZE * BOARD_SIZE],
            occupied: 0,
        }
    }

    /// Creates a board in the starting layout (see [`Board::initialize`])
    pub fn starting() -> Self {
        let mut board = Self::new();
        board.initialize();
        board
    }

    /// Clears the board and places the Hounds on the dark squares of the top
    /// row and the Fox in the bottom left corner
    pub fn initialize(&mut self) {
        self.cells = [CellState::Empty; BOARD_SIZE * BOARD_SIZE];
        self.occupied = 0;

        for (row, col) in starting_hound_cells().iter() {
            self.set_cell_state(*row, *col, CellState::Hound);
        }
        let (fox_row, fox_col) = STARTING_FOX_CELL;
        self.set_cell_state(fox_row, fox_col, CellState::Fox);
    }

    /// Parses an 8x8 text diagram into a board and its pieces
    ///
    /// Each row is one line of `.` (empty), `F` (fox) or `H` (hound); blank
    /// lines and surrounding whitespace are ignored. Hounds are indexed in
    /// reading order.
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<(Self, Fox, [Hound; NUM_HOUNDS])> {
        let mut board = Self::new();
        let mut fox = None;
        let mut hounds = Vec::with_capacity(NUM_HOUNDS);

        let rows: Vec<&str> = diagram
            .as_ref()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(anyhow!(
                "expected {} rows in board diagram, found {}",
                BOARD_SIZE,
                rows.len()
            ));
        }

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE {
                return Err(anyhow!(
                    "row {} of board diagram must be {} cells wide: '{}'",
                    row,
                    BOARD_SIZE,
                    line
                ));
            }
            for (col, symbol) in line.chars().enumerate() {
                let (row, col) = (row as i32, col as i32);
                match symbol {
                    '.' => {}
                    'F' | 'f' => {
                        if fox.is_some() {
                            return Err(anyhow!("board diagram has more than one fox"));
                        }
                        board.set_cell_state(row, col, CellState::Fox);
                        fox = Some(Fox::new(row, col));
                    }
                    'H' | 'h' => {
                        board.set_cell_state(row, col, CellState::Hound);
                        hounds.push(Hound::new(row, col));
                    }
                    _ => return Err(anyhow!("could not parse '{}' as a board cell", symbol)),
                }
            }
        }

        let fox = fox.ok_or_else(|| anyhow!("board diagram has no fox"))?;
        let found = hounds.len();
        let hounds: [Hound; NUM_HOUNDS] = hounds.try_into().map_err(|_| {
            anyhow!(
                "board diagram must hold exactly {} hounds, found {}",
                NUM_HOUNDS,
                found
            )
        })?;
        Ok((board, fox, hounds))
    }

    /// Renders the board in the same format accepted by [`Board::from_diagram`]
    pub fn to_diagram(&self) -> String {
        let mut diagram = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                diagram.push(self.cells[row * BOARD_SIZE + col].symbol());
            }
            diagram.push('\n');
        }
        diagram
    }

    /// The index of a cell in the cell array, only meaningful for valid cells
    pub fn index(row: i32, col: i32) -> usize {
        row as usize * BOARD_SIZE + col as usize
    }

    /// The mask bit of a cell, 0 for cells off the board
    pub fn cell_mask(row: i32, col: i32) -> u64 {
        if Self::in_bounds(row, col) {
            1 << Self::index(row, col)
        } else {
            0
        }
    }

    /// Converts a cell index back into a row and column
    pub fn coordinates(index: usize) -> (i32, i32) {
        ((index / BOARD_SIZE) as i32, (index % BOARD_SIZE) as i32)
    }

    fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    pub fn is_valid_cell(&self, row: i32, col: i32) -> bool {
        Self::in_bounds(row, col)
    }

    /// The state of a cell, [`CellState::Empty`] for cells off the board
    pub fn cell_state(&self, row: i32, col: i32) -> CellState {
        if Self::in_bounds(row, col) {
            self.cells[Self::index(row, col)]
        } else {
            CellState::Empty
        }
    }

    pub fn is_cell_occupied(&self, row: i32, col: i32) -> bool {
        self.occupied & Self::cell_mask(row, col) != 0
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    /// Every cell holding the given piece kind, in reading order
    pub fn cells_holding(&self, state: CellState) -> Vec<(i32, i32)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == state)
            .map(|(index, _)| Self::coordinates(index))
            .collect()
    }

    pub fn fox_cells(&self) -> Vec<(i32, i32)> {
        self.cells_holding(CellState::Fox)
    }

    /// Sets the state of a cell, keeping the occupancy mask in step
    pub fn set_cell_state(&mut self, row: i32, col: i32, state: CellState) {
        debug_assert!(
            Self::in_bounds(row, col),
            "cell ({}, {}) is off the board",
            row,
            col
        );
        if !Self::in_bounds(row, col) {
            return;
        }

        let mask = Self::cell_mask(row, col);
        self.cells[Self::index(row, col)] = state;
        if state.is_empty() {
            self.occupied &= !mask;
        } else {
            self.occupied |= mask;
        }
    }

    /// Checks whether a single diagonal step is legal for a fox or a hound
    ///
    /// Total over all inputs: coordinates off the board are simply illegal.
    pub fn is_valid_move(
        &self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
        is_fox: bool,
    ) -> bool {
        if !self.is_valid_cell(from_row, from_col) || !self.is_valid_cell(to_row, to_col) {
            return false;
        }

        let expected = if is_fox {
            CellState::Fox
        } else {
            CellState::Hound
        };
        if self.cell_state(from_row, from_col) != expected {
            return false;
        }

        if !self.cell_state(to_row, to_col).is_empty() {
            return false;
        }

        let row_diff = to_row - from_row;
        let col_diff = (to_col - from_col).abs();
        if col_diff != 1 || row_diff.abs() != 1 {
            return false;
        }

        // hounds only ever move down the board
        is_fox || row_diff > 0
    }

    /// Relocates whatever occupies the source cell to the destination
    ///
    /// No legality check is made, so the same primitive serves real moves and
    /// the simulate/undo steps of the search.
    pub fn move_piece(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) {
        let piece = self.cell_state(from_row, from_col);
        self.set_cell_state(from_row, from_col, CellState::Empty);
        self.set_cell_state(to_row, to_col, piece);
    }

    /// True when the fox at the given cell has no legal move
    pub fn is_fox_blocked(&self, fox_row: i32, fox_col: i32) -> bool {
        if !Self::in_bounds(fox_row, fox_col) {
            return true;
        }
        !FOX_DIRECTIONS.iter().any(|(d_row, d_col)| {
            self.is_valid_move(fox_row, fox_col, fox_row + d_row, fox_col + d_col, true)
        })
    }

    pub fn has_fox_escaped(&self, fox_row: i32) -> bool {
        fox_row == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_diagram())
    }
}

/// Where the Fox starts every game
pub const STARTING_FOX_CELL: (i32, i32) = (BOARD_SIZE as i32 - 1, 0);

/// Where the Hounds start every game, by hound index
pub fn starting_hound_cells() -> [(i32, i32); NUM_HOUNDS] {
    let mut cells = [(0, 0); NUM_HOUNDS];
    for (index, cell) in cells.iter_mut().enumerate() {
        *cell = (0, 2 * index as i32 + 1);
    }
    cells
}
