//! Search utilities shared by every strategy
//!
//! Candidate hound moves are always enumerated in hound-index order, then in
//! [`HOUND_DIRECTIONS`](crate::pieces::HOUND_DIRECTIONS) order, and every
//! "first"/"best" choice below breaks ties in favour of the earlier candidate.
//!
//! Path counts treat the Fox as if it could keep moving while the Hounds stand
//! still. They are a measure of how open the board is, not a game-tree search.

use std::collections::{BTreeMap, VecDeque};

use log::trace;

use crate::board::Board;
use crate::moves::Move;
use crate::pieces::{Fox, Hound, FOX_DIRECTIONS};
use crate::BOARD_SIZE;

const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// A hound move applied to the live board for the lifetime of the guard
///
/// Dropping the guard moves the piece back, so the board and the hound list
/// are restored on every exit path.
pub struct SimulatedMove<'a> {
    board: &'a mut Board,
    hounds: &'a mut [Hound],
    mv: Move,
}

impl<'a> SimulatedMove<'a> {
    pub fn apply(board: &'a mut Board, hounds: &'a mut [Hound], mv: Move) -> Self {
        let (from_row, from_col) = mv.from();
        let (to_row, to_col) = mv.to();
        board.move_piece(from_row, from_col, to_row, to_col);
        if let Some(index) = mv.hound_index() {
            hounds[index].move_to(to_row, to_col);
        }
        Self { board, hounds, mv }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn hounds(&self) -> &[Hound] {
        self.hounds
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        let (from_row, from_col) = self.mv.from();
        let (to_row, to_col) = self.mv.to();
        self.board.move_piece(to_row, to_col, from_row, from_col);
        if let Some(index) = self.mv.hound_index() {
            self.hounds[index].move_to(from_row, from_col);
        }
    }
}

/// Runs `probe` against the position after `mv`, then takes the move back
pub fn simulate<T, F>(board: &mut Board, hounds: &mut [Hound], mv: &Move, probe: F) -> T
where
    F: FnOnce(&Board, &[Hound]) -> T,
{
    let guard = SimulatedMove::apply(board, hounds, *mv);
    probe(guard.board(), guard.hounds())
}

/// Every legal hound move, in hound-index then direction order
pub fn all_possible_moves(hounds: &[Hound], board: &Board) -> Vec<Move> {
    hounds
        .iter()
        .enumerate()
        .flat_map(|(index, hound)| {
            hound
                .possible_moves(board)
                .into_iter()
                .map(move |to| Move::hound(index, hound.position(), to))
        })
        .collect()
}

/// The first move of the first hound that has one
pub fn find_any_valid_move(hounds: &[Hound], board: &Board) -> Option<Move> {
    hounds.iter().enumerate().find_map(|(index, hound)| {
        hound
            .possible_moves(board)
            .first()
            .map(|&to| Move::hound(index, hound.position(), to))
    })
}

/// The first hound move after which the Fox has no legal move
pub fn find_fox_trapping_move(hounds: &mut [Hound], fox: &Fox, board: &mut Board) -> Option<Move> {
    let (fox_row, fox_col) = fox.position();
    all_possible_moves(hounds, board).into_iter().find(|mv| {
        simulate(board, hounds, mv, |board, _| {
            board.is_fox_blocked(fox_row, fox_col)
        })
    })
}

/// A hound move onto a top-row cell the Fox could otherwise step onto next
pub fn find_emergency_block(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    for escape in fox.possible_moves(board).into_iter().filter(|&(row, _)| row == 0) {
        trace!("fox can escape to {:?}", escape);
        for (index, hound) in hounds.iter().enumerate() {
            if hound.possible_moves(board).contains(&escape) {
                return Some(Move::hound(index, hound.position(), escape));
            }
        }
    }
    None
}

/// One shortest Fox path to each reachable top-row cell
///
/// The path count is the number of top-row cells the Fox can reach, which is
/// the measure the Medium hounds try to drive down.
#[derive(Clone, Default, Debug)]
pub struct TopRowPaths {
    // top-row column => path listed from the start cell to the top row
    by_column: BTreeMap<i32, Vec<(i32, i32)>>,
}

impl TopRowPaths {
    pub fn total(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    /// Top-row columns the Fox can reach
    pub fn columns(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_column.keys().copied()
    }

    pub fn path_to(&self, col: i32) -> Option<&[(i32, i32)]> {
        self.by_column.get(&col).map(Vec::as_slice)
    }

    /// Number of steps on the shortest path to any top-row cell
    pub fn shortest_length(&self) -> Option<usize> {
        self.by_column.values().map(|path| path.len() - 1).min()
    }
}

/// Breadth-first search from `start` to the top row over empty cells
///
/// Each cell is visited once and remembers the cell it was first reached
/// from, so every top-row cell yields a single path. Top-row cells end a path
/// and are not expanded further.
pub fn find_paths_to_top_row(start: (i32, i32), board: &Board) -> TopRowPaths {
    let mut paths = TopRowPaths::default();
    if !board.is_valid_cell(start.0, start.1) {
        return paths;
    }

    let start_index = Board::index(start.0, start.1);
    let mut parent = [None; NUM_CELLS];
    let mut visited = Board::cell_mask(start.0, start.1);
    let mut queue = VecDeque::new();
    queue.push_back(start_index);

    while let Some(current) = queue.pop_front() {
        let (row, col) = Board::coordinates(current);
        if row == 0 {
            paths.by_column.insert(col, trace_back(current, &parent));
            continue;
        }
        for (d_row, d_col) in FOX_DIRECTIONS.iter() {
            let (next_row, next_col) = (row + d_row, col + d_col);
            let mask = Board::cell_mask(next_row, next_col);
            if mask == 0 || visited & mask != 0 || board.is_cell_occupied(next_row, next_col) {
                continue;
            }
            visited |= mask;
            let next = Board::index(next_row, next_col);
            parent[next] = Some(current);
            queue.push_back(next);
        }
    }
    paths
}

fn trace_back(end: usize, parent: &[Option<usize>; NUM_CELLS]) -> Vec<(i32, i32)> {
    let mut path = vec![Board::coordinates(end)];
    let mut cell = end;
    while let Some(previous) = parent[cell] {
        path.push(Board::coordinates(previous));
        cell = previous;
    }
    path.reverse();
    path
}

/// Visits every simple path from `start` to the top row over empty cells
///
/// A path ends at the first top-row cell it reaches. The visitor receives the
/// path from the start cell to its top-row endpoint inclusive.
pub fn for_each_path_to_top<F>(start: (i32, i32), board: &Board, visit: &mut F)
where
    F: FnMut(&[(i32, i32)]),
{
    if !board.is_valid_cell(start.0, start.1) {
        return;
    }
    let mut path = Vec::with_capacity(NUM_CELLS);
    path.push(start);
    extend_path(board, &mut path, Board::cell_mask(start.0, start.1), visit);
}

fn extend_path<F>(board: &Board, path: &mut Vec<(i32, i32)>, visited: u64, visit: &mut F)
where
    F: FnMut(&[(i32, i32)]),
{
    let (row, col) = match path.last() {
        Some(&cell) => cell,
        None => return,
    };
    if row == 0 {
        visit(path.as_slice());
        return;
    }

    for (d_row, d_col) in FOX_DIRECTIONS.iter() {
        let (next_row, next_col) = (row + d_row, col + d_col);
        let mask = Board::cell_mask(next_row, next_col);
        if mask == 0 || visited & mask != 0 || board.is_cell_occupied(next_row, next_col) {
            continue;
        }
        path.push((next_row, next_col));
        extend_path(board, path, visited | mask, visit);
        path.pop();
    }
}

/// Summary of every simple path to the top row
#[derive(Clone, Debug)]
pub struct PathCensus {
    pub total: usize,
    /// Paths per top-row column
    pub by_column: BTreeMap<i32, usize>,
    /// How many paths pass through each cell, excluding path endpoints
    pub frequency: [u32; NUM_CELLS],
}

impl PathCensus {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The most travelled interior cells
    ///
    /// Takes the top 30% (at least one) of the distinct cells seen, ordered by
    /// descending frequency and then by cell index.
    pub fn critical_points(&self) -> Vec<(i32, i32)> {
        let mut points: Vec<usize> = (0..NUM_CELLS).filter(|&i| self.frequency[i] > 0).collect();
        let count = std::cmp::max(1, points.len() * 3 / 10);
        points.sort_by(|a, b| self.frequency[*b].cmp(&self.frequency[*a]).then(a.cmp(b)));
        points
            .into_iter()
            .take(count)
            .map(Board::coordinates)
            .collect()
    }
}

pub fn census_paths_to_top(start: (i32, i32), board: &Board) -> PathCensus {
    let mut census = PathCensus {
        total: 0,
        by_column: BTreeMap::new(),
        frequency: [0; NUM_CELLS],
    };
    for_each_path_to_top(start, board, &mut |path: &[(i32, i32)]| {
        census.total += 1;
        if let Some(&(_, col)) = path.last() {
            *census.by_column.entry(col).or_insert(0) += 1;
        }
        if path.len() > 2 {
            for &(row, col) in &path[1..path.len() - 1] {
                census.frequency[Board::index(row, col)] += 1;
            }
        }
    });
    census
}

/// Number of simple paths to the top row, without the per-cell census
pub fn count_paths_to_top(start: (i32, i32), board: &Board) -> usize {
    let mut total = 0;
    for_each_path_to_top(start, board, &mut |_: &[(i32, i32)]| total += 1);
    total
}
