//! Medium hounds: always take a trap, usually block, otherwise close in

use log::trace;
use rand::Rng;

use super::{best_scored_move, center_distance, Decision, Tactic};
use crate::board::Board;
use crate::moves::Move;
use crate::pieces::{manhattan_distance, Fox, Hound};
use crate::search::{
    all_possible_moves, find_any_valid_move, find_emergency_block, find_fox_trapping_move,
    find_paths_to_top_row, simulate,
};

const EMERGENCY_CHANCE: f64 = 0.9;
const PATH_BLOCK_CHANCE: f64 = 0.8;
const DEFENSIVE_ROW_CHANCE: f64 = 0.7;

pub(crate) fn decide<R: Rng + ?Sized>(
    hounds: &mut [Hound],
    fox: &Fox,
    board: &mut Board,
    rng: &mut R,
) -> Option<Decision> {
    if let Some(mv) = find_fox_trapping_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::Trap));
    }

    if rng.gen_bool(EMERGENCY_CHANCE) {
        if let Some(mv) = find_emergency_block(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::EmergencyBlock));
        }
    }

    if rng.gen_bool(PATH_BLOCK_CHANCE) {
        if let Some(mv) = find_path_reducing_move(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::PathReduction));
        }
    }

    if rng.gen_bool(DEFENSIVE_ROW_CHANCE) {
        if let Some(mv) = find_defensive_row_move(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::DefensiveRow));
        }
    }

    if let Some(mv) = find_tactical_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::Tactical));
    }

    find_any_valid_move(hounds, board).map(|mv| Decision::new(mv, Tactic::AnyValid))
}

/// The move that cuts the Fox off from the most top-row cells, if any does
pub(crate) fn find_path_reducing_move(
    hounds: &mut [Hound],
    fox: &Fox,
    board: &mut Board,
) -> Option<Move> {
    let before = find_paths_to_top_row(fox.position(), board);
    if before.is_empty() {
        return None;
    }
    let before = before.total() as i64;
    trace!("fox reaches {} top-row cells", before);

    let mut best: Option<(i64, Move)> = None;
    for mv in all_possible_moves(hounds, board) {
        let after = simulate(board, hounds, &mv, |board, _| {
            find_paths_to_top_row(fox.position(), board).total() as i64
        });
        let reduction = before - after;
        if reduction > best.map_or(0, |(most, _)| most) {
            best = Some((reduction, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

/// Brings a hound onto the row two ahead of the Fox
pub(crate) fn find_defensive_row_move(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    let target_row = if fox.row() <= 2 {
        1
    } else {
        std::cmp::max(1, fox.row() - 2)
    };

    let held_columns: Vec<i32> = hounds
        .iter()
        .filter(|hound| hound.row() == target_row)
        .map(Hound::col)
        .collect();

    let mut best: Option<(i32, Move)> = None;
    for (index, hound) in hounds.iter().enumerate() {
        if hound.row() == target_row {
            continue;
        }
        for to in hound.possible_moves(board) {
            if to.0 != target_row {
                continue;
            }
            let mut score = 100;
            if held_columns.iter().all(|col| (col - to.1).abs() >= 2) {
                score += 50;
            }
            score -= center_distance(to.1) * 5;

            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, Move::hound(index, hound.position(), to)));
            }
        }
    }
    best.map(|(_, mv)| mv)
}

/// Scores every move on closeness, advance, blocking and formation
pub(crate) fn find_tactical_move(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    let fox_moves = fox.possible_moves(board);

    best_scored_move(hounds, board, |index, hound, to| {
        let mut score = (10 - manhattan_distance(to, fox.position())) * 5;
        if to.0 > hound.row() && to.0 <= fox.row() {
            score += 20;
        }
        if fox_moves.contains(&to) {
            score += 40;
        }
        score += (4 - center_distance(to.1)) * 5;

        let same_row = hounds
            .iter()
            .enumerate()
            .filter(|(other, other_hound)| *other != index && other_hound.row() == to.0)
            .count() as i32;
        score + same_row * 15
    })
}
