//! Hard hounds: deterministic, and willing to search every escape route

use log::trace;

use std::collections::HashMap;

use super::{best_scored_move, center_distance, Decision, Tactic};
use crate::board::Board;
use crate::moves::Move;
use crate::pieces::{manhattan_distance, Fox, Hound};
use crate::search::{
    all_possible_moves, census_paths_to_top, count_paths_to_top, find_any_valid_move,
    find_emergency_block, find_fox_trapping_move, simulate,
};
use crate::NUM_HOUNDS;

/// Once the Fox is this close to the top, every escape route is searched
const PATH_SEARCH_ROW: i32 = 3;

const WALL_LEFT: [(i32, i32); NUM_HOUNDS] = [(1, 2), (2, 3), (3, 4), (4, 5)];
const WALL_RIGHT: [(i32, i32); NUM_HOUNDS] = [(1, 5), (2, 4), (3, 3), (4, 2)];

pub(crate) fn decide(hounds: &mut [Hound], fox: &Fox, board: &mut Board) -> Option<Decision> {
    if let Some(mv) = find_emergency_block(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::EmergencyBlock));
    }

    if let Some(mv) = find_fox_trapping_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::Trap));
    }

    if fox.row() <= PATH_SEARCH_ROW {
        if let Some(mv) = find_comprehensive_block(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::ComprehensiveBlock));
        }
    }

    if let Some(mv) = find_diagonal_wall_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::DiagonalWall));
    }

    if let Some(mv) = find_strategic_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::Strategic));
    }

    if let Some(mv) = find_tactical_move(hounds, fox, board) {
        return Some(Decision::new(mv, Tactic::Tactical));
    }

    find_any_valid_move(hounds, board).map(|mv| Decision::new(mv, Tactic::AnyValid))
}

/// Cuts every escape route at once if a single move can, otherwise as many as
/// possible
pub(crate) fn find_comprehensive_block(
    hounds: &mut [Hound],
    fox: &Fox,
    board: &mut Board,
) -> Option<Move> {
    let census = census_paths_to_top(fox.position(), board);
    if census.is_empty() {
        return None;
    }
    let critical_points = census.critical_points();
    trace!(
        "{} escape paths, critical points {:?}",
        census.total,
        critical_points
    );

    let candidates = all_possible_moves(hounds, board);
    for point in critical_points.iter() {
        for mv in candidates.iter().filter(|mv| mv.to() == *point) {
            let remaining = simulate(board, hounds, mv, |board, _| {
                count_paths_to_top(fox.position(), board)
            });
            if remaining == 0 {
                return Some(*mv);
            }
        }
    }

    let mut best: Option<(usize, Move)> = None;
    for mv in candidates {
        let remaining = simulate(board, hounds, &mv, |board, _| {
            count_paths_to_top(fox.position(), board)
        });
        let blocked = census.total.saturating_sub(remaining);
        if blocked > best.map_or(0, |(most, _)| most) {
            best = Some((blocked, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

/// Moves the hound furthest from its place in a diagonal wall one step closer
pub(crate) fn find_diagonal_wall_move(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    let targets = if fox.col() < super::BOARD_CENTER {
        &WALL_LEFT
    } else {
        &WALL_RIGHT
    };

    let mut worst: Option<(usize, i32)> = None;
    for (index, (hound, target)) in hounds.iter().zip(targets.iter()).enumerate() {
        let distance = manhattan_distance(hound.position(), *target);
        if worst.map_or(true, |(_, furthest)| distance > furthest) {
            worst = Some((index, distance));
        }
    }
    let (index, distance) = worst?;
    if distance == 0 {
        return None;
    }

    let hound = &hounds[index];
    let target = targets[index];
    let mut best: Option<((i32, i32), i32)> = None;
    for to in hound.possible_moves(board) {
        let improvement = distance - manhattan_distance(to, target);
        if best.map_or(true, |(_, most)| improvement > most) {
            best = Some((to, improvement));
        }
    }
    match best {
        Some((to, improvement)) if improvement > 0 => Some(Move::hound(index, hound.position(), to)),
        _ => None,
    }
}

/// Scores each move on the resulting position and how much it hems the Fox in
pub(crate) fn find_strategic_move(
    hounds: &mut [Hound],
    fox: &Fox,
    board: &mut Board,
) -> Option<Move> {
    let fox_moves = fox.possible_moves(board).len() as i32;

    let mut best: Option<(i32, Move)> = None;
    for mv in all_possible_moves(hounds, board) {
        let (mut score, fox_moves_after) = simulate(board, hounds, &mv, |board, hounds| {
            (
                evaluate_position(hounds, fox),
                fox.possible_moves(board).len() as i32,
            )
        });
        score += (fox_moves - fox_moves_after) * 50;

        let (to_row, to_col) = mv.to();
        if to_row <= fox.row() + 1 {
            score += 30;
        }
        if (to_row - fox.row()).abs() == 1 && (to_col - fox.col()).abs() == 1 {
            score += 40;
        }

        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

/// Static evaluation of a position from the Hounds' point of view
///
/// Rewards hounds that are close to the Fox, that sit on its diagonals and
/// that keep a tight formation, and a Fox that is still far from the top.
pub fn evaluate_position(hounds: &[Hound], fox: &Fox) -> i32 {
    let mut score = 0;

    for hound in hounds {
        score -= hound.distance_to_fox(fox) * 5;
    }

    let rising = fox.row() + fox.col();
    let falling = fox.row() - fox.col();
    for hound in hounds {
        if hound.row() + hound.col() == rising {
            score += 50;
        }
        if hound.row() - hound.col() == falling {
            score += 50;
        }
    }

    score += fox.row() * 15;

    score + formation_score(hounds)
}

fn formation_score(hounds: &[Hound]) -> i32 {
    let mut score = 0;

    let mut row_counts: HashMap<i32, i32> = HashMap::new();
    for hound in hounds {
        *row_counts.entry(hound.row()).or_insert(0) += 1;
    }
    for count in row_counts.values().filter(|&&count| count > 1) {
        score += 20 * (count - 1);
    }

    for (i, a) in hounds.iter().enumerate() {
        for b in &hounds[i + 1..] {
            let spacing = ((a.row() - b.row()).abs(), (a.col() - b.col()).abs());
            if matches!(spacing, (0, 2) | (2, 0) | (1, 1)) {
                score += 15;
            }
        }
    }

    score
}

/// Last resort scoring: close in, move forward, stay central
pub(crate) fn find_tactical_move(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    best_scored_move(hounds, board, |_, hound, to| {
        let mut score = 100 - manhattan_distance(to, fox.position()) * 10;
        if to.0 > hound.row() {
            score += 20;
        }
        score + (3 - std::cmp::min(3, center_distance(to.1))) * 5
    })
}
