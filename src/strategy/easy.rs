//! Easy hounds: every good idea only gets tried some of the time

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Decision, Tactic};
use crate::board::Board;
use crate::moves::Move;
use crate::pieces::{manhattan_distance, Fox, Hound};
use crate::search::{all_possible_moves, find_any_valid_move, find_emergency_block, find_fox_trapping_move};

const TRAP_CHANCE: f64 = 0.5;
const EMERGENCY_CHANCE: f64 = 0.3;
const APPROACH_CHANCE: f64 = 0.5;

pub(crate) fn decide<R: Rng + ?Sized>(
    hounds: &mut [Hound],
    fox: &Fox,
    board: &mut Board,
    rng: &mut R,
) -> Option<Decision> {
    if rng.gen_bool(TRAP_CHANCE) {
        if let Some(mv) = find_fox_trapping_move(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::Trap));
        }
    }

    if rng.gen_bool(EMERGENCY_CHANCE) {
        if let Some(mv) = find_emergency_block(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::EmergencyBlock));
        }
    }

    if rng.gen_bool(APPROACH_CHANCE) {
        if let Some(mv) = find_approach_move(hounds, fox, board) {
            return Some(Decision::new(mv, Tactic::Approach));
        }
    }

    if let Some(&mv) = all_possible_moves(hounds, board).choose(rng) {
        return Some(Decision::new(mv, Tactic::Random));
    }

    find_any_valid_move(hounds, board).map(|mv| Decision::new(mv, Tactic::AnyValid))
}

/// Walks the hound nearest the Fox one step closer
///
/// If the nearest hound is stuck, the first other hound able to move takes
/// its first move instead.
pub(crate) fn find_approach_move(hounds: &[Hound], fox: &Fox, board: &Board) -> Option<Move> {
    let mut closest: Option<(usize, i32)> = None;
    for (index, hound) in hounds.iter().enumerate() {
        let distance = hound.distance_to_fox(fox);
        if closest.map_or(true, |(_, best)| distance < best) {
            closest = Some((index, distance));
        }
    }
    let (closest, _) = closest?;

    let hound = &hounds[closest];
    let mut best: Option<((i32, i32), i32)> = None;
    for to in hound.possible_moves(board) {
        let distance = manhattan_distance(to, fox.position());
        if best.map_or(true, |(_, best)| distance < best) {
            best = Some((to, distance));
        }
    }
    if let Some((to, _)) = best {
        return Some(Move::hound(closest, hound.position(), to));
    }

    hounds
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != closest)
        .find_map(|(index, hound)| {
            hound
                .possible_moves(board)
                .first()
                .map(|&to| Move::hound(index, hound.position(), to))
        })
}
