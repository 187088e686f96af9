//! Turn sequencing between the human Fox and the computer Hounds

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{starting_hound_cells, Board, CellState, STARTING_FOX_CELL};
use crate::game_state::{GameState, Winner};
use crate::moves::Actor;
use crate::pieces::{Fox, Hound};
use crate::search::find_any_valid_move;
use crate::strategy::{Decision, Difficulty};
use crate::NUM_HOUNDS;

const HOUNDS_STUCK_MESSAGE: &str = "Hounds can't move! Fox wins!";

/// Owns a game and applies moves to it
///
/// Every successful change (new game, Fox move, Hound move, game over) is
/// announced to the subscribed listeners, which are called synchronously and
/// in subscription order.
pub struct GameManager {
    board: Board,
    fox: Fox,
    hounds: [Hound; NUM_HOUNDS],
    state: GameState,
    difficulty: Difficulty,
    rng: StdRng,
    last_decision: Option<Decision>,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl GameManager {
    /// A new game in the starting position, with an entropy-seeded AI
    pub fn new() -> Self {
        let (fox_row, fox_col) = STARTING_FOX_CELL;
        let mut hounds = [Hound::new(0, 0); NUM_HOUNDS];
        for (hound, (row, col)) in hounds.iter_mut().zip(starting_hound_cells().iter()) {
            hound.move_to(*row, *col);
        }
        Self::from_position(Board::starting(), Fox::new(fox_row, fox_col), hounds)
    }

    /// A game continuing from an arbitrary position, Fox to move
    ///
    /// The pieces must agree with the cells they occupy on `board`.
    pub fn from_position(board: Board, fox: Fox, hounds: [Hound; NUM_HOUNDS]) -> Self {
        debug_assert_eq!(board.fox_cells(), vec![fox.position()]);
        debug_assert!(hounds
            .iter()
            .all(|hound| board.cell_state(hound.row(), hound.col()) == CellState::Hound));
        Self {
            board,
            fox,
            hounds,
            state: GameState::new(),
            difficulty: Difficulty::default(),
            rng: StdRng::from_entropy(),
            last_decision: None,
            listeners: Vec::new(),
        }
    }

    /// Parses a position with [`Board::from_diagram`]
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<Self> {
        let (board, fox, hounds) = Board::from_diagram(diagram)?;
        Ok(Self::from_position(board, fox, hounds))
    }

    /// Makes the AI's random choices reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Resets the pieces and the turn, keeping the difficulty
    pub fn new_game(&mut self) {
        self.board.initialize();
        let (fox_row, fox_col) = STARTING_FOX_CELL;
        self.fox.move_to(fox_row, fox_col);
        for (hound, (row, col)) in self.hounds.iter_mut().zip(starting_hound_cells().iter()) {
            hound.move_to(*row, *col);
        }
        self.state.reset();
        self.last_decision = None;
        info!("new game at {} difficulty", self.difficulty);
        self.notify();
    }

    /// Moves the Fox if the game allows it, returning whether it moved
    pub fn submit_fox_move(&mut self, to_row: i32, to_col: i32) -> bool {
        if self.state.is_game_over() || !self.state.is_fox_turn() {
            debug!("fox move rejected: not the fox's turn");
            return false;
        }
        let (from_row, from_col) = self.fox.position();
        if !self.board.is_valid_move(from_row, from_col, to_row, to_col, true) {
            debug!("fox move to ({}, {}) rejected: illegal", to_row, to_col);
            return false;
        }

        self.board.move_piece(from_row, from_col, to_row, to_col);
        self.fox.move_to(to_row, to_col);
        debug!("fox moves from ({}, {}) to ({}, {})", from_row, from_col, to_row, to_col);

        if self.board.has_fox_escaped(self.fox.row()) {
            self.state.set_game_over(Winner::Fox);
            info!("fox escaped at ({}, {})", to_row, to_col);
        } else {
            self.state.set_fox_turn(false);
        }
        self.notify();
        true
    }

    /// Lets the active strategy move a hound, returning whether one moved
    ///
    /// If no hound can move, the game ends with the Fox as the winner.
    pub fn request_ai_move(&mut self) -> bool {
        if self.state.is_game_over() || self.state.is_fox_turn() {
            return false;
        }

        let decision = self.difficulty.decide(
            &mut self.hounds,
            &self.fox,
            &mut self.board,
            &mut self.rng,
        );
        let decision = match decision {
            Some(decision) => decision,
            None => {
                self.state.set_game_over(Winner::Fox);
                self.state.set_status_message(HOUNDS_STUCK_MESSAGE);
                info!("hounds cannot move, fox wins");
                self.last_decision = None;
                self.notify();
                return false;
            }
        };

        let mv = decision.mv;
        let index = match mv.actor() {
            Actor::Hound(index) => index,
            Actor::Fox => {
                debug!("strategy returned a fox move: {}", mv);
                return false;
            }
        };
        let (from_row, from_col) = mv.from();
        let (to_row, to_col) = mv.to();
        debug_assert_eq!(self.hounds[index].position(), mv.from());
        debug_assert!(self.board.is_valid_move(from_row, from_col, to_row, to_col, false));

        self.board.move_piece(from_row, from_col, to_row, to_col);
        self.hounds[index].move_to(to_row, to_col);
        self.last_decision = Some(decision);

        if self.board.is_fox_blocked(self.fox.row(), self.fox.col()) {
            self.state.set_game_over(Winner::Hounds);
            info!("fox trapped at {:?}", self.fox.position());
        } else {
            self.state.set_fox_turn(true);
        }
        self.notify();
        true
    }

    /// Takes effect from the next AI move
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            info!("difficulty changed from {} to {}", self.difficulty, difficulty);
        }
        self.difficulty = difficulty;
    }

    pub fn subscribe<F: FnMut() + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener();
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fox(&self) -> &Fox {
        &self.fox
    }

    pub fn hounds(&self) -> &[Hound] {
        &self.hounds
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The decision behind the most recent Hound move of this game
    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Legal Fox destinations, for highlighting
    pub fn fox_moves(&self) -> Vec<(i32, i32)> {
        self.fox.possible_moves(&self.board)
    }

    pub fn can_any_hound_move(&self) -> bool {
        find_any_valid_move(&self.hounds, &self.board).is_some()
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
