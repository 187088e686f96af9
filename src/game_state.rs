use std::fmt;

/// The side that won a finished game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Winner {
    Fox,
    Hounds,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Fox => write!(f, "Fox"),
            Winner::Hounds => write!(f, "Hounds"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Phase {
    FoxToMove,
    HoundsToMove,
    GameOver(Winner),
}

/// Turn and outcome tracking
///
/// A finished game stays finished: only [`GameState::reset`] leaves
/// [`Phase::GameOver`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GameState {
    phase: Phase,
    status_message: String,
}

impl GameState {
    pub fn new() -> Self {
        let phase = Phase::FoxToMove;
        Self {
            phase,
            status_message: Self::default_message(phase).to_owned(),
        }
    }

    fn default_message(phase: Phase) -> &'static str {
        match phase {
            Phase::FoxToMove => "Fox's turn. Click on the fox to move.",
            Phase::HoundsToMove => "Hounds' turn. AI is thinking...",
            Phase::GameOver(Winner::Fox) => "Fox has escaped! Fox wins!",
            Phase::GameOver(Winner::Hounds) => "Fox is trapped! Hounds win!",
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_fox_turn(&self) -> bool {
        self.phase == Phase::FoxToMove
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Hands the turn to the Fox (`true`) or the Hounds (`false`)
    ///
    /// Has no effect once the game is over.
    pub fn set_fox_turn(&mut self, fox_turn: bool) {
        if self.is_game_over() {
            return;
        }
        self.phase = if fox_turn {
            Phase::FoxToMove
        } else {
            Phase::HoundsToMove
        };
        self.status_message = Self::default_message(self.phase).to_owned();
    }

    /// Ends the game. The first winner recorded is final.
    pub fn set_game_over(&mut self, winner: Winner) {
        if self.is_game_over() {
            return;
        }
        self.phase = Phase::GameOver(winner);
        self.status_message = Self::default_message(self.phase).to_owned();
    }

    /// Overrides the status text until the next transition
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = message.into();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
