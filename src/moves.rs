use std::fmt;

/// Which piece a [`Move`] belongs to
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Actor {
    Fox,
    /// A hound, by its index in the game's hound list
    Hound(usize),
}

/// An immutable description of a single step from one cell to another
///
/// A `Move` never changes the game by itself; it is how the strategies report
/// their decision back to the game manager.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    actor: Actor,
    from: (i32, i32),
    to: (i32, i32),
}

impl Move {
    pub fn hound(index: usize, from: (i32, i32), to: (i32, i32)) -> Self {
        Self {
            actor: Actor::Hound(index),
            from,
            to,
        }
    }

    pub fn fox(from: (i32, i32), to: (i32, i32)) -> Self {
        Self {
            actor: Actor::Fox,
            from,
            to,
        }
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// The moving hound's index, `None` for a fox move
    pub fn hound_index(&self) -> Option<usize> {
        match self.actor {
            Actor::Hound(index) => Some(index),
            Actor::Fox => None,
        }
    }

    pub fn from(&self) -> (i32, i32) {
        self.from
    }

    pub fn to(&self) -> (i32, i32) {
        self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actor {
            Actor::Fox => write!(f, "Fox")?,
            Actor::Hound(index) => write!(f, "Hound {}", index)?,
        }
        write!(
            f,
            " moves from ({},{}) to ({},{})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}
