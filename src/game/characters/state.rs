// Facing direction and walk state

use crate::engine::input::Action;

/// Which way the player faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl From<Action> for Direction {
    fn from(action: Action) -> Self {
        match action {
            Action::MoveLeft => Direction::Left,
            Action::MoveRight => Direction::Right,
        }
    }
}

/// Whether the player is on a continuous walk, and since when
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WalkState {
    #[default]
    Idle,
    /// Walking since the given tick timestamp (milliseconds)
    Walking { since: f64 },
}

impl WalkState {
    pub fn is_walking(&self) -> bool {
        matches!(self, Self::Walking { .. })
    }

    /// Begin a walk at `now`; an ongoing walk keeps its start time
    pub fn start(&mut self, now: f64) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Walking { since: now };
                true
            }
            Self::Walking { .. } => false,
        }
    }

    /// End the walk; returns whether one was in progress
    pub fn stop(&mut self) -> bool {
        let was_walking = self.is_walking();
        *self = Self::Idle;
        was_walking
    }

    /// Milliseconds walked as of `now`, `None` when idle
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Walking { since } => Some((now - since).max(0.0)),
        }
    }
}
