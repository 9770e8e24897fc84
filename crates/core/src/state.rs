use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Text shown centred over the board once the round has ended.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::InProgress => None,
            Self::Won => Some("You Won!"),
            Self::Lost => Some("Game Over"),
        }
    }
}

/// The one comparison that may be waiting on the reveal delay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingMatch {
    pub first: usize,
    pub second: usize,
    pub due: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub first: Option<usize>,
    pub second: Option<usize>,
    pub pairs_found: u32,
    pub lives: u32,
    pub outcome: Outcome,
    pub pending: Option<PendingMatch>,
}

impl RoundState {
    pub fn new(lives: u32) -> Self {
        Self {
            first: None,
            second: None,
            pairs_found: 0,
            lives,
            outcome: Outcome::InProgress,
            pending: None,
        }
    }

    pub fn input_locked(&self) -> bool {
        self.pending.is_some() || self.outcome.is_over()
    }

    pub fn clear_selection(&mut self) {
        self.first = None;
        self.second = None;
    }
}
