use crate::{CardFace, JokerTag};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        cards: usize,
        pairs: u32,
        lives: u32,
    },
    CardFlipped {
        index: usize,
        face: CardFace,
    },
    MatchScheduled {
        first: usize,
        second: usize,
    },
    PairMatched {
        face: CardFace,
        pairs_found: u32,
    },
    JokerMatched {
        tag: JokerTag,
        lives: u32,
    },
    Mismatch {
        first: usize,
        second: usize,
    },
    RoundWon {
        pairs_found: u32,
    },
    RoundLost,
    Resized {
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
