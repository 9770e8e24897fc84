use crate::{
    build_deck, CardFace, CardSlot, ConfigError, Event, EventBus, GameConfig, GridLayout,
    JokerTag, RngState, RoundState, Viewport,
};
use std::time::Duration;
use thiserror::Error;

mod input;
mod resolve;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("no card at index {0}")]
    InvalidCard(usize),
    #[error("deck of {deck} cards does not fit a grid of {cells} cells")]
    DeckSize { deck: usize, cells: usize },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Why a flip request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    RoundOver,
    AlreadyFaceUp,
    Removed,
    NoCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Selected(usize),
    MatchScheduled {
        first: usize,
        second: usize,
        due: Duration,
    },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(CardFace),
    JokerHit(JokerTag),
    Mismatch,
    Won,
    Lost,
}

/// One round of the game: the dealt grid plus everything that changes while
/// it is played. Built at round start, dropped at round end.
#[derive(Debug)]
pub struct Round {
    config: GameConfig,
    seed: Option<u64>,
    cards: Vec<CardSlot>,
    layout: GridLayout,
    state: RoundState,
}

impl Round {
    pub fn new(
        config: GameConfig,
        viewport: Viewport,
        seed: u64,
        events: &mut EventBus,
    ) -> Result<Self, RoundError> {
        config.validate()?;
        let mut rng = RngState::from_seed(seed);
        let deck = build_deck(&config, &mut rng);
        let mut round = Self::deal(config, viewport, deck, events)?;
        round.seed = Some(rng.seed());
        log::debug!("round dealt with seed {seed:#x}");
        Ok(round)
    }

    /// Deals a fixed sequence of faces instead of a shuffled deck.
    pub fn with_faces(
        config: GameConfig,
        viewport: Viewport,
        faces: Vec<CardFace>,
        events: &mut EventBus,
    ) -> Result<Self, RoundError> {
        config.validate()?;
        Self::deal(config, viewport, faces, events)
    }

    fn deal(
        config: GameConfig,
        viewport: Viewport,
        faces: Vec<CardFace>,
        events: &mut EventBus,
    ) -> Result<Self, RoundError> {
        let cells = config.grid.cells();
        if faces.len() > cells {
            return Err(RoundError::DeckSize {
                deck: faces.len(),
                cells,
            });
        }
        let layout = GridLayout::compute(viewport, &config.grid, config.card_size);
        let cards: Vec<CardSlot> = faces.into_iter().map(CardSlot::new).collect();
        let state = RoundState::new(config.lives);
        events.push(Event::RoundStarted {
            cards: cards.len(),
            pairs: config.pairs,
            lives: config.lives,
        });
        Ok(Self {
            config,
            seed: None,
            cards,
            layout,
            state,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn cards(&self) -> &[CardSlot] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&CardSlot> {
        self.cards.get(index)
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn face_up_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_face_up()).count()
    }

    /// Re-lays the same cards out for a new viewport. The deck, the card
    /// flags and any pending comparison are left as they are.
    pub fn resize(&mut self, viewport: Viewport, events: &mut EventBus) {
        self.layout = GridLayout::compute(viewport, &self.config.grid, self.config.card_size);
        events.push(Event::Resized {
            width: viewport.width,
            height: viewport.height,
        });
    }
}
