use pairmatch_core::{
    CardFace, CardVisual, Event, EventBus, FlipOutcome, GameConfig, Outcome,
    RngState, Round, RoundError, Viewport, CARD_BACK_KEY,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

pub struct AppState {
    pub config: GameConfig,
    /// Seed from `--seed`; every page load deals this deck again.
    pub fixed_seed: Option<u64>,
    pub round: Round,
    pub events: EventBus,
    epoch: Instant,
}

impl AppState {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, RoundError> {
        let fixed_seed = seed;
        let seed = seed.unwrap_or_else(|| RngState::fresh().seed());
        let mut events = EventBus::default();
        let round = Round::new(config.clone(), DEFAULT_VIEWPORT, seed, &mut events)?;
        Ok(Self {
            config,
            fixed_seed,
            round,
            events,
            epoch: Instant::now(),
        })
    }

    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Lets a due comparison fire before the state is read.
    pub fn tick(&mut self) {
        let now = self.now();
        self.round.tick(now, &mut self.events);
    }

    /// Replaces the round with a freshly dealt one. Any pending comparison
    /// is dropped along with the old round.
    fn deal(&mut self, viewport: Viewport, seed: u64) -> Option<String> {
        match Round::new(self.config.clone(), viewport, seed, &mut self.events) {
            Ok(round) => {
                self.round = round;
                None
            }
            Err(err) => Some(err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub state: UiState,
    pub events: Vec<Event>,
}

#[derive(Serialize)]
pub struct UiState {
    pub seed: Option<u64>,
    pub viewport: Viewport,
    pub card_width: f32,
    pub card_height: f32,
    pub cards: Vec<UiCard>,
    pub lives: u32,
    pub pairs_found: u32,
    pub pairs_total: u32,
    pub locked: bool,
    pub pending_ms: Option<u64>,
    pub outcome: Outcome,
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct UiCard {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub visual: CardVisual,
    pub texture: Option<String>,
    pub face: Option<CardFace>,
}

pub fn build_response(state: &mut AppState, err: Option<String>) -> ApiResponse {
    let events: Vec<_> = state.events.drain().collect();
    ApiResponse {
        ok: err.is_none(),
        error: err,
        state: snapshot_state(state),
        events,
    }
}

pub fn snapshot_state(state: &AppState) -> UiState {
    let round = &state.round;
    let layout = round.layout();
    let cards = round
        .cards()
        .iter()
        .enumerate()
        .filter_map(|(index, card)| {
            let center = layout.center(index)?;
            let visual = card.visual();
            let (texture, face) = match visual {
                CardVisual::FaceUp => (Some(card.face.texture_key()), Some(card.face)),
                CardVisual::FaceDown => (Some(CARD_BACK_KEY.to_string()), None),
                CardVisual::Removed => (None, None),
            };
            Some(UiCard {
                index,
                x: center.x,
                y: center.y,
                visual,
                texture,
                face,
            })
        })
        .collect();
    let round_state = round.state();
    let now = state.now();
    UiState {
        seed: round.seed(),
        viewport: layout.viewport,
        card_width: layout.card_width,
        card_height: layout.card_height,
        cards,
        lives: round_state.lives,
        pairs_found: round_state.pairs_found,
        pairs_total: round.config().pairs,
        locked: round_state.input_locked(),
        pending_ms: round_state
            .pending
            .map(|pending| pending.due.saturating_sub(now).as_millis() as u64),
        outcome: round_state.outcome,
        message: round_state.outcome.message(),
    }
}

pub fn apply_action(state: &mut AppState, req: ActionRequest) -> Option<String> {
    let now = state.now();
    match req.action.as_str() {
        "flip" => {
            let Some(index) = req.index else {
                return Some("missing card index".to_string());
            };
            flip_result(state.round.flip(index, now, &mut state.events))
        }
        "click" => {
            let (Some(x), Some(y)) = (req.x, req.y) else {
                return Some("missing click position".to_string());
            };
            flip_result(state.round.flip_at(x, y, now, &mut state.events))
        }
        "resize" => {
            let (Some(width), Some(height)) = (req.width, req.height) else {
                return Some("missing viewport size".to_string());
            };
            state
                .round
                .resize(Viewport::new(width, height), &mut state.events);
            None
        }
        "new_round" => {
            let viewport = match (req.width, req.height) {
                (Some(width), Some(height)) => Viewport::new(width, height),
                _ => state.round.layout().viewport,
            };
            let seed = state
                .fixed_seed
                .unwrap_or_else(|| RngState::fresh().seed());
            state.deal(viewport, seed)
        }
        "restart" => {
            let viewport = state.round.layout().viewport;
            state.deal(viewport, RngState::fresh().seed())
        }
        _ => Some("unknown action".to_string()),
    }
}

fn flip_result(result: Result<FlipOutcome, RoundError>) -> Option<String> {
    match result {
        Ok(outcome) => {
            log::debug!("flip: {outcome:?}");
            None
        }
        Err(err) => Some(err.to_string()),
    }
}
