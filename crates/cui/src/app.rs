use anyhow::{Context, Result};
use pairmatch_core::{
    CardSlot, CardVisual, Event, EventBus, FlipOutcome, GameConfig, IgnoreReason, Resolution,
    RngState, Round, RoundError, Viewport,
};
use ratatui::layout::Rect;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_EVENT_LOG: usize = 200;
/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

pub struct App {
    pub config: GameConfig,
    pub round: Round,
    pub events: EventBus,
    pub epoch: Instant,
    pub board: Rect,
    pub cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(|| RngState::fresh().seed());
        let mut events = EventBus::default();
        let board = Rect::default();
        let round = Round::new(config.clone(), board_viewport(board), seed, &mut events)
            .context("deal round")?;
        let mut app = Self {
            config,
            round,
            events,
            epoch: Instant::now(),
            board,
            cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_event_line(format!("seed {seed:#x}"));
        app.flush_events();
        Ok(app)
    }

    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn on_tick(&mut self) {
        let now = self.now();
        if let Some(resolution) = self.round.tick(now, &mut self.events) {
            self.push_status(resolution_label(resolution));
        }
        self.flush_events();
    }

    /// Lays the current round out over a new board area.
    pub fn resize(&mut self, board: Rect) {
        if board == self.board {
            return;
        }
        self.board = board;
        self.round.resize(board_viewport(board), &mut self.events);
        self.flush_events();
    }

    pub fn restart(&mut self) {
        let seed = RngState::fresh().seed();
        match Round::new(
            self.config.clone(),
            board_viewport(self.board),
            seed,
            &mut self.events,
        ) {
            Ok(round) => {
                self.round = round;
                self.cursor = 0;
                self.push_status(format!("new round, seed {seed:#x}"));
            }
            Err(err) => self.push_status(format!("restart failed: {err}")),
        }
        self.flush_events();
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let len = self.round.cards().len();
        if len == 0 {
            return;
        }
        let cols = usize::from(self.config.grid.cols.max(1));
        let cursor = self.cursor.min(len - 1);
        self.cursor = match direction {
            Direction::Left => cursor.saturating_sub(1),
            Direction::Right => (cursor + 1).min(len - 1),
            Direction::Up => cursor.checked_sub(cols).unwrap_or(cursor),
            Direction::Down => {
                if cursor + cols < len {
                    cursor + cols
                } else {
                    cursor
                }
            }
        };
    }

    pub fn flip_cursor(&mut self) {
        let now = self.now();
        let result = self.round.flip(self.cursor, now, &mut self.events);
        self.report_flip(result);
    }

    /// Handles a mouse release at terminal coordinates.
    pub fn click(&mut self, column: u16, row: u16) {
        let Some((x, y)) = board_point(self.board, column, row) else {
            return;
        };
        if let Some(index) = self.round.layout().hit_test(x, y) {
            if index < self.round.cards().len() {
                self.cursor = index;
            }
        }
        let now = self.now();
        let result = self.round.flip_at(x, y, now, &mut self.events);
        self.report_flip(result);
    }

    fn report_flip(&mut self, result: Result<FlipOutcome, RoundError>) {
        match result {
            Ok(FlipOutcome::Selected(_)) => self.push_status("pick a second card"),
            Ok(FlipOutcome::MatchScheduled { .. }) => self.push_status("checking..."),
            Ok(FlipOutcome::Ignored(reason)) => self.push_status(ignore_label(reason)),
            Err(err) => self.push_status(format!("error: {err}")),
        }
        self.flush_events();
    }

    /// Terminal rectangle covered by a card, if it is still on the board.
    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        let card = self.round.card(index)?;
        if card.visual() == CardVisual::Removed {
            return None;
        }
        let layout = self.round.layout();
        let center = layout.center(index)?;
        let width = layout.card_width.max(1.0);
        let height = (layout.card_height / CELL_ASPECT).max(1.0);
        let left = center.x - width / 2.0;
        let top = center.y / CELL_ASPECT - height / 2.0;
        let rect = Rect {
            x: self.board.x.saturating_add(left.max(0.0).round() as u16),
            y: self.board.y.saturating_add(top.max(0.0).round() as u16),
            width: width.round() as u16,
            height: height.round() as u16,
        };
        Some(rect.intersection(self.board))
    }

    pub fn card_label(card: &CardSlot) -> String {
        match card.visual() {
            CardVisual::FaceUp => card.face.to_string(),
            CardVisual::FaceDown => "?".to_string(),
            CardVisual::Removed => String::new(),
        }
    }

    pub fn next_hint(&self) -> &'static str {
        let state = self.round.state();
        if state.outcome.is_over() {
            return "press r for a new round";
        }
        if state.pending.is_some() {
            return "wait";
        }
        if state.first.is_some() {
            return "pick a second card";
        }
        "pick a card"
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn flush_events(&mut self) {
        let lines: Vec<String> = self.events.drain().map(|event| format_event(&event)).collect();
        for line in lines {
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}

pub fn board_viewport(board: Rect) -> Viewport {
    Viewport::new(
        f32::from(board.width),
        f32::from(board.height) * CELL_ASPECT,
    )
}

/// Maps a terminal cell to the centre of that cell in layout coordinates.
pub fn board_point(board: Rect, column: u16, row: u16) -> Option<(f32, f32)> {
    if column < board.x
        || row < board.y
        || column >= board.x.saturating_add(board.width)
        || row >= board.y.saturating_add(board.height)
    {
        return None;
    }
    let x = f32::from(column - board.x) + 0.5;
    let y = (f32::from(row - board.y) + 0.5) * CELL_ASPECT;
    Some((x, y))
}

fn ignore_label(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::Locked => "wait for the cards to settle",
        IgnoreReason::RoundOver => "round is over, press r",
        IgnoreReason::AlreadyFaceUp => "card already face up",
        IgnoreReason::Removed => "card already matched",
        IgnoreReason::NoCard => "no card there",
    }
}

fn resolution_label(resolution: Resolution) -> String {
    match resolution {
        Resolution::Matched(face) => format!("pair of {face}"),
        Resolution::JokerHit(_) => "joker! you lose a life".to_string(),
        Resolution::Mismatch => "no match".to_string(),
        Resolution::Won => "You Won!".to_string(),
        Resolution::Lost => "Game Over".to_string(),
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::RoundStarted {
            cards,
            pairs,
            lives,
        } => format!("round started: {cards} cards, {pairs} pairs, {lives} lives"),
        Event::CardFlipped { index, face } => format!("flipped #{index}: {face}"),
        Event::MatchScheduled { first, second } => format!("comparing #{first} and #{second}"),
        Event::PairMatched { face, pairs_found } => {
            format!("matched {face} ({pairs_found} pairs)")
        }
        Event::JokerMatched { tag, lives } => format!("{} pair, lives {lives}", tag.key()),
        Event::Mismatch { first, second } => format!("#{first} and #{second} differ"),
        Event::RoundWon { pairs_found } => format!("won with {pairs_found} pairs"),
        Event::RoundLost => "out of lives".to_string(),
        Event::Resized { width, height } => format!("board {width}x{height}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::bootstrap(GameConfig::default(), Some(7)).expect("bootstrap");
        app.resize(Rect::new(0, 0, 80, 30));
        app
    }

    #[test]
    fn cursor_stays_inside_the_grid() {
        let mut app = app();
        app.move_cursor(Direction::Left);
        app.move_cursor(Direction::Up);
        assert_eq!(app.cursor, 0);
        app.move_cursor(Direction::Down);
        assert_eq!(app.cursor, 8);
        app.move_cursor(Direction::Right);
        assert_eq!(app.cursor, 9);
        for _ in 0..10 {
            app.move_cursor(Direction::Down);
        }
        assert_eq!(app.cursor, 41);
    }

    #[test]
    fn board_points_are_relative_to_the_board() {
        let board = Rect::new(2, 3, 10, 5);
        assert_eq!(board_point(board, 1, 3), None);
        assert_eq!(board_point(board, 2, 3), Some((0.5, 1.0)));
        assert_eq!(board_point(board, 11, 7), Some((9.5, 9.0)));
        assert_eq!(board_point(board, 12, 7), None);
    }

    #[test]
    fn flipping_from_the_cursor_selects_a_card() {
        let mut app = app();
        app.flip_cursor();
        assert_eq!(app.round.state().first, Some(0));
        assert_eq!(app.status_line, "pick a second card");
        assert!(app
            .event_log
            .iter()
            .any(|line| line.starts_with("flipped #0")));
    }

    #[test]
    fn clicking_a_card_moves_the_cursor() {
        let mut app = app();
        let rect = app.card_rect(9).expect("card 9 on board");
        app.click(rect.x + rect.width / 2, rect.y + rect.height / 2);
        assert_eq!(app.cursor, 9);
        assert_eq!(app.round.state().first, Some(9));
    }

    #[test]
    fn restart_deals_a_fresh_round() {
        let mut app = app();
        app.flip_cursor();
        app.restart();
        assert_eq!(app.round.state().first, None);
        assert_eq!(app.round.face_up_count(), 0);
        assert_eq!(app.round.layout().viewport, board_viewport(app.board));
    }
}
