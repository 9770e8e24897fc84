use crate::app::App;
use pairmatch_core::CardVisual;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

fn split(area: Rect) -> [Rect; 3] {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(area);
    [root[0], root[1], root[2]]
}

/// Area the cards are laid out in, inside the board's border.
pub fn board_area(area: Rect) -> Rect {
    let [_, board, _] = split(area);
    Block::default().borders(Borders::ALL).inner(board)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let [header, board, events] = split(frame.area());

    draw_header(frame, header, app);
    draw_board(frame, board, app);
    draw_events(frame, events, app);

    if app.round.state().outcome.is_over() {
        draw_game_over(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.round.state();
    let title = format!("Pairmatch | Hint: {}", app.next_hint());
    let summary = format!(
        "Lives: {}  Pairs: {}/{}  Seed: {}",
        state.lives,
        state.pairs_found,
        app.round.config().pairs,
        app.round
            .seed()
            .map(|seed| format!("{seed:#x}"))
            .unwrap_or_else(|| "-".to_string()),
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Round");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let locked = app.round.state().input_locked();
    let title = if locked { "Board (locked)" } else { "Board" };
    frame.render_widget(Block::default().borders(Borders::ALL).title(title), area);

    for (index, card) in app.round.cards().iter().enumerate() {
        let Some(rect) = app.card_rect(index) else {
            continue;
        };
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        let mut style = match card.visual() {
            CardVisual::FaceUp if card.face.is_joker() => Style::default().fg(Color::Red),
            CardVisual::FaceUp => Style::default().fg(Color::White),
            CardVisual::FaceDown | CardVisual::Removed => Style::default().fg(Color::Blue),
        };
        if index == app.cursor {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        let label = App::card_label(card);
        let widget = if rect.width >= 3 && rect.height >= 3 {
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style))
                .style(style)
        } else {
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(style.add_modifier(Modifier::REVERSED))
        };
        frame.render_widget(widget, rect);
    }
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem<'_>> = app
        .event_log
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|line| ListItem::new(line.as_str()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_game_over(frame: &mut Frame, app: &App) {
    let Some(message) = app.round.state().outcome.message() else {
        return;
    };
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(message.bold()),
        Line::from(""),
        Line::from("r new round | q quit"),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("arrows/hjkl move | enter/space flip | click flips"),
        Line::from("r new round | ? help | q quit"),
        Line::from("matching jokers costs a life"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
