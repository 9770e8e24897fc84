mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::execute;
use pairmatch_core::parse_seed;
use pairmatch_data::resolve_game_config;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub config: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let assets = options
        .assets
        .clone()
        .unwrap_or_else(|| PathBuf::from("assets"));
    let config =
        resolve_game_config(options.config.as_deref(), &assets).context("load game config")?;
    let mut app = App::bootstrap(config, options.seed)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--config" | "-c" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = parse_seed(value);
                    if options.seed.is_none() {
                        log::warn!("ignoring unparseable seed {value}");
                    }
                    idx += 1;
                }
            }
            other => log::warn!("ignoring unknown argument {other}"),
        }
        idx += 1;
    }
    options
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    while !app.should_quit {
        let size = terminal.size().context("query terminal size")?;
        app.resize(view::board_area(Rect::new(0, 0, size.width, size.height)));
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input::map_key(key);
                    actions::dispatch(app, action);
                }
                CEvent::Mouse(mouse) => {
                    if let MouseEventKind::Up(MouseButton::Left) = mouse.kind {
                        app.click(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }
        app.on_tick();
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "pairmatch-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}
