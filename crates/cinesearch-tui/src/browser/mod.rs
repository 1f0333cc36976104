//! Movie browser TUI main loop.

/// Browser view state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use cinesearch_api::omdb::{OmdbApi, imdb_url};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{BrowserState, InputMode};
use self::ui::View;
use crate::controller::{Controller, ModalState, OutcomeReceiver};

/// Whether the event loop keeps running after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the movie browser TUI until the user quits.
///
/// When `initial_query` is non-empty a search is started right away.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(api: A, initial_query: Option<&str>) -> Result<()>
where
    A: OmdbApi + Sync + 'static,
{
    let (mut controller, mut outcomes) = Controller::new(api);
    let mut state = match initial_query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => {
            controller.search(query, 1, false);
            BrowserState::with_query(query)
        }
        None => BrowserState::new(),
    };

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut controller, &mut outcomes, &mut state).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

/// Main event loop: redraws after every input or completed request.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller<A>,
    outcomes: &mut OutcomeReceiver,
    state: &mut BrowserState,
) -> Result<()>
where
    A: OmdbApi + Sync + 'static,
{
    let mut events = EventStream::new();
    loop {
        terminal
            .draw(|frame| {
                let view = View {
                    ui: controller.state(),
                    modal: controller.modal_state(),
                    can_load_more: controller.can_load_more(),
                };
                ui::draw(frame, view, state);
            })
            .context("failed to draw TUI")?;

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    return Ok(());
                };
                let flow = match event.context("failed to read event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        handle_key(controller, state, key)
                    }
                    Event::Mouse(mouse) => {
                        handle_mouse(controller, state, mouse);
                        Flow::Continue
                    }
                    _ => Flow::Continue,
                };
                if flow == Flow::Quit {
                    return Ok(());
                }
            }
            Some(outcome) = outcomes.recv() => {
                controller.apply(outcome);
            }
        }
    }
}

/// Dispatches a key press to the handler for the current mode.
fn handle_key<A>(controller: &mut Controller<A>, state: &mut BrowserState, key: KeyEvent) -> Flow
where
    A: OmdbApi + Sync + 'static,
{
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }
    if controller.modal_state() != ModalState::Closed {
        handle_modal_input(controller, key.code);
        return Flow::Continue;
    }
    match state.input_mode {
        InputMode::Search => {
            handle_search_input(controller, state, key.code);
            Flow::Continue
        }
        InputMode::Browse => handle_browse_input(controller, state, key.code),
    }
}

/// Handles key input while the detail modal is open.
fn handle_modal_input<A>(controller: &mut Controller<A>, key: KeyCode)
where
    A: OmdbApi + Sync + 'static,
{
    match key {
        KeyCode::Esc | KeyCode::Char('x' | 'q') => controller.close_details(),
        KeyCode::Char('o') => {
            if let Some(record) = &controller.state().selection {
                open_url(&imdb_url(&record.id));
            }
        }
        KeyCode::Char('p') => {
            if let Some(record) = &controller.state().selection {
                open_url(record.poster_url());
            }
        }
        _ => {}
    }
}

/// Handles key input in search mode.
fn handle_search_input<A>(controller: &mut Controller<A>, state: &mut BrowserState, key: KeyCode)
where
    A: OmdbApi + Sync + 'static,
{
    match key {
        KeyCode::Esc => {
            state.input_mode = InputMode::Browse;
        }
        KeyCode::Enter => {
            if controller.search(&state.input, 1, false) {
                state.reset_cursor();
                state.input_mode = InputMode::Browse;
            }
        }
        KeyCode::Backspace => {
            state.input_pop();
        }
        KeyCode::Char(c) => {
            state.input_push(c);
        }
        _ => {}
    }
}

/// Handles key input in browse mode.
fn handle_browse_input<A>(
    controller: &mut Controller<A>,
    state: &mut BrowserState,
    key: KeyCode,
) -> Flow
where
    A: OmdbApi + Sync + 'static,
{
    let len = controller.state().results.len();
    match key {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
        }
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(len),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => {
            if controller.can_load_more() && state.is_on_last_row(len) {
                state.focus_load_more();
            } else {
                state.move_down(len);
            }
        }
        KeyCode::Char('m') => {
            controller.load_more();
        }
        KeyCode::Enter if state.is_load_more_focused() => {
            if controller.load_more() {
                state.blur_load_more();
            }
        }
        KeyCode::Enter => {
            if let Some(item) = controller.state().results.get(state.cursor()) {
                let id = item.id.clone();
                controller.load_details(&id);
            }
        }
        KeyCode::Char('o') => {
            if let Some(item) = controller.state().results.get(state.cursor()) {
                open_url(&imdb_url(&item.id));
            }
        }
        _ => {}
    }
    Flow::Continue
}

/// Handles mouse clicks: cards open details, the "load more" row loads the
/// next page, clicks outside the modal close it.
fn handle_mouse<A>(controller: &mut Controller<A>, state: &mut BrowserState, mouse: MouseEvent)
where
    A: OmdbApi + Sync + 'static,
{
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if controller.modal_state() != ModalState::Closed {
        if state.is_outside_modal(mouse.column, mouse.row) {
            controller.close_details();
        }
        return;
    }
    if state.is_on_load_more(mouse.column, mouse.row) {
        if controller.load_more() {
            state.blur_load_more();
        }
        return;
    }
    let Some(index) = state.card_at(mouse.column, mouse.row) else {
        return;
    };
    let len = controller.state().results.len();
    state.select(index, len);
    if let Some(item) = controller.state().results.get(index) {
        let id = item.id.clone();
        controller.load_details(&id);
    }
}

/// Opens a URL in the system browser.
fn open_url(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(url, error = %e, "failed to open URL");
    }
}
