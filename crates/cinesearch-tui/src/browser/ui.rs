//! TUI rendering logic for the movie browser.

use cinesearch_api::omdb::{DetailRecord, PLACEHOLDER_POSTER, ResultItem, imdb_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{BrowserState, InputMode};
use crate::controller::{ModalState, UiState};

/// Card width in cells (including borders).
const CARD_WIDTH: u16 = 32;

/// Card height in cells (including borders).
const CARD_HEIGHT: u16 = 6;

/// Everything `draw` needs from the controller.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Controller state.
    pub ui: &'a UiState,
    /// Detail modal state.
    pub modal: ModalState,
    /// Whether the "load more" control is shown.
    pub can_load_more: bool,
}

/// Formats a number with thousands separators (e.g. 1625 -> "1,625").
#[allow(clippy::arithmetic_side_effects)]
fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Shows `-` for missing values.
fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Draws the browser.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, view: View<'_>, state: &mut BrowserState) {
    let notice_height = u16::from(view.ui.error.is_some());
    let load_more_height = u16::from(view.can_load_more);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // search box and status
            Constraint::Length(notice_height),    // error notice
            Constraint::Min(CARD_HEIGHT),         // result grid
            Constraint::Length(load_more_height), // load more control
            Constraint::Length(3),                // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], view, state);
    if let Some(error) = &view.ui.error {
        let notice = Paragraph::new(Line::from(vec![
            Span::styled(" ! ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" "),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]));
        frame.render_widget(notice, chunks[1]);
    }
    draw_grid(frame, chunks[2], view, state);
    if view.can_load_more {
        draw_load_more(frame, chunks[3], view, state.is_load_more_focused());
        state.set_load_more_area(Some(chunks[3]));
    } else {
        state.blur_load_more();
        state.set_load_more_area(None);
    }
    draw_footer(frame, chunks[4], view, state);

    if view.modal == ModalState::Closed {
        state.set_modal_area(None);
    } else {
        let area = centered_rect(70, 80, frame.area());
        draw_modal(frame, area, view);
        state.set_modal_area(Some(area));
    }
}

/// Draws the search box and the result counter.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, view: View<'_>, state: &BrowserState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let input_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut input_text = state.input.clone();
    if state.input_mode == InputMode::Search {
        input_text.push('_');
    }
    let input = Paragraph::new(input_text)
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(input, header_chunks[0]);

    let status = if view.ui.loading_list {
        String::from("Searching...")
    } else if view.ui.page == 0 {
        String::new()
    } else {
        format!(
            "{} of {} results for \"{}\"",
            fmt_num(view.ui.results.len()),
            fmt_num(usize::try_from(view.ui.total_results).unwrap_or(usize::MAX)),
            view.ui.query,
        )
    };
    let status = Paragraph::new(status)
        .block(Block::default().borders(Borders::ALL).title(" cinesearch "));
    frame.render_widget(status, header_chunks[1]);
}

/// Draws the result grid, or the empty-state message.
#[allow(clippy::indexing_slicing)]
fn draw_grid(frame: &mut Frame, area: Rect, view: View<'_>, state: &mut BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let results = &view.ui.results;
    if results.is_empty() {
        state.set_card_areas(Vec::new());
        let message = if view.ui.loading_list {
            "Searching..."
        } else if view.ui.error.is_some() {
            "No results to show."
        } else if view.ui.page == 0 {
            "Press / and type a title to search."
        } else {
            "No results."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let columns = (inner.width / CARD_WIDTH).max(1);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1);
    state.clamp(results.len());
    state.set_layout(usize::from(columns), usize::from(visible_rows));

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); usize::from(visible_rows)])
        .split(inner);
    let column_constraints = vec![Constraint::Ratio(1, u32::from(columns)); usize::from(columns)];

    let mut card_areas = Vec::new();
    let mut index = state.scroll_row().saturating_mul(state.columns());
    for row_area in row_areas.iter() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for cell in cells.iter() {
            let Some(item) = results.get(index) else {
                break;
            };
            let selected = index == state.cursor() && !state.is_load_more_focused();
            draw_card(frame, *cell, item, selected);
            card_areas.push((index, *cell));
            index = index.saturating_add(1);
        }
    }
    state.set_card_areas(card_areas);
}

/// Draws one result card.
fn draw_card(frame: &mut Frame, area: Rect, item: &ResultItem, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let poster = if item.poster_url() == PLACEHOLDER_POSTER {
        Span::styled("no poster", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("poster", Style::default().fg(Color::Green))
    };
    let lines = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{}  {}", item.year, item.kind.as_str())),
        Line::from(vec![
            Span::styled(item.id.as_str(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            poster,
        ]),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

/// Draws the "load more" control.
fn draw_load_more(frame: &mut Frame, area: Rect, view: View<'_>, focused: bool) {
    let text = if view.ui.loading_list {
        String::from("  Loading more...")
    } else {
        format!(
            "  \u{25bc} m / click: load more ({} of {})",
            fmt_num(view.ui.results.len()),
            fmt_num(usize::try_from(view.ui.total_results).unwrap_or(usize::MAX)),
        )
    };
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let control = Paragraph::new(text).style(style);
    frame.render_widget(control, area);
}

/// Draws the detail modal over the grid.
fn draw_modal(frame: &mut Frame, area: Rect, view: View<'_>) {
    frame.render_widget(Clear, area);

    let (title, lines) = match (&view.ui.selection, view.modal) {
        (Some(record), ModalState::Shown) => {
            let title = record.year.as_ref().map_or_else(
                || format!(" {} ", record.title),
                |year| format!(" {} ({year}) ", record.title),
            );
            (title, detail_lines(record))
        }
        _ => (
            String::from(" Loading "),
            vec![Line::from("Loading details...")],
        ),
    };

    let modal = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(" Esc/x: close  o: IMDb  p: poster "),
    );
    frame.render_widget(modal, area);
}

/// Builds the modal body for a record.
fn detail_lines(record: &DetailRecord) -> Vec<Line<'_>> {
    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::raw(value)])
    };

    let mut lines = vec![
        field(
            "Rating",
            record.rating().unwrap_or_else(|| String::from("-")),
        ),
        field("Rated", String::from(or_dash(record.rated.as_deref()))),
        field("Runtime", String::from(or_dash(record.runtime.as_deref()))),
        field("Released", String::from(or_dash(record.released.as_deref()))),
        field("Genre", record.genres.join(", ")),
        field("Director", String::from(or_dash(record.director.as_deref()))),
        field("Writer", String::from(or_dash(record.writer.as_deref()))),
        field("Cast", record.cast.join(", ")),
        Line::from(""),
        Line::from(or_dash(record.plot.as_deref())),
        Line::from(""),
    ];
    for rating in &record.ratings {
        lines.push(field("Score", format!("{} ({})", rating.value, rating.source)));
    }
    if let Some(awards) = &record.awards {
        lines.push(field("Awards", awards.clone()));
    }
    if let Some(box_office) = &record.box_office {
        lines.push(field("Box office", box_office.clone()));
    }
    lines.push(field("Poster", String::from(record.poster_url())));
    lines.push(field("IMDb", imdb_url(&record.id)));
    lines
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, view: View<'_>, state: &BrowserState) {
    let help_text = if view.modal == ModalState::Closed {
        match state.input_mode {
            InputMode::Search => {
                Line::from("Type a title | Enter: search | Esc: results | Ctrl-C: quit")
            }
            InputMode::Browse if view.can_load_more => Line::from(vec![Span::raw(
                "\u{2190}\u{2191}\u{2192}\u{2193}/hjkl: move  Enter: details  m: load more  /: search  o: IMDb  q: quit",
            )]),
            InputMode::Browse => Line::from(vec![Span::raw(
                "\u{2190}\u{2191}\u{2192}\u{2193}/hjkl: move  Enter: details  /: search  o: IMDb  q: quit",
            )]),
        }
    } else {
        Line::from("Esc/x or click outside: close  o: IMDb  p: poster")
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Returns a rectangle centered in `area` sized by percentages.
#[allow(clippy::indexing_slicing)]
#[allow(clippy::arithmetic_side_effects)]
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
