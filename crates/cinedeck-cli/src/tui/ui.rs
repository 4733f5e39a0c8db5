//! TUI rendering logic for the movie viewer.

use cinedeck_core::{MovieView, PageState, TrailerRegion};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{InputMode, ViewerState};

/// Label style for "Director", "Writers" and similar.
fn label_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Draws the movie viewer UI.
///
/// While a page loads only the loading message is drawn, unless the movie
/// ID prompt is open.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &ViewerState) {
    let loading_style = Style::default().fg(Color::Cyan);
    if matches!(state.session.state(), PageState::Loading)
        && state.input_mode == InputMode::Normal
    {
        draw_message(frame, frame.area(), &loading_text(state), loading_style);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // page
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    match state.session.state() {
        PageState::Idle => draw_message(
            frame,
            chunks[0],
            "Press / to enter a movie ID",
            Style::default(),
        ),
        PageState::Loading => draw_message(frame, chunks[0], &loading_text(state), loading_style),
        PageState::Failed(e) => {
            let text = format!("No data available\n\n{e}");
            draw_message(frame, chunks[0], &text, Style::default().fg(Color::Red));
        }
        PageState::Ready(_) => {
            if let Some(view) = state.view() {
                draw_page(frame, chunks[0], &view);
            }
        }
    }

    draw_footer(frame, chunks[1], state);
}

/// Loading message for the movie being fetched.
fn loading_text(state: &ViewerState) -> String {
    state.session.movie_id().map_or_else(
        || String::from("Loading..."),
        |id| format!("Loading movie {id}..."),
    )
}

/// Draws a single centered message inside a bordered block.
fn draw_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text.to_owned())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" cinedeck "));
    frame.render_widget(paragraph, area);
}

/// Draws a resolved movie page.
#[allow(clippy::indexing_slicing)]
fn draw_page(frame: &mut Frame, area: Rect, view: &MovieView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // hero
            Constraint::Min(5),    // body
        ])
        .split(area);

    draw_hero(frame, rows[0], view);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    draw_summary(frame, columns[0], view);
    draw_sidebar(frame, columns[1], view);
}

/// Draws the hero block: title, tagline and the metadata line.
fn draw_hero(frame: &mut Frame, area: Rect, view: &MovieView) {
    let meta = format!(
        "{} · {} · {} · {}",
        view.release_date,
        view.certification,
        view.runtime,
        view.genres.join(", "),
    );
    let tagline = view.tagline.clone().unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            meta,
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            tagline,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    let title = format!(" {} ", view.title);
    let hero = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, label_style())),
    );
    frame.render_widget(hero, area);
}

/// Draws the overview and the credits.
fn draw_summary(frame: &mut Frame, area: Rect, view: &MovieView) {
    let credits = &view.credits;
    let lines = vec![
        Line::from(view.overview.clone()),
        Line::from(""),
        credit_line("Director", &credits.directors),
        credit_line("Writers", &credits.writers),
        credit_line("Stars", &credits.stars),
    ];

    let summary = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Overview "));
    frame.render_widget(summary, area);
}

/// Builds a "Label  name · name" credit line.
fn credit_line(label: &str, names: &[String]) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}  "), label_style()),
        Span::raw(names.join(" · ")),
    ])
}

/// Draws rating, badges, trailer, download and backdrop regions.
fn draw_sidebar(frame: &mut Frame, area: Rect, view: &MovieView) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("★ {}", view.rating),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" / 10  ({})", view.votes)),
        ]),
        Line::from(format!(
            "Top rated movie #{}",
            view.credits.top_rated_rank
        )),
        Line::from(view.credits.awards.clone()),
        Line::from(""),
    ];

    match &view.trailer {
        TrailerRegion::Hidden => {}
        TrailerRegion::Prompt => lines.push(Line::from(vec![
            Span::styled("▶ Watch Trailer", Style::default().fg(Color::Green)),
            Span::raw("  [t]"),
        ])),
        TrailerRegion::Player { embed_url } => {
            lines.push(Line::from(Span::styled(
                "▶ Playing trailer",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(embed_url.clone()));
        }
    }

    if let Some(link) = &view.download_link {
        lines.push(Line::from(vec![
            Span::styled("⤓ Download", Style::default().fg(Color::Cyan)),
            Span::raw("  [d]"),
        ]));
        lines.push(Line::from(link.clone()));
    }

    if view.backdrop_url.is_some() {
        lines.push(Line::from(vec![
            Span::raw("Backdrop"),
            Span::raw("  [b]"),
        ]));
    }

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Rating "));
    frame.render_widget(sidebar, area);
}

/// Draws the footer with key hints, status or the movie ID input.
fn draw_footer(frame: &mut Frame, area: Rect, state: &ViewerState) {
    let footer = match state.input_mode {
        InputMode::MovieId => Paragraph::new(format!("Movie ID: {}_", state.id_input))
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Enter: load  Esc: cancel "),
            ),
        InputMode::Normal => {
            let text = state.status.clone().unwrap_or_else(|| {
                String::from("t: Trailer  d: Download  b: Backdrop  /: Movie ID  q: Quit")
            });
            Paragraph::new(text).block(Block::default().borders(Borders::ALL))
        }
    };
    frame.render_widget(footer, area);
}
