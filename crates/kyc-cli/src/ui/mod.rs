//! Terminal rendering for the lookup screen.

pub mod profile_detail;

use chrono::Local;
use kyc_core::SearchState;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(3), // email input
      Constraint::Min(0),    // result
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_input(f, rows[1], app);
  draw_result(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " kyc  profile lookup",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{}  {date} ", app.base_url()),
    Style::default().fg(Color::Gray),
  );

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Input ────────────────────────────────────────────────────────────────────

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
  let border = if app.state().error_message().is_some() {
    Color::Red
  } else {
    Color::Cyan
  };
  let block = Block::default()
    .title(" Email ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let text = if app.input.is_empty() {
    Line::from(Span::styled(
      "Enter email address",
      Style::default().fg(Color::DarkGray),
    ))
  } else {
    Line::from(app.input.as_str())
  };

  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(text), inner);

  let cursor_x = inner.x.saturating_add(app.input.chars().count() as u16);
  f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}

// ─── Result ───────────────────────────────────────────────────────────────────

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
  match app.state() {
    SearchState::Success(profile) => profile_detail::draw(f, area, profile),
    SearchState::Loading => {
      let mut label = String::from("Looking up profile…");
      if app.search.in_flight() > 1 {
        label.push_str(&format!(" ({} requests)", app.search.in_flight()));
      }
      draw_message(f, area, &label, Style::default().fg(Color::Yellow));
    }
    SearchState::Failure(message) => {
      draw_message(f, area, message, Style::default().fg(Color::Red));
    }
    SearchState::Idle => draw_message(
      f,
      area,
      "Type an email and press Enter to search.",
      Style::default().fg(Color::DarkGray),
    ),
  }
}

fn draw_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
  let block = Block::default()
    .title(" Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
      .wrap(Wrap { trim: true }),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, mode_bg) = match app.state() {
    SearchState::Idle => ("IDLE", Color::Cyan),
    SearchState::Loading => ("LOADING", Color::Yellow),
    SearchState::Success(_) => ("FOUND", Color::Green),
    SearchState::Failure(_) => ("ERROR", Color::Red),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(mode_bg)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    "  Enter search  Ctrl-U clear  Esc clear/quit  Ctrl-C quit",
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
