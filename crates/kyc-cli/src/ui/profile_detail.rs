//! Profile detail pane, shown on a successful lookup.

use chrono::Local;
use kyc_core::UserProfile;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

/// Render `profile` into `area`.
pub fn draw(f: &mut Frame, area: Rect, profile: &UserProfile) {
  let block = Block::default()
    .title(format!(" {} ", profile.full_name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Green));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::from(Span::styled(
      profile.full_name.clone(),
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    field("Email", &profile.email),
    field("Adoption Location", &profile.adoption_location),
    field("COE Region", &profile.coe_region),
    Line::from(""),
  ];
  lines.push(Line::from(Span::styled(
    format!("Last updated: {}", format_updated_at(profile)),
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
  Line::from(vec![
    Span::styled(
      format!("{label:<19}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}

/// `updated_at` in local time, or verbatim if it is not RFC 3339.
pub fn format_updated_at(profile: &UserProfile) -> String {
  match profile.updated_at_parsed() {
    Some(ts) => ts
      .with_timezone(&Local)
      .format("%Y-%m-%d %H:%M:%S")
      .to_string(),
    None => profile.updated_at.clone(),
  }
}
