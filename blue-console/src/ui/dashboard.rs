//! Dashboard: one count card per entity kind

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::query::QueryState;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(20);
            app.dashboard.counts.len().max(1)
        ])
        .split(chunks[0]);

    for (i, (kind, slot)) in app.dashboard.counts.iter().enumerate() {
        let Some(card) = cards.get(i) else { break };
        let count = match slot.state() {
            QueryState::Ready(count) => count.to_string(),
            QueryState::Failed(_) => "!".to_string(),
            _ => "...".to_string(),
        };
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                count,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("[{}]", i + 1),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {}s ", kind.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(body, *card);
    }

    let help = Paragraph::new(vec![
        Line::from(""),
        Line::from("Press the number of an entity to open its list,"),
        Line::from("or g to jump to a path like /admin/users/42."),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}
