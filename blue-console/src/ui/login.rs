//! Login screen

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::pages::LoginFocus;

use super::centered_rect;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let outer = centered_rect(50, 12, area);
    f.render_widget(
        Block::default()
            .title(" Sign in ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
        outer,
    );

    let inner = outer.inner(Margin::new(2, 1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(inner);

    let page = &app.login;

    let field_block = |title: &'static str, focused: bool| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            })
    };

    let username = Paragraph::new(page.username.value()).block(field_block(
        " Username or email ",
        page.focus == LoginFocus::Username,
    ));
    f.render_widget(username, chunks[0]);

    let masked = "*".repeat(page.password.value().chars().count());
    let password = Paragraph::new(masked).block(field_block(
        " Password ",
        page.focus == LoginFocus::Password,
    ));
    f.render_widget(password, chunks[1]);

    let status = if page.in_flight {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &page.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(status), chunks[2]);

    // Cursor in the focused field
    let (input, field_area) = match page.focus {
        LoginFocus::Username => (&page.username, chunks[0]),
        LoginFocus::Password => (&page.password, chunks[1]),
    };
    f.set_cursor_position((
        field_area.x + 1 + input.visual_cursor() as u16,
        field_area.y + 1,
    ));
}
