//! Terminal rendering
//!
//! Pure view layer: every frame is drawn from the current [`App`]
//! state, one module per page. Nothing in here mutates state.

mod dashboard;
mod detail;
mod list;
mod login;

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::App;
use crate::notify::ToastLevel;
use crate::route::Route;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Page body
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let body = if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        draw_logs(f, split[1]);
        split[0]
    } else {
        chunks[1]
    };

    match app.route {
        Route::Login => login::draw(f, app, body),
        Route::Dashboard => dashboard::draw(f, app, body),
        Route::EntityList(_) => list::draw(f, app, body),
        Route::EntityDetail(..) => detail::draw(f, app, body),
        Route::NotFound => draw_not_found(f, body),
    }

    draw_hints(f, app, chunks[2]);
    draw_toasts(f, app, chunks[1]);

    if let Some(input) = &app.goto {
        draw_goto(f, input, f.area());
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let user = app
        .client()
        .session()
        .user()
        .map(|u| u.display_name())
        .unwrap_or_else(|| "not signed in".to_string());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Blue Admin ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(app.route.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled(user, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(title, area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(Block::default().title(" Logs ").borders(Borders::ALL))
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White));
    f.render_widget(logs, area);
}

fn draw_hints(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.route {
        Route::Login => " Tab switch field | Enter sign in | Esc quit",
        Route::Dashboard => " 1-5 open list | r refresh | g goto | L logs | Ctrl-o sign out | q quit",
        Route::EntityList(_) => {
            " j/k move | Enter open | n new | d delete | / search | f filter | c clear | [/] page | s size | Esc back"
        }
        Route::EntityDetail(..) => {
            " Tab panel | j/k move | Enter edit/toggle | \u{2190}/\u{2192} side | / search | Esc back"
        }
        Route::NotFound => " g goto | Esc back",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_not_found(f: &mut Frame, area: Rect) {
    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "404 - page not found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Esc to return to the dashboard."),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, area);
}

/// Transient notifications, stacked bottom-right over the page body
fn draw_toasts(f: &mut Frame, app: &App, body: Rect) {
    if app.toasts.is_empty() {
        return;
    }
    let toasts: Vec<&crate::notify::Toast> = app.toasts.iter().collect();
    let height = toasts.len() as u16;
    let width = 44.min(body.width);
    let area = Rect {
        x: body.right().saturating_sub(width),
        y: body.bottom().saturating_sub(height),
        width,
        height,
    };
    f.render_widget(Clear, area);

    let lines: Vec<Line> = toasts
        .iter()
        .map(|toast| {
            let style = match toast.level {
                ToastLevel::Info => Style::default().fg(Color::Cyan),
                ToastLevel::Success => Style::default().fg(Color::Green),
                ToastLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(format!(" {} ", toast.message), style))
        })
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), area);
}

fn draw_goto(f: &mut Frame, input: &tui_input::Input, screen: Rect) {
    let area = centered_rect(50, 3, screen);
    f.render_widget(Clear, area);
    let box_ = Paragraph::new(input.value()).block(
        Block::default()
            .title(" Go to (e.g. /admin/users) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(box_, area);
    f.set_cursor_position((area.x + 1 + input.visual_cursor() as u16, area.y + 1));
}

/// Fixed-height rect centered in `area`, `percent_x` wide
pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}
