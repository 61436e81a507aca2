//! Entity list screen: search bar, data table, pager strip

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::forms::{CreateForm, FieldKind};
use crate::pages::{ListFocus, ListPage};
use crate::pagination::PageLink;
use crate::table::Placeholder;

use super::centered_rect;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(page) = &app.list else { return };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search and filters
            Constraint::Min(1),    // Table
            Constraint::Length(1), // Pager
        ])
        .split(area);

    draw_search_bar(f, page, chunks[0]);
    draw_table(f, page, chunks[1]);
    draw_pager(f, page, chunks[2]);

    if let Some(form) = &page.create_form {
        draw_create_form(f, form, area);
    } else if let Some((id, label)) = &page.confirm_delete {
        draw_confirm(f, page, *id, label, area);
    }
}

fn draw_search_bar(f: &mut Frame, page: &ListPage, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let search_style = if page.focus == ListFocus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(page.search.value()).block(
        Block::default()
            .title(" Search (/) ")
            .borders(Borders::ALL)
            .border_style(search_style),
    );
    f.render_widget(search, halves[0]);
    if page.focus == ListFocus::Search {
        f.set_cursor_position((
            halves[0].x + 1 + page.search.visual_cursor() as u16,
            halves[0].y + 1,
        ));
    }

    // Filter editor when focused, otherwise the active filter summary
    let (title, content) = if page.focus == ListFocus::Filter {
        let def = page.table.filter_defs().get(page.filter_cursor);
        let label = def.map(|d| d.label).unwrap_or("?");
        (
            format!(" Filter: {label} (Tab next, Enter apply) "),
            page.filter_input.value().to_string(),
        )
    } else {
        let active: Vec<String> = page
            .filters
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let summary = if active.is_empty() {
            "none".to_string()
        } else {
            active.join("  ")
        };
        (" Filters (f) ".to_string(), summary)
    };
    let filter_style = if page.focus == ListFocus::Filter {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let filters = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(filter_style),
    );
    f.render_widget(filters, halves[1]);
    if page.focus == ListFocus::Filter {
        f.set_cursor_position((
            halves[1].x + 1 + page.filter_input.visual_cursor() as u16,
            halves[1].y + 1,
        ));
    }
}

fn draw_table(f: &mut Frame, page: &ListPage, area: Rect) {
    let block = Block::default()
        .title(format!(" {}s ", page.kind.label()))
        .borders(Borders::ALL)
        .border_style(if page.focus == ListFocus::Rows {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    // Loading wins over the empty state
    if let Some(placeholder) = page.table.placeholder() {
        let text = match placeholder {
            Placeholder::Loading => Span::styled("Loading...", Style::default().fg(Color::Yellow)),
            Placeholder::NoResults => {
                Span::styled("No results found", Style::default().fg(Color::DarkGray))
            }
        };
        let body = Paragraph::new(vec![Line::from(""), Line::from(text)])
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(body, area);
        return;
    }

    let columns = page.table.columns();
    let header = Row::new(columns.iter().map(|c| {
        let mut text = c.header.to_string();
        if let Some(sort) = page.table.sort() {
            if sort.key == c.key {
                text.push(match sort.dir {
                    crate::table::SortDir::Asc => '\u{2191}',
                    crate::table::SortDir::Desc => '\u{2193}',
                });
            }
        }
        Cell::from(text)
    }))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = page
        .table
        .visible_rows()
        .iter()
        .map(|row| Row::new(columns.iter().map(|c| Cell::from(c.cell(row)))))
        .collect();

    let widths = vec![Constraint::Percentage(100 / columns.len().max(1) as u16); columns.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(page.table.cursor()));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_pager(f: &mut Frame, page: &ListPage, area: Rect) {
    let pager = &page.pager;
    let mut spans = vec![Span::styled(
        format!(
            " {} items | size {} | ",
            pager.total(),
            pager.page_size()
        ),
        Style::default().fg(Color::DarkGray),
    )];

    spans.push(Span::styled(
        if pager.has_prev() { "< " } else { "  " },
        Style::default().fg(Color::Cyan),
    ));
    for link in pager.links() {
        match link {
            PageLink::Page(n) => {
                let current = n == pager.api_page();
                spans.push(Span::styled(
                    format!("{n} "),
                    if current {
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ));
            }
            PageLink::Ellipsis => {
                spans.push(Span::styled(".. ", Style::default().fg(Color::DarkGray)))
            }
        }
    }
    spans.push(Span::styled(
        if pager.has_next() { ">" } else { " " },
        Style::default().fg(Color::Cyan),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_create_form(f: &mut Frame, form: &CreateForm, area: Rect) {
    let height = (form.fields.len() as u16) * 2 + 4;
    let popup = centered_rect(60, height, area);
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.cursor;
        let marker = if focused { "> " } else { "  " };
        let shown = match &field.kind {
            FieldKind::Bool => format!("[{}]", field.value),
            FieldKind::Select(_) => format!("< {} >", field.value),
            _ => field.value.clone(),
        };
        let required = if field.required { "*" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{marker}{}{required}: ", field.label),
                if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
            Span::raw(shown),
        ]));
        lines.push(match &field.error {
            Some(error) => Line::from(Span::styled(
                format!("    {error}"),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(""),
        });
    }
    lines.push(Line::from(Span::styled(
        if form.submitting {
            "Submitting...".to_string()
        } else {
            "Enter submit | Tab next field | Esc cancel".to_string()
        },
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", form.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(body, popup);
}

fn draw_confirm(f: &mut Frame, page: &ListPage, id: i64, label: &str, area: Rect) {
    let popup = centered_rect(50, 7, area);
    f.render_widget(Clear, popup);

    let status = if page.delete_in_flight {
        Line::from(Span::styled(
            "Deleting...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "y confirm | n cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };
    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(format!("Delete {} \"{label}\" (#{id})?", page.kind.label())),
        Line::from(""),
        status,
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Confirm delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(body, popup);
}
