//! Entity detail screen: editable fields plus relationship pickers

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::forms::FieldMode;
use crate::pages::{DetailFocus, DetailPage};
use crate::picker::{PickerSection, PickerSide, RelationPicker};
use crate::query::QueryState;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(page) = &app.detail else { return };

    if matches!(page.slot.state(), QueryState::Loading | QueryState::Idle) && page.fields.is_empty()
    {
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Loading...", Style::default().fg(Color::Yellow))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, area);
        return;
    }

    let chunks = if page.pickers.is_empty() {
        vec![area]
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area)
            .to_vec()
    };

    draw_fields(f, page, chunks[0]);

    if let Some(right) = chunks.get(1) {
        let picker_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Ratio(1, page.pickers.len() as u32);
                page.pickers.len()
            ])
            .split(*right);
        for (i, picker) in page.pickers.iter().enumerate() {
            let focused_side = match page.focus {
                DetailFocus::Picker(index) if index == i => Some(picker.focus()),
                _ => None,
            };
            draw_picker(f, picker, focused_side, app.picker_search_active, picker_areas[i]);
        }
    }
}

fn draw_fields(f: &mut Frame, page: &DetailPage, area: Rect) {
    let focused = page.focus == DetailFocus::Fields;
    let block = Block::default()
        .title(format!(" {} #{} - {} ", page.kind.label(), page.id, page.title))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let mut lines = Vec::new();
    for (i, field) in page.fields.iter().enumerate() {
        let selected = focused && i == page.field_cursor;
        let marker = if selected { "> " } else { "  " };
        let label_style = if field.editable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled(
            format!("{marker}{:<16}", field.label),
            if selected {
                label_style.add_modifier(Modifier::BOLD)
            } else {
                label_style
            },
        )];
        match field.mode() {
            FieldMode::Editing => {
                spans.push(Span::styled(
                    format!("{}\u{2588}", page.edit_input.value()),
                    Style::default().fg(Color::Yellow),
                ));
            }
            FieldMode::Saving => {
                spans.push(Span::raw(field.value().to_string()));
                spans.push(Span::styled(
                    "  saving...",
                    Style::default().fg(Color::Yellow),
                ));
            }
            FieldMode::ViewingWithError(error) => {
                spans.push(Span::raw(field.value().to_string()));
                spans.push(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(Color::Red),
                ));
            }
            FieldMode::Viewing => {
                spans.push(Span::raw(field.value().to_string()));
            }
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_picker(
    f: &mut Frame,
    picker: &RelationPicker,
    focused_side: Option<PickerSide>,
    search_active: bool,
    area: Rect,
) {
    let title = if picker.search().is_empty() {
        format!(" {} ", picker.title())
    } else {
        format!(" {} [{}] ", picker.title(), picker.search())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(match focused_side {
            Some(_) if search_active => Style::default().fg(Color::Yellow),
            Some(_) => Style::default().fg(Color::Blue),
            None => Style::default().fg(Color::DarkGray),
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    draw_side(f, picker, PickerSide::Available, focused_side, halves[0]);
    draw_side(f, picker, PickerSide::Attached, focused_side, halves[1]);
}

fn draw_side(
    f: &mut Frame,
    picker: &RelationPicker,
    side: PickerSide,
    focused_side: Option<PickerSide>,
    area: Rect,
) {
    let focused = focused_side == Some(side);
    let title = match side {
        PickerSide::Available => " Available ",
        PickerSide::Attached => " Selected ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    match picker.section(side) {
        PickerSection::Loading => {
            let body = Paragraph::new(Span::styled(
                "Loading...",
                Style::default().fg(Color::Yellow),
            ))
            .block(block);
            f.render_widget(body, area);
        }
        PickerSection::Empty(message) => {
            let body = Paragraph::new(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            f.render_widget(body, area);
        }
        PickerSection::Items(items) => {
            let list_items: Vec<ListItem> = items
                .iter()
                .map(|item| {
                    let pending = picker.is_in_flight(item.id);
                    let mut line = vec![Span::raw(item.label.clone())];
                    if pending {
                        line.push(Span::styled(" ~", Style::default().fg(Color::Yellow)));
                    }
                    ListItem::new(Line::from(line))
                })
                .collect();
            let list = List::new(list_items).block(block).highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default();
            if focused {
                state.select(Some(picker.cursor()));
            }
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}
