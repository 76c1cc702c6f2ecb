//! Stateless rendering layer for the TUI.
//!
//! Turns an `AppModel` into ratatui widgets: a header with the filter tabs and
//! sync indicator, an optional error line, the filtered list, and the footer
//! with either the key help or the active prompt. Nothing here mutates the
//! model.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState as ListWidgetState, Paragraph},
};

use crate::item::{Filter, Item};
use crate::time::format_clock_time;

use super::keymap::help_text;
use super::model::{AppMode, AppModel};
use super::theme::Palette;
use super::widgets::PromptWidget;

const TITLE: &str = "TODO LIST";

pub(super) fn draw(frame: &mut Frame, model: &AppModel) {
    let palette = Palette::for_mode(model.list.display_mode());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let error_height = u16::from(model.list.last_error().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(error_height),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(model, &palette)), chunks[0]);
    if let Some(error) = model.list.last_error() {
        let line = format!("{} ({})", error, format_clock_time(error.at));
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(palette.danger)),
            chunks[1],
        );
    }
    render_list(frame, chunks[2], model, &palette);
    render_help_or_prompt(frame, chunks[3], model, &palette);
}

fn header_line(model: &AppModel, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )];

    for filter in Filter::ALL {
        spans.push(Span::raw("  "));
        if filter == model.list.filter() {
            spans.push(Span::styled(
                format!("[{}]", filter.label()),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", filter.label()),
                Style::default().fg(palette.text_muted),
            ));
        }
    }

    let mode = if model.list.display_mode().is_dark() {
        "dark"
    } else {
        "light"
    };
    spans.push(Span::styled(
        format!("  {mode}"),
        Style::default().fg(palette.text_muted),
    ));
    if model.is_syncing() {
        spans.push(Span::styled(
            "  syncing…",
            Style::default().fg(palette.editing),
        ));
    }
    Line::from(spans)
}

fn render_list(frame: &mut Frame, area: Rect, model: &AppModel, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    if model.view_len() == 0 {
        let placeholder = if model.is_syncing() && !model.list.is_loaded() {
            "Loading…"
        } else {
            "No todos"
        };
        frame.render_widget(
            Paragraph::new(placeholder)
                .style(Style::default().fg(palette.text_muted))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<ListItem> = model
        .list
        .derived_view()
        .enumerate()
        .map(|(index, item)| ListItem::new(display_text(model, item, index, palette)))
        .collect();

    let mut list_state = ListWidgetState::default();
    list_state.select(Some(model.cursor));
    frame.render_stateful_widget(List::new(rows).block(block), area, &mut list_state);
}

fn render_help_or_prompt(frame: &mut Frame, area: Rect, model: &AppModel, palette: &Palette) {
    match &model.mode {
        AppMode::Prompt(prompt) => {
            frame.render_widget(
                PromptWidget::new(&prompt.message, &prompt.buffer).style(palette.base()),
                area,
            );
        }
        AppMode::Normal => {
            let help_widget = Paragraph::new(help_text())
                .style(Style::default().fg(palette.text_muted))
                .block(Block::default().borders(Borders::TOP));
            frame.render_widget(help_widget, area);
        }
    }
}

/// One list row. While an edit session targets the item the pending draft is
/// shown in place of the saved title.
pub(super) fn display_text<'a>(
    model: &'a AppModel,
    item: &'a Item,
    index: usize,
    palette: &Palette,
) -> Text<'a> {
    let is_cursored = index == model.cursor;
    let cursor_prefix = if is_cursored { "▶ " } else { "  " };
    let status_box = if item.completed { "[✓] " } else { "[ ] " };

    let mut spans = vec![Span::raw(cursor_prefix), Span::raw(status_box)];

    let draft = model
        .list
        .edit_session()
        .filter(|session| session.target_id == item.id);
    let mut title_style = Style::default();
    if is_cursored {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    match draft {
        Some(session) => {
            spans.push(Span::styled("✎ ", Style::default().fg(palette.editing)));
            spans.push(Span::styled(
                session.draft_title.as_str(),
                title_style.fg(palette.editing),
            ));
        }
        None => {
            if item.completed {
                title_style = title_style
                    .fg(palette.text_muted)
                    .add_modifier(Modifier::CROSSED_OUT);
            }
            spans.push(Span::styled(item.title.as_str(), title_style));
        }
    }

    Text::from(Line::from(spans))
}
