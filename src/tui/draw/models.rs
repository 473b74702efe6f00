//! Model cards: one row per listed model, the focused one can be loaded.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::super::constants::ACCENT;
use super::super::view::{Focus, PanelView};

pub(crate) fn draw_models(f: &mut Frame, view: &mut PanelView, area: Rect) {
    let focused = view.focus == Focus::Models;
    let border = if focused { ACCENT } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" Models ({}) ", view.models().len()),
            Style::default().fg(border),
        ));

    if view.models().is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No models listed. Enter an API key and press List models.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = view
        .models()
        .iter()
        .map(|model| {
            ListItem::new(Line::from(vec![
                Span::styled(model.id.clone(), Style::default().fg(Color::White)),
                Span::styled("  [Load]", Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("▸ ");

    let selected = view.selected_model();
    view.model_list_state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut view.model_list_state);
}
