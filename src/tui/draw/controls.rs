//! Credential field, load settings, and the List / Unload buttons.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::constants::{ACCENT, ACCENT_SECONDARY, CONTEXT_UNSPECIFIED};
use super::super::view::{Focus, PanelView};

const MASK: char = '•';

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn titled_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(Span::styled(format!(" {} ", title), border_style(focused)))
}

/// The key is never drawn in clear text.
fn masked(text: &str) -> String {
    std::iter::repeat_n(MASK, text.chars().count()).collect()
}

pub(crate) fn draw_credential(f: &mut Frame, view: &PanelView, area: Rect) {
    let focused = view.focus == Focus::Credential;
    let content = if view.credential().is_empty() {
        Span::styled("Enter API key...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(masked(view.credential()))
    };
    let block = titled_block("API key", focused);
    let inner = block.inner(area);
    f.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(Style::default().fg(Color::White)),
        area,
    );
    if focused {
        let len = view.credential().chars().count().min(inner.width as usize) as u16;
        f.set_cursor_position(Position::new(inner.x + len, inner.y));
    }
}

fn selector_line(value: &str, focused: bool) -> Line<'static> {
    let arrow = Style::default().fg(if focused { ACCENT } else { Color::DarkGray });
    Line::from(vec![
        Span::styled("‹ ", arrow),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
        Span::styled(" ›", arrow),
    ])
}

fn button(f: &mut Frame, label: &str, focused: bool, area: Rect) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT_SECONDARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT_SECONDARY)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(focused)),
            ),
        area,
    );
}

pub(crate) fn draw_settings(f: &mut Frame, view: &PanelView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Length(18),
            Constraint::Min(0),
            Constraint::Length(16),
            Constraint::Length(16),
        ])
        .split(area);

    let context = view
        .max_seq_len()
        .map(|n| n.to_string())
        .unwrap_or_else(|| CONTEXT_UNSPECIFIED.to_string());
    let focused = view.focus == Focus::ContextSize;
    f.render_widget(
        Paragraph::new(selector_line(&context, focused)).block(titled_block("Context", focused)),
        chunks[0],
    );

    let focused = view.focus == Focus::CacheMode;
    f.render_widget(
        Paragraph::new(selector_line(view.cache_mode().as_str(), focused))
            .block(titled_block("Cache", focused)),
        chunks[1],
    );

    button(f, "List models", view.focus == Focus::ListButton, chunks[3]);
    button(f, "Unload", view.focus == Focus::UnloadButton, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::masked;

    #[test]
    fn mask_hides_every_character() {
        assert_eq!(masked("sk-ünï"), "••••••");
        assert_eq!(masked(""), "");
    }
}
