//! Header: logo (spinner while busy), title, endpoint address.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::time::Instant;

use crate::core::app;

use super::super::constants::{LOGO_BUSY, LOGO_IDLE};
use super::super::view::PanelView;

/// Start time for the spinner phase.
static HEADER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Max width for the endpoint address; longer ones are truncated with "…".
const ENDPOINT_HEADER_WIDTH: u16 = 40;

fn title_text() -> String {
    format!("{} v{} ", app::NAME, app::VERSION)
}

/// Keep the tail of `text` (host and path matter more than the scheme).
fn truncate_left(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len || max_len < 2 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let start = chars.len() - (max_len - 1);
    format!("…{}", chars[start..].iter().collect::<String>())
}

pub(crate) fn draw_header(f: &mut Frame, view: &PanelView, base_url: &str, area: Rect, accent: Color) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(ENDPOINT_HEADER_WIDTH),
        ])
        .split(area);

    let logo_symbol = if view.is_busy() {
        let start = HEADER_START.get_or_init(Instant::now);
        let phase = start.elapsed().as_millis() as usize;
        LOGO_BUSY[(phase / 80) % LOGO_BUSY.len()]
    } else {
        LOGO_IDLE
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", logo_symbol),
            Style::default().fg(accent),
        ))),
        header_chunks[0],
    );

    let title_str = title_text();
    let title_len = title_str.chars().count() as u16;
    let title_area = Rect {
        x: area.x + area.width.saturating_sub(title_len) / 2,
        y: area.y,
        width: title_len.min(area.width),
        height: area.height,
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            title_str,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))),
        title_area,
    );

    let endpoint = truncate_left(base_url, ENDPOINT_HEADER_WIDTH as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            endpoint,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right),
        header_chunks[2],
    );
}
