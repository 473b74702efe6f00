//! Bottom bar: key file location on the left, shortcuts on the right.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::credential;

use super::super::shortcuts::labels;
use super::super::view::PanelView;

pub(crate) fn draw_bottom_bar(f: &mut Frame, view: &PanelView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(100)])
        .split(area);

    let key_file = credential::credentials_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "API key not persisted".to_string());
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            key_file,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(labels::bottom_bar(view.focus)).alignment(Alignment::Right),
        chunks[1],
    );
}
