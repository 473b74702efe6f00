//! Notification banners above the model list, newest first.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::notice::Severity;

use super::super::constants::MAX_VISIBLE_BANNERS;
use super::super::view::PanelView;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

/// Lines for the visible banners, wrapped to `width`.
pub(crate) fn wrapped_banners(view: &PanelView, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for banner in view.banners().iter().take(MAX_VISIBLE_BANNERS) {
        let color = severity_color(banner.notice.severity);
        let stamp = format!(" {} ", banner.shown_at_local.format("%H:%M:%S"));
        let text_width = (width as usize).saturating_sub(stamp.len() + 2).max(10);
        let indent = " ".repeat(stamp.len() + 2);
        for (i, chunk) in textwrap::wrap(&banner.notice.message, text_width)
            .into_iter()
            .enumerate()
        {
            let lead = if i == 0 {
                vec![
                    Span::styled("▌ ", Style::default().fg(color)),
                    Span::styled(stamp.clone(), Style::default().fg(Color::DarkGray)),
                ]
            } else {
                vec![Span::raw(indent.clone())]
            };
            let mut spans = lead;
            spans.push(Span::styled(
                chunk.into_owned(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(spans));
        }
    }
    lines
}

pub(crate) fn draw_banners(f: &mut Frame, lines: Vec<Line<'static>>, area: Rect) {
    if area.height == 0 {
        return;
    }
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credential::MemoryCredentialStore;

    #[test]
    fn long_messages_wrap() {
        let mut view = PanelView::new(Box::new(MemoryCredentialStore::default()));
        view.show_notification(
            "Error loading models: error sending request for url (http://localhost:5001/v1/model/list)",
            Severity::Danger,
        );
        assert!(wrapped_banners(&view, 40).len() > 1);
        assert_eq!(wrapped_banners(&view, 200).len(), 1);
    }

    #[test]
    fn only_newest_banners_are_drawn() {
        let mut view = PanelView::new(Box::new(MemoryCredentialStore::default()));
        for i in 0..(MAX_VISIBLE_BANNERS + 2) {
            view.show_notification(format!("n{}", i), Severity::Success);
        }
        let lines = wrapped_banners(&view, 80);
        assert_eq!(lines.len(), MAX_VISIBLE_BANNERS);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.ends_with(&format!("n{}", MAX_VISIBLE_BANNERS + 1)));
    }
}
