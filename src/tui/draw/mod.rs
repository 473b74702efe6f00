//! TUI rendering: layout and widgets for the control panel.

mod banners;
mod bar;
mod controls;
mod header;
mod models;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::constants::ACCENT;
use super::view::PanelView;

pub(super) fn draw(f: &mut Frame, view: &mut PanelView, base_url: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::draw_header(f, view, base_url, chunks[0], ACCENT);
    controls::draw_credential(f, view, chunks[1]);
    controls::draw_settings(f, view, chunks[2]);

    let banner_lines = banners::wrapped_banners(view, chunks[3].width);
    let banner_height = (banner_lines.len() as u16).min(chunks[3].height.saturating_sub(3));
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(3)])
        .split(chunks[3]);
    banners::draw_banners(f, banner_lines, body[0]);
    models::draw_models(f, view, body[1]);

    bar::draw_bottom_bar(f, view, chunks[4]);
}
