use ratatui::layout::{Constraint, Direction, Flex};
use ratatui::prelude::{Layout, Rect};

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// A rectangle of `percent_x` by `percent_y` centred in `r`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(r);
    let [area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    area
}

/// `count` equal columns of at most `max_width` cells, centred in `area`.
pub(super) fn box_columns(area: Rect, count: usize, max_width: u16) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let width = (area.width / count as u16).min(max_width);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Length(width)).collect::<Vec<_>>())
        .flex(Flex::Center)
        .split(area)
        .to_vec()
}
