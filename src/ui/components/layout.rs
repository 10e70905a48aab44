use tui::layout::{Constraint, Direction, Layout, Rect};

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A rect of fixed height anchored at the top middle of `r`, clipped to it
pub fn top_center(percent_x: u16, top: u16, height: u16, r: Rect) -> Rect {
    let width = (r.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let x = r.x + (r.width - width) / 2;
    let y = r.y.saturating_add(top).min(r.y + r.height);
    let height = height.min(r.y + r.height - y);

    Rect::new(x, y, width, height)
}
