use ratatui::layout::{Constraint, Layout, Rect};

pub struct FormLayout {
    pub url: Rect,
    pub format: Rect,
    pub status: Rect,
    pub body: Rect,
    pub help: Rect,
}

pub fn form_layout(area: Rect) -> FormLayout {
    let [url, format, status, body, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    FormLayout {
        url,
        format,
        status,
        body,
        help,
    }
}
