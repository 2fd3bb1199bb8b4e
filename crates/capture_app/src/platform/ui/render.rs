use capture_core::{AppViewModel, Field, PipelineStage};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use super::layout::form_layout;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let layout = form_layout(frame.area());

    render_field(frame, layout.url, view, Field::Url, "URL");
    render_field(frame, layout.format, view, Field::Format, "Format (xml/toml)");

    let status = match (&view.visiting, view.stage) {
        (Some(url), PipelineStage::Capturing) => format!("{}: visiting {}", view.stage, url),
        _ => view.stage.to_string(),
    };
    frame.render_widget(
        Paragraph::new(status).block(Block::bordered().title("Status")),
        layout.status,
    );

    render_body(frame, layout.body, view);

    let help = if view.stage.is_terminal() {
        "q/Enter: quit"
    } else if view.is_editable() {
        "Tab: switch field  Enter: capture  Esc/Ctrl+C: quit"
    } else {
        "Esc/Ctrl+C: quit"
    };
    frame.render_widget(Paragraph::new(help).dim(), layout.help);
}

fn render_field(frame: &mut Frame, area: Rect, view: &AppViewModel, field: Field, title: &str) {
    let focused = view.is_editable() && view.focus == field;
    let border = if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new()
    };
    let value = view.field_value(field);
    frame.render_widget(
        Paragraph::new(value).block(Block::bordered().title(title).border_style(border)),
        area,
    );

    if focused {
        let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_body(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    if let Some(error) = &view.input_error {
        let message = Paragraph::new(error.as_str())
            .red()
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Invalid input"));
        frame.render_widget(message, area);
        return;
    }

    if let Some(failure) = &view.failure {
        let message = Paragraph::new(failure.as_str())
            .red()
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Capture failed"));
        frame.render_widget(message, area);
        return;
    }

    match (&view.summary, view.stage) {
        (Some(summary), PipelineStage::Done) => {
            let title = format!(
                "Saved {} links to {}",
                summary.document.len(),
                summary.path.display()
            );
            let items: Vec<ListItem> = summary
                .document
                .links()
                .iter()
                .map(|link| ListItem::new(format!("{:?} -> {}", link.text, link.href)))
                .collect();
            frame.render_widget(
                List::new(items).block(Block::bordered().title(title).green()),
                area,
            );
        }
        (_, PipelineStage::Capturing | PipelineStage::Writing) => {
            frame.render_widget(
                Paragraph::new("Working...").block(Block::bordered().title("Links")),
                area,
            );
        }
        _ => {
            frame.render_widget(Block::bordered().title("Links"), area);
        }
    }
}
