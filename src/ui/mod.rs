mod footer;
mod header;
mod monitor;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use theme::COLOR_BORDER;

pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();
    if size.width < 60 || size.height < 14 {
        let msg = Paragraph::new("Terminal too small. Resize to at least 60x14.")
            .block(panel_block("gpuwatch"))
            .alignment(Alignment::Center);
        frame.render_widget(msg, size);
        return;
    }

    let header_height = 5;
    let footer_height = 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(6),
            Constraint::Length(footer_height),
        ])
        .split(size);

    header::render(frame, chunks[0], app);
    monitor::render(frame, chunks[1], app);
    footer::render(frame, chunks[2], app);
}

pub fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}
