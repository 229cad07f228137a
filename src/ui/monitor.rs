use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::panel_block;
use super::theme::COLOR_MUTED;
use crate::app::App;

/// The live viewport body: the formatted history table, or a hint while the
/// session is stopped or has not sampled yet.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();

    let paragraph = match session.rendered() {
        Some(table) => Paragraph::new(table.to_string()).block(panel_block("history")),
        None => {
            let hint = if session.is_running() {
                "waiting for the first sample..."
            } else {
                "press s to start monitoring"
            };
            Paragraph::new(hint)
                .style(Style::default().fg(COLOR_MUTED))
                .alignment(Alignment::Center)
                .block(panel_block("history"))
        }
    };
    frame.render_widget(paragraph, area);
}
