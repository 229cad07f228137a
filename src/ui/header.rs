use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel_block;
use super::theme::{COLOR_ACCENT, COLOR_MUTED};
use crate::app::App;
use crate::utils::fit_text;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();

    let title_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);

    let state_label = if session.is_running() { "live" } else { "stopped" };
    let mut first_line = vec![
        Span::styled("gpuwatch", title_style),
        Span::raw("  "),
        Span::styled("gpu metrics sampler", Style::default().fg(COLOR_MUTED)),
        Span::raw("  "),
        Span::styled("state ", label_style),
        Span::styled(state_label, Style::default().fg(COLOR_ACCENT)),
        Span::raw("  "),
        Span::styled("interval ", label_style),
        Span::styled(
            format!("{}s", app.interval().as_secs()),
            Style::default().fg(COLOR_ACCENT),
        ),
    ];
    if let Some(timestamp) = session.last_capture() {
        first_line.push(Span::raw("  "));
        first_line.push(Span::styled("captured ", label_style));
        first_line.push(Span::styled(timestamp.to_string(), value_style));
    }

    let devices_line = match session.catalog() {
        Some(catalog) => {
            let names: Vec<String> = catalog
                .devices()
                .iter()
                .map(|device| format!("{}:{}", device.index, device.name))
                .collect();
            Line::from(vec![
                Span::styled("devices ", label_style),
                Span::styled(
                    fit_text(&names.join("  "), area.width.saturating_sub(12) as usize),
                    value_style,
                ),
            ])
        }
        None => Line::from(vec![
            Span::styled("devices ", label_style),
            Span::styled("discovered at start", Style::default().fg(COLOR_MUTED)),
        ]),
    };

    let csv_line = Line::from(vec![
        Span::styled("csv ", label_style),
        Span::styled(
            fit_text(
                &session.csv_path().display().to_string(),
                area.width.saturating_sub(8) as usize,
            ),
            value_style,
        ),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(first_line), devices_line, csv_line])
        .block(panel_block("gpuwatch"));
    frame.render_widget(paragraph, area);
}
