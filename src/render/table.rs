use std::path::PathBuf;
use std::time::Duration;

use super::schema;
use crate::data::{DeviceCatalog, HistoryStore};
use crate::error::{GpuWatchError, Result};
use crate::utils::run_command_with_input;

const DEFAULT_FORMATTER_PROGRAM: &str = "tabulate";

/// Output style understood by the formatting tool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStyle {
    Pipe,
    Grid,
    Simple,
    Plain,
    Github,
}

impl TableStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pipe" => Some(TableStyle::Pipe),
            "grid" => Some(TableStyle::Grid),
            "simple" => Some(TableStyle::Simple),
            "plain" => Some(TableStyle::Plain),
            "github" => Some(TableStyle::Github),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            TableStyle::Pipe => "pipe",
            TableStyle::Grid => "grid",
            TableStyle::Simple => "simple",
            TableStyle::Plain => "plain",
            TableStyle::Github => "github",
        }
    }
}

/// Table-formatting collaborator: turns delimited text (header line, then one
/// comma-separated line per row) into a formatted table.
pub trait TableFormatter {
    fn format(&self, delimited: &str) -> Result<String>;
}

/// Formatter backed by the external `tabulate` tool, fed on stdin.
pub struct TabulateFormatter {
    program: PathBuf,
    style: TableStyle,
    timeout: Duration,
}

impl TabulateFormatter {
    pub fn new(program: Option<PathBuf>, style: TableStyle) -> Self {
        Self {
            program: program.unwrap_or_else(|| PathBuf::from(DEFAULT_FORMATTER_PROGRAM)),
            style,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TableFormatter for TabulateFormatter {
    fn format(&self, delimited: &str) -> Result<String> {
        let program = self.program.to_string_lossy();
        run_command_with_input(
            &program,
            &["-1", "-s", ",", "-f", self.style.flag()],
            delimited,
            self.timeout,
        )
        .ok_or_else(|| {
            GpuWatchError::render(format!(
                "{program} unavailable, failed, or exceeded {}ms",
                self.timeout.as_millis()
            ))
        })
    }
}

/// Renders the retained history as a table for the live viewport.
pub struct TableRenderer {
    formatter: Box<dyn TableFormatter>,
}

impl TableRenderer {
    pub fn new(formatter: Box<dyn TableFormatter>) -> Self {
        Self { formatter }
    }

    /// Format the entire current history through the formatting collaborator.
    pub fn render(&self, catalog: &DeviceCatalog, history: &HistoryStore) -> Result<String> {
        self.formatter.format(&delimited_table(catalog, history))
    }
}

/// The delimited text handed to the formatter: display headers, then one row
/// per retained sample with the timestamp column dropped. Also serves as the
/// degraded display when the formatter fails.
pub fn delimited_table(catalog: &DeviceCatalog, history: &HistoryStore) -> String {
    let mut lines = Vec::with_capacity(history.len() + 1);
    lines.push(schema::display_headers(catalog.len()).join(","));
    for sample in history.snapshot() {
        let row: Vec<&str> = sample
            .readings
            .iter()
            .flat_map(|reading| [reading.memory_used.as_str(), reading.utilization.as_str()])
            .collect();
        lines.push(row.join(","));
    }
    let mut table = lines.join("\n");
    table.push('\n');
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DeviceReading, Sample};

    struct UppercaseFormatter;

    impl TableFormatter for UppercaseFormatter {
        fn format(&self, delimited: &str) -> Result<String> {
            Ok(delimited.to_ascii_uppercase())
        }
    }

    struct FailingFormatter;

    impl TableFormatter for FailingFormatter {
        fn format(&self, _delimited: &str) -> Result<String> {
            Err(GpuWatchError::render("formatter exited non-zero"))
        }
    }

    fn catalog(count: usize) -> DeviceCatalog {
        let names: Vec<String> = (0..count).map(|i| format!("GPU {i}")).collect();
        DeviceCatalog::from_names_output(&names.join("\n")).unwrap()
    }

    fn history_with(samples: &[(u64, u64)]) -> HistoryStore {
        let mut history = HistoryStore::new(16);
        for (tag, (mem, util)) in samples.iter().enumerate() {
            history.insert(Sample {
                timestamp: format!("2026-08-05 10:00:{tag:02}"),
                readings: vec![DeviceReading::new(*mem, *util)],
            });
        }
        history
    }

    #[test]
    fn delimited_table_drops_timestamp_and_orders_newest_first() {
        let history = history_with(&[(100, 10), (200, 20)]);
        let table = delimited_table(&catalog(1), &history);

        assert_eq!(table, "id 0 mem,id 0 usage\n200MiB,20%\n100MiB,10%\n");
    }

    #[test]
    fn delimited_table_keeps_column_count_per_device() {
        let mut history = HistoryStore::new(4);
        history.insert(Sample {
            timestamp: "2026-08-05 10:00:00".to_string(),
            readings: vec![DeviceReading::new(100, 10), DeviceReading::new(200, 20)],
        });
        let table = delimited_table(&catalog(2), &history);

        for line in table.lines() {
            assert_eq!(line.split(',').count(), 4);
        }
    }

    #[test]
    fn render_feeds_delimited_text_to_the_formatter() {
        let renderer = TableRenderer::new(Box::new(UppercaseFormatter));
        let history = history_with(&[(100, 10)]);

        let output = renderer.render(&catalog(1), &history).unwrap();
        assert_eq!(output, "ID 0 MEM,ID 0 USAGE\n100MIB,10%\n");
    }

    #[test]
    fn render_surfaces_formatter_failure() {
        let renderer = TableRenderer::new(Box::new(FailingFormatter));
        let history = history_with(&[(100, 10)]);

        let err = renderer.render(&catalog(1), &history).unwrap_err();
        assert!(matches!(err, GpuWatchError::Render { .. }));
    }

    #[test]
    fn table_style_parse_round_trips_flags() {
        for style in [
            TableStyle::Pipe,
            TableStyle::Grid,
            TableStyle::Simple,
            TableStyle::Plain,
            TableStyle::Github,
        ] {
            assert_eq!(TableStyle::parse(style.flag()), Some(style));
        }
        assert_eq!(TableStyle::parse("fancy"), None);
    }
}
