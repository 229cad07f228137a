use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::config::Config;
use super::session::{MonitorSession, SessionEvent, TickOutcome};
use super::status::StatusMessage;
use crate::data::NvidiaSmiSource;
use crate::render::{TableRenderer, TabulateFormatter};
use crate::sink::CsvSink;

/// Terminal-side application state: one monitoring session plus the interval
/// driver bookkeeping and the operator status line.
pub struct App {
    session: MonitorSession,
    interval: Duration,
    last_sample: Option<Instant>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let formatter = TabulateFormatter::new(config.formatter_path.clone(), config.table_style);
        let session = MonitorSession::new(
            Box::new(NvidiaSmiSource::default()),
            TableRenderer::new(Box::new(formatter)),
            CsvSink::new(config.csv_path.clone()),
            config.max_rows,
        );
        Self::with_session(session, config.interval)
    }

    /// Sessions are caller-owned values; this is also the seam tests use to
    /// inject scripted collaborators.
    pub fn with_session(session: MonitorSession, interval: Duration) -> Self {
        Self {
            session,
            interval,
            last_sample: None,
            status: None,
        }
    }

    /// Called on every event-loop pass: expires the status line and fires a
    /// sampling tick when the interval has elapsed. The first tick after
    /// start() fires immediately.
    pub fn refresh(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.status = None;
        }
        if !self.session.is_running() {
            return;
        }
        let due = self
            .last_sample
            .is_none_or(|last| last.elapsed() >= self.interval);
        if !due {
            return;
        }
        self.last_sample = Some(Instant::now());

        match self.session.advance(SessionEvent::Tick) {
            TickOutcome::Skipped(reason) => {
                self.status = Some(StatusMessage::warn(format!("sample skipped: {reason}")));
            }
            TickOutcome::Degraded(reason) => {
                self.status = Some(StatusMessage::warn(format!("degraded: {reason}")));
            }
            TickOutcome::Idle | TickOutcome::Sampled | TickOutcome::Stopped => {}
        }
    }

    pub fn start_monitoring(&mut self) {
        match self.session.start() {
            Ok(()) => {
                self.last_sample = None;
                self.status = Some(StatusMessage::info(format!(
                    "monitoring started, logging to {}",
                    self.session.csv_path().display()
                )));
            }
            Err(err) => self.status = Some(StatusMessage::warn(err.to_string())),
        }
    }

    /// The display surface is gone; deliver the implicit stop request.
    pub fn surface_closed(&mut self) {
        self.session.advance(SessionEvent::SurfaceClosed);
        self.last_sample = None;
    }

    /// Stop the session (if running) and return the CSV location for the
    /// operator exit report.
    pub fn shutdown(&mut self) -> Option<PathBuf> {
        self.last_sample = None;
        self.session.stop()
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::data::MetricsSource;
    use crate::error::Result;
    use crate::render::TableFormatter;

    struct FixedSource;

    impl MetricsSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn query_names(&self) -> Result<String> {
            Ok("Tesla T4\n".to_string())
        }

        fn query_readings(&self) -> Result<String> {
            Ok("128, 42\n".to_string())
        }
    }

    struct PassthroughFormatter;

    impl TableFormatter for PassthroughFormatter {
        fn format(&self, delimited: &str) -> Result<String> {
            Ok(delimited.to_string())
        }
    }

    fn app(dir: &TempDir) -> App {
        let session = MonitorSession::new(
            Box::new(FixedSource),
            TableRenderer::new(Box::new(PassthroughFormatter)),
            CsvSink::new(dir.path().join("log.csv")),
            5,
        );
        App::with_session(session, Duration::ZERO)
    }

    #[test]
    fn refresh_is_inert_before_start() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.refresh();
        assert!(app.session().history().is_empty());
    }

    #[test]
    fn first_tick_fires_immediately_after_start() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_monitoring();
        assert!(app.session().is_running());

        app.refresh();
        assert_eq!(app.session().history().len(), 1);
        assert_eq!(app.session().last_capture().map(str::len), Some(19));
    }

    #[test]
    fn duplicate_start_surfaces_a_warning_status() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_monitoring();
        app.refresh();

        app.start_monitoring();
        let status = app.status.as_ref().unwrap();
        assert!(status.text.contains("already running"));
        assert_eq!(app.session().history().len(), 1);
    }

    #[test]
    fn shutdown_reports_csv_path_once() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.start_monitoring();
        app.refresh();

        let reported = app.shutdown();
        assert_eq!(reported, Some(dir.path().join("log.csv")));
        assert_eq!(app.shutdown(), None);

        let csv = fs::read_to_string(dir.path().join("log.csv")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }
}
