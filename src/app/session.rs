use std::path::{Path, PathBuf};

use crate::data::{self, DeviceCatalog, HistoryStore, MetricsSource};
use crate::error::{GpuWatchError, Result};
use crate::render::{TableRenderer, delimited_table};
use crate::sink::CsvSink;

/// Session lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
}

/// Inputs to the session transition function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The interval driver fired
    Tick,
    /// The display surface was lost; treat as an implicit stop request
    SurfaceClosed,
}

/// What a single transition did, for operator feedback
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Event ignored: the session is stopped
    Idle,
    /// Sample collected, stored, rendered, and persisted
    Sampled,
    /// Sample stored, but rendering or persistence degraded
    Degraded(String),
    /// Collection failed; nothing entered History or the CSV
    Skipped(String),
    /// Surface loss performed the stop cleanup
    Stopped,
}

/// One monitoring session: catalog, bounded history, renderer, and CSV sink
/// behind a Stopped/Running state machine. Sessions are plain values owned by
/// the caller; independent sessions coexist by construction.
pub struct MonitorSession {
    source: Box<dyn MetricsSource>,
    renderer: TableRenderer,
    sink: CsvSink,
    state: SessionState,
    catalog: Option<DeviceCatalog>,
    history: HistoryStore,
    rendered: Option<String>,
}

impl MonitorSession {
    pub fn new(
        source: Box<dyn MetricsSource>,
        renderer: TableRenderer,
        sink: CsvSink,
        max_rows: usize,
    ) -> Self {
        Self {
            source,
            renderer,
            sink,
            state: SessionState::Stopped,
            catalog: None,
            history: HistoryStore::new(max_rows),
            rendered: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Begin a session: discover devices, write the CSV header, clear the
    /// history. Valid only from Stopped; all-or-nothing — on any failure the
    /// session stays Stopped with no partial side effects.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(GpuWatchError::AlreadyRunning);
        }

        let catalog = DeviceCatalog::discover(&*self.source)?;
        self.sink.initialize(&catalog)?;

        self.history.clear();
        self.rendered = None;
        self.catalog = Some(catalog);
        self.state = SessionState::Running;
        log::info!("monitoring started, logging to {}", self.sink.path().display());
        Ok(())
    }

    /// The single transition function: consumes a Tick or SurfaceClosed
    /// event. Collection failures skip the tick and keep the session running;
    /// render or persistence failures degrade but never stop it.
    pub fn advance(&mut self, event: SessionEvent) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        match event {
            SessionEvent::SurfaceClosed => {
                self.finish();
                TickOutcome::Stopped
            }
            SessionEvent::Tick => self.run_tick(),
        }
    }

    fn run_tick(&mut self) -> TickOutcome {
        let Some(catalog) = self.catalog.as_ref() else {
            return TickOutcome::Idle;
        };

        let sample = match data::collect(&*self.source, catalog) {
            Ok(sample) => sample,
            Err(err) => {
                log::warn!("tick skipped: {err}");
                return TickOutcome::Skipped(err.to_string());
            }
        };

        let mut degraded = Vec::new();
        self.history.insert(sample.clone());

        match self.renderer.render(catalog, &self.history) {
            Ok(table) => self.rendered = Some(table),
            Err(err) => {
                // Degraded display: fall back to the plain delimited table
                // rather than going blank.
                log::warn!("render degraded: {err}");
                self.rendered = Some(delimited_table(catalog, &self.history));
                degraded.push(err.to_string());
            }
        }

        if let Err(err) = self.sink.append(&sample) {
            log::warn!("csv append failed: {err}");
            degraded.push(err.to_string());
        }

        if degraded.is_empty() {
            TickOutcome::Sampled
        } else {
            TickOutcome::Degraded(degraded.join("; "))
        }
    }

    /// End the session. No-op from Stopped; otherwise returns the CSV log
    /// location for the operator report.
    pub fn stop(&mut self) -> Option<PathBuf> {
        if !self.is_running() {
            return None;
        }
        let path = self.sink.path().to_path_buf();
        self.finish();
        Some(path)
    }

    fn finish(&mut self) {
        self.state = SessionState::Stopped;
        self.catalog = None;
        self.history.clear();
        self.rendered = None;
        log::info!("monitoring stopped, samples logged to {}", self.sink.path().display());
    }

    pub fn catalog(&self) -> Option<&DeviceCatalog> {
        self.catalog.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The most recent table rendering, if any
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Timestamp of the newest retained sample
    pub fn last_capture(&self) -> Option<&str> {
        self.history.newest().map(|sample| sample.timestamp.as_str())
    }

    pub fn csv_path(&self) -> &Path {
        self.sink.path()
    }
}
