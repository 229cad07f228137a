use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::data::{DeviceCatalog, Sample};
use crate::error::{GpuWatchError, Result};
use crate::render::schema;

/// Append-only CSV log of every successful sample, independent of the
/// in-memory retention window. The handle is opened and closed per write;
/// nothing is held across ticks.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header line, truncating any prior content. Called once per
    /// session, before the first tick.
    pub fn initialize(&self, catalog: &DeviceCatalog) -> Result<()> {
        let mut file = File::create(&self.path).map_err(|err| self.persistence(err))?;
        let header = schema::csv_headers(catalog.len()).join(",");
        writeln!(file, "{header}").map_err(|err| self.persistence(err))
    }

    /// Append one data line for the sample. Never rewrites prior lines.
    pub fn append(&self, sample: &Sample) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| self.persistence(err))?;
        writeln!(file, "{}", csv_line(sample)).map_err(|err| self.persistence(err))
    }

    fn persistence(&self, err: std::io::Error) -> GpuWatchError {
        GpuWatchError::persistence(&self.path, err.to_string())
    }
}

fn csv_line(sample: &Sample) -> String {
    let mut fields = Vec::with_capacity(sample.readings.len() * 2 + 1);
    fields.push(sample.timestamp.as_str());
    for reading in &sample.readings {
        fields.push(reading.memory_used.as_str());
        fields.push(reading.utilization.as_str());
    }
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::data::DeviceReading;

    fn catalog(count: usize) -> DeviceCatalog {
        let names: Vec<String> = (0..count).map(|i| format!("GPU {i}")).collect();
        DeviceCatalog::from_names_output(&names.join("\n")).unwrap()
    }

    fn sample(tag: u64, devices: usize) -> Sample {
        Sample {
            timestamp: format!("2026-08-05 10:00:{tag:02}"),
            readings: (0..devices)
                .map(|_| DeviceReading::new(tag * 100, tag * 10))
                .collect(),
        }
    }

    #[test]
    fn initialize_writes_single_header_line() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("log.csv"));
        sink.initialize(&catalog(2)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(
            content,
            "Timestamp,id 0 mem used,id 0 usage,id 1 mem used,id 1 usage\n"
        );
    }

    #[test]
    fn initialize_truncates_prior_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "stale line\nanother stale line\n").unwrap();

        let sink = CsvSink::new(path);
        sink.initialize(&catalog(1)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "Timestamp,id 0 mem used,id 0 usage\n");
    }

    #[test]
    fn append_adds_one_line_per_sample() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("log.csv"));
        sink.initialize(&catalog(1)).unwrap();
        for tag in 1..=5 {
            sink.append(&sample(tag, 1)).unwrap();
        }

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "2026-08-05 10:00:01,100MiB,10%");
        assert_eq!(lines[5], "2026-08-05 10:00:05,500MiB,50%");
        for line in lines {
            assert_eq!(line.split(',').count(), 3);
        }
    }

    #[test]
    fn append_field_count_tracks_device_count() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("log.csv"));
        sink.initialize(&catalog(3)).unwrap();
        sink.append(&sample(1, 3)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        for line in content.lines() {
            assert_eq!(line.split(',').count(), 2 * 3 + 1);
        }
    }

    #[test]
    fn initialize_fails_on_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("missing-dir").join("log.csv"));
        let err = sink.initialize(&catalog(1)).unwrap_err();
        assert!(matches!(err, GpuWatchError::Persistence { .. }));
    }
}
