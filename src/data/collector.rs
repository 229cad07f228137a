use chrono::Local;

use super::catalog::DeviceCatalog;
use super::source::MetricsSource;
use super::types::{DeviceReading, Sample};
use crate::error::{GpuWatchError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Capture one sample across all catalog devices.
///
/// The query output must contain exactly one line per device, each with two
/// comma-separated numeric fields. A line count that disagrees with the
/// catalog fails the whole sample rather than misaligning columns.
pub fn collect(source: &dyn MetricsSource, catalog: &DeviceCatalog) -> Result<Sample> {
    let output = source.query_readings()?;
    let readings = parse_readings(&output, catalog.len())?;
    Ok(Sample {
        timestamp: capture_timestamp(),
        readings,
    })
}

/// Capture-time timestamp, assigned by the collector itself, never parsed
/// from external output.
fn capture_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn parse_readings(output: &str, device_count: usize) -> Result<Vec<DeviceReading>> {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != device_count {
        return Err(GpuWatchError::collection(format!(
            "expected {device_count} reading line(s), got {}",
            lines.len()
        )));
    }

    lines.iter().map(|line| parse_reading_line(line)).collect()
}

fn parse_reading_line(line: &str) -> Result<DeviceReading> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(GpuWatchError::collection(format!(
            "expected 2 fields per reading line, got {}: {line:?}",
            parts.len()
        )));
    }

    let memory_used_mib = parts[0].parse::<u64>().map_err(|_| {
        GpuWatchError::collection(format!("unparseable memory value: {:?}", parts[0]))
    })?;
    let utilization_pct = parts[1].parse::<u64>().map_err(|_| {
        GpuWatchError::collection(format!("unparseable utilization value: {:?}", parts[1]))
    })?;

    Ok(DeviceReading::new(memory_used_mib, utilization_pct))
}
