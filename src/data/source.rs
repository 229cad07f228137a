use std::time::Duration;

use crate::error::{GpuWatchError, Result};
use crate::utils::run_command_with_timeout;

const NVIDIA_QUERY_NAMES: &str = "name";
const NVIDIA_QUERY_READINGS: &str = "memory.used,utilization.gpu";

/// Line-oriented metrics query collaborator.
///
/// Discovery output is one device name per line; reading output is one line
/// per device with two comma-separated numeric fields (memory MiB,
/// utilization %), no units, no header. Any command or local API producing
/// that shape is substitutable.
pub trait MetricsSource {
    /// Human-readable name of this source
    fn name(&self) -> &'static str;

    /// Raw discovery output, one device name per line
    fn query_names(&self) -> Result<String>;

    /// Raw per-tick output, one reading line per device
    fn query_readings(&self) -> Result<String>;
}

/// NVIDIA source using nvidia-smi
pub struct NvidiaSmiSource {
    timeout: Duration,
}

impl NvidiaSmiSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn query(&self, fields: &str, nounits: bool) -> Result<String> {
        let format_arg = if nounits {
            "--format=csv,noheader,nounits"
        } else {
            "--format=csv,noheader"
        };
        run_command_with_timeout(
            "nvidia-smi",
            &[&format!("--query-gpu={fields}"), format_arg],
            self.timeout,
        )
        .ok_or_else(|| {
            GpuWatchError::collection(format!(
                "nvidia-smi unavailable, failed, or exceeded {}ms",
                self.timeout.as_millis()
            ))
        })
    }
}

impl Default for NvidiaSmiSource {
    fn default() -> Self {
        // Generous budget: a hung query stalls only the current tick, and the
        // polling interval is human-scale.
        Self::new(Duration::from_secs(5))
    }
}

impl MetricsSource for NvidiaSmiSource {
    fn name(&self) -> &'static str {
        "nvidia-smi"
    }

    fn query_names(&self) -> Result<String> {
        self.query(NVIDIA_QUERY_NAMES, false)
    }

    fn query_readings(&self) -> Result<String> {
        self.query(NVIDIA_QUERY_READINGS, true)
    }
}
