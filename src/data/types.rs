/// One monitored accelerator unit. The ordinal fixes the device's column
/// position in every table and CSV row downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub index: u32,
    pub name: String,
}

/// Readings for one device within one capture cycle. Values are kept as
/// display-ready strings ("512MiB", "37%") since the only consumers are
/// textual renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceReading {
    pub memory_used: String,
    pub utilization: String,
}

/// One timestamped collection cycle across all devices.
/// `readings.len()` always equals the catalog's device count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: String,
    pub readings: Vec<DeviceReading>,
}

impl DeviceReading {
    pub fn new(memory_used_mib: u64, utilization_pct: u64) -> Self {
        Self {
            memory_used: format!("{memory_used_mib}MiB"),
            utilization: format!("{utilization_pct}%"),
        }
    }
}
