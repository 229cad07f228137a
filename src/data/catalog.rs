use super::source::MetricsSource;
use super::types::Device;
use crate::error::{GpuWatchError, Result};

/// The set of monitored devices, discovered once per session and immutable
/// afterwards. Device ordinals are assigned in discovery order.
#[derive(Clone, Debug)]
pub struct DeviceCatalog {
    devices: Vec<Device>,
}

impl DeviceCatalog {
    /// Discover the device set through the metrics query collaborator.
    /// Fails if the query cannot run or reports no devices.
    pub fn discover(source: &dyn MetricsSource) -> Result<Self> {
        let output = source.query_names()?;
        let catalog = Self::from_names_output(&output)?;
        log::info!(
            "discovered {} device(s) via {}",
            catalog.len(),
            source.name()
        );
        Ok(catalog)
    }

    pub(crate) fn from_names_output(output: &str) -> Result<Self> {
        let devices: Vec<Device> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, name)| Device {
                index: index as u32,
                name: name.to_string(),
            })
            .collect();

        if devices.is_empty() {
            return Err(GpuWatchError::collection(
                "device discovery returned no devices",
            ));
        }
        Ok(Self { devices })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
