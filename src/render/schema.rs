//! Column schema derivation.
//!
//! Headers are a pure function of the device count and must be computed from
//! the same catalog snapshot that produced every retained sample, so column
//! count always equals twice the device count and aligns positionally with
//! each sample's readings.

/// Display headers: two columns per device, no timestamp (the newest capture
/// time is shown in the viewport header instead).
pub fn display_headers(device_count: usize) -> Vec<String> {
    let mut headers = Vec::with_capacity(device_count * 2);
    for index in 0..device_count {
        headers.push(format!("id {index} mem"));
        headers.push(format!("id {index} usage"));
    }
    headers
}

/// CSV headers: leading Timestamp column, then two columns per device.
pub fn csv_headers(device_count: usize) -> Vec<String> {
    let mut headers = Vec::with_capacity(device_count * 2 + 1);
    headers.push("Timestamp".to_string());
    for index in 0..device_count {
        headers.push(format!("id {index} mem used"));
        headers.push(format!("id {index} usage"));
    }
    headers
}
