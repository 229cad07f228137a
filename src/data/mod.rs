mod catalog;
mod collector;
mod history;
mod source;
mod types;

pub use catalog::DeviceCatalog;
pub use collector::collect;
pub use history::HistoryStore;
pub use source::{MetricsSource, NvidiaSmiSource};
pub use types::{Device, DeviceReading, Sample};
