use std::fmt::Display;
use std::time::Instant;

use chrono::{DateTime, Local};

use super::source::{GpuReading, MetricsSource, NetCounters, PartitionUsage, TempReading};

/// Optional hardware: either readable, not present on this host, or present
/// but failing this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability<T> {
    Present(T),
    Absent,
    Failed,
}

impl<T> Capability<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Capability::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// Every raw reading of one tick. A `None` field means the read failed and
/// has already been logged.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub timestamp: DateTime<Local>,
    pub taken_at: Instant,
    pub cpu_percent: Option<f32>,
    pub memory_percent: Option<f32>,
    pub temperatures: Option<Vec<TempReading>>,
    pub gpus: Capability<Vec<GpuReading>>,
    pub network: Option<NetCounters>,
    pub partitions: Option<Vec<PartitionUsage>>,
    pub battery: Capability<f32>,
}

impl SystemSnapshot {
    /// Read every metric from `source`. The CPU read blocks for its sampling
    /// window; the rest are taken right after so they describe the same moment.
    pub fn read<S: MetricsSource + ?Sized>(source: &mut S) -> Self {
        let timestamp = Local::now();
        let cpu_percent = degrade("cpu", source.cpu_percent());
        let memory_percent = degrade("memory", source.memory_percent());
        let temperatures = degrade("temperatures", source.temperatures());
        let gpus = match source.gpus() {
            Ok(Some(devices)) if !devices.is_empty() => Capability::Present(devices),
            Ok(_) => Capability::Absent,
            Err(err) => {
                warn_read("gpu", &err);
                Capability::Failed
            }
        };
        let network = degrade("network", source.net_counters());
        let taken_at = Instant::now();
        let partitions = degrade("disk", source.partitions());
        let battery = match source.battery_percent() {
            Ok(Some(percent)) => Capability::Present(percent),
            Ok(None) => Capability::Absent,
            Err(err) => {
                warn_read("battery", &err);
                Capability::Failed
            }
        };

        SystemSnapshot {
            timestamp,
            taken_at,
            cpu_percent,
            memory_percent,
            temperatures,
            gpus,
            network,
            partitions,
            battery,
        }
    }
}

fn degrade<T>(metric: &'static str, result: color_eyre::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn_read(metric, &err);
            None
        }
    }
}

fn warn_read(metric: &'static str, err: &impl Display) {
    tracing::warn!(metric, error = %err, "metric read failed, showing placeholder");
}
