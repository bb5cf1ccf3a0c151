use color_eyre::Result;

/// One temperature sensor reading in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct TempReading {
    pub label: String,
    pub celsius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpuReading {
    pub name: String,
    pub utilization_percent: u32,
    pub memory_used_bytes: u64,
}

impl GpuReading {
    pub fn memory_used_mb(&self) -> u64 {
        self.memory_used_bytes / 1024 / 1024
    }
}

/// Cumulative byte counters summed over all interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionUsage {
    pub device: String,
    pub mount_point: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl PartitionUsage {
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.available_bytes);
        used as f64 / self.total_bytes as f64 * 100.0
    }

    pub fn free_mb(&self) -> u64 {
        self.available_bytes / 1024 / 1024
    }
}

/// The host metrics provider the sampler reads once per tick.
///
/// Every method fails independently; the sampler degrades only the metric
/// whose read failed. Optional hardware reports absence with `Ok(None)`
/// rather than an error.
pub trait MetricsSource: Send {
    /// Global CPU utilization. Blocks for the sampling window, which is what
    /// paces the sampler loop.
    fn cpu_percent(&mut self) -> Result<f32>;

    fn memory_percent(&mut self) -> Result<f32>;

    fn temperatures(&mut self) -> Result<Vec<TempReading>>;

    /// `Ok(None)` when no GPU capability exists on this host.
    fn gpus(&mut self) -> Result<Option<Vec<GpuReading>>>;

    fn net_counters(&mut self) -> Result<NetCounters>;

    fn partitions(&mut self) -> Result<Vec<PartitionUsage>>;

    /// `Ok(None)` when the host has no battery.
    fn battery_percent(&mut self) -> Result<Option<f32>>;
}
