use std::thread;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Components, Disks, Networks, System};

use super::gpu::GpuMonitor;
use super::platform;
use super::source::{GpuReading, MetricsSource, NetCounters, PartitionUsage, TempReading};

/// How long a CPU read blocks between its two counter samples.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// [`MetricsSource`] backed by `sysinfo`, NVML and the platform layer.
pub struct Collector {
    sys: System,
    networks: Networks,
    disks: Disks,
    components: Components,
    gpu: GpuMonitor,
}

impl Collector {
    pub fn new(gpu: GpuMonitor) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        Collector {
            sys,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            gpu,
        }
    }
}

impl MetricsSource for Collector {
    fn cpu_percent(&mut self) -> Result<f32> {
        self.sys.refresh_cpu_usage();
        thread::sleep(CPU_SAMPLE_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_usage();
        Ok(self.sys.global_cpu_usage())
    }

    fn memory_percent(&mut self) -> Result<f32> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(eyre!("total memory reported as zero"));
        }
        Ok((self.sys.used_memory() as f64 / total as f64 * 100.0) as f32)
    }

    fn temperatures(&mut self) -> Result<Vec<TempReading>> {
        self.components.refresh(true);
        Ok(self
            .components
            .list()
            .iter()
            .filter_map(|component| {
                let celsius = component.temperature()?;
                let label = match component.label() {
                    "" => "sensor".to_string(),
                    label => label.to_string(),
                };
                Some(TempReading { label, celsius })
            })
            .collect())
    }

    fn gpus(&mut self) -> Result<Option<Vec<GpuReading>>> {
        self.gpu.read()
    }

    fn net_counters(&mut self) -> Result<NetCounters> {
        self.networks.refresh(true);
        Ok(self
            .networks
            .list()
            .values()
            .fold(NetCounters::default(), |acc, data| NetCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
            }))
    }

    fn partitions(&mut self) -> Result<Vec<PartitionUsage>> {
        self.disks.refresh(true);
        Ok(self
            .disks
            .list()
            .iter()
            .map(|disk| PartitionUsage {
                device: disk.name().to_string_lossy().to_string(),
                mount_point: disk.mount_point().display().to_string(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect())
    }

    fn battery_percent(&mut self) -> Result<Option<f32>> {
        Ok(platform::battery_percent())
    }
}
