//! NVIDIA GPU readings via NVML.
//!
//! The NVML library is loaded once at startup. A host without the driver
//! (or a build without the `nvidia` feature) simply has no GPU capability.

use color_eyre::Result;
#[cfg(feature = "nvidia")]
use color_eyre::eyre::WrapErr;

use super::source::GpuReading;

pub struct GpuMonitor {
    #[cfg(feature = "nvidia")]
    nvml: Option<nvml_wrapper::Nvml>,
}

impl GpuMonitor {
    #[cfg(feature = "nvidia")]
    pub fn detect() -> Self {
        let nvml = match nvml_wrapper::Nvml::init() {
            Ok(nvml) => Some(nvml),
            Err(err) => {
                tracing::info!(error = %err, "NVML unavailable, GPU panel disabled");
                None
            }
        };
        Self { nvml }
    }

    #[cfg(not(feature = "nvidia"))]
    pub fn detect() -> Self {
        tracing::info!("built without NVML support, GPU panel disabled");
        Self {}
    }

    pub fn unavailable() -> Self {
        Self {
            #[cfg(feature = "nvidia")]
            nvml: None,
        }
    }

    pub fn is_available(&self) -> bool {
        #[cfg(feature = "nvidia")]
        {
            self.nvml.is_some()
        }
        #[cfg(not(feature = "nvidia"))]
        {
            false
        }
    }

    /// `Ok(None)` when no GPU capability was detected at startup.
    #[cfg(feature = "nvidia")]
    pub fn read(&self) -> Result<Option<Vec<GpuReading>>> {
        let Some(nvml) = &self.nvml else {
            return Ok(None);
        };

        let count = nvml.device_count().wrap_err("NVML device count")?;
        let mut readings = Vec::with_capacity(count as usize);
        for index in 0..count {
            let device = nvml
                .device_by_index(index)
                .wrap_err_with(|| format!("NVML device {index}"))?;
            let name = device.name().unwrap_or_else(|_| format!("GPU {index}"));
            let utilization = device
                .utilization_rates()
                .wrap_err_with(|| format!("utilization of {name}"))?;
            let memory = device
                .memory_info()
                .wrap_err_with(|| format!("memory info of {name}"))?;
            readings.push(GpuReading {
                name,
                utilization_percent: utilization.gpu,
                memory_used_bytes: memory.used,
            });
        }
        Ok(Some(readings))
    }

    #[cfg(not(feature = "nvidia"))]
    pub fn read(&self) -> Result<Option<Vec<GpuReading>>> {
        Ok(None)
    }
}
