//! The per-tick sampling pipeline.
//!
//! [`Sampler::tick`] reads one [`SystemSnapshot`], folds it into the metric
//! histories and derives every panel plus the CSV row from that one snapshot.
//! [`spawn`] drives it on a dedicated thread, since the reads block.

pub mod panels;
pub mod rate;

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use crate::record::{DISK_PLACEHOLDER, LogRecord, RecordLog, TIMESTAMP_FORMAT};
use crate::state::{PanelKind, SharedTelemetry};
use crate::system::history::{HISTORY_CAPACITY, Histories};
use crate::system::snapshot::{Capability, SystemSnapshot};
use crate::system::source::{GpuReading, MetricsSource, NetCounters};
use crate::visual::PanelText;

pub use rate::RateSample;

/// Nominal sampling period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Everything one tick produced.
#[derive(Debug, Clone)]
pub struct Tick {
    pub panels: Vec<(PanelKind, PanelText)>,
    pub histories: Arc<Histories>,
    pub record: LogRecord,
}

impl Tick {
    pub fn panel(&self, kind: PanelKind) -> Option<&PanelText> {
        self.panels
            .iter()
            .find_map(|(k, text)| (*k == kind).then_some(text))
    }
}

pub struct Sampler<S: MetricsSource> {
    source: S,
    histories: Histories,
    prev_net: Option<(NetCounters, Instant)>,
}

impl<S: MetricsSource> Sampler<S> {
    /// Reads the network counters once so the first tick has a baseline.
    pub fn new(mut source: S) -> Self {
        let prev_net = match source.net_counters() {
            Ok(counters) => Some((counters, Instant::now())),
            Err(err) => {
                tracing::warn!(error = %err, "no network baseline, first rate will be skipped");
                None
            }
        };
        Self {
            source,
            histories: Histories::new(HISTORY_CAPACITY),
            prev_net,
        }
    }

    pub fn histories(&self) -> &Histories {
        &self.histories
    }

    pub fn tick(&mut self) -> Tick {
        let snapshot = SystemSnapshot::read(&mut self.source);
        self.derive(snapshot)
    }

    /// Fold one snapshot into the histories and build its panels and row.
    pub fn derive(&mut self, snapshot: SystemSnapshot) -> Tick {
        let rate = self.next_rate(&snapshot);
        let gpu_percent = snapshot.gpus.present().map(|d| mean_utilization(d));
        let gpu_mem_mb = snapshot
            .gpus
            .present()
            .map(|d| d.iter().map(GpuReading::memory_used_mb).sum::<u64>());

        if let Some(cpu) = snapshot.cpu_percent {
            self.histories.cpu.push(f64::from(cpu));
        }
        if let Some(ram) = snapshot.memory_percent {
            self.histories.ram.push(f64::from(ram));
        }
        if let Some(gpu) = gpu_percent {
            self.histories.gpu.push(gpu);
        }
        if let Some(rate) = rate {
            self.histories.upload.push(rate.upload_kbps);
            self.histories.download.push(rate.download_kbps);
        }

        let temps = snapshot.temperatures.as_deref();
        let h = &self.histories;
        let panels = vec![
            (
                PanelKind::Cpu,
                panels::percent_panel(snapshot.cpu_percent, &h.cpu),
            ),
            (
                PanelKind::Ram,
                panels::percent_panel(snapshot.memory_percent, &h.ram),
            ),
            (
                PanelKind::Disk,
                panels::disk_panel(snapshot.partitions.as_deref()),
            ),
            (
                PanelKind::Gpu,
                panels::gpu_panel(&snapshot.gpus, gpu_percent, &h.gpu),
            ),
            (
                PanelKind::Network,
                panels::network_panel(rate, &h.upload, &h.download),
            ),
            (PanelKind::Battery, panels::battery_panel(&snapshot.battery)),
            (PanelKind::Temps, panels::temps_panel(temps)),
        ];

        let record = LogRecord {
            timestamp: snapshot.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            cpu_percent: snapshot.cpu_percent,
            ram_percent: snapshot.memory_percent,
            gpu_percent,
            gpu_mem_mb,
            upload_kbps: rate.map(|r| r.upload_kbps),
            download_kbps: rate.map(|r| r.download_kbps),
            disk_percent: DISK_PLACEHOLDER,
            disk_read_kbps: 0,
            disk_write_kbps: 0,
            battery_percent: match snapshot.battery {
                Capability::Present(percent) => Some(percent),
                _ => None,
            },
            temps: panels::temps_plain(temps),
        };

        Tick {
            panels,
            histories: Arc::new(self.histories.clone()),
            record,
        }
    }

    fn next_rate(&mut self, snapshot: &SystemSnapshot) -> Option<RateSample> {
        let now = snapshot.network?;
        let rate = self
            .prev_net
            .map(|(prev, at)| RateSample::between(prev, now, snapshot.taken_at.duration_since(at)));
        self.prev_net = Some((now, snapshot.taken_at));
        rate
    }
}

fn mean_utilization(devices: &[GpuReading]) -> f64 {
    let total: f64 = devices
        .iter()
        .map(|d| f64::from(d.utilization_percent))
        .sum();
    total / devices.len().max(1) as f64
}

/// Run ticks until `state` stops or the log fails.
///
/// A failed append is fatal: it is logged, stored as the shared fault and
/// returned. Each tick sleeps off whatever is left of [`TICK_PERIOD`].
pub fn run<S: MetricsSource>(
    mut sampler: Sampler<S>,
    mut log: RecordLog,
    state: &SharedTelemetry,
) -> Result<()> {
    tracing::info!(log = %log.path().display(), "sampler started");
    while state.is_running() {
        let started = Instant::now();
        let tick = sampler.tick();
        state.publish(&tick);

        if let Err(err) = log.append(&tick.record) {
            tracing::error!(error = ?err, "sample log write failed, stopping sampler");
            state.report_fault(format!("Log write failed: {err}"));
            return Err(err);
        }

        let remaining = TICK_PERIOD.saturating_sub(started.elapsed());
        if !remaining.is_zero() && state.is_running() {
            thread::sleep(remaining);
        }
    }
    tracing::info!("sampler stopped");
    Ok(())
}

/// Start [`run`] on a thread named `sampler`.
pub fn spawn<S: MetricsSource + 'static>(
    sampler: Sampler<S>,
    log: RecordLog,
    state: Arc<SharedTelemetry>,
) -> Result<JoinHandle<Result<()>>> {
    thread::Builder::new()
        .name("sampler".into())
        .spawn(move || run(sampler, log, &state))
        .wrap_err("spawning sampler thread")
}
