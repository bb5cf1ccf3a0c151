//! Telemetry shared between the sampler thread, the prober thread and the
//! display loop.
//!
//! Each field sits behind its own lock, held only long enough to swap an
//! `Arc` or push a line. Readers copy out and never hold a guard while
//! drawing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::sampler::Tick;
use crate::system::history::{BoundedHistory, Histories, PROBE_LOG_CAPACITY};
use crate::visual::PanelText;

/// Probe log lines shown in the console panel.
pub const CONSOLE_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Cpu,
    Ram,
    Disk,
    Gpu,
    Network,
    Battery,
    Temps,
}

impl PanelKind {
    /// Grid order.
    pub const ALL: [PanelKind; 7] = [
        PanelKind::Cpu,
        PanelKind::Ram,
        PanelKind::Disk,
        PanelKind::Gpu,
        PanelKind::Network,
        PanelKind::Battery,
        PanelKind::Temps,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Cpu => "CPU Usage",
            PanelKind::Ram => "RAM Usage",
            PanelKind::Disk => "Disk Partitions",
            PanelKind::Gpu => "GPU Usage",
            PanelKind::Network => "Network",
            PanelKind::Battery => "Battery",
            PanelKind::Temps => "Temperatures",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One flag per panel. The only way to change them is all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFlags {
    pub cpu: bool,
    pub ram: bool,
    pub disk: bool,
    pub gpu: bool,
    pub network: bool,
    pub battery: bool,
    pub temps: bool,
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self {
            cpu: true,
            ram: true,
            disk: true,
            gpu: true,
            network: true,
            battery: true,
            temps: true,
        }
    }
}

impl VisibilityFlags {
    pub fn toggle_all(&mut self) {
        self.cpu = !self.cpu;
        self.ram = !self.ram;
        self.disk = !self.disk;
        self.gpu = !self.gpu;
        self.network = !self.network;
        self.battery = !self.battery;
        self.temps = !self.temps;
    }

    pub fn is_visible(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Cpu => self.cpu,
            PanelKind::Ram => self.ram,
            PanelKind::Disk => self.disk,
            PanelKind::Gpu => self.gpu,
            PanelKind::Network => self.network,
            PanelKind::Battery => self.battery,
            PanelKind::Temps => self.temps,
        }
    }

    pub fn visible(&self) -> Vec<PanelKind> {
        PanelKind::ALL
            .into_iter()
            .filter(|kind| self.is_visible(*kind))
            .collect()
    }
}

/// Copy of every panel's latest text, taken under one short read lock.
#[derive(Debug, Clone)]
pub struct PanelSnapshot {
    panels: [Arc<PanelText>; 7],
}

impl PanelSnapshot {
    pub fn get(&self, kind: PanelKind) -> &PanelText {
        &self.panels[kind.index()]
    }
}

pub struct SharedTelemetry {
    panels: RwLock<[Arc<PanelText>; 7]>,
    histories: RwLock<Arc<Histories>>,
    probe_log: Mutex<BoundedHistory<String>>,
    visibility: Mutex<VisibilityFlags>,
    ticks: AtomicU64,
    running: AtomicBool,
    fault: Mutex<Option<String>>,
}

impl Default for SharedTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedTelemetry {
    pub fn new() -> Self {
        let waiting = Arc::new(PanelText::placeholder("Collecting..."));
        Self {
            panels: RwLock::new(std::array::from_fn(|_| Arc::clone(&waiting))),
            histories: RwLock::new(Arc::new(Histories::default())),
            probe_log: Mutex::new(BoundedHistory::new(PROBE_LOG_CAPACITY)),
            visibility: Mutex::new(VisibilityFlags::default()),
            ticks: AtomicU64::new(0),
            running: AtomicBool::new(true),
            fault: Mutex::new(None),
        }
    }

    /// Replace one panel's text as a whole.
    pub fn set_panel(&self, kind: PanelKind, text: PanelText) {
        let text = Arc::new(text);
        write(&self.panels)[kind.index()] = text;
    }

    pub fn panel(&self, kind: PanelKind) -> Arc<PanelText> {
        Arc::clone(&read(&self.panels)[kind.index()])
    }

    pub fn panels(&self) -> PanelSnapshot {
        PanelSnapshot {
            panels: read(&self.panels).clone(),
        }
    }

    /// Publish everything a sampler tick derived. Panels are swapped one at a
    /// time; readers may see a mix of this tick and the last, never a torn panel.
    pub fn publish(&self, tick: &Tick) {
        for (kind, text) in &tick.panels {
            let text = Arc::new(text.clone());
            write(&self.panels)[kind.index()] = text;
        }
        *write(&self.histories) = Arc::clone(&tick.histories);
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn histories(&self) -> Arc<Histories> {
        Arc::clone(&read(&self.histories))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn push_probe_line(&self, line: String) {
        lock(&self.probe_log).push(line);
    }

    /// The newest `n` probe lines, oldest first.
    pub fn probe_tail(&self, n: usize) -> Vec<String> {
        lock(&self.probe_log).tail(n)
    }

    pub fn visibility(&self) -> VisibilityFlags {
        *lock(&self.visibility)
    }

    /// Flip every panel flag and return the new state.
    pub fn toggle_visibility(&self) -> VisibilityFlags {
        let mut flags = lock(&self.visibility);
        flags.toggle_all();
        *flags
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Record an unrecoverable background failure for the display to surface.
    pub fn report_fault(&self, message: String) {
        let mut fault = lock(&self.fault);
        if fault.is_none() {
            *fault = Some(message);
        }
    }

    pub fn fault(&self) -> Option<String> {
        lock(&self.fault).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
