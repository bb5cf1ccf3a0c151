//! The append-only CSV sample log, one row per sampler tick.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Serialize;

pub const HEADER: [&str; 12] = [
    "Timestamp",
    "CPU%",
    "RAM%",
    "GPU%",
    "GPU Mem MB",
    "Upload KB/s",
    "Download KB/s",
    "Disk%",
    "Disk Read KB/s",
    "Disk Write KB/s",
    "Battery%",
    "Temps",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Written in the `Disk%` column. Disk I/O is not sampled, so the disk
/// columns are placeholders.
pub const DISK_PLACEHOLDER: &str = "N/A";

/// One immutable row. Degraded metrics serialize as empty fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub cpu_percent: Option<f32>,
    pub ram_percent: Option<f32>,
    pub gpu_percent: Option<f64>,
    pub gpu_mem_mb: Option<u64>,
    pub upload_kbps: Option<f64>,
    pub download_kbps: Option<f64>,
    pub disk_percent: &'static str,
    pub disk_read_kbps: u32,
    pub disk_write_kbps: u32,
    pub battery_percent: Option<f32>,
    pub temps: String,
}

pub struct RecordLog {
    path: PathBuf,
    writer: csv::Writer<Box<dyn Write + Send>>,
}

impl RecordLog {
    /// Open `path` for appending, writing the header if the file is new or
    /// empty. Existing rows are never touched.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("creating {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("opening sample log {}", path.display()))?;
        let is_empty = file
            .metadata()
            .wrap_err_with(|| format!("reading metadata of {}", path.display()))?
            .len()
            == 0;

        let mut log = Self::from_writer(path, file);
        if is_empty {
            log.writer
                .write_record(HEADER)
                .wrap_err("writing sample log header")?;
            log.writer.flush().wrap_err("flushing sample log header")?;
        }
        Ok(log)
    }

    /// Rows go to `writer` as-is, with no header. `path` is only used in
    /// messages.
    pub fn from_writer(path: impl Into<PathBuf>, writer: impl Write + Send + 'static) -> Self {
        let sink: Box<dyn Write + Send> = Box::new(writer);
        Self {
            path: path.into(),
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one row and flush it before returning.
    pub fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .wrap_err_with(|| format!("appending to {}", self.path.display()))?;
        self.writer
            .flush()
            .wrap_err_with(|| format!("flushing {}", self.path.display()))?;
        Ok(())
    }
}
