//! Reachability prober for server mode.
//!
//! One probe per period against a single target. Every outcome becomes one
//! line in the shared probe log, successes and failures alike.

use std::future::Future;
use std::process::Stdio;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use tokio::process::Command;

use crate::state::SharedTelemetry;
use crate::system::platform;

pub const DEFAULT_TARGET: &str = "8.8.8.8";
pub const PROBE_PERIOD: Duration = Duration::from_secs(1);
/// Reply wait handed to `ping` itself.
pub const PROBE_WAIT: Duration = Duration::from_secs(1);
/// Hard ceiling on one probe, in case `ping` ignores its own wait.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The reply summary line reported by the probe command.
    Reply(String),
    /// The target did not answer.
    Unreachable,
}

pub trait Probe: Send + Sync {
    /// Run one probe. `Err` means the probe itself could not be carried out.
    fn probe(&self, target: &str) -> impl Future<Output = Result<ProbeOutcome>> + Send;
}

/// Probes with the system `ping`, one echo request per call.
#[derive(Debug, Clone, Default)]
pub struct PingProbe;

impl Probe for PingProbe {
    fn probe(&self, target: &str) -> impl Future<Output = Result<ProbeOutcome>> + Send {
        let (program, args) = platform::ping_command(target, PROBE_WAIT);
        async move {
            let child = Command::new(program)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .output();
            let output = tokio::time::timeout(PROBE_TIMEOUT, child)
                .await
                .map_err(|_| eyre!("timed out after {}s", PROBE_TIMEOUT.as_secs()))?
                .wrap_err_with(|| format!("running {program}"))?;

            if !output.status.success() {
                return Ok(ProbeOutcome::Unreachable);
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            reply_line(&stdout).map(ProbeOutcome::Reply)
        }
    }
}

/// The second line of `ping` output carries the reply summary.
fn reply_line(stdout: &str) -> Result<String> {
    stdout
        .lines()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| eyre!("no reply line in ping output"))
}

/// Log line for one probe result. Failures are stamped with `now`.
pub fn format_probe_line(result: &Result<ProbeOutcome>, now: DateTime<Local>) -> String {
    let stamp = now.format("%H:%M:%S");
    match result {
        Ok(ProbeOutcome::Reply(line)) => line.clone(),
        Ok(ProbeOutcome::Unreachable) => format!("{stamp} Ping failed"),
        Err(err) => format!("{stamp} Ping error: {err}"),
    }
}

pub struct Prober<P: Probe> {
    probe: P,
    target: String,
    period: Duration,
}

impl<P: Probe> Prober<P> {
    pub fn new(probe: P, target: impl Into<String>, period: Duration) -> Self {
        Self {
            probe,
            target: target.into(),
            period,
        }
    }

    /// Probe once and append the resulting line to the probe log.
    pub async fn probe_once(&self, state: &SharedTelemetry) {
        let result = self.probe.probe(&self.target).await;
        let line = format_probe_line(&result, Local::now());
        tracing::debug!(target_host = %self.target, line = %line, "probe finished");
        state.push_probe_line(line);
    }

    /// Probe every period until `state` stops.
    pub async fn run(self, state: Arc<SharedTelemetry>) {
        tracing::info!(target_host = %self.target, "prober started");
        while state.is_running() {
            self.probe_once(&state).await;
            tokio::time::sleep(self.period).await;
        }
        tracing::info!("prober stopped");
    }
}

/// Run `prober` on its own named thread with a private current-thread
/// runtime, so it advances even while the display thread is busy.
pub fn spawn<P: Probe + 'static>(
    prober: Prober<P>,
    state: Arc<SharedTelemetry>,
) -> Result<JoinHandle<Result<()>>> {
    thread::Builder::new()
        .name("prober".into())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .wrap_err("building prober runtime")?;
            runtime.block_on(prober.run(state));
            Ok(())
        })
        .wrap_err("spawning prober thread")
}
