//! Starts and stops the background workers around the display loop.

use std::sync::Arc;
use std::thread;

use color_eyre::Result;
use color_eyre::eyre::eyre;

use crate::probe::{self, PROBE_PERIOD, Probe, Prober};
use crate::record::RecordLog;
use crate::sampler::{self, Sampler};
use crate::state::SharedTelemetry;
use crate::system::source::MetricsSource;

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub server_mode: bool,
    pub probe_target: String,
}

pub struct Workers {
    sampler: thread::JoinHandle<Result<()>>,
    prober: Option<thread::JoinHandle<Result<()>>>,
}

impl Workers {
    /// Spawn the sampler thread, and the prober thread when in server mode.
    pub fn start<S, P>(
        source: S,
        log: RecordLog,
        probe: P,
        options: &RuntimeOptions,
        state: &Arc<SharedTelemetry>,
    ) -> Result<Self>
    where
        S: MetricsSource + 'static,
        P: Probe + 'static,
    {
        let sampler = sampler::spawn(Sampler::new(source), log, Arc::clone(state))?;
        let prober = if options.server_mode {
            let prober = Prober::new(probe, options.probe_target.clone(), PROBE_PERIOD);
            Some(probe::spawn(prober, Arc::clone(state))?)
        } else {
            None
        };
        tracing::info!(server_mode = options.server_mode, "workers started");
        Ok(Self { sampler, prober })
    }

    pub fn has_prober(&self) -> bool {
        self.prober.is_some()
    }

    /// Stop both workers. A worker still inside a blocking read or a probe
    /// is left to finish on its own; rows are flushed whole, so none is torn.
    pub fn shutdown(self, state: &SharedTelemetry) -> Result<()> {
        state.stop();
        let probed = match self.prober {
            Some(prober) => join_if_finished("prober", prober),
            None => Ok(()),
        };
        join_if_finished("sampler", self.sampler)?;
        probed
    }
}

fn join_if_finished(name: &str, handle: thread::JoinHandle<Result<()>>) -> Result<()> {
    if !handle.is_finished() {
        tracing::debug!(worker = name, "worker busy at shutdown, detaching");
        return Ok(());
    }
    handle
        .join()
        .map_err(|_| eyre!("{name} thread panicked"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeOutcome;
    use crate::system::source::{GpuReading, NetCounters, PartitionUsage, TempReading};
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct QuietSource;

    impl MetricsSource for QuietSource {
        fn cpu_percent(&mut self) -> Result<f32> {
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(5.0)
        }
        fn memory_percent(&mut self) -> Result<f32> {
            Ok(5.0)
        }
        fn temperatures(&mut self) -> Result<Vec<TempReading>> {
            Ok(Vec::new())
        }
        fn gpus(&mut self) -> Result<Option<Vec<GpuReading>>> {
            Ok(None)
        }
        fn net_counters(&mut self) -> Result<NetCounters> {
            Ok(NetCounters::default())
        }
        fn partitions(&mut self) -> Result<Vec<PartitionUsage>> {
            Ok(Vec::new())
        }
        fn battery_percent(&mut self) -> Result<Option<f32>> {
            Ok(None)
        }
    }

    struct CountingProbe(Arc<AtomicUsize>);

    impl Probe for CountingProbe {
        fn probe(&self, _target: &str) -> impl Future<Output = Result<ProbeOutcome>> + Send {
            self.0.fetch_add(1, Ordering::SeqCst);
            async { Ok(ProbeOutcome::Reply("reply".into())) }
        }
    }

    fn options(server_mode: bool) -> RuntimeOptions {
        RuntimeOptions {
            server_mode,
            probe_target: "192.0.2.1".into(),
        }
    }

    #[test]
    fn server_mode_spawns_prober() {
        let dir = tempfile::tempdir().unwrap();
        let log = RecordLog::open(&dir.path().join("log.csv")).unwrap();
        let state = Arc::new(SharedTelemetry::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let workers = Workers::start(
            QuietSource,
            log,
            CountingProbe(Arc::clone(&calls)),
            &options(true),
            &state,
        )
        .unwrap();
        assert!(workers.has_prober());

        std::thread::sleep(std::time::Duration::from_millis(200));
        assert!(calls.load(Ordering::SeqCst) >= 1);
        assert!(!state.probe_tail(usize::MAX).is_empty());
        workers.shutdown(&state).unwrap();
    }
}
