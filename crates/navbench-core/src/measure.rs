//! Measurement rows, sinks, and process resource sampling.

use std::io;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// One row of per-iteration benchmark output.
///
/// Immutable once emitted; the runner produces exactly one per processed
/// record, in input order. Timestamps are monotonic nanoseconds since the
/// start of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Index of the input record this row measures.
    pub frame_index: u64,
    /// Timestamp at the start of this iteration's cryptographic work.
    pub t_recv_ns: u64,
    /// Timestamp immediately after the verify call returned.
    pub t_verify_end_ns: u64,
    /// Elapsed time bracketing exactly the verify call.
    pub latency_ns: u64,
    /// Whether the adapter accepted the signature.
    pub verified: bool,
    /// Accumulated process CPU time, milliseconds, sampled after verify.
    pub cpu_user_ms: f64,
    /// Process resident set size, bytes, sampled after verify.
    pub mem_rss_bytes: u64,
}

/// Destination for measurement rows.
pub trait MeasurementSink {
    /// Accept one row.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the underlying writer fails; the runner
    /// aborts the run on sink failure rather than silently dropping rows.
    fn record(&mut self, record: &MeasurementRecord) -> io::Result<()>;
}

/// In-memory sink, used by tests and report post-processing.
#[derive(Debug, Default)]
pub struct VecSink {
    records: Vec<MeasurementRecord>,
}

impl VecSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected rows, in emission order.
    #[must_use]
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Consume the sink, yielding the rows.
    #[must_use]
    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }
}

impl MeasurementSink for VecSink {
    fn record(&mut self, record: &MeasurementRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// One process resource snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceSample {
    /// Accumulated process CPU time in milliseconds.
    pub cpu_user_ms: f64,
    /// Resident set size in bytes.
    pub mem_rss_bytes: u64,
}

/// Coarse per-iteration sampler of the current process's CPU and memory.
///
/// Sampling is deliberately coarse: one snapshot per iteration, taken after
/// verify, not bracketing it. A sampler that cannot resolve the current
/// process degrades to zero samples instead of failing the run.
pub struct ResourceSampler {
    system: System,
    pid: Option<Pid>,
}

impl ResourceSampler {
    /// Create a sampler for the current process.
    #[must_use]
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid().ok();
        if pid.is_none() {
            tracing::warn!("cannot resolve current pid; resource columns will read zero");
        }
        Self {
            system: System::new(),
            pid,
        }
    }

    /// Take one snapshot.
    pub fn sample(&mut self) -> ResourceSample {
        let Some(pid) = self.pid else {
            return ResourceSample::default();
        };
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            false,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        match self.system.process(pid) {
            Some(process) => ResourceSample {
                cpu_user_ms: process.accumulated_cpu_time() as f64,
                mem_rss_bytes: process.memory(),
            },
            None => ResourceSample::default(),
        }
    }
}

impl Default for ResourceSampler {
    fn default() -> Self {
        Self::new()
    }
}
