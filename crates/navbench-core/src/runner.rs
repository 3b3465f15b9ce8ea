//! The benchmark runner: drives one complete run and emits measurements.

use crate::attack::{AttackChain, AttackStage};
use crate::error::BenchError;
use crate::measure::{MeasurementRecord, MeasurementSink, ResourceSampler};
use crate::message::{SourceRecord, message_bytes};
use crate::protocol::KeyMaterial;
use crate::registry::Registry;
use std::time::Instant;

/// Configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Registered scheme name to benchmark.
    pub scheme: String,
    /// Upper bound on the number of processed records.
    pub max_iter: usize,
}

/// Accounting for one completed run.
///
/// Carries the explicit degraded/fallback counts so that no iteration is
/// silently dropped or misreported: `iterations` rows reached the sink, of
/// which `verified_count` verified, `sign_failures` ran with an empty
/// signature, and `conversion_fallbacks` used the textual record rendering.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Scheme name the run benchmarked.
    pub scheme: String,
    /// Key identifier from keygen, or `"degraded"` when keygen failed.
    pub key_id: String,
    /// True when adapter construction or keygen failed and the run
    /// proceeded without a usable keypair.
    pub degraded: bool,
    /// Why the run degraded, when it did.
    pub degraded_reason: Option<String>,
    /// Rows emitted to the sink.
    pub iterations: u64,
    /// Rows whose verify returned true.
    pub verified_count: u64,
    /// Iterations that fell back to an empty signature.
    pub sign_failures: u64,
    /// Iterations whose record conversion used the textual fallback.
    pub conversion_fallbacks: u64,
}

/// Drives one benchmark run: resolve adapter, generate a keypair, then for
/// each input record apply the attack chain, sign, time the verify call,
/// sample resources, and emit one measurement row.
///
/// Single-threaded and synchronous: each iteration's sign/verify completes
/// strictly before the next begins, keeping latency samples uncontended.
pub struct Runner<'a> {
    registry: &'a Registry,
}

impl<'a> Runner<'a> {
    /// Create a runner over a populated registry.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Execute one complete run.
    ///
    /// A run either fails fast at setup with
    /// [`BenchError::UnknownProtocol`], aborts on sink I/O failure, or
    /// completes fully: adapter faults inside the loop degrade the affected
    /// iteration and are counted in the returned [`RunReport`].
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnknownProtocol`] when `config.scheme` has no
    /// registered factory, or [`BenchError::Io`] when the sink fails.
    pub fn run<R, I, S>(
        &self,
        config: &RunConfig,
        source: I,
        chain: &mut AttackChain,
        sink: &mut S,
    ) -> Result<RunReport, BenchError>
    where
        R: SourceRecord,
        I: IntoIterator<Item = (u64, R)>,
        S: MeasurementSink + ?Sized,
    {
        // Setup failures abort before any keys or I/O; everything after
        // this point degrades instead.
        let factory = self.registry.get(&config.scheme)?;

        let (adapter, keys, degraded_reason) = match factory() {
            Ok(adapter) => match adapter.keygen() {
                Ok(keys) => (Some(adapter), keys, None),
                Err(err) => {
                    tracing::warn!(scheme = %config.scheme, error = %err,
                        "keygen failed; running degraded without a keypair");
                    (Some(adapter), degraded_keys(), Some(err.to_string()))
                }
            },
            Err(err) => {
                tracing::warn!(scheme = %config.scheme, error = %err,
                    "adapter construction failed; running degraded");
                (None, degraded_keys(), Some(err.to_string()))
            }
        };
        let degraded = degraded_reason.is_some();

        tracing::debug!(scheme = %config.scheme, key_id = %keys.key_id,
            max_iter = config.max_iter, degraded, "benchmark run starting");

        let mut report = RunReport {
            scheme: config.scheme.clone(),
            key_id: keys.key_id.clone(),
            degraded,
            degraded_reason,
            iterations: 0,
            verified_count: 0,
            sign_failures: 0,
            conversion_fallbacks: 0,
        };

        let mut sampler = ResourceSampler::new();
        let epoch = Instant::now();

        for (frame_index, record) in source {
            // The cap bounds processed records, not index values.
            if report.iterations as usize >= config.max_iter {
                break;
            }

            let converted = message_bytes(&record);
            if converted.used_fallback {
                report.conversion_fallbacks += 1;
            }
            let msg = chain.transform(converted.bytes);

            let t_recv_ns = elapsed_ns(epoch);

            // Signing cost is excluded from the latency column; a signing
            // fault degrades this iteration to an empty signature.
            let signature = if degraded || keys.private_key.is_empty() {
                report.sign_failures += 1;
                Vec::new()
            } else {
                match adapter
                    .as_ref()
                    .map(|a| a.sign(&msg, &keys.private_key))
                    .transpose()
                {
                    Ok(sig) => sig.unwrap_or_default(),
                    Err(err) => {
                        tracing::debug!(frame_index, error = %err,
                            "sign failed; using empty signature");
                        report.sign_failures += 1;
                        Vec::new()
                    }
                }
            };

            // The latency brackets exactly the verify call. verify is total
            // by contract, so a corrupted input can only flip the result.
            let t0 = Instant::now();
            let verified = adapter
                .as_ref()
                .is_some_and(|a| a.verify(&msg, &signature, &keys.public_key));
            let latency_ns = t0.elapsed().as_nanos() as u64;
            let t_verify_end_ns = elapsed_ns(epoch);

            // Coarse, once per iteration, after verify.
            let resources = sampler.sample();

            sink.record(&MeasurementRecord {
                frame_index,
                t_recv_ns,
                t_verify_end_ns,
                latency_ns,
                verified,
                cpu_user_ms: resources.cpu_user_ms,
                mem_rss_bytes: resources.mem_rss_bytes,
            })?;

            report.iterations += 1;
            if verified {
                report.verified_count += 1;
            }
        }

        tracing::debug!(scheme = %report.scheme, iterations = report.iterations,
            verified = report.verified_count, "benchmark run complete");
        Ok(report)
    }
}

/// Empty key material for degraded runs: signing is skipped and verify is
/// exercised against an empty public key blob.
fn degraded_keys() -> KeyMaterial {
    KeyMaterial::new(Vec::new(), Vec::new(), "degraded")
}

fn elapsed_ns(epoch: Instant) -> u64 {
    u64::try_from(epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
