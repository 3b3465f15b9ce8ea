//! Concrete signature-scheme adapters for the benchmark engine.
//!
//! Each adapter is a thin binding from the engine's
//! [`ProtocolAdapter`](navbench_core::ProtocolAdapter) contract to one
//! external cryptographic backend:
//!
//! - [`ecdsa::EcdsaP256`] — ECDSA over NIST P-256 (`p256`), DER signatures.
//! - [`ed25519::Ed25519`] — Ed25519 (`ed25519-dalek`), 64-byte signatures.
//! - [`mldsa::MlDsa65`] — ML-DSA-65 (FIPS 204, `ml-dsa`), behind the
//!   `pq-signatures` feature. With the feature disabled the adapter still
//!   registers but construction reports the backend as unavailable, so the
//!   engine's degraded path stays exercisable in restricted builds.
//!
//! No benchmark logic lives here; adapters only translate keys, signatures
//! and failure modes.

pub mod ecdsa;
pub mod ed25519;
pub mod mldsa;

use navbench_core::{ProtocolAdapter, Registry};

/// Register every built-in scheme under its canonical name.
///
/// Names: `ecdsa`, `ed25519`, `pqc`.
pub fn register_builtin(registry: &mut Registry) {
    registry.register("ecdsa", || Ok(Box::new(ecdsa::EcdsaP256::new())));
    registry.register("ed25519", || Ok(Box::new(ed25519::Ed25519::new())));
    registry.register("pqc", || {
        let adapter = mldsa::MlDsa65::new()?;
        Ok(Box::new(adapter) as Box<dyn ProtocolAdapter>)
    });
}
