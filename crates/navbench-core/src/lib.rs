//! Benchmark execution engine for broadcast-authentication protocols.
//!
//! The engine drives a signature-scheme adapter through sign/verify cycles
//! over a sequence of navigation-message records while an attack pipeline
//! perturbs the transmitted bytes, and records one measurement row per
//! processed message.
//!
//! The pieces, leaf first:
//!
//! - [`protocol`] — the capability contract every scheme adapter satisfies.
//! - [`registry`] — name-to-factory mapping used to resolve adapters.
//! - [`attack`] — composable byte-level transforms (bit corruption, replay).
//! - [`message`] — ranked conversion from opaque input records to bytes.
//! - [`measure`] — the measurement row, sink trait, and resource sampler.
//! - [`runner`] — the loop that ties the above together for one run.
//!
//! The engine implements no cryptography itself; concrete schemes are bound
//! through [`protocol::ProtocolAdapter`] by a companion crate.

pub mod attack;
pub mod error;
pub mod measure;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod runner;

pub use attack::{AttackChain, AttackStage, BitFlip, Identity, Replay};
pub use error::BenchError;
pub use measure::{MeasurementRecord, MeasurementSink, ResourceSampler, VecSink};
pub use message::{ConvertedMessage, SourceRecord, message_bytes};
pub use protocol::{AdapterError, KeyMaterial, ProtocolAdapter, SignatureSize};
pub use registry::Registry;
pub use runner::{RunConfig, RunReport, Runner};
