//! Conversion from opaque scenario records to canonical message bytes.
//!
//! The engine never fails on an unconvertible record: conversion tries a
//! ranked list of accessors and bottoms out in a textual rendering, so the
//! measurement sequence is never truncated by a malformed input.

/// The engine's view of one scenario record.
///
/// Scenario readers implement this for their record type. The accessors
/// form a ranked conversion chain: canonical payload bits first, then a raw
/// byte form, then a total textual fallback.
pub trait SourceRecord {
    /// Canonical navigation payload bits, if the record carries them.
    fn nav_bits(&self) -> Option<&[u8]> {
        None
    }

    /// Raw transmitted bytes, if the record carries them.
    fn raw(&self) -> Option<&[u8]> {
        None
    }

    /// Textual rendering of the record. Total; used as the last resort.
    fn describe(&self) -> String;
}

/// Outcome of converting a record to bytes.
pub struct ConvertedMessage {
    /// The message bytes handed to the attack pipeline.
    pub bytes: Vec<u8>,
    /// Whether conversion fell through to the textual rendering.
    pub used_fallback: bool,
}

/// Convert a record to message bytes via the ranked accessor chain.
///
/// Never fails: a record with neither payload bits nor raw bytes yields the
/// UTF-8 encoding of its textual rendering, flagged as a fallback so the
/// run report can count it.
pub fn message_bytes<R: SourceRecord>(record: &R) -> ConvertedMessage {
    if let Some(bits) = record.nav_bits() {
        return ConvertedMessage {
            bytes: bits.to_vec(),
            used_fallback: false,
        };
    }
    if let Some(raw) = record.raw() {
        return ConvertedMessage {
            bytes: raw.to_vec(),
            used_fallback: false,
        };
    }
    ConvertedMessage {
        bytes: record.describe().into_bytes(),
        used_fallback: true,
    }
}
