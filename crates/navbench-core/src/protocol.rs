//! Protocol adapter contract for broadcast-authentication schemes.
//!
//! Every signature scheme the engine can benchmark is bound through
//! [`ProtocolAdapter`]. Adapters are thin wrappers over an external
//! cryptographic backend: they translate the backend's key and signature
//! types to opaque byte blobs and absorb the backend's failure modes into
//! the contract below.
//!
//! The contract the attack pipeline exists to stress-test: [`verify`] is
//! total over all byte inputs. Corrupted signatures, truncated public keys
//! and replayed stale messages are classified as invalid, never propagated
//! as faults.
//!
//! [`verify`]: ProtocolAdapter::verify

use thiserror::Error;
use zeroize::Zeroizing;

/// Errors surfaced by a protocol adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The underlying cryptographic backend is not present in this build.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    Keygen(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    Sign(String),

    /// The private key bytes do not decode for this scheme.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Expected signature length for a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureSize {
    /// Every signature is exactly this many bytes.
    Fixed(usize),
    /// Signature length varies per message (e.g. ASN.1 DER encoding).
    Variable,
}

/// One freshly generated keypair, produced once per benchmark run.
///
/// The private key is an adapter-internal byte encoding (seed or scalar),
/// held only by the runner for the run's lifetime and zeroized on drop.
/// The public key blob and key id are benchmark metadata.
#[derive(Clone)]
pub struct KeyMaterial {
    /// Adapter-internal private key encoding. Empty in degraded runs.
    pub private_key: Zeroizing<Vec<u8>>,
    /// Transportable public key blob, as produced by `serialize_public_key`.
    pub public_key: Vec<u8>,
    /// Human-readable identifier for the scheme/parameter set.
    pub key_id: String,
}

impl KeyMaterial {
    /// Build key material from its parts.
    pub fn new(private_key: Vec<u8>, public_key: Vec<u8>, key_id: impl Into<String>) -> Self {
        Self {
            private_key: Zeroizing::new(private_key),
            public_key,
            key_id: key_id.into(),
        }
    }
}

/// Capability contract for one authentication scheme.
///
/// Implementations are stateless across calls except for scheme parameters
/// fixed at construction (curve, parameter set). One instance is owned
/// exclusively by one runner for the duration of one run.
pub trait ProtocolAdapter {
    /// Generate a fresh keypair for this scheme.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when the backend is absent
    /// (e.g. an optional algorithm feature is disabled), or
    /// [`AdapterError::Keygen`] on backend failure. Both are recoverable:
    /// the runner degrades to a no-key run rather than aborting.
    fn keygen(&self) -> Result<KeyMaterial, AdapterError>;

    /// Sign a message with a private key previously produced by `keygen`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidKey`] if the key bytes do not decode,
    /// or [`AdapterError::Sign`] on backend failure.
    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, AdapterError>;

    /// Check a signature against a message and a public key blob.
    ///
    /// Total over all inputs: malformed or adversarial bytes in any argument
    /// yield `false`, never a panic or an error.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool;

    /// Encode a public key blob into its transportable byte form.
    ///
    /// Adapters already hand out transportable blobs from `keygen`, so for
    /// most schemes this is the identity.
    fn serialize_public_key(&self, public_key: &[u8]) -> Vec<u8> {
        public_key.to_vec()
    }

    /// Decode a transportable public key form back into a blob.
    ///
    /// Round-trip law: a deserialized-then-serialized blob verifies
    /// identically to the original (not necessarily byte-identical).
    fn deserialize_public_key(&self, blob: &[u8]) -> Vec<u8> {
        blob.to_vec()
    }

    /// Expected signature size for this scheme.
    fn signature_size(&self) -> SignatureSize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_material_zeroizes_private_key_wrapper() {
        let km = KeyMaterial::new(vec![1, 2, 3], vec![4, 5], "test");
        assert_eq!(&km.private_key[..], &[1, 2, 3]);
        assert_eq!(km.public_key, vec![4, 5]);
        assert_eq!(km.key_id, "test");
    }

    #[test]
    fn signature_size_compares() {
        assert_eq!(SignatureSize::Fixed(64), SignatureSize::Fixed(64));
        assert_ne!(SignatureSize::Fixed(64), SignatureSize::Variable);
    }
}
