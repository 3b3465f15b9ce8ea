//! Ed25519 adapter.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use navbench_core::{AdapterError, KeyMaterial, ProtocolAdapter, SignatureSize};
use rand_core::OsRng;

/// Ed25519 signatures (`ed25519-dalek`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519;

impl Ed25519 {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolAdapter for Ed25519 {
    fn keygen(&self) -> Result<KeyMaterial, AdapterError> {
        let signing_key = SigningKey::generate(&mut OsRng);
        Ok(KeyMaterial::new(
            signing_key.to_bytes().to_vec(),
            signing_key.verifying_key().to_bytes().to_vec(),
            "ed25519",
        ))
    }

    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, AdapterError> {
        let seed: [u8; 32] = private_key
            .try_into()
            .map_err(|_| AdapterError::InvalidKey("expected 32-byte seed".into()))?;
        let signing_key = SigningKey::from_bytes(&seed);
        Ok(signing_key.sign(message).to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(pk_bytes) = <[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&sig_bytes);
        verifying_key.verify(message, &signature).is_ok()
    }

    fn signature_size(&self) -> SignatureSize {
        SignatureSize::Fixed(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let adapter = Ed25519::new();
        let keys = adapter.keygen().unwrap();
        assert_eq!(keys.public_key.len(), 32);

        let msg = b"navigation page payload";
        let sig = adapter.sign(msg, &keys.private_key).unwrap();
        assert_eq!(sig.len(), 64);
        assert!(adapter.verify(msg, &sig, &keys.public_key));
    }

    #[test]
    fn wrong_message_rejected() {
        let adapter = Ed25519::new();
        let keys = adapter.keygen().unwrap();
        let sig = adapter.sign(b"original", &keys.private_key).unwrap();
        assert!(!adapter.verify(b"tampered", &sig, &keys.public_key));
    }

    #[test]
    fn malformed_inputs_never_panic() {
        let adapter = Ed25519::new();
        let keys = adapter.keygen().unwrap();
        let sig = adapter.sign(b"m", &keys.private_key).unwrap();

        assert!(!adapter.verify(b"m", &[], &keys.public_key));
        assert!(!adapter.verify(b"m", &sig, &[]));
        assert!(!adapter.verify(b"m", &sig[..63], &keys.public_key));
        assert!(!adapter.verify(b"m", &sig, &keys.public_key[..31]));
    }

    #[test]
    fn fixed_signature_size() {
        assert_eq!(Ed25519::new().signature_size(), SignatureSize::Fixed(64));
    }
}
