//! ECDSA P-256 adapter.
//!
//! Public keys travel as SEC1 uncompressed points; signatures as ASN.1 DER,
//! so the signature length varies per message.

use navbench_core::{AdapterError, KeyMaterial, ProtocolAdapter, SignatureSize};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::OsRng;

/// ECDSA over NIST P-256 with SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct EcdsaP256;

impl EcdsaP256 {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolAdapter for EcdsaP256 {
    fn keygen(&self) -> Result<KeyMaterial, AdapterError> {
        let signing_key = SigningKey::random(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);
        let public_key = verifying_key.to_encoded_point(false).as_bytes().to_vec();
        Ok(KeyMaterial::new(
            signing_key.to_bytes().to_vec(),
            public_key,
            "ecdsa-p256",
        ))
    }

    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, AdapterError> {
        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|e| AdapterError::InvalidKey(e.to_string()))?;
        let signature: Signature = signing_key.sign(message);
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
            return false;
        };
        let Ok(signature) = Signature::from_der(signature) else {
            return false;
        };
        verifying_key.verify(message, &signature).is_ok()
    }

    fn signature_size(&self) -> SignatureSize {
        // DER encoding: typically 70-72 bytes, never fixed.
        SignatureSize::Variable
    }
}
