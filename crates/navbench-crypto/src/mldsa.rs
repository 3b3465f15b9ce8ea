//! ML-DSA-65 post-quantum signature adapter (FIPS 204).
//!
//! Gated behind the `pq-signatures` feature because the underlying `ml-dsa`
//! crate is still pre-1.0. With the feature disabled the adapter type and
//! its registration remain available, but construction reports the backend
//! as unavailable and the engine runs degraded instead of crashing.
//!
//! The private key travels as the 32-byte seed; the signing key is
//! regenerated from the seed on each sign call.

use navbench_core::{AdapterError, KeyMaterial, ProtocolAdapter, SignatureSize};

/// ML-DSA-65 signature length in bytes.
pub const SIGNATURE_LEN: usize = 3309;

/// ML-DSA-65 encoded verifying key length in bytes.
pub const VERIFYING_KEY_LEN: usize = 1952;

/// ML-DSA-65 signatures (`ml-dsa`).
#[derive(Debug, Default, Clone, Copy)]
pub struct MlDsa65;

impl MlDsa65 {
    /// Create the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Unavailable`] when the `pq-signatures`
    /// feature is not enabled in this build.
    #[cfg(feature = "pq-signatures")]
    pub fn new() -> Result<Self, AdapterError> {
        Ok(Self)
    }

    /// Create the adapter (stub without the `pq-signatures` feature).
    ///
    /// # Errors
    ///
    /// Always returns [`AdapterError::Unavailable`].
    #[cfg(not(feature = "pq-signatures"))]
    pub fn new() -> Result<Self, AdapterError> {
        Err(AdapterError::Unavailable(
            "ml-dsa backend requires the `pq-signatures` feature".into(),
        ))
    }
}

impl ProtocolAdapter for MlDsa65 {
    #[cfg(feature = "pq-signatures")]
    fn keygen(&self) -> Result<KeyMaterial, AdapterError> {
        use ml_dsa::signature::Keypair;
        use rand_core::RngCore;

        let mut seed = [0u8; 32];
        rand_core::OsRng.fill_bytes(&mut seed);
        let seed_array = ml_dsa::Seed::try_from(seed.as_slice())
            .map_err(|_| AdapterError::Keygen("seed length mismatch".into()))?;
        let sk = ml_dsa::SigningKey::<ml_dsa::MlDsa65>::from_seed(&seed_array);
        let vk_bytes: Vec<u8> = sk.verifying_key().encode().to_vec();
        Ok(KeyMaterial::new(seed.to_vec(), vk_bytes, "pqc-mldsa65"))
    }

    #[cfg(not(feature = "pq-signatures"))]
    fn keygen(&self) -> Result<KeyMaterial, AdapterError> {
        Err(AdapterError::Unavailable(
            "ml-dsa backend not built in".into(),
        ))
    }

    #[cfg(feature = "pq-signatures")]
    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, AdapterError> {
        use ml_dsa::signature::{SignatureEncoding, Signer};

        let seed = ml_dsa::Seed::try_from(private_key)
            .map_err(|_| AdapterError::InvalidKey("expected 32-byte seed".into()))?;
        let sk = ml_dsa::SigningKey::<ml_dsa::MlDsa65>::from_seed(&seed);
        let sig: ml_dsa::Signature<ml_dsa::MlDsa65> = sk.sign(message);
        Ok(sig.to_bytes().to_vec())
    }

    #[cfg(not(feature = "pq-signatures"))]
    fn sign(&self, _message: &[u8], _private_key: &[u8]) -> Result<Vec<u8>, AdapterError> {
        Err(AdapterError::Unavailable(
            "ml-dsa backend not built in".into(),
        ))
    }

    #[cfg(feature = "pq-signatures")]
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        use ml_dsa::signature::Verifier;

        let Ok(enc) = ml_dsa::EncodedVerifyingKey::<ml_dsa::MlDsa65>::try_from(public_key) else {
            return false;
        };
        let vk = ml_dsa::VerifyingKey::<ml_dsa::MlDsa65>::decode(&enc);
        let Ok(sig) = ml_dsa::Signature::<ml_dsa::MlDsa65>::try_from(signature) else {
            return false;
        };
        vk.verify(message, &sig).is_ok()
    }

    #[cfg(not(feature = "pq-signatures"))]
    fn verify(&self, _message: &[u8], _signature: &[u8], _public_key: &[u8]) -> bool {
        false
    }

    fn signature_size(&self) -> SignatureSize {
        SignatureSize::Fixed(SIGNATURE_LEN)
    }
}
