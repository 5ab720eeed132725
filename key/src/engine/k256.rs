//! [Engine] backed by the pure-Rust `k256` crate.
//!
//! `k256` needs no precomputed context, so [K256] is a zero-sized handle. It exists for
//! targets where the C library cannot be built (e.g. `wasm32`).

use crate::{
    engine::{check_encoding, Engine},
    Error, Signature, COMPACT_SIGNATURE_LENGTH, HASH_LENGTH, PRIVATE_KEY_LENGTH,
};
use ::k256::{
    ecdsa::{
        signature::hazmat::PrehashVerifier, RecoveryId, Signature as EcdsaSignature, SigningKey,
        VerifyingKey,
    },
    elliptic_curve::scalar::IsHigh,
};

/// `k256` context.
#[derive(Clone, Copy, Debug, Default)]
pub struct K256;

impl K256 {
    fn parse_private_key(private_key: &[u8]) -> Result<SigningKey, Error> {
        // Only exact-length scalars are accepted (no left-padding of short inputs).
        if private_key.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidPrivateKey);
        }
        SigningKey::from_slice(private_key).map_err(|_| Error::InvalidPrivateKey)
    }

    fn parse_public_key(public_key: &[u8]) -> Result<VerifyingKey, Error> {
        check_encoding(public_key)?;
        VerifyingKey::from_sec1_bytes(public_key).map_err(|_| Error::InvalidPublicKey)
    }

    fn parse_signature(signature: &Signature) -> Result<EcdsaSignature, Error> {
        let signature =
            EcdsaSignature::from_slice(signature.compact()).map_err(|_| Error::InvalidSignature)?;
        if signature.s().is_high().into() {
            // Reject any signatures with a `s` value in the upper half of the curve order.
            return Err(Error::InvalidSignature);
        }
        Ok(signature)
    }

    fn encode(public_key: &VerifyingKey, compressed: bool) -> Vec<u8> {
        public_key.to_encoded_point(compressed).as_bytes().to_vec()
    }
}

impl Engine for K256 {
    const NAME: &'static str = "k256";

    fn new() -> Self {
        Self
    }

    fn verify_private_key(&self, private_key: &[u8]) -> bool {
        Self::parse_private_key(private_key).is_ok()
    }

    fn derive_public_key(&self, private_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error> {
        let signer = Self::parse_private_key(private_key)?;
        Ok(Self::encode(signer.verifying_key(), compressed))
    }

    fn serialize_public_key(&self, public_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error> {
        let public_key = Self::parse_public_key(public_key)?;
        Ok(Self::encode(&public_key, compressed))
    }

    fn sign(&self, hash: &[u8; HASH_LENGTH], private_key: &[u8]) -> Result<Signature, Error> {
        let signer = Self::parse_private_key(private_key)?;
        let (signature, recovery_id) = signer
            .sign_prehash_recoverable(hash)
            .map_err(|_| Error::SigningFailed)?;

        // Negating s mirrors R, which flips the parity bit of the recovery id.
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        };
        let mut compact = [0u8; COMPACT_SIGNATURE_LENGTH];
        compact.copy_from_slice(&signature.to_bytes());
        Signature::new(compact, recovery_id.to_byte())
    }

    fn verify(&self, hash: &[u8; HASH_LENGTH], signature: &Signature, public_key: &[u8]) -> bool {
        let public_key = match Self::parse_public_key(public_key) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let signature = match Self::parse_signature(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        public_key.verify_prehash(hash, &signature).is_ok()
    }

    fn recover(
        &self,
        hash: &[u8; HASH_LENGTH],
        signature: &Signature,
        compressed: bool,
    ) -> Result<Vec<u8>, Error> {
        let recovery_id = RecoveryId::from_byte(signature.recovery_id())
            .ok_or(Error::InvalidRecoveryId(signature.recovery_id()))?;
        let signature = Self::parse_signature(signature)?;
        let public_key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
            .map_err(|_| Error::RecoveryFailed)?;
        Ok(Self::encode(&public_key, compressed))
    }
}
