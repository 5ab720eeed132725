//! [Engine] backed by the C `libsecp256k1` library (via the `secp256k1` crate).
//!
//! Each [Libsecp256k1] owns a full (signing and verification) context. The context is
//! randomized at creation to blind scalar multiplication against side-channel attacks and
//! destroyed when the value is dropped.

use crate::{
    engine::{check_encoding, Engine},
    Error, Signature, HASH_LENGTH,
};
use rand::rngs::OsRng;
use secp256k1::{
    ecdsa::{self, RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};

/// `libsecp256k1` context.
#[derive(Clone)]
pub struct Libsecp256k1 {
    ctx: Secp256k1<All>,
}

impl Libsecp256k1 {
    fn parse_private_key(private_key: &[u8]) -> Result<SecretKey, Error> {
        SecretKey::from_slice(private_key).map_err(|_| Error::InvalidPrivateKey)
    }

    fn parse_public_key(public_key: &[u8]) -> Result<PublicKey, Error> {
        check_encoding(public_key)?;
        PublicKey::from_slice(public_key).map_err(|_| Error::InvalidPublicKey)
    }

    fn encode(public_key: &PublicKey, compressed: bool) -> Vec<u8> {
        if compressed {
            public_key.serialize().to_vec()
        } else {
            public_key.serialize_uncompressed().to_vec()
        }
    }

    /// Returns true if `s` is in the upper half of the curve order.
    fn is_high_s(signature: &ecdsa::Signature) -> bool {
        let mut normalized = *signature;
        normalized.normalize_s();
        normalized != *signature
    }
}

impl Engine for Libsecp256k1 {
    const NAME: &'static str = "libsecp256k1";

    fn new() -> Self {
        let mut ctx = Secp256k1::new();
        ctx.randomize(&mut OsRng);
        Self { ctx }
    }

    fn verify_private_key(&self, private_key: &[u8]) -> bool {
        Self::parse_private_key(private_key).is_ok()
    }

    fn derive_public_key(&self, private_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error> {
        let mut secret_key = Self::parse_private_key(private_key)?;
        let public_key = PublicKey::from_secret_key(&self.ctx, &secret_key);
        secret_key.non_secure_erase();
        Ok(Self::encode(&public_key, compressed))
    }

    fn serialize_public_key(&self, public_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error> {
        let public_key = Self::parse_public_key(public_key)?;
        Ok(Self::encode(&public_key, compressed))
    }

    fn sign(&self, hash: &[u8; HASH_LENGTH], private_key: &[u8]) -> Result<Signature, Error> {
        let mut secret_key = Self::parse_private_key(private_key)?;
        let message = Message::from_digest(*hash);

        // libsecp256k1 always produces low-S signatures (and adjusts the recovery id to match)
        let signature = self.ctx.sign_ecdsa_recoverable(&message, &secret_key);
        secret_key.non_secure_erase();
        let (recovery_id, compact) = signature.serialize_compact();
        let recovery_id = u8::try_from(recovery_id.to_i32()).map_err(|_| Error::SigningFailed)?;
        Signature::new(compact, recovery_id)
    }

    fn verify(&self, hash: &[u8; HASH_LENGTH], signature: &Signature, public_key: &[u8]) -> bool {
        let public_key = match Self::parse_public_key(public_key) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let signature = match ecdsa::Signature::from_compact(signature.compact()) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        let message = Message::from_digest(*hash);
        self.ctx
            .verify_ecdsa(&message, &signature, &public_key)
            .is_ok()
    }

    fn recover(
        &self,
        hash: &[u8; HASH_LENGTH],
        signature: &Signature,
        compressed: bool,
    ) -> Result<Vec<u8>, Error> {
        let plain = ecdsa::Signature::from_compact(signature.compact())
            .map_err(|_| Error::InvalidSignature)?;
        if Self::is_high_s(&plain) {
            return Err(Error::InvalidSignature);
        }
        let recovery_id = RecoveryId::from_i32(i32::from(signature.recovery_id()))
            .map_err(|_| Error::InvalidRecoveryId(signature.recovery_id()))?;
        let signature = RecoverableSignature::from_compact(signature.compact(), recovery_id)
            .map_err(|_| Error::InvalidSignature)?;
        let message = Message::from_digest(*hash);
        let public_key = self
            .ctx
            .recover_ecdsa(&message, &signature)
            .map_err(|_| Error::RecoveryFailed)?;
        Ok(Self::encode(&public_key, compressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::malleate;

    #[test]
    fn test_contexts_are_independent() {
        // Each context is randomized differently, but results must not depend on it
        let first = Libsecp256k1::new();
        let second = Libsecp256k1::new();
        let private_key = [0x11; 32];
        let hash = [0x22; HASH_LENGTH];
        assert_eq!(
            first.derive_public_key(&private_key, true).unwrap(),
            second.derive_public_key(&private_key, true).unwrap()
        );
        assert_eq!(
            first.sign(&hash, &private_key).unwrap(),
            second.sign(&hash, &private_key).unwrap()
        );
    }

    #[test]
    fn test_clone_context() {
        let engine = Libsecp256k1::new();
        let cloned = engine.clone();
        drop(engine);
        assert!(cloned.verify_private_key(&[0x01; 32]));
    }

    #[test]
    fn test_recover_rejects_high_s() {
        let engine = Libsecp256k1::new();
        let private_key = [0x33; 32];
        let hash = [0x44; HASH_LENGTH];
        let signature = engine.sign(&hash, &private_key).unwrap();
        let low = ecdsa::Signature::from_compact(signature.compact()).unwrap();
        assert!(!Libsecp256k1::is_high_s(&low));

        let malleated = malleate(&signature);
        let high = ecdsa::Signature::from_compact(malleated.compact()).unwrap();
        assert!(Libsecp256k1::is_high_s(&high));

        // Normalizing the twin yields the original signature
        let mut normalized = high;
        normalized.normalize_s();
        assert_eq!(normalized, low);

        assert_eq!(
            engine.recover(&hash, &malleated, true),
            Err(Error::InvalidSignature)
        );
    }
}
