//! Serialized secp256k1 public key.
//!
//! A [PublicKey] is a standalone value: it owns its encoding (33-byte compressed or
//! 65-byte uncompressed SEC 1) and does not borrow from the [crate::Key] it was derived
//! from. Operations that need curve arithmetic take an [Engine] context explicitly.

use crate::{
    engine::Engine, hash_array, Error, Signature, COMPRESSED_PUBLIC_KEY_LENGTH,
};
use commonware_utils::hex;
use std::fmt::{Debug, Display};
use std::ops::Deref;

/// secp256k1 public key (SEC 1 encoding).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PublicKey {
    raw: Vec<u8>,
}

impl PublicKey {
    /// Wrap bytes produced by an engine (already validated).
    pub(crate) fn from_engine(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// Parse a compressed or uncompressed public key, rejecting points not on the curve.
    ///
    /// The encoding of `bytes` is preserved.
    pub fn parse<E: Engine>(engine: &E, bytes: &[u8]) -> Result<Self, Error> {
        let compressed = bytes.len() == COMPRESSED_PUBLIC_KEY_LENGTH;
        let raw = engine.serialize_public_key(bytes, compressed)?;
        Ok(Self { raw })
    }

    /// Returns true if the key is in compressed (`0x02`/`0x03` || X) form.
    pub fn is_compressed(&self) -> bool {
        self.raw.len() == COMPRESSED_PUBLIC_KEY_LENGTH
    }

    /// Re-encode the same point in the requested form.
    pub fn serialize<E: Engine>(&self, engine: &E, compressed: bool) -> Result<Self, Error> {
        if compressed == self.is_compressed() {
            return Ok(self.clone());
        }
        let raw = engine.serialize_public_key(&self.raw, compressed)?;
        Ok(Self { raw })
    }

    /// Verify `signature` over a 32-byte `hash`.
    ///
    /// Returns false if `hash` has the wrong length, the signature is not low-S, or the
    /// signature was not produced by the private key behind this public key.
    pub fn verify<E: Engine>(&self, engine: &E, hash: &[u8], signature: &Signature) -> bool {
        let hash = match hash_array(hash) {
            Ok(hash) => hash,
            Err(_) => return false,
        };
        engine.verify(hash, signature, &self.raw)
    }

    /// Recover the public key that produced `signature` over a 32-byte `hash`.
    pub fn recover<E: Engine>(
        engine: &E,
        hash: &[u8],
        signature: &Signature,
        compressed: bool,
    ) -> Result<Self, Error> {
        let hash = hash_array(hash)?;
        let raw = engine.recover(hash, signature, compressed)?;
        Ok(Self { raw })
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for PublicKey {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl From<PublicKey> for Vec<u8> {
    fn from(public_key: PublicKey) -> Self {
        public_key.raw
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
