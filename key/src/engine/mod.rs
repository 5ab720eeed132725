//! Curve engines that perform the secp256k1 arithmetic on behalf of a [crate::Key].
//!
//! An [Engine] value is a computation context: it is created when a key is created and
//! released (via `Drop`) when the key is dropped. Engines never retain key material
//! between calls.
//!
//! Two implementations are provided:
//!
//! | Engine | Library | Context |
//! |--------|---------|---------|
//! | [libsecp256k1::Libsecp256k1] | `libsecp256k1` (C, via the `secp256k1` crate) | precomputed tables, randomized against side channels |
//! | [k256::K256] | `k256` (pure Rust) | stateless |
//!
//! Both derive nonces deterministically as specified in [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979)
//! and enforce signatures are normalized according to [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures),
//! so they produce byte-identical output for the same inputs.

use crate::{
    Error, Signature, COMPRESSED_PUBLIC_KEY_LENGTH, HASH_LENGTH, PRIVATE_KEY_LENGTH,
    UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use rand::{rngs::OsRng, RngCore};

pub mod k256;
pub mod libsecp256k1;

/// Operations a [crate::Key] requires from an elliptic-curve library.
pub trait Engine: Send + Sync + Sized + 'static {
    /// Name of the engine (used in logs).
    const NAME: &'static str;

    /// Create a new computation context.
    fn new() -> Self;

    /// Sample 32 bytes from the operating system's CSPRNG.
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide randomness. No safe private key can
    /// be produced without it, so this is not surfaced as a recoverable error.
    fn random_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        let mut bytes = [0u8; PRIVATE_KEY_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        bytes
    }

    /// Returns true if `private_key` is exactly 32 bytes and encodes a scalar in `[1, n-1]`.
    fn verify_private_key(&self, private_key: &[u8]) -> bool;

    /// Multiply the generator by `private_key` and serialize the resulting point.
    fn derive_public_key(&self, private_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error>;

    /// Parse a serialized public key (either encoding) and re-serialize it.
    fn serialize_public_key(&self, public_key: &[u8], compressed: bool) -> Result<Vec<u8>, Error>;

    /// Produce a deterministic, low-S, recoverable signature over `hash`.
    fn sign(&self, hash: &[u8; HASH_LENGTH], private_key: &[u8]) -> Result<Signature, Error>;

    /// Verify `signature` over `hash` against a serialized public key.
    ///
    /// Signatures with an `s` value in the upper half of the curve order are rejected.
    fn verify(&self, hash: &[u8; HASH_LENGTH], signature: &Signature, public_key: &[u8]) -> bool;

    /// Recover the serialized public key that produced `signature` over `hash`.
    fn recover(
        &self,
        hash: &[u8; HASH_LENGTH],
        signature: &Signature,
        compressed: bool,
    ) -> Result<Vec<u8>, Error>;
}

/// Reject anything other than the SEC 1 compressed (`0x02`/`0x03`) and uncompressed (`0x04`)
/// encodings before handing bytes to an engine (some libraries also accept hybrid encodings).
pub(crate) fn check_encoding(public_key: &[u8]) -> Result<(), Error> {
    match (public_key.len(), public_key.first()) {
        (COMPRESSED_PUBLIC_KEY_LENGTH, Some(0x02 | 0x03)) => Ok(()),
        (UNCOMPRESSED_PUBLIC_KEY_LENGTH, Some(0x04)) => Ok(()),
        _ => Err(Error::InvalidPublicKey),
    }
}
