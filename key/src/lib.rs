//! Generate secp256k1 keys, derive public keys, and deterministically sign hashes.
//!
//! A [Key] owns a private key, the public key derived from it (once requested), and a
//! context of some curve [Engine]. All curve arithmetic is delegated to the engine; this
//! crate only defines the lifecycle around it.
//!
//! # Example
//! ```rust
//! use ecdsa_key::{Key, Signature};
//!
//! // Generate a new private key
//! let mut key = Key::new();
//! assert!(key.verify_key());
//!
//! // Derive and cache the compressed public key
//! assert!(key.calculate_public_key(true));
//! assert_eq!(key.pub_key_data().len(), 33);
//!
//! // Sign a 32-byte hash (the caller is responsible for hashing)
//! let hash = [7u8; 32];
//! let (signature, ok) = key.sign(&hash);
//! assert!(ok);
//! assert_eq!(signature.len(), 65);
//!
//! // Verify the signature with the engine's independent verifier
//! let public_key = key.create_pub_key().unwrap();
//! let signature = Signature::try_from(signature).unwrap();
//! assert!(public_key.verify(key.context(), &hash, &signature));
//! ```
//!
//! # Status
//!
//! `ecdsa-key` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.

use thiserror::Error;

pub mod engine;
pub use engine::{k256::K256, libsecp256k1::Libsecp256k1, Engine};
pub mod key;
pub use key::Key;
pub mod public_key;
pub use public_key::PublicKey;
pub mod signature;
pub use signature::Signature;

/// Length of a serialized private key (scalar).
pub const PRIVATE_KEY_LENGTH: usize = 32;
/// Length of a compressed public key (Y-Parity || X).
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;
/// Length of an uncompressed public key (0x04 || X || Y).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;
/// Length of the hash accepted by [Key::sign].
pub const HASH_LENGTH: usize = 32;
/// Length of a compact signature (R || S).
pub const COMPACT_SIGNATURE_LENGTH: usize = 64;
/// Length of a recoverable signature (R || S || V).
pub const SIGNATURE_LENGTH: usize = COMPACT_SIGNATURE_LENGTH + 1;

/// Errors that can occur when working with keys and signatures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid hash length: {0}")]
    InvalidHashLength(usize),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid signature length: {0}")]
    InvalidSignatureLength(usize),
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("signing failed")]
    SigningFailed,
    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Interpret `hash` as a fixed-size digest.
pub(crate) fn hash_array(hash: &[u8]) -> Result<&[u8; HASH_LENGTH], Error> {
    hash.try_into()
        .map_err(|_| Error::InvalidHashLength(hash.len()))
}
