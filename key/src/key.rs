//! secp256k1 private key with a lazily derived public key.
//!
//! A [Key] is created either by generating fresh randomness or by importing caller-supplied
//! bytes. Imported bytes are stored as-is: construction never fails, and validity is only
//! known once [Key::verify_key] is called. Every operation that uses the private key
//! (derivation and signing) re-checks it through the engine, so an invalid key can never
//! produce output.
//!
//! The public key is cached only by an explicit [Key::calculate_public_key] call. The
//! private key is immutable, so a cached public key can never become stale.
//!
//! # Example
//! ```rust
//! use ecdsa_key::{Key, K256};
//!
//! // Import an invalid key (construction still succeeds)
//! let mut key = Key::import(&[0u8; 32]);
//! assert!(!key.verify_key());
//! assert!(!key.calculate_public_key(true));
//! assert!(key.pub_key_data().is_empty());
//! let (signature, ok) = key.sign(&[1u8; 32]);
//! assert!(!ok);
//! assert!(signature.is_empty());
//!
//! // Generate a key backed by the pure-Rust engine
//! let mut key = Key::<K256>::generate();
//! assert!(key.calculate_public_key(false));
//! assert_eq!(key.pub_key_data()[0], 0x04);
//! ```

use crate::{
    engine::{libsecp256k1::Libsecp256k1, Engine},
    hash_array, Error, PublicKey, Signature,
};
use std::fmt::{Debug, Formatter};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

/// secp256k1 private key, its cached public key, and the engine context used to operate
/// on them.
pub struct Key<E: Engine = Libsecp256k1> {
    ctx: E,
    priv_key_data: Zeroizing<Vec<u8>>,
    pub_key_data: Vec<u8>,
}

impl Key {
    /// Generate a new private key using the default engine.
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide randomness.
    pub fn new() -> Self {
        Self::generate()
    }

    /// Import an existing private key using the default engine.
    ///
    /// The bytes are not validated (see [Key::verify_key]).
    pub fn import(priv_key_data: &[u8]) -> Self {
        Self::from_private_key(priv_key_data)
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Key<E> {
    /// Generate a new private key.
    ///
    /// Samples 32 random bytes until the engine accepts them as a scalar in `[1, n-1]`.
    /// The returned key always passes [Key::verify_key].
    ///
    /// # Panics
    ///
    /// Panics if the operating system cannot provide randomness.
    pub fn generate() -> Self {
        let ctx = E::new();
        let mut attempts = 1u32;
        let priv_key_data = loop {
            let mut candidate = ctx.random_bytes();
            if ctx.verify_private_key(&candidate) {
                let data = Zeroizing::new(candidate.to_vec());
                candidate.zeroize();
                break data;
            }
            candidate.zeroize();
            debug!(engine = E::NAME, attempts, "rejected private key sample");
            attempts += 1;
        };
        debug!(engine = E::NAME, attempts, "generated private key");
        Self {
            ctx,
            priv_key_data,
            pub_key_data: Vec::new(),
        }
    }

    /// Import an existing private key.
    ///
    /// The bytes are stored as-is (of any length) so that invalid keys can still be
    /// inspected. Use [Key::verify_key] to check validity.
    pub fn from_private_key(priv_key_data: &[u8]) -> Self {
        debug!(engine = E::NAME, len = priv_key_data.len(), "imported private key");
        Self {
            ctx: E::new(),
            priv_key_data: Zeroizing::new(priv_key_data.to_vec()),
            pub_key_data: Vec::new(),
        }
    }

    /// Get private key data.
    pub fn priv_key_data(&self) -> &[u8] {
        &self.priv_key_data
    }

    /// Get public key data.
    ///
    /// Empty until [Key::calculate_public_key] succeeds.
    pub fn pub_key_data(&self) -> &[u8] {
        &self.pub_key_data
    }

    /// Get the engine context owned by this key.
    pub fn context(&self) -> &E {
        &self.ctx
    }

    /// Returns true if the private key is a valid secp256k1 scalar.
    pub fn verify_key(&self) -> bool {
        self.ctx.verify_private_key(&self.priv_key_data)
    }

    /// Create a standalone compressed public key.
    ///
    /// The cached public key data is not touched.
    pub fn create_pub_key(&self) -> Result<PublicKey, Error> {
        let raw = self.derive(true)?;
        Ok(PublicKey::from_engine(raw))
    }

    /// Derive the public key and cache its serialization (33 bytes if `compressed`,
    /// 65 bytes otherwise), replacing any previously cached value.
    ///
    /// Returns false (and clears the cache) if the private key is invalid.
    pub fn calculate_public_key(&mut self, compressed: bool) -> bool {
        match self.derive(compressed) {
            Ok(raw) => {
                self.pub_key_data = raw;
                true
            }
            Err(_) => {
                self.pub_key_data.clear();
                false
            }
        }
    }

    /// Sign a 32-byte hash.
    ///
    /// Returns the 65-byte recoverable signature (`R || S || V`) and true, or an empty
    /// signature and false if the private key is invalid or `hash` is not 32 bytes.
    pub fn sign(&self, hash: &[u8]) -> (Vec<u8>, bool) {
        match self.try_sign(hash) {
            Ok(signature) => (signature.to_vec(), true),
            Err(_) => (Vec::new(), false),
        }
    }

    /// Sign a 32-byte hash, returning a typed [Signature].
    ///
    /// The hash is signed as-is (it is never hashed again). The nonce is derived
    /// deterministically, so signing the same hash twice yields identical signatures.
    pub fn try_sign(&self, hash: &[u8]) -> Result<Signature, Error> {
        let hash = hash_array(hash)?;
        self.ctx
            .sign(hash, &self.priv_key_data)
            .inspect_err(|err| {
                warn!(
                    engine = E::NAME,
                    len = self.priv_key_data.len(),
                    ?err,
                    "failed to sign"
                )
            })
    }

    fn derive(&self, compressed: bool) -> Result<Vec<u8>, Error> {
        self.ctx
            .derive_public_key(&self.priv_key_data, compressed)
            .inspect_err(|err| {
                warn!(
                    engine = E::NAME,
                    len = self.priv_key_data.len(),
                    ?err,
                    "failed to derive public key"
                )
            })
    }
}

impl<E: Engine> Clone for Key<E> {
    /// Copies the key material into a new key with its own engine context.
    fn clone(&self) -> Self {
        Self {
            ctx: E::new(),
            priv_key_data: self.priv_key_data.clone(),
            pub_key_data: self.pub_key_data.clone(),
        }
    }
}

impl<E: Engine> Debug for Key<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("engine", &E::NAME)
            .field("priv_key_data", &"[REDACTED]")
            .field("pub_key_data", &commonware_utils::hex(&self.pub_key_data))
            .finish()
    }
}
