//! Recoverable ECDSA signature.
//!
//! A [Signature] is serialized as `R || S || V` (65 bytes), where `V` is the recovery id
//! (`0..=3`) that selects the public key among the candidates derivable from `R`.

use crate::{Error, COMPACT_SIGNATURE_LENGTH, SIGNATURE_LENGTH};
use commonware_utils::hex;
use std::fmt::{Debug, Display};
use std::ops::Deref;

const SCALAR_LENGTH: usize = COMPACT_SIGNATURE_LENGTH / 2;
const MAX_RECOVERY_ID: u8 = 3;

/// Recoverable secp256k1 ECDSA signature.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Signature {
    raw: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// Create a signature from a compact (`R || S`) encoding and a recovery id.
    pub fn new(compact: [u8; COMPACT_SIGNATURE_LENGTH], recovery_id: u8) -> Result<Self, Error> {
        if recovery_id > MAX_RECOVERY_ID {
            return Err(Error::InvalidRecoveryId(recovery_id));
        }
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..COMPACT_SIGNATURE_LENGTH].copy_from_slice(&compact);
        raw[COMPACT_SIGNATURE_LENGTH] = recovery_id;
        Ok(Self { raw })
    }

    /// Returns the compact (`R || S`) encoding.
    pub fn compact(&self) -> &[u8] {
        &self.raw[..COMPACT_SIGNATURE_LENGTH]
    }

    /// Returns the big-endian `R` scalar.
    pub fn r(&self) -> &[u8] {
        &self.raw[..SCALAR_LENGTH]
    }

    /// Returns the big-endian `S` scalar.
    pub fn s(&self) -> &[u8] {
        &self.raw[SCALAR_LENGTH..COMPACT_SIGNATURE_LENGTH]
    }

    /// Returns the recovery id (`V`).
    pub fn recovery_id(&self) -> u8 {
        self.raw[COMPACT_SIGNATURE_LENGTH]
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for Signature {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; SIGNATURE_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidSignatureLength(value.len()))?;
        let mut compact = [0u8; COMPACT_SIGNATURE_LENGTH];
        compact.copy_from_slice(&raw[..COMPACT_SIGNATURE_LENGTH]);
        Self::new(compact, raw[COMPACT_SIGNATURE_LENGTH])
    }
}

impl TryFrom<&Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl From<Signature> for Vec<u8> {
    fn from(signature: Signature) -> Self {
        signature.raw.to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
