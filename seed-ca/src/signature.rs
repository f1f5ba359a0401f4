//! ECDSA signature values.

use crate::{BigUint, Error, Result, bits};
use alloc::vec::Vec;
use core::fmt;
use der::{Encode, Header, Tag, asn1::UintRef};
use num_traits::Zero;

/// ECDSA signature `(r, s)`.
///
/// Equality compares the integer values of both components, so signatures
/// that differ only in the padding of some upstream encoding compare equal.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Create a signature from its components.
    ///
    /// Both must be non-zero. Neither is checked against a group order.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        if r.is_zero() || s.is_zero() {
            return Err(Error::InvalidSignature);
        }

        Ok(Self { r, s })
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Split the signature into its `r` and `s` components.
    pub fn split(self) -> (BigUint, BigUint) {
        (self.r, self.s)
    }

    /// Serialize as ASN.1 DER: `SEQUENCE { r INTEGER, s INTEGER }`.
    ///
    /// This is the encoding used by X.509, PKIX and most ECDSA verifiers.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let r_bytes = self.r.to_bytes_be();
        let s_bytes = self.s.to_bytes_be();
        let r = UintRef::new(&r_bytes)?;
        let s = UintRef::new(&s_bytes)?;

        let header = Header::new(Tag::Sequence, (r.encoded_len()? + s.encoded_len()?)?)?;

        let mut out = Vec::new();
        header.encode_to_vec(&mut out)?;
        r.encode_to_vec(&mut out)?;
        s.encode_to_vec(&mut out)?;
        Ok(out)
    }

    /// Serialize as the fixed-width concatenation `r || s`, each component
    /// padded to `len` bytes.
    pub fn to_fixed_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len * 2);
        bits::int_to_octets_into(&self.r, len, &mut out)?;
        bits::int_to_octets_into(&self.s, len, &mut out)?;
        Ok(out)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seed_ca::Signature(r: {:X}, s: {:X})", self.r, self.s)
    }
}
