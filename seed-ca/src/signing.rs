//! Deterministic ECDSA signing ([RFC 6979 § 2.4] with nonces from § 3.2).
//!
//! ## Algorithm
//!
//! ```text
//! 1: draw the next nonce candidate k from the HMAC-DRBG
//! 2: reject k unless 1 <= k < n
//! 3: compute R = k×G and r = R.x mod n, reject if r = 0
//! 4: compute e = hash_to_int(h) and s = k⁻¹ (e + x r) mod n, reject if s = 0
//! 5: the signature is (r, s)
//! ```
//!
//! Every rejection advances the DRBG; nothing is ever restarted from the seed.
//!
//! [RFC 6979 § 2.4]: https://datatracker.ietf.org/doc/html/rfc6979#section-2.4

use crate::{
    BigUint, Error, GroupArithmetic, HmacDrbg, PrimeCurveGroup, Result, Signature,
    bits::{self, Lengths},
};
use alloc::vec::Vec;
use core::fmt;
use ecdsa_core::hazmat::DigestPrimitive;
use elliptic_curve::CurveArithmetic;
use hmac::digest::{Digest, core_api::BlockSizeUser};
use num_traits::Zero;
use signature::{DigestSigner, Signer, hazmat::PrehashSigner};
use tracing::{debug, trace};

/// Maximum number of nonce candidates drawn for a single signature.
///
/// Rejections are rare for standard curves, so reaching this bound means the
/// curve or hash implementation is broken.
pub const MAX_ATTEMPTS: u32 = 1024;

/// ECDSA signing key: a secret scalar bound to the group it belongs to.
#[derive(Clone)]
pub struct SigningKey<G: GroupArithmetic> {
    group: G,

    /// Group order `n`.
    order: BigUint,

    /// Secret scalar `x` in `[1, n-1]`.
    secret_scalar: BigUint,
}

impl<G: GroupArithmetic> SigningKey<G> {
    /// Create a signing key from a secret scalar in `[1, n-1]`.
    pub fn new(group: G, secret_scalar: BigUint) -> Result<Self> {
        let order = group.order();

        if secret_scalar.is_zero() || secret_scalar >= order {
            return Err(Error::InvalidSecretScalar);
        }

        Ok(Self {
            group,
            order,
            secret_scalar,
        })
    }

    /// Parse a signing key from a big endian byte slice.
    pub fn from_slice(group: G, bytes: &[u8]) -> Result<Self> {
        Self::new(group, BigUint::from_bytes_be(bytes))
    }

    /// Borrow the group this key belongs to.
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Borrow the secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_secret_scalar(&self) -> &BigUint {
        &self.secret_scalar
    }

    /// Serialize the secret scalar as `ceil(qlen / 8)` big endian bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bits::int_to_octets(&self.secret_scalar, Lengths::of(&self.order).rlen)
    }

    /// Sign the prehashed message digest `prehash`.
    ///
    /// `D` is the hash function instantiating the HMAC-DRBG; normally the
    /// same function that produced `prehash`.
    pub fn sign_prehash<D>(&self, prehash: &[u8]) -> Result<Signature>
    where
        D: Digest + BlockSizeUser,
    {
        let Lengths { qlen, .. } = Lengths::of(&self.order);
        let n = &self.order;
        let x = &self.secret_scalar;
        let e = bits::hash_to_int(prehash, qlen);

        let mut nonces = HmacDrbg::<D>::new(x, prehash, n)?;

        for attempt in 1..=MAX_ATTEMPTS {
            let Some(k) = nonces.next() else { break };

            if k.is_zero() || &k >= n {
                trace!(attempt, "nonce candidate out of range; retrying");
                continue;
            }

            let r = self.group.mul_generator_x(&k)? % n;

            if r.is_zero() {
                trace!(attempt, "r is zero; retrying");
                continue;
            }

            let s = self.group.sign_equation(&k, &e, x, &r)?;

            if s.is_zero() {
                trace!(attempt, "s is zero; retrying");
                continue;
            }

            return Signature::from_scalars(r, s);
        }

        debug!(attempts = MAX_ATTEMPTS, qlen, "nonce search exhausted");
        Err(Error::Exhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Hash `msg` with `D` and sign the resulting digest.
    pub fn sign_digest<D>(&self, msg: &[u8]) -> Result<Signature>
    where
        D: Digest + BlockSizeUser,
    {
        self.sign_prehash::<D>(&D::digest(msg))
    }

    /// Sign `prehash` and serialize the signature as ASN.1 DER.
    pub fn sign_prehash_der<D>(&self, prehash: &[u8]) -> Result<Vec<u8>>
    where
        D: Digest + BlockSizeUser,
    {
        self.sign_prehash::<D>(prehash)?.to_der()
    }
}

//
// `*Signer` trait impls
//

impl<G, D> DigestSigner<D, Signature> for SigningKey<G>
where
    G: GroupArithmetic,
    D: Digest + BlockSizeUser,
{
    fn try_sign_digest(&self, digest: D) -> signature::Result<Signature> {
        Ok(self.sign_prehash::<D>(&digest.finalize())?)
    }
}

impl<C> PrehashSigner<Signature> for SigningKey<PrimeCurveGroup<C>>
where
    C: CurveArithmetic + DigestPrimitive,
{
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_prehash::<C::Digest>(prehash)?)
    }
}

impl<C> Signer<Signature> for SigningKey<PrimeCurveGroup<C>>
where
    C: CurveArithmetic + DigestPrimitive,
{
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_digest::<C::Digest>(msg)?)
    }
}

//
// Other trait impls
//

impl<G: GroupArithmetic + fmt::Debug> fmt::Debug for SigningKey<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Deterministically sign `prehash` with the secret scalar `x` in `group`.
pub fn sign<G, D>(group: G, x: &BigUint, prehash: &[u8]) -> Result<Signature>
where
    G: GroupArithmetic,
    D: Digest + BlockSizeUser,
{
    SigningKey::new(group, x.clone())?.sign_prehash::<D>(prehash)
}
