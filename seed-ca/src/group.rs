//! Prime-order group operations consumed by the signer.

use crate::{BigUint, Error, Result, bits};
use core::{fmt, marker::PhantomData};
use elliptic_curve::{
    CurveArithmetic, FieldBytes, FieldBytesEncoding, PrimeCurve,
    ff::PrimeField,
    generic_array::typenum::Unsigned,
    group::{Curve as _, Group},
    ops::Invert,
    point::AffineCoordinates,
};
use zeroize::Zeroize;

/// Scalar arithmetic and base point multiplication in a prime-order group.
///
/// Integers cross this boundary as [`BigUint`] values, which keeps the
/// signer independent of any particular scalar representation.
pub trait GroupArithmetic {
    /// Group order `n`.
    fn order(&self) -> BigUint;

    /// Compute `k×G` and return its affine `x`-coordinate as an integer.
    ///
    /// `k` is always in `[1, n-1]`.
    fn mul_generator_x(&self, k: &BigUint) -> Result<BigUint>;

    /// Compute `k⁻¹ mod n`.
    ///
    /// `k` is always in `[1, n-1]`.
    fn invert(&self, k: &BigUint) -> Result<BigUint>;

    /// Evaluate the signing equation `s = k⁻¹ (e + x r) mod n`.
    ///
    /// `k`, `x` and `r` are in `[1, n-1]`; `e` may exceed `n`. The default
    /// computes in [`BigUint`], which is not constant-time. Backends with
    /// their own scalar type should override it.
    fn sign_equation(
        &self,
        k: &BigUint,
        e: &BigUint,
        x: &BigUint,
        r: &BigUint,
    ) -> Result<BigUint> {
        let n = self.order();
        let k_inverse = self.invert(k)?;
        Ok((k_inverse * ((e + x * r) % &n)) % n)
    }
}

impl<G: GroupArithmetic + ?Sized> GroupArithmetic for &G {
    fn order(&self) -> BigUint {
        G::order(self)
    }

    fn mul_generator_x(&self, k: &BigUint) -> Result<BigUint> {
        G::mul_generator_x(self, k)
    }

    fn invert(&self, k: &BigUint) -> Result<BigUint> {
        G::invert(self, k)
    }

    fn sign_equation(
        &self,
        k: &BigUint,
        e: &BigUint,
        x: &BigUint,
        r: &BigUint,
    ) -> Result<BigUint> {
        G::sign_equation(self, k, e, x, r)
    }
}

/// [`GroupArithmetic`] backed by a RustCrypto elliptic curve implementation
/// such as `p256::NistP256` or `p521::NistP521`.
pub struct PrimeCurveGroup<C> {
    curve: PhantomData<C>,
}

impl<C> PrimeCurveGroup<C>
where
    C: CurveArithmetic + PrimeCurve,
{
    /// Create a new group handle.
    pub fn new() -> Self {
        Self { curve: PhantomData }
    }

    /// Convert an integer in `[0, n-1]` into a curve scalar.
    fn scalar(k: &BigUint) -> Result<C::Scalar> {
        let bytes = bits::int_to_octets(k, C::FieldBytesSize::USIZE)?;
        let repr = FieldBytes::<C>::clone_from_slice(&bytes);
        Option::from(<C::Scalar as PrimeField>::from_repr(repr)).ok_or(Error::InvalidScalar)
    }
}

impl<C> GroupArithmetic for PrimeCurveGroup<C>
where
    C: CurveArithmetic + PrimeCurve,
{
    fn order(&self) -> BigUint {
        BigUint::from_bytes_be(&FieldBytesEncoding::<C>::encode_field_bytes(&C::ORDER))
    }

    fn mul_generator_x(&self, k: &BigUint) -> Result<BigUint> {
        let k = Self::scalar(k)?;
        let point = (C::ProjectivePoint::generator() * k).to_affine();
        Ok(BigUint::from_bytes_be(point.x().as_ref()))
    }

    fn invert(&self, k: &BigUint) -> Result<BigUint> {
        let k = Self::scalar(k)?;
        let k_inverse: C::Scalar =
            Option::from(<C::Scalar as Invert>::invert(&k)).ok_or(Error::InvalidScalar)?;
        Ok(BigUint::from_bytes_be(&k_inverse.to_repr()))
    }

    fn sign_equation(
        &self,
        k: &BigUint,
        e: &BigUint,
        x: &BigUint,
        r: &BigUint,
    ) -> Result<BigUint> {
        let k = Self::scalar(k)?;
        let e = Self::scalar(&(e % self.order()))?;
        let x = Self::scalar(x)?;
        let r = Self::scalar(r)?;

        let k_inverse: C::Scalar =
            Option::from(<C::Scalar as Invert>::invert(&k)).ok_or(Error::InvalidScalar)?;
        let mut s = k_inverse * (e + x * r);

        let mut repr = s.to_repr();
        let out = BigUint::from_bytes_be(&repr);
        repr.as_mut_slice().zeroize();
        s.zeroize();
        Ok(out)
    }
}

impl<C> Clone for PrimeCurveGroup<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for PrimeCurveGroup<C> {}

impl<C> Default for PrimeCurveGroup<C>
where
    C: CurveArithmetic + PrimeCurve,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug + Default> fmt::Debug for PrimeCurveGroup<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrimeCurveGroup").field(&C::default()).finish()
    }
}
