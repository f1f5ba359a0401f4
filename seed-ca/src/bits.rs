//! Conversions between integers and octet strings as defined in
//! [RFC 6979 § 2.3].
//!
//! These work on arbitrary-size unsigned integers rather than curve scalars,
//! because the HMAC-DRBG consumes byte strings whose length is derived from
//! the bit length of the group order, not from any native integer width.
//!
//! [RFC 6979 § 2.3]: https://datatracker.ietf.org/doc/html/rfc6979#section-2.3

use crate::{Error, Result};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;

/// Lengths derived from a group order `q`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Lengths {
    /// Bit length of `q`.
    pub qlen: usize,

    /// Byte length of `q`, i.e. `ceil(qlen / 8)`.
    pub rlen: usize,
}

impl Lengths {
    /// Compute `qlen` and `rlen` for the given group order.
    pub fn of(q: &BigUint) -> Self {
        let qlen = bit_len(q);
        Self {
            qlen,
            rlen: qlen.div_ceil(8),
        }
    }
}

/// [RFC 6979 § 2.3.2]: interpret `bytes` as a big endian integer and keep its
/// leftmost `qlen` bits.
///
/// [RFC 6979 § 2.3.2]: https://datatracker.ietf.org/doc/html/rfc6979#section-2.3.2
pub fn bits_to_int(bytes: &[u8], qlen: usize) -> BigUint {
    let v = BigUint::from_bytes_be(bytes);
    let vlen = bytes.len() * 8;

    if vlen > qlen { v >> (vlen - qlen) } else { v }
}

/// [RFC 6979 § 2.3.3]: serialize `v` as exactly `rlen` big endian bytes.
///
/// Returns [`Error::IntegerTooLarge`] rather than truncating when `v` needs
/// more than `rlen` bytes.
///
/// [RFC 6979 § 2.3.3]: https://datatracker.ietf.org/doc/html/rfc6979#section-2.3.3
pub fn int_to_octets(v: &BigUint, rlen: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(rlen);
    int_to_octets_into(v, rlen, &mut out)?;
    Ok(out)
}

/// Like [`int_to_octets`], but appends to an existing buffer.
pub(crate) fn int_to_octets_into(v: &BigUint, rlen: usize, out: &mut Vec<u8>) -> Result<()> {
    if v.is_zero() {
        out.resize(out.len() + rlen, 0);
        return Ok(());
    }

    let bytes = v.to_bytes_be();

    if bytes.len() > rlen {
        return Err(Error::IntegerTooLarge {
            bits: v.bits(),
            len: rlen,
        });
    }

    out.resize(out.len() + rlen - bytes.len(), 0);
    out.extend_from_slice(&bytes);
    Ok(())
}

/// [RFC 6979 § 2.3.4]: `bits_to_int`, reduced below `q` by one conditional
/// subtraction, then `int_to_octets`.
///
/// The input is always below `2q` once truncated to `qlen` bits, so a single
/// subtraction is a full reduction.
///
/// [RFC 6979 § 2.3.4]: https://datatracker.ietf.org/doc/html/rfc6979#section-2.3.4
pub fn bits_to_octets(bytes: &[u8], q: &BigUint, qlen: usize, rlen: usize) -> Result<Vec<u8>> {
    let z1 = bits_to_int(bytes, qlen);

    if &z1 >= q {
        int_to_octets(&(z1 - q), rlen)
    } else {
        int_to_octets(&z1, rlen)
    }
}

/// Map a message digest to the integer `e` used in the signing equation.
///
/// The digest is cut to `ceil(order_bits / 8)` bytes and then shifted right
/// so that at most `order_bits` bits remain. The result is not reduced
/// modulo the order.
pub fn hash_to_int(hash: &[u8], order_bits: usize) -> BigUint {
    let order_bytes = order_bits.div_ceil(8);
    let hash = &hash[..hash.len().min(order_bytes)];

    let ret = BigUint::from_bytes_be(hash);
    let excess = (hash.len() * 8).saturating_sub(order_bits);

    if excess > 0 { ret >> excess } else { ret }
}

/// Bit length of `v` as a `usize`.
pub(crate) fn bit_len(v: &BigUint) -> usize {
    // Bit lengths of curve orders are tiny; saturate rather than truncate.
    usize::try_from(v.bits()).unwrap_or(usize::MAX)
}
