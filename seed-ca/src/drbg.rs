//! HMAC-DRBG nonce generation as described in [RFC 6979 § 3.2].
//!
//! The generator is seeded only from the secret scalar and the message
//! digest, so the candidate sequence is fully reproducible.
//!
//! [RFC 6979 § 3.2]: https://datatracker.ietf.org/doc/html/rfc6979#section-3.2

use crate::{
    Result,
    bits::{self, Lengths},
};
use alloc::vec::Vec;
use hmac::{
    Mac, SimpleHmac,
    digest::{Digest, KeyInit, Output, core_api::BlockSizeUser},
};
use num_bigint::BigUint;
use zeroize::Zeroize;

/// Deterministic generator of nonce candidates for a single signature.
///
/// Implements [`Iterator`] and never ends: the first call to `next` returns
/// the first candidate (steps a-h of RFC 6979 § 3.2), and every subsequent
/// call first updates `K` and `V` as for a rejected candidate and then
/// generates the next one. Callers must discard candidates outside
/// `[1, q-1]`.
pub struct HmacDrbg<D>
where
    D: Digest + BlockSizeUser,
{
    /// HMAC key `K`.
    k: Output<D>,

    /// Chaining value `V`.
    v: Output<D>,

    /// Bit length of the group order.
    qlen: usize,

    /// Whether a candidate has already been produced from this state.
    drawn: bool,
}

impl<D> HmacDrbg<D>
where
    D: Digest + BlockSizeUser,
{
    /// Seed the generator from the secret scalar `x`, the message digest `h`
    /// and the group order `q`.
    pub fn new(x: &BigUint, h: &[u8], q: &BigUint) -> Result<Self> {
        let Lengths { qlen, rlen } = Lengths::of(q);

        let mut seed = Vec::with_capacity(rlen * 2);
        bits::int_to_octets_into(x, rlen, &mut seed)?;
        let mut h1 = bits::bits_to_octets(h, q, qlen, rlen)?;
        seed.extend_from_slice(&h1);
        h1.zeroize();

        let mut drbg = Self {
            k: Output::<D>::default(),
            v: Output::<D>::default(),
            qlen,
            drawn: false,
        };
        drbg.v.iter_mut().for_each(|b| *b = 0x01);

        drbg.k = drbg.mac(&[drbg.v.as_slice(), &[0x00][..], seed.as_slice()]);
        drbg.v = drbg.mac(&[drbg.v.as_slice()]);
        drbg.k = drbg.mac(&[drbg.v.as_slice(), &[0x01][..], seed.as_slice()]);
        drbg.v = drbg.mac(&[drbg.v.as_slice()]);

        seed.zeroize();
        Ok(drbg)
    }

    /// Bit length of the group order this generator was seeded for.
    pub fn qlen(&self) -> usize {
        self.qlen
    }

    /// Compute `HMAC_K(parts[0] || parts[1] || ...)`.
    fn mac(&self, parts: &[&[u8]]) -> Output<D> {
        let mut mac = <SimpleHmac<D> as KeyInit>::new_from_slice(&self.k)
            .expect("HMAC accepts keys of any size");

        for part in parts {
            mac.update(part);
        }

        mac.finalize().into_bytes()
    }

    /// Step h.3: `K = HMAC_K(V || 0x00)`, `V = HMAC_K(V)`.
    fn reject(&mut self) {
        self.k = self.mac(&[self.v.as_slice(), &[0x00][..]]);
        self.v = self.mac(&[self.v.as_slice()]);
    }

    /// Steps h.1-h.2: accumulate `T` until it holds at least `qlen` bits.
    fn candidate(&mut self) -> BigUint {
        let mut t = Vec::new();

        while t.len() * 8 < self.qlen {
            self.v = self.mac(&[self.v.as_slice()]);
            t.extend_from_slice(&self.v);
        }

        let k = bits::bits_to_int(&t, self.qlen);
        t.zeroize();
        k
    }
}

impl<D> Iterator for HmacDrbg<D>
where
    D: Digest + BlockSizeUser,
{
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        if self.drawn {
            self.reject();
        }

        self.drawn = true;
        Some(self.candidate())
    }
}

impl<D> Drop for HmacDrbg<D>
where
    D: Digest + BlockSizeUser,
{
    fn drop(&mut self) {
        self.k.as_mut_slice().zeroize();
        self.v.as_mut_slice().zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::HmacDrbg;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::Num;
    use sha2::{Digest, Sha256, Sha512};

    fn hex_int(s: &str) -> BigUint {
        BigUint::from_str_radix(s, 16).unwrap()
    }

    /// RFC 6979 § A.1.3: the first two candidates exceed `q` and are
    /// rejected, the third is the nonce.
    #[test]
    fn rfc6979_a1_candidate_sequence() {
        let q = hex_int("4000000000000000000020108A2E0CC0D99F8A5EF");
        let x = hex_int("09A4D6792295A7F730FC3F2B49CBC0F62E862272F");
        let h1 = Sha256::digest(b"sample");

        let candidates: alloc::vec::Vec<_> =
            HmacDrbg::<Sha256>::new(&x, &h1, &q).unwrap().take(3).collect();

        assert_eq!(
            candidates[0],
            hex_int("4982D236F3FFC758838CA6F5E9FEA455106AF3B2B")
        );
        assert_eq!(
            candidates[1],
            hex_int("63863C30451DADF4944DF4877B740D4F160A8B6AB")
        );
        assert_eq!(
            candidates[2],
            hex_int("23AF4074C90A02B3FE61D286D5C87F425E6BDD81B")
        );
        assert!(candidates[0] >= q && candidates[1] >= q && candidates[2] < q);
    }

    /// RFC 6979 § A.2.5: P-256 with SHA-256, message "sample".
    #[test]
    fn rfc6979_p256_nonce() {
        let q = hex_int("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551");
        let x = hex_int("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");
        let h1 = Sha256::digest(b"sample");

        let k = HmacDrbg::<Sha256>::new(&x, &h1, &q).unwrap().next().unwrap();
        assert_eq!(
            k,
            BigUint::from_bytes_be(&hex!(
                "A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60"
            ))
        );
    }

    #[test]
    fn sequence_is_reproducible() {
        let q = hex_int("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551");
        let x = BigUint::from(7u8);
        let h = Sha512::digest(b"reproducible");

        let first: alloc::vec::Vec<_> =
            HmacDrbg::<Sha512>::new(&x, &h, &q).unwrap().take(4).collect();
        let second: alloc::vec::Vec<_> =
            HmacDrbg::<Sha512>::new(&x, &h, &q).unwrap().take(4).collect();

        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn candidates_fit_in_qlen_bits() {
        // 521-bit order with a 256-bit hash needs three HMAC blocks per candidate.
        let q = (BigUint::from(1u8) << 521usize) - BigUint::from(1u8);
        let drbg = HmacDrbg::<Sha256>::new(&BigUint::from(1u8), &Sha256::digest(b""), &q).unwrap();
        assert_eq!(drbg.qlen(), 521);

        for k in drbg.take(8) {
            assert!(k.bits() <= 521);
        }
    }
}
