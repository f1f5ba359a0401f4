//! Reproducible secret scalars derived from a human-supplied seed.
//!
//! The seed is stretched with Argon2id into a short key-material stream and a
//! secret scalar is drawn from that stream. The same seed and [`SeedParams`]
//! always yield the same signing key, which makes the key recoverable from
//! the seed alone.
//!
//! ## Usage
//!
//! ```
//! use p256::NistP256;
//! use seed_ca::{PrimeCurveGroup, SeedParams, SigningKey};
//! use sha2::Sha256;
//!
//! // The default parameters need 1.5 GiB of memory; use cheap ones here.
//! let params = SeedParams {
//!     m_cost: 64,
//!     t_cost: 1,
//!     p_cost: 1,
//!     ..SeedParams::default()
//! };
//!
//! let group = PrimeCurveGroup::<NistP256>::new();
//! let key = SigningKey::from_seed(group, b"correct horse battery staple", &params)?;
//! let again = SigningKey::from_seed(group, b"correct horse battery staple", &params)?;
//! assert_eq!(key.as_secret_scalar(), again.as_secret_scalar());
//! # Ok::<(), seed_ca::Error>(())
//! ```

use crate::{BigUint, Error, GroupArithmetic, Result, SigningKey, bits};
use alloc::{vec, vec::Vec};
use argon2::{Algorithm, Argon2, Params, Version};
use num_traits::One;
use tracing::debug;
use zeroize::Zeroizing;

/// Salt used by [`SeedParams::default`].
pub const DEFAULT_SALT: &[u8] = b"jcD_:}VIy'_q)$>^@=q&2ywx6";

/// Argon2id parameters for stretching a seed into key material.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeedParams {
    /// Argon2 salt.
    pub salt: Vec<u8>,

    /// Number of passes.
    pub t_cost: u32,

    /// Memory size in KiB.
    pub m_cost: u32,

    /// Degree of parallelism (number of lanes).
    pub p_cost: u32,

    /// Number of key material bytes to produce.
    pub output_len: usize,
}

impl Default for SeedParams {
    /// 2 passes over 1.5 GiB in 4 lanes, producing 73 bytes: enough to draw
    /// a P-521 scalar.
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_vec(),
            t_cost: 2,
            m_cost: 1536 * 1024,
            p_cost: 4,
            output_len: 73,
        }
    }
}

/// Stretch `seed` into `params.output_len` bytes of key material.
pub fn derive_key_material(seed: &[u8], params: &SeedParams) -> Result<Zeroizing<Vec<u8>>> {
    debug!(
        t_cost = params.t_cost,
        m_cost = params.m_cost,
        p_cost = params.p_cost,
        output_len = params.output_len,
        "deriving key material from seed"
    );

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(params.m_cost, params.t_cost, params.p_cost, None)?,
    );

    let mut key_material = Zeroizing::new(vec![0u8; params.output_len]);
    argon2.hash_password_into(seed, &params.salt, &mut key_material)?;
    Ok(key_material)
}

/// Number of stream bytes consumed when drawing a scalar for `order`.
///
/// Eight bytes beyond the order's size keep the bias of the reduction
/// below `2^-64`.
pub fn scalar_stream_len(order: &BigUint) -> usize {
    bits::bit_len(order) / 8 + 8
}

/// Draw a secret scalar in `[1, n-1]` from the start of a byte stream.
///
/// Reads [`scalar_stream_len`] bytes `b` and returns `b mod (n - 1) + 1`.
pub fn secret_scalar_from_stream(stream: &[u8], order: &BigUint) -> Result<BigUint> {
    let needed = scalar_stream_len(order);

    let Some(bytes) = stream.get(..needed) else {
        return Err(Error::InsufficientKeyMaterial {
            needed,
            available: stream.len(),
        });
    };

    if order <= &BigUint::one() {
        return Err(Error::InvalidSecretScalar);
    }

    let b = BigUint::from_bytes_be(bytes);
    Ok(b % (order - BigUint::one()) + BigUint::one())
}

impl<G: GroupArithmetic> SigningKey<G> {
    /// Derive a signing key from `seed`.
    pub fn from_seed(group: G, seed: &[u8], params: &SeedParams) -> Result<Self> {
        let key_material = derive_key_material(seed, params)?;
        let x = secret_scalar_from_stream(&key_material, &group.order())?;
        Self::new(group, x)
    }
}
