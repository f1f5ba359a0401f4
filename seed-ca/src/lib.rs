#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! use num_bigint::BigUint;
//! use p256::NistP256;
//! use seed_ca::{PrimeCurveGroup, SigningKey};
//! use sha2::{Digest, Sha256};
//!
//! let group = PrimeCurveGroup::<NistP256>::new();
//! let signing_key = SigningKey::new(group, BigUint::from(1u8))?;
//!
//! let digest = Sha256::digest(b"");
//! let signature = signing_key.sign_prehash::<Sha256>(&digest)?;
//!
//! // Signing is deterministic: the same inputs always produce the same bytes.
//! assert_eq!(signature.to_der()?, signing_key.sign_prehash_der::<Sha256>(&digest)?);
//! # Ok::<(), seed_ca::Error>(())
//! ```

extern crate alloc;

pub mod bits;
pub mod drbg;
mod error;
mod group;
#[cfg(feature = "seed")]
pub mod seed;
#[path = "signature.rs"]
mod signature_impl;
mod signing;

pub use crate::{
    drbg::HmacDrbg,
    error::{Error, ErrorKind, Result},
    group::{GroupArithmetic, PrimeCurveGroup},
    signature_impl::Signature,
    signing::{MAX_ATTEMPTS, SigningKey, sign},
};
pub use num_bigint::{self, BigUint};
pub use signature;

#[cfg(feature = "seed")]
pub use crate::seed::SeedParams;
