#![warn(unused, future_incompatible, nonstandard_style, rust_2018_idioms)]
//! Dual Receiver Encryption over a prime order group.
//!
//! One plaintext is encrypted under two Cramer-Shoup public keys, together
//! with a Fiat-Shamir proof that both ciphertexts carry the same plaintext.
//! The entropy source is always an explicit argument, so every procedure is
//! deterministic given a fixed byte stream.
pub mod cryptography;
pub mod dre;
pub mod errors;
mod groups;
pub mod traits;
pub mod utils;

pub use cryptography::cramer_shoup::{CramerShoupCiphertext, KeyPair, PublicKey, SecretKey};
pub use dre::{
    dr_dec, dr_enc, gen_nizkpk, is_valid, verify_dr_message, DrCipher, DrMessage, NizkProof, Slot,
};
pub use errors::DreError;
pub use utils::random::{rand_long_term_scalar, rand_scalar};
