//! Dual Receiver Encryption.
//!
//! A plaintext point is encrypted under two Cramer-Shoup public keys at once,
//! and a non-interactive proof shows that both halves carry the same
//! plaintext. Either receiver can open its own half with `dr_dec`; anyone
//! holding both public keys can check cross-receiver consistency with
//! `is_valid`.
//!
//! Framing of `DrMessage` on the wire is left to the embedding protocol.
use crate::cryptography::cramer_shoup::{encode_message, CramerShoupCiphertext, PublicKey, SecretKey};
use crate::errors::DreError;
use crate::traits::PrimeGroupElement;
use crate::utils::random::rand_scalar;
use rand_core::{CryptoRng, RngCore};
use std::convert::TryFrom;
use tracing::debug;
use zeroize::Zeroize;

mod nizk;

pub use nizk::{gen_nizkpk, is_valid, NizkProof};

/// Which half of a `DrCipher` a secret key is meant to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Slot 1, encrypted under `pubA`.
    A,
    /// Slot 2, encrypted under `pubB`.
    B,
}

impl TryFrom<u8> for Slot {
    type Error = DreError;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        match slot {
            1 => Ok(Slot::A),
            2 => Ok(Slot::B),
            other => Err(DreError::InvalidSlot(other)),
        }
    }
}

/// Two parallel Cramer-Shoup ciphertexts of the same plaintext,
/// `(u11, u21, e1, v1)` under `pubA` and `(u12, u22, e2, v2)` under `pubB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrCipher<G: PrimeGroupElement> {
    first: CramerShoupCiphertext<G>,
    second: CramerShoupCiphertext<G>,
}

impl<G: PrimeGroupElement> DrCipher<G> {
    pub fn from_halves(first: CramerShoupCiphertext<G>, second: CramerShoupCiphertext<G>) -> Self {
        DrCipher { first, second }
    }

    /// Rebuild a cipher from its elements in the order returned by
    /// `elements`.
    pub fn from_elements(elements: [G; 8]) -> Self {
        let [u11, u21, e1, v1, u12, u22, e2, v2] = elements;
        DrCipher {
            first: CramerShoupCiphertext { u1: u11, u2: u21, e: e1, v: v1 },
            second: CramerShoupCiphertext { u1: u12, u2: u22, e: e2, v: v2 },
        }
    }

    /// `[u11, u21, e1, v1, u12, u22, e2, v2]`
    pub fn elements(&self) -> [G; 8] {
        [
            self.first.u1,
            self.first.u2,
            self.first.e,
            self.first.v,
            self.second.u1,
            self.second.u2,
            self.second.e,
            self.second.v,
        ]
    }

    pub fn half(&self, slot: Slot) -> &CramerShoupCiphertext<G> {
        match slot {
            Slot::A => &self.first,
            Slot::B => &self.second,
        }
    }
}

/// The unit exchanged between parties: the dual cipher and its consistency
/// proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrMessage<G: PrimeGroupElement> {
    cipher: DrCipher<G>,
    proof: NizkProof<G>,
}

impl<G: PrimeGroupElement> DrMessage<G> {
    /// Reassemble a message received from a peer. Nothing is checked here;
    /// use `verify` and `dr_dec`.
    pub fn from_parts(cipher: DrCipher<G>, proof: NizkProof<G>) -> Self {
        DrMessage { cipher, proof }
    }

    pub fn cipher(&self) -> &DrCipher<G> {
        &self.cipher
    }

    pub fn proof(&self) -> &NizkProof<G> {
        &self.proof
    }

    /// Check that both halves carry the same plaintext.
    pub fn verify(&self, pub_a: &PublicKey<G>, pub_b: &PublicKey<G>) -> Result<(), DreError> {
        self.proof.verify(&self.cipher, pub_a, pub_b)
    }
}

/// Encrypt `message` for both `pub_a` and `pub_b` and attach a proof that the
/// two halves are consistent.
///
/// Entropy is drawn in a fixed order: `k1`, `k2`, then the two proof nonces.
/// Keys and message are checked before anything is drawn.
pub fn dr_enc<G, R>(
    message: &[u8],
    rng: &mut R,
    pub_a: &PublicKey<G>,
    pub_b: &PublicKey<G>,
) -> Result<DrMessage<G>, DreError>
where
    G: PrimeGroupElement,
    R: RngCore + CryptoRng,
{
    pub_a.validate()?;
    pub_b.validate()?;
    let m = encode_message::<G>(message)?;

    let mut k1 = rand_scalar::<G::CorrespondingScalar, _>(rng)?;
    let mut k2 = match rand_scalar::<G::CorrespondingScalar, _>(rng) {
        Ok(k2) => k2,
        Err(e) => {
            k1.zeroize();
            return Err(e);
        }
    };

    let first = pub_a.encrypt_point_with_k(&m, &k1);
    let second = pub_b.encrypt_point_with_k(&m, &k2);
    let cipher = DrCipher::from_halves(first, second);
    let proof = gen_nizkpk(
        rng,
        &cipher,
        pub_a,
        pub_b,
        &first.challenge(),
        &second.challenge(),
        &k1,
        &k2,
    );
    k1.zeroize();
    k2.zeroize();

    Ok(DrMessage {
        cipher,
        proof: proof?,
    })
}

/// Open the half of `message` selected by `slot` (1 for `pub_a`, 2 for
/// `pub_b`) with `secret_key`.
///
/// Only the tag of the chosen half is checked. Success does not show that
/// the other half carries the same plaintext; use `DrMessage::verify` for
/// that.
pub fn dr_dec<G: PrimeGroupElement>(
    message: &DrMessage<G>,
    pub_a: &PublicKey<G>,
    pub_b: &PublicKey<G>,
    secret_key: &SecretKey<G>,
    slot: u8,
) -> Result<Vec<u8>, DreError> {
    let slot = Slot::try_from(slot)?;
    pub_a.validate()?;
    pub_b.validate()?;

    secret_key.decrypt(message.cipher.half(slot)).map_err(|e| {
        debug!(?slot, "dual receiver decryption rejected");
        e
    })
}

/// Cramer-Shoup tag check of one cipher half against `secret_key`, with the
/// half's hash passed in as `challenge`.
pub fn verify_dr_message<G: PrimeGroupElement>(
    u1: &G,
    u2: &G,
    v: &G,
    challenge: &G::CorrespondingScalar,
    secret_key: &SecretKey<G>,
) -> Result<(), DreError> {
    secret_key.verify_tag(u1, u2, v, challenge)
}
