//! Cramer-Shoup cryptosystem over a prime order group with two independent
//! generators `g1`, `g2`. Each half of a `DrCipher` is one of these
//! ciphertexts.
//!
//! Keys:
//! `C = g1^x1 * g2^x2`, `D = g1^y1 * g2^y2`, `H = g1^z`.
//!
//! Encryption of a plaintext point `m` with randomness `k`:
//! `u1 = g1^k`, `u2 = g2^k`, `e = H^k * m`, `v = (C * D^alpha)^k`
//! where `alpha = Hash(u1, u2, e)`.
use crate::cryptography::challenge_context::ChallengeContext;
use crate::errors::DreError;
use crate::traits::PrimeGroupElement;
use crate::utils::random::{rand_long_term_scalar, rand_scalar};
use generic_array::typenum::Unsigned;
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// Cramer-Shoup public key.
pub struct PublicKey<G: PrimeGroupElement> {
    pub c: G,
    pub d: G,
    pub h: G,
}

#[derive(Clone)]
/// Cramer-Shoup secret key. Zeroized on drop.
pub struct SecretKey<G: PrimeGroupElement> {
    pub x1: G::CorrespondingScalar,
    pub x2: G::CorrespondingScalar,
    pub y1: G::CorrespondingScalar,
    pub y2: G::CorrespondingScalar,
    pub z: G::CorrespondingScalar,
}

#[derive(Clone)]
/// Cramer-Shoup keypair
pub struct KeyPair<G: PrimeGroupElement> {
    pub secret_key: SecretKey<G>,
    pub public_key: PublicKey<G>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// A single integrity-checked ciphertext `(u1, u2, e, v)`.
pub struct CramerShoupCiphertext<G: PrimeGroupElement> {
    pub u1: G,
    pub u2: G,
    pub e: G,
    pub v: G,
}

/// Map a plaintext onto the unique point it encodes. Only canonical point
/// encodings are accepted, which keeps `encode_message` / `decode_message`
/// a bijection.
pub(crate) fn encode_message<G: PrimeGroupElement>(message: &[u8]) -> Result<G, DreError> {
    if message.len() != G::EncodingSize::USIZE {
        return Err(DreError::EncodingError);
    }
    G::from_bytes(message).ok_or(DreError::EncodingError)
}

pub(crate) fn decode_message<G: PrimeGroupElement>(point: &G) -> Vec<u8> {
    point.to_bytes().to_vec()
}

impl<G: PrimeGroupElement> PublicKey<G> {
    /// Reject keys with any component outside the prime order group or equal
    /// to the identity.
    pub fn validate(&self) -> Result<(), DreError> {
        if self.c.is_valid() && self.d.is_valid() && self.h.is_valid() {
            Ok(())
        } else {
            debug!("public key failed the group validity check");
            Err(DreError::InvalidKey)
        }
    }

    /// Concatenated encodings of `C`, `D` and `H`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(3 * G::EncodingSize::USIZE);
        bytes.extend_from_slice(&self.c.to_bytes());
        bytes.extend_from_slice(&self.d.to_bytes());
        bytes.extend_from_slice(&self.h.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DreError> {
        let size = G::EncodingSize::USIZE;
        if bytes.len() != 3 * size {
            return Err(DreError::InvalidKey);
        }
        let point = |i: usize| G::from_bytes(&bytes[i * size..(i + 1) * size]);
        match (point(0), point(1), point(2)) {
            (Some(c), Some(d), Some(h)) => {
                let pk = PublicKey { c, d, h };
                pk.validate()?;
                Ok(pk)
            }
            _ => {
                debug!("public key encoding does not decode to group elements");
                Err(DreError::InvalidKey)
            }
        }
    }

    // Given a `message` represented as a group element, and the encryption
    // randomness `k`, return the corresponding ciphertext. Callers keep `k`
    // when it is a witness for a proof.
    pub(crate) fn encrypt_point_with_k(
        &self,
        message: &G,
        k: &G::CorrespondingScalar,
    ) -> CramerShoupCiphertext<G> {
        let u1 = G::generator() * k;
        let u2 = G::second_generator() * k;
        let e = (self.h * k) + message;
        let alpha = ChallengeContext::half_ciphertext(&u1, &u2, &e);
        let v = (self.c + self.d * alpha) * k;
        CramerShoupCiphertext { u1, u2, e, v }
    }

    /// Encrypt a `message` for this key alone. The message must be a
    /// canonical group element encoding.
    pub fn encrypt<R>(&self, message: &[u8], rng: &mut R) -> Result<CramerShoupCiphertext<G>, DreError>
    where
        R: RngCore + CryptoRng,
    {
        self.validate()?;
        let m = encode_message::<G>(message)?;
        let mut k = rand_scalar::<G::CorrespondingScalar, _>(rng)?;
        let cipher = self.encrypt_point_with_k(&m, &k);
        k.zeroize();
        Ok(cipher)
    }
}

impl<G: PrimeGroupElement> SecretKey<G> {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, DreError> {
        Ok(SecretKey {
            x1: rand_long_term_scalar(rng)?,
            x2: rand_long_term_scalar(rng)?,
            y1: rand_long_term_scalar(rng)?,
            y2: rand_long_term_scalar(rng)?,
            z: rand_long_term_scalar(rng)?,
        })
    }

    pub fn to_public(&self) -> PublicKey<G> {
        let g1 = G::generator();
        let g2 = G::second_generator();
        PublicKey {
            c: G::multiscalar_multiplication(vec![self.x1, self.x2], vec![g1, g2]),
            d: G::multiscalar_multiplication(vec![self.y1, self.y2], vec![g1, g2]),
            h: g1 * self.z,
        }
    }

    /// Integrity gate of the cryptosystem. Recomputes
    /// `u1^(x1 + alpha*y1) * u2^(x2 + alpha*y2)` in one constant time
    /// multiscalar multiplication and compares it against `v` without
    /// short-circuiting.
    pub fn verify_tag(
        &self,
        u1: &G,
        u2: &G,
        v: &G,
        alpha: &G::CorrespondingScalar,
    ) -> Result<(), DreError> {
        let mut exp_1 = self.x1 + *alpha * self.y1;
        let mut exp_2 = self.x2 + *alpha * self.y2;
        let expected = G::multiscalar_multiplication(vec![exp_1, exp_2], vec![*u1, *u2]);
        exp_1.zeroize();
        exp_2.zeroize();

        if expected.ct_eq(v) {
            Ok(())
        } else {
            debug!("cramer-shoup tag check failed");
            Err(DreError::DecryptionFailure)
        }
    }

    /// Unmask `e / u1^z`. Only sound after `verify_tag` passed.
    pub(crate) fn decrypt_point(&self, cipher: &CramerShoupCiphertext<G>) -> G {
        cipher.e - (cipher.u1 * self.z)
    }

    /// Check the tag of `cipher` and recover the plaintext bytes.
    pub fn decrypt(&self, cipher: &CramerShoupCiphertext<G>) -> Result<Vec<u8>, DreError> {
        self.verify_tag(&cipher.u1, &cipher.u2, &cipher.v, &cipher.challenge())?;
        Ok(decode_message(&self.decrypt_point(cipher)))
    }
}

impl<G: PrimeGroupElement> fmt::Debug for SecretKey<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl<G: PrimeGroupElement> Drop for SecretKey<G> {
    fn drop(&mut self) {
        self.x1.zeroize();
        self.x2.zeroize();
        self.y1.zeroize();
        self.y2.zeroize();
        self.z.zeroize();
    }
}

impl<G: PrimeGroupElement> KeyPair<G> {
    pub fn from_secret_key(secret_key: SecretKey<G>) -> Self {
        let public_key = secret_key.to_public();
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Generate a keypair, drawing the five secret exponents as long-term
    /// scalars.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair<G>, DreError> {
        SecretKey::generate(rng).map(Self::from_secret_key)
    }
}

impl<G: PrimeGroupElement> CramerShoupCiphertext<G> {
    /// The hash `alpha = H(u1, u2, e)` this ciphertext's tag is bound to.
    pub fn challenge(&self) -> G::CorrespondingScalar {
        ChallengeContext::half_ciphertext(&self.u1, &self.u2, &self.e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixed_rand::FixedRand;
    use curve25519_dalek::ristretto::RistrettoPoint;
    use curve25519_dalek::scalar::Scalar as RScalar;
    use rand_chacha::ChaCha20Rng;
    use rand_core::{OsRng, SeedableRng};

    fn random_message<R: RngCore + CryptoRng>(rng: &mut R) -> Vec<u8> {
        PrimeGroupElement::to_bytes(&RistrettoPoint::random(rng)).to_vec()
    }

    #[test]
    fn keypair_relations() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let sk = &keypair.secret_key;
        let g1 = RistrettoPoint::generator();
        let g2 = RistrettoPoint::second_generator();

        assert_eq!(keypair.public_key.c, g1 * sk.x1 + g2 * sk.x2);
        assert_eq!(keypair.public_key.d, g1 * sk.y1 + g2 * sk.y2);
        assert_eq!(keypair.public_key.h, g1 * sk.z);
        assert!(keypair.public_key.validate().is_ok());
    }

    #[test]
    fn secret_keys_compare_through_public_keys() {
        let a = KeyPair::<RistrettoPoint>::generate(&mut ChaCha20Rng::from_seed([3u8; 32])).unwrap();
        let b = KeyPair::<RistrettoPoint>::generate(&mut ChaCha20Rng::from_seed([3u8; 32])).unwrap();

        assert_eq!(a.secret_key.to_public(), b.secret_key.to_public());
        assert_eq!(format!("{:?}", a.secret_key), "SecretKey(..)");
    }

    #[test]
    fn encrypt_decrypt() {
        let mut rng = OsRng;

        for _ in 0..4 {
            let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
            let m = random_message(&mut rng);
            let cipher = keypair.public_key.encrypt(&m, &mut rng).unwrap();
            let r = keypair.secret_key.decrypt(&cipher).unwrap();
            assert_eq!(m, r)
        }
    }

    #[test]
    fn wrong_key_fails_tag_check() {
        let mut rng = OsRng;
        let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let other = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let m = random_message(&mut rng);

        let cipher = keypair.public_key.encrypt(&m, &mut rng).unwrap();
        assert_eq!(
            other.secret_key.decrypt(&cipher),
            Err(DreError::DecryptionFailure)
        );
    }

    #[test]
    fn tampered_ciphertext_fails_tag_check() {
        let mut rng = OsRng;
        let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let m = random_message(&mut rng);
        let cipher = keypair.public_key.encrypt(&m, &mut rng).unwrap();
        let shift = RistrettoPoint::generator();

        let tampered = [
            CramerShoupCiphertext { u1: cipher.u1 + shift, ..cipher },
            CramerShoupCiphertext { u2: cipher.u2 + shift, ..cipher },
            CramerShoupCiphertext { e: cipher.e + shift, ..cipher },
            CramerShoupCiphertext { v: cipher.v + shift, ..cipher },
        ];
        for t in tampered.iter() {
            assert_eq!(
                keypair.secret_key.decrypt(t),
                Err(DreError::DecryptionFailure)
            );
        }
    }

    #[test]
    fn tag_check_uses_given_challenge() {
        let mut rng = OsRng;
        let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let m = random_message(&mut rng);
        let cipher = keypair.public_key.encrypt(&m, &mut rng).unwrap();
        let sk = &keypair.secret_key;

        assert!(sk
            .verify_tag(&cipher.u1, &cipher.u2, &cipher.v, &cipher.challenge())
            .is_ok());
        assert_eq!(
            sk.verify_tag(
                &cipher.u1,
                &cipher.u2,
                &cipher.v,
                &(cipher.challenge() + RScalar::one())
            ),
            Err(DreError::DecryptionFailure)
        );
    }

    #[test]
    fn messages_must_be_canonical_points() {
        assert_eq!(
            encode_message::<RistrettoPoint>(&[0u8; 31]),
            Err(DreError::EncodingError)
        );
        assert_eq!(
            encode_message::<RistrettoPoint>(&[0xff; 32]),
            Err(DreError::EncodingError)
        );

        let mut rng = OsRng;
        let m = random_message(&mut rng);
        let point = encode_message::<RistrettoPoint>(&m).unwrap();
        assert_eq!(decode_message(&point), m);
    }

    #[test]
    fn public_key_encoding() {
        let mut rng = OsRng;
        let keypair = KeyPair::<RistrettoPoint>::generate(&mut rng).unwrap();
        let bytes = keypair.public_key.to_bytes();
        assert_eq!(
            PublicKey::<RistrettoPoint>::from_bytes(&bytes),
            Ok(keypair.public_key)
        );

        assert_eq!(
            PublicKey::<RistrettoPoint>::from_bytes(&[0xff; 96]),
            Err(DreError::InvalidKey)
        );
        assert_eq!(
            PublicKey::<RistrettoPoint>::from_bytes(&[0u8; 96]),
            Err(DreError::InvalidKey)
        );
        assert_eq!(
            PublicKey::<RistrettoPoint>::from_bytes(&bytes[..95]),
            Err(DreError::InvalidKey)
        );
    }

    #[test]
    fn key_generation_needs_entropy() {
        let mut rand = FixedRand::new(&[0u8; 40]);
        assert!(matches!(
            KeyPair::<RistrettoPoint>::generate(&mut rand),
            Err(DreError::EntropyExhausted)
        ));
    }
}
