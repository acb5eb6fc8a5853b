//! Non-interactive zero knowledge proof that both halves of a `DrCipher`
//! encrypt the same plaintext.
//!
//! The proof is the following:
//!
//! `NIZK{(g1, g2, pubA, pubB, cipher), (k1, k2):
//!     u1j = g1^kj AND u2j = g2^kj AND vj = (Cj * Dj^alphaj)^kj  for j in {1, 2}
//!     AND e1 / e2 = H1^k1 / H2^k2}`
//!
//! where `alphaj = Hash(u1j, u2j, ej)`. Since `ej = Hj^kj * m`, the last
//! clause is what forces a single plaintext.
//!
//! We store the challenge and the two responses. The verifier recomputes the
//! seven announcements from them and checks that they hash back to the same
//! challenge.
#![allow(clippy::many_single_char_names, clippy::too_many_arguments)]
use super::DrCipher;
use crate::cryptography::challenge_context::ChallengeContext;
use crate::cryptography::cramer_shoup::PublicKey;
use crate::errors::DreError;
use crate::traits::PrimeGroupElement;
use crate::utils::random::rand_scalar;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroize;

/// Proof of plaintext equality across the two halves of a `DrCipher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NizkProof<G: PrimeGroupElement> {
    l: G::CorrespondingScalar,
    n1: G::CorrespondingScalar,
    n2: G::CorrespondingScalar,
}

impl<G: PrimeGroupElement> NizkProof<G> {
    pub fn from_scalars(
        l: G::CorrespondingScalar,
        n1: G::CorrespondingScalar,
        n2: G::CorrespondingScalar,
    ) -> Self {
        NizkProof { l, n1, n2 }
    }

    /// Fiat-Shamir challenge `l`.
    pub fn challenge(&self) -> &G::CorrespondingScalar {
        &self.l
    }

    /// Responses `(n1, n2)`.
    pub fn responses(&self) -> (&G::CorrespondingScalar, &G::CorrespondingScalar) {
        (&self.n1, &self.n2)
    }

    /// Publicly checkable verification: the half ciphertext hashes are
    /// recomputed from `cipher` instead of being supplied by the caller.
    pub fn verify(
        &self,
        cipher: &DrCipher<G>,
        pub_a: &PublicKey<G>,
        pub_b: &PublicKey<G>,
    ) -> Result<(), DreError> {
        let alpha1 = cipher.half(super::Slot::A).challenge();
        let alpha2 = cipher.half(super::Slot::B).challenge();
        is_valid(self, cipher, pub_a, pub_b, &alpha1, &alpha2)
    }

    // Sigma protocol verification identity, `T' = base^n * statement^l`.
    fn announcements(
        &self,
        cipher: &DrCipher<G>,
        pub_a: &PublicKey<G>,
        pub_b: &PublicKey<G>,
        alpha1: &G::CorrespondingScalar,
        alpha2: &G::CorrespondingScalar,
    ) -> [G; 7] {
        let g1 = G::generator();
        let g2 = G::second_generator();
        let [u11, u21, e1, v1, u12, u22, e2, v2] = cipher.elements();
        let (l, n1, n2) = (self.l, self.n1, self.n2);

        let t11 = G::vartime_multiscalar_multiplication(vec![n1, l], vec![g1, u11]);
        let t21 = G::vartime_multiscalar_multiplication(vec![n1, l], vec![g2, u21]);
        let t31 = G::vartime_multiscalar_multiplication(
            vec![n1, *alpha1 * n1, l],
            vec![pub_a.c, pub_a.d, v1],
        );
        let t12 = G::vartime_multiscalar_multiplication(vec![n2, l], vec![g1, u12]);
        let t22 = G::vartime_multiscalar_multiplication(vec![n2, l], vec![g2, u22]);
        let t32 = G::vartime_multiscalar_multiplication(
            vec![n2, *alpha2 * n2, l],
            vec![pub_b.c, pub_b.d, v2],
        );
        let t4 = G::vartime_multiscalar_multiplication(
            vec![n1, -n2, l, -l],
            vec![pub_a.h, pub_b.h, e1, e2],
        );

        [t11, t21, t31, t12, t22, t32, t4]
    }
}

/// Generate the consistency proof for `cipher`.
///
/// `alpha1` and `alpha2` are the hashes of the two halves, `k1` and `k2` the
/// encryption randomness they were built with. The two announcement nonces
/// are drawn from `rng`; a nonce must never be reused across proofs, since
/// two proofs sharing one reveal the witness.
pub fn gen_nizkpk<G, R>(
    rng: &mut R,
    cipher: &DrCipher<G>,
    pub_a: &PublicKey<G>,
    pub_b: &PublicKey<G>,
    alpha1: &G::CorrespondingScalar,
    alpha2: &G::CorrespondingScalar,
    k1: &G::CorrespondingScalar,
    k2: &G::CorrespondingScalar,
) -> Result<NizkProof<G>, DreError>
where
    G: PrimeGroupElement,
    R: RngCore + CryptoRng,
{
    let mut t1 = rand_scalar::<G::CorrespondingScalar, _>(rng)?;
    let mut t2 = match rand_scalar::<G::CorrespondingScalar, _>(rng) {
        Ok(t2) => t2,
        Err(e) => {
            t1.zeroize();
            return Err(e);
        }
    };

    let g1 = G::generator();
    let g2 = G::second_generator();
    let announcements = [
        g1 * t1,
        g2 * t1,
        (pub_a.c + pub_a.d * *alpha1) * t1,
        g1 * t2,
        g2 * t2,
        (pub_b.c + pub_b.d * *alpha2) * t2,
        (pub_a.h * t1) - (pub_b.h * t2),
    ];

    let l = ChallengeContext::nizkpk(pub_a, pub_b, cipher, alpha1, alpha2).challenge(&announcements);
    let n1 = t1 - l * *k1;
    let n2 = t2 - l * *k2;
    t1.zeroize();
    t2.zeroize();

    Ok(NizkProof { l, n1, n2 })
}

/// Verify `proof` against `cipher`, using the supplied half ciphertext hashes
/// `alpha1` and `alpha2`.
///
/// Returns `Ok(())` on acceptance and `DreError::DecryptionFailure` on
/// rejection. Invalid public keys are rejected with `DreError::InvalidKey`
/// before anything else is computed.
pub fn is_valid<G: PrimeGroupElement>(
    proof: &NizkProof<G>,
    cipher: &DrCipher<G>,
    pub_a: &PublicKey<G>,
    pub_b: &PublicKey<G>,
    alpha1: &G::CorrespondingScalar,
    alpha2: &G::CorrespondingScalar,
) -> Result<(), DreError> {
    pub_a.validate()?;
    pub_b.validate()?;

    let announcements = proof.announcements(cipher, pub_a, pub_b, alpha1, alpha2);
    let challenge =
        ChallengeContext::nizkpk(pub_a, pub_b, cipher, alpha1, alpha2).challenge(&announcements);
    // no need for constant time equality because of the hash in challenge()
    if challenge == proof.l {
        Ok(())
    } else {
        debug!("dual receiver consistency proof rejected");
        Err(DreError::DecryptionFailure)
    }
}
