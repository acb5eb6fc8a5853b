use crate::cryptography::cramer_shoup::PublicKey;
use crate::dre::DrCipher;
use crate::traits::{PrimeGroupElement, Scalar};
use blake2::{Blake2b, Digest};

const HALF_CIPHERTEXT_LABEL: &[u8] = b"dre/cramer-shoup";
const NIZKPK_LABEL: &[u8] = b"dre/nizkpk";

/// Fiat-Shamir transcript. Every challenge in the crate is a Blake2b hash of a
/// domain separation label followed by the encodings of the statement and,
/// for the consistency proof, the announcements.
pub struct ChallengeContext(Blake2b);

impl ChallengeContext {
    fn labelled(label: &[u8]) -> Self {
        let mut ctx = Blake2b::new();
        ctx.update(label);
        ChallengeContext(ctx)
    }

    fn append_point<G: PrimeGroupElement>(&mut self, point: &G) {
        self.0.update(&point.to_bytes());
    }

    fn append_scalar<S: Scalar>(&mut self, scalar: &S) {
        self.0.update(&scalar.to_bytes());
    }

    fn append_public_key<G: PrimeGroupElement>(&mut self, pk: &PublicKey<G>) {
        self.append_point(&pk.c);
        self.append_point(&pk.d);
        self.append_point(&pk.h);
    }

    /// The Cramer-Shoup hash `alpha = H(u1, u2, e)` binding a half ciphertext
    /// to its integrity tag.
    pub(crate) fn half_ciphertext<G: PrimeGroupElement>(
        u1: &G,
        u2: &G,
        e: &G,
    ) -> G::CorrespondingScalar {
        let mut ctx = Self::labelled(HALF_CIPHERTEXT_LABEL);
        ctx.append_point(u1);
        ctx.append_point(u2);
        ctx.append_point(e);
        <G::CorrespondingScalar as Scalar>::hash_to_scalar(ctx.0)
    }

    /// Initialise the consistency proof context with the full statement: both
    /// generators, both public keys, the eight cipher elements and the two
    /// half ciphertext hashes.
    pub(crate) fn nizkpk<G: PrimeGroupElement>(
        pub_a: &PublicKey<G>,
        pub_b: &PublicKey<G>,
        cipher: &DrCipher<G>,
        alpha1: &G::CorrespondingScalar,
        alpha2: &G::CorrespondingScalar,
    ) -> Self {
        let mut ctx = Self::labelled(NIZKPK_LABEL);
        ctx.append_point(&G::generator());
        ctx.append_point(&G::second_generator());
        ctx.append_public_key(pub_a);
        ctx.append_public_key(pub_b);
        for element in cipher.elements().iter() {
            ctx.append_point(element);
        }
        ctx.append_scalar(alpha1);
        ctx.append_scalar(alpha2);
        ctx
    }

    /// Generation of the challenge, once the announcements are "sent".
    pub(crate) fn challenge<G: PrimeGroupElement>(
        mut self,
        announcements: &[G],
    ) -> G::CorrespondingScalar {
        for announcement in announcements {
            self.append_point(announcement);
        }
        <G::CorrespondingScalar as Scalar>::hash_to_scalar(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::ristretto::RistrettoPoint;
    use curve25519_dalek::scalar::Scalar as RScalar;

    #[test]
    fn half_ciphertext_hash_is_order_sensitive() {
        let a = <RistrettoPoint as PrimeGroupElement>::from_hash(b"a");
        let b = <RistrettoPoint as PrimeGroupElement>::from_hash(b"b");
        let c = <RistrettoPoint as PrimeGroupElement>::from_hash(b"c");

        let alpha: RScalar = ChallengeContext::half_ciphertext(&a, &b, &c);
        assert_eq!(alpha, ChallengeContext::half_ciphertext(&a, &b, &c));
        assert_ne!(alpha, ChallengeContext::half_ciphertext(&b, &a, &c));
    }

    #[test]
    fn labels_separate_domains() {
        let a = <RistrettoPoint as PrimeGroupElement>::from_hash(b"a");

        let mut plain = Blake2b::new();
        plain.update(&PrimeGroupElement::to_bytes(&a));
        let undomained = RScalar::from_hash(plain);

        let labelled: RScalar = ChallengeContext::labelled(NIZKPK_LABEL).challenge(&[a]);
        assert_ne!(undomained, labelled);
    }
}
