use crate::traits::{PrimeGroupElement, Scalar};
use blake2::Blake2b;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar as RScalar;
use curve25519_dalek::traits::{Identity, IsIdentity, MultiscalarMul, VartimeMultiscalarMul};
use generic_array::typenum::{U32, U64};
use generic_array::GenericArray;
use zeroize::Zeroize;

/// Hash input for the second generator. Nobody knows `log_g1(g2)`.
const SECOND_GENERATOR_SEED: &[u8] = b"dre/ristretto255/second-generator";

impl Scalar for RScalar {
    type EncodingSize = U32;

    fn to_bytes(&self) -> GenericArray<u8, U32> {
        GenericArray::from(self.to_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 32 {
            return None;
        }
        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);
        RScalar::from_canonical_bytes(bits)
    }

    fn from_uniform_bytes(bytes: &GenericArray<u8, U32>) -> Option<Self> {
        let mut candidate = [0u8; 32];
        candidate.copy_from_slice(bytes);
        // q is just above 2^252, so a 253 bit candidate is accepted about half the time.
        candidate[31] &= 0x1f;
        let scalar = RScalar::from_canonical_bytes(candidate);
        candidate[..].zeroize();
        scalar
    }

    fn from_clamped_bytes(digest: &GenericArray<u8, U64>) -> Option<Self> {
        let mut clamped = [0u8; 32];
        clamped.copy_from_slice(&digest[..32]);
        clamped[0] &= 248;
        clamped[31] &= 127;
        clamped[31] |= 64;
        let scalar = RScalar::from_bytes_mod_order(clamped);
        clamped[..].zeroize();
        if scalar == RScalar::zero() {
            None
        } else {
            Some(scalar)
        }
    }

    fn hash_to_scalar(transcript: Blake2b) -> Self {
        RScalar::from_hash(transcript)
    }
}

impl PrimeGroupElement for RistrettoPoint {
    type CorrespondingScalar = RScalar;
    type EncodingSize = U32;

    fn generator() -> Self {
        RISTRETTO_BASEPOINT_POINT
    }

    fn second_generator() -> Self {
        RistrettoPoint::hash_from_bytes::<Blake2b>(SECOND_GENERATOR_SEED)
    }

    fn zero() -> Self {
        RistrettoPoint::identity()
    }

    fn from_hash(input: &[u8]) -> Self {
        RistrettoPoint::hash_from_bytes::<Blake2b>(input)
    }

    fn to_bytes(&self) -> GenericArray<u8, U32> {
        GenericArray::from(self.compress().to_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 32 {
            return None;
        }
        CompressedRistretto::from_slice(bytes).decompress()
    }

    fn is_valid(&self) -> bool {
        !self.is_identity()
    }

    fn ct_eq(&self, other: &Self) -> bool {
        subtle::ConstantTimeEq::ct_eq(self, other).into()
    }

    fn multiscalar_multiplication<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator<Item = RScalar>,
        J: IntoIterator<Item = Self>,
    {
        RistrettoPoint::multiscalar_mul(scalars, points)
    }

    fn vartime_multiscalar_multiplication<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator<Item = RScalar>,
        J: IntoIterator<Item = Self>,
    {
        RistrettoPoint::vartime_multiscalar_mul(scalars, points)
    }
}
