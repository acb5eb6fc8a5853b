use blake2::Blake2b;
use generic_array::typenum::U64;
use generic_array::{ArrayLength, GenericArray};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use zeroize::Zeroize;

pub trait Scalar:
    Copy
    + Clone
    + Debug
    + Send
    + Sync
    + Eq
    + Zeroize
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + AddAssign<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
{
    /// Size of the canonical byte encoding.
    type EncodingSize: ArrayLength<u8>;

    fn to_bytes(&self) -> GenericArray<u8, Self::EncodingSize>;

    /// Parse a canonical encoding. Returns `None` for any value outside `[0, q)`.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;

    /// Interpret a block of uniformly random bytes as a scalar candidate.
    ///
    /// The group's bit conventions are applied first; the candidate is only
    /// accepted if the result lies in `[0, q)`. Callers redraw on `None`.
    fn from_uniform_bytes(bytes: &GenericArray<u8, Self::EncodingSize>) -> Option<Self>;

    /// Clamp a 64 byte digest into a long-term exponent and reduce it mod q.
    /// Returns `None` if the reduction lands on zero.
    fn from_clamped_bytes(digest: &GenericArray<u8, U64>) -> Option<Self>;

    /// Reduce the output of a Blake2b transcript into a scalar.
    fn hash_to_scalar(transcript: Blake2b) -> Self;
}

pub trait PrimeGroupElement:
    Copy
    + Clone
    + Debug
    + Send
    + Sync
    + Eq
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<<Self as PrimeGroupElement>::CorrespondingScalar, Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a <Self as PrimeGroupElement>::CorrespondingScalar, Output = Self>
{
    type CorrespondingScalar: Scalar;
    /// Output size of the canonical point encoding. A typenum length rather
    /// than an associated constant, since `[u8; Self::SIZE]` cannot be named in
    /// generic code yet (https://github.com/rust-lang/rust/issues/60551).
    type EncodingSize: ArrayLength<u8>;

    /// First fixed generator, `g1`.
    fn generator() -> Self;

    /// Second fixed generator, `g2`, with unknown discrete log relative to `g1`.
    fn second_generator() -> Self;

    fn zero() -> Self;

    fn from_hash(input: &[u8]) -> Self;

    fn to_bytes(&self) -> GenericArray<u8, Self::EncodingSize>;

    /// Decode a canonical point encoding. Returns `None` if `bytes` has the
    /// wrong length or does not decode to a group element.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;

    /// Validity predicate for untrusted points: in the prime order group and
    /// not the identity.
    fn is_valid(&self) -> bool;

    /// Equality that does not short-circuit on partial matches.
    fn ct_eq(&self, other: &Self) -> bool;

    fn multiscalar_multiplication<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator<Item = Self::CorrespondingScalar>,
        J: IntoIterator<Item = Self>;

    /// Only for public inputs.
    fn vartime_multiscalar_multiplication<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator<Item = Self::CorrespondingScalar>,
        J: IntoIterator<Item = Self>;
}
