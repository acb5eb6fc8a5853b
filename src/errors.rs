use thiserror::Error;

/// Represents an error in Dual Receiver Encryption.
///
/// None of the variants carry scalars, points or plaintext, so they can be
/// logged or returned to a peer as they are.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum DreError {
    /// This error occurs when a public key fails the group validity
    /// predicate, or its encoding cannot be parsed.
    #[error("not a valid public key")]
    InvalidKey,
    /// This error occurs when the entropy source runs out before an
    /// acceptable scalar was drawn. The whole operation must be retried with
    /// a fresh source.
    #[error("cannot source enough entropy")]
    EntropyExhausted,
    /// This error occurs when the tag check or the consistency proof rejects
    /// the ciphertext.
    #[error("cannot decrypt the message")]
    DecryptionFailure,
    /// This error occurs when the plaintext is not exactly one canonical
    /// group element encoding.
    #[error("message cannot be encoded as a group element")]
    EncodingError,
    /// This error occurs when the receiver slot is neither 1 nor 2.
    #[error("invalid receiver slot {0}")]
    InvalidSlot(u8),
}
