//! Entropy handling shared by the encryption and proof procedures.
#[cfg(any(test, feature = "test-utils"))]
pub mod fixed_rand;
pub mod random;
