//! Deterministic entropy source for regression tests.
//!
//! `FixedRand` replays a fixed byte stream. Drawing past the end of the
//! stream fails through `try_fill_bytes`, which the sampling utilities
//! report as `DreError::EntropyExhausted`. It is **not** a cryptographic
//! random number generator: the `CryptoRng` marker only lets it stand in for
//! one in tests, and the module is only compiled for tests or with the
//! `test-utils` feature.
use crate::errors::DreError;
use rand_core::{impls, CryptoRng, Error, RngCore};

#[derive(Clone, Debug)]
pub struct FixedRand {
    data: Vec<u8>,
    position: usize,
}

impl FixedRand {
    pub fn new(data: &[u8]) -> Self {
        FixedRand {
            data: data.to_vec(),
            position: 0,
        }
    }

    /// Number of bytes handed out so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl RngCore for FixedRand {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    /// Panics once the stream is exhausted. Use `try_fill_bytes` to observe
    /// exhaustion as an error.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("{}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        if self.remaining() < dest.len() {
            // a short read still advances the stream
            self.position = self.data.len();
            return Err(Error::new(DreError::EntropyExhausted));
        }
        let end = self.position + dest.len();
        dest.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(())
    }
}

impl CryptoRng for FixedRand {}
