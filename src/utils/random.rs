//! Rejection sampling of scalars from a raw entropy stream.
//!
//! Both samplers draw fixed-width blocks and redraw until a block is
//! acceptable. There is no iteration cap: the loop only ends on an accepted
//! scalar or on exhaustion of the source, so the output stays uniform.
use crate::errors::DreError;
use crate::traits::Scalar;
use blake2::{Blake2b, Digest};
use generic_array::GenericArray;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::Zeroize;

/// Sample an ephemeral scalar, uniform over `[0, q)`.
pub fn rand_scalar<S, R>(rng: &mut R) -> Result<S, DreError>
where
    S: Scalar,
    R: RngCore + CryptoRng,
{
    let mut block = GenericArray::<u8, S::EncodingSize>::default();
    let sampled = loop {
        if rng.try_fill_bytes(&mut block).is_err() {
            debug!("entropy source exhausted while sampling a scalar");
            break Err(DreError::EntropyExhausted);
        }
        if let Some(scalar) = S::from_uniform_bytes(&block) {
            break Ok(scalar);
        }
        trace!("scalar candidate out of range, redrawing");
    };
    block.as_mut_slice().zeroize();
    sampled
}

/// Sample a long-term scalar. The drawn block is expanded with Blake2b and
/// clamped according to the group's conventions before reduction, so the
/// result is distinct from what `rand_scalar` yields on the same stream.
pub fn rand_long_term_scalar<S, R>(rng: &mut R) -> Result<S, DreError>
where
    S: Scalar,
    R: RngCore + CryptoRng,
{
    let mut block = GenericArray::<u8, S::EncodingSize>::default();
    let sampled = loop {
        if rng.try_fill_bytes(&mut block).is_err() {
            debug!("entropy source exhausted while sampling a long-term scalar");
            break Err(DreError::EntropyExhausted);
        }
        let mut digest = Blake2b::digest(&block);
        let candidate = S::from_clamped_bytes(&digest);
        digest.as_mut_slice().zeroize();
        if let Some(scalar) = candidate {
            break Ok(scalar);
        }
        trace!("long-term scalar reduced to zero, redrawing");
    };
    block.as_mut_slice().zeroize();
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixed_rand::FixedRand;
    use curve25519_dalek::scalar::Scalar as RScalar;

    // Last byte below 0x10 keeps every block under 2^252 < q.
    fn accepted_block(seed: u8) -> [u8; 32] {
        let mut block = [0u8; 32];
        for (i, b) in block.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8).wrapping_mul(0x9d);
        }
        block[31] = 0x07;
        block
    }

    #[test]
    fn random_scalar_is_the_drawn_block() {
        let block = accepted_block(0x40);
        let mut rand = FixedRand::new(&block);

        let scalar: RScalar = rand_scalar(&mut rand).unwrap();

        assert_eq!(scalar.to_bytes(), block);
        assert_eq!(rand.consumed(), 32);
    }

    #[test]
    fn out_of_range_blocks_are_redrawn() {
        let accepted = accepted_block(0x16);
        let mut data = vec![0xff; 32];
        data.extend_from_slice(&accepted);
        let mut rand = FixedRand::new(&data);

        let scalar: RScalar = rand_scalar(&mut rand).unwrap();

        assert_eq!(scalar.to_bytes(), accepted);
        assert_eq!(rand.consumed(), 64);
    }

    #[test]
    fn random_scalar_needs_a_full_block() {
        let mut rand = FixedRand::new(&[0x42]);
        assert_eq!(
            rand_scalar::<RScalar, _>(&mut rand),
            Err(DreError::EntropyExhausted)
        );

        // only rejected candidates before the stream ends
        let mut rand = FixedRand::new(&[0xff; 96]);
        assert_eq!(
            rand_scalar::<RScalar, _>(&mut rand),
            Err(DreError::EntropyExhausted)
        );
    }

    #[test]
    fn long_term_scalar_is_clamped_digest() {
        let block = accepted_block(0x52);
        let mut rand = FixedRand::new(&block);

        let scalar: RScalar = rand_long_term_scalar(&mut rand).unwrap();

        let digest = Blake2b::digest(&block);
        let mut expected = [0u8; 32];
        expected.copy_from_slice(&digest[..32]);
        expected[0] &= 248;
        expected[31] &= 127;
        expected[31] |= 64;
        assert_eq!(scalar, RScalar::from_bytes_mod_order(expected));

        let ephemeral: RScalar = rand_scalar(&mut FixedRand::new(&block)).unwrap();
        assert_ne!(scalar, ephemeral);
    }

    #[test]
    fn long_term_scalar_needs_a_full_block() {
        let mut rand = FixedRand::new(&[0x42]);
        assert_eq!(
            rand_long_term_scalar::<RScalar, _>(&mut rand),
            Err(DreError::EntropyExhausted)
        );
    }
}
