//! The memory-hard compression core of the Argon2 password hashing family:
//! allocation of the working matrix, pre-hashing, lane seeding, the
//! per-segment fill, and finalization into a fixed-length tag. Verification
//! (PHC string encoding), a CLI driver, and constant-time tag comparison are
//! left to callers; this crate only produces the tag.

pub mod addressing;
pub mod blake2b;
pub mod block;
pub mod compress;
pub mod error;
pub mod memory;
pub mod params;
pub mod sbox;
pub mod scheduler;
mod workers;

pub use error::{Error, Result};
pub use memory::{DefaultAllocator, MemoryAllocator};
pub use params::{Params, ParamsBuilder, Variant};

use block::Matrix;
use zeroize::Zeroize;

/// Length bounds [`Argon2::hash`] validates its arguments against.
pub use params::{MAX_ADLEN, MAX_OUTLEN, MAX_PWDLEN, MAX_SALTLEN, MAX_SECRETLEN, MIN_OUTLEN, MIN_SALTLEN};

/// The driver: validated cost parameters plus the entry points that
/// pre-hash, fill the matrix, and finalize a tag.
#[derive(Clone, Copy, Debug)]
pub struct Argon2 {
    params: Params,
}

impl Argon2 {
    /// Build a driver from already-validated [`Params`].
    pub fn new(params: Params) -> Argon2 {
        Argon2 { params }
    }

    /// Validate `(t_cost, m_cost, lanes, variant)` and build a driver in one
    /// call.
    pub fn with_params(t_cost: u32, m_cost: u32, lanes: u32, variant: Variant) -> Result<Argon2> {
        Ok(Argon2::new(Params::new(t_cost, m_cost, lanes, variant)?))
    }

    pub fn params(&self) -> &Params { &self.params }

    /// Hash `password`/`salt`/`secret`/`ad` into `out`, using the default
    /// heap allocator and without zeroing any of the caller's buffers.
    pub fn hash(
        &self,
        out: &mut [u8],
        password: &[u8],
        salt: &[u8],
        secret: &[u8],
        ad: &[u8],
    ) -> Result<()> {
        self.hash_with_allocator(&DefaultAllocator, out, password, salt, secret, ad)
    }

    /// As [`Argon2::hash`], but takes an explicit [`MemoryAllocator`] for the
    /// working matrix, so a caller can supply e.g. a locked or huge-page
    /// backed allocation instead of a plain heap `Vec`.
    pub fn hash_with_allocator(
        &self,
        allocator: &dyn MemoryAllocator,
        out: &mut [u8],
        password: &[u8],
        salt: &[u8],
        secret: &[u8],
        ad: &[u8],
    ) -> Result<()> {
        validate_lengths(out.len(), password.len(), salt.len(), secret.len(), ad.len())?;

        let prehash = blake2b::prehash(
            self.params.lanes(),
            out.len() as u32,
            self.params.m_cost(),
            self.params.t_cost(),
            params::VERSION,
            self.params.variant().tag(),
            password,
            salt,
            secret,
            ad,
        );
        let mut h0 = [0u8; blake2b::B2HASH_LEN];
        h0.copy_from_slice(&prehash[..blake2b::B2HASH_LEN]);

        let memory_blocks = self.params.memory_blocks() as usize;
        log::debug!(
            "hash: allocating {memory_blocks} blocks ({} bytes) for {:?}",
            memory_blocks * block::BLOCK_BYTES,
            self.params.variant()
        );
        let blocks = allocator.allocate(memory_blocks)?;
        let mut matrix = Matrix::from_blocks(blocks, self.params.lanes(), self.params.lane_length());

        scheduler::fill_memory(&mut matrix, &self.params, &h0);

        let last_col = self.params.lane_length() - 1;
        let c = matrix.xor_column(last_col);
        blake2b::h_prime(out, &c.to_le_bytes());

        // `into_blocks` zeroes every block before handing the storage back,
        // so the allocator's `release` always receives cleared memory -- a
        // custom allocator backed by locked or mmap'd pages can still
        // override `release` to unmap/unlock after that.
        allocator.release(matrix.into_blocks());
        Ok(())
    }

    /// As [`Argon2::hash`], but zeroes `password` and/or `secret` in place
    /// after they have been consumed by the pre-hash. Uses `zeroize` rather
    /// than a hand-rolled loop the optimizer could elide.
    #[allow(clippy::too_many_arguments)]
    pub fn hash_clearing(
        &self,
        out: &mut [u8],
        password: &mut [u8],
        salt: &[u8],
        secret: &mut [u8],
        ad: &[u8],
        clear_password: bool,
        clear_secret: bool,
    ) -> Result<()> {
        let result = self.hash(out, password, salt, secret, ad);
        if clear_password {
            password.zeroize();
        }
        if clear_secret {
            secret.zeroize();
        }
        result
    }
}

fn validate_lengths(outlen: usize, pwdlen: usize, saltlen: usize, secretlen: usize, adlen: usize) -> Result<()> {
    let outlen = checked_u32(outlen, Error::OutputTooLong)?;
    if outlen < MIN_OUTLEN {
        log::debug!("hash: rejecting outlen {outlen} below minimum {MIN_OUTLEN}");
        return Err(Error::OutputTooShort(outlen));
    }

    checked_u32(pwdlen, Error::PasswordTooLong)?;

    let saltlen = checked_u32(saltlen, Error::SaltTooLong)?;
    if saltlen < MIN_SALTLEN {
        log::debug!("hash: rejecting saltlen {saltlen} below minimum {MIN_SALTLEN}");
        return Err(Error::SaltTooShort(saltlen));
    }

    checked_u32(secretlen, Error::SecretTooLong)?;
    checked_u32(adlen, Error::AssociatedDataTooLong)?;

    Ok(())
}

/// `MAX_*LEN` constants are all `u32::MAX`, so the only way a `usize` length
/// overflows `u32` is on a 64-bit target with a multi-gigabyte buffer; when
/// that happens the length itself is the violation, not a silent truncation.
fn checked_u32(len: usize, too_long: impl FnOnce(u32) -> Error) -> Result<u32> {
    u32::try_from(len).map_err(|_| too_long(u32::MAX))
}

/// Convenience wrapper hashing with the crate's own [`params::defaults`].
pub fn argon2i_simple(password: &str, salt: &str) -> Result<[u8; params::defaults::OUTLEN]> {
    simple(Variant::Argon2i, password, salt)
}

/// As [`argon2i_simple`], using [`Variant::Argon2d`].
pub fn argon2d_simple(password: &str, salt: &str) -> Result<[u8; params::defaults::OUTLEN]> {
    simple(Variant::Argon2d, password, salt)
}

fn simple(variant: Variant, password: &str, salt: &str) -> Result<[u8; params::defaults::OUTLEN]> {
    use params::defaults;
    let mut out = [0u8; defaults::OUTLEN];
    let argon2 = Argon2::with_params(defaults::T_COST, defaults::M_COST, defaults::LANES, variant)?;
    argon2.hash(&mut out, password.as_bytes(), salt.as_bytes(), &[], &[])?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(variant: Variant, lanes: u32, t_cost: u32, m_cost: u32, outlen: usize) -> Vec<u8> {
        let argon2 = Argon2::with_params(t_cost, m_cost, lanes, variant).unwrap();
        let mut out = vec![0u8; outlen];
        argon2
            .hash(&mut out, &[1u8; 32], &[2u8; 16], &[3u8; 8], &[4u8; 12])
            .unwrap();
        out
    }

    /// Identical inputs produce a bit-identical tag.
    #[test]
    fn determinism() {
        let a = run(Variant::Argon2d, 4, 3, 32, 32);
        let b = run(Variant::Argon2d, 4, 3, 32, 32);
        assert_eq!(a, b);
    }

    /// Every pair of variants produces a different tag from the same inputs.
    #[test]
    fn variant_independence() {
        let d = run(Variant::Argon2d, 4, 3, 32, 32);
        let i = run(Variant::Argon2i, 4, 3, 32, 32);
        let ds = run(Variant::Argon2ds, 4, 3, 32, 32);
        let id = run(Variant::Argon2id, 4, 3, 32, 32);
        let di = run(Variant::Argon2di, 4, 3, 32, 32);
        let all = [&d, &i, &ds, &id, &di];
        for (x, outer) in all.iter().enumerate() {
            for (y, inner) in all.iter().enumerate() {
                if x != y {
                    assert_ne!(outer, inner, "variant {x} and {y} collided");
                }
            }
        }
    }

    /// `t_cost`, `m_cost`, and `lanes` each independently change the output.
    #[test]
    fn cost_parameter_response() {
        let base = run(Variant::Argon2i, 1, 2, 16, 32);
        assert_ne!(base, run(Variant::Argon2i, 1, 3, 16, 32));
        assert_ne!(base, run(Variant::Argon2i, 1, 2, 24, 32));
        assert_ne!(base, run(Variant::Argon2i, 2, 2, 16, 32));
    }

    /// At `lanes == 1` there is no thread pool to race against, so two runs
    /// of the sequential fast path must still agree byte-for-byte.
    #[test]
    fn parallelism_invariance_single_lane() {
        let a = run(Variant::Argon2d, 1, 3, 8, 32);
        let b = run(Variant::Argon2d, 1, 3, 8, 32);
        assert_eq!(a, b);
    }

    /// `m_cost < 8*lanes` is rejected outright, not rounded up to the minimum.
    #[test]
    fn memory_too_little_is_rejected_not_rounded() {
        let err = Argon2::with_params(3, 4, 4, Variant::Argon2d).unwrap_err();
        assert_eq!(err, Error::MemoryTooLittle { given: 4, min: 32, lanes: 4 });
    }

    #[test]
    fn rejects_salt_below_minimum() {
        let argon2 = Argon2::with_params(1, 8, 1, Variant::Argon2i).unwrap();
        let mut out = [0u8; 32];
        let err = argon2.hash(&mut out, b"pwd", b"short", &[], &[]).unwrap_err();
        assert_eq!(err, Error::SaltTooShort(5));
    }

    #[test]
    fn rejects_output_below_minimum() {
        let argon2 = Argon2::with_params(1, 8, 1, Variant::Argon2i).unwrap();
        let mut out = [0u8; 2];
        let err = argon2.hash(&mut out, b"pwd", b"saltsalt", &[], &[]).unwrap_err();
        assert_eq!(err, Error::OutputTooShort(2));
    }

    #[test]
    fn hash_clearing_zeroes_password_and_secret() {
        let argon2 = Argon2::with_params(1, 8, 1, Variant::Argon2i).unwrap();
        let mut out = [0u8; 32];
        let mut password = *b"hunter2!";
        let mut secret = *b"pepper12";
        argon2
            .hash_clearing(&mut out, &mut password, b"saltsalt", &mut secret, &[], true, true)
            .unwrap();
        assert_eq!(password, [0u8; 8]);
        assert_eq!(secret, [0u8; 8]);
    }

    #[test]
    fn simple_wrappers_are_deterministic() {
        let a = argon2i_simple("password", "somesalt").unwrap();
        let b = argon2i_simple("password", "somesalt").unwrap();
        assert_eq!(a, b);
        assert_ne!(a[..], argon2d_simple("password", "somesalt").unwrap()[..]);
    }
}
