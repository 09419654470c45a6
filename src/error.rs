//! The error domain.
//!
//! A borrow-based Rust API makes two classes of error structurally
//! unreachable and they are intentionally not represented here: a null
//! pointer paired with a nonzero length cannot occur once inputs are
//! `&[u8]`, and there is no separate pre-hash/finalize pointer pair to
//! disagree with each other -- `hash` takes one `out: &mut [u8]` used
//! throughout.

use thiserror::Error;

/// Everything that can go wrong building [`crate::Params`] or running
/// [`crate::Argon2::hash`].
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("output length {0} is below the minimum of {min}", min = crate::params::MIN_OUTLEN)]
    OutputTooShort(u32),
    #[error("output length {0} exceeds the maximum of {max}", max = crate::params::MAX_OUTLEN)]
    OutputTooLong(u32),

    #[error("password length {0} exceeds the maximum of {max}", max = crate::params::MAX_PWDLEN)]
    PasswordTooLong(u32),

    #[error("salt length {0} is below the minimum of {min}", min = crate::params::MIN_SALTLEN)]
    SaltTooShort(u32),
    #[error("salt length {0} exceeds the maximum of {max}", max = crate::params::MAX_SALTLEN)]
    SaltTooLong(u32),

    #[error("secret length {0} exceeds the maximum of {max}", max = crate::params::MAX_SECRETLEN)]
    SecretTooLong(u32),

    #[error("associated data length {0} exceeds the maximum of {max}", max = crate::params::MAX_ADLEN)]
    AssociatedDataTooLong(u32),

    #[error("time cost {0} is below the minimum of {min}", min = crate::params::MIN_TCOST)]
    TimeTooSmall(u32),
    #[error("time cost {0} exceeds the maximum of {max}", max = crate::params::MAX_TCOST)]
    TimeTooLarge(u32),

    #[error("memory cost {given} KiB is below the minimum of {min} KiB for {lanes} lane(s)")]
    MemoryTooLittle { given: u32, min: u32, lanes: u32 },
    #[error("memory cost {0} KiB exceeds the maximum of {max} KiB", max = crate::params::MAX_MCOST)]
    MemoryTooLarge(u32),

    #[error("lane count {0} is below the minimum of {min}", min = crate::params::MIN_LANES)]
    TooFewLanes(u32),
    #[error("lane count {0} exceeds the maximum of {max}", max = crate::params::MAX_LANES)]
    TooManyLanes(u32),

    #[error("failed to allocate the working matrix ({blocks} blocks, {bytes} bytes): {reason}")]
    MemoryAllocation { blocks: usize, bytes: usize, reason: String },

    #[error("unrecognized Argon2 variant tag {0}")]
    UnknownVariant(u32),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_non_empty_message() {
        let sample = [
            Error::OutputTooShort(1),
            Error::OutputTooLong(u32::MAX),
            Error::PasswordTooLong(u32::MAX),
            Error::SaltTooShort(0),
            Error::SaltTooLong(u32::MAX),
            Error::SecretTooLong(u32::MAX),
            Error::AssociatedDataTooLong(u32::MAX),
            Error::TimeTooSmall(0),
            Error::TimeTooLarge(u32::MAX),
            Error::MemoryTooLittle { given: 1, min: 8, lanes: 1 },
            Error::MemoryTooLarge(u32::MAX),
            Error::TooFewLanes(0),
            Error::TooManyLanes(u32::MAX),
            Error::MemoryAllocation { blocks: 1, bytes: 1024, reason: "oom".into() },
            Error::UnknownVariant(99),
        ];
        for e in sample {
            assert!(!e.to_string().is_empty());
        }
    }

    #[test]
    fn implements_std_error() {
        fn assert_std_error<E: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
