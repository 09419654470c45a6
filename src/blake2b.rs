//! The external hash oracle: a fixed-output BLAKE2b and its variable-length
//! extension `H'`.
//!
//! Wraps the RustCrypto `blake2` crate rather than hand-rolling BLAKE2b --
//! the hash is consumed as a black-box primitive here, so there is no
//! reason to reimplement it.

use blake2::digest::{Update, VariableOutput};
use blake2::{Blake2b512, Blake2bVar, Digest};

/// Fixed output size of the oracle's base hash, in bytes.
pub const B2HASH_LEN: usize = 64;

fn as32le(k: u32) -> [u8; 4] { k.to_le_bytes() }

fn len32(t: &[u8]) -> [u8; 4] { as32le(t.len() as u32) }

/// `H(bytes) -> 64 bytes`, fed the concatenation of `parts` in order.
fn h(parts: &[&[u8]]) -> [u8; B2HASH_LEN] {
    let mut hasher = Blake2b512::new();
    for p in parts {
        Digest::update(&mut hasher, p);
    }
    hasher.finalize().into()
}

/// `H(bytes) -> n bytes` for `n <= 64`, fed the concatenation of `parts`.
fn h_var(out: &mut [u8], parts: &[&[u8]]) {
    let mut hasher = Blake2bVar::new(out.len()).expect("0 < out.len() <= 64");
    for p in parts {
        Update::update(&mut hasher, p);
    }
    hasher.finalize_variable(out).expect("out.len() matches the hasher's configured size");
}

/// Builds the 72-byte pre-hash buffer: a 64-byte BLAKE2b digest over the
/// parameter/variant/input encoding, followed by 8 reserved bytes the
/// caller fills in per lane/block-index when seeding the first two blocks.
#[allow(clippy::too_many_arguments)]
pub fn prehash(
    lanes: u32,
    outlen: u32,
    m_cost: u32,
    t_cost: u32,
    version: u32,
    variant_tag: u32,
    p: &[u8],
    s: &[u8],
    k: &[u8],
    x: &[u8],
) -> [u8; 72] {
    let mut rv = [0u8; 72];
    let digest = h(&[
        &as32le(lanes),
        &as32le(outlen),
        &as32le(m_cost),
        &as32le(t_cost),
        &as32le(version),
        &as32le(variant_tag),
        &len32(p),
        p,
        &len32(s),
        s,
        &len32(k),
        k,
        &len32(x),
        x,
    ]);
    rv[..B2HASH_LEN].copy_from_slice(&digest);
    rv
}

/// The variable-length extension `H'(X, tau)`:
///
/// - if `out.len() <= 64`: a single `H(le32(out.len()) || input)`, truncated
///   to `out.len()`.
/// - else: iterate, emitting the first 32 bytes of each 64-byte step and
///   re-hashing the previous step's full output, until a final chunk of
///   `<= 64` bytes completes the output.
pub fn h_prime(out: &mut [u8], input: &[u8]) {
    let len = len32(out);
    if out.len() <= B2HASH_LEN {
        h_var(out, &[&len, input]);
        return;
    }

    let mut v = h(&[&len, input]);
    out[..B2HASH_LEN].copy_from_slice(&v);
    let mut written = B2HASH_LEN / 2;

    while out.len() - written > B2HASH_LEN {
        v = h(&[&v]);
        out[written..written + B2HASH_LEN].copy_from_slice(&v);
        written += B2HASH_LEN / 2;
    }

    let remaining = out.len() - written;
    h_var(&mut out[written..written + remaining], &[&v]);
}
