//! Variable-length hash `H'` used by Argon2 for block initialization and the
//! final tag.

use logging::trace_blake2b;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kernel::Blake2bKernel;
use crate::state::Blake2b;
use crate::MAX_DIGEST_BYTES;

const HALF: usize = MAX_DIGEST_BYTES / 2;

/// Fills `out` with `H'(le32(out.len()) || inputs...)`.
///
/// Outputs of up to 64 bytes are a single BLAKE2b call. Longer outputs chain
/// 64-byte digests, emitting the first 32 bytes of each link, until at most 64
/// bytes remain. The last link is a 64-byte digest over the first `remaining`
/// bytes of the previous one, truncated to `remaining`.
///
/// # Errors
///
/// [`Error::InvalidOutputLength`] for an empty output or one longer than
/// `u32::MAX` bytes.
///
/// # Examples
///
/// ```
/// use blake2b::{long_digest, Blake2b};
/// use cpu::Portable;
///
/// let mut short = [0u8; 32];
/// long_digest(Portable, &mut short, &[b"abc"]).unwrap();
///
/// // Short outputs are plain BLAKE2b over the length prefix and the input.
/// let mut direct = Blake2b::new(Portable, 32).unwrap();
/// direct.update_u32(32).unwrap();
/// direct.update(b"abc").unwrap();
/// assert_eq!(direct.finalize_vec().unwrap(), short);
/// ```
pub fn long_digest<K: Blake2bKernel>(kernel: K, out: &mut [u8], inputs: &[&[u8]]) -> Result<()> {
    let Ok(len) = u32::try_from(out.len()) else {
        return Err(Error::InvalidOutputLength(out.len()));
    };
    if len == 0 {
        return Err(Error::InvalidOutputLength(0));
    }
    trace_blake2b!(output_len = out.len(), inputs = inputs.len(), "long digest");

    if out.len() <= MAX_DIGEST_BYTES {
        let mut state = Blake2b::new(kernel, out.len())?;
        state.update_u32(len)?;
        for input in inputs {
            state.update(input)?;
        }
        return state.finalize_into(out);
    }

    let mut link = Zeroizing::new([0u8; MAX_DIGEST_BYTES]);
    let mut state = Blake2b::new(kernel, MAX_DIGEST_BYTES)?;
    state.update_u32(len)?;
    for input in inputs {
        state.update(input)?;
    }
    state.finalize_into(link.as_mut_slice())?;
    out[..HALF].copy_from_slice(&link[..HALF]);

    let mut written = HALF;
    while out.len() - written > MAX_DIGEST_BYTES {
        let mut state = Blake2b::new(kernel, MAX_DIGEST_BYTES)?;
        state.update(&link[..])?;
        state.finalize_into(link.as_mut_slice())?;
        out[written..written + HALF].copy_from_slice(&link[..HALF]);
        written += HALF;
    }

    let remaining = out.len() - written;
    let mut state = Blake2b::new(kernel, MAX_DIGEST_BYTES)?;
    state.update(&link[..remaining])?;
    state.finalize_into(link.as_mut_slice())?;
    out[written..].copy_from_slice(&link[..remaining]);
    Ok(())
}
