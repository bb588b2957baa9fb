//! IBM hexadecimal floating point decoding.
//!
//! Every numeric value in an XPT file is stored as an 8-byte big-endian IBM
//! System/360 "long" float:
//!
//! ```text
//! [S|EEEEEEE|FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF]
//!  1    7                          56 bits
//! ```
//!
//! - **S**: sign bit (1 = negative)
//! - **E**: base-16 exponent, biased by 64
//! - **F**: fraction, `0.F` in base 256
//!
//! Value = (-1)^S * 0.F * 16^(E - 64). The format has no NaN, infinity or
//! denormals, so every bit pattern maps to a finite double.

use crate::error::{Result, XptError};

/// Width of an IBM long float in bytes.
pub const IBM_FLOAT_LEN: usize = 8;

/// Decode an 8-byte IBM float into an IEEE double.
///
/// All-zero input decodes to `0.0`.
#[must_use]
pub fn ibm_to_ieee(bytes: [u8; IBM_FLOAT_LEN]) -> f64 {
    if bytes == [0u8; IBM_FLOAT_LEN] {
        return 0.0;
    }

    let negative = bytes[0] & 0x80 != 0;
    let exponent = i32::from(bytes[0] & 0x7F) - 64;

    let mut fraction = [0u8; 8];
    fraction[1..].copy_from_slice(&bytes[1..]);
    let fraction = u64::from_be_bytes(fraction);

    // 0.F = F / 2^56, and 16^E = 2^(4E)
    let magnitude = fraction as f64 * 2f64.powi(4 * exponent - 56);

    if negative { -magnitude } else { magnitude }
}

/// Decode an IBM float from a slice that must be exactly 8 bytes long.
///
/// # Errors
///
/// Returns [`XptError::FloatWidth`] for any other length. A numeric variable
/// declared with a length other than 8 ends up here; the bytes are never
/// padded or truncated to make them fit.
pub fn ibm_slice_to_ieee(bytes: &[u8]) -> Result<f64> {
    let array: [u8; IBM_FLOAT_LEN] = bytes
        .try_into()
        .map_err(|_| XptError::FloatWidth { len: bytes.len() })?;
    Ok(ibm_to_ieee(array))
}
