//! `ByteEncode_d`/`ByteDecode_d` (bit-packing) and `Compress_d`/`Decompress_d` (lossy rounding),
//! operating on a single [`Poly`].

use crate::error::Error;
use crate::poly::{Normal, Poly};
use crate::Q;

/// `ByteEncode_d(F)`: packs 256 `d`-bit integers into `32 * d` bytes, for `1 <= d <= 12`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_encode(d: u32, poly: &Poly<Normal>, bytes_b: &mut [u8]) {
    debug_assert_eq!(bytes_b.len(), 32 * d as usize, "byte_encode: output len is not 32 * d");
    debug_assert!(
        poly.coeffs().iter().all(|f| f.get_u16() <= if d < 12 { 1 << d } else { Q }),
        "byte_encode: coefficient out of range for d"
    );

    let mut temp = 0u32;
    let mut bit_index = 0usize;
    let mut byte_index = 0usize;

    for coeff in poly.coeffs() {
        let coeff = coeff.get_u32() & ((1 << d) - 1);
        temp |= coeff << bit_index;
        bit_index += d as usize;

        while bit_index > 7 {
            bytes_b[byte_index] = temp.to_le_bytes()[0];
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
}

/// `ByteDecode_d(B)`: unpacks `32 * d` bytes into 256 `d`-bit integers, for `1 <= d <= 12`.
///
/// Returns [`Error::InvalidLength`] if `bytes_b` is not `32 * d` bytes, and
/// [`Error::InvalidParameter`] if any decoded coefficient is out of range for the modulus
/// implied by `d` (12 decodes modulo `q`, everything else modulo `2^d`).
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_decode(d: u32, bytes_b: &[u8]) -> Result<Poly<Normal>, Error> {
    if bytes_b.len() != 32 * d as usize {
        return Err(Error::InvalidLength);
    }

    let mut coeffs = [crate::types::Z::default(); 256];
    let mut temp = 0u32;
    let mut bit_index = 0usize;
    let mut int_index = 0usize;

    for byte in bytes_b {
        temp |= u32::from(*byte) << bit_index;
        bit_index += 8;

        while bit_index >= d as usize {
            let val = temp & ((1 << d) - 1);
            // Not yet known to be reduced mod q (only checked below), so bypass Z::new's
            // debug_assert via the raw setter.
            let mut z = crate::types::Z::default();
            z.set_u16(val as u16);
            coeffs[int_index] = z;
            bit_index -= d as usize;
            temp >>= d;
            int_index += 1;
        }
    }

    let m = if d < 12 { 1u32 << d } else { u32::from(Q) };
    if !coeffs.iter().all(|e| e.get_u32() < m) {
        return Err(Error::InvalidParameter);
    }
    Ok(Poly::from_coeffs(coeffs))
}

/// `Compress_d(x)`: `x -> round((2^d / q) * x)`, scaling `Z_q` down to a `d`-bit range.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn compress(d: u32, poly: &mut Poly<Normal>) {
    const M: u32 = (((1u64 << 36) + Q as u64 - 1) / Q as u64) as u32;
    let mut coeffs = *poly.coeffs();
    for x in &mut coeffs {
        let y = (x.get_u32() << d) + (u32::from(Q) >> 1);
        let result = (u64::from(y) * u64::from(M)) >> 36;
        x.set_u16(result as u16);
    }
    *poly = Poly::from_coeffs(coeffs);
}

/// `Decompress_d(y)`: `y -> round((q / 2^d) * y)`, the (lossy) inverse of [`compress`].
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn decompress(d: u32, poly: &mut Poly<Normal>) {
    let mut coeffs = *poly.coeffs();
    for y in &mut coeffs {
        let qy = u32::from(Q) * y.get_u32() + (1 << (d - 1));
        y.set_u16((qy >> d) as u16);
    }
    *poly = Poly::from_coeffs(coeffs);
}
