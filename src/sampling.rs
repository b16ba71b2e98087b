//! `SampleNTT` (rejection sampling a uniform NTT-domain polynomial from an XOF) and
//! `SamplePolyCBD_eta` (centered binomial noise from a PRF-derived byte buffer).

use sha3::digest::XofReader;

use crate::poly::{Normal, Ntt, Poly};
use crate::types::Z;
use crate::Q;

/// `SampleNTT(B)`: if `byte_stream_b` is uniformly random, the result is a uniformly random
/// element of `T_q`. Used to expand the public matrix `A` from its 32-byte seed.
///
/// Rejection sampling over public randomness (`rho`) need not run in constant time.
pub(crate) fn sample_ntt(mut byte_stream_b: impl XofReader) -> Poly<Ntt> {
    let mut coeffs = [Z::default(); 256];
    let mut bbb = [0u8; 3];
    let mut j = 0usize;

    #[allow(clippy::cast_possible_truncation)]
    while j < 256 {
        byte_stream_b.read(&mut bbb);

        let d1 = u32::from(bbb[0]) + 256 * (u32::from(bbb[1]) & 0x0F);
        let d2 = (u32::from(bbb[1]) >> 4) + 16 * u32::from(bbb[2]);

        if d1 < u32::from(Q) {
            coeffs[j].set_u16(d1 as u16);
            j += 1;
        }

        if (d2 < u32::from(Q)) && (j < 256) {
            coeffs[j].set_u16(d2 as u16);
            j += 1;
        }
    }

    Poly::from_coeffs(coeffs)
}

/// `SamplePolyCBD_eta(B)`: samples a polynomial from the centered binomial distribution
/// `D_eta(R_q)` given `64 * eta` bytes of PRF output. All 256 coefficients are sampled from
/// the full input (not 255, as a transcription slip in some reference ports would have it).
///
/// Bits are taken MSB-first out of each byte (bit index 0 of the conceptual bitstream is the
/// top bit of the first byte), not the LSB-first order some ports use.
#[must_use]
pub(crate) fn sample_poly_cbd(byte_array_b: &[u8]) -> Poly<Normal> {
    let eta = u32::try_from(byte_array_b.len()).unwrap() >> 6;
    debug_assert_eq!(byte_array_b.len(), 64 * eta as usize, "sample_poly_cbd: len is not 64*eta");

    let mut coeffs = [Z::default(); 256];
    let mut temp: u32 = 0;
    let mut int_index = 0usize;
    let mut bit_index = 0usize;

    for byte in byte_array_b {
        temp |= u32::from(byte.reverse_bits()) << bit_index;
        bit_index += 8;

        while bit_index >= 2 * (eta as usize) {
            let x = count_ones(temp & ((1 << eta) - 1));
            let y = count_ones((temp >> eta) & ((1 << eta) - 1));
            let (mut xx, mut yy) = (Z::default(), Z::default());
            xx.set_u16(x);
            yy.set_u16(y);
            coeffs[int_index] = xx.sub(yy);
            bit_index -= 2 * (eta as usize);
            temp >>= 2 * (eta as usize);
            int_index += 1;
        }
    }
    debug_assert_eq!(int_index, 256, "sample_poly_cbd: did not fill all 256 coefficients");

    Poly::from_coeffs(coeffs)
}

#[allow(clippy::cast_possible_truncation)]
fn count_ones(x: u32) -> u16 {
    let x = (x & 0x5555_5555) + ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x & 0x0F0F_0F0F) + ((x >> 4) & 0x0F0F_0F0F);
    x as u16
}

#[cfg(test)]
mod tests {
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    use sha3::Shake128;

    use super::{sample_ntt, sample_poly_cbd};

    #[test]
    fn test_sample_ntt_coeffs_in_range() {
        let mut hasher = Shake128::default();
        hasher.update(b"seed");
        let reader = hasher.finalize_xof();
        let p = sample_ntt(reader);
        for c in p.coeffs() {
            assert!(c.get_u16() < 3329);
        }
    }

    #[test]
    fn test_sample_ntt_is_deterministic_in_input() {
        let mut h1 = Shake128::default();
        h1.update(b"seed");
        let r1 = h1.finalize_xof();
        let mut h2 = Shake128::default();
        h2.update(b"seed");
        let r2 = h2.finalize_xof();
        let p1 = sample_ntt(r1);
        let p2 = sample_ntt(r2);
        for i in 0..256 {
            assert_eq!(p1.coeffs()[i].get_u16(), p2.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_cbd_eta3_coeffs_bounded() {
        // eta=3 noise is in {-3, ..., 3} before reduction mod q, so either < 4 or > q-4.
        let bytes = [0xA5u8; 64 * 3];
        let p = sample_poly_cbd(&bytes);
        for c in p.coeffs() {
            let v = c.get_u16();
            assert!(v <= 3 || v >= 3329 - 3);
        }
    }

    #[test]
    fn test_cbd_eta2_coeffs_bounded() {
        let bytes = [0x3Cu8; 64 * 2];
        let p = sample_poly_cbd(&bytes);
        for c in p.coeffs() {
            let v = c.get_u16();
            assert!(v <= 2 || v >= 3329 - 2);
        }
    }
}
