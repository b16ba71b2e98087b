use crate::types::Z;
use crate::{Q, ZETA};


/// Forward NTT: computes the NTT representation `f_hat` of the given polynomial `f` ∈ `R_q`.
///
/// Input: array `f` ∈ `Z^{256}_q`    ▷ the coefficients of the input polynomial <br>
/// Output: array `f_hat` ∈ `Z^{256}_q`    ▷ the coefficients of the NTT of the input polynomial
#[must_use]
pub(crate) fn ntt(array_f: &[Z; 256]) -> [Z; 256] {
    //
    // f_hat ← f    ▷ will compute NTT in-place on a copy of input array
    let mut f_hat: [Z; 256] = core::array::from_fn(|i| array_f[i]);

    // k ← 1
    let mut k = 1;

    // for (len ← 128; len ≥ 2; len ← len/2)
    for len in [128, 64, 32, 16, 8, 4, 2] {
        //
        // for (start ← 0; start < 256; start ← start + 2 · len)
        for start in (0..256).step_by(2 * len) {
            //
            // zeta ← ζ^{BitRev7(k)} mod q
            let zeta = ZETA_TABLE[k << 1];

            // k ← k + 1
            k += 1;

            // for (j ← start; j < start + len; j ++)
            for j in start..(start + len) {
                //
                // t ← zeta · f_hat[j + len]    ▷ steps done modulo q
                let t = f_hat[j + len].mul(zeta);

                // f_hat[j + len] ← f_hat[j] − t
                f_hat[j + len] = f_hat[j].sub(t);

                // f_hat[j] ← f_hat[j] + t
                f_hat[j] = f_hat[j].add(t);
            }
        }
    }

    f_hat
}


/// Inverse NTT: computes the polynomial `f` ∈ `R_q` corresponding to the given NTT
/// representation `f_hat`.
///
/// Input: array `f_hat` ∈ `Z^{256}`    ▷ the coefficients of input NTT representation <br>
/// Output: array `f` ∈ `Z^{256}`    ▷ the coefficients of the inverse-NTT of the input
#[must_use]
pub(crate) fn ntt_inv(f_hat: &[Z; 256]) -> [Z; 256] {
    // f ← f_hat    ▷ will compute in-place on a copy of input array
    let mut f: [Z; 256] = core::array::from_fn(|i| f_hat[i]);

    // k ← 127
    let mut k = 127;

    // for (len ← 2; len ≤ 128; len ← 2 · len)
    for len in [2, 4, 8, 16, 32, 64, 128] {
        //
        for start in (0..256).step_by(2 * len) {
            //
            // zeta ← ζ^{BitRev7(k)} mod q
            let zeta = ZETA_TABLE[k << 1];

            // k ← k − 1
            k -= 1;

            for j in start..(start + len) {
                //
                let t = f[j];

                // f[j] ← t + f[j + len]    ▷ steps done modulo q
                f[j] = t.add(f[j + len]);

                // f[j + len] ← zeta · (f[j + len] − t)
                f[j + len] = zeta.mul(f[j + len].sub(t));
            }
        }
    }

    // f ← f · 3303 mod q    ▷ multiply every entry by 3303 ≡ 128^{−1} mod q
    let z3303 = Z::new(3303);
    f.iter_mut().for_each(|item| *item = item.mul(z3303));

    f
}


/// Computes the product (in the ring `T_q`) of two NTT representations.
///
/// Input: two arrays `f_hat`, `g_hat` ∈ `Z^{256}_q`    ▷ coefficients of two NTT representations <br>
/// Output: an array `h_hat` ∈ `Z^{256}_q`    ▷ coefficients of their product in NTT basis
#[must_use]
pub(crate) fn multiply_ntts(f_hat: &[Z; 256], g_hat: &[Z; 256]) -> [Z; 256] {
    let mut h_hat: [Z; 256] = [Z::default(); 256];

    for i in 0..128 {
        //
        // (h_hat[2i], h_hat[2i + 1]) ← BaseCaseMultiply(f_hat[2i], f_hat[2i + 1],
        //                                                g_hat[2i], g_hat[2i + 1], ζ^{2BitRev7(i)+1})
        let zt = ZETA_TABLE[i ^ 0x80];
        let (h_hat_2i, h_hat_2ip1) =
            base_case_multiply(f_hat[2 * i], f_hat[2 * i + 1], g_hat[2 * i], g_hat[2 * i + 1], zt);
        h_hat[2 * i] = h_hat_2i;
        h_hat[2 * i + 1] = h_hat_2ip1;
    }

    h_hat
}


/// Multiplies two degree-one polynomials with respect to a quadratic modulus `X^2 − γ`.
///
/// Input: `a0`, `a1`, `b0`, `b1` ∈ `Z_q`    ▷ the coefficients of `a0 + a1·X` and `b0 + b1·X` <br>
/// Input: `γ` ∈ `Z_q`    ▷ the modulus is `X^2 − γ` <br>
/// Output: `(c0, c1)` ∈ `Z_q × Z_q`    ▷ the coefficients of the resulting product polynomial
#[must_use]
pub(crate) fn base_case_multiply(a0: Z, a1: Z, b0: Z, b1: Z, gamma: Z) -> (Z, Z) {
    // c0 ← a0·b0 + a1·b1·γ    ▷ steps done modulo q
    let c0 = a0.mul(b0).add(a1.mul(b1).mul(gamma));

    // c1 ← a0·b1 + a1·b0
    let c1 = a0.mul(b1).add(a1.mul(b0));

    (c0, c1)
}


// ----------
// The functionality below calculates the Zeta table at compile-time. Thus, not particularly
// optimal or constant-time, but it runs once, at compile time.

#[must_use]
#[allow(clippy::cast_possible_truncation)] // const fns cannot use u32::from() etc...
const fn gen_zeta_table() -> [Z; 256] {
    let mut result = [Z::new_unchecked(0); 256];
    let mut x = 1u32;
    let mut i = 0u32;
    while i < 256 {
        result[(i as u8).reverse_bits() as usize] = Z::new_unchecked(x as u16);
        x = (x * (ZETA as u32)) % (Q as u32);
        i += 1;
    }
    result
}

pub(crate) static ZETA_TABLE: [Z; 256] = gen_zeta_table();
