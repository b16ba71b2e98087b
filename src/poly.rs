//! A single element of `R_q = Z_q[X]/(X^256 + 1)`.
//!
//! The reference scheme guards mixed-domain multiplication (normal vs. NTT) with a runtime
//! flag and a runtime check. Here the domain is instead a zero-sized type parameter, so that
//! pointwise-multiplying two normal-domain polynomials, or schoolbook-multiplying two
//! NTT-domain ones, is simply not an expression the type checker will accept — `DomainMismatch`
//! becomes unrepresentable rather than merely checked.

use core::marker::PhantomData;

use crate::ntt::{multiply_ntts, ntt, ntt_inv};
use crate::types::Z;

/// Marker for the domain a [`Poly`] lives in.
pub(crate) trait Domain: Copy {}

/// Coefficient representation: `c_0 + c_1 X + ... + c_255 X^255`.
#[derive(Clone, Copy)]
pub(crate) struct Normal;
impl Domain for Normal {}

/// NTT representation: 128 independent degree-one residues, enabling pointwise multiply.
#[derive(Clone, Copy)]
pub(crate) struct Ntt;
impl Domain for Ntt {}

/// An element of `R_q` (if `D = Normal`) or of its NTT image `T_q` (if `D = Ntt`).
#[derive(Clone, Copy)]
pub(crate) struct Poly<D: Domain> {
    coeffs: [Z; 256],
    _domain: PhantomData<D>,
}

impl<D: Domain> Poly<D> {
    pub(crate) fn zero() -> Self { Self { coeffs: [Z::default(); 256], _domain: PhantomData } }

    pub(crate) fn from_coeffs(coeffs: [Z; 256]) -> Self { Self { coeffs, _domain: PhantomData } }

    pub(crate) fn coeffs(&self) -> &[Z; 256] { &self.coeffs }

    /// Coefficientwise addition. Both operands (and the result) share domain `D`.
    #[must_use]
    pub(crate) fn add(&self, other: &Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i].add(other.coeffs[i])))
    }

    /// Coefficientwise subtraction. Both operands (and the result) share domain `D`.
    #[must_use]
    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i].sub(other.coeffs[i])))
    }

    /// Multiplies every coefficient by the scalar `k` (taken mod `q`).
    #[must_use]
    pub(crate) fn scalar_mul(&self, k: u16) -> Self {
        let scalar = Z::new(k % crate::Q);
        Self::from_coeffs(core::array::from_fn(|i| self.coeffs[i].mul(scalar)))
    }
}

impl Poly<Normal> {
    /// Forward NTT: maps this normal-domain polynomial to its NTT-domain image.
    #[must_use]
    pub(crate) fn to_ntt(&self) -> Poly<Ntt> { Poly::from_coeffs(ntt(&self.coeffs)) }

    /// Schoolbook multiplication mod `X^256 + 1`, for testing the NTT path against only.
    /// A conforming implementation runs all production multiplications through the NTT;
    /// this is `O(n^2)` and exists solely so tests can cross-check `ntt_inv(ntt(a)*ntt(b))`.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn schoolbook_mul(&self, other: &Self) -> Self {
        let mut acc = [0i64; 512];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                acc[i + j] += i64::from(a.get_u16()) * i64::from(b.get_u16());
            }
        }
        // reduce mod X^256 + 1: X^256 ≡ -1, so term at i+256 subtracts from term at i
        let mut out = [0i64; 256];
        for i in 0..256 {
            out[i] = acc[i] - acc[i + 256];
        }
        let q = i64::from(crate::Q);
        Self::from_coeffs(core::array::from_fn(|i| {
            let r = out[i].rem_euclid(q);
            #[allow(clippy::cast_possible_truncation)]
            Z::new(r as u16)
        }))
    }
}

impl Poly<Ntt> {
    /// Inverse NTT: maps this NTT-domain polynomial back to the normal domain.
    #[must_use]
    pub(crate) fn to_normal(&self) -> Poly<Normal> { Poly::from_coeffs(ntt_inv(&self.coeffs)) }

    /// Pointwise multiplication in the NTT domain, corresponding to ring multiplication
    /// in the normal domain.
    #[must_use]
    pub(crate) fn mul(&self, other: &Self) -> Self {
        Self::from_coeffs(multiply_ntts(&self.coeffs, &other.coeffs))
    }

    /// The NTT-domain image of the constant polynomial `1`: identity for [`Self::mul`].
    fn one() -> Self {
        let mut coeffs = [Z::default(); 256];
        coeffs.iter_mut().step_by(2).for_each(|c| *c = Z::new(1));
        Self::from_coeffs(coeffs)
    }

    /// Raises this element to the power `e` by binary exponentiation, via repeated [`Self::mul`].
    #[must_use]
    pub(crate) fn pow(&self, e: u32) -> Self {
        let mut result = Self::one();
        let mut base = *self;
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            e >>= 1;
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::{Normal, Poly};
    use crate::types::Z;

    fn poly_from_fn(f: impl Fn(usize) -> u16) -> Poly<Normal> {
        Poly::from_coeffs(core::array::from_fn(|i| Z::new(f(i) % 3329)))
    }

    #[test]
    fn test_ntt_roundtrip_preserves_coeffs() {
        let p = poly_from_fn(|i| (i * 31 + 7) as u16);
        let back = p.to_ntt().to_normal();
        for i in 0..256 {
            assert_eq!(p.coeffs()[i].get_u16(), back.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_ntt_multiply_matches_schoolbook() {
        let a = poly_from_fn(|i| (i * 3 + 1) as u16);
        let b = poly_from_fn(|i| (i * 5 + 2) as u16);
        let via_ntt = a.to_ntt().mul(&b.to_ntt()).to_normal();
        let via_schoolbook = a.schoolbook_mul(&b);
        for i in 0..256 {
            assert_eq!(via_ntt.coeffs()[i].get_u16(), via_schoolbook.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let a = poly_from_fn(|i| i as u16);
        let b = poly_from_fn(|i| (2 * i) as u16);
        let back = a.add(&b).sub(&b);
        for i in 0..256 {
            assert_eq!(a.coeffs()[i].get_u16(), back.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_scalar_mul_matches_repeated_addition() {
        let a = poly_from_fn(|i| (i * 11 + 3) as u16);
        let scaled = a.scalar_mul(5);
        let by_addition = a.add(&a).add(&a).add(&a).add(&a);
        for i in 0..256 {
            assert_eq!(scaled.coeffs()[i].get_u16(), by_addition.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_pow_matches_repeated_mul() {
        let a = poly_from_fn(|i| (i * 3 + 2) as u16).to_ntt();
        let cubed = a.pow(3);
        let by_mul = a.mul(&a).mul(&a);
        for i in 0..256 {
            assert_eq!(cubed.coeffs()[i].get_u16(), by_mul.coeffs()[i].get_u16());
        }
    }

    #[test]
    fn test_pow_zero_is_identity() {
        let a = poly_from_fn(|i| (i * 7 + 1) as u16).to_ntt();
        let identity = a.pow(0);
        let back = identity.mul(&a).to_normal();
        let expected = poly_from_fn(|i| (i * 7 + 1) as u16);
        for i in 0..256 {
            assert_eq!(back.coeffs()[i].get_u16(), expected.coeffs()[i].get_u16());
        }
    }
}
