//! Vectors and matrices of [`Poly`], and the module arithmetic (`K`-dimensional) built from
//! it: vector addition, matrix-vector product, transpose-vector product, and dot product.

use crate::error::Error;
use crate::poly::{Domain, Ntt, Poly};

/// A `K`-dimensional vector of polynomials sharing one domain.
#[derive(Clone, Copy)]
pub(crate) struct PolyVec<const K: usize, D: Domain> {
    entries: [Poly<D>; K],
}

impl<const K: usize, D: Domain> PolyVec<K, D> {
    pub(crate) fn from_fn(f: impl FnMut(usize) -> Poly<D>) -> Self {
        Self { entries: core::array::from_fn(f) }
    }

    /// Like [`Self::from_fn`], but for building a vector entrywise from a fallible source
    /// (deserializing each entry from a byte chunk, say) without discarding the first error.
    pub(crate) fn try_from_fn(
        mut f: impl FnMut(usize) -> Result<Poly<D>, Error>,
    ) -> Result<Self, Error> {
        let mut entries = [Poly::zero(); K];
        for (i, slot) in entries.iter_mut().enumerate() {
            *slot = f(i)?;
        }
        Ok(Self { entries })
    }

    pub(crate) fn entries(&self) -> &[Poly<D>; K] { &self.entries }

    /// Elementwise addition; see `z_hat = u_hat + v_hat`.
    #[must_use]
    pub(crate) fn add(&self, other: &Self) -> Self {
        Self::from_fn(|i| self.entries[i].add(&other.entries[i]))
    }
}

/// A `K x K` matrix of NTT-domain polynomials. The matrix is always sampled directly in the
/// NTT domain (`SampleNTT`), so unlike `PolyVec` there is no normal-domain variant.
pub(crate) struct PolyMatrix<const K: usize> {
    rows: [[Poly<Ntt>; K]; K],
}

impl<const K: usize> PolyMatrix<K> {
    pub(crate) fn from_fn(f: impl FnMut(usize, usize) -> Poly<Ntt>) -> Self {
        let mut f = f;
        Self { rows: core::array::from_fn(|i| core::array::from_fn(|j| f(i, j))) }
    }

    /// Matrix-by-vector product; see `w_hat = A_hat . u_hat`.
    #[must_use]
    pub(crate) fn mul_vec(&self, u_hat: &PolyVec<K, Ntt>) -> PolyVec<K, Ntt> {
        PolyVec::from_fn(|i| {
            let mut acc = Poly::zero();
            for j in 0..K {
                acc = acc.add(&self.rows[i][j].mul(&u_hat.entries()[j]));
            }
            acc
        })
    }

    /// Transpose-by-vector product; see `y_hat = A_hat^T . u_hat`.
    #[must_use]
    pub(crate) fn mul_t_vec(&self, u_hat: &PolyVec<K, Ntt>) -> PolyVec<K, Ntt> {
        PolyVec::from_fn(|i| {
            let mut acc = Poly::zero();
            for j in 0..K {
                acc = acc.add(&self.rows[j][i].mul(&u_hat.entries()[j]));
            }
            acc
        })
    }
}

/// Vector dot product; see `z_hat = u_hat^T . v_hat`.
#[must_use]
pub(crate) fn dot_t_prod<const K: usize>(
    u_hat: &PolyVec<K, Ntt>, v_hat: &PolyVec<K, Ntt>,
) -> Poly<Ntt> {
    let mut acc = Poly::zero();
    for j in 0..K {
        acc = acc.add(&u_hat.entries()[j].mul(&v_hat.entries()[j]));
    }
    acc
}
