//! `K-PKE.KeyGen`, `K-PKE.Encrypt`, `K-PKE.Decrypt`, and the PRF/XOF/G/H hash wrappers they use.
//!
//! This is the IND-CPA core of Kyber; there is no implicit-rejection re-encryption check and no
//! ciphertext-hash binding here, since the FO transform that would add those is out of scope.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::codec::{byte_decode, byte_encode, compress, decompress};
use crate::error::Error;
use crate::module::{dot_t_prod, PolyMatrix, PolyVec};
use crate::poly::{Normal, Ntt};
use crate::sampling::{sample_ntt, sample_poly_cbd};

/// Function PRF: `ETA_64` bytes of SHAKE256 output keyed by a 32-byte seed and a domain byte.
fn prf<const ETA_64: usize>(s: &[u8; 32], b: u8) -> [u8; ETA_64] {
    let mut hasher = Shake256::default();
    hasher.update(s);
    hasher.update(&[b]);
    let mut reader = hasher.finalize_xof();
    let mut result = [0u8; ETA_64];
    reader.read(&mut result);
    result
}

/// Function XOF: a SHAKE128 reader seeded with `rho || i || j`, used to expand matrix entries.
fn xof(rho: &[u8; 32], i: u8, j: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[i]);
    hasher.update(&[j]);
    hasher.finalize_xof()
}

/// Function G: SHA3-512, split into two 32-byte halves `(rho, sigma)`.
fn g(bytes: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    bytes.iter().for_each(|b| Digest::update(&mut hasher, b));
    let digest = hasher.finalize();
    let a = digest[0..32].try_into().expect("G output is 64 bytes");
    let b = digest[32..64].try_into().expect("G output is 64 bytes");
    (a, b)
}

/// Function H: SHA3-256.
#[allow(dead_code)] // used by the FO/KEM wrapper this crate deliberately does not implement
fn h(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}

/// Matrix expansion shared by `k_pke_key_gen` and `k_pke_encrypt`: `rows[i][j] = Parse(XOF(rho,
/// i, j))`. KeyGen needs `Â` (whose entry `(i,j)` is this matrix's entry `(j,i)`), so it reads
/// the matrix through [`PolyMatrix::mul_t_vec`]; Encrypt needs `Â^T` and reads it through
/// [`PolyMatrix::mul_vec`] directly.
fn gen_a_hat<const K: usize>(rho: &[u8; 32]) -> PolyMatrix<K> {
    PolyMatrix::from_fn(|i, j| sample_ntt(xof(rho, i.to_le_bytes()[0], j.to_le_bytes()[0])))
}

/// `K-PKE.KeyGen(d)`: expands 32 bytes of randomness into an encryption key `ek_pke` (public)
/// and a decryption key `dk_pke` (secret).
///
/// `ek_pke` must be `384*K+32` bytes, `dk_pke` must be `384*K` bytes.
#[allow(clippy::similar_names)]
pub(crate) fn k_pke_key_gen<const K: usize, const ETA1_64: usize>(
    d: [u8; 32], ek_pke: &mut [u8], dk_pke: &mut [u8],
) {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "k_pke_key_gen: ek_pke not 384*K+32");
    debug_assert_eq!(dk_pke.len(), 384 * K, "k_pke_key_gen: dk_pke not 384*K");

    let (rho, sigma) = g(&[&d]);

    let mut n: u8 = 0;
    let a_hat = gen_a_hat::<K>(&rho);

    let s: PolyVec<K, Normal> = PolyVec::from_fn(|_| {
        let p = sample_poly_cbd(&prf::<ETA1_64>(&sigma, n));
        n += 1;
        p
    });
    let e: PolyVec<K, Normal> = PolyVec::from_fn(|_| {
        let p = sample_poly_cbd(&prf::<ETA1_64>(&sigma, n));
        n += 1;
        p
    });

    let s_hat: PolyVec<K, Ntt> = PolyVec::from_fn(|i| s.entries()[i].to_ntt());
    let e_hat: PolyVec<K, Ntt> = PolyVec::from_fn(|i| e.entries()[i].to_ntt());

    let t_hat = a_hat.mul_t_vec(&s_hat).add(&e_hat);

    for (i, chunk) in ek_pke.chunks_mut(384).enumerate().take(K) {
        byte_encode(12, &t_hat.entries()[i].to_normal(), chunk);
    }
    ek_pke[K * 384..].copy_from_slice(&rho);

    for (i, chunk) in dk_pke.chunks_mut(384).enumerate() {
        byte_encode(12, &s_hat.entries()[i].to_normal(), chunk);
    }
}

/// `K-PKE.Encrypt(ek_pke, m, r)`: encrypts a 32-byte message `m` under encryption key `ek_pke`
/// using the 32 bytes of randomness `r`, writing `32*(du*K+dv)` bytes of ciphertext to `ct`.
#[allow(clippy::many_single_char_names, clippy::too_many_arguments)]
pub(crate) fn k_pke_encrypt<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, ek_pke: &[u8], m: &[u8], r: &[u8; 32], ct: &mut [u8],
) -> Result<(), Error> {
    if ek_pke.len() != 384 * K + 32 || m.len() != 32 {
        return Err(Error::InvalidLength);
    }

    let t_hat: PolyVec<K, Ntt> = PolyVec::try_from_fn(|i| {
        byte_decode(12, &ek_pke[384 * i..384 * (i + 1)]).map(|p| p.to_ntt())
    })?;

    let rho: [u8; 32] = ek_pke[384 * K..(384 * K + 32)].try_into().unwrap();
    let a_hat = gen_a_hat::<K>(&rho);

    let mut n: u8 = 0;
    let y: PolyVec<K, Normal> = PolyVec::from_fn(|_| {
        let p = sample_poly_cbd(&prf::<ETA1_64>(r, n));
        n += 1;
        p
    });
    let e1: PolyVec<K, Normal> = PolyVec::from_fn(|_| {
        let p = sample_poly_cbd(&prf::<ETA2_64>(r, n));
        n += 1;
        p
    });
    let e2 = sample_poly_cbd(&prf::<ETA2_64>(r, n));

    let y_hat: PolyVec<K, Ntt> = PolyVec::from_fn(|i| y.entries()[i].to_ntt());

    let u_hat = a_hat.mul_vec(&y_hat);
    let u: PolyVec<K, Normal> = PolyVec::from_fn(|i| u_hat.entries()[i].to_normal()).add(&e1);

    let mut mu = byte_decode(1, m)?;
    decompress(1, &mut mu);

    let v = dot_t_prod(&t_hat, &y_hat).to_normal().add(&e2).add(&mu);

    let step = 32 * du as usize;
    for (i, chunk) in ct.chunks_mut(step).enumerate().take(K) {
        let mut ui = u.entries()[i];
        compress(du, &mut ui);
        byte_encode(du, &ui, chunk);
    }

    let mut v = v;
    compress(dv, &mut v);
    byte_encode(dv, &v, &mut ct[K * step..]);

    Ok(())
}

/// `K-PKE.Decrypt(dk_pke, c)`: recovers the 32-byte message encrypted in ciphertext `c` using
/// decryption key `dk_pke`.
pub(crate) fn k_pke_decrypt<const K: usize>(
    du: u32, dv: u32, dk_pke: &[u8], ct: &[u8],
) -> Result<[u8; 32], Error> {
    let expected_ct_len = 32 * (du as usize * K + dv as usize);
    if dk_pke.len() != 384 * K || ct.len() != expected_ct_len {
        return Err(Error::InvalidLength);
    }

    let c1 = &ct[0..32 * du as usize * K];
    let c2 = &ct[32 * du as usize * K..expected_ct_len];

    let u: PolyVec<K, Normal> = PolyVec::try_from_fn(|i| {
        byte_decode(du, &c1[32 * du as usize * i..32 * du as usize * (i + 1)]).map(|mut p| {
            decompress(du, &mut p);
            p
        })
    })?;

    let mut v = byte_decode(dv, c2)?;
    decompress(dv, &mut v);

    let s_hat: PolyVec<K, Ntt> = PolyVec::try_from_fn(|i| {
        byte_decode(12, &dk_pke[384 * i..384 * (i + 1)]).map(|p| p.to_ntt())
    })?;

    let ntt_u: PolyVec<K, Ntt> = PolyVec::from_fn(|i| u.entries()[i].to_ntt());
    let st_ntt_u = dot_t_prod(&s_hat, &ntt_u).to_normal();
    let mut w = v.sub(&st_ntt_u);

    compress(1, &mut w);
    let mut m = [0u8; 32];
    byte_encode(1, &w, &mut m);
    Ok(m)
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::{RngCore, SeedableRng};

    use super::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};

    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;
    const K: usize = 2;
    const ETA1_64: usize = ETA1 as usize * 64;
    const ETA2_64: usize = ETA2 as usize * 64;
    const EK_LEN: usize = 800;
    const DK_LEN: usize = 768;
    const CT_LEN: usize = 768;

    #[test]
    fn test_key_gen_encrypt_decrypt_roundtrip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        let mut ek = [0u8; EK_LEN];
        let mut dk = [0u8; DK_LEN];
        let mut ct = [0u8; CT_LEN];

        let mut d = [0u8; 32];
        rng.fill_bytes(&mut d);
        k_pke_key_gen::<K, ETA1_64>(d, &mut ek, &mut dk);

        let m = [0x42u8; 32];
        let mut r = [0u8; 32];
        rng.fill_bytes(&mut r);

        k_pke_encrypt::<K, ETA1_64, ETA2_64>(DU, DV, &ek, &m, &r, &mut ct).unwrap();
        let recovered = k_pke_decrypt::<K>(DU, DV, &dk, &ct).unwrap();
        assert_eq!(recovered, m);
    }

    #[test]
    fn test_encrypt_rejects_non_canonical_key() {
        let ek = [0xFFu8; EK_LEN];
        let m = [0u8; 32];
        let r = [0u8; 32];
        let mut ct = [0u8; CT_LEN];
        let res = k_pke_encrypt::<K, ETA1_64, ETA2_64>(DU, DV, &ek, &m, &r, &mut ct);
        assert!(res.is_err());
    }

    #[test]
    fn test_decrypt_rejects_wrong_length_ciphertext() {
        let dk = [0u8; DK_LEN];
        let ct = [0u8; 10];
        let res = k_pke_decrypt::<K>(DU, DV, &dk, &ct);
        assert!(res.is_err());
    }
}
