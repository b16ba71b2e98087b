#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Module-Lattice-based public-key encryption (the IND-CPA `K-PKE` core of Kyber round 3).
//!
//! This crate implements only the encryption primitive: key generation, encryption, and
//! decryption against the Module-LWE hardness assumption. It deliberately stops short of a
//! CCA-secure KEM — there is no Fujisaki-Okamoto transform, no implicit-rejection decapsulation,
//! and no binding of ciphertexts to a shared secret. Callers who need IND-CCA2 security (for
//! example, to build a network handshake) must apply that transform themselves, or reach for a
//! crate that already includes it.
//!
//! # Algorithm map
//!
//! | Pseudocode (Kyber round 3 spec)     | Module        |
//! |--------------------------------------|---------------|
//! | `ByteEncode_d`, `ByteDecode_d`        | [`codec`]     |
//! | `Compress_d`, `Decompress_d`          | [`codec`]     |
//! | `SampleNTT`, `SamplePolyCBD_eta`      | [`sampling`]  |
//! | `NTT`, `NTT^-1`, `MultiplyNTTs`       | [`ntt`]       |
//! | `K-PKE.KeyGen`, `.Encrypt`, `.Decrypt`| [`pke`]       |
//! | PRF, XOF, G, H                        | [`pke`]       |
//!
//! # Example
//!
//! ```
//! use kyber_pke::kyber768::{keygen, enc, dec};
//!
//! let (ek, dk) = keygen().unwrap();
//! let msg = [7u8; 32];
//! let ct = enc(ek.as_bytes(), &msg).unwrap();
//! let recovered = dec(dk.as_bytes(), ct.as_bytes()).unwrap();
//! assert_eq!(recovered, msg);
//! ```

mod codec;
mod module;
mod ntt;
mod pke;
mod poly;
mod sampling;
mod types;

/// Named error kinds returned by this crate's fallible operations.
pub mod error;

/// Re-exported at the crate root for convenience; see [`error::Error`] for variants.
pub use error::Error;

// Relevant to all parameter sets.
#[allow(dead_code)] // documents the fixed ring degree alongside Q and ZETA; not referenced as a value
const N: usize = 256;
const Q: u16 = 3329;
const ZETA: u16 = 17;

/// Compile-time parameters for one Kyber security level, for introspection by callers that
/// need to size buffers or report which level they're running without hardcoding the numbers.
#[derive(Clone, Copy, Debug)]
pub struct Parameters {
    /// Module rank (number of polynomials per vector).
    pub k: usize,
    /// Noise parameter for the key-generation / encryption secret and error vectors.
    pub eta1: u32,
    /// Noise parameter for the encryption error terms `e1`, `e2`.
    pub eta2: u32,
    /// Compression depth for ciphertext component `u`.
    pub du: u32,
    /// Compression depth for ciphertext component `v`.
    pub dv: u32,
    /// Serialized public-key length in bytes.
    pub public_key_len: usize,
    /// Serialized secret-key length in bytes.
    pub secret_key_len: usize,
    /// Serialized ciphertext length in bytes.
    pub ciphertext_len: usize,
}

// This common functionality is injected into each parameter-set module below. Each module
// supplies K, ETA1, ETA2, DU, DV and the three serialized lengths as local consts before
// invoking the macro.
macro_rules! functionality {
    () => {
        const ETA1_64: usize = ETA1 as usize * 64;
        const ETA2_64: usize = ETA2 as usize * 64;

        use rand_core::CryptoRngCore;
        #[cfg(feature = "default-rng")]
        use rand_core::OsRng;
        use subtle::ConstantTimeEq;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        use crate::pke::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};
        use crate::Error;

        /// Compile-time parameters for this security level.
        pub const PARAMETERS: crate::Parameters = crate::Parameters {
            k: K,
            eta1: ETA1,
            eta2: ETA2,
            du: DU,
            dv: DV,
            public_key_len: EK_LEN,
            secret_key_len: DK_LEN,
            ciphertext_len: CT_LEN,
        };

        /// Public encryption key, sized for this security level.
        #[derive(Clone)]
        pub struct PublicKey([u8; EK_LEN]);

        /// Secret decryption key, sized for this security level. Zeroized on drop.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SecretKey([u8; DK_LEN]);

        /// Ciphertext, sized for this security level.
        #[derive(Clone)]
        pub struct CipherText([u8; CT_LEN]);

        impl PublicKey {
            /// Borrows the serialized key bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; EK_LEN] { &self.0 }

            /// Validates and wraps a serialized key.
            ///
            /// # Errors
            /// Returns [`Error::InvalidLength`] if `bytes` is not `EK_LEN` long, or
            /// [`Error::InvalidParameter`] if any encoded coefficient is not fully reduced mod
            /// `q`.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
                if bytes.len() != EK_LEN {
                    return Err(Error::InvalidLength);
                }
                let mut out = [0u8; EK_LEN];
                out.copy_from_slice(bytes);
                // Round-trip every encoded polynomial through ByteDecode_12's range check so an
                // out-of-range (i.e. non-canonical) key is rejected up front rather than at the
                // first encrypt call.
                for chunk in out.chunks(384).take(K) {
                    crate::codec::byte_decode(12, chunk).map_err(|_| Error::InvalidParameter)?;
                }
                Ok(Self(out))
            }
        }

        impl SecretKey {
            /// Borrows the serialized key bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; DK_LEN] { &self.0 }

            /// Validates and wraps a serialized key.
            ///
            /// # Errors
            /// Returns [`Error::InvalidLength`] if `bytes` is not `DK_LEN` long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
                if bytes.len() != DK_LEN {
                    return Err(Error::InvalidLength);
                }
                let mut out = [0u8; DK_LEN];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }
        }

        // Constant-time equality for secret-key bytes.
        impl PartialEq for SecretKey {
            fn eq(&self, other: &Self) -> bool { self.0.ct_eq(&other.0).into() }
        }

        impl Eq for SecretKey {}

        impl CipherText {
            /// Borrows the serialized ciphertext bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; CT_LEN] { &self.0 }

            /// Wraps a serialized ciphertext, checking only its length — ciphertext components
            /// are validated by `Decrypt` itself via `ByteDecode`'s range check.
            ///
            /// # Errors
            /// Returns [`Error::InvalidLength`] if `bytes` is not `CT_LEN` long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
                if bytes.len() != CT_LEN {
                    return Err(Error::InvalidLength);
                }
                let mut out = [0u8; CT_LEN];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }
        }

        /// Generates a fresh keypair using the platform RNG.
        ///
        /// # Errors
        /// Returns [`Error::RandomnessFailure`] if the RNG cannot supply randomness.
        #[cfg(feature = "default-rng")]
        pub fn keygen() -> Result<(PublicKey, SecretKey), Error> {
            keygen_with_rng(&mut OsRng)
        }

        /// Generates a fresh keypair, drawing randomness from `rng`.
        ///
        /// # Errors
        /// Returns [`Error::RandomnessFailure`] if `rng` cannot supply randomness.
        pub fn keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(PublicKey, SecretKey), Error> {
            let mut d = [0u8; 32];
            rng.try_fill_bytes(&mut d).map_err(|_| Error::RandomnessFailure)?;
            let mut ek = [0u8; EK_LEN];
            let mut dk = [0u8; DK_LEN];
            k_pke_key_gen::<K, ETA1_64>(d, &mut ek, &mut dk);
            Ok((PublicKey(ek), SecretKey(dk)))
        }

        /// Encrypts a 32-byte message under public key `pk`, using the platform RNG for the
        /// encryption randomness.
        ///
        /// # Errors
        /// Returns [`Error::InvalidLength`] if `pk` or `m` are the wrong length, and
        /// [`Error::RandomnessFailure`] if the RNG cannot supply randomness.
        #[cfg(feature = "default-rng")]
        pub fn enc(pk: &[u8], m: &[u8; 32]) -> Result<CipherText, Error> {
            enc_with_rng(pk, m, &mut OsRng)
        }

        /// Encrypts a 32-byte message under public key `pk`, drawing the encryption randomness
        /// from `rng`.
        ///
        /// # Errors
        /// Returns [`Error::InvalidLength`] if `pk` is the wrong length, and
        /// [`Error::RandomnessFailure`] if `rng` cannot supply randomness.
        pub fn enc_with_rng(
            pk: &[u8], m: &[u8; 32], rng: &mut impl CryptoRngCore,
        ) -> Result<CipherText, Error> {
            if pk.len() != EK_LEN {
                return Err(Error::InvalidLength);
            }
            let mut r = [0u8; 32];
            rng.try_fill_bytes(&mut r).map_err(|_| Error::RandomnessFailure)?;
            let mut ct = [0u8; CT_LEN];
            k_pke_encrypt::<K, ETA1_64, ETA2_64>(DU, DV, pk, m, &r, &mut ct)?;
            Ok(CipherText(ct))
        }

        /// Decrypts ciphertext `ct` using secret key `sk`, recovering the 32-byte message.
        ///
        /// # Errors
        /// Returns [`Error::InvalidLength`] if `sk` or `ct` are the wrong length.
        pub fn dec(sk: &[u8], ct: &[u8]) -> Result<[u8; 32], Error> {
            if sk.len() != DK_LEN {
                return Err(Error::InvalidLength);
            }
            k_pke_decrypt::<K>(DU, DV, sk, ct)
        }
    };
}

/// Kyber-512 (security category 1): `k = 2`.
#[cfg(feature = "kyber-512")]
pub mod kyber512 {
    //! See the [crate-level documentation](crate) for the typical usage flow.

    const K: usize = 2;
    const ETA1: u32 = 3;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized public-key length (bytes).
    pub const EK_LEN: usize = 800;
    /// Serialized secret-key length (bytes).
    pub const DK_LEN: usize = 768;
    /// Serialized ciphertext length (bytes).
    pub const CT_LEN: usize = 768;

    functionality!();
}

/// Kyber-768 (security category 3): `k = 3`.
#[cfg(feature = "kyber-768")]
pub mod kyber768 {
    //! See the [crate-level documentation](crate) for the typical usage flow.

    const K: usize = 3;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;

    /// Serialized public-key length (bytes).
    pub const EK_LEN: usize = 1184;
    /// Serialized secret-key length (bytes).
    pub const DK_LEN: usize = 1152;
    /// Serialized ciphertext length (bytes).
    pub const CT_LEN: usize = 1088;

    functionality!();
}

/// Kyber-1024 (security category 5): `k = 4`.
#[cfg(feature = "kyber-1024")]
pub mod kyber1024 {
    //! See the [crate-level documentation](crate) for the typical usage flow.

    const K: usize = 4;
    const ETA1: u32 = 2;
    const ETA2: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;

    /// Serialized public-key length (bytes).
    pub const EK_LEN: usize = 1568;
    /// Serialized secret-key length (bytes).
    pub const DK_LEN: usize = 1536;
    /// Serialized ciphertext length (bytes).
    pub const CT_LEN: usize = 1568;

    functionality!();
}
