use kyber_pke::{kyber1024, kyber512, kyber768};
use rand_chacha::rand_core::{CryptoRng, RngCore, SeedableRng};
use sha3::{Digest, Sha3_512};

/// Always yields the same fixed bytes, so `keygen_with_rng` draws a known, reproducible
/// seed `d` instead of whatever the platform RNG (or a stream cipher RNG) would produce.
struct FixedRng {
    data: [u8; 32],
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, out: &mut [u8]) { out.copy_from_slice(&self.data[..out.len()]) }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_chacha::rand_core::Error> {
        out.copy_from_slice(&self.data[..out.len()]);
        Ok(())
    }
}

impl CryptoRng for FixedRng {}

#[test]
fn test_kyber512_keygen_with_zero_seed_has_expected_lengths_and_g_binding() {
    // S1: d = 32 zero bytes -> pk is exactly 800 bytes, sk is exactly 768 bytes, and the last
    // 32 bytes of pk equal the first 32 bytes of SHA3-512(d || K).
    let mut rng = FixedRng { data: [0u8; 32] };
    let (pk, sk) = kyber512::keygen_with_rng(&mut rng).unwrap();
    assert_eq!(pk.as_bytes().len(), 800);
    assert_eq!(sk.as_bytes().len(), 768);

    let digest = Sha3_512::digest([0u8; 32]);
    assert_eq!(&pk.as_bytes()[768..800], &digest[0..32]);
}

#[test]
fn test_kyber768_encrypt_decrypt_with_fixed_message_and_coins() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
    let (pk, sk) = kyber768::keygen_with_rng(&mut rng).unwrap();

    let m = [0x80u8; 32];
    let ct = kyber768::enc_with_rng(pk.as_bytes(), &m, &mut rng).unwrap();
    assert_eq!(ct.as_bytes().len(), 1088);

    let recovered = kyber768::dec(sk.as_bytes(), ct.as_bytes()).unwrap();
    assert_eq!(recovered, m);
}

#[test]
fn test_kyber1024_roundtrip_is_reliable_over_many_trials() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(789);
    for trial in 0..200u64 {
        let (pk, sk) = kyber1024::keygen_with_rng(&mut rng).unwrap();
        let m: [u8; 32] = core::array::from_fn(|i| (trial as u8).wrapping_add(i as u8));
        let ct = kyber1024::enc_with_rng(pk.as_bytes(), &m, &mut rng).unwrap();
        let recovered = kyber1024::dec(sk.as_bytes(), ct.as_bytes()).unwrap();
        assert_eq!(recovered, m, "decryption mismatch on trial {trial}");
    }
}

#[test]
fn test_full_exchange_flow_across_all_levels() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);

    {
        let (alice_pk, alice_sk) = kyber512::keygen_with_rng(&mut rng).unwrap();
        let pk_bytes = *alice_pk.as_bytes();
        let bob_pk = kyber512::PublicKey::from_bytes(&pk_bytes).unwrap();
        let m = [7u8; 32];
        let ct = kyber512::enc_with_rng(bob_pk.as_bytes(), &m, &mut rng).unwrap();
        let ct_bytes = *ct.as_bytes();
        let alice_ct = kyber512::CipherText::from_bytes(&ct_bytes).unwrap();
        let recovered = kyber512::dec(alice_sk.as_bytes(), alice_ct.as_bytes()).unwrap();
        assert_eq!(recovered, m);
    }

    {
        let (alice_pk, alice_sk) = kyber768::keygen_with_rng(&mut rng).unwrap();
        let pk_bytes = *alice_pk.as_bytes();
        let bob_pk = kyber768::PublicKey::from_bytes(&pk_bytes).unwrap();
        let m = [9u8; 32];
        let ct = kyber768::enc_with_rng(bob_pk.as_bytes(), &m, &mut rng).unwrap();
        let recovered = kyber768::dec(alice_sk.as_bytes(), ct.as_bytes()).unwrap();
        assert_eq!(recovered, m);
    }

    {
        let (alice_pk, alice_sk) = kyber1024::keygen_with_rng(&mut rng).unwrap();
        let pk_bytes = *alice_pk.as_bytes();
        let bob_pk = kyber1024::PublicKey::from_bytes(&pk_bytes).unwrap();
        let m = [11u8; 32];
        let ct = kyber1024::enc_with_rng(bob_pk.as_bytes(), &m, &mut rng).unwrap();
        let recovered = kyber1024::dec(alice_sk.as_bytes(), ct.as_bytes()).unwrap();
        assert_eq!(recovered, m);
    }
}

#[test]
fn test_rejects_wrong_length_keys_and_ciphertexts() {
    use kyber_pke::Error;

    let short = [0u8; 4];
    assert_eq!(kyber512::PublicKey::from_bytes(&short).unwrap_err(), Error::InvalidLength);
    assert_eq!(kyber512::SecretKey::from_bytes(&short).unwrap_err(), Error::InvalidLength);
    assert_eq!(kyber512::CipherText::from_bytes(&short).unwrap_err(), Error::InvalidLength);
    assert_eq!(kyber512::dec(&short, &short).unwrap_err(), Error::InvalidLength);
}

#[test]
fn test_public_key_rejects_non_canonical_encoding() {
    use kyber_pke::Error;

    // Every byte 0xFF decodes each 12-bit lane to a value >= q, which ByteDecode_12 must reject.
    let bad_pk = [0xFFu8; 800];
    assert_eq!(kyber512::PublicKey::from_bytes(&bad_pk).unwrap_err(), Error::InvalidParameter);
}

#[test]
fn test_corrupted_ciphertext_does_not_panic_and_usually_changes_message() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2024);
    let (pk, sk) = kyber512::keygen_with_rng(&mut rng).unwrap();
    let m = [5u8; 32];
    let mut ct_bytes = *kyber512::enc_with_rng(pk.as_bytes(), &m, &mut rng).unwrap().as_bytes();
    ct_bytes[0] ^= 0xFF;
    let ct = kyber512::CipherText::from_bytes(&ct_bytes).unwrap();
    // No implicit-rejection check exists at this layer (out of scope), so decryption always
    // succeeds structurally; a flipped low-order ciphertext byte is expected to perturb m.
    let recovered = kyber512::dec(sk.as_bytes(), ct.as_bytes()).unwrap();
    assert_ne!(recovered, m);
}
