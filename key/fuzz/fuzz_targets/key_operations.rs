#![no_main]

use arbitrary::Arbitrary;
use ecdsa_key::{Engine, Key, Libsecp256k1, PublicKey, Signature, K256, SIGNATURE_LENGTH};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub private_key: Vec<u8>,
    pub hash: Vec<u8>,
    pub data: Vec<u8>,
    pub compressed: bool,
    pub case_selector: u8,
}

// Importing arbitrary bytes never panics and every operation agrees with verify_key
fn fuzz_import(private_key: &[u8], hash: &[u8], compressed: bool) {
    let mut key = Key::import(private_key);
    let valid = key.verify_key();

    assert_eq!(key.create_pub_key().is_ok(), valid);
    assert_eq!(key.calculate_public_key(compressed), valid);
    assert_eq!(key.pub_key_data().is_empty(), !valid);

    let (signature, ok) = key.sign(hash);
    assert_eq!(ok, valid && hash.len() == 32);
    assert_eq!(signature.len(), if ok { SIGNATURE_LENGTH } else { 0 });
}

// Both engines accept the same keys and produce the same outputs
fn fuzz_engines_agree(private_key: &[u8], hash: &[u8], compressed: bool) {
    let mut first = Key::<Libsecp256k1>::from_private_key(private_key);
    let mut second = Key::<K256>::from_private_key(private_key);
    assert_eq!(first.verify_key(), second.verify_key());
    assert_eq!(
        first.calculate_public_key(compressed),
        second.calculate_public_key(compressed)
    );
    assert_eq!(first.pub_key_data(), second.pub_key_data());
    assert_eq!(first.sign(hash), second.sign(hash));
}

// Signatures produced by a valid key verify and recover to its public key
fn fuzz_sign_verify(private_key: &[u8], hash: &[u8]) {
    let key = Key::import(private_key);
    let Ok(public_key) = key.create_pub_key() else {
        return;
    };
    let Ok(signature) = key.try_sign(hash) else {
        return;
    };
    assert!(public_key.verify(key.context(), hash, &signature));
    assert!(public_key.verify(&K256::new(), hash, &signature));
    let recovered = PublicKey::recover(key.context(), hash, &signature, true).unwrap();
    assert_eq!(recovered, public_key);
}

// Parsing arbitrary public keys and signatures never panics
fn fuzz_parse(data: &[u8], hash: &[u8]) {
    let libsecp256k1 = Libsecp256k1::new();
    let k256 = K256::new();
    let first = PublicKey::parse(&libsecp256k1, data);
    let second = PublicKey::parse(&k256, data);
    assert_eq!(first, second);

    let Ok(signature) = Signature::try_from(data) else {
        return;
    };
    let first = PublicKey::recover(&libsecp256k1, hash, &signature, true);
    let second = PublicKey::recover(&k256, hash, &signature, true);
    assert_eq!(first.is_ok(), second.is_ok());
    if let (Ok(first), Ok(second)) = (first, second) {
        assert_eq!(first, second);
        assert!(first.verify(&libsecp256k1, hash, &signature));
    }
}

fn fuzz(input: FuzzInput) {
    match input.case_selector % 4 {
        0 => fuzz_import(&input.private_key, &input.hash, input.compressed),
        1 => fuzz_engines_agree(&input.private_key, &input.hash, input.compressed),
        2 => fuzz_sign_verify(&input.private_key, &input.hash),
        3 => fuzz_parse(&input.data, &input.hash),
        _ => unreachable!(),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
