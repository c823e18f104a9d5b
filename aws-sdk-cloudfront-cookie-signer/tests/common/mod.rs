/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![allow(dead_code)]

use aws_sdk_cloudfront_cookie_signer::{encoding, PrivateKey, SignedCookies};
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pss, RsaPublicKey};
use sha2::{Digest, Sha384};

pub const KEY_PAIR_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

pub fn key_path(name: &str) -> String {
    format!("{}/tests/keys/{name}", env!("CARGO_MANIFEST_DIR"))
}

pub fn private_key(name: &str) -> PrivateKey {
    PrivateKey::from_pem_file(key_path(name))
        .unwrap_or_else(|e| panic!("failed to load {name}: {e}"))
}

pub fn public_key() -> RsaPublicKey {
    let pem = std::fs::read_to_string(key_path("public_key.pem")).unwrap();
    RsaPublicKey::from_public_key_pem(&pem).unwrap()
}

/// Verifies an RSASSA-PSS/SHA-384 signature made with the maximum salt length.
pub fn verify(public_key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> bool {
    let em_len = (public_key.n().bits() - 1).div_ceil(8);
    let salt_len = em_len - 48 - 2;
    public_key
        .verify(
            Pss::new_with_salt::<Sha384>(salt_len),
            &Sha384::digest(message),
            signature,
        )
        .is_ok()
}

/// Decodes the cookies and checks the signature against the decoded policy.
pub fn assert_cookies_verify(public_key: &RsaPublicKey, cookies: &SignedCookies) -> String {
    let policy = cookies.decoded_policy().expect("policy cookie decodes");
    let signature = encoding::decode(cookies.signature()).expect("signature cookie decodes");
    assert!(
        verify(public_key, policy.as_bytes(), &signature),
        "signature does not verify for policy {policy}"
    );
    policy
}
