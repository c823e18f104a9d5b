/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! CloudFront cookie-safe base64.
//!
//! This is standard (padded) base64 with `+` → `-`, `=` → `_` and `/` → `~`.
//! It is not base64url: CloudFront expects exactly these substitutions.

use crate::error::SigningError;

/// Encodes `data` as a CloudFront cookie value.
pub fn encode(data: &[u8]) -> String {
    base64_simd::STANDARD
        .encode_to_string(data)
        .replace('+', "-")
        .replace('=', "_")
        .replace('/', "~")
}

/// Decodes a CloudFront cookie value produced by [`encode`].
pub fn decode(value: &str) -> Result<Vec<u8>, SigningError> {
    let standard = value.replace('-', "+").replace('_', "=").replace('~', "/");
    base64_simd::STANDARD
        .decode_to_vec(standard)
        .map_err(|err| SigningError::malformed_policy("cookie value is not valid base64", err))
}
