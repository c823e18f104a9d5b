/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use regex_lite::Regex;
use std::fmt;
use std::sync::LazyLock;

static KEY_PAIR_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid regex")
});

/// ID that CloudFront assigned to the public key in a trusted key group.
///
/// Always a lowercase, hyphenated UUID. It is passed through to the
/// `CloudFront-Key-Pair-Id` cookie verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPairId(String);

impl KeyPairId {
    /// Validates `id` and wraps it.
    pub fn new(id: impl Into<String>) -> Result<Self, SigningError> {
        let id = id.into();
        if !KEY_PAIR_ID_PATTERN.is_match(&id) {
            return Err(SigningError::invalid_key_identifier(
                "CloudFront public key ID must be a UUID string",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyPairId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for KeyPairId {
    type Error = SigningError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for KeyPairId {
    type Error = SigningError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
