/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding;
use crate::error::SigningError;
use crate::key::PrivateKey;
use crate::key_id::KeyPairId;
use crate::policy::{canned_policy, CustomPolicy};
use aws_smithy_async::time::{SharedTimeSource, TimeSource};
use aws_smithy_types::DateTime;
use std::borrow::Cow;
use std::path::Path;

const COOKIE_POLICY: &str = "CloudFront-Policy";
const COOKIE_SIGNATURE: &str = "CloudFront-Signature";
const COOKIE_KEY_PAIR_ID: &str = "CloudFront-Key-Pair-Id";

/// Lifetime of a canned policy when none is given: 15 minutes.
pub const DEFAULT_SECONDS_BEFORE_EXPIRES: u64 = 900;

/// Issues CloudFront signed cookies for one key pair.
///
/// Holds the key pair ID and its private key for its whole lifetime and never
/// mutates them, so a single signer can be shared across threads.
#[derive(Debug, Clone)]
pub struct CookieSigner {
    key_pair_id: KeyPairId,
    private_key: PrivateKey,
    time_source: SharedTimeSource,
}

impl CookieSigner {
    /// Creates a signer, validating the key pair ID.
    pub fn new(
        key_pair_id: impl Into<String>,
        private_key: PrivateKey,
    ) -> Result<Self, SigningError> {
        Ok(Self {
            key_pair_id: KeyPairId::new(key_pair_id)?,
            private_key,
            time_source: SharedTimeSource::default(),
        })
    }

    /// Creates a signer from a key pair ID and the path to an unencrypted PEM private key.
    ///
    /// The key pair ID is validated before the key file is read.
    pub fn from_pem_file(
        key_pair_id: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, SigningError> {
        let key_pair_id = KeyPairId::new(key_pair_id)?;
        let private_key = PrivateKey::from_pem_file(path)?;
        Ok(Self {
            key_pair_id,
            private_key,
            time_source: SharedTimeSource::default(),
        })
    }

    /// Replaces the clock used to compute canned policy expirations.
    pub fn with_time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = SharedTimeSource::new(time_source);
        self
    }

    /// Returns the key pair ID.
    pub fn key_pair_id(&self) -> &KeyPairId {
        &self.key_pair_id
    }

    /// Returns the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Generates the `CloudFront-Policy`, `CloudFront-Signature` and
    /// `CloudFront-Key-Pair-Id` cookies for `request`.
    pub fn generate_cookies(&self, request: &CookieRequest) -> Result<SignedCookies, SigningError> {
        let policy = self.resolve_policy(request)?;
        let canonical = policy.to_canonical();
        tracing::trace!(canonical_policy = %canonical, "canonicalized policy");

        let signature = self.private_key.sign(canonical.as_bytes())?;

        Ok(SignedCookies::new(
            encoding::encode(canonical.as_bytes()),
            encoding::encode(&signature),
            self.key_pair_id.as_str().to_owned(),
        ))
    }

    fn resolve_policy<'a>(
        &self,
        request: &'a CookieRequest,
    ) -> Result<Cow<'a, CustomPolicy>, SigningError> {
        if let Some(policy) = request.policy.as_ref().filter(|p| !p.is_empty()) {
            tracing::debug!(key_pair_id = %self.key_pair_id, "signing cookies with custom policy");
            policy.validate()?;
            return Ok(Cow::Borrowed(policy));
        }

        let resource = request
            .resource
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| SigningError::missing_resource("must provide a resource URL"))?;

        let now = DateTime::from(self.time_source.now());
        let lifetime = i64::try_from(request.seconds_before_expires).unwrap_or(i64::MAX);
        let expires_at = DateTime::from_secs(now.secs().saturating_add(lifetime));
        tracing::debug!(
            key_pair_id = %self.key_pair_id,
            expires_at = expires_at.secs(),
            "signing cookies with canned policy"
        );

        canned_policy(resource, expires_at).map(Cow::Owned)
    }
}

/// Options for a single cookie-generation call.
///
/// A non-empty custom policy takes precedence over the canned-policy options
/// (`resource` and `seconds_before_expires`), which are then ignored.
#[derive(Debug, Clone)]
pub struct CookieRequest {
    resource: Option<String>,
    policy: Option<CustomPolicy>,
    seconds_before_expires: u64,
}

impl CookieRequest {
    /// Creates a new builder.
    pub fn builder() -> CookieRequestBuilder {
        CookieRequestBuilder::default()
    }

    /// A canned-policy request for `resource` with the default lifetime.
    pub fn canned(resource: impl Into<String>) -> Self {
        Self::builder().resource(resource).build()
    }

    /// A custom-policy request.
    pub fn custom(policy: CustomPolicy) -> Self {
        Self::builder().policy(policy).build()
    }

    /// Returns the canned-policy resource, if set.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the custom policy, if set.
    pub fn policy(&self) -> Option<&CustomPolicy> {
        self.policy.as_ref()
    }

    /// Returns the canned-policy lifetime in seconds.
    pub fn seconds_before_expires(&self) -> u64 {
        self.seconds_before_expires
    }
}

/// Builder for [`CookieRequest`].
#[derive(Debug, Default)]
pub struct CookieRequestBuilder {
    resource: Option<String>,
    policy: Option<CustomPolicy>,
    seconds_before_expires: Option<u64>,
}

impl CookieRequestBuilder {
    /// Sets the resource URL for a canned policy.
    pub fn resource(mut self, url: impl Into<String>) -> Self {
        self.resource = Some(url.into());
        self
    }

    /// Sets a custom policy.
    pub fn policy(mut self, policy: CustomPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets how many seconds from now a canned policy stays valid. Defaults to 900.
    pub fn seconds_before_expires(mut self, seconds: u64) -> Self {
        self.seconds_before_expires = Some(seconds);
        self
    }

    /// Builds the request.
    pub fn build(self) -> CookieRequest {
        CookieRequest {
            resource: self.resource,
            policy: self.policy,
            seconds_before_expires: self
                .seconds_before_expires
                .unwrap_or(DEFAULT_SECONDS_BEFORE_EXPIRES),
        }
    }
}

/// Signed cookies for CloudFront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCookies {
    cookies: Vec<(Cow<'static, str>, String)>,
}

impl SignedCookies {
    pub(crate) fn new(policy: String, signature: String, key_pair_id: String) -> Self {
        Self {
            cookies: vec![
                (Cow::Borrowed(COOKIE_POLICY), policy),
                (Cow::Borrowed(COOKIE_SIGNATURE), signature),
                (Cow::Borrowed(COOKIE_KEY_PAIR_ID), key_pair_id),
            ],
        }
    }

    /// Returns all cookies as name-value pairs.
    pub fn cookies(&self) -> &[(Cow<'static, str>, String)] {
        &self.cookies
    }

    /// Gets a specific cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns an iterator over cookies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(n, v)| (n.as_ref(), v.as_str()))
    }

    /// The `CloudFront-Policy` cookie value.
    pub fn policy(&self) -> &str {
        &self.cookies[0].1
    }

    /// The `CloudFront-Signature` cookie value.
    pub fn signature(&self) -> &str {
        &self.cookies[1].1
    }

    /// The `CloudFront-Key-Pair-Id` cookie value.
    pub fn key_pair_id(&self) -> &str {
        &self.cookies[2].1
    }

    /// Decodes the `CloudFront-Policy` cookie back into the signed policy JSON.
    pub fn decoded_policy(&self) -> Result<String, SigningError> {
        String::from_utf8(encoding::decode(self.policy())?)
            .map_err(|err| SigningError::malformed_policy("policy cookie is not UTF-8", err))
    }
}
