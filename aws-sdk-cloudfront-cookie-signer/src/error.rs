/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// The kind of failure a [`SigningError`] represents.
///
/// Every failure is deterministic for a given input. Retrying without changing
/// the input reproduces the same error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The key pair ID is not a lowercase, hyphenated UUID.
    InvalidKeyIdentifier,
    /// The private key source does not exist.
    KeyNotFound,
    /// The private key material could not be read or parsed.
    InvalidKey,
    /// A custom policy violates the policy schema.
    InvalidPolicy,
    /// The `Resource` of a custom policy is not a string.
    InvalidResourceType,
    /// Neither a resource nor a custom policy was supplied.
    MissingResource,
    /// The signing primitive rejected the key or message.
    SigningFailure,
}

/// Error type for CloudFront cookie signing operations
#[derive(Debug)]
pub struct SigningError {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    message: Option<Cow<'static, str>>,
}

impl SigningError {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn invalid_key_identifier(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidKeyIdentifier, None, Some(message.into()))
    }

    pub(crate) fn key_not_found(
        message: impl Into<Cow<'static, str>>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::new(
            ErrorKind::KeyNotFound,
            Some(source.into()),
            Some(message.into()),
        )
    }

    pub(crate) fn invalid_key(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::InvalidKey, Some(source.into()), None)
    }

    pub(crate) fn invalid_policy(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidPolicy, None, Some(message.into()))
    }

    pub(crate) fn malformed_policy(
        message: impl Into<Cow<'static, str>>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::new(
            ErrorKind::InvalidPolicy,
            Some(source.into()),
            Some(message.into()),
        )
    }

    pub(crate) fn invalid_resource_type(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResourceType, None, Some(message.into()))
    }

    pub(crate) fn missing_resource(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MissingResource, None, Some(message.into()))
    }

    pub(crate) fn signing_failure(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::SigningFailure, Some(source.into()), None)
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable reason attached to this error, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ErrorKind::InvalidKeyIdentifier => "invalid key pair ID",
            ErrorKind::KeyNotFound => "private key not found",
            ErrorKind::InvalidKey => "invalid private key",
            ErrorKind::InvalidPolicy => "invalid policy",
            ErrorKind::InvalidResourceType => "invalid resource type",
            ErrorKind::MissingResource => "missing resource",
            ErrorKind::SigningFailure => "signing operation failed",
        };
        write!(f, "{prefix}")?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl StdError for SigningError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<ErrorKind> for SigningError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None, None)
    }
}
