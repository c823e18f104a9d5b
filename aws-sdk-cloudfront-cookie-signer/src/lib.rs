/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_cfg))]
/* End of automatically managed default lints */
//! CloudFront signed cookie generation.
//!
//! A [`CookieSigner`] pairs the ID of a public key registered in a CloudFront
//! trusted key group with the matching RSA private key. For each request it
//! builds an access policy (a canned policy from a resource URL and lifetime,
//! or a validated [`CustomPolicy`]), serializes it canonically, signs it with
//! RSASSA-PSS/SHA-384, and returns the `CloudFront-Policy`,
//! `CloudFront-Signature` and `CloudFront-Key-Pair-Id` cookie values.
//!
//! ```no_run
//! use aws_sdk_cloudfront_cookie_signer::{CookieRequest, CookieSigner};
//!
//! # fn main() -> Result<(), aws_sdk_cloudfront_cookie_signer::error::SigningError> {
//! let signer = CookieSigner::from_pem_file(
//!     "46858301-6fdb-4645-a522-d09b5dea27a5",
//!     "./certs/private_key.pem",
//! )?;
//! let request = CookieRequest::builder()
//!     .resource("https://d111111abcdef8.cloudfront.net/somefile.txt")
//!     .seconds_before_expires(3600)
//!     .build();
//! for (name, value) in signer.generate_cookies(&request)?.iter() {
//!     println!("{name}={value}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

/// Error types for CloudFront signing operations.
pub mod error;
pub mod canonical;
pub mod encoding;
mod key;
mod key_id;
mod policy;
mod sign;
mod validate;

pub use canonical::CanonicalPolicy;
pub use key::PrivateKey;
pub use key_id::KeyPairId;
pub use policy::{CustomPolicy, CustomPolicyBuilder};
pub use sign::{
    CookieRequest, CookieRequestBuilder, CookieSigner, SignedCookies,
    DEFAULT_SECONDS_BEFORE_EXPIRES,
};

/// Generate signed cookies with canned or custom policy
pub fn sign_cookies(
    signer: &CookieSigner,
    request: &CookieRequest,
) -> Result<SignedCookies, error::SigningError> {
    signer.generate_cookies(request)
}
