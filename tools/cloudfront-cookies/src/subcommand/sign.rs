/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::{Context, Result};
use aws_sdk_cloudfront_cookie_signer::{
    CookieRequest, CookieSigner, CustomPolicy, SignedCookies, DEFAULT_SECONDS_BEFORE_EXPIRES,
};
use clap::Parser;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct SignArgs {
    /// ID of the public key registered in the CloudFront trusted key group
    #[clap(long)]
    pub(crate) key_pair_id: String,
    /// Path to the PEM encoded RSA private key matching the public key
    #[clap(long)]
    pub(crate) private_key: PathBuf,
    /// Resource URL to grant access to with a canned policy
    #[clap(long, required_unless_present = "policy", conflicts_with = "policy")]
    pub(crate) resource: Option<String>,
    /// Path to a JSON custom policy document
    #[clap(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Lifetime of a canned policy in seconds
    #[clap(long, default_value_t = DEFAULT_SECONDS_BEFORE_EXPIRES)]
    pub(crate) seconds_before_expires: u64,
}

pub fn subcommand_sign(args: &SignArgs) -> Result<()> {
    let cookies = sign(args)?;
    info!(
        key_pair_id = cookies.key_pair_id(),
        "generated CloudFront signed cookies"
    );
    println!("{}", render_cookies(&cookies)?);
    Ok(())
}

fn sign(args: &SignArgs) -> Result<SignedCookies> {
    let signer = CookieSigner::from_pem_file(&args.key_pair_id, &args.private_key)
        .with_context(|| format!("Failed to load signing key from {:?}", args.private_key))?;

    let mut request =
        CookieRequest::builder().seconds_before_expires(args.seconds_before_expires);
    if let Some(resource) = &args.resource {
        request = request.resource(resource);
    }
    if let Some(path) = &args.policy {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file at {:?}", path))?;
        request = request.policy(CustomPolicy::from_json(&json)?);
    }

    Ok(signer.generate_cookies(&request.build())?)
}

/// Renders the cookies as a JSON object keyed by cookie name.
fn render_cookies(cookies: &SignedCookies) -> Result<String> {
    let object: Map<String, Value> = cookies
        .iter()
        .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
        .collect();
    serde_json::to_string_pretty(&Value::Object(object)).context("Failed to render cookies")
}
