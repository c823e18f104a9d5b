/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const PRIVATE_KEY_FILE: &str = "private_key.pem";
const PUBLIC_KEY_FILE: &str = "public_key.pem";

// CloudFront only accepts 2048-bit or larger RSA public keys
const MIN_KEY_SIZE: usize = 2048;

#[derive(Parser, Debug)]
pub struct GenkeysArgs {
    /// Size of the RSA modulus in bits
    #[clap(long, default_value_t = MIN_KEY_SIZE)]
    pub(crate) key_size: usize,
    /// Directory to write `private_key.pem` and `public_key.pem` into
    #[clap(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
    /// Overwrite existing key files
    #[clap(long)]
    pub(crate) force: bool,
}

pub fn subcommand_genkeys(args: &GenkeysArgs) -> Result<()> {
    if args.key_size < MIN_KEY_SIZE {
        bail!(
            "key size must be at least {} bits, got {}",
            MIN_KEY_SIZE,
            args.key_size
        );
    }
    let private_path = args.out_dir.join(PRIVATE_KEY_FILE);
    let public_path = args.out_dir.join(PUBLIC_KEY_FILE);
    if !args.force {
        for path in [&private_path, &public_path] {
            if path.exists() {
                bail!("{:?} already exists; pass --force to overwrite it", path);
            }
        }
    }

    info!(bits = args.key_size, "generating RSA key pair");
    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), args.key_size)
        .context("Failed to generate RSA key")?;
    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|err| anyhow!("Failed to encode private key: {err}"))?;
    let public_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|err| anyhow!("Failed to encode public key: {err}"))?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {:?}", args.out_dir))?;
    write_private(&private_path, private_pem.as_bytes())?;
    fs::write(&public_path, public_pem.as_bytes())
        .with_context(|| format!("Failed to write {:?}", public_path))?;

    info!("wrote {:?} and {:?}", private_path, public_path);
    Ok(())
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .and_then(|mut file| file.write_all(contents))
        .with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
