/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use anyhow::Result;
use clap::Parser;
use subcommand::genkeys::{subcommand_genkeys, GenkeysArgs};
use subcommand::sign::{subcommand_sign, SignArgs};

mod subcommand;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
enum Args {
    /// Generates CloudFront signed cookies for a resource URL or a custom policy
    Sign(SignArgs),
    /// Generates an RSA key pair whose public half can be registered with CloudFront
    Genkeys(GenkeysArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "error,cloudfront_cookies=info".to_owned()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse() {
        Args::Sign(args) => subcommand_sign(&args)?,
        Args::Genkeys(args) => subcommand_genkeys(&args)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn sign_requires_resource_or_policy() {
        let err = Args::try_parse_from([
            "cloudfront-cookies",
            "sign",
            "--key-pair-id",
            "46858301-6fdb-4645-a522-d09b5dea27a5",
            "--private-key",
            "key.pem",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn sign_rejects_resource_and_policy_together() {
        let err = Args::try_parse_from([
            "cloudfront-cookies",
            "sign",
            "--key-pair-id",
            "46858301-6fdb-4645-a522-d09b5dea27a5",
            "--private-key",
            "key.pem",
            "--resource",
            "https://cdn.example.com/video.mp4",
            "--policy",
            "policy.json",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn genkeys_defaults() {
        match Args::try_parse_from(["cloudfront-cookies", "genkeys"]).unwrap() {
            Args::Genkeys(args) => {
                assert_eq!(args.key_size, 2048);
                assert_eq!(args.out_dir, std::path::PathBuf::from("."));
                assert!(!args.force);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
