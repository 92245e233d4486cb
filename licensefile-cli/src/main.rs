//! License file verifier
//!
//! Checks a license file's signature, decrypts it with the license key and
//! prints the license claims if they are within their validity window.
//!
//! Usage:
//!   KEYGEN_PUBLIC_KEY=<base64 DER> licensefile --path license.lic --license <KEY>
//!
//! Exits non-zero if any stage fails.

use std::{fs, path::PathBuf, process::ExitCode};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use licensefile::{
    cipher, claims, envelope, Clock, FixedClock, LicenseError, SignatureVerifier, SystemClock,
    VerifierConfig,
};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "licensefile")]
#[command(about = "Verify and decrypt a signed, encrypted license file")]
struct Args {
    /// Path to the license file
    #[arg(short, long)]
    path: PathBuf,

    /// License key used to decrypt the license file
    #[arg(short, long, env = "LICENSE_KEY", hide_env_values = true)]
    license: String,

    /// Base64 DER-encoded Ed25519 public key of the issuer
    #[arg(long, env = "KEYGEN_PUBLIC_KEY", hide_env_values = true)]
    public_key: Option<String>,

    /// Path to a DER-encoded Ed25519 public key (takes precedence over --public-key)
    #[arg(long)]
    public_key_file: Option<PathBuf>,

    /// Check the validity window at this RFC 3339 time instead of now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err).red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let verifier = SignatureVerifier::new(&config)?;

    info!("Verifying license file {}", args.path.display());
    let artifact = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read license file {}", args.path.display()))?;

    let envelope = envelope::parse(&artifact)?;
    println!("{}", "License file format is valid!".green());

    let verified = verifier.verify(envelope)?;
    println!("{}", "License file signature is valid!".green());

    let plaintext = cipher::decrypt(&verified, &args.license)?;
    println!("{}", "License file decrypted!".green());

    let now = match args.at {
        Some(at) => FixedClock(at).now(),
        None => SystemClock.now(),
    };
    debug!("Checking validity window at {}", now);
    let record = claims::validate(&plaintext, now)?;

    println!("{}", "License file:".green());
    let json = serde_json::to_string_pretty(&record).context("failed to render license")?;
    println!("{}", json.green());
    Ok(())
}

/// Resolves the issuer key from a DER file or the base64 argument/environment.
fn load_config(args: &Args) -> Result<VerifierConfig> {
    if let Some(path) = &args.public_key_file {
        let der = fs::read(path)
            .with_context(|| format!("failed to read public key {}", path.display()))?;
        debug!("Loaded public key from {}", path.display());
        return Ok(VerifierConfig::new(der)?);
    }

    match &args.public_key {
        Some(encoded) => Ok(VerifierConfig::from_base64(encoded)?),
        None => Err(LicenseError::Config(
            "DER-encoded Ed25519 public key is required (set KEYGEN_PUBLIC_KEY)".to_string(),
        )
        .into()),
    }
}

fn render_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<LicenseError>() {
        Some(license_err) => format!("Error [{}]: {license_err}", license_err.stage()),
        None => format!("Error: {err:#}"),
    }
}
