//! HPP Command Line Tool
//!
//! Provides commands for working with HPP payloads:
//! - validate: check a request JSON against the field rules
//! - sign: validate, default, sign and encode a request for transport
//! - verify: check the signature on a response JSON
//! - decode: reverse the transport encoding and pretty-print

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use hpp_canonical::{
    sign_request, transcode_request, transcode_response, verify_response, Charset, Direction,
};
use hpp_core::{generate_defaults, validate_request, HppRequest, HppResponse};
use hpp_http::{request_to_json, response_from_json};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hpp")]
#[command(version)]
#[command(about = "HPP Command Line Tool - Validate, sign and verify HPP payloads")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request JSON file
    #[command(about = "Validate an HPP request JSON file against the field rules")]
    Validate {
        /// Path to the request JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Sign a request for transmission
    #[command(about = "Validate, default, sign and encode a request JSON file")]
    Sign {
        /// Path to the plain request JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Shared secret (falls back to HPP_SHARED_SECRET)
        #[arg(long)]
        secret: Option<String>,

        /// Charset for the transport encoding
        #[arg(long, default_value = "UTF-8")]
        charset: String,

        /// Print the signed request without the transport encoding
        #[arg(long)]
        plain: bool,
    },

    /// Verify a response signature
    #[command(about = "Verify the signature on a response JSON file")]
    Verify {
        /// Path to the response JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Shared secret (falls back to HPP_SHARED_SECRET)
        #[arg(long)]
        secret: Option<String>,

        /// Charset for the transport encoding
        #[arg(long, default_value = "UTF-8")]
        charset: String,

        /// Treat the file as plain (not transport-encoded) values
        #[arg(long)]
        plain: bool,
    },

    /// Decode a transport-encoded payload
    #[command(about = "Reverse the transport encoding and pretty-print the payload")]
    Decode {
        /// Path to the encoded JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Charset for the transport encoding
        #[arg(long, default_value = "UTF-8")]
        charset: String,

        /// Treat the file as a response (default is request)
        #[arg(long, short)]
        response: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => handle_validate(&file),
        Commands::Sign {
            file,
            secret,
            charset,
            plain,
        } => handle_sign(&file, secret, &charset, plain),
        Commands::Verify {
            file,
            secret,
            charset,
            plain,
        } => handle_verify(&file, secret, &charset, plain),
        Commands::Decode {
            file,
            charset,
            response,
        } => handle_decode(&file, &charset, response),
    }
}

/// The secret comes from the flag or the environment - never an implicit
/// empty string.
fn resolve_secret(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("HPP_SHARED_SECRET").ok())
        .context("No shared secret: pass --secret or set HPP_SHARED_SECRET")
}

fn parse_charset(name: &str) -> Result<Charset> {
    name.parse::<Charset>().context("Unsupported charset")
}

fn read_json(file: &PathBuf) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read file: {}", file.display()))
}

fn handle_validate(file: &PathBuf) -> Result<()> {
    let json = read_json(file)?;

    let request: HppRequest = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {} as HPP request", file.display()))?;
    validate_request(&request).with_context(|| "Request validation failed")?;
    println!("Valid HPP request");

    Ok(())
}

fn handle_sign(file: &PathBuf, secret: Option<String>, charset: &str, plain: bool) -> Result<()> {
    let secret = resolve_secret(secret)?;
    let charset = parse_charset(charset)?;
    let json = read_json(file)?;

    let mut request: HppRequest = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {} as HPP request", file.display()))?;

    if plain {
        validate_request(&request).with_context(|| "Request validation failed")?;
        generate_defaults(&mut request);
        sign_request(&mut request, &secret);
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        let encoded = request_to_json(&mut request, &secret, charset)
            .with_context(|| "Failed to prepare request for transport")?;
        println!("{encoded}");
    }

    Ok(())
}

fn handle_verify(file: &PathBuf, secret: Option<String>, charset: &str, plain: bool) -> Result<()> {
    let secret = resolve_secret(secret)?;
    let charset = parse_charset(charset)?;
    let json = read_json(file)?;

    if plain {
        let response: HppResponse = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {} as HPP response", file.display()))?;
        if !verify_response(&response, &secret) {
            return Err(anyhow!("Signature mismatch: do not honor this response"));
        }
    } else {
        response_from_json(&json, &secret, charset)
            .with_context(|| "Response verification failed")?;
    }

    println!("Signature valid");
    Ok(())
}

fn handle_decode(file: &PathBuf, charset: &str, is_response: bool) -> Result<()> {
    let charset = parse_charset(charset)?;
    let json = read_json(file)?;

    if is_response {
        let mut response: HppResponse = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {} as HPP response", file.display()))?;
        transcode_response(&mut response, Direction::FromTransport, charset)
            .with_context(|| "Failed to decode response")?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let mut request: HppRequest = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {} as HPP request", file.display()))?;
        transcode_request(&mut request, Direction::FromTransport, charset)
            .with_context(|| "Failed to decode request")?;
        println!("{}", serde_json::to_string_pretty(&request)?);
    }

    Ok(())
}
