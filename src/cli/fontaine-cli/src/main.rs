//! Fontaine CLI - seed the process generator from OS entropy and emit bytes.
//!
//! This binary plays the roles the core deliberately leaves to external
//! collaborators: it harvests entropy from the operating system CSPRNG,
//! feeds the generator, installs it as the process default, and pulls
//! random bytes back out.

use std::io::{self, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fontaine_core::{Generator, GeneratorConfig, Source};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "fontaine")]
#[command(about = "Fontaine CLI - Pluggable CSPRNG driver")]
#[command(version)]
struct Cli {
    /// Generator algorithm
    #[arg(long, value_enum, default_value_t = BackendKind::Fortuna)]
    backend: BackendKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random bytes
    Generate {
        /// Number of bytes to generate
        #[arg(long, default_value = "32")]
        bytes: usize,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Hex)]
        format: Format,
    },
    /// Show generator parameters
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendKind {
    /// Pool-based Fortuna backend
    Fortuna,
    /// Deterministic HMAC-DRBG backend
    HmacDrbg,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Hex,
    Base64,
    Raw,
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let generator = seeded_generator(cli.backend);
    match cli.command {
        Commands::Generate { bytes, format } => {
            fontaine_core::set_default_generator(generator)
                .context("default generator already installed")?;
            let output = fontaine_core::generate(bytes).context("generation failed")?;
            emit(&output, format)?;
        }
        Commands::Info => {
            println!("backend:  {}", cli.backend.name());
            println!("block:    {} bytes", generator.block());
            println!("pools:    {}", generator.pools());
            println!("seeded:   {}", generator.seeded());
        }
    }

    Ok(())
}

/// Builds a generator seeded from the OS CSPRNG.
fn seeded_generator(kind: BackendKind) -> Generator {
    let mut seed = [0u8; 64];
    OsRng.fill_bytes(&mut seed);

    let config = GeneratorConfig {
        seed: Some(seed.to_vec()),
        ..GeneratorConfig::default()
    };
    let mut generator = match kind {
        BackendKind::Fortuna => Generator::fortuna(config),
        BackendKind::HmacDrbg => Generator::hmac_drbg(config),
    };

    // Keep the pools fed as well, not just the initial key.
    let mut fragment = [0u8; 32];
    for _ in 0..4 {
        OsRng.fill_bytes(&mut fragment);
        generator.accumulate(Source::OS, &fragment);
    }

    tracing::debug!(
        block = generator.block(),
        pools = generator.pools(),
        "generator seeded from OS entropy"
    );
    generator
}

impl BackendKind {
    fn name(self) -> &'static str {
        match self {
            BackendKind::Fortuna => "fortuna",
            BackendKind::HmacDrbg => "hmac-drbg",
        }
    }
}

fn emit(bytes: &[u8], format: Format) -> Result<()> {
    match format {
        Format::Hex => println!("{}", hex_encode(bytes)),
        Format::Base64 => println!("{}", BASE64.encode(bytes)),
        Format::Raw => io::stdout()
            .write_all(bytes)
            .context("failed to write to stdout")?,
    }
    Ok(())
}

/// Encodes bytes as lowercase hexadecimal.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(HEX_CHARS[(byte >> 4) as usize] as char);
        hex.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
    }
    hex
}
