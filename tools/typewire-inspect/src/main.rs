// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use typewire::wire::{WireDecoder, WireEncoder};
use typewire::{DescriptorHash, TypeDescriptor, WireLimits};

#[derive(Parser)]
#[command(name = "typewire-inspect")]
#[command(about = "Inspect type descriptors: canonical key, fingerprint, native form, binary frame")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical key of a descriptor
    Key {
        /// Descriptor JSON file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the 14-byte descriptor fingerprint
    Hash {
        /// Descriptor JSON file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Rebuild the native type and print it
    Native {
        /// Descriptor JSON file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Encode a descriptor to its binary frame (hex)
    Encode {
        /// Descriptor JSON file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Decode a binary descriptor frame (hex) back to JSON
    Decode {
        /// Hex-encoded frame
        #[arg(value_name = "HEX")]
        frame: String,

        /// Maximum nesting depth accepted
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Show everything known about a descriptor
    Summary {
        /// Descriptor JSON file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Emit a JSON object instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Key { input } => {
            let desc = load_descriptor(input.as_deref())?;
            println!("{}", desc.canonical_key());
        }
        Commands::Hash { input } => {
            let desc = load_descriptor(input.as_deref())?;
            println!("{}", DescriptorHash::of(&desc));
        }
        Commands::Native { input } => {
            let desc = load_descriptor(input.as_deref())?;
            let native = desc
                .to_native()
                .context("descriptor cannot be rebuilt as a native type")?;
            println!("{}", native);
        }
        Commands::Encode { input } => {
            let desc = load_descriptor(input.as_deref())?;
            println!("{}", to_hex(&encode_descriptor(&desc)?));
        }
        Commands::Decode { frame, max_depth } => {
            cmd_decode(&frame, max_depth)?;
        }
        Commands::Summary { input, json } => {
            let desc = load_descriptor(input.as_deref())?;
            cmd_summary(&desc, json)?;
        }
    }

    Ok(())
}

fn cmd_decode(frame: &str, max_depth: Option<usize>) -> anyhow::Result<()> {
    let bytes = from_hex(frame)?;
    let mut limits = WireLimits::from_env();
    if let Some(depth) = max_depth {
        limits = limits.with_max_depth(depth);
    }

    let mut decoder = WireDecoder::with_limits(&bytes, limits);
    let desc = decoder
        .descriptor()
        .with_context(|| format!("invalid descriptor frame at offset {}", decoder.offset()))?;
    decoder.finish()?;

    println!("{}", desc.to_json_pretty()?);
    Ok(())
}

fn cmd_summary(desc: &TypeDescriptor, json: bool) -> anyhow::Result<()> {
    let key = desc.canonical_key();
    let hash = DescriptorHash::of(desc);
    let frame = encode_descriptor(desc)?;
    let native = desc.to_native();
    log::debug!("summary for {} ({} byte frame)", hash, frame.len());

    if json {
        let (native, error) = match &native {
            Ok(ty) => (Some(ty.to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let out = serde_json::json!({
            "kind": desc.kind().name(),
            "key": key,
            "hash": hash.to_string(),
            "frame_len": frame.len(),
            "native": native,
            "error": error,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("kind:   {}", desc.kind());
    println!("key:    {}", key);
    println!("hash:   {}", hash);
    println!("frame:  {} bytes", frame.len());
    match native {
        Ok(ty) => println!("native: {}", ty),
        Err(e) => println!("native: [NOT REBUILDABLE] {}", e),
    }
    Ok(())
}

fn load_descriptor(input: Option<&Path>) -> anyhow::Result<TypeDescriptor> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };
    TypeDescriptor::from_json(&text).context("invalid descriptor JSON")
}

fn encode_descriptor(desc: &TypeDescriptor) -> anyhow::Result<Vec<u8>> {
    let mut encoder = WireEncoder::new();
    encoder
        .put_descriptor(desc)
        .context("descriptor too large for a binary frame")?;
    Ok(encoder.into_bytes())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        bail!("hex frame has an odd number of digits");
    }

    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).context("non-ASCII hex digit")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("bad hex byte {:?}", pair))
        })
        .collect()
}
