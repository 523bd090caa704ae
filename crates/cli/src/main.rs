//! `mvars` — command-line front end for the MonetizationVars codec.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load [`config::Config`] from `MVARS_*` environment variables.
//! 3. Initialise logging.
//! 4. Run the selected subcommand (decode / encode / unlock).

mod config;
mod telemetry;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use mvars_codec::{Codec, Value, ValueMap};

#[derive(Debug, Parser)]
#[command(name = "mvars", version, about = "Decrypt, edit, and re-encrypt MonetizationVars save files")]
struct Cli {
    /// Cipher passphrase; overrides MVARS_KEY. Defaults to the passphrase
    /// bundled with the app.
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decrypt a save file and print its variables as JSON.
    Decode {
        /// Encrypted input file.
        input: PathBuf,
        /// Write JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encrypt a JSON object of variables back into save-file text.
    Encode {
        /// JSON input file (flat object of booleans, integers, strings).
        input: PathBuf,
        /// Write encrypted text here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decrypt, switch every false flag to true, and re-encrypt.
    Unlock {
        /// Encrypted input file.
        input: PathBuf,
        /// Write encrypted text here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Command line
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 4. Run
    // -----------------------------------------------------------------------
    let passphrase = cli.key.or_else(|| cfg.key.clone()).unwrap_or_default();
    let codec = Codec::new();

    match cli.command {
        Command::Decode { input, output } => {
            check_filename(&input, &cfg.expected_filename);
            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let vars = codec
                .decode(&text, &passphrase)
                .context("decryption failed — check the key and the file")?;
            info!(entries = vars.len(), "save file decoded");
            let json = serde_json::to_string_pretty(&vars)?;
            write_output(output.as_deref(), &json)
        }
        Command::Encode { input, output } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let vars: ValueMap = serde_json::from_str(&json)
                .context("input must be a flat JSON object of booleans, integers, and strings")?;
            let text = codec.encode(&vars, &passphrase)?;
            info!(entries = vars.len(), "save file encoded");
            write_output(output.as_deref(), &text)
        }
        Command::Unlock { input, output } => {
            check_filename(&input, &cfg.expected_filename);
            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut vars = codec
                .decode(&text, &passphrase)
                .context("decryption failed — check the key and the file")?;
            let changed = unlock_all(&mut vars);
            if changed == 0 {
                info!("no locked flags found; file is already fully unlocked");
            } else {
                info!(changed, "flags switched to true");
            }
            let text = codec.encode(&vars, &passphrase)?;
            write_output(output.as_deref(), &text)
        }
    }
}

/// Switch every `false` flag to `true`, leaving every other value alone.
///
/// Returns how many entries changed.
fn unlock_all(vars: &mut ValueMap) -> usize {
    let mut changed = 0;
    for value in vars.values_mut() {
        if *value == Value::Bool(false) {
            *value = Value::Bool(true);
            changed += 1;
        }
    }
    changed
}

/// Warn when the input file is not named like the on-device save file. The
/// codec does not care, but a mismatch usually means the wrong file was
/// picked.
fn check_filename(path: &Path, expected: &str) {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if name != expected {
            warn!(file = name, expected, "input file name differs from the expected save file name");
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
