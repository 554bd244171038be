#![deny(unsafe_code)]
//! CLI binary for the reefgen synthetic segmentation dataset generator.
//!
//! Subcommands:
//! - `generate` writes a batch of image/mask sample directories
//! - `convert <dir>` turns every sample's PNGs into NIfTI volumes
//! - `schema` prints the default scene parameters and their schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use reefgen_core::seed::DEFAULT_QUOTA;
use reefgen_core::{Label, LabelEncoding};
use reefgen_export::{convert_dataset, BatchConfig};
use reefgen_scene::SceneParams;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reefgen", about = "Synthetic underwater segmentation dataset generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a batch of scenes as image/mask sample directories.
    Generate {
        /// Dataset directory; samples land in `sample_NNNNN/` below it.
        #[arg(short, long, default_value = "dataset")]
        output: PathBuf,

        /// Number of samples to write.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 256)]
        height: u32,

        #[arg(long, default_value_t = DEFAULT_QUOTA)]
        fish: u32,

        #[arg(long, default_value_t = DEFAULT_QUOTA)]
        sharks: u32,

        #[arg(long, default_value_t = DEFAULT_QUOTA)]
        corals: u32,

        /// Batch seed; each sample derives its own seed from it.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Scene parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Mask value scheme: "index" (0-4) or "spread" (0-255).
        #[arg(long, default_value = "spread")]
        mask_encoding: String,
    },
    /// Convert every sample's image.png / mask.png to NIfTI volumes.
    Convert {
        /// Dataset directory containing sample subdirectories.
        dir: PathBuf,
    },
    /// Print the default scene parameters and their schema.
    Schema,
}

/// Mask byte of every label under `encoding`, keyed by label name.
fn mask_values(encoding: LabelEncoding) -> serde_json::Value {
    Label::ALL
        .iter()
        .map(|&l| (l.name().to_string(), serde_json::json!(encoding.encode(l))))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let info = serde_json::json!({
                "defaults": SceneParams::default().to_json(),
                "schema": SceneParams::schema(),
                "mask_encodings": {
                    "index": mask_values(LabelEncoding::Index),
                    "spread": mask_values(LabelEncoding::Spread),
                },
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Generate {
            output,
            count,
            width,
            height,
            fish,
            sharks,
            corals,
            seed,
            params,
            mask_encoding,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let encoding = LabelEncoding::from_name(&mask_encoding).ok_or_else(|| {
                CliError::Input(format!(
                    "unknown mask encoding '{mask_encoding}' (expected index or spread)"
                ))
            })?;

            let config = BatchConfig {
                output,
                count,
                width,
                height,
                fish,
                sharks,
                corals,
                seed,
                params,
                encoding,
            };
            let samples = config.run()?;

            if cli.json {
                let info = serde_json::json!({
                    "output": config.output.display().to_string(),
                    "width": width,
                    "height": height,
                    "seed": seed,
                    "mask_encoding": mask_encoding,
                    "samples": samples,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "generated {} sample(s) ({width}x{height}, seed {seed}) -> {}",
                    samples.len(),
                    config.output.display()
                );
            }
        }
        Command::Convert { dir } => {
            let converted = convert_dataset(&dir)?;
            if cli.json {
                let info = serde_json::json!({
                    "dir": dir.display().to_string(),
                    "converted": converted,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for c in &converted {
                    println!("{}", c.output.display());
                }
                eprintln!("converted {} file(s) under {}", converted.len(), dir.display());
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_values_list_every_label_by_name() {
        let spread = mask_values(LabelEncoding::Spread);
        assert_eq!(spread["background"], 0);
        assert_eq!(spread["ground"], 100);
        assert_eq!(spread["fish"], 200);
        assert_eq!(spread["shark"], 255);
        assert_eq!(spread["coral"], 150);
        let index = mask_values(LabelEncoding::Index);
        assert_eq!(index.as_object().map(|m| m.len()), Some(5));
        assert_eq!(index["coral"], 4);
    }
}
