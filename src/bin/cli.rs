//! # Command Line Entry Point
//!
//! Hide and extract secret documents in PNG/BMP images using LSB steganography.
//!
//! ## Usage
//!
//! ```bash
//! hide-npng hide image.png secret.txt -o output.png
//! hide-npng extract output.png extracted.txt
//! hide-npng capacity image.png
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use hide_npng::cli::{capacity_command, extract_command, hide_command};
use hide_npng::common::config::{load_config, CodecConfig, CodecSection};
use hide_npng::utils::init_logger;

/// Command-line arguments for the steganography tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML file with a [codec] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a document in an image
    Hide {
        /// Path to the image file (PNG/BMP)
        image_path: PathBuf,
        /// Path to the document to hide
        document_path: PathBuf,
        /// Output image path (default: <image>_hidden.<ext>)
        #[arg(short, long = "output")]
        output_path: Option<PathBuf>,
    },
    /// Extract a document from an image
    Extract {
        /// Path to the image with hidden document
        image_path: PathBuf,
        /// Output path for extracted document (default: <image>_extracted[.ext])
        output_path: Option<PathBuf>,
    },
    /// Show how many bytes an image can hold
    Capacity {
        /// Path to the image file (PNG/BMP)
        image_path: PathBuf,
    },
}

fn run(args: Args) -> anyhow::Result<()> {
    let codec: CodecConfig = match &args.config {
        Some(path) => load_config::<CodecSection, _>(path)?.codec,
        None => CodecConfig::default(),
    };

    match args.command {
        Command::Hide {
            image_path,
            document_path,
            output_path,
        } => {
            let report = hide_command(&codec, &image_path, &document_path, output_path.as_deref())?;
            println!("✓ Success! Document hidden in: {}", report.output_path.display());
            if let Some(ext) = report.extension {
                println!("  Original extension (.{}) will be restored on extraction", ext);
            }
        }
        Command::Extract {
            image_path,
            output_path,
        } => {
            let report = extract_command(&codec, &image_path, output_path.as_deref())?;
            println!("✓ Success! Document extracted to: {}", report.output_path.display());
            if let Some(ext) = report.extension {
                println!("  Original extension (.{}) has been restored", ext);
            }
        }
        Command::Capacity { image_path } => {
            let report = capacity_command(&codec, &image_path)?;
            println!("Image size: {}x{}", report.width, report.height);
            println!("Capacity: {} bytes", report.capacity.max(0));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logger();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
