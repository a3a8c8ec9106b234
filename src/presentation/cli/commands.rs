//! CLI commands using clap

use crate::domain::services::DigestAlgorithm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sigcarve - signature-based file carving
///
/// Recovers files embedded in raw disk or memory images by their header
/// and footer byte signatures, without any filesystem metadata.
#[derive(Parser)]
#[command(name = "sigcarve")]
#[command(version, about = "Carve files out of raw disk images", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan an image and carve every recognised file
    Scan {
        /// Path to the image file (img, dsk, dd, iso, bin)
        #[arg(short, long)]
        image: PathBuf,

        /// Output directory for carved files
        #[arg(short, long, default_value = "./recovered_files")]
        output: PathBuf,

        /// File types to carve (jpg, png, pdf, zip, or types from --signatures)
        #[arg(short = 't', long, value_delimiter = ',')]
        types: Option<Vec<String>>,

        /// Footer search window in MiB
        #[arg(short, long, default_value = "10")]
        window_mib: usize,

        /// Largest accepted image in MiB
        #[arg(long, default_value = "500")]
        max_image_mib: u64,

        /// JSON signature table replacing the built-in one
        #[arg(short, long)]
        signatures: Option<PathBuf>,

        /// Digest algorithm for carved files (sha256, sha512)
        #[arg(long, default_value = "sha256")]
        digest: DigestAlgorithm,

        /// Prefix for carved file names
        #[arg(long, default_value = "recovered")]
        prefix: String,

        /// Memory-map the image instead of reading it into memory
        #[arg(long)]
        mmap: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List carved files in an output directory
    List {
        /// Output directory to list
        #[arg(short, long, default_value = "./recovered_files")]
        output: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy one carved file out of an output directory
    Get {
        /// Name of the carved file (e.g. recovered_1.jpg)
        name: String,

        /// Output directory holding the carved file
        #[arg(short, long, default_value = "./recovered_files")]
        output: PathBuf,

        /// Destination path
        #[arg(long)]
        to: PathBuf,
    },

    /// Delete all carved files in an output directory
    Clear {
        /// Output directory to clear
        #[arg(short, long, default_value = "./recovered_files")]
        output: PathBuf,
    },

    /// List supported file signatures
    Signatures {
        /// JSON signature table to show instead of the built-in one
        #[arg(short, long)]
        signatures: Option<PathBuf>,
    },
}

/// Normalizes `--types` values to registry type tags
pub fn parse_file_types(types: Option<Vec<String>>) -> Vec<String> {
    match types {
        None => vec![], // All types
        Some(type_strs) => type_strs
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| match s.as_str() {
                "jpeg" => "jpg".to_string(),
                _ => s,
            })
            .collect(),
    }
}
