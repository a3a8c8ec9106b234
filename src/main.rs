use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use sigcarve::application::dto::ScanOptions;
use sigcarve::application::{ArtifactsUseCase, RecoverImageUseCase};
use sigcarve::config::EngineConfig;
use sigcarve::domain::services::SignatureRegistry;
use sigcarve::infrastructure::persistence::LocalArtifactStore;
use sigcarve::presentation::cli::{Cli, Commands, ProgressReporter, parse_file_types};

const MIB: u64 = 1024 * 1024;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug)?;

    match cli.command {
        Commands::Scan {
            image,
            output,
            types,
            window_mib,
            max_image_mib,
            signatures,
            digest,
            prefix,
            mmap,
            json,
        } => {
            let options = ScanOptions {
                image_path: image,
                output_dir: output,
                types: parse_file_types(types),
                window_size: window_mib.saturating_mul(MIB as usize),
                max_image_size: max_image_mib.saturating_mul(MIB),
                signature_table: signatures,
                digest,
                name_prefix: prefix,
                use_mmap: mmap,
            };
            run_scan(&options, json)
        }
        Commands::List { output, json } => run_list(&output, json),
        Commands::Get { name, output, to } => {
            let store = LocalArtifactStore::new(&output)
                .with_context(|| format!("Failed to open {}", output.display()))?;
            let bytes = ArtifactsUseCase::new(store).read(&name)?;
            std::fs::write(&to, &bytes).with_context(|| format!("Failed to write {}", to.display()))?;
            println!("Wrote {} ({} bytes) to {}", name, bytes.len(), to.display());
            Ok(())
        }
        Commands::Clear { output } => {
            let store = LocalArtifactStore::new(&output)
                .with_context(|| format!("Failed to open {}", output.display()))?;
            let removed = ArtifactsUseCase::new(store).clear()?;
            println!("Removed {} recovered files from {}", removed, output.display());
            Ok(())
        }
        Commands::Signatures { signatures } => {
            let table = match signatures {
                Some(path) => EngineConfig::load_signature_table(&path)?,
                None => SignatureRegistry::builtin_signatures(),
            };
            for signature in &table {
                println!("{}", signature);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let level = if debug {
        "sigcarve=trace"
    } else if verbose {
        "sigcarve=debug"
    } else {
        "sigcarve=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn run_scan(options: &ScanOptions, json: bool) -> Result<()> {
    let use_case = RecoverImageUseCase::from_options(options)?;
    let store = LocalArtifactStore::new(&options.output_dir)
        .with_context(|| format!("Failed to open output directory {}", options.output_dir.display()))?;

    let reporter = if json {
        None
    } else {
        let size = std::fs::metadata(&options.image_path)
            .map(|m| m.len())
            .unwrap_or(0);
        Some(ProgressReporter::for_scan(size))
    };

    let report = use_case.execute(
        &options.image_path,
        store,
        options.use_mmap,
        reporter.as_ref().map(|r| r.scan_callback()),
    )?;

    if let Some(reporter) = &reporter {
        reporter.finish(&format!("Scan complete! {} files carved", report.total_files));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        print!("{}", report.summary());
        println!("Output folder: {}", options.output_dir.display());
    }

    Ok(())
}

fn run_list(output: &Path, json: bool) -> Result<()> {
    let store = LocalArtifactStore::new(output)
        .with_context(|| format!("Failed to open {}", output.display()))?;
    let entries = ArtifactsUseCase::new(store).list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recovered files in {}", output.display());
        return Ok(());
    }

    println!("{:<32} {:<8} {:>12}", "NAME", "TYPE", "SIZE");
    println!("{}", "-".repeat(54));
    for entry in &entries {
        println!("{:<32} {:<8} {:>12}", entry.name, entry.type_tag, entry.size);
    }

    Ok(())
}
