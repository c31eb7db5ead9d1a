use clap::Parser;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use resconv::cli::{handle_error, Args, CliConfig};
use resconv::conversion::ConversionMetadata;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            handle_error(&e);
            std::process::exit(1);
        }
    };

    let (rendered, metadata) = match config.run() {
        Ok(result) => result,
        Err(e) => {
            handle_error(&e);
            std::process::exit(1);
        }
    };

    if let Some(output_path) = &config.args.output {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, &rendered)?;

        if !config.is_quiet() {
            println!("✓ Converted to: {}", output_path.display());
        }
    } else {
        println!("{}", rendered);
    }

    if config.want_stats() {
        output_statistics(&metadata, config.is_quiet());
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn output_statistics(metadata: &ConversionMetadata, quiet: bool) {
    if quiet {
        return;
    }

    eprintln!("\nConversion Statistics:");
    eprintln!("Fields emitted: {}", metadata.fields_emitted);
    eprintln!("Fields skipped: {}", metadata.fields_skipped);
    eprintln!("Fields redacted: {}", metadata.fields_redacted);
    eprintln!("Elements converted: {}", metadata.elements_converted);
    eprintln!("Max depth: {}", metadata.max_depth_reached);
    eprintln!("Processing time: {}ms", metadata.processing_time_ms);
}
