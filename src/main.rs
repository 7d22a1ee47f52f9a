use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lassoscope::analysis::{AnalysisOutcome, BundleAnalyzer};
use lassoscope::export;
use lassoscope::stats::format_size;

#[derive(Parser)]
#[command(name = "lassoscope")]
#[command(version)]
#[command(about = "Lasso bundle inspector with per-module size and compression metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a Lasso bundle file
    Analyze {
        /// Path to the bundle file
        path: PathBuf,

        /// Where to write the stats manifest (defaults to ./lasso-stats.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { path, output }) => {
            let mut analyzer = BundleAnalyzer::new()?;
            let outcome = analyzer
                .analyze_file(&path)
                .with_context(|| format!("failed to analyze {}", path.display()))?;

            match outcome {
                AnalysisOutcome::EmptyFile => {
                    println!(
                        "⚠️  {} has no statements; nothing to analyze",
                        path.display()
                    );
                }
                AnalysisOutcome::Report(records) => {
                    let dest = match output {
                        Some(dest) => dest,
                        None => export::default_manifest_path()?,
                    };
                    export::write_manifest_file(&records, &dest)
                        .with_context(|| format!("failed to write {}", dest.display()))?;

                    let bundle = &records[0];
                    println!("📦 Bundle size: {}", format_size(bundle.size));
                    if let (Some(gzip), Some(brotli)) = (bundle.gzip_size, bundle.brotli_size) {
                        println!(
                            "   gzip {} / brotli {}",
                            format_size(gzip),
                            format_size(brotli)
                        );
                    }
                    println!("   {} call sites inventoried", records.len() - 1);
                    println!("✅ Stats written to {}", dest.display());
                }
            }
        }
        Some(Commands::Version) => {
            println!("lassoscope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("Lassoscope - Lasso Bundle Inspector");
            println!("Run 'lassoscope analyze <bundle.js>' to inventory a bundle");
            println!("Run 'lassoscope --help' for more information");
        }
    }

    Ok(())
}
