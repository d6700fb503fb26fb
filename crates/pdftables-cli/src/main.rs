mod commands;
mod output;

use clap::{Parser, Subcommand};
use pdftables_core::partition::{Strategy, DEFAULT_MAX_PARTITION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdftables",
    version,
    about = "Extract tables from PDF documents as structured data and HTML"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract all tables from a PDF
    Extract {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Partitioning strategy: hi_res (default), auto, fast or ocr_only
        #[arg(short, long, default_value = "hi_res")]
        strategy: Strategy,

        /// Partition ceiling handed to the engine (0 disables it)
        #[arg(long, default_value_t = DEFAULT_MAX_PARTITION)]
        max_partition: usize,

        /// OCR language(s), e.g. eng
        #[arg(short, long = "language", value_name = "LANG")]
        languages: Vec<String>,

        /// Python interpreter with the `unstructured` package installed
        #[arg(long, env = "PDFTABLES_PYTHON", default_value = "python3")]
        python: String,

        /// Replay element JSON saved from an earlier engine run instead of partitioning
        #[arg(long, value_name = "FILE")]
        elements: Option<PathBuf>,

        /// Output format: table (default), json or html
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the extraction as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Check that the external tools needed for extraction are installed
    Doctor {
        /// Python interpreter with the `unstructured` package installed
        #[arg(long, env = "PDFTABLES_PYTHON", default_value = "python3")]
        python: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            strategy,
            max_partition,
            languages,
            python,
            elements,
            output,
            out,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_file,
            strategy,
            max_partition: (max_partition > 0).then_some(max_partition),
            languages,
            python,
            elements,
            output_format: output,
            out,
        }),
        Commands::Doctor { python } => commands::doctor::run(&python),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
