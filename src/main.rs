//! # danfe CLI
//!
//! Renders the DANFE NFC-e of an authorized XML document.
//!
//! ## Usage
//!
//! ```bash
//! # HTML receipt
//! danfe --input nota.xml --output out/nota.html
//!
//! # PDF through Gotenberg (GOTENBERG_URL, default https://demo.gotenberg.dev)
//! danfe --input nota.xml --output out/nota.pdf --format pdf
//!
//! # Debug logging
//! danfe -vv --input nota.xml --output nota.html
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use danfe::DanfeError;
use danfe::generate::{self, OutputFormat};
use danfe::pdf::{ConverterConfig, PdfConverter};

/// danfe - NFC-e XML to DANFE receipt (HTML or PDF)
#[derive(Parser, Debug)]
#[command(name = "danfe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// NFC-e XML file (nfeProc)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file; missing directories are created
    #[arg(short, long)]
    output: PathBuf,

    /// Output format: html or pdf
    #[arg(short, long, default_value = "html")]
    format: String,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,danfe=info",
        1 => "info,danfe=debug",
        _ => "debug,danfe=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), DanfeError> {
    let format: OutputFormat = cli.format.parse()?;

    if !cli.input.is_file() {
        return Err(DanfeError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input file not found: {}", cli.input.display()),
        )));
    }

    if let Some(dir) = cli.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let xml = std::fs::read(&cli.input)?;
    let converter = PdfConverter::new(ConverterConfig::from_env())?;
    generate::save(&xml, &cli.output, format, &converter)?;

    println!("DANFE ({format}) written to {}", cli.output.display());
    Ok(())
}
