use anyhow::Result;
use clap::Parser;
use pdf2john::{BatchReport, ExtractError, ExtractOptions, Extraction, FileOutcome, PdfHashExtractor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "pdf2john",
    about = "Extract password hashes from encrypted PDF files for John the Ripper",
    version,
    author
)]
struct Cli {
    /// PDF file(s) to extract information from
    #[arg(required = true)]
    pdf_files: Vec<PathBuf>,

    /// Print the encryption dictionary after each hash
    #[arg(short, long)]
    debug: bool,

    /// Prefix each hash with its file name (file:hash)
    #[arg(short, long)]
    show_filename: bool,

    /// Reject files whose security handler is not /Standard
    #[arg(long)]
    strict: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ExtractOptions::default().with_strict(cli.strict);
    let extractor = PdfHashExtractor::with_options(options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut report = BatchReport::new();

    for path in &cli.pdf_files {
        tracing::info!("Analyzing {}", path.display());
        let outcome = extractor.extract_outcome(path);
        print_outcome(&mut out, &outcome, &cli)?;
        report.push(outcome);
    }
    out.flush()?;

    tracing::debug!(
        "{} hashes extracted, {} files skipped",
        report.success_count(),
        report.failure_count()
    );

    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn print_outcome<W: Write>(out: &mut W, outcome: &FileOutcome, cli: &Cli) -> io::Result<()> {
    match outcome.result() {
        Ok(extraction) => {
            if cli.show_filename {
                writeln!(
                    out,
                    "{}:{}",
                    outcome.path().display(),
                    extraction.descriptor()
                )?;
            } else {
                writeln!(out, "{}", extraction.descriptor())?;
            }

            if cli.debug {
                print_dictionary(out, extraction)?;
            }
        }
        Err(ExtractError::NotEncrypted) => writeln!(out, "{outcome}")?,
        Err(_) => writeln!(io::stderr(), "{outcome}")?,
    }
    Ok(())
}

fn print_dictionary<W: Write>(out: &mut W, extraction: &Extraction) -> io::Result<()> {
    writeln!(out, "Encryption Dictionary:")?;
    for (key, value) in extraction.dictionary().iter() {
        writeln!(out, "/{key}: {value}")?;
    }
    Ok(())
}
