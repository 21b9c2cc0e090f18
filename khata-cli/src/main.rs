use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use khata_banks::parse_document_with;
use khata_core::{TransactionRecord, TxnDirection};
use khata_ingest::{OcrConfig, PdfTextAcquirer, TextAcquirer};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "khata", version, about = "Credit-card statement parser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement PDF and print the structured fields as JSON
    Parse {
        /// Path to the statement PDF
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Also write the transaction table as CSV
        #[arg(long)]
        csv_out: Option<PathBuf>,

        #[command(flatten)]
        acquisition: AcquisitionArgs,
    },

    /// Print the acquired text (native or OCR) for debugging a layout
    Text {
        /// Path to the statement PDF
        file: PathBuf,

        #[command(flatten)]
        acquisition: AcquisitionArgs,
    },
}

#[derive(Args, Debug)]
struct AcquisitionArgs {
    /// Path to the tesseract binary
    #[arg(long, default_value = "tesseract")]
    tesseract: String,

    /// Path to the poppler pdftoppm binary
    #[arg(long, default_value = "pdftoppm")]
    pdftoppm: String,

    /// OCR language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Rasterization DPI for the OCR path
    #[arg(long, default_value_t = 200)]
    dpi: u32,

    /// Skip the OCR fallback entirely
    #[arg(long)]
    no_ocr: bool,
}

impl AcquisitionArgs {
    fn acquirer(&self) -> PdfTextAcquirer {
        PdfTextAcquirer {
            ocr: OcrConfig {
                pdftoppm_path: self.pdftoppm.clone(),
                tesseract_path: self.tesseract.clone(),
                language: self.lang.clone(),
                dpi: self.dpi,
            },
            ocr_enabled: !self.no_ocr,
            ..PdfTextAcquirer::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Parse {
            file,
            pretty,
            csv_out,
            acquisition,
        } => cmd_parse(&file, pretty, csv_out.as_deref(), &acquisition),
        Command::Text { file, acquisition } => cmd_text(&file, &acquisition),
    }
}

fn read_pdf(file: &Path) -> Result<Vec<u8>> {
    let is_pdf = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        bail!("only PDF files are supported");
    }
    std::fs::read(file).with_context(|| format!("reading {}", file.display()))
}

fn cmd_parse(
    file: &Path,
    pretty: bool,
    csv_out: Option<&Path>,
    acquisition: &AcquisitionArgs,
) -> Result<()> {
    let bytes = read_pdf(file)?;
    let parsed = parse_document_with(&acquisition.acquirer(), &bytes);

    if !parsed.bank.is_supported() {
        bail!("only Kotak, ICICI, Axis, HDFC and SBI statements are supported");
    }

    if let Some(path) = csv_out {
        write_transactions_csv(path, &parsed.fields.transactions)?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_text(file: &Path, acquisition: &AcquisitionArgs) -> Result<()> {
    let bytes = read_pdf(file)?;
    let text = acquisition.acquirer().acquire(&bytes);
    println!("{text}");
    Ok(())
}

fn write_transactions_csv(path: &Path, transactions: &[TransactionRecord]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["date", "description", "amount", "type"])?;
    for tx in transactions {
        let direction = match tx.direction {
            TxnDirection::Credit => "Credit",
            TxnDirection::Debit => "Debit",
            TxnDirection::Unstated => "",
        };
        wtr.write_record([
            tx.date.as_str(),
            tx.description.as_str(),
            tx.amount.as_str(),
            direction,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
