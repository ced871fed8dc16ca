use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{
    app::{
        approot::{generate_report, write_report},
        outfmt::{csv::CsvWriter, model::ReportWriter, text::TextWriter},
        source::load_document,
    },
    config::ReportConfig,
    report::error::ReportError,
    util::rw::WriteHandle,
    write_errln,
};

const ABOUT: &str = "Fills in Anlage KAP from a DEGIRO annual report";

fn get_long_about() -> String {
    "\
Reads a DEGIRO \"Jahresübersicht\" (the PDF, or its text as dumped by pdf-text)
and writes the lines of the German tax form \"Anlage KAP\" to a spreadsheet.

The dividend table, the realized gains/losses table and the total transaction
fees are taken from the report. Printed figures are trusted as-is.

The output format is chosen by the output file extension (.xlsx or .csv).

The statement layout (section headers, column order, number format) and the
tax rates can be overridden with a JSON config file. Omitted fields keep their
defaults, eg.
    { \"domestic_code\": \"DE\", \"solidarity_surcharge_rate\": \"0.055\" }"
        .to_string()
}

#[derive(Parser, Debug)]
#[command(version = crate::app::KAPREPORT_APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    /// The annual report. A .txt file is read as already extracted text.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Report file to write (.xlsx or .csv)
    #[arg(short = 'o', long, default_value = "output.xlsx")]
    pub output: PathBuf,

    /// JSON file overriding the statement layout and tax rates
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Country treated as domestic, eg. DE. Overrides the config file.
    #[arg(long)]
    pub domestic_code: Option<String>,

    /// Also print the report as a table
    #[arg(short = 'p', long)]
    pub pretty: bool,

    /// Also write the extracted dividend and realized gain rows, the summary
    /// lines and the sums (extra sheets, or extra csv files)
    #[arg(long)]
    pub details: bool,

    /// Turn on debug tracing for this crate.
    ///
    /// Set the TRACE variable for finer control.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Defaults, for when only input and output matter.
    pub fn new(input: PathBuf, output: PathBuf) -> Args {
        Args {
            input,
            output,
            config: None,
            domestic_code: None,
            pretty: false,
            details: false,
            debug: false,
        }
    }
}

fn load_config(args: &Args) -> Result<ReportConfig, ReportError> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load_from_path(path).map_err(ReportError::InvalidConfig)?,
        None => ReportConfig::default(),
    };
    if let Some(code) = &args.domestic_code {
        config.domestic_code = code.clone();
    }
    config.validate().map_err(ReportError::InvalidConfig)?;
    Ok(config)
}

fn make_file_writer(output: &Path) -> Result<Box<dyn ReportWriter>, ReportError> {
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(Box::new(CsvWriter::new(output))),
        #[cfg(feature = "xlsx_write")]
        "xlsx" => Ok(Box::new(crate::app::outfmt::xlsx::XlsxWriter::new(output))),
        _ => Err(ReportError::InvalidConfig(format!(
            "Unsupported output file type: {} (use .xlsx or .csv)",
            output.display()
        ))),
    }
}

fn run_report(args: &Args, out_w: WriteHandle, err_w: &mut WriteHandle) -> Result<(), ReportError> {
    let config = load_config(args)?;
    // Checked before any parsing, so a bad output path fails fast.
    let writer = make_file_writer(&args.output)?;

    let doc = load_document(&args.input)?;
    let report = generate_report(&doc, &config, err_w)?;

    if args.pretty {
        write_report(&report, &config, args.details, Box::new(TextWriter::new(out_w)))?;
    }
    write_report(&report, &config, args.details, writer)?;
    tracing::info!("Wrote {}", args.output.display());
    Ok(())
}

pub fn run() -> Result<(), ()> {
    let args = Args::parse();
    run_with_args(
        args,
        WriteHandle::stdout_write_handle(),
        WriteHandle::stderr_write_handle(),
    )
}

/// Returned Err is for exit code determination only.
/// All errors are written to err_w.
pub fn run_with_args(args: Args, out_w: WriteHandle, mut err_w: WriteHandle) -> Result<(), ()> {
    if args.debug {
        crate::tracing::enable_trace_env("kapreport=debug");
    }
    crate::tracing::setup_tracing();
    tracing::debug!("{:#?}", args);

    run_report(&args, out_w, &mut err_w).map_err(|e| write_errln!(err_w, "Error: {e}"))
}
