use crate::{
    config::ReportConfig,
    log::report_warning,
    report::{
        aggregate::Aggregates,
        dividends::{extract_dividends, DividendTable},
        error::ReportError,
        fees::extract_transaction_fee,
        formula::compute_report_lines,
        model::{RawDocument, ReportLine, SummaryEntry},
        realized::{extract_realized_gains, RealizedGains},
        render::{
            render_aggregates, render_dividends, render_realized_gains, render_report_lines,
            render_summary_entries, RenderTable,
        },
        summary::extract_summary_entries,
    },
    util::{decimal::GreaterEqualZeroDecimal, rw::WriteHandle},
};

use super::outfmt::model::{OutputType, ReportWriter};

/// Everything derived from one statement. Built fresh on every run.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct KapReport {
    pub dividends: DividendTable,
    pub realized: RealizedGains,
    pub transaction_fee: GreaterEqualZeroDecimal,
    pub aggregates: Aggregates,
    pub lines: Vec<ReportLine>,
    pub summary_entries: Vec<SummaryEntry>,
    /// Recoverable problems, as also written to err_w. Carried into the
    /// report table so they are not lost with the terminal output.
    pub warnings: Vec<String>,
}

/// A missing section means there is nothing of that kind to report.
/// Anything else is passed on.
fn or_empty_if_missing<T: Default>(
    res: Result<T, ReportError>,
    err_w: &mut WriteHandle,
    warnings: &mut Vec<String>,
) -> Result<T, ReportError> {
    match res {
        Ok(v) => Ok(v),
        Err(e) if e.is_recoverable() => {
            let warning = format!("{e}. Assuming there is none");
            report_warning(err_w, &warning);
            warnings.push(warning);
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Runs the parsing and aggregation stages, in order.
///
/// Recoverable problems are reported to err_w. Returned errors are fatal,
/// and nothing should be written for them.
pub fn generate_report(
    doc: &RawDocument,
    config: &ReportConfig,
    err_w: &mut WriteHandle,
) -> Result<KapReport, ReportError> {
    let mut warnings = Vec::new();
    let dividends = or_empty_if_missing(extract_dividends(doc, config), err_w, &mut warnings)?;
    let realized =
        or_empty_if_missing(extract_realized_gains(doc, config), err_w, &mut warnings)?;
    let transaction_fee = extract_transaction_fee(doc, config)?;
    let summary_entries = extract_summary_entries(doc, config)?;

    let aggregates = Aggregates::compute(&dividends, &realized, transaction_fee);
    for (name, val) in aggregates.entries() {
        tracing::debug!("{name}: {val}");
    }
    let lines = compute_report_lines(&aggregates, config);
    tracing::info!(
        "Computed {} report lines from {} dividend and {} realized records",
        lines.len(),
        dividends.records.len(),
        realized.records.len()
    );

    Ok(KapReport {
        dividends,
        realized,
        transaction_fee,
        aggregates,
        lines,
        summary_entries,
        warnings,
    })
}

impl KapReport {
    /// The tables to write. The report lines always come first; details
    /// adds the extracted records behind them.
    pub fn render_tables(
        &self,
        config: &ReportConfig,
        details: bool,
    ) -> Vec<(OutputType, RenderTable)> {
        let mut report_table = render_report_lines(&self.lines, &config.currency);
        report_table.errors = self.warnings.clone();
        let mut tables = vec![(OutputType::Report, report_table)];
        if details {
            tables.push((OutputType::Dividends, render_dividends(&self.dividends)));
            tables.push((OutputType::RealizedGains, render_realized_gains(&self.realized)));
            tables.push((OutputType::Summary, render_summary_entries(&self.summary_entries)));
            tables.push((OutputType::Aggregates, render_aggregates(&self.aggregates)));
        }
        tables
    }
}

pub fn write_report(
    report: &KapReport,
    config: &ReportConfig,
    details: bool,
    mut writer: Box<dyn ReportWriter>,
) -> Result<(), ReportError> {
    for (out_type, table) in report.render_tables(config, details) {
        writer
            .print_render_table(out_type, &table)
            .map_err(ReportError::SinkWriteFailure)?;
    }
    writer.finish().map_err(ReportError::SinkWriteFailure)
}
