use rust_decimal::Decimal;

use crate::{
    config::{DividendColumn, ReportConfig},
    util::decimal::NumberFormat,
};

use super::{
    error::ReportError,
    model::{DividendRecord, Jurisdiction, RawDocument},
    section::SectionLocator,
};

pub const DIVIDEND_SECTION_NAME: &str = "Dividend";

/// The parsed dividend table, and the sums the formulas need from it.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct DividendTable {
    pub records: Vec<DividendRecord>,
    pub total_gross: Decimal,
    pub domestic_gross: Decimal,
    pub foreign_gross: Decimal,
    /// Withheld on domestic dividends, ie. already paid capital gains tax.
    pub domestic_withholding: Decimal,
}

impl DividendTable {
    pub fn from_records(records: Vec<DividendRecord>, domestic_code: &str) -> Self {
        let mut table = DividendTable::default();
        for r in &records {
            table.total_gross += r.gross_dividend;
            if r.jurisdiction.is_domestic(domestic_code) {
                table.domestic_gross += r.gross_dividend;
                table.domestic_withholding += r.withholding_tax;
            } else {
                table.foreign_gross += r.gross_dividend;
            }
        }
        table.records = records;
        table
    }
}

/// Splits a row into exactly one token per configured column.
///
/// Sample row:
/// DE 100,00 26,38 73,62
fn parse_row(
    line_num: usize,
    line: &str,
    columns: &[DividendColumn],
    fmt: &NumberFormat,
) -> Result<DividendRecord, ReportError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != columns.len() {
        return Err(ReportError::MalformedRow {
            line_num,
            line: line.to_string(),
            n_tokens: tokens.len(),
        });
    }

    let parse_num = |tok: &str| {
        fmt.parse(tok).map_err(|reason| ReportError::InvalidNumber {
            line_num,
            line: line.to_string(),
            reason,
        })
    };

    let mut record = DividendRecord {
        jurisdiction: Jurisdiction::new(""),
        gross_dividend: Decimal::ZERO,
        withholding_tax: Decimal::ZERO,
        net_dividend: Decimal::ZERO,
    };
    for (col, tok) in columns.iter().zip(tokens) {
        match col {
            DividendColumn::Jurisdiction => record.jurisdiction = Jurisdiction::new(tok),
            DividendColumn::Gross => record.gross_dividend = parse_num(tok)?,
            DividendColumn::Withholding => record.withholding_tax = parse_num(tok)?,
            DividendColumn::Net => record.net_dividend = parse_num(tok)?,
        }
    }
    Ok(record)
}

/// Parses the text between the dividend table header and the end anchor.
///
/// The table is strict: the last non-empty line is always the total (and is
/// dropped), and every other line must be a complete row. One bad row fails
/// the whole table, since a half-read tax table is worse than none.
///
/// Land Bruttodividende Quellensteuer Nettodividende
/// DE 100,00 26,38 73,62
/// US 50,00 7,50 42,50
/// 150,00 33,88 116,12
/// Kuponübersicht
pub fn parse_dividend_section(
    section: &str,
    config: &ReportConfig,
) -> Result<DividendTable, ReportError> {
    let lines: Vec<&str> =
        section.lines().map(|l| l.trim()).filter(|l| !l.is_empty()).collect();

    let row_lines = match lines.split_last() {
        Some((total_line, rows)) => {
            tracing::trace!("parse_dividend_section dropping total line \"{total_line}\"");
            rows
        }
        None => &[],
    };

    let mut records = Vec::with_capacity(row_lines.len());
    for (i, line) in row_lines.iter().enumerate() {
        let record =
            parse_row(i + 1, line, &config.dividend_columns, &config.number_format)?;
        tracing::trace!("parse_dividend_section row {}: {:?}", i + 1, record);
        records.push(record);
    }

    let table = DividendTable::from_records(records, &config.domestic_code);
    tracing::debug!(
        "Dividends: {} records, gross {} (domestic {}, foreign {})",
        table.records.len(),
        table.total_gross,
        table.domestic_gross,
        table.foreign_gross
    );
    Ok(table)
}

/// Locates and parses the dividend table. SectionNotFound is returned as an
/// error like the others; deciding to carry on without it is up to the caller.
pub fn extract_dividends(
    doc: &RawDocument,
    config: &ReportConfig,
) -> Result<DividendTable, ReportError> {
    let locator = SectionLocator::new(DIVIDEND_SECTION_NAME, &config.dividend_section)?;
    let section = locator.locate(doc.text())?;
    parse_dividend_section(section, config)
}
