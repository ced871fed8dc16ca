use regex::Regex;

use crate::{
    config::ReportConfig,
    util::decimal::{
        is_negative, is_positive, GreaterEqualZeroDecimal, LessEqualZeroDecimal,
        NumberFormat,
    },
};

use super::{
    error::ReportError,
    model::{RawDocument, RealizedGainRecord},
    section::SectionLocator,
};

pub const REALIZED_SECTION_NAME: &str = "Realized gains/losses";

// Product names are only observed to wrap onto one extra line, but allow
// a little more before treating the text as unrelated.
const MAX_WRAPPED_NAME_LINES: usize = 2;

// A line naming the table columns. Never part of a product name.
const COLUMN_HEADER_TOKEN: &str = "ISIN";

const ISIN_PATTERN: &str = r"[A-Z]{2}[A-Z0-9]{9}[0-9]";

/// Realized gain/loss records, and their net results bucketed by sign and by
/// domestic/foreign.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct RealizedGains {
    pub records: Vec<RealizedGainRecord>,
    pub total_positive: GreaterEqualZeroDecimal,
    pub total_negative: LessEqualZeroDecimal,
    pub domestic_positive: GreaterEqualZeroDecimal,
    pub domestic_negative: LessEqualZeroDecimal,
    pub foreign_positive: GreaterEqualZeroDecimal,
    pub foreign_negative: LessEqualZeroDecimal,
}

impl RealizedGains {
    pub fn from_records(records: Vec<RealizedGainRecord>, domestic_code: &str) -> Self {
        let mut gains = RealizedGains::default();
        for r in &records {
            let net = r.net_result();
            let domestic = r.jurisdiction.is_domestic(domestic_code);
            if is_positive(&net) {
                let gain = GreaterEqualZeroDecimal::from_abs(net);
                gains.total_positive += gain;
                if domestic {
                    gains.domestic_positive += gain;
                } else {
                    gains.foreign_positive += gain;
                }
            } else if is_negative(&net) {
                let loss = LessEqualZeroDecimal::from_neg_abs(net);
                gains.total_negative += loss;
                if domestic {
                    gains.domestic_negative += loss;
                } else {
                    gains.foreign_negative += loss;
                }
            }
        }
        gains.records = records;
        gains
    }
}

/// Scans the realized gains section for product rows.
///
/// Unlike the dividend table, this one is parsed tolerantly. Spacing in it is
/// irregular and product names wrap, so anything which is not a row is
/// skipped. A sample of the text:
///
/// Realisierte Gewinne/Verluste je Produkt
/// Produkt ISIN Gewinn/Verlust Transaktionsgebühr
/// VANGUARD FTSE ALL-WORLD UCITS ETF IE00B3RBWM25 120,50 -2,00
/// ISHARES CORE MSCI EMERGING
/// MARKETS IMI UCITS ETF IE00BKM4GZ66 -35,10 -1,00
/// Summe 85,40 -3,00
pub struct RealizedRowScanner {
    row_re: Regex,
    isin_re: Regex,
    amount_token_re: Regex,
    number_format: NumberFormat,
}

impl RealizedRowScanner {
    pub fn new(number_format: &NumberFormat) -> Result<Self, ReportError> {
        let num = number_format.regex_fragment();
        let row_pattern = format!(
            r"^(?P<product>.*?)\s*(?P<isin>{ISIN_PATTERN})\s+(?P<pl>{num})\s+(?P<fee>{num})\s*$"
        );
        let build = |p: &str| {
            Regex::new(p).map_err(|e| {
                ReportError::InvalidConfig(format!("Bad realized row pattern: {e}"))
            })
        };
        Ok(RealizedRowScanner {
            row_re: build(&row_pattern)?,
            isin_re: build(ISIN_PATTERN)?,
            amount_token_re: build(&format!("^(?:{num})$"))?,
            number_format: number_format.clone(),
        })
    }

    fn parse_row(&self, line: &str, name_prefix: &[&str]) -> Option<RealizedGainRecord> {
        let m = self.row_re.captures(line)?;
        // Both only fail if the number regex and parser disagree.
        let realized = self.number_format.parse(&m["pl"]).ok()?;
        let fee = self.number_format.parse(&m["fee"]).ok()?;

        let mut name_parts: Vec<&str> = name_prefix.to_vec();
        let row_product = m["product"].trim();
        if !row_product.is_empty() {
            name_parts.push(row_product);
        }

        Some(RealizedGainRecord::new(
            name_parts.join(" "),
            m["isin"].to_string(),
            realized,
            // Fees are sometimes printed as a (negative) cost
            GreaterEqualZeroDecimal::from_abs(fee),
        ))
    }

    /// Whether a line which is not a row ends any product name in progress.
    /// Names may contain numbers ("S&P 500"), but not an ISIN or a run of
    /// amounts, as sums and other broken rows do.
    fn ends_name(&self, line: &str) -> bool {
        let mut n_amounts = 0;
        for token in line.split_whitespace() {
            if token == COLUMN_HEADER_TOKEN {
                return true;
            }
            if self.amount_token_re.is_match(token) {
                n_amounts += 1;
            }
        }
        n_amounts >= 2 || self.isin_re.is_match(line)
    }

    pub fn scan(&self, section: &str) -> Vec<RealizedGainRecord> {
        let mut records = Vec::new();
        // Lines which may be the start of the next row's product name
        let mut pending_name: Vec<&str> = Vec::new();

        for line in section.lines().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            if let Some(record) = self.parse_row(line, &pending_name) {
                tracing::trace!("RealizedRowScanner row: {:?}", record);
                records.push(record);
                pending_name.clear();
            } else if self.ends_name(line) {
                tracing::trace!("RealizedRowScanner skipping \"{line}\"");
                pending_name.clear();
            } else {
                if pending_name.len() == MAX_WRAPPED_NAME_LINES {
                    let dropped = pending_name.remove(0);
                    tracing::trace!("RealizedRowScanner skipping \"{dropped}\"");
                }
                pending_name.push(line);
            }
        }
        records
    }
}

pub fn parse_realized_section(
    section: &str,
    config: &ReportConfig,
) -> Result<RealizedGains, ReportError> {
    let scanner = RealizedRowScanner::new(&config.number_format)?;
    let gains = RealizedGains::from_records(scanner.scan(section), &config.domestic_code);
    tracing::debug!(
        "Realized: {} records, gains {} losses {} (domestic {}/{}, foreign {}/{})",
        gains.records.len(),
        gains.total_positive,
        gains.total_negative,
        gains.domestic_positive,
        gains.domestic_negative,
        gains.foreign_positive,
        gains.foreign_negative
    );
    Ok(gains)
}

/// Locates and scans the realized gains table. A missing section is
/// returned as SectionNotFound, which callers treat as "no data".
pub fn extract_realized_gains(
    doc: &RawDocument,
    config: &ReportConfig,
) -> Result<RealizedGains, ReportError> {
    let locator = SectionLocator::new(REALIZED_SECTION_NAME, &config.realized_section)?;
    let section = locator.locate(doc.text())?;
    parse_realized_section(section, config)
}
