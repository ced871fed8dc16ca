use std::fmt;

use rust_decimal::Decimal;

use crate::util::decimal::GreaterEqualZeroDecimal;

/// The full text of the statement, as rendered by the text source.
/// Every parser only ever borrows it.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RawDocument {
    text: String,
}

impl RawDocument {
    pub fn new(text: String) -> Self {
        RawDocument { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&str> for RawDocument {
    fn from(value: &str) -> Self {
        RawDocument::new(value.to_string())
    }
}

/// Two-letter country prefix, either from the dividend table's "Land"
/// column or from the first two characters of an ISIN.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(code: &str) -> Self {
        Jurisdiction(code.to_string())
    }

    pub fn from_isin(isin: &str) -> Self {
        Jurisdiction(isin.chars().take(2).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_domestic(&self, domestic_code: &str) -> bool {
        self.0 == domestic_code
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the dividend table (per country).
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DividendRecord {
    pub jurisdiction: Jurisdiction,
    pub gross_dividend: Decimal,
    pub withholding_tax: Decimal,
    // Expected to be gross - withholding, but taken as printed.
    pub net_dividend: Decimal,
}

impl DividendRecord {
    /// withholding / gross. None when nothing was paid out.
    pub fn tax_rate(&self) -> Option<Decimal> {
        if self.gross_dividend.is_zero() {
            None
        } else {
            Some(self.withholding_tax / self.gross_dividend)
        }
    }
}

/// One product row of the realized gains/losses table.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RealizedGainRecord {
    pub product: String,
    pub isin: String,
    pub realized_gain_loss: Decimal,
    pub transaction_fee: GreaterEqualZeroDecimal,
    pub jurisdiction: Jurisdiction,
}

impl RealizedGainRecord {
    pub fn new(
        product: String,
        isin: String,
        realized_gain_loss: Decimal,
        transaction_fee: GreaterEqualZeroDecimal,
    ) -> Self {
        let jurisdiction = Jurisdiction::from_isin(&isin);
        RealizedGainRecord {
            product,
            isin,
            realized_gain_loss,
            transaction_fee,
            jurisdiction,
        }
    }

    pub fn net_result(&self) -> Decimal {
        self.realized_gain_loss - *self.transaction_fee
    }
}

/// A "<description> <amount> EUR" line from anywhere in the document.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SummaryEntry {
    pub description: String,
    pub amount: Decimal,
    // As printed, eg. "1.234,56 EUR"
    pub raw: String,
}

/// One filled-in field of the tax form.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ReportLine {
    pub line_id: &'static str,
    pub description: &'static str,
    pub amount: Decimal,
}
