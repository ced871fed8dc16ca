use regex::Regex;

use crate::config::ReportConfig;

use super::{
    error::ReportError,
    model::{RawDocument, SummaryEntry},
};

/// Collects every "<description> <amount> EUR" pair in the document, such as
/// the account overview ("Einzahlungen 5.000,00 EUR"). A line can hold
/// several pairs.
///
/// This is informational only, and is emitted with the detail tables.
pub fn extract_summary_entries(
    doc: &RawDocument,
    config: &ReportConfig,
) -> Result<Vec<SummaryEntry>, ReportError> {
    let pattern = format!(
        r"(?P<desc>.*?)\s(?P<raw>(?P<amount>{})\s*{})",
        config.number_format.regex_fragment(),
        regex::escape(&config.currency)
    );
    let entry_re = Regex::new(&pattern)
        .map_err(|e| ReportError::InvalidConfig(format!("Bad summary pattern: {e}")))?;

    let mut entries = Vec::new();
    for line in doc.text().lines() {
        for m in entry_re.captures_iter(line) {
            let description = m["desc"].trim();
            if description.is_empty() {
                continue;
            }
            let amount = match config.number_format.parse(&m["amount"]) {
                Ok(a) => a,
                Err(e) => {
                    tracing::trace!("extract_summary_entries skipping \"{line}\": {e}");
                    continue;
                }
            };
            entries.push(SummaryEntry {
                description: description.to_string(),
                amount,
                raw: m["raw"].to_string(),
            });
        }
    }
    tracing::debug!("Found {} summary entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::config::ReportConfig;
    use crate::report::model::{RawDocument, SummaryEntry};
    use crate::testlib::assert_vec_eq;

    use super::extract_summary_entries;

    fn entry(desc: &str, amount: rust_decimal::Decimal, raw: &str) -> SummaryEntry {
        SummaryEntry { description: desc.to_string(), amount, raw: raw.to_string() }
    }

    #[test]
    fn test_extract_summary_entries() {
        let entries = extract_summary_entries(
            &RawDocument::from(
                "Jahresübersicht 2023\n\
                 Einzahlungen 5.000,00 EUR\n\
                 Konto 123 Auszahlungen -1.234,56 EUR Zinsen 0,12 EUR\n\
                 Transaktionsgebühren -12,50 EUR\n\
                 US 50,00 7,50 42,50\n\
                 Nur EUR ohne Betrag",
            ),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_vec_eq(
            entries,
            vec![
                entry("Einzahlungen", dec!(5000), "5.000,00 EUR"),
                entry("Konto 123 Auszahlungen", dec!(-1234.56), "-1.234,56 EUR"),
                entry("Zinsen", dec!(0.12), "0,12 EUR"),
                entry("Transaktionsgebühren", dec!(-12.5), "-12,50 EUR"),
            ],
        );
    }

    #[test]
    fn test_extract_summary_entries_none() {
        let entries =
            extract_summary_entries(&RawDocument::from("12,50 EUR\n"), &ReportConfig::default())
                .unwrap();
        assert!(entries.is_empty());
    }
}
