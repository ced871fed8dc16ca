use regex::Regex;

use crate::{config::ReportConfig, util::decimal::GreaterEqualZeroDecimal};

use super::{error::ReportError, model::RawDocument};

/// Finds the total transaction fees reported in the statement's overview,
/// eg. "Transaktionsgebühren insgesamt -12,50 EUR".
///
/// The figure must be on the same line as the label. Not every statement
/// reports it, so no match (or an unreadable figure) yields zero.
pub fn extract_transaction_fee(
    doc: &RawDocument,
    config: &ReportConfig,
) -> Result<GreaterEqualZeroDecimal, ReportError> {
    let pattern = format!(
        r"{}.*?(?P<fee>{})\s*{}",
        regex::escape(&config.fee_label),
        config.number_format.regex_fragment(),
        regex::escape(&config.currency)
    );
    let fee_re = Regex::new(&pattern)
        .map_err(|e| ReportError::InvalidConfig(format!("Bad fee label pattern: {e}")))?;

    let fee_m = match fee_re.captures(doc.text()) {
        Some(m) => m,
        None => {
            tracing::debug!("No \"{}\" figure found. Using 0", config.fee_label);
            return Ok(GreaterEqualZeroDecimal::zero());
        }
    };

    match config.number_format.parse(&fee_m["fee"]) {
        Ok(fee) => {
            let fee = GreaterEqualZeroDecimal::from_abs(fee);
            tracing::debug!("{}: {}", config.fee_label, fee);
            Ok(fee)
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable {}: {}", config.fee_label, e);
            Ok(GreaterEqualZeroDecimal::zero())
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::config::ReportConfig;
    use crate::report::model::RawDocument;

    use super::extract_transaction_fee;

    fn fee_of(text: &str) -> rust_decimal::Decimal {
        *extract_transaction_fee(&RawDocument::from(text), &ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_fee_scenario() {
        assert_eq!(fee_of("... Transaktionsgebühren insgesamt 12,50 EUR ..."), dec!(12.5));
    }

    #[test]
    fn test_fee_variants() {
        assert_eq!(fee_of("Transaktionsgebühren -3,00 EUR"), dec!(3));
        assert_eq!(fee_of("Transaktionsgebühren 2023: 1.234,56EUR"), dec!(1234.56));
        // First occurrence wins
        assert_eq!(
            fee_of("Transaktionsgebühren 1,00 EUR\nTransaktionsgebühren 2,00 EUR"),
            dec!(1)
        );
        // The first number followed by the currency
        assert_eq!(fee_of("Transaktionsgebühren 4 Posten: 7,25 EUR"), dec!(7.25));
    }

    #[test]
    fn test_fee_absent() {
        assert_eq!(fee_of(""), dec!(0));
        assert_eq!(fee_of("Gebühren 12,50 EUR"), dec!(0));
        // Figure must be on the same line
        assert_eq!(fee_of("Transaktionsgebühren\n12,50 EUR"), dec!(0));
        // No currency
        assert_eq!(fee_of("Transaktionsgebühren 12,50 USD"), dec!(0));
    }

    #[test]
    fn test_fee_custom_label() {
        let mut config = ReportConfig::default();
        config.fee_label = "Transaction fees".to_string();
        config.currency = "USD".to_string();
        let fee = extract_transaction_fee(
            &RawDocument::from("Transaction fees (total) 9,99 USD"),
            &config,
        )
        .unwrap();
        assert_eq!(*fee, dec!(9.99));
    }
}
