use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::util::{basic::SError, decimal::NumberFormat};

/// A sub-region of the document, delimited by two header texts.
#[derive(PartialEq, Eq, Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionAnchors {
    pub start: String,
    pub end: String,
}

impl SectionAnchors {
    pub fn new(start: &str, end: &str) -> Self {
        SectionAnchors { start: start.to_string(), end: end.to_string() }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividendColumn {
    Jurisdiction,
    Gross,
    Withholding,
    Net,
}

impl DividendColumn {
    pub fn all() -> [DividendColumn; 4] {
        [
            DividendColumn::Jurisdiction,
            DividendColumn::Gross,
            DividendColumn::Withholding,
            DividendColumn::Net,
        ]
    }
}

/// Everything about the statement layout and the tax rules which is not
/// a formula. Defaults match a DEGIRO "Jahresübersicht" for a German resident.
///
/// Can be loaded from JSON. Any omitted field keeps its default, eg.
/// { "domestic_code": "AT" }
#[derive(PartialEq, Eq, Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Jurisdiction treated as home country when splitting domestic/foreign.
    pub domestic_code: String,
    pub dividend_section: SectionAnchors,
    pub realized_section: SectionAnchors,
    /// Order of the whitespace separated columns in each dividend row.
    pub dividend_columns: Vec<DividendColumn>,
    pub fee_label: String,
    /// Marks amounts in the document, and suffixes amounts in the report.
    pub currency: String,
    pub number_format: NumberFormat,
    pub foreign_tax_credit_rate: Decimal,
    pub solidarity_surcharge_rate: Decimal,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            domestic_code: "DE".to_string(),
            dividend_section: SectionAnchors::new(
                "Land Bruttodividende Quellensteuer Nettodividende",
                "Kuponübersicht",
            ),
            realized_section: SectionAnchors::new(
                "Realisierte Gewinne/Verluste je Produkt",
                "Alle Dividenden und Kupons",
            ),
            dividend_columns: DividendColumn::all().to_vec(),
            fee_label: "Transaktionsgebühren".to_string(),
            currency: "EUR".to_string(),
            number_format: NumberFormat::default(),
            foreign_tax_credit_rate: dec!(0.15),
            solidarity_surcharge_rate: dec!(0.055),
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<ReportConfig, SError> {
        let config: ReportConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<ReportConfig, SError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {path:?}: {e}"))?;
        Self::from_json_str(&json).map_err(|e| format!("{path:?}: {e}"))
    }

    pub fn validate(&self) -> Result<(), SError> {
        let code = &self.domestic_code;
        if code.chars().count() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(format!(
                "domestic_code must be two uppercase letters, not \"{code}\""
            ));
        }

        for (name, anchors) in [
            ("dividend_section", &self.dividend_section),
            ("realized_section", &self.realized_section),
        ] {
            if anchors.start.trim().is_empty() || anchors.end.trim().is_empty() {
                return Err(format!("{name} anchors must not be empty"));
            }
        }

        if self.dividend_columns.len() != DividendColumn::all().len() {
            return Err(format!(
                "dividend_columns must list {} columns, but has {}",
                DividendColumn::all().len(),
                self.dividend_columns.len()
            ));
        }
        for col in DividendColumn::all() {
            if !self.dividend_columns.contains(&col) {
                return Err(format!("dividend_columns is missing {col:?}"));
            }
        }

        if self.fee_label.trim().is_empty() {
            return Err("fee_label must not be empty".to_string());
        }
        if self.currency.trim().is_empty() {
            return Err("currency must not be empty".to_string());
        }

        self.number_format.validate()?;

        for (name, rate) in [
            ("foreign_tax_credit_rate", self.foreign_tax_credit_rate),
            ("solidarity_surcharge_rate", self.solidarity_surcharge_rate),
        ] {
            if rate.is_sign_negative() && !rate.is_zero() {
                return Err(format!("{name} must not be negative ({rate})"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{DividendColumn, ReportConfig};

    #[test]
    fn test_default_is_valid() {
        let config = ReportConfig::default();
        config.validate().unwrap();
        assert_eq!(config.domestic_code, "DE");
        assert_eq!(config.foreign_tax_credit_rate, dec!(0.15));
        assert_eq!(config.solidarity_surcharge_rate, dec!(0.055));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ReportConfig::from_json_str(
            r#"{
                "domestic_code": "AT",
                "dividend_columns": ["jurisdiction", "net", "withholding", "gross"],
                "number_format": { "decimal_separator": ".", "thousands_separator": null },
                "solidarity_surcharge_rate": "0"
            }"#,
        )
        .unwrap();
        assert_eq!(config.domestic_code, "AT");
        assert_eq!(
            config.dividend_columns,
            vec![
                DividendColumn::Jurisdiction,
                DividendColumn::Net,
                DividendColumn::Withholding,
                DividendColumn::Gross,
            ]
        );
        assert_eq!(config.number_format.decimal_separator, '.');
        assert_eq!(config.number_format.thousands_separator, None);
        assert_eq!(config.solidarity_surcharge_rate, dec!(0));
        // Untouched
        assert_eq!(config.fee_label, "Transaktionsgebühren");
        assert_eq!(config.dividend_section, ReportConfig::default().dividend_section);
    }

    #[test]
    fn test_from_json_errors() {
        let err = ReportConfig::from_json_str(r#"{"domestic_code": "deu"}"#).unwrap_err();
        assert_eq!(err, "domestic_code must be two uppercase letters, not \"deu\"");

        let err = ReportConfig::from_json_str(
            r#"{"dividend_columns": ["jurisdiction", "gross", "gross", "net"]}"#,
        )
        .unwrap_err();
        assert_eq!(err, "dividend_columns is missing Withholding");

        let err = ReportConfig::from_json_str(
            r#"{"dividend_section": {"start": " ", "end": "X"}}"#,
        )
        .unwrap_err();
        assert_eq!(err, "dividend_section anchors must not be empty");

        let err = ReportConfig::from_json_str(r#"{"foreign_tax_credit_rate": "-0.1"}"#)
            .unwrap_err();
        assert_eq!(err, "foreign_tax_credit_rate must not be negative (-0.1)");

        assert!(ReportConfig::from_json_str(r#"{"no_such_field": 1}"#).is_err());
        assert!(ReportConfig::from_json_str("not json").is_err());
    }
}
