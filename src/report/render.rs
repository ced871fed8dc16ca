use rust_decimal::Decimal;

use crate::util::decimal::{cent_precision_str, currency_amount_str};

use super::{
    aggregate::Aggregates,
    dividends::DividendTable,
    model::{ReportLine, SummaryEntry},
    realized::RealizedGains,
};

/// A sink-agnostic table. Every writer (xlsx, csv, text) renders one of these.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct RenderTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
    pub notes: Vec<String>,
    pub errors: Vec<String>,
}

fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn percent_str(ratio: Option<Decimal>) -> String {
    match ratio {
        Some(r) => format!("{}%", cent_precision_str(&(r * Decimal::ONE_HUNDRED))),
        None => "-".to_string(),
    }
}

/// The report proper. Amounts are pre-formatted strings, like "26.38 EUR".
pub fn render_report_lines(lines: &[ReportLine], currency: &str) -> RenderTable {
    RenderTable {
        header: strs(&["Zeile", "Beschreibung", "Betrag"]),
        rows: lines
            .iter()
            .map(|l| {
                vec![
                    l.line_id.to_string(),
                    l.description.to_string(),
                    currency_amount_str(&l.amount, currency),
                ]
            })
            .collect(),
        ..Default::default()
    }
}

pub fn render_dividends(table: &DividendTable) -> RenderTable {
    let mut rt = RenderTable {
        header: strs(&[
            "Land",
            "Bruttodividende",
            "Quellensteuer",
            "Nettodividende",
            "Steuersatz",
        ]),
        ..Default::default()
    };
    for r in &table.records {
        rt.rows.push(vec![
            r.jurisdiction.to_string(),
            cent_precision_str(&r.gross_dividend),
            cent_precision_str(&r.withholding_tax),
            cent_precision_str(&r.net_dividend),
            percent_str(r.tax_rate()),
        ]);
    }
    let total_withholding: Decimal = table.records.iter().map(|r| r.withholding_tax).sum();
    let total_net: Decimal = table.records.iter().map(|r| r.net_dividend).sum();
    rt.footer = vec![
        "Total".to_string(),
        cent_precision_str(&table.total_gross),
        cent_precision_str(&total_withholding),
        cent_precision_str(&total_net),
        String::new(),
    ];
    rt
}

pub fn render_realized_gains(gains: &RealizedGains) -> RenderTable {
    let mut rt = RenderTable {
        header: strs(&[
            "Produkt",
            "ISIN",
            "Land",
            "Realisierte Gewinne/Verluste",
            "Transaktionsgebühr",
            "G/V",
        ]),
        ..Default::default()
    };
    for r in &gains.records {
        rt.rows.push(vec![
            r.product.clone(),
            r.isin.clone(),
            r.jurisdiction.to_string(),
            cent_precision_str(&r.realized_gain_loss),
            cent_precision_str(&r.transaction_fee),
            cent_precision_str(&r.net_result()),
        ]);
    }
    rt.notes.push(format!(
        "Gewinne: {}, Verluste: {}",
        cent_precision_str(&gains.total_positive),
        cent_precision_str(&gains.total_negative)
    ));
    rt
}

pub fn render_summary_entries(entries: &[SummaryEntry]) -> RenderTable {
    RenderTable {
        header: strs(&["Beschreibung", "Betrag", "Original"]),
        rows: entries
            .iter()
            .map(|e| vec![e.description.clone(), cent_precision_str(&e.amount), e.raw.clone()])
            .collect(),
        ..Default::default()
    }
}

pub fn render_aggregates(agg: &Aggregates) -> RenderTable {
    RenderTable {
        header: strs(&["Summe", "Betrag"]),
        rows: agg
            .entries()
            .into_iter()
            .map(|(name, v)| vec![name.to_string(), cent_precision_str(&v)])
            .collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::report::dividends::DividendTable;
    use crate::report::model::{DividendRecord, Jurisdiction, ReportLine};

    use super::{render_dividends, render_report_lines};

    #[test]
    fn test_render_report_lines() {
        let rt = render_report_lines(
            &[
                ReportLine { line_id: "37", description: "Kapitalertragsteuer", amount: dec!(26.38) },
                ReportLine { line_id: "38", description: "Solidaritätszuschlag", amount: dec!(1.4509) },
                ReportLine { line_id: "12", description: "Verluste", amount: dec!(-0.001) },
            ],
            "EUR",
        );
        assert_eq!(rt.header, vec!["Zeile", "Beschreibung", "Betrag"]);
        assert_eq!(
            rt.rows,
            vec![
                vec!["37", "Kapitalertragsteuer", "26.38 EUR"],
                vec!["38", "Solidaritätszuschlag", "1.45 EUR"],
                vec!["12", "Verluste", "0.00 EUR"],
            ]
        );
        assert!(rt.footer.is_empty());
    }

    #[test]
    fn test_render_dividends() {
        let table = DividendTable::from_records(
            vec![
                DividendRecord {
                    jurisdiction: Jurisdiction::new("US"),
                    gross_dividend: dec!(50),
                    withholding_tax: dec!(7.5),
                    net_dividend: dec!(42.5),
                },
                DividendRecord {
                    jurisdiction: Jurisdiction::new("NL"),
                    gross_dividend: dec!(0),
                    withholding_tax: dec!(0),
                    net_dividend: dec!(0),
                },
            ],
            "DE",
        );
        let rt = render_dividends(&table);
        assert_eq!(
            rt.rows,
            vec![
                vec!["US", "50.00", "7.50", "42.50", "15.00%"],
                vec!["NL", "0.00", "0.00", "0.00", "-"],
            ]
        );
        assert_eq!(rt.footer, vec!["Total", "50.00", "7.50", "42.50", ""]);
    }
}
