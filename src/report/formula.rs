use rust_decimal::Decimal;

use crate::config::ReportConfig;

use super::{aggregate::Aggregates, model::ReportLine};

pub const N_REPORT_LINES: usize = 10;

/// Fills in the lines of the "Anlage KAP" form, in form order.
///
/// Line 19 adds the foreign gains twice and subtracts the fee scalar. This
/// matches the established report and must be kept as is.
pub fn compute_report_lines(agg: &Aggregates, config: &ReportConfig) -> Vec<ReportLine> {
    let line = |line_id: &'static str, description: &'static str, amount: Decimal| {
        ReportLine { line_id, description, amount }
    };

    let capital_gains_tax = agg.domestic_withholding_tax;

    let lines = vec![
        line(
            "7",
            "Kapitalerträge",
            agg.domestic_gross_dividends + agg.domestic_positive_net_result,
        ),
        line("8", "Gewinne aus Aktienveräußerungen", agg.total_positive_net_result),
        line(
            "12",
            "Nicht ausgeglichene Verluste aus der Veräußerung von Aktien",
            agg.total_negative_net_result,
        ),
        line(
            "18",
            "Inländische Kapitalerträge",
            agg.domestic_positive_net_result
                + agg.domestic_negative_net_result
                + agg.domestic_gross_dividends,
        ),
        line(
            "19",
            "Ausländische Kapitalerträge",
            agg.foreign_positive_net_result
                + agg.foreign_negative_net_result
                + agg.foreign_gross_dividends
                + agg.foreign_positive_net_result
                - agg.transaction_fee,
        ),
        line(
            "20",
            "In den Zeilen 18 und 19 enthaltene Gewinne aus Aktienveräußerungen \
             i. S. d. § 20 Abs. 2 Satz 1 Nr. 1 EStG",
            agg.foreign_positive_net_result,
        ),
        line(
            "23",
            "In den Zeilen 18 und 19 enthaltene Verluste aus der Veräußerung von Aktien \
             i. S. d. § 20 Abs. 2 Satz 1 Nr. 1 EStG",
            agg.foreign_negative_net_result,
        ),
        line("37", "Kapitalertragsteuer", capital_gains_tax),
        line(
            "38",
            "Solidaritätszuschlag",
            capital_gains_tax * config.solidarity_surcharge_rate,
        ),
        line(
            "41",
            "Anrechenbare ausländische Steuern",
            agg.foreign_gross_dividends * config.foreign_tax_credit_rate,
        ),
    ];
    debug_assert_eq!(lines.len(), N_REPORT_LINES);
    lines
}
