use rust_decimal::Decimal;

use crate::util::decimal::GreaterEqualZeroDecimal;

use super::{dividends::DividendTable, realized::RealizedGains};

/// All figures the formulas are computed from. Pure function of the
/// extractor outputs.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Aggregates {
    pub total_gross_dividends: Decimal,
    pub domestic_gross_dividends: Decimal,
    pub foreign_gross_dividends: Decimal,
    pub domestic_withholding_tax: Decimal,

    pub total_positive_net_result: Decimal,
    pub total_negative_net_result: Decimal,
    pub domestic_positive_net_result: Decimal,
    pub domestic_negative_net_result: Decimal,
    pub foreign_positive_net_result: Decimal,
    pub foreign_negative_net_result: Decimal,

    pub transaction_fee: Decimal,
}

impl Aggregates {
    pub fn compute(
        dividends: &DividendTable,
        realized: &RealizedGains,
        transaction_fee: GreaterEqualZeroDecimal,
    ) -> Self {
        Aggregates {
            total_gross_dividends: dividends.total_gross,
            domestic_gross_dividends: dividends.domestic_gross,
            foreign_gross_dividends: dividends.foreign_gross,
            domestic_withholding_tax: dividends.domestic_withholding,

            total_positive_net_result: *realized.total_positive,
            total_negative_net_result: *realized.total_negative,
            domestic_positive_net_result: *realized.domestic_positive,
            domestic_negative_net_result: *realized.domestic_negative,
            foreign_positive_net_result: *realized.foreign_positive,
            foreign_negative_net_result: *realized.foreign_negative,

            transaction_fee: *transaction_fee,
        }
    }

    /// Name -> value, in a stable order. Used for debugging and the
    /// detail output.
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("total_gross_dividends", self.total_gross_dividends),
            ("domestic_gross_dividends", self.domestic_gross_dividends),
            ("foreign_gross_dividends", self.foreign_gross_dividends),
            ("domestic_withholding_tax", self.domestic_withholding_tax),
            ("total_positive_net_result", self.total_positive_net_result),
            ("total_negative_net_result", self.total_negative_net_result),
            ("domestic_positive_net_result", self.domestic_positive_net_result),
            ("domestic_negative_net_result", self.domestic_negative_net_result),
            ("foreign_positive_net_result", self.foreign_positive_net_result),
            ("foreign_negative_net_result", self.foreign_negative_net_result),
            ("transaction_fee", self.transaction_fee),
        ]
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::report::dividends::DividendTable;
    use crate::report::model::{DividendRecord, Jurisdiction, RealizedGainRecord};
    use crate::report::realized::RealizedGains;
    use crate::util::decimal::GreaterEqualZeroDecimal;

    use super::Aggregates;

    fn div(j: &str, gross: rust_decimal::Decimal, wh: rust_decimal::Decimal) -> DividendRecord {
        DividendRecord {
            jurisdiction: Jurisdiction::new(j),
            gross_dividend: gross,
            withholding_tax: wh,
            net_dividend: gross - wh,
        }
    }

    fn gain(isin: &str, pl: rust_decimal::Decimal) -> RealizedGainRecord {
        RealizedGainRecord::new("X".to_string(), isin.to_string(), pl, GreaterEqualZeroDecimal::zero())
    }

    #[test]
    fn test_compute() {
        let dividends = DividendTable::from_records(
            vec![div("DE", dec!(100), dec!(26.38)), div("US", dec!(50), dec!(7.5))],
            "DE",
        );
        let realized = RealizedGains::from_records(
            vec![
                gain("DE0007164600", dec!(10)),
                gain("DE000BASF111", dec!(-4)),
                gain("US0378331005", dec!(20)),
                gain("US5949181045", dec!(-8)),
            ],
            "DE",
        );
        let agg = Aggregates::compute(&dividends, &realized, crate::gezdec!(12.5));

        assert_eq!(
            agg,
            Aggregates {
                total_gross_dividends: dec!(150),
                domestic_gross_dividends: dec!(100),
                foreign_gross_dividends: dec!(50),
                domestic_withholding_tax: dec!(26.38),
                total_positive_net_result: dec!(30),
                total_negative_net_result: dec!(-12),
                domestic_positive_net_result: dec!(10),
                domestic_negative_net_result: dec!(-4),
                foreign_positive_net_result: dec!(20),
                foreign_negative_net_result: dec!(-8),
                transaction_fee: dec!(12.5),
            }
        );
        let entries = agg.entries();
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[10], ("transaction_fee", dec!(12.5)));
    }

    #[test]
    fn test_compute_empty_is_zero() {
        let agg = Aggregates::compute(
            &DividendTable::default(),
            &RealizedGains::default(),
            GreaterEqualZeroDecimal::zero(),
        );
        assert_eq!(agg, Aggregates::default());
        assert!(agg.entries().iter().all(|(_, v)| v.is_zero()));
    }
}
