//! Category totals and monthly category trends for one year's records

use kakeibo_core::{CategoryAggregate, Ledger, MonthlyAggregate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Stable subsequence of records from source year `year`
pub fn filter_by_year(ledger: &Ledger, year: i32) -> Ledger {
    ledger.filter_by_year(year)
}

/// Sum of amount per category. Categories with no records are absent.
pub fn aggregate_by_category(ledger: &Ledger) -> CategoryAggregate {
    let mut agg = CategoryAggregate::new();
    for record in ledger {
        agg.add(&record.category, record.amount);
    }
    agg
}

/// Sum of amount per (calendar month, category), zero-filled to every
/// observed month × every observed category.
pub fn aggregate_by_month_category(ledger: &Ledger) -> MonthlyAggregate {
    let mut sums: BTreeMap<(u32, String), i64> = BTreeMap::new();
    for record in ledger {
        let cell = sums
            .entry((record.month(), record.category.clone()))
            .or_insert(0);
        *cell = cell.saturating_add(record.amount);
    }
    MonthlyAggregate::from_sums(&sums)
}

/// Everything a single year selection shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearView {
    pub year: i32,
    pub ledger: Ledger,
    pub by_category: CategoryAggregate,
    pub by_month: MonthlyAggregate,
}

impl YearView {
    pub fn build(ledger: &Ledger, year: i32) -> Self {
        let filtered = filter_by_year(ledger, year);
        let by_category = aggregate_by_category(&filtered);
        let by_month = aggregate_by_month_category(&filtered);
        Self {
            year,
            ledger: filtered,
            by_category,
            by_month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kakeibo_core::LedgerRecord;

    fn rec(year: i32, month: u32, category: &str, amount: i64) -> LedgerRecord {
        let date = NaiveDate::from_ymd_opt(year, month, 10).unwrap();
        LedgerRecord::new(date, category, amount, year)
    }

    fn sample() -> Ledger {
        Ledger::new(vec![
            rec(2023, 1, "Food", -1000),
            rec(2023, 1, "Food", -500),
            rec(2023, 2, "Salary", 200_000),
            rec(2023, 3, "Food", -700),
            rec(2024, 1, "Food", -9999),
        ])
    }

    #[test]
    fn test_category_totals() {
        let agg = aggregate_by_category(&filter_by_year(&sample(), 2023));
        assert_eq!(agg.get("Food"), Some(-2200));
        assert_eq!(agg.get("Salary"), Some(200_000));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_monthly_grid_rectangular() {
        let grid = aggregate_by_month_category(&filter_by_year(&sample(), 2023));
        assert_eq!(grid.months(), [1, 2, 3]);
        assert_eq!(grid.cells().count(), 6);
        assert_eq!(grid.get(1, "Food"), Some(-1500));
        assert_eq!(grid.get(2, "Food"), Some(0));
        assert_eq!(grid.get(3, "Salary"), Some(0));
    }

    #[test]
    fn test_empty_ledger() {
        let view = YearView::build(&sample(), 2022);
        assert!(view.ledger.is_empty());
        assert!(view.by_category.is_empty());
        assert!(view.by_month.is_empty());
    }
}
