//! Type coercion of a unified table into typed ledger records

use chrono::NaiveDate;
use kakeibo_core::{columns, Ledger, LedgerRecord, Table, DATE_FORMAT};

use crate::error::CoercionError;

/// Parse every row of `table` into a [`LedgerRecord`].
///
/// `date`, `amount` and `year` are required columns; the text columns are
/// optional and default to empty (`memo` to `None`). The first bad cell
/// fails the whole table.
pub fn coerce_types(table: &Table) -> Result<Ledger, CoercionError> {
    let required = |name: &'static str| table.column_index(name).ok_or(CoercionError::MissingColumn(name));
    let date_idx = required(columns::DATE)?;
    let amount_idx = required(columns::AMOUNT)?;
    let year_idx = required(columns::YEAR)?;

    let description_idx = table.column_index(columns::DESCRIPTION);
    let institution_idx = table.column_index(columns::INSTITUTION);
    let category_idx = table.column_index(columns::CATEGORY);
    let subcategory_idx = table.column_index(columns::SUBCATEGORY);
    let memo_idx = table.column_index(columns::MEMO);
    let id_idx = table.column_index(columns::ID);

    let mut records = Vec::with_capacity(table.len());
    for (i, row) in table.rows().iter().enumerate() {
        let row_no = i + 1;
        let text = |idx: Option<usize>| idx.map(|j| row[j].clone()).unwrap_or_default();

        let raw_date = &row[date_idx];
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| CoercionError::InvalidDate {
            row: row_no,
            value: raw_date.clone(),
        })?;

        let raw_amount = &row[amount_idx];
        let amount = parse_amount(raw_amount).ok_or_else(|| CoercionError::InvalidAmount {
            row: row_no,
            value: raw_amount.clone(),
        })?;

        let raw_year = &row[year_idx];
        let year: i32 = raw_year.trim().parse().map_err(|_| CoercionError::InvalidYear {
            row: row_no,
            value: raw_year.clone(),
        })?;

        let memo = text(memo_idx);
        records.push(LedgerRecord {
            date,
            description: text(description_idx),
            institution: text(institution_idx),
            category: text(category_idx),
            subcategory: text(subcategory_idx),
            memo: (!memo.is_empty()).then_some(memo),
            id: text(id_idx),
            amount,
            year,
        });
    }

    Ok(Ledger::new(records))
}

/// Largest magnitude accepted for one row, in yen. Keeps yearly sums far
/// from `i64` overflow.
pub const MAX_AMOUNT: i64 = 999_999_999_999;

/// Whole-yen amount. Tolerates thousands separators, a yen sign, and a
/// trailing `円`. Magnitudes above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let s = s.strip_suffix('円').unwrap_or(s);
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let s = s
        .strip_prefix('¥')
        .or_else(|| s.strip_prefix('￥'))
        .unwrap_or(s);
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    if value > MAX_AMOUNT {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table() -> Table {
        Table::new(["date", "description", "category", "memo", "amount", "year"])
            .with_row(["2022/03/01", "ランチ", "Food", "", "-950", "2022"])
            .with_row(["2022/03/25", "給与", "Income", "3月分", "280,000", "2022"])
    }

    #[test]
    fn test_coerce_valid() {
        let ledger = coerce_types(&table()).unwrap();
        assert_eq!(ledger.len(), 2);
        let first = &ledger.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap());
        assert_eq!(first.amount, -950);
        assert_eq!(first.memo, None);
        assert_eq!(first.institution, "");
        assert_eq!(ledger.records()[1].amount, 280_000);
        assert_eq!(ledger.records()[1].memo.as_deref(), Some("3月分"));
    }

    #[test]
    fn test_invalid_date_fails_whole_table() {
        let t = table().with_row(["2022-13-40", "x", "Food", "", "-1", "2022"]);
        let err = coerce_types(&t).unwrap_err();
        assert_eq!(
            err,
            CoercionError::InvalidDate { row: 3, value: "2022-13-40".to_string() }
        );
    }

    #[test]
    fn test_missing_year_column() {
        let t = Table::new(["date", "amount"]).with_row(["2022/01/01", "1"]);
        assert_eq!(coerce_types(&t).unwrap_err(), CoercionError::MissingColumn("year"));
    }

    #[test]
    fn test_empty_amount_rejected() {
        let t = Table::new(["date", "amount", "year"]).with_row(["2022/01/01", "", "2022"]);
        assert!(matches!(coerce_types(&t), Err(CoercionError::InvalidAmount { row: 1, .. })));
    }

    #[test]
    fn test_huge_amount_rejected() {
        let t = Table::new(["date", "amount", "year"])
            .with_row(["2022/01/01", "9000000000000000000", "2022"])
            .with_row(["2022/01/02", "9000000000000000000", "2022"]);
        assert_eq!(
            coerce_types(&t).unwrap_err(),
            CoercionError::InvalidAmount { row: 1, value: "9000000000000000000".to_string() }
        );
    }

    #[rstest]
    #[case("1000", Some(1000))]
    #[case("-1,200", Some(-1200))]
    #[case(" +35 ", Some(35))]
    #[case("¥2,500", Some(2500))]
    #[case("-￥800円", Some(-800))]
    #[case("12.5", None)]
    #[case("", None)]
    #[case("-", None)]
    #[case("999,999,999,999", Some(MAX_AMOUNT))]
    #[case("-1,000,000,000,000", None)]
    #[case("9000000000000000000", None)]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_amount(raw), expected);
    }
}
