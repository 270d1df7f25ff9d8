//! Algebraic properties of the normalizer, checked with proptest over
//! generated ledger tables.

use kakeibo_core::{CategoryMap, ColumnMap, HeaderScheme, Table, TranslationPolicy};
use kakeibo_finance::{
    aggregate_by_category, aggregate_by_month_category, coerce_types, filter_by_year,
    normalize_categories, normalize_columns, unify, PipelineConfig,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const HEADERS: [&str; 6] = ["日付", "内容", "金額（円）", "大項目", "メモ", "振替"];

/// Mix of dictionary keys, already-translated labels, and unknown labels
const CATEGORIES: [&str; 7] = ["食費", "収入", "交通費", "Food", "Salary", "ペット", "寄付"];

#[derive(Debug, Clone)]
struct Row {
    month: u32,
    day: u32,
    category: &'static str,
    amount: i64,
}

fn row() -> impl Strategy<Value = Row> {
    (1u32..=12, 1u32..=28, 0usize..CATEGORIES.len(), -300_000i64..300_000).prop_map(
        |(month, day, c, amount)| Row {
            month,
            day,
            category: CATEGORIES[c],
            amount,
        },
    )
}

fn table_for(year: i32, rows: &[Row]) -> Table {
    let mut t = Table::new(HEADERS);
    for r in rows {
        t.push_row([
            format!("{year}/{:02}/{:02}", r.month, r.day),
            "item".to_string(),
            r.amount.to_string(),
            r.category.to_string(),
            String::new(),
            "0".to_string(),
        ]);
    }
    t
}

fn translate(t: Table, policy: TranslationPolicy) -> Table {
    let t = normalize_columns(t, &ColumnMap::for_scheme(HeaderScheme::Auto));
    normalize_categories(t, &CategoryMap::japanese(), policy).unwrap()
}

proptest! {
    #[test]
    fn normalization_is_idempotent(rows in prop::collection::vec(row(), 0..40)) {
        let once = translate(table_for(2022, &rows), TranslationPolicy::BestEffort);
        let twice = translate(once.clone(), TranslationPolicy::BestEffort);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn strict_normalization_is_idempotent(rows in prop::collection::vec(row(), 0..40)) {
        let t = normalize_columns(table_for(2022, &rows), &ColumnMap::japanese());
        let map = CategoryMap::japanese();
        if let Ok(once) = normalize_categories(t, &map, TranslationPolicy::Strict) {
            let twice = normalize_categories(once.clone(), &map, TranslationPolicy::Strict);
            prop_assert_eq!(Ok(once), twice);
        }
    }

    #[test]
    fn category_totals_conserve_amount(rows in prop::collection::vec(row(), 0..60)) {
        let config = PipelineConfig::new(Vec::new());
        let table = config.normalize(table_for(2023, &rows), 2023).unwrap();
        let ledger = coerce_types(&table).unwrap();

        let mut expected: BTreeMap<String, i64> = BTreeMap::new();
        for r in ledger.iter() {
            *expected.entry(r.category.clone()).or_insert(0) += r.amount;
        }

        let agg = aggregate_by_category(&ledger);
        prop_assert_eq!(agg.len(), expected.len());
        for (category, total) in &expected {
            prop_assert_eq!(agg.get(category), Some(*total));
        }
        prop_assert_eq!(agg.total(), ledger.total_amount());
    }

    #[test]
    fn monthly_grid_is_rectangular(rows in prop::collection::vec(row(), 0..60)) {
        let config = PipelineConfig::new(Vec::new());
        let table = config.normalize(table_for(2024, &rows), 2024).unwrap();
        let ledger = coerce_types(&table).unwrap();
        let grid = aggregate_by_month_category(&ledger);
        let by_category = aggregate_by_category(&ledger);

        let months: std::collections::BTreeSet<u32> = ledger.iter().map(|r| r.month()).collect();
        let categories: std::collections::BTreeSet<&str> =
            ledger.iter().map(|r| r.category.as_str()).collect();

        prop_assert_eq!(grid.cells().count(), months.len() * categories.len());
        for m in &months {
            for c in &categories {
                prop_assert!(grid.get(*m, c).is_some(), "missing cell ({}, {})", m, c);
            }
        }
        for (category, total) in by_category.iter() {
            prop_assert_eq!(grid.category_total(category), Some(total));
        }
    }

    #[test]
    fn filter_after_unify_matches_single_source(
        t1 in prop::collection::vec(row(), 0..20),
        t2 in prop::collection::vec(row(), 0..20),
        t3 in prop::collection::vec(row(), 0..20),
        pick in 0usize..3,
    ) {
        let config = PipelineConfig::new(Vec::new());
        let years = [2022, 2023, 2024];
        let tables: Vec<Table> = [&t1, &t2, &t3]
            .iter()
            .zip(years)
            .map(|(rows, y)| config.normalize(table_for(y, rows), y).unwrap())
            .collect();

        let single = coerce_types(&tables[pick]).unwrap();
        let unified = coerce_types(&unify(tables)).unwrap();

        prop_assert_eq!(filter_by_year(&unified, years[pick]), single);
    }
}
