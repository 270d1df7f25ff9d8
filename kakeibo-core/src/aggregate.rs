//! Summary views over a ledger

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Summed amount per category. Only observed categories are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAggregate {
    totals: BTreeMap<String, i64>,
}

impl CategoryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: i64) {
        let total = self.totals.entry(category.to_string()).or_insert(0);
        *total = total.saturating_add(amount);
    }

    pub fn get(&self, category: &str) -> Option<i64> {
        self.totals.get(category).copied()
    }

    /// (category, total) in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.totals.values().fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    /// Entries ordered by absolute total, largest first
    pub fn ranked(&self) -> Vec<(&str, i64)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| b.1.unsigned_abs().cmp(&a.1.unsigned_abs()).then_with(|| a.0.cmp(b.0)));
        v
    }
}

impl From<BTreeMap<String, i64>> for CategoryAggregate {
    fn from(totals: BTreeMap<String, i64>) -> Self {
        Self { totals }
    }
}

/// Summed amount per (month, category), rectangular over all observed
/// months and all observed categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    months: Vec<u32>,
    categories: Vec<String>,
    /// `values[m][c]` for `months[m]` and `categories[c]`
    values: Vec<Vec<i64>>,
}

impl MonthlyAggregate {
    /// Build the zero-filled grid from sparse sums
    pub fn from_sums(sums: &BTreeMap<(u32, String), i64>) -> Self {
        let months: Vec<u32> = sums
            .keys()
            .map(|(m, _)| *m)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories: Vec<String> = sums
            .keys()
            .map(|(_, c)| c.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut values = vec![vec![0i64; categories.len()]; months.len()];
        for ((month, category), amount) in sums {
            // Both lookups succeed: the axes were built from these keys.
            if let (Ok(m), Ok(c)) = (
                months.binary_search(month),
                categories.binary_search(category),
            ) {
                values[m][c] = *amount;
            }
        }

        Self {
            months,
            categories,
            values,
        }
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Value of one cell. `None` only when the month or category was never observed.
    pub fn get(&self, month: u32, category: &str) -> Option<i64> {
        let m = self.months.binary_search(&month).ok()?;
        let c = self
            .categories
            .binary_search_by(|probe| probe.as_str().cmp(category))
            .ok()?;
        Some(self.values[m][c])
    }

    /// One category's trend line: (month, amount) for every observed month
    pub fn series(&self, category: &str) -> Option<Vec<(u32, i64)>> {
        let c = self
            .categories
            .binary_search_by(|probe| probe.as_str().cmp(category))
            .ok()?;
        Some(
            self.months
                .iter()
                .zip(&self.values)
                .map(|(m, row)| (*m, row[c]))
                .collect(),
        )
    }

    /// Every (month, category, amount) cell, month-major
    pub fn cells(&self) -> impl Iterator<Item = (u32, &str, i64)> {
        self.months.iter().zip(&self.values).flat_map(move |(m, row)| {
            self.categories
                .iter()
                .zip(row)
                .map(move |(c, v)| (*m, c.as_str(), *v))
        })
    }

    /// Sum over all months for one category
    pub fn category_total(&self, category: &str) -> Option<i64> {
        self.series(category)
            .map(|s| s.into_iter().fold(0i64, |acc, (_, v)| acc.saturating_add(v)))
    }
}
