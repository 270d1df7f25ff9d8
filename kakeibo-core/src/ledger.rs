//! Typed ledger records produced by type coercion

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One transaction line of a household ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Bank, card or wallet the transaction was recorded against
    pub institution: String,
    pub category: String,
    pub subcategory: String,
    pub memo: Option<String>,
    pub id: String,
    /// Whole yen. Negative = expense, positive = income
    pub amount: i64,
    /// Year of the source export, not necessarily `date.year()`
    pub year: i32,
}

impl LedgerRecord {
    /// Create a record with the required fields; text fields start empty
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: i64, year: i32) -> Self {
        Self {
            date,
            description: String::new(),
            institution: String::new(),
            category: category.into(),
            subcategory: String::new(),
            memo: None,
            id: String::new(),
            amount,
            year,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Calendar month (1-12) of the transaction date
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0
    }
}

/// Ordered sequence of records from all source years
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn new(records: Vec<LedgerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose source year equals `year`, in ledger order
    pub fn filter_by_year(&self, year: i32) -> Ledger {
        Ledger {
            records: self
                .records
                .iter()
                .filter(|r| r.year == year)
                .cloned()
                .collect(),
        }
    }

    /// Distinct source years, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn total_amount(&self) -> i64 {
        self.records
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.amount))
    }
}

impl From<Vec<LedgerRecord>> for Ledger {
    fn from(records: Vec<LedgerRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for Ledger {
    type Item = LedgerRecord;
    type IntoIter = std::vec::IntoIter<LedgerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerRecord;
    type IntoIter = std::slice::Iter<'a, LedgerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_creation() {
        let record = LedgerRecord::new(date(2023, 4, 1), "Food", -1200, 2023)
            .with_description("スーパー")
            .with_memo("weekly shop");
        assert!(record.is_expense());
        assert_eq!(record.month(), 4);
        assert_eq!(record.memo.as_deref(), Some("weekly shop"));
    }

    #[test]
    fn test_filter_by_year_is_stable() {
        let ledger = Ledger::new(vec![
            LedgerRecord::new(date(2022, 1, 5), "Food", -100, 2022).with_id("a"),
            LedgerRecord::new(date(2023, 1, 5), "Food", -200, 2023).with_id("b"),
            LedgerRecord::new(date(2022, 2, 5), "Salary", 300, 2022).with_id("c"),
        ]);
        let ids: Vec<_> = ledger.filter_by_year(2022).iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(ledger.filter_by_year(2024).is_empty());
        assert_eq!(ledger.years(), [2022, 2023]);
        assert_eq!(ledger.total_amount(), 0);
    }
}
