//! Canonical ledger schema and the translation tables that map export
//! headers and category labels onto it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical column names (lower-case English)
pub mod columns {
    pub const DATE: &str = "date";
    pub const DESCRIPTION: &str = "description";
    pub const INSTITUTION: &str = "institution";
    pub const CATEGORY: &str = "category";
    pub const SUBCATEGORY: &str = "subcategory";
    pub const MEMO: &str = "memo";
    pub const ID: &str = "id";
    pub const AMOUNT: &str = "amount";
    pub const YEAR: &str = "year";
}

/// Date format used by every supported export
pub const DATE_FORMAT: &str = "%Y/%m/%d";

const JAPANESE_HEADERS: &[(&str, &str)] = &[
    ("日付", columns::DATE),
    ("内容", columns::DESCRIPTION),
    ("保有金融機関", columns::INSTITUTION),
    ("大項目", columns::CATEGORY),
    ("中項目", columns::SUBCATEGORY),
    ("メモ", columns::MEMO),
    ("ID", columns::ID),
    ("金額（円）", columns::AMOUNT),
    ("金額(円)", columns::AMOUNT),
    ("金額", columns::AMOUNT),
];

const ENGLISH_HEADERS: &[(&str, &str)] = &[
    ("Date", columns::DATE),
    ("Description", columns::DESCRIPTION),
    ("Institution", columns::INSTITUTION),
    ("Category", columns::CATEGORY),
    ("Subcategory", columns::SUBCATEGORY),
    ("Sub Category", columns::SUBCATEGORY),
    ("Memo", columns::MEMO),
    ("ID", columns::ID),
    ("Amount", columns::AMOUNT),
    ("Amount (JPY)", columns::AMOUNT),
];

const JAPANESE_CATEGORIES: &[(&str, &str)] = &[
    ("食費", "Food"),
    ("日用品", "Daily Necessities"),
    ("趣味・娯楽", "Hobbies & Entertainment"),
    ("交際費", "Social Expenses"),
    ("交通費", "Transportation"),
    ("衣服・美容", "Clothing & Beauty"),
    ("健康・医療", "Health & Medical"),
    ("自動車", "Automobile"),
    ("教養・教育", "Education"),
    ("特別な支出", "Special Expenses"),
    ("現金・カード", "Cash & Card"),
    ("水道・光熱費", "Utilities"),
    ("通信費", "Communication"),
    ("住宅", "Housing"),
    ("税・社会保障", "Taxes & Social Security"),
    ("保険", "Insurance"),
    ("その他", "Other"),
    ("未分類", "Uncategorized"),
    ("収入", "Income"),
    ("給与", "Salary"),
];

/// Which header naming scheme the exports use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderScheme {
    /// Accept both schemes; their header names do not collide
    #[default]
    Auto,
    Japanese,
    English,
}

/// How to treat category labels with no dictionary entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationPolicy {
    /// Keep the label verbatim
    #[default]
    BestEffort,
    /// Reject the label
    Strict,
}

/// Header rename table. Headers with no entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: BTreeMap<String, String>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn japanese() -> Self {
        Self::from_pairs(JAPANESE_HEADERS)
    }

    pub fn english() -> Self {
        Self::from_pairs(ENGLISH_HEADERS)
    }

    pub fn for_scheme(scheme: HeaderScheme) -> Self {
        match scheme {
            HeaderScheme::Japanese => Self::japanese(),
            HeaderScheme::English => Self::english(),
            HeaderScheme::Auto => {
                let mut map = Self::japanese();
                map.extend(Self::english());
                map
            }
        }
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.entries.insert(from.into(), to.into());
    }

    pub fn extend(&mut self, other: ColumnMap) {
        self.entries.extend(other.entries);
    }

    /// Canonical name for a header, if one is mapped
    pub fn rename(&self, header: &str) -> Option<&str> {
        self.entries.get(header).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category label dictionary.
///
/// A label that is already one of the translation targets counts as known,
/// so translating a translated table is a no-op under either policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: BTreeMap<String, String>,
    targets: BTreeSet<String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Japanese household-account-book categories to English
    pub fn japanese() -> Self {
        let mut map = Self::new();
        for (from, to) in JAPANESE_CATEGORIES {
            map.insert(*from, *to);
        }
        map
    }

    /// Add or override one translation.
    ///
    /// The map is kept resolved: `to` is followed through an existing entry,
    /// and entries that pointed at `from` now point at the new target. A
    /// label therefore reaches its final name in one step.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        let to = self.entries.get(&to).cloned().unwrap_or(to);

        for target in self.entries.values_mut() {
            if *target == from {
                *target = to.clone();
            }
        }
        self.entries.insert(from, to);
        self.targets = self.entries.values().cloned().collect();
    }

    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.insert(k, v);
        }
    }

    /// Translated label, or the label itself when it is already a target.
    /// `None` means the dictionary does not know the label.
    pub fn translate(&self, label: &str) -> Option<&str> {
        self.entries
            .get(label)
            .or_else(|| self.targets.get(label))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
