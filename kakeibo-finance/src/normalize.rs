//! Schema unification: header renaming, category translation, year tagging,
//! and concatenation of per-year tables.

use kakeibo_core::{columns, CategoryMap, ColumnMap, Table, TranslationPolicy};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::TranslationError;

/// Rename headers through `map`. Unmapped headers pass through unchanged.
pub fn normalize_columns(mut table: Table, map: &ColumnMap) -> Table {
    for header in table.headers_mut() {
        if let Some(canonical) = map.rename(header) {
            if canonical != header.as_str() {
                debug!(from = %header, to = canonical, "renamed column");
                *header = canonical.to_string();
            }
        }
    }

    let mut seen = std::collections::BTreeSet::new();
    for header in table.headers() {
        if !seen.insert(header.as_str()) {
            warn!(column = %header, "duplicate column after renaming; first one wins");
        }
    }

    table
}

/// Translate the `category` column through `map`.
///
/// Labels the dictionary does not know are kept verbatim under
/// [`TranslationPolicy::BestEffort`] and rejected under
/// [`TranslationPolicy::Strict`]. Empty cells are left alone. A table with
/// no `category` column is returned unchanged.
pub fn normalize_categories(
    mut table: Table,
    map: &CategoryMap,
    policy: TranslationPolicy,
) -> Result<Table, TranslationError> {
    let mut unmapped: BTreeMap<String, usize> = BTreeMap::new();
    let mut failure = None;

    table.map_column(columns::CATEGORY, |row, cell| {
        if failure.is_some() || cell.is_empty() {
            return;
        }
        match map.translate(cell) {
            Some(to) => {
                if to != cell.as_str() {
                    *cell = to.to_string();
                }
            }
            None => match policy {
                TranslationPolicy::BestEffort => {
                    *unmapped.entry(cell.clone()).or_insert(0) += 1;
                }
                TranslationPolicy::Strict => {
                    failure = Some(TranslationError::UnmappedCategory {
                        row: row + 1,
                        value: cell.clone(),
                    });
                }
            },
        }
    });

    if let Some(err) = failure {
        return Err(err);
    }

    for (label, count) in &unmapped {
        warn!(category = %label, rows = count, "no category translation; kept as-is");
    }

    Ok(table)
}

/// Set the `year` column of every row to `year`
pub fn tag_year(mut table: Table, year: i32) -> Table {
    table.fill_column(columns::YEAR, &year.to_string());
    table
}

/// Concatenate tables in order. Headers are the first-seen union; cells
/// for headers a table lacks are empty. No deduplication.
pub fn unify(tables: impl IntoIterator<Item = Table>) -> Table {
    let mut iter = tables.into_iter();
    let Some(mut unified) = iter.next() else {
        return Table::default();
    };
    for table in iter {
        unified.append(table);
    }
    unified
}
