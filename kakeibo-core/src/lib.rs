//! kakeibo-core: ledger data model, aggregate views, and translation tables

pub mod aggregate;
pub mod ledger;
pub mod schema;
pub mod table;

pub use aggregate::{CategoryAggregate, MonthlyAggregate};
pub use ledger::{Ledger, LedgerRecord};
pub use schema::{columns, CategoryMap, ColumnMap, HeaderScheme, TranslationPolicy, DATE_FORMAT};
pub use table::Table;
