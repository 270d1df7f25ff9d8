//! kakeibo-finance: the ledger normalizer. Header and category translation,
//! year tagging, concatenation, type coercion, and aggregate views.

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod normalize;
pub mod pipeline;

pub use aggregate::{aggregate_by_category, aggregate_by_month_category, filter_by_year, YearView};
pub use coerce::coerce_types;
pub use error::{CoercionError, PipelineError, TranslationError};
pub use normalize::{normalize_categories, normalize_columns, tag_year, unify};
pub use pipeline::{load_and_normalize, PipelineConfig};
