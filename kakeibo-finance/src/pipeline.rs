//! The load → normalize → tag → unify → coerce pipeline.
//!
//! [`load_and_normalize`] runs once per invocation with explicit inputs.
//! Every source is loaded before anything is concatenated, so a missing or
//! malformed export halts the run without producing a partial ledger.

use kakeibo_core::{CategoryMap, ColumnMap, HeaderScheme, Ledger, Table, TranslationPolicy};
use kakeibo_ingest::{load, SourceFile};
use tracing::{debug, info};

use crate::coerce::coerce_types;
use crate::error::PipelineError;
use crate::normalize::{normalize_categories, normalize_columns, tag_year, unify};

/// Inputs of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sources: Vec<SourceFile>,
    pub columns: ColumnMap,
    /// `None` leaves category labels untranslated
    pub categories: Option<CategoryMap>,
    pub policy: TranslationPolicy,
}

impl PipelineConfig {
    /// Both header schemes, Japanese category dictionary, best-effort translation
    pub fn new(sources: Vec<SourceFile>) -> Self {
        Self {
            sources,
            columns: ColumnMap::for_scheme(HeaderScheme::Auto),
            categories: Some(CategoryMap::japanese()),
            policy: TranslationPolicy::BestEffort,
        }
    }

    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_categories(mut self, categories: Option<CategoryMap>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_policy(mut self, policy: TranslationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rename columns, translate categories (if configured), and tag one
    /// source table with its year.
    pub fn normalize(&self, table: Table, year: i32) -> Result<Table, PipelineError> {
        let table = normalize_columns(table, &self.columns);
        let table = match &self.categories {
            Some(map) => normalize_categories(table, map, self.policy)
                .map_err(|source| PipelineError::Translation { year, source })?,
            None => table,
        };
        Ok(tag_year(table, year))
    }
}

/// Load every configured source and produce the unified, typed ledger.
pub fn load_and_normalize(config: &PipelineConfig) -> Result<Ledger, PipelineError> {
    if config.sources.is_empty() {
        return Err(PipelineError::NoSources);
    }

    let mut loaded = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let table = load(&source.path).map_err(|e| PipelineError::Load {
            year: source.year,
            source: e,
        })?;
        loaded.push((source.year, table));
    }

    let mut normalized = Vec::with_capacity(loaded.len());
    for (year, table) in loaded {
        let table = config.normalize(table, year)?;
        debug!(year, rows = table.len(), "normalized source");
        normalized.push(table);
    }

    let unified = unify(normalized);
    let ledger = coerce_types(&unified)?;
    info!(
        records = ledger.len(),
        years = ?ledger.years(),
        "unified ledger ready"
    );
    Ok(ledger)
}
