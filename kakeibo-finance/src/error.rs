use kakeibo_ingest::LoadError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("row {row}: category '{value}' has no translation")]
    UnmappedCategory { row: usize, value: String },
}

/// Type coercion failures. `row` is the 1-based data row of the unified table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoercionError {
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid date '{value}' (expected YYYY/MM/DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },

    #[error("row {row}: invalid year '{value}'")]
    InvalidYear { row: usize, value: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no source files configured")]
    NoSources,

    #[error("loading {year} export")]
    Load {
        year: i32,
        #[source]
        source: LoadError,
    },

    #[error("translating {year} categories")]
    Translation {
        year: i32,
        #[source]
        source: TranslationError,
    },

    #[error("coercing unified ledger")]
    Coercion(#[from] CoercionError),
}

impl PipelineError {
    /// The underlying load error, if loading failed
    pub fn as_load_error(&self) -> Option<&LoadError> {
        match self {
            PipelineError::Load { source, .. } => Some(source),
            _ => None,
        }
    }
}
