use thiserror::Error;

/// Errors that abort a pipeline run. Per-cell parse problems never show
/// up here; they degrade to nulls or dropped rows inside the normalizer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EtlError {
    /// The rendered price table could not be located within the bounded wait.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Required source columns are absent after header trimming. Carries
    /// exactly the missing column names.
    #[error("missing expected columns in raw data: {missing:?}")]
    Schema { missing: Vec<String> },

    /// A scraped row's cell count does not match the header count.
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Every row was dropped during normalization, or the source had none.
    /// Loading nothing would mask an upstream problem, so this is fatal.
    #[error("no rows survived normalization; refusing an empty load")]
    EmptyBatch,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
