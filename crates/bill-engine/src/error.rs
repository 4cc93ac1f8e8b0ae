use thiserror::Error;

/// Everything that can go wrong between opening the PDF and writing the
/// reconciled summary.
#[derive(Debug, Error)]
pub enum BillError {
    #[error("Failed to extract text from page {page}: {reason}")]
    Extraction { page: usize, reason: String },

    #[error("Bill summary table not found: anchor {0:?} missing")]
    TableNotFound(String),

    #[error("Summary table has unexpected shape: {observed} tokens do not reshape into {rows} rows of equal width")]
    TableShape { observed: usize, rows: usize },

    #[error("Summary table has no aggregate Account row")]
    MissingAccountRow,

    #[error("Invalid table structure: {0}")]
    InvalidTableStructure(String),

    #[error("Invalid table format: {0}")]
    InvalidTableFormat(String),

    #[error("Unparseable currency value: {0:?}")]
    Currency(String),

    #[error("Computed total ${computed:.2} does not match billed total ${stated:.2}")]
    ReconciliationMismatch { computed: f64, stated: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
