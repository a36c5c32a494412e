//! Catalog loading error types.

/// Errors that can occur when loading or replacing the rate catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog file failed
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid catalog
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A record cannot take part in matching
    #[error("invalid {table} record #{index}: {reason}")]
    InvalidRecord {
        table: &'static str,
        index: usize,
        reason: &'static str,
    },
}
