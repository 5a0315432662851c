/// Boxed error produced by a [`Queryer`](crate::Queryer), a
/// [`ResultSets`](crate::ResultSets) cursor, an [`OutParam`](crate::OutParam)
/// or a result-set callback.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SprocError {
    /// Parameter kind has no SQL literal form.
    #[error("unsupported type for parameter {position}")]
    UnsupportedParameterType {
        /// Zero-based index in the parameter list.
        position: usize,
    },
    /// NaN or infinite float parameter.
    #[error("non-finite float for parameter {position}")]
    NonFiniteFloat {
        /// Zero-based index in the parameter list.
        position: usize,
    },
    /// Issuing the call text failed.
    #[error("query error: {0}")]
    Query(#[source] BoxError),
    /// Reading column names of the current result set failed.
    #[error("column metadata error: {0}")]
    Columns(#[source] BoxError),
    /// Fetching a row or assigning a column to an output target failed.
    #[error("scan error: {0}")]
    Scan(#[source] BoxError),
    /// Advancing to the next result set failed.
    #[error("result set advance error: {0}")]
    Advance(#[source] BoxError),
    /// Error returned by the per-result-set callback.
    #[error("result set callback error: {0}")]
    Callback(#[source] BoxError),
    /// Out-parameter result set carried no row while one was required.
    #[error("out-parameter result set has no row")]
    MissingOutputRow,
    /// Buffered result-set document could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}
