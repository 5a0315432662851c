use crate::{BoxError, Result, SprocError, Value};

/// Cursor over the result sets produced by one SQL command.
///
/// The cursor starts positioned on the first result set. Dropping it
/// releases whatever the driver holds for the command.
pub trait ResultSets {
    /// Column names of the current result set.
    fn columns(&mut self) -> std::result::Result<Vec<String>, BoxError>;

    /// Next row of the current result set, or `None` once it is exhausted.
    fn next_row(&mut self) -> std::result::Result<Option<Vec<Value>>, BoxError>;

    /// Moves to the next result set. Returns `false` when none remains.
    fn next_result_set(&mut self) -> std::result::Result<bool, BoxError>;
}

/// Anything that can run a SQL text command, e.g. a connection or a
/// transaction wrapper.
pub trait Queryer {
    type Rows: ResultSets;

    fn query(&mut self, sql: &str) -> std::result::Result<Self::Rows, BoxError>;
}

impl<F, R> Queryer for F
where
    F: FnMut(&str) -> std::result::Result<R, BoxError>,
    R: ResultSets,
{
    type Rows = R;

    fn query(&mut self, sql: &str) -> std::result::Result<R, BoxError> {
        self(sql)
    }
}

/// View of a single user result set handed to the result-set callback.
///
/// It cannot move the cursor past the current result set.
pub struct ResultSet<'a, R: ?Sized> {
    rows: &'a mut R,
    index: usize,
}

impl<'a, R: ResultSets + ?Sized> ResultSet<'a, R> {
    pub(crate) fn new(rows: &'a mut R, index: usize) -> Self {
        Self { rows, index }
    }

    /// Zero-based index among the procedure's own result sets.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&mut self) -> Result<Vec<String>> {
        self.rows.columns().map_err(SprocError::Columns)
    }

    pub fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        self.rows.next_row().map_err(SprocError::Scan)
    }

    /// Reads every remaining row of the current result set.
    pub fn collect_rows(&mut self) -> Result<Vec<Vec<Value>>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl<R: ?Sized> std::fmt::Debug for ResultSet<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSet")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
