use std::vec;

use crate::{decode::decode_document, BoxError, QueryResult, Result, ResultSets, Value};

/// In-memory [`ResultSets`] over result sets that were fetched eagerly.
///
/// Useful for drivers that materialize every result set of a multi-statement
/// command, and as a test double.
#[derive(Clone, Debug)]
pub struct BufferedResultSets {
    columns: Vec<String>,
    rows: vec::IntoIter<Vec<Value>>,
    remaining: vec::IntoIter<QueryResult>,
}

impl BufferedResultSets {
    /// Positions the cursor on the first of `sets`.
    ///
    /// With no sets at all the cursor behaves as one empty result set.
    pub fn new(sets: impl Into<Vec<QueryResult>>) -> Self {
        let mut remaining = sets.into().into_iter();
        let first = remaining.next().unwrap_or_default();
        Self {
            columns: first.columns,
            rows: first.rows.into_iter(),
            remaining,
        }
    }

    /// Decodes a `{"result_sets": [...]}` document.
    ///
    /// Each entry carries `cols` (`{"name": ...}`) and `rows` of tagged
    /// values such as `{"type": "integer", "value": "42"}`.
    pub fn from_json(body: &str) -> Result<Self> {
        decode_document(body).map(Self::new)
    }
}

impl From<Vec<QueryResult>> for BufferedResultSets {
    fn from(sets: Vec<QueryResult>) -> Self {
        Self::new(sets)
    }
}

impl ResultSets for BufferedResultSets {
    fn columns(&mut self) -> std::result::Result<Vec<String>, BoxError> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> std::result::Result<Option<Vec<Value>>, BoxError> {
        Ok(self.rows.next())
    }

    fn next_result_set(&mut self) -> std::result::Result<bool, BoxError> {
        match self.remaining.next() {
            Some(set) => {
                self.columns = set.columns;
                self.rows = set.rows.into_iter();
                Ok(true)
            }
            None => {
                self.columns.clear();
                self.rows = Vec::new().into_iter();
                Ok(false)
            }
        }
    }
}
