/// Configures how a call treats the out-parameter result set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallOptions {
    /// Fail with [`SprocError::MissingOutputRow`](crate::SprocError::MissingOutputRow)
    /// when the out-parameter result set has no row. When unset, the outputs
    /// are left untouched.
    pub require_output_row: bool,
}
