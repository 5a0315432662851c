//! `sproc-call` calls stored procedures with OUT parameters over SQL clients
//! that only accept plain text commands.
//!
//! Input arguments are inlined as escaped SQL literals. Output arguments are
//! bound to session variables `@1..@k` and read back from a trailing
//! `SELECT @1,...,@k`:
//! - [`call_string`] returns the SQL text of a call without running it
//! - [`call`] runs it and routes each result set to the right consumer

mod buffered;
mod call;
mod cursor;
mod decode;
mod encode;
mod error;
mod options;
mod plan;
mod scan;
mod types;
mod value;
mod wire;

pub use buffered::BufferedResultSets;
pub use call::{call, call_with_options};
pub use cursor::{Queryer, ResultSet, ResultSets};
pub use error::{BoxError, SprocError};
pub use options::CallOptions;
pub use plan::{call_string, CallPlan};
pub use scan::{FromValue, OutParam};
pub use types::QueryResult;
pub use value::{Param, Value};

pub type Result<T> = std::result::Result<T, SprocError>;
