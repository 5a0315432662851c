use crate::{
    BoxError, CallOptions, CallPlan, OutParam, Param, Queryer, Result, ResultSet, ResultSets,
    SprocError,
};

/// Calls `procedure` through `queryer` and reads its output parameters.
///
/// `read_result_set` is called for each result set returned by the
/// procedure itself, with a zero-based index. Parameters built with
/// [`Param::out`] are passed as session variables and scanned from the
/// trailing `SELECT @1,...,@k` once the procedure's result sets are read.
///
/// The cursor returned by `queryer` is dropped on every exit path.
pub fn call<Q, F, E>(
    queryer: &mut Q,
    read_result_set: F,
    procedure: &str,
    params: Vec<Param<'_>>,
) -> Result<()>
where
    Q: Queryer + ?Sized,
    F: FnMut(usize, &mut ResultSet<'_, Q::Rows>) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    call_with_options(
        queryer,
        read_result_set,
        procedure,
        params,
        &CallOptions::default(),
    )
}

/// Same as [`call`] with explicit [`CallOptions`].
pub fn call_with_options<Q, F, E>(
    queryer: &mut Q,
    mut read_result_set: F,
    procedure: &str,
    params: Vec<Param<'_>>,
    options: &CallOptions,
) -> Result<()>
where
    Q: Queryer + ?Sized,
    F: FnMut(usize, &mut ResultSet<'_, Q::Rows>) -> std::result::Result<(), E>,
    E: Into<BoxError>,
{
    let (text, mut outputs) = CallPlan::build(procedure, params)?.into_parts();

    #[cfg(feature = "tracing")]
    tracing::debug!(sql = %text, outputs = outputs.len(), "calling stored procedure");

    let mut rows = queryer.query(&text).map_err(SprocError::Query)?;

    let mut index = 0usize;
    loop {
        let columns = rows.columns().map_err(SprocError::Columns)?;
        if is_output_result_set(&columns, outputs.len()) {
            #[cfg(feature = "tracing")]
            tracing::trace!(outputs = outputs.len(), "scanning out-parameter result set");

            return scan_outputs(&mut rows, &mut outputs, options);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(index, columns = ?columns, "dispatching result set");

        read_result_set(index, &mut ResultSet::new(&mut rows, index))
            .map_err(|err| SprocError::Callback(err.into()))?;

        if !rows.next_result_set().map_err(SprocError::Advance)? {
            return Ok(());
        }
        index += 1;
    }
}

/// The trailing `SELECT @1,...,@k` is recognized by shape: exactly `k`
/// columns with the first named `@1`. A procedure result set of the same
/// shape is indistinguishable from it.
fn is_output_result_set(columns: &[String], outputs: usize) -> bool {
    outputs > 0 && columns.len() == outputs && columns[0] == "@1"
}

fn scan_outputs<R: ResultSets>(
    rows: &mut R,
    outputs: &mut [&mut dyn OutParam],
    options: &CallOptions,
) -> Result<()> {
    let Some(row) = rows.next_row().map_err(SprocError::Scan)? else {
        if options.require_output_row {
            return Err(SprocError::MissingOutputRow);
        }
        return Ok(());
    };

    if row.len() != outputs.len() {
        return Err(SprocError::Scan(
            format!(
                "expected {} out-parameter columns, got {}",
                outputs.len(),
                row.len()
            )
            .into(),
        ));
    }

    for (target, value) in outputs.iter_mut().zip(row) {
        target.scan(value).map_err(SprocError::Scan)?;
    }
    Ok(())
}
