use chrono::NaiveDateTime;

use crate::{wire, QueryResult, SprocError, Value};

pub(crate) fn decode_document(body: &str) -> Result<Vec<QueryResult>, SprocError> {
    let document = serde_json::from_str::<wire::ResultSetsDocument>(body)
        .map_err(|err| SprocError::Decode(format!("invalid result sets JSON: {err}")))?;

    document
        .result_sets
        .into_iter()
        .map(decode_result_set)
        .collect()
}

pub(crate) fn decode_result_set(
    payload: wire::ResultSetPayload,
) -> Result<QueryResult, SprocError> {
    let columns = payload.cols.into_iter().map(|col| col.name).collect();

    let rows = payload
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, SprocError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryResult { columns, rows })
}

pub(crate) fn decode_value(value: wire::Value) -> Result<Value, SprocError> {
    match value {
        wire::Value::Null {} => Ok(Value::Null),
        wire::Value::Integer { value } => decode_integer(&value),
        wire::Value::Float { value } => match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Value::Float64(parsed)),
            Ok(_) => Err(invalid("float", &value, "not finite")),
            Err(err) => Err(invalid("float", &value, err)),
        },
        wire::Value::Text { value } => Ok(Value::Text(value)),
        wire::Value::Datetime { value } => {
            NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S%.f")
                .map(|naive| Value::Timestamp(naive.and_utc()))
                .map_err(|err| invalid("datetime", &value, err))
        }
    }
}

/// Signed when it fits, unsigned above `i64::MAX`.
fn decode_integer(text: &str) -> Result<Value, SprocError> {
    if let Ok(parsed) = text.parse::<i64>() {
        return Ok(Value::Int(parsed));
    }
    text.parse::<u64>()
        .map(Value::UInt)
        .map_err(|err| invalid("integer", text, err))
}

fn invalid(kind: &str, text: &str, reason: impl std::fmt::Display) -> SprocError {
    SprocError::Decode(format!("invalid {kind} value '{text}': {reason}"))
}
