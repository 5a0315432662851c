use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{BoxError, Value};

/// Destination for an output parameter.
///
/// Implementors receive the value of their session variable once the
/// out-parameter result set is read. Wrap a target with
/// [`Param::out`](crate::Param::out) to pass it to a call.
pub trait OutParam {
    /// Assigns the scanned column value.
    fn scan(&mut self, value: Value) -> Result<(), BoxError>;
}

/// Conversion from a non-null column value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, BoxError>;
}

impl OutParam for Value {
    fn scan(&mut self, value: Value) -> Result<(), BoxError> {
        *self = value;
        Ok(())
    }
}

/// SQL `NULL` scans to `None`.
impl<T: FromValue> OutParam for Option<T> {
    fn scan(&mut self, value: Value) -> Result<(), BoxError> {
        *self = if value.is_null() {
            None
        } else {
            Some(T::from_value(value)?)
        };
        Ok(())
    }
}

fn mismatch(value: &Value, target: &str) -> BoxError {
    format!("cannot convert {} value {value:?} into {target}", value.kind()).into()
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::Bool(value) => Ok(value),
            Value::Int(value) => Ok(value != 0),
            Value::UInt(value) => Ok(value != 0),
            Value::Text(ref text) => match text.trim() {
                "1" => Ok(true),
                "0" => Ok(false),
                other if other.eq_ignore_ascii_case("true") => Ok(true),
                other if other.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(mismatch(&value, "bool")),
            },
            Value::Json(serde_json::Value::Bool(value)) => Ok(value),
            other => Err(mismatch(&other, "bool")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::Int(value) => Ok(value),
            Value::UInt(raw) => i64::try_from(raw).map_err(|_| mismatch(&value, "i64")),
            Value::Bool(value) => Ok(value.into()),
            Value::Text(ref text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| mismatch(&value, "i64")),
            Value::Json(serde_json::Value::Number(ref number)) => {
                number.as_i64().ok_or_else(|| mismatch(&value, "i64"))
            }
            other => Err(mismatch(&other, "i64")),
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::UInt(value) => Ok(value),
            Value::Int(raw) => u64::try_from(raw).map_err(|_| mismatch(&value, "u64")),
            Value::Bool(value) => Ok(value.into()),
            Value::Text(ref text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| mismatch(&value, "u64")),
            Value::Json(serde_json::Value::Number(ref number)) => {
                number.as_u64().ok_or_else(|| mismatch(&value, "u64"))
            }
            other => Err(mismatch(&other, "u64")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::Float64(value) => Ok(value),
            Value::Float32(value) => Ok(value.into()),
            Value::Int(value) => Ok(value as f64),
            Value::UInt(value) => Ok(value as f64),
            Value::Text(ref text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| mismatch(&value, "f64")),
            Value::Json(serde_json::Value::Number(ref number)) => {
                number.as_f64().ok_or_else(|| mismatch(&value, "f64"))
            }
            other => Err(mismatch(&other, "f64")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::Text(value) => Ok(value),
            Value::Bool(value) => Ok(if value { "1" } else { "0" }.to_owned()),
            Value::Int(value) => Ok(value.to_string()),
            Value::UInt(value) => Ok(value.to_string()),
            Value::Float32(value) => Ok(value.to_string()),
            Value::Float64(value) => Ok(value.to_string()),
            Value::Timestamp(value) => Ok(value.format(TIMESTAMP_FORMAT).to_string()),
            Value::Json(serde_json::Value::String(value)) => Ok(value),
            Value::Json(value) => Ok(value.to_string()),
            Value::Null => Err(mismatch(&Value::Null, "String")),
        }
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, BoxError> {
        match value {
            Value::Timestamp(value) => Ok(value),
            Value::Text(ref text) => {
                NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S%.f")
                    .map(|naive| naive.and_utc())
                    .map_err(|_| mismatch(&value, "DateTime<Utc>"))
            }
            other => Err(mismatch(&other, "DateTime<Utc>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::{OutParam, Value};

    #[test]
    fn null_scans_to_none() {
        let mut target = Some(5i64);
        target.scan(Value::Null).expect("must scan");
        assert_eq!(target, None);
    }

    #[test]
    fn integers_scan_from_text_protocol() {
        let mut target: Option<i64> = None;
        target.scan(Value::text("-42")).expect("must scan");
        assert_eq!(target, Some(-42));

        let mut unsigned: Option<u64> = None;
        unsigned.scan(Value::Int(42)).expect("must scan");
        assert_eq!(unsigned, Some(42));
    }

    #[test]
    fn negative_into_unsigned_fails() {
        let mut target: Option<u64> = None;
        assert!(target.scan(Value::Int(-1)).is_err());
        assert_eq!(target, None);
    }

    #[test]
    fn text_into_integer_rejects_garbage() {
        let mut target: Option<i64> = None;
        let err = target.scan(Value::text("nope")).expect_err("must fail");
        assert!(err.to_string().contains("i64"));
    }

    #[test]
    fn string_accepts_any_scalar() {
        let mut target: Option<String> = None;
        target.scan(Value::Float64(0.5)).expect("must scan");
        assert_eq!(target.as_deref(), Some("0.5"));
        target.scan(Value::Bool(true)).expect("must scan");
        assert_eq!(target.as_deref(), Some("1"));
    }

    #[test]
    fn timestamp_parses_mysql_datetime_text() {
        let mut target: Option<DateTime<Utc>> = None;
        target
            .scan(Value::text("2024-01-02 03:04:05.250"))
            .expect("must scan");
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("unambiguous time")
            + chrono::Duration::milliseconds(250);
        assert_eq!(target, Some(expected));
    }

    #[test]
    fn bool_accepts_tinyint() {
        let mut target: Option<bool> = None;
        target.scan(Value::Int(1)).expect("must scan");
        assert_eq!(target, Some(true));
        target.scan(Value::text("0")).expect("must scan");
        assert_eq!(target, Some(false));
    }

    #[test]
    fn raw_value_keeps_column_as_is() {
        let mut target = Value::Null;
        target.scan(Value::UInt(7)).expect("must scan");
        assert_eq!(target, Value::UInt(7));
    }
}
