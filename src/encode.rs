//! SQL literal encoding for input parameters.

use crate::{Result, SprocError, Value};

/// Appends the SQL literal for `value` to `buf`.
///
/// `position` is the zero-based index of the parameter and only feeds error
/// reporting.
pub(crate) fn write_literal(buf: &mut String, value: &Value, position: usize) -> Result<()> {
    match value {
        Value::Null => buf.push_str("NULL"),
        Value::Bool(value) => write_bool(buf, *value),
        Value::Int(value) => buf.push_str(&value.to_string()),
        Value::UInt(value) => buf.push_str(&value.to_string()),
        Value::Float32(value) => {
            if !value.is_finite() {
                return Err(SprocError::NonFiniteFloat { position });
            }
            write_general_float(buf, &format!("{value:e}"), &value.to_string());
        }
        Value::Float64(value) => write_f64(buf, *value, position)?,
        Value::Text(value) => write_quoted(buf, value),
        Value::Timestamp(value) => {
            buf.push('\'');
            buf.push_str(&value.format("%Y-%m-%d %H:%M:%S").to_string());
            buf.push('\'');
        }
        Value::Json(value) => write_json_scalar(buf, value, position)?,
    }
    Ok(())
}

fn write_bool(buf: &mut String, value: bool) {
    buf.push(if value { '1' } else { '0' });
}

fn write_f64(buf: &mut String, value: f64, position: usize) -> Result<()> {
    if !value.is_finite() {
        return Err(SprocError::NonFiniteFloat { position });
    }
    write_general_float(buf, &format!("{value:e}"), &value.to_string());
    Ok(())
}

fn write_json_scalar(buf: &mut String, value: &serde_json::Value, position: usize) -> Result<()> {
    match value {
        serde_json::Value::Null => buf.push_str("NULL"),
        serde_json::Value::Bool(value) => write_bool(buf, *value),
        serde_json::Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                buf.push_str(&number.to_string());
            } else {
                let value = number
                    .as_f64()
                    .ok_or(SprocError::UnsupportedParameterType { position })?;
                write_f64(buf, value, position)?;
            }
        }
        serde_json::Value::String(value) => write_quoted(buf, value),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            return Err(SprocError::UnsupportedParameterType { position });
        }
    }
    Ok(())
}

/// Writes a float in general format from its shortest representations.
///
/// `scientific` is the `{:e}` rendering and `plain` the `Display` rendering of
/// the same value. Exponents below -4 or at least 6 use `d.dddE±XX`.
fn write_general_float(buf: &mut String, scientific: &str, plain: &str) {
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        buf.push_str(plain);
        return;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        buf.push_str(plain);
        return;
    };

    if (-4..6).contains(&exponent) {
        buf.push_str(plain);
        return;
    }

    buf.push_str(mantissa);
    buf.push('E');
    buf.push(if exponent < 0 { '-' } else { '+' });
    buf.push_str(&format!("{:02}", exponent.unsigned_abs()));
}

/// Single-quotes `text`, doubling every `'` and `\`.
fn write_quoted(buf: &mut String, text: &str) {
    buf.reserve(text.len() + 2);
    buf.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            buf.push(ch);
        }
        buf.push(ch);
    }
    buf.push('\'');
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    use super::write_literal;
    use crate::{SprocError, Value};

    fn literal(value: impl Into<Value>) -> String {
        let mut buf = String::new();
        write_literal(&mut buf, &value.into(), 0).expect("must encode");
        buf
    }

    #[test]
    fn scalars() {
        assert_eq!(literal(Value::Null), "NULL");
        assert_eq!(literal(true), "1");
        assert_eq!(literal(false), "0");
        assert_eq!(literal(-17i16), "-17");
        assert_eq!(literal(i64::MIN), "-9223372036854775808");
        assert_eq!(literal(u64::MAX), "18446744073709551615");
        assert_eq!(literal(None::<bool>), "NULL");
        assert_eq!(literal(Some(3u8)), "3");
    }

    #[test]
    fn floats_use_general_format() {
        assert_eq!(literal(0.5f64), "0.5");
        assert_eq!(literal(-2.25f64), "-2.25");
        assert_eq!(literal(0.0f64), "0");
        assert_eq!(literal(123456.0f64), "123456");
        assert_eq!(literal(0.0001f64), "0.0001");
        assert_eq!(literal(1e6f64), "1E+06");
        assert_eq!(literal(1234567.0f64), "1.234567E+06");
        assert_eq!(literal(0.000015f64), "1.5E-05");
        assert_eq!(literal(1e300f64), "1E+300");
        assert_eq!(literal(0.1f32), "0.1");
        assert_eq!(literal(16777216.0f32), "1.6777216E+07");
    }

    #[test]
    fn floats_round_trip_bits() {
        for value in [0.1f64, 1.0 / 3.0, 6.02214076e23, -1.5e-300, 987654.321] {
            let text = literal(value);
            let parsed: f64 = text.parse().expect("literal must parse as f64");
            assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
        }
    }

    #[test]
    fn f32_round_trips_bits() {
        for value in [0.1f32, 1.0 / 3.0, f32::MAX, 1e-5, 16777217.0, -0.0, f32::MIN_POSITIVE] {
            let text = literal(value);
            let parsed: f32 = text.parse().expect("literal must parse as f32");
            assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
        }
        assert_eq!(literal(1e-5f32), "1E-05");
        assert_eq!(literal(f32::MAX), "3.4028235E+38");
        assert_eq!(literal(-0.0f32), "-0");
    }

    #[test]
    fn non_finite_float_is_rejected() {
        let mut buf = String::new();
        let err = write_literal(&mut buf, &Value::Float64(f64::NAN), 4).expect_err("must fail");
        assert!(matches!(err, SprocError::NonFiniteFloat { position: 4 }));
        let err =
            write_literal(&mut buf, &Value::Float32(f32::INFINITY), 1).expect_err("must fail");
        assert!(matches!(err, SprocError::NonFiniteFloat { position: 1 }));
    }

    #[test]
    fn text_doubles_quotes_and_backslashes() {
        assert_eq!(literal("test"), "'test'");
        assert_eq!(literal(""), "''");
        assert_eq!(literal("it's"), "'it''s'");
        assert_eq!(literal("a\\b"), "'a\\\\b'");
        assert_eq!(literal("'\\''"), "'''\\\\'''''");
        assert_eq!(
            literal("test';DROP TABLE USERS"),
            "'test'';DROP TABLE USERS'"
        );
    }

    #[test]
    fn text_literal_never_unterminated() {
        for text in ["'", "\\", "\\'", "''';--", "x\\'; SELECT 1; --"] {
            let encoded = literal(text);
            let inner = &encoded[1..encoded.len() - 1];
            assert!(encoded.starts_with('\'') && encoded.ends_with('\''));
            assert_eq!(inner.replace("''", "").matches('\'').count(), 0, "{encoded}");
            assert_eq!(inner.replace("''", "'").replace("\\\\", "\\"), text);
        }
    }

    #[test]
    fn timestamp_is_formatted_in_utc() {
        let offset = FixedOffset::west_opt(5 * 3600).expect("valid offset");
        let ts = offset
            .with_ymd_and_hms(2015, 7, 4, 22, 5, 9)
            .single()
            .expect("unambiguous time");
        assert_eq!(literal(ts), "'2015-07-05 03:05:09'");
    }

    #[test]
    fn json_scalars_encode_by_kind() {
        assert_eq!(literal(json!(null)), "NULL");
        assert_eq!(literal(json!(true)), "1");
        assert_eq!(literal(json!(-7)), "-7");
        assert_eq!(literal(json!(u64::MAX)), "18446744073709551615");
        assert_eq!(literal(json!(2.5)), "2.5");
        assert_eq!(literal(json!("o'k")), "'o''k'");
    }

    #[test]
    fn json_composites_are_unsupported() {
        let mut buf = String::new();
        for value in [json!([1, 2]), json!({"k": 1})] {
            let err = write_literal(&mut buf, &Value::Json(value), 3).expect_err("must fail");
            assert!(matches!(
                err,
                SprocError::UnsupportedParameterType { position: 3 }
            ));
        }
    }
}
