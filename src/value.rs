use chrono::{DateTime, TimeZone, Utc};

use crate::OutParam;

/// Scalar value passed to a stored procedure or read back from a result set.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Dynamic value; only JSON scalars have a literal form.
    Json(serde_json::Value),
}

impl Value {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn integer(value: i64) -> Self {
        Self::Int(value)
    }

    pub fn float(value: f64) -> Self {
        Self::Float64(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn timestamp<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
        Self::Timestamp(value.with_timezone(&Utc))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(serde_json::Value::Null))
    }

    /// Short kind name used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Json(_) => "json",
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(UInt as u64: u8, u16, u32, u64, usize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Self::timestamp(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One argument of a stored procedure call.
///
/// Inputs are inlined as SQL literals. Outputs are routed through session
/// variables (`@1`, `@2`, ...) and scanned back after the call.
pub enum Param<'a> {
    In(Value),
    Out(&'a mut dyn OutParam),
}

impl<'a> Param<'a> {
    /// Builds an input parameter.
    pub fn input(value: impl Into<Value>) -> Self {
        Self::In(value.into())
    }

    /// Builds a `NULL` input parameter.
    pub fn null() -> Self {
        Self::In(Value::Null)
    }

    /// Marks `target` as an output parameter.
    pub fn out<T: OutParam>(target: &'a mut T) -> Self {
        Self::Out(target)
    }

    /// Builds input parameters from dynamic JSON values.
    ///
    /// Arrays and objects are accepted here and rejected when the call is
    /// encoded, so the error reports their position.
    pub fn from_json_values<I>(values: I) -> Vec<Param<'static>>
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        values
            .into_iter()
            .map(|value| Param::In(Value::Json(value)))
            .collect()
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Self::Out(_))
    }
}

impl From<Value> for Param<'_> {
    fn from(value: Value) -> Self {
        Self::In(value)
    }
}

impl std::fmt::Debug for Param<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In(value) => f.debug_tuple("In").field(value).finish(),
            Self::Out(_) => f.write_str("Out(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};
    use serde_json::json;

    use crate::{Param, Value};

    #[test]
    fn helper_constructors() {
        assert_eq!(Value::null(), Value::Null);
        assert_eq!(Value::integer(7), Value::Int(7));
        assert_eq!(Value::float(1.25), Value::Float64(1.25));
        assert_eq!(Value::text("abc"), Value::Text("abc".to_owned()));
    }

    #[test]
    fn integer_widths_widen() {
        assert_eq!(Value::from(-3i8), Value::Int(-3));
        assert_eq!(Value::from(i64::MIN), Value::Int(i64::MIN));
        assert_eq!(Value::from(200u8), Value::UInt(200));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
    }

    #[test]
    fn absent_option_is_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("kit")), Value::text("kit"));
    }

    #[test]
    fn timestamp_normalizes_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let local = offset
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .single()
            .expect("unambiguous time");
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("unambiguous time");
        assert_eq!(Value::from(local), Value::Timestamp(expected));
    }

    #[test]
    fn json_values_become_inputs() {
        let params = Param::from_json_values([json!(1), json!({"k": 1})]);
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|param| !param.is_out()));
    }

    #[test]
    fn out_param_debug_hides_target() {
        let mut target = Value::Null;
        let param = Param::out(&mut target);
        assert!(param.is_out());
        assert_eq!(format!("{param:?}"), "Out(..)");
    }
}
