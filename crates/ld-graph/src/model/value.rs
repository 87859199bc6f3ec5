//! Scalar field values.
//!
//! Scalar fields are stored as `Option<T>` and scalar sequences as `Vec<T>`
//! for any `T: WireScalar`. The decoder and encoder reach them through the
//! object-safe [`ScalarSlot`] and [`ScalarSeq`] views so records never
//! expose their concrete field types.

use std::fmt;

use serde_json::{Number, Value};

use crate::util::datetime::{format_datetime_rfc3339, parse_datetime_rfc3339};

/// Primitive types a scalar slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Integer,
    Float,
    Text,
    DateTime,
}

impl ScalarKind {
    /// Name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "number",
            ScalarKind::Text => "string",
            ScalarKind::DateTime => "date-time string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names the JSON kind of a wire value, for error messages.
pub fn wire_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A primitive that converts to and from a wire scalar.
pub trait WireScalar: Sized {
    const KIND: ScalarKind;

    /// Converts a wire value, or returns `None` if it is not directly
    /// convertible.
    fn from_wire(value: &Value) -> Option<Self>;

    fn to_wire(&self) -> Value;
}

impl WireScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl WireScalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;

    /// Accepts integers and integral floats (`3.0`) within range.
    fn from_wire(value: &Value) -> Option<Self> {
        let Value::Number(n) = value else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        let f = n.as_f64()?;
        (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    /// NaN and infinities have no JSON form and are written as `null`.
    fn to_wire(&self) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl WireScalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

/// An RFC 3339 timestamp with the UTC offset it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Microseconds since Unix epoch (1970-01-01T00:00:00Z).
    pub epoch_us: i64,
    /// Signed UTC offset in minutes (e.g., +330 for +05:30).
    pub offset_min: i16,
}

impl DateTime {
    pub fn parse(s: &str) -> Option<Self> {
        let (epoch_us, offset_min) = parse_datetime_rfc3339(s).ok()?;
        Some(Self {
            epoch_us,
            offset_min,
        })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_datetime_rfc3339(self.epoch_us, self.offset_min))
    }
}

impl WireScalar for DateTime {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn from_wire(value: &Value) -> Option<Self> {
        value.as_str().and_then(DateTime::parse)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Object-safe view of a single-valued scalar field.
pub trait ScalarSlot {
    fn kind(&self) -> ScalarKind;

    /// Stores `value` if convertible. Returns false, leaving the slot
    /// untouched, otherwise.
    fn assign(&mut self, value: &Value) -> bool;

    /// The wire form of the current value, `None` when unset.
    fn to_wire(&self) -> Option<Value>;
}

impl<T: WireScalar> ScalarSlot for Option<T> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn assign(&mut self, value: &Value) -> bool {
        match T::from_wire(value) {
            Some(v) => {
                *self = Some(v);
                true
            }
            None => false,
        }
    }

    fn to_wire(&self) -> Option<Value> {
        self.as_ref().map(T::to_wire)
    }
}

/// Object-safe view of an ordered scalar sequence field.
pub trait ScalarSeq {
    fn kind(&self) -> ScalarKind;

    fn clear(&mut self);

    /// Appends `value` if convertible; returns false otherwise.
    fn push(&mut self, value: &Value) -> bool;

    fn to_wire(&self) -> Vec<Value>;
}

impl<T: WireScalar> ScalarSeq for Vec<T> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push(&mut self, value: &Value) -> bool {
        match T::from_wire(value) {
            Some(v) => {
                Vec::push(self, v);
                true
            }
            None => false,
        }
    }

    fn to_wire(&self) -> Vec<Value> {
        self.iter().map(T::to_wire).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(i64::from_wire(&json!(42)), Some(42));
        assert_eq!(i64::from_wire(&json!(-7)), Some(-7));
        assert_eq!(i64::from_wire(&json!(3.0)), Some(3));
        assert_eq!(i64::from_wire(&json!(3.5)), None);
        assert_eq!(i64::from_wire(&json!("42")), None);
        assert_eq!(i64::from_wire(&json!(true)), None);
    }

    #[test]
    fn test_float_and_bool_conversion() {
        assert_eq!(f64::from_wire(&json!(1)), Some(1.0));
        assert_eq!(f64::from_wire(&json!(2.5)), Some(2.5));
        assert_eq!(f64::NAN.to_wire(), Value::Null);
        assert_eq!(bool::from_wire(&json!(false)), Some(false));
        assert_eq!(bool::from_wire(&json!(0)), None);
    }

    #[test]
    fn test_datetime_conversion() {
        let dt = DateTime::from_wire(&json!("2024-03-06T00:00:00Z")).unwrap();
        assert_eq!(dt.offset_min, 0);
        assert_eq!(dt.to_wire(), json!("2024-03-06T00:00:00Z"));
        assert!(DateTime::from_wire(&json!("yesterday")).is_none());
        assert!(DateTime::from_wire(&json!(1709683200)).is_none());
    }

    #[test]
    fn test_scalar_slot_keeps_value_on_mismatch() {
        let mut slot: Option<String> = Some("kept".to_string());
        let view: &mut dyn ScalarSlot = &mut slot;
        assert!(!view.assign(&json!(5)));
        assert_eq!(view.kind(), ScalarKind::Text);
        assert_eq!(view.to_wire(), Some(json!("kept")));
        assert!(view.assign(&json!("replaced")));
        assert_eq!(slot.as_deref(), Some("replaced"));
    }

    #[test]
    fn test_scalar_seq() {
        let mut seq: Vec<String> = Vec::new();
        let view: &mut dyn ScalarSeq = &mut seq;
        assert!(view.push(&json!("core")));
        assert!(!view.push(&json!(1)));
        assert!(view.push(&json!("software")));
        assert_eq!(view.to_wire(), vec![json!("core"), json!("software")]);
        view.clear();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_wire_kind() {
        assert_eq!(wire_kind(&json!(null)), "null");
        assert_eq!(wire_kind(&json!(1)), "integer");
        assert_eq!(wire_kind(&json!(1.5)), "number");
        assert_eq!(wire_kind(&json!([])), "array");
        assert_eq!(wire_kind(&json!({})), "object");
    }
}
