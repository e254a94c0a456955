use crate::value::Value;

/// Structural equality used for update detection.
///
/// - `Int` and `Float` compare numerically, and `NaN` equals `NaN`
/// - plain objects compare by key set, independent of entry order
/// - model instances compare by their snapshots, and equal a plain
///   object holding the same data
/// - dates compare by instant
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn deep_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(l, r)| deep_eq(l, r))
        }
        (Value::Map(a), Value::Map(b)) => map_eq(a, b),
        (Value::Model(a), Value::Model(b)) => a.ptr_eq(b) || deep_eq(&a.eject(), &b.eject()),
        (Value::Model(model), map @ Value::Map(_)) | (map @ Value::Map(_), Value::Model(model)) => {
            deep_eq(&model.eject(), map)
        }
        _ => false,
    }
}

/// Equality over optional slots; two absent slots are equal.
#[must_use]
pub fn option_eq(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => deep_eq(l, r),
        _ => false,
    }
}

fn map_eq(left: &[(String, Value)], right: &[(String, Value)]) -> bool {
    left.len() == right.len()
        && left.iter().all(|(key, l)| {
            right
                .iter()
                .find(|(k, _)| k == key)
                .is_some_and(|(_, r)| deep_eq(l, r))
        })
}
