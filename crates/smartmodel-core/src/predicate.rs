//! Type and shape predicates.
//!
//! Stateless classifiers shared by the validation engine, the nested
//! resolver and the interception engine.

use crate::{
    schema::TypeConstraint,
    value::{Value, option_eq},
};

/// Default emptiness test: absent, `Null`, or empty text.
///
/// This is what `required` checks against unless the model's settings
/// supply their own `empty` function.
#[must_use]
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Absent means no value at all; `Null` is present.
#[must_use]
pub const fn is_absent(value: Option<&Value>) -> bool {
    value.is_none()
}

#[must_use]
pub const fn is_array(value: &Value) -> bool {
    value.is_list()
}

/// Plain data object; model instances are not plain.
#[must_use]
pub const fn is_plain_object(value: &Value) -> bool {
    value.is_map()
}

/// Live model instance.
#[must_use]
pub const fn is_model(value: &Value) -> bool {
    value.is_model()
}

/// Deep value equality over optional slots.
#[must_use]
pub fn is_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    option_eq(left, right)
}

/// Constraint is an uncompiled or compiled nested sub-schema.
#[must_use]
pub const fn is_nested_schema(ty: &TypeConstraint) -> bool {
    matches!(ty, TypeConstraint::Schema(_))
}

/// Constraint names a model class directly.
#[must_use]
pub const fn is_model_class(ty: &TypeConstraint) -> bool {
    matches!(ty, TypeConstraint::Model(_))
}

/// Constraint is the array-of-one-model-class marker.
#[must_use]
pub const fn is_model_collection(ty: &TypeConstraint) -> bool {
    matches!(ty, TypeConstraint::ListOf(_))
}

///
/// TESTS
///
