//! Validation engine.
//!
//! Produces the errors for one candidate value against one descriptor.
//! Raising or absorbing them is the caller's decision.

use crate::{error::ModelError, schema::DataDescriptor, settings::Settings, value::Value};

///
/// Check
///
/// One validation pass over a single property.
/// `descriptor` is `None` for a property the schema does not declare.
///

pub struct Check<'a> {
    pub model: &'a str,
    pub property: &'a str,
    pub descriptor: Option<&'a DataDescriptor>,
    pub value: Option<&'a Value>,
    pub is_first: bool,
    pub settings: &'a Settings,
}

/// Run every applicable check, in order.
///
/// `strict`, `required` and `readonly` each end the pass on their own.
/// Absence without `required` is not an error. Rules are all evaluated,
/// so one pass can report several of them.
#[must_use]
pub fn validate(check: &Check<'_>) -> Vec<ModelError> {
    let Check {
        model,
        property,
        descriptor,
        value,
        is_first,
        settings,
    } = *check;

    let Some(descriptor) = descriptor else {
        if settings.strict {
            return vec![ModelError::strict(model, property)];
        }
        return Vec::new();
    };

    if descriptor.required && settings.is_empty(value) {
        return vec![ModelError::required(model, property)];
    }

    if descriptor.readonly && !is_first {
        return vec![ModelError::readonly(model, property)];
    }

    let Some(value) = value else {
        return Vec::new();
    };

    let mut errors = Vec::new();

    if let Some(ty) = &descriptor.ty
        && (descriptor.required || !settings.is_empty(Some(value)))
        && !ty.accepts(value)
    {
        errors.push(ModelError::type_mismatch(model, property, value.kind()));
    }

    for (name, rule) in &descriptor.rules {
        if rule(value) {
            errors.push(ModelError::rule(model, property, name));
        }
    }

    errors
}

///
/// TESTS
///
