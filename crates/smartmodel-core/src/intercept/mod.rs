//! Interception engine.
//!
//! Every read, write and delete of a model property runs one pass through
//! the pipelines below. Hooks and user functions are always called with
//! no store borrow held, so they are free to read the model back.

mod store;

pub(crate) use store::Store;

use crate::{
    error::{ModelError, first_raised},
    hooks::{DeleteEvent, DeleteFlow, GetEvent, GetHook, SetEvent, SetHook},
    model::{Model, ModelClass},
    nested::{Nested, resolve_nested},
    schema::{DataDescriptor, Descriptor, PrimitiveKind, Schema},
    settings::Exceptions,
    validate::{Check, validate},
    value::{Value, option_eq},
};

///
/// Pass
/// Shared context for one property access.
///

struct Pass<'a> {
    model: &'a Model,
    property: &'a str,
    schema: &'a Schema,
}

impl Pass<'_> {
    fn set_hook(
        &self,
        hook: Option<&SetHook>,
        value: Option<Value>,
        old: Option<&Value>,
    ) -> Option<Value> {
        let Some(hook) = hook else {
            return value;
        };
        let replaced = hook(&SetEvent {
            model: self.model,
            property: self.property,
            value: value.as_ref(),
            old,
            schema: self.schema,
        });

        replaced.or(value)
    }

    fn get_hook(&self, hook: Option<&GetHook>, value: Option<Value>) -> Option<Value> {
        let Some(hook) = hook else {
            return value;
        };
        let replaced = hook(&GetEvent {
            model: self.model,
            property: self.property,
            value: value.as_ref(),
            schema: self.schema,
        });

        replaced.or(value)
    }

    const fn delete_event<'e>(&'e self, old: Option<&'e Value>) -> DeleteEvent<'e> {
        DeleteEvent {
            model: self.model,
            property: self.property,
            old,
            schema: self.schema,
        }
    }
}

// ============================================================================
// Set
// ============================================================================

/// Write `incoming` to `property`. `None` assigns absence.
///
/// A failed validation never touches the store: the first raised error is
/// returned, and absorbed errors turn the write into a no-op.
pub(crate) fn set(model: &Model, property: &str, incoming: Option<Value>) -> Result<(), ModelError> {
    let class = model.class();
    let (name, schema, settings) = (class.name(), class.schema(), class.settings());

    let declared = match schema.get(property) {
        Some(Descriptor::Data(data)) => Some(data),
        Some(Descriptor::Virtual(_)) => {
            return gate(vec![ModelError::readonly(name, property)], &settings.exceptions);
        }
        None => None,
    };
    let placeholder = DataDescriptor::new();
    let descriptor = declared.unwrap_or(&placeholder);

    let old = model.stored(property);
    let is_first = old.is_none();
    let is_update = !is_first && !option_eq(incoming.as_ref(), old.as_ref());

    let nested = resolve_nested(descriptor, property, settings);
    let hooks = &settings.methods;
    let pass = Pass {
        model,
        property,
        schema,
    };

    let mut value = pass.set_hook(hooks.on_before_set.as_ref(), incoming, old.as_ref());
    if is_update {
        value = pass.set_hook(hooks.on_before_update.as_ref(), value, old.as_ref());
    }

    if let Some(transform) = &descriptor.transform {
        value = value.map(&**transform);
    }

    let array_descriptor;
    let descriptor = match &nested {
        Some(Nested::Collection(class)) => {
            value = hydrate_elements(class, value)?;
            array_descriptor = DataDescriptor {
                ty: Some(PrimitiveKind::Array.into()),
                ..descriptor.clone()
            };
            &array_descriptor
        }
        _ => descriptor,
    };

    let errors = validate(&Check {
        model: name,
        property,
        descriptor: declared.is_some().then_some(descriptor),
        value: value.as_ref(),
        is_first,
        settings,
    });
    if !errors.is_empty() {
        return gate(errors, &settings.exceptions);
    }

    if settings.strict && declared.is_none() {
        return Ok(());
    }

    if let Some(Nested::Single(class)) = &nested {
        let data = match value {
            Some(map @ Value::Map(_)) => Some(map),
            Some(Value::Model(child)) => Some(child.eject()),
            _ => None,
        };
        value = Some(Value::Model(class.construct_from(data)?));
    }

    model.store_mut().insert(property, value.clone());

    let reported = pass.set_hook(hooks.on_set.as_ref(), value, old.as_ref());
    if is_update {
        let reported = pass.set_hook(hooks.on_update.as_ref(), reported, old.as_ref());
        model.notify(property, reported.as_ref());
    }

    Ok(())
}

/// Turn each plain-object element into an instance of `class`.
fn hydrate_elements(
    class: &ModelClass,
    value: Option<Value>,
) -> Result<Option<Value>, ModelError> {
    let Some(Value::List(items)) = value else {
        return Ok(value);
    };

    let items = items
        .into_iter()
        .map(|item| match item {
            map @ Value::Map(_) => class.construct(map).map(Value::Model),
            other => Ok(other),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Value::List(items)))
}

/// Apply the throw policy to a non-empty error list.
fn gate(errors: Vec<ModelError>, exceptions: &Exceptions) -> Result<(), ModelError> {
    if let Some(first) = errors.first()
        && !exceptions.raises(first.kind())
    {
        tracing::debug!(
            model = %first.model,
            property = %first.property,
            code = %first.code,
            errors = errors.len(),
            "validation failure absorbed"
        );
    }

    first_raised(errors, exceptions).map_or(Ok(()), Err)
}

// ============================================================================
// Get
// ============================================================================

/// Read `property`. Never fails and never writes.
pub(crate) fn get(model: &Model, property: &str) -> Option<Value> {
    let class = model.class();
    let schema = class.schema();

    let Some(descriptor) = schema.get(property) else {
        return model.stored(property);
    };

    let hooks = &class.settings().methods;
    let pass = Pass {
        model,
        property,
        schema,
    };

    let mut value = pass.get_hook(hooks.on_before_get.as_ref(), model.stored(property));

    match descriptor {
        Descriptor::Virtual(compute) => value = Some(compute(model, schema)),
        Descriptor::Data(data) => {
            if let Some(format) = &data.format {
                value = value.map(&**format);
            }
        }
    }

    pass.get_hook(hooks.on_get.as_ref(), value)
}

// ============================================================================
// Delete
// ============================================================================

/// Remove `property` from the instance.
pub(crate) fn delete(model: &Model, property: &str) -> Result<(), ModelError> {
    let class = model.class();
    let (name, schema, settings) = (class.name(), class.schema(), class.settings());

    if let Some(Descriptor::Data(data)) = schema.get(property)
        && data.required
    {
        return gate(
            vec![ModelError::required_delete(name, property)],
            &settings.exceptions,
        );
    }

    let hooks = &settings.methods;
    let pass = Pass {
        model,
        property,
        schema,
    };
    let old = model.stored(property);

    if let Some(before) = &hooks.on_before_delete
        && before(&pass.delete_event(old.as_ref())) == DeleteFlow::Cancel
    {
        tracing::debug!(model = name, property, "delete cancelled");
        return Ok(());
    }

    model.store_mut().remove(property);

    if let Some(on_delete) = &hooks.on_delete {
        on_delete(&pass.delete_event(old.as_ref()));
    }
    pass.set_hook(hooks.on_update.as_ref(), None, old.as_ref());
    model.notify(property, None);

    Ok(())
}

///
/// TESTS
///
