//! Nested model resolution.

use crate::{
    model::ModelClass,
    schema::{DataDescriptor, TypeConstraint},
    settings::Settings,
};

///
/// Nested
///
/// How a property's values relate to a child model class.
///
/// Single      → the value is wrapped in one child instance
/// Collection  → each element of an array becomes a child instance
///

#[derive(Clone, Debug)]
pub enum Nested {
    Single(ModelClass),
    Collection(ModelClass),
}

impl Nested {
    #[must_use]
    pub const fn class(&self) -> &ModelClass {
        match self {
            Self::Single(class) | Self::Collection(class) => class,
        }
    }
}

/// Child model class for `descriptor`, compiling an inline sub-schema on
/// first use.
///
/// Inline sub-schemas take their class name from the pascal-cased
/// property name and inherit `settings`.
#[must_use]
pub fn resolve_nested(
    descriptor: &DataDescriptor,
    property: &str,
    settings: &Settings,
) -> Option<Nested> {
    match descriptor.ty.as_ref()? {
        TypeConstraint::Model(class) => Some(Nested::Single(class.clone())),
        TypeConstraint::Schema(nested) => Some(Nested::Single(nested.compile(property, settings))),
        TypeConstraint::ListOf(class) => Some(Nested::Collection(class.clone())),
        TypeConstraint::Primitive(_) | TypeConstraint::OneOf(_) => None,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PrimitiveKind, Schema};

    #[test]
    fn primitives_do_not_nest() {
        let d = DataDescriptor::new().ty(PrimitiveKind::Object);

        assert!(resolve_nested(&d, "prop", &Settings::default()).is_none());
        assert!(resolve_nested(&DataDescriptor::new(), "prop", &Settings::default()).is_none());
    }

    #[test]
    fn inline_schema_compiles_once_per_descriptor() {
        let d = DataDescriptor::new().ty(Schema::new());
        let settings = Settings::default();

        let first = resolve_nested(&d, "shipping_address", &settings).expect("nested");
        let copy = d.clone();
        let second = resolve_nested(&copy, "shipping_address", &settings).expect("nested");

        assert!(matches!(first, Nested::Single(_)));
        assert!(first.class().ptr_eq(second.class()));
        assert_eq!(first.class().name(), "ShippingAddress");
    }

    #[test]
    fn model_class_types_pass_through() {
        let class = ModelClass::from_parts("Tag".into(), Schema::new(), Settings::default());

        let single = resolve_nested(&DataDescriptor::new().ty(&class), "tag", &Settings::default());
        let many = resolve_nested(
            &DataDescriptor::new().ty(TypeConstraint::list_of(&class)),
            "tags",
            &Settings::default(),
        );

        assert!(matches!(single, Some(Nested::Single(c)) if c.ptr_eq(&class)));
        assert!(matches!(many, Some(Nested::Collection(c)) if c.ptr_eq(&class)));
    }
}
