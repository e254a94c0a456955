use convert_case::{Case, Casing};

///
/// pascal_case
/// Derive a type-style name from a property name.
///
/// Used to name model classes compiled from nested schemas, so a
/// property `billing_address` produces a class named `BillingAddress`.
///
#[must_use]
pub fn pascal_case(ident: &str) -> String {
    ident.to_case(Case::Pascal)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_is_capitalised() {
        assert_eq!(pascal_case("prop"), "Prop");
        assert_eq!(pascal_case("address"), "Address");
    }

    #[test]
    fn separators_are_folded() {
        assert_eq!(pascal_case("billing_address"), "BillingAddress");
        assert_eq!(pascal_case("shipping-address"), "ShippingAddress");
        assert_eq!(pascal_case("nestedProp"), "NestedProp");
    }
}
