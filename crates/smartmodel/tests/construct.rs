use serde_json::json;
use smartmodel::prelude::*;

fn person(overrides: &SettingsOverride) -> ModelClass {
    create(
        "Person",
        Schema::new()
            .field(
                "name",
                DataDescriptor::new().required().ty(PrimitiveKind::String),
            )
            .field(
                "age",
                DataDescriptor::new().ty(PrimitiveKind::Number).default(0),
            ),
        overrides,
    )
}

#[test]
fn missing_keys_take_their_default() {
    let ann = person(&SettingsOverride::new())
        .construct(json!({ "name": "Ann" }))
        .expect("valid data");

    assert_eq!(ann.eject().to_json(), json!({ "name": "Ann", "age": 0 }));
    assert_eq!(ann.get("age"), Some(Value::from(0)));
}

#[test]
fn missing_required_key_raises() {
    let err = person(&SettingsOverride::new())
        .construct(json!({}))
        .expect_err("name is required");

    assert_eq!(err.code, ErrorCode::Required);
    assert_eq!(err.property, "name");
    assert_eq!(err.model, "Person");
}

#[test]
fn explicit_null_counts_as_empty_for_required() {
    let err = person(&SettingsOverride::new())
        .construct(json!({ "name": null }))
        .expect_err("null is empty");

    assert_eq!(err.code, ErrorCode::Required);
}

#[test]
fn mismatched_type_raises() {
    let err = person(&SettingsOverride::new())
        .construct(json!({ "name": "Ann", "age": "x" }))
        .expect_err("age must be a number");

    assert_eq!(err.code, ErrorCode::Type);
    assert_eq!(err.property, "age");
    assert_eq!(err.message, "Invalid type 'string' on property 'age'");
}

#[test]
fn explicit_null_skips_default() {
    let ann = person(&SettingsOverride::new())
        .construct(json!({ "name": "Ann", "age": null }))
        .expect("null age is allowed");

    assert_eq!(ann.get("age"), Some(Value::Null));
}

#[test]
fn absorbed_errors_leave_the_value_unset() {
    let class = person(&SettingsOverride::new().exceptions(false));
    let model = class
        .construct(json!({ "age": "x" }))
        .expect("nothing is raised");

    assert_eq!(model.get("name"), None);
    assert_eq!(model.get("age"), None);
    assert_eq!(model.eject().to_json(), json!({}));
}

#[test]
fn schema_keys_are_visible_even_when_absent() {
    let class = create(
        "Loose",
        Schema::new()
            .field("a", DataDescriptor::new())
            .field("b", DataDescriptor::new()),
        &SettingsOverride::new(),
    );
    let model = class.construct_empty().expect("no constraints");

    assert_eq!(model.keys(), vec!["a".to_string(), "b".to_string()]);
    assert!(model.has("a"));
    assert_eq!(model.eject().to_json(), json!({}));
}

#[test]
fn undeclared_keys_are_kept_outside_strict_mode() {
    let model = person(&SettingsOverride::new())
        .construct(json!({ "name": "Ann", "nickname": "A" }))
        .expect("valid");

    assert_eq!(model.get("nickname"), Some(Value::from("A")));
    assert_eq!(model.keys(), vec!["name", "age", "nickname"]);
}

#[test]
fn non_object_data_is_always_a_type_error() {
    let class = person(&SettingsOverride::new().exceptions(false));

    for data in [Value::from("x"), Value::Null, Value::from_list(vec![1, 2])] {
        let err = class.construct(data).expect_err("data must be an object");
        assert_eq!(err.code, ErrorCode::Type);
        assert_eq!(err.property, "$data");
    }
}

#[test]
fn defaults_are_not_shared_between_instances() {
    let class = create(
        "Bag",
        Schema::new().field(
            "items",
            DataDescriptor::new().default(Value::from_list(Vec::<Value>::new())),
        ),
        &SettingsOverride::new(),
    );

    let first = class.construct_empty().expect("valid");
    let second = class.construct_empty().expect("valid");
    first.set("items", Value::from_list(vec![1])).expect("valid");

    assert_eq!(second.get("items"), Some(Value::List(vec![])));
}

#[test]
fn instances_know_their_class() {
    let class = person(&SettingsOverride::new());
    let other = person(&SettingsOverride::new());
    let model = class.construct(json!({ "name": "Ann" })).expect("valid");

    assert!(model.is_instance_of(&class));
    assert!(!model.is_instance_of(&other));
    assert_eq!(model.name(), "Person");
    assert!(model.class().ptr_eq(&class));
}

// ============================================================================
// Instance methods
// ============================================================================

trait Greet {
    fn greeting(&self) -> Option<String>;
}

impl Greet for Model {
    fn greeting(&self) -> Option<String> {
        if self.name() != "Person" {
            return None;
        }
        let name = self.get("name")?;

        Some(format!("Hello, {}", name.as_text()?))
    }
}

#[test]
fn extension_traits_add_instance_methods() {
    let class = person(&SettingsOverride::new());
    let ann = class.construct(json!({ "name": "Ann" })).expect("valid");
    let other = create("Robot", Schema::new(), &SettingsOverride::new())
        .construct_empty()
        .expect("valid");

    assert!(ann.is_instance_of(&class));
    assert_eq!(ann.greeting().as_deref(), Some("Hello, Ann"));
    assert_eq!(other.greeting(), None);
}
