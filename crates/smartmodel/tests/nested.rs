use serde_json::json;
use smartmodel::prelude::*;

fn address_schema() -> Schema {
    Schema::new().field("city", DataDescriptor::new().default("NYC"))
}

fn customer(address: Schema) -> ModelClass {
    create(
        "Customer",
        Schema::new().field("address", DataDescriptor::new().ty(address)),
        &SettingsOverride::new(),
    )
}

fn child(model: &Model, property: &str) -> Model {
    model
        .get(property)
        .and_then(|value| value.as_model().cloned())
        .expect("nested instance")
}

#[test]
fn nested_schema_defaults_apply() {
    let model = customer(address_schema()).construct_empty().expect("valid");
    let address = child(&model, "address");

    assert_eq!(address.get("city"), Some(Value::from("NYC")));
    assert_eq!(address.name(), "Address");
    assert_eq!(
        model.eject().to_json(),
        json!({ "address": { "city": "NYC" } })
    );
}

#[test]
fn nested_class_is_compiled_once() {
    let class = customer(address_schema());
    let first = class.construct_empty().expect("valid");
    let second = class.construct(json!({ "address": { "city": "LA" } })).expect("valid");

    assert!(child(&first, "address")
        .class()
        .ptr_eq(child(&second, "address").class()));
}

#[test]
fn assignment_replaces_the_nested_instance() {
    let model = customer(address_schema()).construct_empty().expect("valid");
    let before = child(&model, "address");

    model
        .set("address", Value::from(json!({ "city": "LA" })))
        .expect("valid");
    let after = child(&model, "address");

    assert!(!after.ptr_eq(&before));
    assert_eq!(after.get("city"), Some(Value::from("LA")));
    assert_eq!(before.get("city"), Some(Value::from("NYC")));
}

#[test]
fn assigning_an_instance_copies_its_data() {
    let class = customer(address_schema());
    let source = class.construct(json!({ "address": { "city": "Oslo" } })).expect("valid");
    let target = class.construct_empty().expect("valid");

    let address = child(&source, "address");
    target.set("address", address.clone()).expect("same nested class");

    let copied = child(&target, "address");
    assert!(!copied.ptr_eq(&address));
    assert_eq!(copied.get("city"), Some(Value::from("Oslo")));
}

#[test]
fn nested_errors_surface_from_the_child() {
    let class = customer(Schema::new().field("city", DataDescriptor::new().required()));

    let err = class.construct_empty().expect_err("city is required");
    assert_eq!(err.code, ErrorCode::Required);
    assert_eq!(err.property, "city");
    assert_eq!(err.model, "Address");
}

#[test]
fn nested_type_rejects_scalars() {
    let model = customer(address_schema()).construct_empty().expect("valid");

    let err = model.set("address", "Main St").expect_err("not an object");
    assert_eq!(err.code, ErrorCode::Type);
    assert_eq!(child(&model, "address").get("city"), Some(Value::from("NYC")));
}

#[test]
fn model_class_as_type() {
    let tag = create(
        "Tag",
        Schema::new().field("label", DataDescriptor::new().ty(PrimitiveKind::String)),
        &SettingsOverride::new(),
    );
    let post = create(
        "Post",
        Schema::new().field("tag", DataDescriptor::new().ty(&tag)),
        &SettingsOverride::new(),
    );

    let model = post.construct(json!({ "tag": { "label": "rust" } })).expect("valid");
    let nested = child(&model, "tag");

    assert!(nested.is_instance_of(&tag));
    assert_eq!(nested.get("label"), Some(Value::from("rust")));
}

#[test]
fn list_of_model_hydrates_each_element() {
    let tag = create(
        "Tag",
        Schema::new().field("label", DataDescriptor::new().required()),
        &SettingsOverride::new(),
    );
    let post = create(
        "Post",
        Schema::new().field("tags", DataDescriptor::new().ty(TypeConstraint::list_of(&tag))),
        &SettingsOverride::new(),
    );

    let model = post
        .construct(json!({ "tags": [{ "label": "a" }, { "label": "b" }] }))
        .expect("valid");
    let tags = model.get("tags").expect("tags set");
    let items = tags.as_list().expect("array");

    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .all(|item| item.as_model().is_some_and(|m| m.is_instance_of(&tag))));
    assert_eq!(
        model.eject().to_json(),
        json!({ "tags": [{ "label": "a" }, { "label": "b" }] })
    );

    let err = post
        .construct(json!({ "tags": [{}] }))
        .expect_err("element missing label");
    assert_eq!(err.model, "Tag");

    let err = post.construct(json!({ "tags": "a" })).expect_err("not an array");
    assert_eq!(err.code, ErrorCode::Type);
}

#[test]
fn put_recurses_into_held_instances() {
    let model = customer(address_schema())
        .construct(json!({ "address": { "city": "LA", "zip": "1" } }))
        .expect("valid");
    let before = child(&model, "address");

    model
        .put(json!({ "address": { "zip": "2" } }))
        .expect("valid");

    assert!(child(&model, "address").ptr_eq(&before));
    assert_eq!(before.eject().to_json(), json!({ "city": "NYC", "zip": "2" }));

    model.put(json!({})).expect("valid");
    assert!(child(&model, "address").ptr_eq(&before));
    assert_eq!(before.eject().to_json(), json!({ "city": "NYC" }));
}

#[test]
fn check_recurses_into_nested_schemas() {
    let class = customer(
        Schema::new().field("city", DataDescriptor::new().required().ty(PrimitiveKind::String)),
    );

    let found = class
        .check(&json!({ "address": { "city": 5 } }).into())
        .expect("nested type error");
    let nested = found.nested("address").expect("nested entry");
    assert_eq!(nested.errors("city")[0].code, ErrorCode::Type);
    assert_eq!(nested.errors("city")[0].model, "Address");

    assert!(class.check(&json!({ "address": { "city": "X" } }).into()).is_none());
    assert!(class.check(&json!({}).into()).is_none());
}
