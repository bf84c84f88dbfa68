use super::{Components, ObjectSchema, Schema, SchemaKind};
use serde_json::json;

fn pet() -> Schema {
    ObjectSchema::new()
        .field("id", Schema::string().example(json!("abc123")))
        .field("name", Schema::string())
        .optional("age", Schema::number())
        .build()
        .named("Pet")
}

#[test]
fn test_clone_keeps_identity() {
    let a = Schema::string();
    let b = a.clone();
    assert_eq!(a, b);
    assert!(a.ptr_eq(&b));
    assert_ne!(a, Schema::string());
}

#[test]
fn test_object_fragment() {
    let frag = pet().to_json_schema();
    assert_eq!(frag["type"], "object");
    assert_eq!(frag["properties"]["id"]["example"], "abc123");
    assert_eq!(frag["required"], json!(["id", "name"]));
}

#[test]
fn test_named_schema_renders_as_ref() {
    let mut components = Components::new();
    let frag = Schema::array(pet()).render(&mut components);
    assert_eq!(frag["items"]["$ref"], "#/components/schemas/Pet");
    assert_eq!(components["Pet"]["type"], "object");
}

#[test]
fn test_nested_named_schemas_collected_once() {
    let owner = ObjectSchema::new()
        .field("id", Schema::string())
        .build()
        .named("User");
    let with_owner = pet().extend().field("owner", owner.clone()).build().named("PetWithOwner");

    let mut components = Components::new();
    let union = Schema::any_of([pet(), with_owner, owner]);
    let frag = union.render(&mut components);

    assert_eq!(frag["anyOf"].as_array().map(Vec::len), Some(3));
    assert_eq!(components.len(), 3);
    assert_eq!(
        components["PetWithOwner"]["properties"]["owner"]["$ref"],
        "#/components/schemas/User"
    );
}

#[test]
fn test_definition_keeps_nested_refs() {
    let owned_by = |owner: &str| {
        ObjectSchema::new()
            .field("owner", ObjectSchema::new().build().named(owner))
            .build()
            .named("Pet")
    };
    let user = owned_by("User");
    let owner = owned_by("Owner");

    assert_eq!(user.to_json_schema(), owner.to_json_schema());
    assert_ne!(user.definition(), owner.definition());
    assert_eq!(
        user.definition()["properties"]["owner"],
        json!({ "$ref": "#/components/schemas/User" })
    );

    let mut components = Components::new();
    user.emit_components(&mut components);
    assert_eq!(components.keys().collect::<Vec<_>>(), ["Pet", "User"]);
}

#[test]
fn test_extend_is_unnamed_copy() {
    let base = pet();
    let ext = base.extend().field("extra", Schema::boolean()).build();
    assert!(ext.name().is_none());
    assert!(ext.property("id").is_some());
    assert!(ext.property("extra").is_some());
    assert!(base.property("extra").is_none());
}

#[test]
fn test_field_replaces_existing_property() {
    let schema = ObjectSchema::new()
        .optional("id", Schema::number())
        .field("id", Schema::string())
        .build();
    let props = schema.properties().unwrap();
    assert_eq!(props.len(), 1);
    assert!(props[0].required);
    assert_eq!(props[0].schema.kind(), &SchemaKind::String);
}

#[test]
fn test_validation() {
    let schema = pet();
    assert!(schema.is_valid(&json!({ "id": "1", "name": "Rex", "age": 3 })));
    assert!(!schema.is_valid(&json!({ "id": 1, "name": "Rex" })));
    let errors = schema.validate(&json!({ "name": "Rex" })).unwrap();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_any_of_accepts_either_member() {
    let union = Schema::any_of([Schema::string(), Schema::integer()]);
    assert!(union.is_valid(&json!("x")));
    assert!(union.is_valid(&json!(3)));
    assert!(!union.is_valid(&json!(true)));
}

#[test]
fn test_raw_object_counts_as_object() {
    let raw = Schema::raw(json!({ "type": "object", "properties": {} }));
    assert!(raw.is_object());
    assert!(raw.properties().is_none());
    assert!(!Schema::string().is_object());
}

#[test]
fn test_invalid_raw_schema_fails_to_compile() {
    let raw = Schema::raw(json!({ "type": 12 }));
    assert!(raw.validator().is_err());
    assert!(!raw.is_valid(&json!({})));
}
