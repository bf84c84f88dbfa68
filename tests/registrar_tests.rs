#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::Method;
use routespec::dispatcher::{HandlerRequest, HandlerResponse, Outcome};
use routespec::prelude::*;
use routespec::spec::MediaType;
use routespec::RegistrarError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PetParams {
    #[serde(rename = "petId")]
    pet_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Pet {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct PetWithOwner {
    id: String,
    name: String,
    owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
enum PetOrOwned {
    Owned(PetWithOwner),
    Pet(Pet),
}

fn pet_schema() -> Schema {
    ObjectSchema::new()
        .field("id", Schema::string())
        .field("name", Schema::string())
        .build()
        .named("Pet")
}

fn pet_with_owner_schema(pet: &Schema) -> Schema {
    pet.extend()
        .field("owner", Schema::string())
        .build()
        .named("PetWithOwner")
}

fn pet_params() -> Schema {
    ObjectSchema::new().field("petId", Schema::string()).build()
}

fn registry() -> Arc<DocumentRegistry> {
    DocumentRegistry::shared(DocumentInfo::new("Pet Store", "1.0.0"))
}

#[test]
fn test_get_pet_documents_and_binds() {
    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    let pet = pet_schema();

    let mut binding = pets
        .openapi(
            RouteDeclaration::new("/pets/{petId}")
                .summary("Get a pet")
                .params::<PetParams>(pet_params())
                .response(200, pet.clone())
                .response(404, Shape::none())
                .responds::<Pet>(),
        )
        .unwrap();
    binding
        .get(
            "/{petId}",
            binding.handler(|req: TypedRequest<PetParams, (), ()>| {
                Reply::ok(Pet {
                    id: req.params.pet_id,
                    name: "Mittens".into(),
                })
            }),
        )
        .unwrap();

    let doc = registry.generate().unwrap();
    let op = doc.operation("/pets/{petId}", &Method::GET).unwrap();
    assert_eq!(op["summary"], "Get a pet");
    assert_eq!(op["responses"]["200"]["description"], "OK");
    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"],
        json!({ "$ref": "#/components/schemas/Pet" })
    );
    assert_eq!(op["responses"]["404"], json!({ "description": "Not Found" }));
    assert_eq!(op["parameters"][0]["name"], "petId");
    assert_eq!(op["parameters"][0]["in"], "path");
    assert_eq!(op["parameters"][0]["required"], true);
    assert_eq!(
        doc.as_value()["components"]["schemas"]["Pet"],
        pet.to_json_schema()
    );

    // Exactly one GET bound, at the mounted path.
    let routes: Vec<(Method, String)> = pets
        .router()
        .routes()
        .map(|(m, p)| (m.clone(), p.to_string()))
        .collect();
    assert_eq!(routes, vec![(Method::GET, "/pets/{petId}".to_string())]);

    let resp = pets
        .router()
        .dispatch(HandlerRequest::new(Method::GET, "/pets/42"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!({ "id": "42", "name": "Mittens" }));
}

#[test]
fn test_tuple_response_is_any_of_with_union_type() {
    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    let pet = pet_schema();
    let owned = pet_with_owner_schema(&pet);

    let mut binding = pets
        .openapi(
            RouteDeclaration::new("/pets/{petId}")
                .params::<PetParams>(pet_params())
                .response(200, [pet.clone(), owned.clone()])
                .responds::<PetOrOwned>(),
        )
        .unwrap();
    binding
        .get(
            "/{petId}",
            binding.handler(|req: TypedRequest<PetParams, (), ()>| {
                if req.params.pet_id == "1" {
                    Reply::ok(PetOrOwned::Owned(PetWithOwner {
                        id: "1".into(),
                        name: "Rex".into(),
                        owner: "alice".into(),
                    }))
                } else {
                    Reply::ok(PetOrOwned::Pet(Pet {
                        id: req.params.pet_id,
                        name: "Stray".into(),
                    }))
                }
            }),
        )
        .unwrap();

    let doc = registry.generate().unwrap();
    let schema = &doc.operation("/pets/{petId}", &Method::GET).unwrap()["responses"]["200"]
        ["content"]["application/json"]["schema"];
    assert_eq!(
        schema,
        &json!({ "anyOf": [
            { "$ref": "#/components/schemas/Pet" },
            { "$ref": "#/components/schemas/PetWithOwner" }
        ]})
    );
    let schemas = &doc.as_value()["components"]["schemas"];
    assert!(schemas.get("Pet").is_some());
    assert_eq!(schemas["PetWithOwner"]["required"], json!(["id", "name", "owner"]));

    let owned_resp = pets
        .router()
        .dispatch(HandlerRequest::new(Method::GET, "/pets/1"));
    assert_eq!(owned_resp.body["owner"], "alice");
    assert!(owned.is_valid(&owned_resp.body));

    let plain = pets
        .router()
        .dispatch(HandlerRequest::new(Method::GET, "/pets/9"));
    assert!(plain.body.get("owner").is_none());
    assert!(pet.is_valid(&plain.body));
}

#[test]
fn test_one_declaration_serves_several_verbs() {
    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    pets.openapi(
        RouteDeclaration::new("/pets/{petId}")
            .params::<PetParams>(pet_params())
            .response(204, Shape::none()),
    )
    .unwrap()
    .put("/{petId}", |_: &mut HandlerRequest| HandlerResponse::empty(204))
    .unwrap()
    .delete("/{petId}", |_: &mut HandlerRequest| HandlerResponse::empty(204))
    .unwrap();

    assert_eq!(registry.len(), 2);
    let doc = registry.generate().unwrap();
    for method in [Method::PUT, Method::DELETE] {
        let op = doc.operation("/pets/{petId}", &method).unwrap();
        assert_eq!(op["responses"]["204"], json!({ "description": "No Content" }));
    }
    assert!(doc.operation("/pets/{petId}", &Method::GET).is_none());
    assert_eq!(pets.router().len(), 2);
}

#[test]
fn test_rebinding_overwrites_operation_in_place() {
    let registry = registry();
    let mut api = OpenApiRouter::new(Arc::clone(&registry));

    api.openapi(RouteDeclaration::new("/a").summary("first"))
        .unwrap()
        .get("/a", |_: &mut HandlerRequest| HandlerResponse::empty(200))
        .unwrap();
    api.openapi(RouteDeclaration::new("/b").summary("b"))
        .unwrap()
        .get("/b", |_: &mut HandlerRequest| HandlerResponse::empty(200))
        .unwrap();
    api.openapi(RouteDeclaration::new("/a").summary("second"))
        .unwrap()
        .get("/a", |_: &mut HandlerRequest| HandlerResponse::empty(200))
        .unwrap();

    let ops = registry.operations();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].path, "/a");
    assert_eq!(ops[0].metadata.summary.as_deref(), Some("second"));
    assert_eq!(ops[1].path, "/b");
}

#[test]
fn test_response_declaration_order_does_not_matter() {
    let pet = pet_schema();
    let forward = RouteDeclaration::new("/pets")
        .response(200, pet.clone())
        .response(404, Shape::none())
        .response(500, ContentObject::described("Boom"));
    let backward = RouteDeclaration::new("/pets")
        .response(500, ContentObject::described("Boom"))
        .response(404, Shape::none())
        .response(200, pet);

    let render = |decl: RouteDeclaration| {
        let registry = registry();
        let mut api = OpenApiRouter::new(Arc::clone(&registry));
        api.openapi(decl)
            .unwrap()
            .get("/pets", |_: &mut HandlerRequest| HandlerResponse::empty(200))
            .unwrap();
        registry.render().unwrap().into_value()
    };
    assert_eq!(render(forward), render(backward));
}

fn owned_pet(owner: Schema) -> Schema {
    ObjectSchema::new()
        .field("id", Schema::string())
        .field("owner", owner)
        .build()
        .named("Pet")
}

fn person(name: &str) -> Schema {
    ObjectSchema::new()
        .field("name", Schema::string())
        .build()
        .named(name)
}

type Declare = fn(&mut OpenApiRouter) -> routespec::Result<()>;

fn ok(_: &mut HandlerRequest) -> HandlerResponse {
    HandlerResponse::empty(200)
}

fn declare_in_order(routes: &[Declare]) -> routespec::Result<Value> {
    let registry = registry();
    let mut api = OpenApiRouter::new(Arc::clone(&registry));
    for declare in routes {
        declare(&mut api)?;
    }
    Ok(registry.generate()?.as_value().clone())
}

fn declare_list(api: &mut OpenApiRouter) -> routespec::Result<()> {
    api.openapi(
        RouteDeclaration::new("/pets")
            .summary("List pets")
            .response(200, Schema::array(pet_schema()))
            .response(500, ContentObject::described("Boom")),
    )?
    .get("/pets", ok)?;
    Ok(())
}

fn declare_get(api: &mut OpenApiRouter) -> routespec::Result<()> {
    let pet = pet_schema();
    let owned = pet_with_owner_schema(&pet);
    api.openapi(
        RouteDeclaration::new("/pets/{petId}")
            .params::<PetParams>(pet_params())
            .response(200, [pet, owned])
            .response(404, Shape::none()),
    )?
    .get("/pets/{petId}", ok)?;
    Ok(())
}

fn declare_create(api: &mut OpenApiRouter) -> routespec::Result<()> {
    api.openapi(
        RouteDeclaration::new("/pets")
            .body::<Pet>(pet_schema())
            .response(201, pet_schema()),
    )?
    .post("/pets", ok)?;
    Ok(())
}

fn declare_user_owned(api: &mut OpenApiRouter) -> routespec::Result<()> {
    api.openapi(RouteDeclaration::new("/a").response(200, owned_pet(person("User"))))?
        .get("/a", ok)?;
    Ok(())
}

fn declare_owner_owned(api: &mut OpenApiRouter) -> routespec::Result<()> {
    api.openapi(RouteDeclaration::new("/b").response(200, owned_pet(person("Owner"))))?
        .get("/b", ok)?;
    Ok(())
}

#[test]
fn test_route_declaration_order_does_not_matter() {
    let forward = declare_in_order(&[declare_list, declare_get, declare_create]).unwrap();
    let backward = declare_in_order(&[declare_create, declare_get, declare_list]).unwrap();

    assert_eq!(forward, backward);
    assert!(forward["paths"]["/pets"]["get"].is_object());
    assert!(forward["paths"]["/pets"]["post"].is_object());
    let names: Vec<&String> = forward["components"]["schemas"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(names, ["Pet", "PetWithOwner"]);
}

#[test]
fn test_same_name_with_different_nested_components_conflicts_in_any_order() {
    for routes in [
        [declare_user_owned as Declare, declare_owner_owned],
        [declare_owner_owned as Declare, declare_user_owned],
    ] {
        let err = declare_in_order(&routes).unwrap_err();
        assert!(matches!(err, RegistrarError::ComponentNameConflict { ref name } if name == "Pet"));
    }
}

#[test]
fn test_malformed_declarations_fail_before_binding() {
    let registry = registry();
    let mut api = OpenApiRouter::new(Arc::clone(&registry));

    let short = api
        .openapi(RouteDeclaration::new("/x").response(200, vec![pet_schema()]))
        .err()
        .unwrap();
    assert!(matches!(short, RegistrarError::TupleTooShort { len: 1 }));

    let mut content = BTreeMap::new();
    content.insert("text/plain".to_string(), MediaType::new(Schema::string()));
    let conflicting = api
        .openapi(
            RouteDeclaration::new("/x").response(
                200,
                ContentObject::with_content(content).schema(Schema::string()),
            ),
        )
        .err()
        .unwrap();
    assert!(matches!(
        conflicting,
        RegistrarError::ConflictingContentAndSchema
    ));
    assert!(conflicting.is_declaration_error());

    let non_object = api
        .openapi(RouteDeclaration::new("/x/{id}").params::<Value>(Schema::string()))
        .err()
        .unwrap();
    assert!(matches!(
        non_object,
        RegistrarError::NonObjectParameters { kind: "params", .. }
    ));

    assert!(registry.is_empty());
    assert!(api.router().is_empty());
}

#[test]
fn test_router_failure_registers_nothing() {
    let registry = registry();
    let mut api = OpenApiRouter::new(Arc::clone(&registry));
    let err = api
        .openapi(RouteDeclaration::new("/bad"))
        .unwrap()
        .get("/{unclosed", |_: &mut HandlerRequest| HandlerResponse::empty(200))
        .err()
        .unwrap();
    assert!(matches!(err, RegistrarError::InvalidPath { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_request_body_and_query_documented() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct ListQuery {
        limit: Option<i64>,
    }

    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    let pet = pet_schema();

    pets.openapi(
        RouteDeclaration::new("/pets")
            .query::<ListQuery>(ObjectSchema::new().optional("limit", Schema::integer()).build())
            .response(200, Schema::array(pet.clone())),
    )
    .unwrap()
    .get("", |_: &mut HandlerRequest| HandlerResponse::json(200, json!([])))
    .unwrap();

    let mut binding = pets
        .openapi(
            RouteDeclaration::new("/pets")
                .body::<Pet>(
                    ContentObject::described("Pet to add")
                        .schema(pet.clone())
                        .required(true),
                )
                .response(201, pet.clone())
                .responds::<Pet>(),
        )
        .unwrap();
    binding
        .post(
            "",
            binding.handler(|req: TypedRequest<(), (), Pet>| Reply::status(201, req.body)),
        )
        .unwrap();

    let doc = registry.generate().unwrap();
    let list = doc.operation("/pets", &Method::GET).unwrap();
    assert_eq!(
        list["parameters"],
        json!([{ "name": "limit", "in": "query", "required": false, "schema": { "type": "integer" } }])
    );

    let create = doc.operation("/pets", &Method::POST).unwrap();
    assert_eq!(create["requestBody"]["description"], "Pet to add");
    assert_eq!(create["requestBody"]["required"], true);
    assert_eq!(
        create["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/Pet"
    );
    assert_eq!(create["responses"]["201"]["description"], "Created");

    let resp = pets.router().dispatch(
        HandlerRequest::new(Method::POST, "/pets")
            .with_body(json!({ "id": "7", "name": "Tom" })),
    );
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body["name"], "Tom");

    let rejected = pets.router().dispatch(
        HandlerRequest::new(Method::POST, "/pets").with_body(json!({ "id": "7" })),
    );
    assert_eq!(rejected.status, 400);
    assert_eq!(rejected.body["message"], "Invalid request data");
}

#[test]
fn test_middleware_chain_runs_before_typed_handler() {
    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    let mut binding = pets
        .openapi(
            RouteDeclaration::new("/pets/{petId}")
                .params::<PetParams>(pet_params())
                .response(200, pet_schema())
                .response(401, Shape::none())
                .responds::<Pet>(),
        )
        .unwrap();

    let auth = |req: &mut HandlerRequest| match req.get_header("authorization") {
        Some(_) => Outcome::Next,
        None => Outcome::Respond(HandlerResponse::error(401, "Unauthorized")),
    };
    let chain = HandlerChain::new().with(auth).with(binding.handler(
        |req: TypedRequest<PetParams, (), ()>| {
            Reply::ok(Pet {
                id: req.params.pet_id,
                name: "Guarded".into(),
            })
        },
    ));
    binding.get("/{petId}", chain).unwrap();

    let denied = pets
        .router()
        .dispatch(HandlerRequest::new(Method::GET, "/pets/1"));
    assert_eq!(denied.status, 401);

    let allowed = pets.router().dispatch(
        HandlerRequest::new(Method::GET, "/pets/1").with_header("Authorization", "Bearer t"),
    );
    assert_eq!(allowed.status, 200);
    assert_eq!(allowed.body["name"], "Guarded");
}

#[test]
fn test_routers_share_one_document() {
    let registry = registry();
    let mut pets = OpenApiRouter::nested("/pets", Arc::clone(&registry));
    let mut users = OpenApiRouter::nested("/users", Arc::clone(&registry));

    pets.openapi(RouteDeclaration::new("/pets").response(200, Schema::array(pet_schema())))
        .unwrap()
        .get("", |_: &mut HandlerRequest| HandlerResponse::json(200, json!([])))
        .unwrap();
    users
        .openapi(RouteDeclaration::new("/users/{userId}").response(404, Shape::none()))
        .unwrap()
        .get("/{userId}", |_: &mut HandlerRequest| HandlerResponse::empty(404))
        .unwrap();

    let mut app = Router::new();
    app.mount(pets.into_router()).unwrap();
    app.mount(users.into_router()).unwrap();

    let doc = registry.generate().unwrap();
    assert_eq!(doc.operation_count(), 2);
    assert_eq!(
        app.dispatch(HandlerRequest::new(Method::GET, "/users/3")).status,
        404
    );
    assert_eq!(
        app.dispatch(HandlerRequest::new(Method::GET, "/pets")).status,
        200
    );
}
