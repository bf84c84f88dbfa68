use super::core::{coerce, params_object};
use super::{Reply, RouteContract, TypedHandler, TypedRequest};
use crate::dispatcher::{Handler, HandlerRequest, Outcome};
use crate::schema::{ObjectSchema, Schema};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Params {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct Query {
    verbose: Option<bool>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NewThing {
    name: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct Thing {
    id: u32,
    name: String,
    verbose: bool,
    tags: Vec<String>,
}

fn contract() -> RouteContract {
    RouteContract {
        params: Some(ObjectSchema::new().field("id", Schema::integer()).build()),
        query: Some(
            ObjectSchema::new()
                .optional("verbose", Schema::boolean())
                .optional("tags", Schema::array(Schema::string()))
                .build(),
        ),
        has_body: true,
    }
}

fn handler() -> TypedHandler<Params, Query, NewThing, Thing, impl Fn(TypedRequest<Params, Query, NewThing>) -> Reply<Thing> + Send + Sync + 'static> {
    TypedHandler::new(contract(), |req: TypedRequest<Params, Query, NewThing>| {
        Reply::status(
            201,
            Thing {
                id: req.params.id,
                name: req.body.name,
                verbose: req.query.verbose.unwrap_or(false),
                tags: req.query.tags,
            },
        )
    })
}

fn request(target: &str, id: &str) -> HandlerRequest {
    let mut req = HandlerRequest::new(Method::POST, target).with_body(json!({ "name": "Rex" }));
    req.path_params.push((Arc::from("id"), id.to_string()));
    req
}

#[test]
fn test_typed_handler_coerces_and_serializes() {
    let mut req = request("/things/7?verbose=true&tags=a,b", "7");
    let Outcome::Respond(resp) = handler().call(&mut req) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 201);
    assert_eq!(
        resp.body,
        json!({ "id": 7, "name": "Rex", "verbose": true, "tags": ["a", "b"] })
    );
}

#[test]
fn test_typed_handler_rejects_bad_params() {
    let mut req = request("/things/x", "x");
    let Outcome::Respond(resp) = handler().call(&mut req) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["message"], "Invalid request data");
    assert_eq!(resp.body["errors"][0]["location"], "params");
}

#[test]
fn test_typed_handler_rejects_missing_body() {
    let mut req = request("/things/1", "1");
    req.body = None;
    let Outcome::Respond(resp) = handler().call(&mut req) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["errors"][0]["location"], "body");
}

#[test]
fn test_unit_types_for_undeclared_parts() {
    let h: TypedHandler<(), (), (), String, _> = TypedHandler::new(
        RouteContract::default(),
        |req: TypedRequest<(), (), ()>| Reply::ok(req.path),
    );
    let mut req = HandlerRequest::new(Method::GET, "/hello?ignored=1");
    let Outcome::Respond(resp) = h.call(&mut req) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!("/hello"));
}

#[test]
fn test_reply_variants() {
    let h: TypedHandler<(), (), (), String, _> = TypedHandler::new(
        RouteContract::default(),
        |req: TypedRequest<(), (), ()>| {
            if req.path == "/empty" {
                Reply::empty(204)
            } else {
                Reply::json(404, json!({ "message": "nope" }))
            }
        },
    );

    let mut empty = HandlerRequest::new(Method::GET, "/empty");
    let Outcome::Respond(resp) = h.call(&mut empty) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_null());

    let mut missing = HandlerRequest::new(Method::GET, "/other");
    let Outcome::Respond(resp) = h.call(&mut missing) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body["message"], "nope");

    let reply: Reply<u8> = Reply::ok(3);
    assert_eq!(reply.status_code(), 200);
    assert_eq!(reply.body(), Some(&3));
    assert_eq!(Reply::<u8>::empty(204).body(), None);
}

#[test]
fn test_coerce_kinds() {
    assert_eq!(coerce("5", Some(&Schema::integer())), json!(5));
    assert_eq!(coerce("5.5", Some(&Schema::number())), json!(5.5));
    assert_eq!(coerce("false", Some(&Schema::boolean())), json!(false));
    assert_eq!(coerce("yes", Some(&Schema::boolean())), json!("yes"));
    assert_eq!(coerce("abc", Some(&Schema::integer())), json!("abc"));
    assert_eq!(coerce("1,2", Some(&Schema::array(Schema::integer()))), json!([1, 2]));
    assert_eq!(coerce("7", None), json!("7"));
}

#[test]
fn test_repeated_query_keys_accumulate_for_arrays() {
    let schema = ObjectSchema::new()
        .optional("tags", Schema::array(Schema::string()))
        .optional("verbose", Schema::boolean())
        .build();
    let req = HandlerRequest::new(Method::GET, "/things?tags=a&tags=b,c&verbose=false&verbose=true");
    assert_eq!(
        params_object(&req.query_params, &schema),
        json!({ "tags": ["a", "b", "c"], "verbose": true })
    );

    let mut req = request("/things/7?tags=a&tags=b", "7");
    let Outcome::Respond(resp) = handler().call(&mut req) else {
        panic!("typed handler must respond");
    };
    assert_eq!(resp.body["tags"], json!(["a", "b"]));
}
