use super::{join_paths, Router};
use crate::dispatcher::{HandlerRequest, HandlerResponse, Outcome};
use crate::error::RegistrarError;
use http::Method;
use serde_json::json;

#[test]
fn test_root_path() {
    let (re, params) = Router::path_to_regex("/").unwrap();
    assert!(re.is_match("/"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = Router::path_to_regex("/items/{id}").unwrap();
    assert!(re.is_match("/items/123"));
    assert!(re.is_match("/items/123/"));
    assert!(!re.is_match("/items/123/extra"));
    assert_eq!(params, vec!["id"]);
}

#[test]
fn test_colon_placeholder() {
    let (re, params) = Router::path_to_regex("/a/:b/c").unwrap();
    assert!(re.is_match("/a/1/c"));
    assert_eq!(params, vec!["b"]);
}

#[test]
fn test_literal_segments_are_escaped() {
    let (re, _) = Router::path_to_regex("/v1.0/items").unwrap();
    assert!(re.is_match("/v1.0/items"));
    assert!(!re.is_match("/v1x0/items"));
}

#[test]
fn test_invalid_paths_rejected() {
    for path in ["items", "/items/{id", "/items/{}", "/items/x{id}", "/items/:"] {
        let err = Router::path_to_regex(path).unwrap_err();
        assert!(
            matches!(err, RegistrarError::InvalidPath { .. }),
            "{path} should be rejected"
        );
    }
}

#[test]
fn test_join_paths() {
    assert_eq!(join_paths("", ""), "/");
    assert_eq!(join_paths("", "/x"), "/x");
    assert_eq!(join_paths("/pets", ""), "/pets");
    assert_eq!(join_paths("/pets", "/{petId}"), "/pets/{petId}");
    assert_eq!(join_paths("/pets", "{petId}"), "/pets/{petId}");
}

#[test]
fn test_base_path_normalized() {
    assert_eq!(Router::with_base_path("pets/").base_path(), "/pets");
    assert_eq!(Router::with_base_path("/").base_path(), "");
}

#[test]
fn test_route_returns_canonical_pattern() {
    let mut router = Router::with_base_path("/pets");
    router
        .delete("/:petId", |_: &mut HandlerRequest| HandlerResponse::empty(200))
        .unwrap();
    let m = router.route(&Method::DELETE, "/pets/7").unwrap();
    assert_eq!(m.pattern, "/pets/{petId}");
    assert_eq!(m.get_path_param("petId"), Some("7"));
    assert!(router.route(&Method::GET, "/pets/7").is_none());
}

#[test]
fn test_next_falls_through_to_next_route() {
    let mut router = Router::new();
    router
        .get("/items/{id}", |req: &mut HandlerRequest| {
            if req.get_path_param("id") == Some("special") {
                Outcome::Respond(HandlerResponse::json(200, json!("special")))
            } else {
                Outcome::Next
            }
        })
        .unwrap()
        .get("/items/:name", |req: &mut HandlerRequest| {
            HandlerResponse::json(200, json!(req.get_path_param("name")))
        })
        .unwrap();

    let special = router.dispatch(HandlerRequest::new(Method::GET, "/items/special"));
    assert_eq!(special.body, json!("special"));
    let generic = router.dispatch(HandlerRequest::new(Method::GET, "/items/other"));
    assert_eq!(generic.body, json!("other"));
}

#[test]
fn test_unmatched_is_404() {
    let router = Router::new();
    let resp = router.dispatch(HandlerRequest::new(Method::GET, "/nowhere"));
    assert_eq!(resp.status, 404);
}
