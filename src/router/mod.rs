//! # Router Module
//!
//! Path matching and handler-chain dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (`/pets/{petId}` or `/pets/:petId`) into anchored regexes
//! - Matching incoming requests to registered routes in registration order
//! - Extracting path parameters from matched routes
//! - Running the bound [`HandlerChain`](crate::dispatcher::HandlerChain)
//!
//! The registrar only depends on the [`RouteBinder`] trait, so any router that can accept
//! `(method, path, chain)` can sit behind an `OpenApiRouter`.
//!
//! ## Example
//!
//! ```rust
//! use routespec::dispatcher::{HandlerRequest, HandlerResponse};
//! use routespec::router::Router;
//! use serde_json::json;
//!
//! # fn main() -> routespec::error::Result<()> {
//! let mut pets = Router::with_base_path("/pets");
//! pets.get("/{petId}", |req: &mut HandlerRequest| {
//!     HandlerResponse::json(200, json!({ "id": req.get_path_param("petId") }))
//! })?;
//!
//! let mut app = Router::new();
//! app.mount(pets)?;
//!
//! let resp = app.dispatch(HandlerRequest::new(http::Method::GET, "/pets/42"));
//! assert_eq!(resp.body["id"], "42");
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over compiled regexes; O(n) in the number of routes. Route
//! tables built by the registrar are small and fixed at startup.

mod core;
#[cfg(test)]
mod tests;

pub use core::{ParamVec, RouteBinder, RouteMatch, Router, MAX_INLINE_PARAMS};
pub(crate) use core::join_paths;
