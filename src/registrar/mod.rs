//! # Registrar Module
//!
//! Binds handler chains on a router and documents the route in one step.
//!
//! ## Overview
//!
//! [`OpenApiRouter::openapi`] takes a [`RouteDeclaration`], normalizes its response and
//! body shorthand once, and returns a [`RouteBinding`]. Each verb call on the binding
//! (`get`, `post`, `put`, `patch`, `delete`) does two things:
//!
//! 1. binds the handler chain on the router at the given suffix
//! 2. writes the canonical operation for that method into the shared registry
//!
//! Malformed declarations (short tuples, a content object with both `content` and
//! `schema`, non-object parameter schemas) fail at `openapi(..)`, before anything is bound.
//!
//! ## Example
//!
//! ```rust
//! use routespec::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct PetParams {
//!     #[serde(rename = "petId")]
//!     pet_id: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Pet {
//!     id: String,
//! }
//!
//! # fn main() -> routespec::error::Result<()> {
//! let registry = DocumentRegistry::shared(DocumentInfo::default());
//! let mut api = OpenApiRouter::nested("/pets", registry.clone());
//!
//! let pet = ObjectSchema::new().field("id", Schema::string()).build().named("Pet");
//! let mut binding = api.openapi(
//!     RouteDeclaration::new("/pets/{petId}")
//!         .params::<PetParams>(ObjectSchema::new().field("petId", Schema::string()).build())
//!         .response(200, pet)
//!         .responds::<Pet>(),
//! )?;
//! binding.get(
//!     "/{petId}",
//!     binding.handler(|req: TypedRequest<PetParams, (), ()>| Reply::ok(Pet { id: req.params.pet_id })),
//! )?;
//!
//! let doc = registry.generate()?;
//! assert!(doc.operation("/pets/{petId}", &http::Method::GET).is_some());
//!
//! let resp = api.router().dispatch(HandlerRequest::new(http::Method::GET, "/pets/7"));
//! assert_eq!(resp.body["id"], "7");
//! # Ok(())
//! # }
//! ```

mod core;
mod declaration;

pub use core::{OpenApiRouter, RouteBinding};
pub use declaration::RouteDeclaration;
