//! # Typed Module
//!
//! Type-checked handlers for declared routes.
//!
//! ## Overview
//!
//! A route declaration names the Rust types of its path parameters, query, body and
//! response. A typed handler is a plain function over those types:
//!
//! ```rust
//! use routespec::typed::{Reply, TypedRequest};
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
//! fn get_pet(req: TypedRequest<PetParams, (), ()>) -> Reply<Pet> {
//!     Reply::ok(Pet { id: req.params.pet_id })
//! }
//! ```
//!
//! `RouteBinding::handler` wraps such a function in a [`TypedHandler`]. Because the
//! binding carries the declared types, a function whose signature disagrees with the
//! declaration is a compile error, not a runtime surprise.
//!
//! ## Runtime Behavior
//!
//! - Path and query strings are coerced to integers, numbers, booleans or arrays when the
//!   declared property schema says so
//! - A request that does not deserialize is answered with
//!   `400 {"message": "Invalid request data", "errors": [...]}`
//! - Responses are serialized with `serde_json`; [`Reply::json`] bypasses the declared type
//!
//! Schema validation of payloads stays outside this module.

mod core;
#[cfg(test)]
mod tests;

pub use core::{Reply, RouteContract, TypedHandler, TypedRequest};
