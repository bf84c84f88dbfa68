//! # Registry Module
//!
//! The document registry collects canonical operations and named component schemas and
//! renders them into an OpenAPI 3 document.
//!
//! ## Overview
//!
//! - Operations are stored in declaration order, one per `(path, method)`
//! - Re-registering a route replaces the earlier entry in place (logged at `warn`)
//! - Named schemas render once under `components.schemas` and are referenced with `$ref`
//! - [`DocumentRegistry::generate`] is memoized, so a `/schema` handler can call it on
//!   every request
//!
//! ## Document Shape
//!
//! ```text
//! {
//!   openapi, info: { title, version, description? },
//!   paths: { "/pets/{petId}": { get: { parameters, requestBody, responses, ... } } },
//!   components?: { schemas: { Pet: {...} } }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use routespec::config::DocumentInfo;
//! use routespec::registry::DocumentRegistry;
//! use routespec::schema::{ObjectSchema, Schema};
//!
//! # fn main() -> routespec::error::Result<()> {
//! let registry = DocumentRegistry::shared(DocumentInfo::new("Pets", "1.0.0"));
//! let pet = ObjectSchema::new().field("id", Schema::string()).build().named("Pet");
//! registry.register_component(pet)?;
//!
//! let doc = registry.generate()?;
//! assert_eq!(doc.as_value()["components"]["schemas"]["Pet"]["type"], "object");
//! # Ok(())
//! # }
//! ```

mod core;
mod render;

pub use core::{DocumentRegistry, OpenApiDocument};
