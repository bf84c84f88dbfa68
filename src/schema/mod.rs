//! # Schema Module
//!
//! Schema descriptors used by route declarations for params, query strings, headers,
//! request bodies and responses.
//!
//! ## Overview
//!
//! A [`Schema`] is a cheap-to-clone handle over an immutable schema node. Two handles are
//! equal only when they point at the same node: identity is reference identity, so the same
//! descriptor can be reused across many declarations and positions and still be recognised.
//!
//! A schema can:
//!
//! - render an inline JSON Schema fragment ([`Schema::to_json_schema`]), used for validation
//! - render a document fragment ([`Schema::render`]) where named schemas become
//!   `#/components/schemas/<name>` references collected into a [`Components`] map
//! - compile into a `jsonschema` validator ([`Schema::validator`])
//! - carry an example value and a description for the generated document
//!
//! ## Example
//!
//! ```rust
//! use routespec::schema::{ObjectSchema, Schema};
//! use serde_json::json;
//!
//! let pet = ObjectSchema::new()
//!     .field("id", Schema::string().example(json!("abc123")))
//!     .field("name", Schema::string())
//!     .optional("age", Schema::number())
//!     .build()
//!     .named("Pet");
//!
//! assert!(pet.is_valid(&json!({ "id": "1", "name": "Mittens" })));
//! assert!(!pet.is_valid(&json!({ "id": "1" })));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{Components, ObjectSchema, Property, Schema, SchemaKind};
