//! # routespec
//!
//! **routespec** binds HTTP handler chains on a router and, in the same call, records a
//! normalized OpenAPI 3.0 operation for the route in a shared document registry. The
//! generated document therefore always describes exactly the routes that were bound.
//!
//! ## Overview
//!
//! A route is declared once with [`RouteDeclaration`](registrar::RouteDeclaration): its
//! document path, parameter schemas, request body and responses. Body and response
//! positions accept a compact shorthand ([`Shape`](spec::Shape)):
//!
//! - a bare schema, documented under every configured media type
//! - a tuple of two or more schemas, documented as a single `anyOf`
//! - a content object with an explicit per-media-type `content` map, or a `schema`
//! - no body at all (`Shape::none()`), documented as a description-only response
//!
//! [`OpenApiRouter::openapi`](registrar::OpenApiRouter::openapi) normalizes that shorthand
//! and returns a binding whose verb methods (`get`, `post`, `put`, `patch`, `delete`) bind
//! the chain on the router and write the operation into the registry.
//!
//! ## Architecture
//!
//! - **[`schema`]** - schema descriptors, component references and `jsonschema` validation
//! - **[`spec`]** - the shorthand classifier, the content normalizer and canonical entries
//! - **[`status`]** - standard descriptions for HTTP status codes
//! - **[`registrar`]** - declarations and the documenting router
//! - **[`registry`]** - the shared, memoized OpenAPI document registry
//! - **[`router`]** - path matching and handler-chain dispatch
//! - **[`dispatcher`]** - request, response and handler-chain types
//! - **[`typed`]** - typed handler adapters built from a declaration's Rust types
//! - **[`validator`]** - declaration lint and schema/type contract checks
//! - **[`config`]** - document info and registrar options, loaded from YAML or JSON
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//!
//! ### Registration Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Reg as OpenApiRouter
//!     participant Norm as spec::normalize
//!     participant Router
//!     participant Doc as DocumentRegistry
//!
//!     App->>Reg: openapi(declaration)
//!     Reg->>Norm: responses (ascending status), then body
//!     Norm-->>Reg: NormalizedRoute
//!     Reg-->>App: RouteBinding
//!     App->>Reg: binding.get("/{petId}", chain)
//!     Reg->>Router: bind(GET, "/{petId}", chain)
//!     Reg->>Doc: register_path(entry)
//!     App->>Doc: generate()
//!     Doc-->>App: Arc<OpenApiDocument>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routespec::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> routespec::error::Result<()> {
//! let registry = DocumentRegistry::shared(DocumentInfo::new("Pets", "1.0.0"));
//! let mut pets = OpenApiRouter::nested("/pets", registry.clone());
//!
//! let pet = ObjectSchema::new()
//!     .field("id", Schema::string())
//!     .field("name", Schema::string())
//!     .build()
//!     .named("Pet");
//!
//! pets.openapi(
//!     RouteDeclaration::new("/pets")
//!         .summary("List pets")
//!         .response(200, Schema::array(pet)),
//! )?
//! .get("", |_req: &mut HandlerRequest| HandlerResponse::json(200, json!([])))?;
//!
//! let doc = registry.generate()?;
//! let op = doc.operation("/pets", &http::Method::GET).cloned().unwrap_or_default();
//! assert_eq!(op["responses"]["200"]["description"], "OK");
//! assert_eq!(
//!     op["responses"]["200"]["content"]["application/json"]["schema"]["items"]["$ref"],
//!     "#/components/schemas/Pet"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events only: `info` when a documented route is bound,
//! `warn` when an operation is overwritten or registered after the document was generated,
//! `error` when a declaration is rejected. Binaries install a subscriber with
//! [`logging::init_logging`].

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod registrar;
pub mod registry;
pub mod router;
pub mod schema;
pub mod spec;
pub mod status;
pub mod typed;
pub mod validator;

pub use config::{load_config, DocumentInfo, RegistrarConfig, RegistrarOptions};
pub use error::{RegistrarError, Result};
pub use registrar::{OpenApiRouter, RouteBinding, RouteDeclaration};
pub use registry::{DocumentRegistry, OpenApiDocument};
pub use schema::{ObjectSchema, Schema};
pub use spec::{ContentObject, Shape};

/// Everything needed to declare, bind and document routes.
pub mod prelude {
    pub use crate::config::{DocumentInfo, RegistrarOptions};
    pub use crate::dispatcher::{HandlerChain, HandlerRequest, HandlerResponse, Outcome};
    pub use crate::registrar::{OpenApiRouter, RouteBinding, RouteDeclaration};
    pub use crate::registry::{DocumentRegistry, OpenApiDocument};
    pub use crate::router::{RouteBinder, Router};
    pub use crate::schema::{ObjectSchema, Schema};
    pub use crate::spec::{ContentObject, Shape};
    pub use crate::typed::{Reply, TypedRequest};
}
