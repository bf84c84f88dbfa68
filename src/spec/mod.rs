//! # Spec Module
//!
//! Canonical operation types and the shorthand normalizer that produces them.
//!
//! - [`Shape`] and [`classify`] - the developer-facing body shorthand and its classifier
//! - [`normalize`] - turns a shorthand into a per-media-type [`ContentMap`]
//! - [`OperationEntry`] and friends - what the registry stores for one `(path, method)`

mod normalize;
mod shape;
mod types;

pub use normalize::{normalize, BodyKind};
pub use shape::{classify, ContentObject, SchemaShorthand, Shape, ShapeKind};
pub use types::{
    ContentMap, MediaType, OperationEntry, OperationMetadata, ParameterLocation,
    RequestBodyEntry, RequestEntry, ResponseEntry, Responses,
};
