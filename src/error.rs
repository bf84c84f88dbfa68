//! Error types shared by the registrar, the normalizer, the registry and the router.
//!
//! Declaration mistakes surface here at startup, when `OpenApiRouter::openapi` or a verb
//! binding is called, never while serving traffic.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistrarError>;

#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Union shorthand needs at least two member schemas.
    #[error("tuple shorthand needs at least 2 schemas, got {len}")]
    TupleTooShort { len: usize },

    #[error("content object sets both `content` and `schema`; use one or the other")]
    ConflictingContentAndSchema,

    #[error("{location}: {kind} schema must be an object schema")]
    NonObjectParameters {
        location: String,
        kind: &'static str,
    },

    #[error("component schemas must be named (call `Schema::named` first)")]
    UnnamedComponent,

    /// Two different schemas were given the same component name.
    #[error("component name `{name}` is used by two different schemas")]
    ComponentNameConflict { name: String },

    #[error("invalid route path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("schema could not be compiled: {message}")]
    SchemaCompile { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RegistrarError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// `true` for errors caused by a malformed route declaration.
    #[must_use]
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::TupleTooShort { .. }
                | Self::ConflictingContentAndSchema
                | Self::NonObjectParameters { .. }
                | Self::UnnamedComponent
                | Self::ComponentNameConflict { .. }
        )
    }
}
