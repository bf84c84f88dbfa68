//! Developer shorthand for request bodies and responses.
//!
//! Route declarations accept a [`Shape`]: a bare schema, a tuple of schemas standing for a
//! union, a (partially) canonical content object, or an explicit "no body" marker. The
//! variant tag is the discriminator, so classification never has to guess from structure.

use super::types::ContentMap;
use crate::error::{RegistrarError, Result};
use crate::schema::Schema;

/// The `schema` field of a [`ContentObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShorthand {
    Bare(Schema),
    Tuple(Vec<Schema>),
}

impl SchemaShorthand {
    /// The schema written into a content map: the schema itself, or the `anyOf` of the tuple.
    #[must_use]
    pub fn to_schema(&self) -> Schema {
        match self {
            SchemaShorthand::Bare(schema) => schema.clone(),
            SchemaShorthand::Tuple(members) => Schema::any_of(members.iter().cloned()),
        }
    }
}

impl From<Schema> for SchemaShorthand {
    fn from(schema: Schema) -> Self {
        SchemaShorthand::Bare(schema)
    }
}

impl From<Vec<Schema>> for SchemaShorthand {
    fn from(members: Vec<Schema>) -> Self {
        SchemaShorthand::Tuple(members)
    }
}

impl<const N: usize> From<[Schema; N]> for SchemaShorthand {
    fn from(members: [Schema; N]) -> Self {
        SchemaShorthand::Tuple(members.into())
    }
}

/// Response or request-body object in (partially) canonical form.
///
/// `content` and `schema` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentObject {
    pub description: Option<String>,
    pub content: Option<ContentMap>,
    pub schema: Option<SchemaShorthand>,
    /// Only meaningful for request bodies.
    pub required: Option<bool>,
}

impl ContentObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content(content: ContentMap) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: ContentMap) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<SchemaShorthand>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Body shorthand accepted by route declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Single schema for every default media type.
    Bare(Schema),
    /// Union of two or more schemas.
    Tuple(Vec<Schema>),
    Content(ContentObject),
    /// Explicitly no body.
    NoBody,
}

impl Shape {
    #[must_use]
    pub fn tuple(members: impl IntoIterator<Item = Schema>) -> Self {
        Shape::Tuple(members.into_iter().collect())
    }

    #[must_use]
    pub fn none() -> Self {
        Shape::NoBody
    }

    /// Description carried by a content object, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Shape::Content(obj) => obj.description.as_deref(),
            _ => None,
        }
    }
}

impl From<Schema> for Shape {
    fn from(schema: Schema) -> Self {
        Shape::Bare(schema)
    }
}

impl From<Vec<Schema>> for Shape {
    fn from(members: Vec<Schema>) -> Self {
        Shape::Tuple(members)
    }
}

impl<const N: usize> From<[Schema; N]> for Shape {
    fn from(members: [Schema; N]) -> Self {
        Shape::Tuple(members.into())
    }
}

impl From<ContentObject> for Shape {
    fn from(obj: ContentObject) -> Self {
        Shape::Content(obj)
    }
}

impl From<Option<Schema>> for Shape {
    fn from(schema: Option<Schema>) -> Self {
        schema.map_or(Shape::NoBody, Shape::Bare)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Bare,
    Tuple,
    ContentObject,
    Null,
}

/// Classify a shorthand value, rejecting malformed ones.
///
/// Content objects are checked first, then tuples, then bare schemas.
///
/// # Errors
///
/// - [`RegistrarError::ConflictingContentAndSchema`] for a content object with both fields
/// - [`RegistrarError::TupleTooShort`] for a tuple (top-level or in a content object's
///   `schema`) with fewer than two members
pub fn classify(shape: &Shape) -> Result<ShapeKind> {
    match shape {
        Shape::Content(obj) => {
            if obj.content.is_some() && obj.schema.is_some() {
                return Err(RegistrarError::ConflictingContentAndSchema);
            }
            if let Some(SchemaShorthand::Tuple(members)) = &obj.schema {
                check_tuple(members)?;
            }
            Ok(ShapeKind::ContentObject)
        }
        Shape::Tuple(members) => {
            check_tuple(members)?;
            Ok(ShapeKind::Tuple)
        }
        Shape::Bare(_) => Ok(ShapeKind::Bare),
        Shape::NoBody => Ok(ShapeKind::Null),
    }
}

fn check_tuple(members: &[Schema]) -> Result<()> {
    if members.len() < 2 {
        return Err(RegistrarError::TupleTooShort { len: members.len() });
    }
    Ok(())
}
