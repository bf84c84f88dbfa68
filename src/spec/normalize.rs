//! Shorthand → canonical content map.

use super::shape::{classify, Shape};
use super::types::{ContentMap, MediaType};
use crate::error::Result;
use crate::schema::Schema;
use tracing::debug;

/// Which side of the exchange a body belongs to. Picks the default media types and shows up
/// in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Request,
    Response,
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyKind::Request => write!(f, "request"),
            BodyKind::Response => write!(f, "response"),
        }
    }
}

/// Normalize a body shorthand into a canonical content map.
///
/// - `NoBody` gives `Ok(None)`: the entry has no content at all.
/// - A bare schema maps every default media type to that same schema.
/// - A tuple maps every default media type to one shared `anyOf` of its members.
/// - A content object's own `content` is taken verbatim; otherwise its `schema` follows the
///   bare/tuple rule; with neither, the result is `existing` (or an empty map).
///
/// Entries already present in `existing` are kept; defaults only fill missing media types.
///
/// # Arguments
///
/// * `kind` - Request or response body
/// * `shape` - Developer shorthand
/// * `default_media_types` - Media types a schema is published under
/// * `existing` - Content map to merge into
///
/// # Errors
///
/// Propagates classification failures (see [`classify`]).
pub fn normalize(
    kind: BodyKind,
    shape: &Shape,
    default_media_types: &[String],
    existing: Option<&ContentMap>,
) -> Result<Option<ContentMap>> {
    let shape_kind = classify(shape)?;
    debug!(
        body = %kind,
        shape = ?shape_kind,
        media_types = ?default_media_types,
        "Normalizing body shorthand"
    );

    let content = match shape {
        Shape::NoBody => return Ok(None),
        Shape::Bare(schema) => fill_defaults(existing.cloned(), default_media_types, schema),
        Shape::Tuple(members) => fill_defaults(
            existing.cloned(),
            default_media_types,
            &Schema::any_of(members.iter().cloned()),
        ),
        Shape::Content(obj) => {
            let mut base = existing.cloned().unwrap_or_default();
            if let Some(content) = &obj.content {
                base.extend(content.iter().map(|(mt, media)| (mt.clone(), media.clone())));
                base
            } else if let Some(schema) = &obj.schema {
                fill_defaults(Some(base), default_media_types, &schema.to_schema())
            } else {
                base
            }
        }
    };
    Ok(Some(content))
}

fn fill_defaults(
    existing: Option<ContentMap>,
    default_media_types: &[String],
    schema: &Schema,
) -> ContentMap {
    let mut content = existing.unwrap_or_default();
    for media_type in default_media_types {
        content
            .entry(media_type.clone())
            .or_insert_with(|| MediaType::new(schema.clone()));
    }
    content
}
