use crate::schema::Schema;
use http::Method;
use serde_json::Value;
use std::collections::BTreeMap;

/// Where an operation parameter lives on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Value of the `in` field of an OpenAPI parameter object.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::Cookie => write!(f, "Cookie"),
        }
    }
}

/// Schema (and optional example) for one media type of a body.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    pub schema: Schema,
    pub example: Option<Value>,
}

impl MediaType {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            example: None,
        }
    }

    #[must_use]
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// Media type → schema.
pub type ContentMap = BTreeMap<String, MediaType>;

/// Canonical response for one status code.
///
/// `content` is `None` when the route declared "no body" for this status, which is not the
/// same as `Some` of an empty map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    pub description: String,
    pub content: Option<ContentMap>,
}

impl ResponseEntry {
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content.as_ref()?.keys().next().map(String::as_str)
    }

    #[must_use]
    pub fn schema_for(&self, media_type: &str) -> Option<&Schema> {
        self.content.as_ref()?.get(media_type).map(|m| &m.schema)
    }
}

pub type Responses = BTreeMap<u16, ResponseEntry>;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyEntry {
    pub description: Option<String>,
    pub required: Option<bool>,
    pub content: ContentMap,
}

/// Canonical request part of an operation. `params`, `query` and `headers` are object
/// schemas passed through from the declaration unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestEntry {
    pub params: Option<Schema>,
    pub query: Option<Schema>,
    pub headers: Option<Schema>,
    pub body: Option<RequestBodyEntry>,
}

impl RequestEntry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_none() && self.query.is_none() && self.headers.is_none() && self.body.is_none()
    }

    /// Parameter schemas in document order.
    pub fn parameter_schemas(&self) -> impl Iterator<Item = (ParameterLocation, &Schema)> {
        [
            (ParameterLocation::Path, self.params.as_ref()),
            (ParameterLocation::Query, self.query.as_ref()),
            (ParameterLocation::Header, self.headers.as_ref()),
        ]
        .into_iter()
        .filter_map(|(loc, schema)| schema.map(|s| (loc, s)))
    }
}

/// Pass-through document metadata of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMetadata {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub operation_id: Option<String>,
    pub deprecated: bool,
}

/// Normalized, document-ready description of one `(path, method)` route.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationEntry {
    pub path: String,
    pub method: Method,
    pub request: Option<RequestEntry>,
    pub responses: Responses,
    pub metadata: OperationMetadata,
}

impl OperationEntry {
    /// Whether this entry describes the same route as `(path, method)`.
    #[must_use]
    pub fn is_route(&self, path: &str, method: &Method) -> bool {
        self.path == path && &self.method == method
    }

    #[must_use]
    pub fn response(&self, status: u16) -> Option<&ResponseEntry> {
        self.responses.get(&status)
    }
}
