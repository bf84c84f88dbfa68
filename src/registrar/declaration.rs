use crate::schema::Schema;
use crate::spec::{OperationMetadata, Shape};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// One documented route: path, request schemas, responses, metadata.
///
/// The type parameters are the Rust types of the path parameters, query, body and response
/// body. They start as `()` (and `Value` for the response) and are set by
/// [`params`](Self::params), [`query`](Self::query), [`body`](Self::body) and
/// [`responds`](Self::responds).
///
/// ```rust
/// use routespec::registrar::RouteDeclaration;
/// use routespec::schema::{ObjectSchema, Schema};
/// use routespec::spec::Shape;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct PetParams {
///     #[serde(rename = "petId")]
///     pet_id: String,
/// }
///
/// let pet = ObjectSchema::new().field("id", Schema::string()).build().named("Pet");
/// let decl = RouteDeclaration::new("/pets/{petId}")
///     .summary("Get a pet")
///     .params::<PetParams>(ObjectSchema::new().field("petId", Schema::string()).build())
///     .response(200, pet)
///     .response(404, Shape::none())
///     .responds::<serde_json::Value>();
/// assert_eq!(decl.responses().len(), 2);
/// ```
pub struct RouteDeclaration<P = (), Q = (), B = (), R = Value> {
    pub(crate) path: String,
    pub(crate) params: Option<Schema>,
    pub(crate) query: Option<Schema>,
    pub(crate) headers: Option<Schema>,
    pub(crate) body: Option<Shape>,
    pub(crate) responses: BTreeMap<u16, Shape>,
    pub(crate) metadata: OperationMetadata,
    _types: PhantomData<fn() -> (P, Q, B, R)>,
}

impl RouteDeclaration {
    /// Declaration for the document path `path` (`{name}` placeholders).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: None,
            query: None,
            headers: None,
            body: None,
            responses: BTreeMap::new(),
            metadata: OperationMetadata::default(),
            _types: PhantomData,
        }
    }
}

impl<P, Q, B, R> RouteDeclaration<P, Q, B, R> {
    fn retype<P2, Q2, B2, R2>(self) -> RouteDeclaration<P2, Q2, B2, R2> {
        RouteDeclaration {
            path: self.path,
            params: self.params,
            query: self.query,
            headers: self.headers,
            body: self.body,
            responses: self.responses,
            metadata: self.metadata,
            _types: PhantomData,
        }
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.metadata.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.operation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.metadata.deprecated = deprecated;
        self
    }

    /// Path parameter schema (an object schema) and the type handlers receive it as.
    #[must_use]
    pub fn params<T>(mut self, schema: Schema) -> RouteDeclaration<T, Q, B, R> {
        self.params = Some(schema);
        self.retype()
    }

    /// Query schema (an object schema) and the type handlers receive it as.
    #[must_use]
    pub fn query<T>(mut self, schema: Schema) -> RouteDeclaration<P, T, B, R> {
        self.query = Some(schema);
        self.retype()
    }

    /// Header schema (an object schema). Documented only; handlers read raw headers.
    #[must_use]
    pub fn headers(mut self, schema: Schema) -> Self {
        self.headers = Some(schema);
        self
    }

    /// Request body shorthand and the type handlers receive it as.
    #[must_use]
    pub fn body<T>(mut self, shape: impl Into<Shape>) -> RouteDeclaration<P, Q, T, R> {
        self.body = Some(shape.into());
        self.retype()
    }

    /// Response shorthand for `status`. A repeated status replaces the earlier shape.
    #[must_use]
    pub fn response(mut self, status: u16, shape: impl Into<Shape>) -> Self {
        self.responses.insert(status, shape.into());
        self
    }

    /// Type typed handlers reply with. For unions, an untagged enum over the members.
    #[must_use]
    pub fn responds<T>(self) -> RouteDeclaration<P, Q, B, T> {
        self.retype()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn responses(&self) -> &BTreeMap<u16, Shape> {
        &self.responses
    }

    #[must_use]
    pub fn metadata(&self) -> &OperationMetadata {
        &self.metadata
    }
}

impl<P, Q, B, R> Clone for RouteDeclaration<P, Q, B, R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            params: self.params.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            responses: self.responses.clone(),
            metadata: self.metadata.clone(),
            _types: PhantomData,
        }
    }
}

impl<P, Q, B, R> std::fmt::Debug for RouteDeclaration<P, Q, B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDeclaration")
            .field("path", &self.path)
            .field("params", &self.params.is_some())
            .field("query", &self.query.is_some())
            .field("headers", &self.headers.is_some())
            .field("body", &self.body)
            .field("responses", &self.responses.keys().collect::<Vec<_>>())
            .field("metadata", &self.metadata)
            .finish()
    }
}
