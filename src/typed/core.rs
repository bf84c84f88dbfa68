use crate::dispatcher::{Handler, HandlerRequest, HandlerResponse, HeaderVec, Outcome};
use crate::ids::RequestId;
use crate::router::ParamVec;
use crate::schema::{Schema, SchemaKind};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Number, Value};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, error};

/// Request handed to a typed handler.
///
/// `params`, `query` and `body` are the types the route declaration named; undeclared parts
/// are `()`.
#[derive(Debug, Clone)]
pub struct TypedRequest<P, Q, B> {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
    pub params: P,
    pub query: Q,
    pub body: B,
    pub headers: HeaderVec,
    pub locals: Map<String, Value>,
}

impl<P, Q, B> TypedRequest<P, Q, B> {
    /// Header by name (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ReplyBody<R> {
    Typed(R),
    Raw(Value),
    Empty,
}

/// Typed handler result: a status plus a body of the declared response type.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<R> {
    status: u16,
    body: ReplyBody<R>,
}

impl<R> Reply<R> {
    /// `200` with `body`.
    #[must_use]
    pub fn ok(body: R) -> Self {
        Self::status(200, body)
    }

    #[must_use]
    pub fn status(status: u16, body: R) -> Self {
        Self {
            status,
            body: ReplyBody::Typed(body),
        }
    }

    /// Status only, no body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: ReplyBody::Empty,
        }
    }

    /// Untyped JSON body, for responses outside the declared response type.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ReplyBody::Raw(body),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Typed body, if this reply carries one.
    #[must_use]
    pub fn body(&self) -> Option<&R> {
        match &self.body {
            ReplyBody::Typed(body) => Some(body),
            _ => None,
        }
    }
}

/// Schemas a typed handler uses to coerce path and query strings.
#[derive(Debug, Clone, Default)]
pub struct RouteContract {
    pub params: Option<Schema>,
    pub query: Option<Schema>,
    pub has_body: bool,
}

/// Adapter from `Fn(TypedRequest<P, Q, B>) -> Reply<R>` to a chain [`Handler`].
///
/// Path and query strings are coerced to the kinds their declared property schemas name
/// (`integer`, `number`, `boolean`, comma-separated `array`) before deserializing. A request
/// that does not deserialize into the declared types is answered with `400` and never
/// reaches the handler.
pub struct TypedHandler<P, Q, B, R, F> {
    contract: RouteContract,
    f: F,
    _types: PhantomData<fn(P, Q, B) -> R>,
}

impl<P, Q, B, R, F> TypedHandler<P, Q, B, R, F> {
    #[must_use]
    pub fn new(contract: RouteContract, f: F) -> Self {
        Self {
            contract,
            f,
            _types: PhantomData,
        }
    }

    #[must_use]
    pub fn contract(&self) -> &RouteContract {
        &self.contract
    }
}

impl<P, Q, B, R, F> fmt::Debug for TypedHandler<P, Q, B, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandler")
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

impl<P, Q, B, R, F> TypedHandler<P, Q, B, R, F>
where
    P: DeserializeOwned,
    Q: DeserializeOwned,
    B: DeserializeOwned,
{
    /// Deserialize the declared parts of `req`, collecting one error per failing part.
    pub fn extract(&self, req: &HandlerRequest) -> Result<TypedRequest<P, Q, B>, Vec<Value>> {
        let mut errors = Vec::new();

        let params_value = self
            .contract
            .params
            .as_ref()
            .map_or(Value::Null, |schema| params_object(&req.path_params, schema));
        let query_value = self
            .contract
            .query
            .as_ref()
            .map_or(Value::Null, |schema| params_object(&req.query_params, schema));
        let body_value = if self.contract.has_body {
            req.body.clone().unwrap_or(Value::Null)
        } else {
            Value::Null
        };

        let params = decode::<P>("params", params_value, &mut errors);
        let query = decode::<Q>("query", query_value, &mut errors);
        let body = decode::<B>("body", body_value, &mut errors);

        match (params, query, body) {
            (Some(params), Some(query), Some(body)) => Ok(TypedRequest {
                request_id: req.request_id,
                method: req.method.clone(),
                path: req.path.clone(),
                params,
                query,
                body,
                headers: req.headers.clone(),
                locals: req.locals.clone(),
            }),
            _ => Err(errors),
        }
    }
}

impl<P, Q, B, R, F> Handler for TypedHandler<P, Q, B, R, F>
where
    P: DeserializeOwned + 'static,
    Q: DeserializeOwned + 'static,
    B: DeserializeOwned + 'static,
    R: Serialize + 'static,
    F: Fn(TypedRequest<P, Q, B>) -> Reply<R> + Send + Sync + 'static,
{
    fn call(&self, req: &mut HandlerRequest) -> Outcome {
        let typed = match self.extract(req) {
            Ok(typed) => typed,
            Err(errors) => {
                debug!(
                    request_id = %req.request_id,
                    path = %req.path,
                    errors = ?errors,
                    "Typed request rejected"
                );
                return Outcome::Respond(HandlerResponse::json(
                    400,
                    json!({ "message": "Invalid request data", "errors": errors }),
                ));
            }
        };

        let request_id = req.request_id;
        let reply = (self.f)(typed);
        let response = match reply.body {
            ReplyBody::Empty => HandlerResponse::empty(reply.status),
            ReplyBody::Raw(body) => HandlerResponse::json(reply.status, body),
            ReplyBody::Typed(body) => match serde_json::to_value(body) {
                Ok(body) => HandlerResponse::json(reply.status, body),
                Err(err) => {
                    error!(
                        request_id = %request_id,
                        error = %err,
                        "Failed to serialize typed response"
                    );
                    HandlerResponse::error(500, "Failed to serialize response")
                }
            },
        };
        Outcome::Respond(response)
    }
}

fn decode<T: DeserializeOwned>(location: &str, value: Value, errors: &mut Vec<Value>) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(err) => {
            errors.push(json!({ "location": location, "message": err.to_string() }));
            None
        }
    }
}

/// String parameters as a JSON object, coerced by the declared property schemas.
///
/// Repeated keys accumulate when the property is an array; otherwise the last one wins.
pub(crate) fn params_object(params: &ParamVec, schema: &Schema) -> Value {
    let mut out = Map::new();
    for (name, raw) in params {
        let property = schema.property(name).map(|p| &p.schema);
        match (out.get_mut(name.as_ref()), coerce(raw, property)) {
            (Some(Value::Array(existing)), Value::Array(more)) => existing.extend(more),
            (_, value) => {
                out.insert(name.to_string(), value);
            }
        }
    }
    Value::Object(out)
}

/// Best-effort conversion of a string to the kind `schema` names. Unparseable input stays
/// a string so deserialization reports it.
pub(crate) fn coerce(raw: &str, schema: Option<&Schema>) -> Value {
    let Some(schema) = schema else {
        return Value::String(raw.to_string());
    };
    match schema.kind() {
        SchemaKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        SchemaKind::Number => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(raw.to_string()), Value::Number),
        SchemaKind::Boolean => match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        SchemaKind::Array(items) => Value::Array(
            raw.split(',')
                .filter(|s| !s.is_empty())
                .map(|item| coerce(item, Some(items)))
                .collect(),
        ),
        _ => Value::String(raw.to_string()),
    }
}
