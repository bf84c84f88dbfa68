use super::declaration::RouteDeclaration;
use crate::config::RegistrarOptions;
use crate::dispatcher::HandlerChain;
use crate::error::{RegistrarError, Result};
use crate::registry::DocumentRegistry;
use crate::router::{RouteBinder, Router};
use crate::spec::{
    normalize, BodyKind, OperationEntry, OperationMetadata, RequestBodyEntry, RequestEntry,
    ResponseEntry, Responses, Shape,
};
use crate::status;
use crate::typed::{Reply, RouteContract, TypedHandler, TypedRequest};
use crate::validator::{lint_route, log_issues};
use http::Method;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, info};

/// A router that documents every route it binds.
///
/// Owns the underlying router and shares a [`DocumentRegistry`] with any other
/// `OpenApiRouter` contributing to the same document.
pub struct OpenApiRouter<Rt: RouteBinder = Router> {
    registry: Arc<DocumentRegistry>,
    router: Rt,
    options: RegistrarOptions,
}

impl OpenApiRouter<Router> {
    /// Registrar over a fresh [`Router`] with no base path.
    #[must_use]
    pub fn new(registry: Arc<DocumentRegistry>) -> Self {
        Self::with_router(registry, Router::new())
    }

    /// Registrar over a fresh [`Router`] mounted at `base_path`.
    #[must_use]
    pub fn nested(base_path: &str, registry: Arc<DocumentRegistry>) -> Self {
        Self::with_router(registry, Router::with_base_path(base_path))
    }
}

impl<Rt: RouteBinder> OpenApiRouter<Rt> {
    #[must_use]
    pub fn with_router(registry: Arc<DocumentRegistry>, router: Rt) -> Self {
        Self {
            registry,
            router,
            options: RegistrarOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RegistrarOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RegistrarOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<DocumentRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn router(&self) -> &Rt {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Rt {
        &mut self.router
    }

    #[must_use]
    pub fn into_router(self) -> Rt {
        self.router
    }

    /// Normalize `declaration` and return a binding for its verbs.
    ///
    /// Responses are normalized in ascending status order, then the request body. Nothing
    /// is registered until a verb is bound.
    ///
    /// # Errors
    ///
    /// - Shorthand errors from [`classify`](crate::spec::classify), unchanged
    /// - [`RegistrarError::NonObjectParameters`] when `params`, `query` or `headers` is not
    ///   an object schema
    pub fn openapi<P, Q, B, R>(
        &mut self,
        declaration: RouteDeclaration<P, Q, B, R>,
    ) -> Result<RouteBinding<'_, Rt, P, Q, B, R>> {
        let path = declaration.path.clone();
        let route = normalize_declaration(declaration, &self.options).map_err(|err| {
            error!(path = %path, error = %err, "Route declaration rejected");
            err
        })?;

        log_issues(&lint_route(&route.path, route.request.as_ref()));
        debug!(
            path = %route.path,
            responses = ?route.responses.keys().collect::<Vec<_>>(),
            has_body = route.contract.has_body,
            "Route declaration normalized"
        );

        Ok(RouteBinding {
            router: &mut self.router,
            registry: Arc::clone(&self.registry),
            route: Arc::new(route),
            _types: PhantomData,
        })
    }
}

impl<Rt: RouteBinder> RouteBinder for OpenApiRouter<Rt> {
    fn bind(&mut self, method: Method, path: &str, chain: HandlerChain) -> Result<()> {
        self.router.bind(method, path, chain)
    }
}

/// Canonical form of one declaration, shared by every verb bound from it.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedRoute {
    pub(crate) path: String,
    pub(crate) request: Option<RequestEntry>,
    pub(crate) responses: Responses,
    pub(crate) metadata: OperationMetadata,
    pub(crate) contract: RouteContract,
}

impl NormalizedRoute {
    fn entry(&self, method: Method) -> OperationEntry {
        OperationEntry {
            path: self.path.clone(),
            method,
            request: self.request.clone(),
            responses: self.responses.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

pub(crate) fn normalize_declaration<P, Q, B, R>(
    declaration: RouteDeclaration<P, Q, B, R>,
    options: &RegistrarOptions,
) -> Result<NormalizedRoute> {
    let mut responses = Responses::new();
    for (code, shape) in &declaration.responses {
        let content = normalize(
            BodyKind::Response,
            shape,
            &options.response_media_types,
            None,
        )?;
        let description = shape
            .description()
            .map_or_else(|| status::describe(*code).to_string(), str::to_string);
        responses.insert(
            *code,
            ResponseEntry {
                description,
                content,
            },
        );
    }

    for (kind, schema) in [
        ("params", &declaration.params),
        ("query", &declaration.query),
        ("headers", &declaration.headers),
    ] {
        if schema.as_ref().is_some_and(|s| !s.is_object()) {
            return Err(RegistrarError::NonObjectParameters {
                location: declaration.path.clone(),
                kind,
            });
        }
    }

    let body = match &declaration.body {
        Some(shape) => normalize(
            BodyKind::Request,
            shape,
            &options.request_media_types,
            None,
        )?
        .map(|content| RequestBodyEntry {
            description: shape.description().map(str::to_string),
            required: match shape {
                Shape::Content(obj) => obj.required,
                _ => None,
            },
            content,
        }),
        None => None,
    };

    let contract = RouteContract {
        params: declaration.params.clone(),
        query: declaration.query.clone(),
        has_body: body.is_some(),
    };
    let request = RequestEntry {
        params: declaration.params,
        query: declaration.query,
        headers: declaration.headers,
        body,
    };

    Ok(NormalizedRoute {
        path: declaration.path,
        request: (!request.is_empty()).then_some(request),
        responses,
        metadata: declaration.metadata,
        contract,
    })
}

/// Verb binder returned by [`OpenApiRouter::openapi`].
///
/// Each verb call binds the chain on the router and then records the operation for that
/// method. One binding can serve several verbs.
pub struct RouteBinding<'r, Rt: RouteBinder, P, Q, B, R> {
    router: &'r mut Rt,
    registry: Arc<DocumentRegistry>,
    route: Arc<NormalizedRoute>,
    _types: PhantomData<fn() -> (P, Q, B, R)>,
}

macro_rules! verb {
    ($name:ident, $method:expr, $label:literal) => {
        #[doc = concat!("Bind `chain` for `", $label, "` at the router-relative `suffix` and document it.")]
        ///
        /// # Errors
        ///
        /// Propagates router errors. Nothing is registered when binding fails.
        pub fn $name(&mut self, suffix: &str, chain: impl Into<HandlerChain>) -> Result<&mut Self> {
            self.bind_verb($method, suffix, chain.into())?;
            Ok(self)
        }
    };
}

impl<'r, Rt: RouteBinder, P, Q, B, R> RouteBinding<'r, Rt, P, Q, B, R> {
    verb!(get, Method::GET, "GET");
    verb!(post, Method::POST, "POST");
    verb!(put, Method::PUT, "PUT");
    verb!(patch, Method::PATCH, "PATCH");
    verb!(delete, Method::DELETE, "DELETE");

    fn bind_verb(&mut self, method: Method, suffix: &str, chain: HandlerChain) -> Result<()> {
        let handlers = chain.len();
        self.router
            .bind(method.clone(), suffix, chain)
            .map_err(|err| {
                error!(
                    path = %self.route.path,
                    method = %method,
                    suffix = %suffix,
                    error = %err,
                    "Router rejected route"
                );
                err
            })?;
        let replaced = self.registry.register_path(self.route.entry(method.clone()));
        info!(
            path = %self.route.path,
            method = %method,
            suffix = %suffix,
            handlers,
            replaced,
            "Documented route bound"
        );
        Ok(())
    }

    /// Document path of the declaration.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.route.path
    }

    /// The entry a verb call would register for `method`.
    #[must_use]
    pub fn operation(&self, method: Method) -> OperationEntry {
        self.route.entry(method)
    }

    /// Adapt a typed function into a chain element for this route.
    ///
    /// The function's types must match the declaration's.
    pub fn handler<F>(&self, f: F) -> TypedHandler<P, Q, B, R, F>
    where
        F: Fn(TypedRequest<P, Q, B>) -> Reply<R>,
    {
        TypedHandler::new(self.route.contract.clone(), f)
    }
}
