use crate::dispatcher::{HandlerChain, HandlerRequest, HandlerResponse};
use crate::error::{RegistrarError, Result};
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage. Names come from the route table and are shared as `Arc<str>`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// The seam the registrar binds handler chains through.
///
/// `path` is relative to whatever base path the implementation applies.
pub trait RouteBinder {
    /// # Errors
    ///
    /// Returns an error when the implementation rejects `path`.
    fn bind(&mut self, method: Method, path: &str, chain: HandlerChain) -> Result<()>;
}

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub method: Method,
    /// Full route pattern with `{name}` placeholders (e.g. `/pets/{petId}`)
    pub pattern: String,
    /// Path parameters extracted from the URL (e.g., `{id}` → `{"id": "123"}`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name (last occurrence wins)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
struct RouteEntry {
    method: Method,
    pattern: String,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    chain: HandlerChain,
}

impl RouteEntry {
    fn compile(method: Method, path: &str, chain: HandlerChain) -> Result<Self> {
        let (regex, names) = Router::path_to_regex(path)?;
        Ok(Self {
            method,
            pattern: Router::canonical_pattern(path),
            regex,
            param_names: names.into_iter().map(Arc::from).collect(),
            chain,
        })
    }

    fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        Some(
            self.param_names
                .iter()
                .zip(caps.iter().skip(1))
                .filter_map(|(name, m)| m.map(|m| (Arc::clone(name), m.as_str().to_string())))
                .collect(),
        )
    }
}

/// In-memory regex router.
///
/// Routes are matched in registration order; the first route whose method and pattern match
/// runs its chain. A chain that answers with [`Outcome::Next`](crate::dispatcher::Outcome)
/// on every handler hands the request to the next matching route.
#[derive(Clone, Debug, Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
    /// Base path prefix for all routes (e.g., `/pets`)
    base_path: String,
}

macro_rules! verb {
    ($name:ident, $method:expr, $label:literal) => {
        #[doc = concat!("Bind `chain` for `", $label, "` at `path` under the base path.")]
        ///
        /// # Errors
        ///
        /// See [`Router::path_to_regex`].
        pub fn $name(&mut self, path: &str, chain: impl Into<HandlerChain>) -> Result<&mut Self> {
            self.bind($method, path, chain.into())?;
            Ok(self)
        }
    };
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Router whose routes all live under `base_path`.
    ///
    /// A trailing slash is dropped and a leading one added, so `"pets/"` and `"/pets"` are
    /// the same base. `"/"` means no base.
    #[must_use]
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            routes: Vec::new(),
            base_path: normalize_base(base_path),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    verb!(get, Method::GET, "GET");
    verb!(post, Method::POST, "POST");
    verb!(put, Method::PUT, "PUT");
    verb!(patch, Method::PATCH, "PATCH");
    verb!(delete, Method::DELETE, "DELETE");

    /// Move every route of `other` under this router's base path.
    ///
    /// `other`'s own base path is kept, so a router built with base `/pets` mounted on a
    /// router with base `/api` serves `/api/pets/...`.
    ///
    /// # Errors
    ///
    /// Fails if a re-prefixed pattern no longer compiles.
    pub fn mount(&mut self, other: Router) -> Result<&mut Self> {
        let mounted = other.routes.len();
        for route in other.routes {
            let full = join_paths(&self.base_path, &route.pattern);
            self.routes
                .push(RouteEntry::compile(route.method, &full, route.chain)?);
        }
        info!(
            base_path = %self.base_path,
            mounted_base = %other.base_path,
            routes_count = mounted,
            "Mounted router"
        );
        Ok(self)
    }

    /// Match a request to the first registered route.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        self.matches(method, path).next().map(|(route, params)| RouteMatch {
            method: route.method.clone(),
            pattern: route.pattern.clone(),
            path_params: params,
        })
    }

    fn matches<'a>(
        &'a self,
        method: &'a Method,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a RouteEntry, ParamVec)> + 'a {
        self.routes
            .iter()
            .filter(move |route| &route.method == method)
            .filter_map(move |route| route.captures(path).map(|params| (route, params)))
    }

    /// Run the request through every matching route until one responds.
    ///
    /// Answers 404 when no route matches or every matching chain passed.
    pub fn dispatch(&self, mut req: HandlerRequest) -> HandlerResponse {
        let method = req.method.clone();
        let path = req.path.clone();
        for (route, params) in self.matches(&method, &path) {
            req.path_params = params;
            if let Some(response) = route.chain.run(&mut req) {
                info!(
                    request_id = %req.request_id,
                    method = %method,
                    path = %path,
                    route_pattern = %route.pattern,
                    status = response.status,
                    "Request dispatched"
                );
                return response;
            }
            debug!(
                request_id = %req.request_id,
                route_pattern = %route.pattern,
                "Handler chain passed, trying next route"
            );
        }

        warn!(
            request_id = %req.request_id,
            method = %method,
            path = %path,
            "No route matched"
        );
        HandlerResponse::error(404, "Not Found")
    }

    /// `(method, pattern)` of every route in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes.iter().map(|r| (&r.method, r.pattern.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Convert a route pattern to an anchored regex and its parameter names.
    ///
    /// Placeholders may be written `{name}` or `:name`, one per segment. Literal segments
    /// are escaped, and a single trailing slash is tolerated on the request path.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::InvalidPath`] for a path without a leading slash, an empty
    /// or malformed placeholder, or a regex that fails to compile.
    pub fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>)> {
        if !path.starts_with('/') {
            return Err(RegistrarError::invalid_path(path, "must start with '/'"));
        }
        if path == "/" {
            let regex = Regex::new(r"^/$")
                .map_err(|e| RegistrarError::invalid_path(path, e.to_string()))?;
            return Ok((regex, Vec::new()));
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches(['{', ':']).count());

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment) {
                Some(Ok(name)) => {
                    pattern.push_str("/([^/]+)");
                    param_names.push(name.to_string());
                }
                Some(Err(reason)) => return Err(RegistrarError::invalid_path(path, reason)),
                None => {
                    if segment.contains(['{', '}']) {
                        return Err(RegistrarError::invalid_path(
                            path,
                            format!("placeholder must span a whole segment: `{segment}`"),
                        ));
                    }
                    pattern.push('/');
                    pattern.push_str(&regex::escape(segment));
                }
            }
        }

        pattern.push_str("/?$");
        let regex =
            Regex::new(&pattern).map_err(|e| RegistrarError::invalid_path(path, e.to_string()))?;
        Ok((regex, param_names))
    }

    /// Rewrite `:name` placeholders as `{name}`; drop empty segments.
    fn canonical_pattern(path: &str) -> String {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| match placeholder(segment) {
                Some(Ok(name)) => format!("{{{name}}}"),
                _ => segment.to_string(),
            })
            .collect();
        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        }
    }
}

impl RouteBinder for Router {
    fn bind(&mut self, method: Method, path: &str, chain: HandlerChain) -> Result<()> {
        let full = join_paths(&self.base_path, path);
        let entry = RouteEntry::compile(method, &full, chain)?;
        info!(
            method = %entry.method,
            route_pattern = %entry.pattern,
            params = ?entry.param_names,
            handlers = entry.chain.len(),
            "Route bound"
        );
        self.routes.push(entry);
        Ok(())
    }
}

/// `Some(Ok(name))` for a placeholder segment, `Some(Err(..))` for a malformed one.
fn placeholder(segment: &str) -> Option<std::result::Result<&str, String>> {
    let name = if let Some(rest) = segment.strip_prefix(':') {
        rest
    } else if let Some(inner) = segment.strip_prefix('{') {
        match inner.strip_suffix('}') {
            Some(name) => name,
            None => return Some(Err(format!("unterminated placeholder `{segment}`"))),
        }
    } else {
        return None;
    };

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Some(Ok(name))
    } else {
        Some(Err(format!("invalid placeholder name `{segment}`")))
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a base path and a suffix. An empty suffix addresses the base itself.
pub(crate) fn join_paths(base: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('/');
    match (base.is_empty(), suffix.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{suffix}"),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{suffix}"),
    }
}
