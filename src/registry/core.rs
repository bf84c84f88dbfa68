use super::render::render_document;
use crate::config::DocumentInfo;
use crate::error::{RegistrarError, Result};
use crate::schema::Schema;
use crate::spec::OperationEntry;
use http::Method;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Generated OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OpenApiDocument(Value);

impl OpenApiDocument {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Rendered operation object at `paths[path][method]`.
    #[must_use]
    pub fn operation(&self, path: &str, method: &Method) -> Option<&Value> {
        self.0
            .get("paths")?
            .get(path)?
            .get(method.as_str().to_ascii_lowercase())
    }

    /// Number of `(path, method)` operations in the document.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.0
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| {
                paths
                    .values()
                    .filter_map(Value::as_object)
                    .map(|methods| methods.len())
                    .sum()
            })
            .unwrap_or(0)
    }

    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// # Errors
    ///
    /// Propagates `serde_yaml` serialization errors.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    operations: Vec<OperationEntry>,
    components: Vec<Schema>,
}

/// Shared table of operations and named components.
///
/// One registry is shared via `Arc` between every `OpenApiRouter` that contributes to a
/// document and any handler that serves it. Operations keep declaration order; registering
/// the same `(path, method)` again replaces the earlier entry in place.
///
/// [`generate`](Self::generate) renders once and caches the result. Later registrations
/// still land in the table (and in [`render`](Self::render)) but not in the cached document.
#[derive(Debug)]
pub struct DocumentRegistry {
    info: DocumentInfo,
    state: RwLock<RegistryState>,
    document: OnceCell<Arc<OpenApiDocument>>,
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new(DocumentInfo::default())
    }
}

impl DocumentRegistry {
    #[must_use]
    pub fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            state: RwLock::new(RegistryState::default()),
            document: OnceCell::new(),
        }
    }

    /// Convenience for `Arc::new(DocumentRegistry::new(info))`.
    #[must_use]
    pub fn shared(info: DocumentInfo) -> Arc<Self> {
        Arc::new(Self::new(info))
    }

    #[must_use]
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Register a named schema under `components.schemas`.
    ///
    /// A component with the same name replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::UnnamedComponent`] when `schema` has no name.
    pub fn register_component(&self, schema: Schema) -> Result<()> {
        let name = schema
            .name()
            .ok_or(RegistrarError::UnnamedComponent)?
            .to_string();
        self.warn_if_generated("component", &name);

        let mut state = self.state.write();
        match state.components.iter_mut().find(|s| s.name() == Some(name.as_str())) {
            Some(existing) => *existing = schema,
            None => state.components.push(schema),
        }
        info!(component = %name, "Component registered");
        Ok(())
    }

    /// Record an operation. Returns `true` when it replaced an existing `(path, method)`.
    pub fn register_path(&self, entry: OperationEntry) -> bool {
        let route = format!("{} {}", entry.method, entry.path);
        self.warn_if_generated("operation", &route);

        let mut state = self.state.write();
        let existing = state
            .operations
            .iter_mut()
            .find(|op| op.is_route(&entry.path, &entry.method));
        let replaced = match existing {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => {
                state.operations.push(entry);
                false
            }
        };
        if replaced {
            warn!(
                route = %route,
                "Operation registered twice, keeping the latest declaration"
            );
        } else {
            info!(
                route = %route,
                operations_count = state.operations.len(),
                "Operation registered"
            );
        }
        replaced
    }

    fn warn_if_generated(&self, what: &'static str, name: &str) {
        if self.document.get().is_some() {
            warn!(
                kind = what,
                name = %name,
                "Registration after document generation is not reflected in the cached document"
            );
        }
    }

    /// Snapshot of every operation in declaration order.
    #[must_use]
    pub fn operations(&self) -> Vec<OperationEntry> {
        self.state.read().operations.clone()
    }

    #[must_use]
    pub fn operation(&self, path: &str, method: &Method) -> Option<OperationEntry> {
        self.state
            .read()
            .operations
            .iter()
            .find(|op| op.is_route(path, method))
            .cloned()
    }

    #[must_use]
    pub fn components(&self) -> Vec<Schema> {
        self.state.read().components.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().operations.is_empty()
    }

    /// Whether [`generate`](Self::generate) has already cached a document.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.document.get().is_some()
    }

    /// Render the document once and return the cached copy from then on.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::ComponentNameConflict`] when two different schemas share a
    /// component name. A failed generation is not cached.
    pub fn generate(&self) -> Result<Arc<OpenApiDocument>> {
        self.document
            .get_or_try_init(|| {
                let document = self.render()?;
                info!(
                    title = %self.info.title,
                    version = %self.info.version,
                    operations_count = document.operation_count(),
                    "OpenAPI document generated"
                );
                Ok::<_, RegistrarError>(Arc::new(document))
            })
            .map(Arc::clone)
    }

    /// Render the current table without touching the cache.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn render(&self) -> Result<OpenApiDocument> {
        let state = self.state.read();
        render_document(&self.info, &state.operations, &state.components).map(OpenApiDocument)
    }
}
