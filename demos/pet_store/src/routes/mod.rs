//! Route modules, each an [`OpenApiRouter`](routespec::OpenApiRouter) mounted on the app.

mod pets;
mod schema;
mod users;

use crate::model::Models;
use crate::store::Store;
use routespec::{DocumentRegistry, RegistrarConfig};
use routespec::router::Router;
use std::sync::Arc;
use tracing::info;

/// The assembled pet store: the app router plus the registry it documents itself in.
pub struct App {
    pub registry: Arc<DocumentRegistry>,
    pub router: Router,
    pub store: Arc<Store>,
}

/// Declare every route, mounted as `/users`, `/pets` and `/schema`.
///
/// # Errors
///
/// Any declaration or binding error.
pub fn build_app(config: &RegistrarConfig) -> routespec::Result<App> {
    let registry = DocumentRegistry::shared(config.document.clone());
    let store = Arc::new(Store::new());
    let models = Models::new();
    models.register(&registry)?;

    let mut router = Router::new();
    router.mount(users::routes(
        Arc::clone(&registry),
        &config.options,
        &store,
        &models,
    )?)?;
    router.mount(pets::routes(
        Arc::clone(&registry),
        &config.options,
        &store,
        &models,
    )?)?;
    router.mount(schema::routes(Arc::clone(&registry), &config.options)?)?;

    info!(
        routes_count = router.len(),
        operations_count = registry.len(),
        "Pet store assembled"
    );
    Ok(App {
        registry,
        router,
        store,
    })
}
