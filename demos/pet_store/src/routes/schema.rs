use routespec::prelude::*;
use routespec::Result;
use std::sync::Arc;
use tracing::error;

/// `GET /schema`: the generated OpenAPI document, itself documented.
pub fn routes(registry: Arc<DocumentRegistry>, options: &RegistrarOptions) -> Result<Router> {
    let mut schema =
        OpenApiRouter::nested("/schema", Arc::clone(&registry)).with_options(options.clone());

    schema
        .openapi(
            RouteDeclaration::new("/schema")
                .summary("OpenAPI document")
                .response(200, ContentObject::described("The OpenAPI schema")),
        )?
        .get("", move |_: &mut HandlerRequest| match registry.generate() {
            Ok(doc) => HandlerResponse::json(200, doc.as_value().clone()),
            Err(err) => {
                error!(error = %err, "OpenAPI document generation failed");
                HandlerResponse::error(500, "Failed to generate OpenAPI document")
            }
        })?;

    Ok(schema.into_router())
}
