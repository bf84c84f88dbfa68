use crate::model::{Models, NewUser, User, UserParams};
use crate::store::Store;
use routespec::prelude::*;
use routespec::Result;
use serde_json::json;
use std::sync::Arc;

fn user_params() -> Schema {
    ObjectSchema::new()
        .field("userId", Schema::string().describe("Identity of user"))
        .build()
}

/// `/users` routes, documented in `registry`.
pub fn routes(
    registry: Arc<DocumentRegistry>,
    options: &RegistrarOptions,
    store: &Arc<Store>,
    models: &Models,
) -> Result<Router> {
    let mut users = OpenApiRouter::nested("/users", registry).with_options(options.clone());

    let mut binding = users.openapi(
        RouteDeclaration::new("/users")
            .summary("List users")
            .tag("users")
            .response(200, Schema::array(models.user.clone()))
            .response(500, models.error.clone())
            .responds::<Vec<User>>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.get(
        "",
        binding.handler(move |_: TypedRequest<(), (), ()>| Reply::ok(store_ref.list_users())),
    )?;

    let mut binding = users.openapi(
        RouteDeclaration::new("/users/{userId}")
            .summary("Get a user")
            .tag("users")
            .params::<UserParams>(user_params())
            .response(200, models.user.clone())
            .response(400, models.validation_error.clone())
            .response(404, models.error.clone())
            .response(500, models.error.clone())
            .responds::<User>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.get(
        "/{userId}",
        binding.handler(move |req: TypedRequest<UserParams, (), ()>| {
            match store_ref.get_user(&req.params.user_id) {
                Some(user) => Reply::ok(user),
                None => Reply::json(
                    404,
                    json!({ "message": "We couldn't find the user you were looking for!" }),
                ),
            }
        }),
    )?;

    let mut binding = users.openapi(
        RouteDeclaration::new("/users")
            .summary("Create a user")
            .tag("users")
            .body::<NewUser>(models.new_user.clone())
            .response(200, models.user.clone())
            .response(400, models.validation_error.clone())
            .response(500, models.error.clone())
            .responds::<User>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.post(
        "",
        binding.handler(move |req: TypedRequest<(), (), NewUser>| {
            Reply::ok(store_ref.create_user(req.body))
        }),
    )?;

    let mut binding = users.openapi(
        RouteDeclaration::new("/users/{userId}")
            .summary("Delete a user")
            .tag("users")
            .params::<UserParams>(user_params())
            .response(200, Shape::none())
            .response(400, models.validation_error.clone())
            .response(500, models.error.clone()),
    )?;
    let store_ref = Arc::clone(store);
    binding.delete(
        "/:userId",
        binding.handler(move |req: TypedRequest<UserParams, (), ()>| {
            store_ref.remove_user(&req.params.user_id);
            Reply::empty(200)
        }),
    )?;

    Ok(users.into_router())
}
