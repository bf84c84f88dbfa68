use crate::model::{Models, NewPet, Pet, PetParams, PetQuery, PetView};
use crate::store::Store;
use routespec::prelude::*;
use routespec::Result;
use serde_json::json;
use std::sync::Arc;

fn with_owner_param() -> Schema {
    Schema::boolean()
        .describe("Return the full details of the owner.")
        .example(json!(false))
}

fn pet_params() -> Schema {
    ObjectSchema::new()
        .field("petId", Schema::string().describe("Identity of pet"))
        .build()
}

/// `/pets` routes, documented in `registry`.
pub fn routes(
    registry: Arc<DocumentRegistry>,
    options: &RegistrarOptions,
    store: &Arc<Store>,
    models: &Models,
) -> Result<Router> {
    let mut pets = OpenApiRouter::nested("/pets", registry).with_options(options.clone());

    let mut binding = pets.openapi(
        RouteDeclaration::new("/pets")
            .summary("List pets")
            .tag("pets")
            .query::<PetQuery>(
                ObjectSchema::new()
                    .optional("ownerId", Schema::string().describe("Pets belonging to person."))
                    .optional("withOwner", with_owner_param())
                    .build(),
            )
            .response(
                200,
                Schema::array(Schema::any_of([
                    models.pet.clone(),
                    models.pet_with_owner.clone(),
                ])),
            )
            .response(400, models.validation_error.clone())
            .responds::<Vec<PetView>>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.get(
        "",
        binding.handler(move |req: TypedRequest<(), PetQuery, ()>| {
            let listed = store_ref
                .list_pets(req.query.owner_id.as_deref())
                .into_iter()
                .map(|pet| store_ref.view(pet, req.query.with_owner))
                .collect();
            Reply::ok(listed)
        }),
    )?;

    let mut binding = pets.openapi(
        RouteDeclaration::new("/pets/{petId}")
            .summary("Get a pet")
            .tag("pets")
            .params::<PetParams>(pet_params())
            .query::<PetQuery>(
                ObjectSchema::new()
                    .optional("withOwner", with_owner_param())
                    .build(),
            )
            .response(200, [models.pet.clone(), models.pet_with_owner.clone()])
            .response(400, models.validation_error.clone())
            .response(
                404,
                ObjectSchema::new()
                    .field("message", Schema::string().example(json!("Couldn't find it!")))
                    .build(),
            )
            .response(500, models.error.clone())
            .responds::<PetView>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.get(
        "/{petId}",
        binding.handler(move |req: TypedRequest<PetParams, PetQuery, ()>| {
            match store_ref.get_pet(&req.params.pet_id) {
                Some(pet) => Reply::ok(store_ref.view(pet, req.query.with_owner)),
                None => Reply::json(
                    404,
                    json!({ "message": "We couldn't find the pet you were looking for!" }),
                ),
            }
        }),
    )?;

    let mut binding = pets.openapi(
        RouteDeclaration::new("/pets")
            .summary("Create a pet")
            .tag("pets")
            .body::<NewPet>(
                ContentObject::described("Details of pet to create")
                    .schema(models.new_pet.clone())
                    .required(true),
            )
            .response(200, models.pet.clone())
            .response(400, models.validation_error.clone())
            .response(500, models.error.clone())
            .responds::<Pet>(),
    )?;
    let store_ref = Arc::clone(store);
    binding.post(
        "",
        binding.handler(move |req: TypedRequest<(), (), NewPet>| {
            Reply::ok(store_ref.create_pet(req.body))
        }),
    )?;

    let mut binding = pets.openapi(
        RouteDeclaration::new("/pets/{petId}")
            .summary("Delete a pet")
            .tag("pets")
            .params::<PetParams>(pet_params())
            .response(200, Shape::none())
            .response(400, models.validation_error.clone())
            .response(500, models.error.clone()),
    )?;
    let store_ref = Arc::clone(store);
    binding.delete(
        "/:petId",
        binding.handler(move |req: TypedRequest<PetParams, (), ()>| {
            store_ref.remove_pet(&req.params.pet_id);
            Reply::empty(200)
        }),
    )?;

    Ok(pets.into_router())
}
