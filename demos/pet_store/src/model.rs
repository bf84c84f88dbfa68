//! Pet store models: the documented schemas and the Rust types handlers use for them.

use routespec::schema::{ObjectSchema, Schema};
use routespec::DocumentRegistry;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetWithOwner {
    #[serde(flatten)]
    pub pet: Pet,
    pub owner: User,
}

/// `Pet | PetWithOwner`, matching the `anyOf` documented for pet responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetView {
    WithOwner(PetWithOwner),
    Plain(Pet),
}

#[derive(Debug, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub age: Option<f64>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PetParams {
    #[serde(rename = "petId")]
    pub pet_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PetQuery {
    #[serde(rename = "ownerId")]
    pub owner_id: Option<String>,
    #[serde(rename = "withOwner", default)]
    pub with_owner: bool,
}

/// Every schema the routes document, built once and shared.
#[derive(Debug, Clone)]
pub struct Models {
    pub user: Schema,
    pub pet: Schema,
    pub pet_with_owner: Schema,
    pub error: Schema,
    pub validation_error: Schema,
    pub new_pet: Schema,
    pub new_user: Schema,
}

impl Models {
    #[must_use]
    pub fn new() -> Self {
        let user = ObjectSchema::new()
            .field("id", Schema::string().example(json!("abc123")))
            .field("name", Schema::string().example(json!("Henry")))
            .build()
            .named("User");
        let pet = ObjectSchema::new()
            .field("id", Schema::string().example(json!("abc123")))
            .field("name", Schema::string().example(json!("Mittens")))
            .optional("age", Schema::number().example(json!(5)))
            .optional("ownerId", Schema::string().example(json!("Henry")))
            .build()
            .named("Pet");
        let pet_with_owner = pet
            .extend()
            .field("owner", user.clone())
            .build()
            .named("PetWithOwner");
        let error = ObjectSchema::new()
            .field(
                "message",
                Schema::string().example(json!("Something went wrong!")),
            )
            .build()
            .named("ErrorResponse");
        let validation_error = error
            .extend()
            .field(
                "errors",
                Schema::array(
                    ObjectSchema::new()
                        .field("location", Schema::string())
                        .field("message", Schema::string())
                        .build(),
                ),
            )
            .build()
            .named("ValidationError");
        let new_pet = ObjectSchema::new()
            .field("name", Schema::string())
            .optional("age", Schema::number())
            .optional("ownerId", Schema::string())
            .build();
        let new_user = ObjectSchema::new().field("name", Schema::string()).build();

        Self {
            user,
            pet,
            pet_with_owner,
            error,
            validation_error,
            new_pet,
            new_user,
        }
    }

    /// Publish the shared models under `components.schemas`.
    ///
    /// # Errors
    ///
    /// Fails only for unnamed schemas.
    pub fn register(&self, registry: &DocumentRegistry) -> routespec::Result<()> {
        for schema in [&self.error, &self.user, &self.pet, &self.pet_with_owner] {
            registry.register_component(schema.clone())?;
        }
        Ok(())
    }
}

impl Default for Models {
    fn default() -> Self {
        Self::new()
    }
}
