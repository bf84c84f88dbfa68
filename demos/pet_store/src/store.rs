//! In-memory pet and user tables.

use crate::model::{NewPet, NewUser, Pet, PetView, PetWithOwner, User};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use ulid::Ulid;

#[derive(Debug, Default)]
pub struct Store {
    pets: RwLock<BTreeMap<String, Pet>>,
    users: RwLock<BTreeMap<String, User>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_pet(&self, new: NewPet) -> Pet {
        let pet = Pet {
            id: Ulid::new().to_string(),
            name: new.name,
            age: new.age,
            owner_id: new.owner_id,
        };
        self.pets.write().insert(pet.id.clone(), pet.clone());
        pet
    }

    #[must_use]
    pub fn get_pet(&self, id: &str) -> Option<Pet> {
        self.pets.read().get(id).cloned()
    }

    /// Pets in id order, optionally only those owned by `owner_id`.
    #[must_use]
    pub fn list_pets(&self, owner_id: Option<&str>) -> Vec<Pet> {
        self.pets
            .read()
            .values()
            .filter(|pet| owner_id.is_none() || pet.owner_id.as_deref() == owner_id)
            .cloned()
            .collect()
    }

    pub fn remove_pet(&self, id: &str) -> bool {
        self.pets.write().remove(id).is_some()
    }

    pub fn create_user(&self, new: NewUser) -> User {
        let user = User {
            id: Ulid::new().to_string(),
            name: new.name,
        };
        self.users.write().insert(user.id.clone(), user.clone());
        user
    }

    #[must_use]
    pub fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().get(id).cloned()
    }

    #[must_use]
    pub fn list_users(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    pub fn remove_user(&self, id: &str) -> bool {
        self.users.write().remove(id).is_some()
    }

    /// Attach the owner when asked for and known; otherwise the plain pet.
    #[must_use]
    pub fn view(&self, pet: Pet, with_owner: bool) -> PetView {
        let owner = pet
            .owner_id
            .as_deref()
            .filter(|_| with_owner)
            .and_then(|id| self.get_user(id));
        match owner {
            Some(owner) => PetView::WithOwner(PetWithOwner { pet, owner }),
            None => PetView::Plain(pet),
        }
    }
}
