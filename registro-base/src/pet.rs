// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Pet registry
//!
//! Pet records keyed by id. Besides the id, the name must be unique
//! ignoring case, both when creating and when updating a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    error::Error,
    helpers::{criterion, parse_record, same_text},
};

const TARGET_PET: &str = "Registro-Pet";

/// Fields an update body must carry.
pub const PET_FIELDS: [&str; 6] = [
    "nombre_mascota",
    "edad_mascota",
    "tipo_raza",
    "alergias_conocidas",
    "sexo_mascota",
    "notas_adicionales",
];

/// Fields a creation body must carry.
pub const NEW_PET_FIELDS: [&str; 7] = [
    "id_mascota",
    "nombre_mascota",
    "edad_mascota",
    "tipo_raza",
    "alergias_conocidas",
    "sexo_mascota",
    "notas_adicionales",
];

/// Pet record. The id is not part of it, it is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "nombre_mascota")]
    pub name: String,
    /// Free text, e.g. "2 años".
    #[serde(rename = "edad_mascota")]
    pub age: String,
    #[serde(rename = "tipo_raza")]
    pub breed: String,
    #[serde(rename = "alergias_conocidas")]
    pub known_allergies: String,
    #[serde(rename = "sexo_mascota")]
    pub sex: String,
    #[serde(rename = "notas_adicionales")]
    pub notes: String,
}

impl Pet {
    /// Reads the six attributes of an update body.
    pub fn from_json(body: Value) -> Result<Self, Error> {
        parse_record(body, &PET_FIELDS, Error::MissingPetFields)
    }
}

/// Creation body: the id plus the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPet {
    #[serde(rename = "id_mascota")]
    pub id: String,
    #[serde(flatten)]
    pub pet: Pet,
}

impl NewPet {
    /// Reads the seven fields of a creation body.
    pub fn from_json(body: Value) -> Result<Self, Error> {
        parse_record(body, &NEW_PET_FIELDS, Error::MissingPetFields)
    }
}

/// In-memory pet registry.
#[derive(Debug, Default)]
pub struct PetRegistry {
    pets: RwLock<BTreeMap<String, Pet>>,
}

impl PetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the two sample pets, M001 and M002.
    pub fn seeded() -> Self {
        let pets = BTreeMap::from([
            (
                "M001".to_owned(),
                Pet {
                    name: "Rocky".to_owned(),
                    age: "2 años".to_owned(),
                    breed: "Bulldog".to_owned(),
                    known_allergies: "Ninguna".to_owned(),
                    sex: "Macho".to_owned(),
                    notes: "Le gusta jugar con pelotas".to_owned(),
                },
            ),
            (
                "M002".to_owned(),
                Pet {
                    name: "Nina".to_owned(),
                    age: "4 años".to_owned(),
                    breed: "Persa".to_owned(),
                    known_allergies: "Pollo".to_owned(),
                    sex: "Hembra".to_owned(),
                    notes: "Muy tranquila".to_owned(),
                },
            ),
        ]);

        Self {
            pets: RwLock::new(pets),
        }
    }

    /// All registered pets.
    pub async fn list(&self) -> BTreeMap<String, Pet> {
        self.pets.read().await.clone()
    }

    /// Pets whose name or breed matches, ignoring case. Without criteria
    /// nothing matches and the result is empty.
    pub async fn search(
        &self,
        name: Option<&str>,
        breed: Option<&str>,
    ) -> BTreeMap<String, Pet> {
        let name = criterion(name);
        let breed = criterion(breed);

        self.pets
            .read()
            .await
            .iter()
            .filter(|(_, pet)| {
                name.is_some_and(|name| same_text(&pet.name, name))
                    || breed.is_some_and(|breed| same_text(&pet.breed, breed))
            })
            .map(|(id, pet)| (id.clone(), pet.clone()))
            .collect()
    }

    /// Inserts the pet. Returns `false` when the id or the name is taken.
    pub async fn create(&self, id: &str, pet: Pet) -> bool {
        let mut pets = self.pets.write().await;
        if pets.contains_key(id) {
            debug!(TARGET_PET, "Create, id {} already taken", id);
            return false;
        }

        if pets.values().any(|other| same_text(&other.name, &pet.name)) {
            debug!(TARGET_PET, "Create, name {} already taken", pet.name);
            return false;
        }

        info!(TARGET_PET, "Create, pet {} registered", id);
        pets.insert(id.to_owned(), pet);
        true
    }

    /// Replaces the record at `id`. Returns `false` when the id is unknown
    /// or another pet already has the name.
    pub async fn update(&self, id: &str, pet: Pet) -> bool {
        let mut pets = self.pets.write().await;
        if !pets.contains_key(id) {
            debug!(TARGET_PET, "Update, id {} not found", id);
            return false;
        }

        if pets
            .iter()
            .any(|(other_id, other)| other_id != id && same_text(&other.name, &pet.name))
        {
            debug!(TARGET_PET, "Update, name {} already taken", pet.name);
            return false;
        }

        info!(TARGET_PET, "Update, pet {} replaced", id);
        pets.insert(id.to_owned(), pet);
        true
    }

    /// Removes the pet. Returns `false` when the id is unknown.
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.pets.write().await.remove(id).is_some();
        if removed {
            info!(TARGET_PET, "Delete, pet {} removed", id);
        }
        removed
    }
}
