use registro_base::{Pet, Subject};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Status {
    #[serde(rename = "exitoso")]
    Success,
    #[serde(rename = "error")]
    Error,
}

/// Body of every write response and of every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    #[serde(rename = "estado")]
    pub status: Status,
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectInfo {
    pub clave: String,
    pub nombre: String,
    pub horas_semana: i64,
    pub horas_cuatrimestre: i64,
    pub cuatrimestre: Value,
    pub carrera: String,
}

impl From<Subject> for SubjectInfo {
    fn from(value: Subject) -> Self {
        Self {
            clave: value.code,
            nombre: value.name,
            horas_semana: value.hours_per_week,
            horas_cuatrimestre: value.hours_per_term,
            cuatrimestre: value.term,
            carrera: value.program,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetInfo {
    pub nombre_mascota: String,
    pub edad_mascota: String,
    pub tipo_raza: String,
    pub alergias_conocidas: String,
    pub sexo_mascota: String,
    pub notas_adicionales: String,
}

impl From<Pet> for PetInfo {
    fn from(value: Pet) -> Self {
        Self {
            nombre_mascota: value.name,
            edad_mascota: value.age,
            tipo_raza: value.breed,
            alergias_conocidas: value.known_allergies,
            sexo_mascota: value.sex,
            notas_adicionales: value.notes,
        }
    }
}
