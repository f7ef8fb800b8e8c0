// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Error module.
//!
//! Every rejection a registry client can receive. The display text is the
//! message returned to the client.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A subject body lacks one of the required fields.
    #[error("Faltan datos obligatorios de la asignatura")]
    MissingSubjectFields,
    /// Weekly hours outside [0, 15].
    #[error("Horas por semana deben estar entre 0 y 15")]
    WeeklyHours,
    /// Term hours outside [1, 5].
    #[error("Horas por cuatrimestre deben estar entre 1 y 5")]
    TermHours,
    /// Program not in the accepted set.
    #[error("La carrera debe ser una de las siguientes: {0}")]
    Program(String),
    /// Subject code already registered.
    #[error("Ya existe una asignatura con esa clave")]
    DuplicateSubject,
    /// Subject code not registered.
    #[error("No se encontró una asignatura con esa clave")]
    SubjectNotFound,
    /// Subject search without code nor name.
    #[error("Los parámetros clave y nombre no pueden estar vacíos")]
    EmptySubjectSearch,
    /// Subject search without results.
    #[error("No se encontraron asignaturas con esos criterios")]
    NoSubjectMatches,
    /// A pet body lacks one of the required fields.
    #[error("Faltan datos obligatorios de la mascota")]
    MissingPetFields,
    /// Pet id or name already registered.
    #[error("Ya existe una mascota con ese ID o nombre")]
    DuplicatePet,
    /// Update target absent or name taken by another pet.
    #[error("Mascota no encontrada o nombre duplicado")]
    PetUpdateRejected,
    /// Pet id not registered.
    #[error("Mascota no encontrada")]
    PetNotFound,
    /// Pet search without results.
    #[error("No se encontraron mascotas con esos criterios")]
    NoPetMatches,
    /// Body could not be read as the expected record.
    #[error("Error en el servidor: {0}")]
    Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages() {
        assert_eq!(
            Error::WeeklyHours.to_string(),
            "Horas por semana deben estar entre 0 y 15"
        );
        assert_eq!(
            Error::EmptySubjectSearch.to_string(),
            "Los parámetros clave y nombre no pueden estar vacíos"
        );
        assert_eq!(
            Error::Payload("EOF".to_owned()).to_string(),
            "Error en el servidor: EOF"
        );
    }
}
