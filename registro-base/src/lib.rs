// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Registro base
//!
//! In-memory registries for academic subjects and pet records, together
//! with the validation rules that guard their creation and update.

pub mod error;
pub mod helpers;
pub mod pet;
pub mod subject;

pub use error::Error;
pub use pet::{NewPet, Pet, PetRegistry};
pub use subject::{PROGRAMS, Subject, SubjectRegistry};
