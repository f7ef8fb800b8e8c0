// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Subject registry
//!
//! Academic subjects keyed by their code. Subjects are validated once, on
//! creation; there is no update path.

use std::{collections::BTreeMap, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    error::Error,
    helpers::{criterion, has_fields, parse_record, same_text},
};

const TARGET_SUBJECT: &str = "Registro-Subject";

/// Programs a subject may belong to.
pub const PROGRAMS: [&str; 3] = [
    "Redes digitales",
    "Desarrollo de software",
    "Entornos virtuales",
];

const WEEKLY_HOURS: RangeInclusive<i64> = 0..=15;
const TERM_HOURS: RangeInclusive<i64> = 1..=5;

/// Fields a subject body must carry.
pub const SUBJECT_FIELDS: [&str; 6] = [
    "clave",
    "nombre",
    "horas_semana",
    "horas_cuatrimestre",
    "cuatrimestre",
    "carrera",
];

/// Academic subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject code, primary key.
    #[serde(rename = "clave")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Between 0 and 15.
    #[serde(rename = "horas_semana")]
    pub hours_per_week: i64,
    /// Between 1 and 5.
    #[serde(rename = "horas_cuatrimestre")]
    pub hours_per_term: i64,
    /// Term the subject is taught in, kept as received.
    #[serde(rename = "cuatrimestre")]
    pub term: Value,
    /// One of [`PROGRAMS`].
    #[serde(rename = "carrera")]
    pub program: String,
}

impl Subject {
    /// Reads a subject from a request body and validates it.
    pub fn from_json(body: Value) -> Result<Self, Error> {
        if !has_fields(&body, &SUBJECT_FIELDS) {
            return Err(Error::MissingSubjectFields);
        }

        // Any number out of range is a range error, whatever its JSON type.
        check_hours(&body["horas_semana"], &WEEKLY_HOURS, Error::WeeklyHours)?;
        check_hours(&body["horas_cuatrimestre"], &TERM_HOURS, Error::TermHours)?;

        let subject: Subject =
            parse_record(body, &SUBJECT_FIELDS, Error::MissingSubjectFields)?;
        subject.validate()?;
        Ok(subject)
    }

    /// Range and program checks, in this order.
    pub fn validate(&self) -> Result<(), Error> {
        if !WEEKLY_HOURS.contains(&self.hours_per_week) {
            return Err(Error::WeeklyHours);
        }

        if !TERM_HOURS.contains(&self.hours_per_term) {
            return Err(Error::TermHours);
        }

        if !PROGRAMS.contains(&self.program.as_str()) {
            return Err(Error::Program(PROGRAMS.join(", ")));
        }

        Ok(())
    }
}

fn check_hours(
    value: &Value,
    range: &RangeInclusive<i64>,
    error: Error,
) -> Result<(), Error> {
    let Value::Number(number) = value else {
        return Ok(());
    };

    let in_range = match number.as_i64() {
        Some(hours) => range.contains(&hours),
        None => number.as_f64().is_some_and(|hours| {
            hours >= *range.start() as f64 && hours <= *range.end() as f64
        }),
    };

    if in_range { Ok(()) } else { Err(error) }
}

/// In-memory subject registry.
#[derive(Debug, Default)]
pub struct SubjectRegistry {
    subjects: RwLock<BTreeMap<String, Subject>>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered subjects.
    pub async fn list(&self) -> BTreeMap<String, Subject> {
        self.subjects.read().await.clone()
    }

    /// Subjects whose code or name matches, ignoring case. Empty criteria
    /// match nothing.
    pub async fn search(
        &self,
        code: Option<&str>,
        name: Option<&str>,
    ) -> BTreeMap<String, Subject> {
        let code = criterion(code);
        let name = criterion(name);

        self.subjects
            .read()
            .await
            .iter()
            .filter(|(key, subject)| {
                code.is_some_and(|code| same_text(key, code))
                    || name.is_some_and(|name| same_text(&subject.name, name))
            })
            .map(|(key, subject)| (key.clone(), subject.clone()))
            .collect()
    }

    /// Inserts the subject under its code. Returns `false` without touching
    /// the registry when the code is already taken.
    pub async fn create(&self, subject: Subject) -> bool {
        let mut subjects = self.subjects.write().await;
        if subjects.contains_key(&subject.code) {
            debug!(TARGET_SUBJECT, "Create, code {} already taken", subject.code);
            return false;
        }

        info!(TARGET_SUBJECT, "Create, subject {} registered", subject.code);
        subjects.insert(subject.code.clone(), subject);
        true
    }

    /// Removes the subject. Returns `false` when the code is unknown.
    pub async fn delete(&self, code: &str) -> bool {
        let removed = self.subjects.write().await.remove(code).is_some();
        if removed {
            info!(TARGET_SUBJECT, "Delete, subject {} removed", code);
        }
        removed
    }
}
