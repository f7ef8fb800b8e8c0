use crate::{
    server::{pets::*, subjects::*},
    wrappers::{Envelope, PetInfo, Status, SubjectInfo},
};
use utoipa::OpenApi;

/// Asignaturas HTTP
///
/// Registry of academic subjects keyed by their code.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asignaturas HTTP",
        description = "Register, search, list and delete academic subjects. Subjects are kept in memory and lost on restart.",
        version = "0.1.0",
        contact(
            name = "Kore Information",
            url = "https://www.kore-ledger.net/",
            email = "info@kore-ledger.net"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    paths(
        list_subjects,
        search_subjects,
        create_subject,
        delete_subject,
    ),
    components(
        schemas(
            Envelope,
            Status,
            SubjectInfo,
            SubjectQuery,
        )
    ),
    tags(
        (name = "Subject", description = "Academic subjects"),
    )
)]
pub struct SubjectsApiDoc;

/// Mascotas HTTP
///
/// Registry of pets keyed by their id.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mascotas HTTP",
        description = "Register, search, list, update and delete pets. Pet names are unique ignoring case. Pets are kept in memory and lost on restart.",
        version = "0.1.0",
        contact(
            name = "Kore Information",
            url = "https://www.kore-ledger.net/",
            email = "info@kore-ledger.net"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    paths(
        list_pets,
        search_pets,
        create_pet,
        update_pet,
        delete_pet,
    ),
    components(
        schemas(
            Envelope,
            Status,
            PetInfo,
            PetQuery,
        )
    ),
    tags(
        (name = "Pet", description = "Pet records"),
    )
)]
pub struct PetsApiDoc;
