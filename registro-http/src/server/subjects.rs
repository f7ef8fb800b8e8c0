use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get},
};
use registro_base::{
    Error as RegistryError, Subject, SubjectRegistry, helpers::criterion,
};
use tower::ServiceBuilder;
use utoipa::{OpenApi, ToSchema};
use utoipa_rapidoc::RapiDoc;

use super::{first_value, read_body};
use crate::{
    doc::SubjectsApiDoc,
    error::Error,
    wrappers::{Envelope, SubjectInfo},
};

#[derive(Debug, Clone, ToSchema)]
pub struct SubjectQuery {
    clave: Option<String>,
    nombre: Option<String>,
}

impl SubjectQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            clave: first_value(pairs, "clave"),
            nombre: first_value(pairs, "nombre"),
        }
    }
}

fn to_info(subjects: BTreeMap<String, Subject>) -> BTreeMap<String, SubjectInfo> {
    subjects
        .into_iter()
        .map(|(code, subject)| (code, SubjectInfo::from(subject)))
        .collect()
}

/// Subjects
///
/// Lists every registered subject, keyed by code.
#[utoipa::path(
    get,
    path = "/asignaturas",
    operation_id = "Subjects",
    tag = "Subject",
    responses(
        (status = 200, description = "Registered subjects", body = BTreeMap<String, SubjectInfo>),
    )
)]
async fn list_subjects(
    Extension(registry): Extension<Arc<SubjectRegistry>>,
) -> Json<BTreeMap<String, SubjectInfo>> {
    Json(to_info(registry.list().await))
}

/// Search Subjects
///
/// Subjects whose code or name matches the parameters, ignoring case.
/// At least one of them must be present.
#[utoipa::path(
    get,
    path = "/asignaturas/buscar",
    operation_id = "Search Subjects",
    tag = "Subject",
    params(
        ("parameters" = SubjectQuery, Query, description = "Code and/or name to look for"),
    ),
    responses(
        (status = 200, description = "Matching subjects", body = BTreeMap<String, SubjectInfo>),
        (status = 400, description = "Neither code nor name given", body = Envelope),
        (status = 404, description = "No subject matches", body = Envelope),
    )
)]
async fn search_subjects(
    Extension(registry): Extension<Arc<SubjectRegistry>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<BTreeMap<String, SubjectInfo>>, Error> {
    let parameters = SubjectQuery::from_pairs(&pairs);
    let code = criterion(parameters.clave.as_deref());
    let name = criterion(parameters.nombre.as_deref());
    if code.is_none() && name.is_none() {
        return Err(RegistryError::EmptySubjectSearch.into());
    }

    let subjects = registry.search(code, name).await;
    if subjects.is_empty() {
        return Err(RegistryError::NoSubjectMatches.into());
    }

    Ok(Json(to_info(subjects)))
}

/// Register Subject
///
/// Validates the body and registers the subject under its code.
#[utoipa::path(
    post,
    path = "/asignaturas",
    operation_id = "Register Subject",
    tag = "Subject",
    request_body(content = SubjectInfo, content_type = "application/json", description = "The subject to register"),
    responses(
        (status = 201, description = "Subject registered", body = Envelope,
        example = json!(
            {
                "estado": "exitoso",
                "mensaje": "Asignatura registrada correctamente"
            }
        )),
        (status = 400, description = "Missing fields, invalid values or duplicate code", body = Envelope),
        (status = 500, description = "Unreadable body", body = Envelope),
    )
)]
async fn create_subject(
    Extension(registry): Extension<Arc<SubjectRegistry>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope>), Error> {
    let subject = Subject::from_json(read_body(&body)?)?;

    if registry.create(subject).await {
        Ok((
            StatusCode::CREATED,
            Json(Envelope::success("Asignatura registrada correctamente")),
        ))
    } else {
        Err(RegistryError::DuplicateSubject.into())
    }
}

/// Delete Subject
#[utoipa::path(
    delete,
    path = "/asignaturas/{clave}",
    operation_id = "Delete Subject",
    tag = "Subject",
    params(
        ("clave" = String, Path, description = "Subject code"),
    ),
    responses(
        (status = 200, description = "Subject deleted", body = Envelope),
        (status = 404, description = "Unknown code", body = Envelope),
    )
)]
async fn delete_subject(
    Extension(registry): Extension<Arc<SubjectRegistry>>,
    Path(code): Path<String>,
) -> Result<Json<Envelope>, Error> {
    if registry.delete(&code).await {
        Ok(Json(Envelope::success("Asignatura eliminada correctamente")))
    } else {
        Err(RegistryError::SubjectNotFound.into())
    }
}

pub fn build_routes(registry: SubjectRegistry, doc: bool) -> Router {
    let registry = Arc::new(registry);
    let routes = Router::new()
        .route("/asignaturas", get(list_subjects).post(create_subject))
        .route("/asignaturas/buscar", get(search_subjects))
        .route("/asignaturas/{clave}", delete(delete_subject))
        .layer(ServiceBuilder::new().layer(Extension(registry)));

    if doc {
        Router::new().merge(routes).merge(
            RapiDoc::with_openapi("/doc/asignaturas.json", SubjectsApiDoc::openapi())
                .path("/doc"),
        )
    } else {
        Router::new().merge(routes)
    }
}
