use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, put},
};
use registro_base::{Error as RegistryError, NewPet, Pet, PetRegistry};
use tower::ServiceBuilder;
use utoipa::{OpenApi, ToSchema};
use utoipa_rapidoc::RapiDoc;

use super::{first_value, read_body};
use crate::{
    doc::PetsApiDoc,
    error::Error,
    wrappers::{Envelope, PetInfo},
};

#[derive(Debug, Clone, ToSchema)]
pub struct PetQuery {
    nombre: Option<String>,
    raza: Option<String>,
}

impl PetQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            nombre: first_value(pairs, "nombre"),
            raza: first_value(pairs, "raza"),
        }
    }
}

fn to_info(pets: BTreeMap<String, Pet>) -> BTreeMap<String, PetInfo> {
    pets.into_iter()
        .map(|(id, pet)| (id, PetInfo::from(pet)))
        .collect()
}

/// Pets
///
/// Lists every registered pet, keyed by id.
#[utoipa::path(
    get,
    path = "/mascotas",
    operation_id = "Pets",
    tag = "Pet",
    responses(
        (status = 200, description = "Registered pets", body = BTreeMap<String, PetInfo>,
        example = json!(
            {
                "M001": {
                    "nombre_mascota": "Rocky",
                    "edad_mascota": "2 años",
                    "tipo_raza": "Bulldog",
                    "alergias_conocidas": "Ninguna",
                    "sexo_mascota": "Macho",
                    "notas_adicionales": "Le gusta jugar con pelotas"
                }
            }
        )),
    )
)]
async fn list_pets(
    Extension(registry): Extension<Arc<PetRegistry>>,
) -> Json<BTreeMap<String, PetInfo>> {
    Json(to_info(registry.list().await))
}

/// Search Pets
///
/// Pets whose name or breed matches the parameters, ignoring case. Without
/// parameters nothing matches.
#[utoipa::path(
    get,
    path = "/mascotas/buscar",
    operation_id = "Search Pets",
    tag = "Pet",
    params(
        ("parameters" = PetQuery, Query, description = "Name and/or breed to look for"),
    ),
    responses(
        (status = 200, description = "Matching pets", body = BTreeMap<String, PetInfo>),
        (status = 404, description = "No pet matches", body = Envelope),
    )
)]
async fn search_pets(
    Extension(registry): Extension<Arc<PetRegistry>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<BTreeMap<String, PetInfo>>, Error> {
    let parameters = PetQuery::from_pairs(&pairs);
    let pets = registry
        .search(parameters.nombre.as_deref(), parameters.raza.as_deref())
        .await;
    if pets.is_empty() {
        return Err(RegistryError::NoPetMatches.into());
    }

    Ok(Json(to_info(pets)))
}

/// Register Pet
///
/// Registers a pet when neither its id nor its name is taken.
#[utoipa::path(
    post,
    path = "/mascotas",
    operation_id = "Register Pet",
    tag = "Pet",
    request_body(content = Object, content_type = "application/json", description = "The pet to register, including `id_mascota`",
    example = json!(
        {
            "id_mascota": "M003",
            "nombre_mascota": "Luna",
            "edad_mascota": "1 año",
            "tipo_raza": "Siames",
            "alergias_conocidas": "Ninguna",
            "sexo_mascota": "Hembra",
            "notas_adicionales": "Duerme mucho"
        }
    )),
    responses(
        (status = 201, description = "Pet registered", body = Envelope),
        (status = 400, description = "Missing fields or duplicate id or name", body = Envelope),
        (status = 500, description = "Unreadable body", body = Envelope),
    )
)]
async fn create_pet(
    Extension(registry): Extension<Arc<PetRegistry>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope>), Error> {
    let new_pet = NewPet::from_json(read_body(&body)?)?;

    if registry.create(&new_pet.id, new_pet.pet).await {
        Ok((
            StatusCode::CREATED,
            Json(Envelope::success("Mascota registrada correctamente")),
        ))
    } else {
        Err(RegistryError::DuplicatePet.into())
    }
}

/// Update Pet
///
/// Replaces the record of an existing pet. The name may not belong to
/// another pet.
#[utoipa::path(
    put,
    path = "/mascotas/{id_mascota}",
    operation_id = "Update Pet",
    tag = "Pet",
    params(
        ("id_mascota" = String, Path, description = "Pet id"),
    ),
    request_body(content = PetInfo, content_type = "application/json", description = "The new record"),
    responses(
        (status = 200, description = "Pet updated", body = Envelope),
        (status = 400, description = "Missing fields", body = Envelope),
        (status = 404, description = "Unknown id or duplicate name", body = Envelope),
        (status = 500, description = "Unreadable body", body = Envelope),
    )
)]
async fn update_pet(
    Extension(registry): Extension<Arc<PetRegistry>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Envelope>, Error> {
    let pet = Pet::from_json(read_body(&body)?)?;

    if registry.update(&id, pet).await {
        Ok(Json(Envelope::success("Datos de la mascota actualizados")))
    } else {
        Err(RegistryError::PetUpdateRejected.into())
    }
}

/// Delete Pet
#[utoipa::path(
    delete,
    path = "/mascotas/{id_mascota}",
    operation_id = "Delete Pet",
    tag = "Pet",
    params(
        ("id_mascota" = String, Path, description = "Pet id"),
    ),
    responses(
        (status = 200, description = "Pet deleted", body = Envelope),
        (status = 404, description = "Unknown id", body = Envelope),
    )
)]
async fn delete_pet(
    Extension(registry): Extension<Arc<PetRegistry>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, Error> {
    if registry.delete(&id).await {
        Ok(Json(Envelope::success("Mascota eliminada correctamente")))
    } else {
        Err(RegistryError::PetNotFound.into())
    }
}

pub fn build_routes(registry: PetRegistry, doc: bool) -> Router {
    let registry = Arc::new(registry);
    let routes = Router::new()
        .route("/mascotas", get(list_pets).post(create_pet))
        .route("/mascotas/buscar", get(search_pets))
        .route("/mascotas/{id_mascota}", put(update_pet).delete(delete_pet))
        .layer(ServiceBuilder::new().layer(Extension(registry)));

    if doc {
        Router::new().merge(routes).merge(
            RapiDoc::with_openapi("/doc/mascotas.json", PetsApiDoc::openapi())
                .path("/doc"),
        )
    } else {
        Router::new().merge(routes)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::server::test_utils::{send, send_request};

    fn app() -> Router {
        build_routes(PetRegistry::seeded(), false)
    }

    fn record(name: &str) -> Value {
        json!({
            "nombre_mascota": name,
            "edad_mascota": "1 año",
            "tipo_raza": "Siames",
            "alergias_conocidas": "Ninguna",
            "sexo_mascota": "Hembra",
            "notas_adicionales": "Duerme mucho"
        })
    }

    fn new_pet(id: &str, name: &str) -> Value {
        let mut body = record(name);
        body["id_mascota"] = json!(id);
        body
    }

    #[tokio::test]
    async fn test_list_seeded() {
        let (status, response) = send(&app(), "GET", "/mascotas", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response["M001"],
            json!({
                "nombre_mascota": "Rocky",
                "edad_mascota": "2 años",
                "tipo_raza": "Bulldog",
                "alergias_conocidas": "Ninguna",
                "sexo_mascota": "Macho",
                "notas_adicionales": "Le gusta jugar con pelotas"
            })
        );
        assert_eq!(response["M002"]["nombre_mascota"], "Nina");
    }

    #[tokio::test]
    async fn test_create() {
        let app = app();

        let (status, response) =
            send(&app, "POST", "/mascotas", Some(new_pet("M003", "Luna"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            response,
            json!({ "estado": "exitoso", "mensaje": "Mascota registrada correctamente" })
        );

        // The id is the key, not part of the stored record.
        let (_, response) = send(&app, "GET", "/mascotas", None).await;
        assert_eq!(response["M003"], record("Luna"));
    }

    #[tokio::test]
    async fn test_create_conflicts() {
        let app = app();

        let (status, response) =
            send(&app, "POST", "/mascotas", Some(new_pet("M001", "Luna"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["mensaje"], "Ya existe una mascota con ese ID o nombre");

        let (status, _) = send(&app, "POST", "/mascotas", Some(new_pet("M003", "ROCKY"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, response) =
            send(&app, "POST", "/mascotas", Some(record("Luna"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["mensaje"], "Faltan datos obligatorios de la mascota");

        let (_, response) = send(&app, "GET", "/mascotas", None).await;
        assert_eq!(response.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let app = app();

        let (status, response) =
            send(&app, "PUT", "/mascotas/M001", Some(record("Nina"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["mensaje"], "Mascota no encontrada o nombre duplicado");

        let (status, response) =
            send(&app, "PUT", "/mascotas/M001", Some(record("Rocky"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["mensaje"], "Datos de la mascota actualizados");

        let (_, response) = send(&app, "GET", "/mascotas", None).await;
        assert_eq!(response["M001"], record("Rocky"));

        let (status, _) = send(&app, "PUT", "/mascotas/M009", Some(record("Luna"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, response) = send(
            &app,
            "PUT",
            "/mascotas/M001",
            Some(json!({ "nombre_mascota": "Rocky" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["mensaje"], "Faltan datos obligatorios de la mascota");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = app();
        let request = axum::http::Request::builder()
            .method("PUT")
            .uri("/mascotas/M001")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{\"nombre_mascota\": "))
            .unwrap();

        let (status, response) = send_request(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response["estado"], "error");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let app = app();

        let (status, response) = send(&app, "DELETE", "/mascotas/M002", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["mensaje"], "Mascota eliminada correctamente");

        let (status, response) = send(&app, "DELETE", "/mascotas/M002", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["mensaje"], "Mascota no encontrada");
    }

    #[tokio::test]
    async fn test_search() {
        let app = app();

        let (status, response) = send(&app, "GET", "/mascotas/buscar?nombre=rocky", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.as_object().unwrap().len(), 1);
        assert!(response.get("M001").is_some());

        let (status, response) =
            send(&app, "GET", "/mascotas/buscar?nombre=Rocky&raza=persa", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.as_object().unwrap().len(), 2);

        let (status, response) = send(&app, "GET", "/mascotas/buscar", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["mensaje"], "No se encontraron mascotas con esos criterios");

        let (status, _) = send(&app, "GET", "/mascotas/buscar?raza=Beagle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_repeated_parameter() {
        let app = app();

        let (status, response) =
            send(&app, "GET", "/mascotas/buscar?nombre=Rocky&nombre=Nina", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.as_object().unwrap().len(), 1);
        assert!(response.get("M001").is_some());

        let (status, response) =
            send(&app, "GET", "/mascotas/buscar?nombre=Luna&nombre=Rocky", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["mensaje"], "No se encontraron mascotas con esos criterios");
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let app = build_routes(PetRegistry::new(), false);
        let (status, response) = send(&app, "GET", "/mascotas", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({}));
    }
}
