use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registro_base::Error as RegistryError;
use thiserror::Error;
use tracing::{error, warn};

use crate::wrappers::Envelope;

const TARGET_ERROR: &str = "Registro-Http-Error";

// Error
pub enum Error {
    Registry(RegistryError),
}

impl From<RegistryError> for Error {
    fn from(error: RegistryError) -> Self {
        Error::Registry(error)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Registry(error) => match error {
                RegistryError::MissingSubjectFields
                | RegistryError::WeeklyHours
                | RegistryError::TermHours
                | RegistryError::Program(_)
                | RegistryError::DuplicateSubject
                | RegistryError::EmptySubjectSearch
                | RegistryError::MissingPetFields
                | RegistryError::DuplicatePet => StatusCode::BAD_REQUEST,
                RegistryError::SubjectNotFound
                | RegistryError::NoSubjectMatches
                | RegistryError::PetUpdateRejected
                | RegistryError::PetNotFound
                | RegistryError::NoPetMatches => StatusCode::NOT_FOUND,
                RegistryError::Payload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Error::Registry(error) => {
                if status.is_server_error() {
                    error!(TARGET_ERROR, "{}", error);
                } else {
                    warn!(TARGET_ERROR, "Request rejected: {}", error);
                }
                (status, Json(Envelope::error(error.to_string()))).into_response()
            }
        }
    }
}

/// Failures that stop a service before it serves any request.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for StartupError {
    fn from(error: config::ConfigError) -> Self {
        StartupError::Config(error.to_string())
    }
}
