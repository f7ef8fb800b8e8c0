use serde::Deserialize;
use tracing::error;

use crate::{
    config::{Config, Logging, LoggingOutput, LoggingRotation, Service},
    error::StartupError,
};

const TARGET_PARAMS: &str = "Registro-Http-Params";

/// Raw settings. Unset values fall back to the service defaults.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Params {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    doc: Option<bool>,
    #[serde(default)]
    seed: Option<bool>,
    #[serde(default)]
    logging: LoggingParams,
}

impl Params {
    /// Reads `<PREFIX>_*` and `<PREFIX>_LOGGING_*` variables.
    pub fn from_env(parent: &str) -> Result<Self, StartupError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix(parent).try_parsing(true))
            .build()
            .map_err(|e| {
                error!(TARGET_PARAMS, "Error building config: {}", e);
                e
            })?;

        let params: Params = config.try_deserialize().map_err(|e| {
            error!(TARGET_PARAMS, "Error try deserialize config: {}", e);
            e
        })?;

        Ok(Self {
            logging: LoggingParams::from_env(&format!("{parent}_"))?,
            ..params
        })
    }

    /// Values set in `other_config` win.
    pub fn mix_config(&self, other_config: Params) -> Self {
        Self {
            address: other_config.address.or_else(|| self.address.clone()),
            doc: other_config.doc.or(self.doc),
            seed: other_config.seed.or(self.seed),
            logging: self.logging.mix_config(other_config.logging),
        }
    }

    pub fn into_config(self, service: Service) -> Result<Config, StartupError> {
        Ok(Config {
            address: self
                .address
                .unwrap_or_else(|| service.default_address().to_owned()),
            doc: self.doc.unwrap_or(false),
            seed: self.seed.unwrap_or(true),
            logging: self.logging.into_logging()?,
        })
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
struct LoggingParams {
    #[serde(default)]
    output: Option<String>, // "stdout" | "file" | "stdout,file" | "none"
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    rotation: Option<String>, // "never" | "hourly" | "daily"
    #[serde(default)]
    level: Option<String>,
}

impl LoggingParams {
    fn from_env(parent: &str) -> Result<Self, StartupError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(&format!("{parent}LOGGING"))
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn mix_config(&self, other_config: LoggingParams) -> Self {
        Self {
            output: other_config.output.or_else(|| self.output.clone()),
            file_path: other_config.file_path.or_else(|| self.file_path.clone()),
            rotation: other_config.rotation.or_else(|| self.rotation.clone()),
            level: other_config.level.or_else(|| self.level.clone()),
        }
    }

    fn into_logging(self) -> Result<Logging, StartupError> {
        let default = Logging::default();

        let output = match self.output {
            Some(output) => parse_output(&output)?,
            None => default.output,
        };

        let rotation = match self.rotation {
            Some(rotation) => parse_rotation(&rotation)?,
            None => default.rotation,
        };

        Ok(Logging {
            output,
            file_path: self.file_path.unwrap_or(default.file_path),
            rotation,
            level: self.level.unwrap_or(default.level),
        })
    }
}

fn parse_output(value: &str) -> Result<LoggingOutput, StartupError> {
    let mut output = LoggingOutput {
        stdout: false,
        file: false,
    };

    for item in value.split(',').map(|item| item.trim().to_lowercase()) {
        match item.as_str() {
            "stdout" => output.stdout = true,
            "file" => output.file = true,
            "none" | "" => {}
            other => {
                return Err(StartupError::Config(format!(
                    "unknown logging output '{other}'"
                )));
            }
        }
    }

    Ok(output)
}

fn parse_rotation(value: &str) -> Result<LoggingRotation, StartupError> {
    match value.trim().to_lowercase().as_str() {
        "never" => Ok(LoggingRotation::Never),
        "hourly" => Ok(LoggingRotation::Hourly),
        "daily" => Ok(LoggingRotation::Daily),
        other => Err(StartupError::Config(format!(
            "unknown logging rotation '{other}'"
        ))),
    }
}
