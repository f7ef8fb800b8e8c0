//! Service configuration, resolved from settings at startup.

/// The two registries, each served by its own process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// `/asignaturas`
    Subjects,
    /// `/mascotas`
    Pets,
}

impl Service {
    /// Name used for the log file and the documentation route.
    pub fn name(&self) -> &'static str {
        match self {
            Service::Subjects => "asignaturas",
            Service::Pets => "mascotas",
        }
    }

    /// Prefix of the environment variables read by this service.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Service::Subjects => "ASIGNATURAS",
            Service::Pets => "MASCOTAS",
        }
    }

    pub fn default_address(&self) -> &'static str {
        match self {
            Service::Subjects => "127.0.0.1:5000",
            Service::Pets => "0.0.0.0:5000",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address the listener binds.
    pub address: String,
    /// Serve the OpenAPI document under `/doc`.
    pub doc: bool,
    /// Preload the sample pets. Ignored by the subjects service.
    pub seed: bool,
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logging {
    pub output: LoggingOutput,
    /// Directory of the log files.
    pub file_path: String,
    pub rotation: LoggingRotation,
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Logging {
    pub fn logs(&self) -> bool {
        self.output.stdout || self.output.file
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            output: LoggingOutput {
                stdout: true,
                file: false,
            },
            file_path: "logs".to_owned(),
            rotation: LoggingRotation::Never,
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingOutput {
    pub stdout: bool,
    pub file: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingRotation {
    Never,
    Hourly,
    Daily,
}
