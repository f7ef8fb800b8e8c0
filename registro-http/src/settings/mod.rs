use std::env;

use config::Config;
use params::Params;

pub mod command;
use crate::{config::Config as ServiceConfig, config::Service, error::StartupError};
mod params;

/// Environment first, then the settings file on top of it.
pub fn build_config(
    service: Service,
    env: bool,
    file: &str,
) -> Result<ServiceConfig, StartupError> {
    // Env configuration
    let mut params_env = Params::default();
    if env {
        params_env = Params::from_env(service.env_prefix())?;
    }

    // file configuration (json, yaml or toml)
    let mut params_file = Params::default();
    if !file.is_empty() {
        let config = Config::builder()
            .add_source(config::File::with_name(file))
            .build()?;

        params_file = config.try_deserialize()?;
    }

    // Mix configurations.
    params_env.mix_config(params_file).into_config(service)
}

/// Settings file named by `<PREFIX>_FILE_PATH`, if any.
pub fn build_file_path(service: Service) -> String {
    env::var(format!("{}_FILE_PATH", service.env_prefix())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;
    use crate::config::{LoggingOutput, LoggingRotation};

    fn clear_env() {
        for key in [
            "MASCOTAS_ADDRESS",
            "MASCOTAS_DOC",
            "MASCOTAS_SEED",
            "MASCOTAS_LOGGING_LEVEL",
            "MASCOTAS_LOGGING_OUTPUT",
            "ASIGNATURAS_ADDRESS",
        ] {
            // SAFETY: settings tests run serially.
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let pets = build_config(Service::Pets, true, "").unwrap();
        assert_eq!(pets.address, "0.0.0.0:5000");
        assert!(pets.seed);
        assert!(!pets.doc);
        assert_eq!(
            pets.logging.output,
            LoggingOutput {
                stdout: true,
                file: false
            }
        );

        let subjects = build_config(Service::Subjects, false, "").unwrap();
        assert_eq!(subjects.address, "127.0.0.1:5000");
        assert_eq!(subjects.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_env() {
        clear_env();
        // SAFETY: settings tests run serially.
        unsafe {
            env::set_var("MASCOTAS_ADDRESS", "127.0.0.1:8080");
            env::set_var("MASCOTAS_SEED", "false");
            env::set_var("MASCOTAS_LOGGING_LEVEL", "debug");
            env::set_var("MASCOTAS_LOGGING_OUTPUT", "stdout,file");
        }

        let config = build_config(Service::Pets, true, "").unwrap();
        assert_eq!(config.address, "127.0.0.1:8080");
        assert!(!config.seed);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.output.file);

        // Other services keep their own prefix.
        let subjects = build_config(Service::Subjects, true, "").unwrap();
        assert_eq!(subjects.address, "127.0.0.1:5000");

        // Ignored when disabled.
        let config = build_config(Service::Pets, false, "").unwrap();
        assert_eq!(config.address, "0.0.0.0:5000");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_file_over_env() {
        clear_env();
        // SAFETY: settings tests run serially.
        unsafe {
            env::set_var("MASCOTAS_ADDRESS", "127.0.0.1:8080");
            env::set_var("MASCOTAS_DOC", "true");
        }

        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(
            file,
            r#"{{
                "address": "0.0.0.0:9000",
                "logging": {{ "rotation": "daily", "file_path": "/tmp/registro" }}
            }}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = build_config(Service::Pets, true, path).unwrap();
        assert_eq!(config.address, "0.0.0.0:9000");
        assert!(config.doc);
        assert_eq!(config.logging.rotation, LoggingRotation::Daily);
        assert_eq!(config.logging.file_path, "/tmp/registro");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values() {
        clear_env();
        // SAFETY: settings tests run serially.
        unsafe { env::set_var("MASCOTAS_LOGGING_OUTPUT", "syslog") };

        assert!(matches!(
            build_config(Service::Pets, true, ""),
            Err(StartupError::Config(_))
        ));

        clear_env();
        assert!(build_config(Service::Pets, true, "/no/such/settings.toml").is_err());
    }
}
