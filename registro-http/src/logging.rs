use std::io;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

use crate::config::{Logging, LoggingRotation};

/// Keeps the non-blocking writers flushing. Hold it until shutdown.
pub struct LoggingHandle {
    _guards: Vec<WorkerGuard>,
}

pub fn init_logging(cfg: &Logging, file_name: &str) -> Option<LoggingHandle> {
    if !cfg.logs() {
        return None;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();

    let env_filter = if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        env_filter
    } else {
        EnvFilter::new(&cfg.level)
    };

    let stdout_layer = cfg.output.stdout.then(|| {
        let (stdout_nb, guard) = NonBlocking::new(io::stdout());
        guards.push(guard);

        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(stdout_nb)
    });

    let mut file_error = None;
    let file_layer = if cfg.output.file {
        let rotation = match cfg.rotation {
            LoggingRotation::Never => Rotation::NEVER,
            LoggingRotation::Hourly => Rotation::HOURLY,
            LoggingRotation::Daily => Rotation::DAILY,
        };

        match RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(file_name)
            .filename_suffix("log")
            .build(&cfg.file_path)
        {
            Ok(appender) => {
                let (file_nb, guard) = NonBlocking::new(appender);
                guards.push(guard);

                Some(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(file_nb),
                )
            }
            Err(e) => {
                file_error = Some(e);
                None
            }
        }
    } else {
        None
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    // If a subscriber is running (e.g. tests)
    if subscriber.try_init().is_err() {
        return None;
    }

    if let Some(e) = file_error {
        tracing::warn!("Can not write logs to {}: {}", cfg.file_path, e);
    }

    Some(LoggingHandle { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingOutput;

    #[test]
    fn test_disabled_output() {
        let cfg = Logging {
            output: LoggingOutput {
                stdout: false,
                file: false,
            },
            ..Logging::default()
        };
        assert!(init_logging(&cfg, "mascotas").is_none());
    }
}
