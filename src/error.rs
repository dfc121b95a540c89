use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the individual population stages.
///
/// [`Configurator::initialize`](crate::Configurator::initialize) absorbs every
/// one of these: a broken config file or a bad flag never stops startup. The
/// stage methods return them so tests and embedders can see what went wrong.
#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("No config file path set in environment variable {var}")]
    NoConfigPath { var: String },

    #[error("Failed to read {path}: {source}")]
    FileUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Invalid value for '{key}': expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Flags(#[from] clap::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_config_path_names_variable() {
        let err = ConfiguratorError::NoConfigPath {
            var: "MYAPP_CONFIG".into(),
        };
        assert!(err.to_string().contains("MYAPP_CONFIG"));
    }

    #[test]
    fn type_mismatch_formats() {
        let err = ConfiguratorError::TypeMismatch {
            key: "test.foo".into(),
            expected: "string",
        };
        let msg = err.to_string();
        assert!(msg.contains("test.foo"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn file_unavailable_includes_path() {
        let err = ConfiguratorError::FileUnavailable {
            path: "/etc/myapp/config.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("config.json"));
    }
}
