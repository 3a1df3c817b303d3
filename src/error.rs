use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MandrelError {
    #[error("No bootstrap file '{file_name}' found in {start} or any parent directory")]
    MissingBootstrap { file_name: String, start: PathBuf },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in bootstrap file")]
    UnknownKeys(Vec<MandrelError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Bootstrap path {0} exists but is not a regular file")]
    NotAFile(PathBuf),

    #[error("Cannot determine the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl MandrelError {
    /// The walk reached the filesystem root without finding a bootstrap file.
    pub fn is_missing_bootstrap(&self) -> bool {
        matches!(self, MandrelError::MissingBootstrap { .. })
    }

    /// The bootstrap file was found (or forced) but could not be applied.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            MandrelError::UnknownKey { .. }
                | MandrelError::UnknownKeys(_)
                | MandrelError::ParseError { .. }
                | MandrelError::IoError { .. }
                | MandrelError::NotAFile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_formats_correctly() {
        let err = MandrelError::UnknownKey {
            key: "bootstrap.serch_paths".into(),
            path: "/srv/app/Mandrel.toml".into(),
            line: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("serch_paths"));
        assert!(msg.contains("Mandrel.toml"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn missing_bootstrap_names_file_and_start() {
        let err = MandrelError::MissingBootstrap {
            file_name: "Mandrel.toml".into(),
            start: "/home/user/project/src".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Mandrel.toml"));
        assert!(msg.contains("/home/user/project/src"));
        assert!(err.is_missing_bootstrap());
        assert!(!err.is_evaluation_error());
    }

    #[test]
    fn not_a_file_is_evaluation_error() {
        let err = MandrelError::NotAFile("/blah/Mandrel.toml".into());
        assert!(err.is_evaluation_error());
        assert!(!err.is_missing_bootstrap());
    }

    #[test]
    fn key_not_found_formats() {
        let err = MandrelError::KeyNotFound("database.url".into());
        assert!(err.to_string().contains("database.url"));
    }
}
