//! APS-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, ApsError>;

/// Top-level error type for the profile switcher.
#[derive(Debug, Error)]
pub enum ApsError {
    #[error("[APS-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[APS-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[APS-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[APS-2001] could not run {program}: {source}")]
    GatewayUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[APS-2002] {command} failed (exit {code}): {diagnostics}")]
    GatewayExit {
        command: String,
        code: i32,
        diagnostics: String,
    },

    #[error("[APS-2003] malformed card listing: {details}")]
    GatewayParse { details: String },

    #[error("[APS-2101] selected device is no longer available: {card}")]
    StaleSelection { card: String },

    #[error("[APS-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[APS-3002] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[APS-3003] terminal failure: {source}")]
    Terminal {
        #[source]
        source: std::io::Error,
    },
}

impl ApsError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "APS-1001",
            Self::MissingConfig { .. } => "APS-1002",
            Self::ConfigParse { .. } => "APS-1003",
            Self::GatewayUnavailable { .. } => "APS-2001",
            Self::GatewayExit { .. } => "APS-2002",
            Self::GatewayParse { .. } => "APS-2003",
            Self::StaleSelection { .. } => "APS-2101",
            Self::Io { .. } => "APS-3001",
            Self::Serialization { .. } => "APS-3002",
            Self::Terminal { .. } => "APS-3003",
        }
    }

    /// Whether the failure came from the external control utility.
    #[must_use]
    pub const fn is_gateway(&self) -> bool {
        matches!(
            self,
            Self::GatewayUnavailable { .. } | Self::GatewayExit { .. } | Self::GatewayParse { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for ApsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for ApsError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
