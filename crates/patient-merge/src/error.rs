use crate::config::ConfigError;
use crate::linkage::LinkageError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Linkage(LinkageError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Linkage(err) if err.is_configuration() => {
                write!(f, "configuration error: {}", err)
            }
            AppError::Linkage(err) => write!(f, "merge error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Linkage(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<LinkageError> for AppError {
    fn from(value: LinkageError) -> Self {
        Self::Linkage(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkage::DatasetRole;

    #[test]
    fn missing_column_reads_as_configuration_error() {
        let error = AppError::from(LinkageError::MissingColumn {
            role: DatasetRole::Secondary,
            column: "Last Visit in Neuro".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "configuration error: secondary file must have a 'Last Visit in Neuro' column"
        );
    }

    #[test]
    fn other_linkage_failures_read_as_merge_errors() {
        let error = AppError::from(LinkageError::RaggedRow {
            role: DatasetRole::Primary,
            line: 4,
            expected: 3,
            found: 5,
        });
        assert_eq!(
            error.to_string(),
            "merge error: primary file line 4 has 5 fields, expected at most 3"
        );
    }
}
