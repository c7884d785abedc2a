use crate::linkage::domain::{DateColumns, PRIMARY_DATE_COLUMN, SECONDARY_DATE_COLUMN};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub merge: MergeConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("MERGE_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let output_path = non_blank("MERGE_OUTPUT", "merged.csv")?;
        let primary_date_column = non_blank("MERGE_PRIMARY_DATE_COLUMN", PRIMARY_DATE_COLUMN)?;
        let secondary_date_column =
            non_blank("MERGE_SECONDARY_DATE_COLUMN", SECONDARY_DATE_COLUMN)?;

        let log_level = env::var("MERGE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            merge: MergeConfig {
                output_path: PathBuf::from(output_path),
                date_columns: DateColumns {
                    primary: primary_date_column,
                    secondary: secondary_date_column,
                },
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_blank(key: &'static str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Blank { key }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default.to_string()),
    }
}

/// Where the merged file goes and which columns carry the dates.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub output_path: PathBuf,
    pub date_columns: DateColumns,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Blank { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Blank { key } => write!(f, "{key} must not be blank when set"),
        }
    }
}

impl std::error::Error for ConfigError {}
