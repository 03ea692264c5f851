use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{provider} responded with HTTP {status} for {url}")]
    HttpStatus {
        provider: String,
        status: u16,
        url: String,
    },

    #[error("{provider} page {page} is missing field '{field}'")]
    MalformedPage {
        provider: String,
        page: u64,
        field: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing credential '{name}' for {provider}")]
    MissingCredential { provider: String, name: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::MalformedPage { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::MissingCredential { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "The vacancy API did not answer in time".to_string(),
            Self::ApiError(_) => "Could not reach the vacancy API".to_string(),
            Self::HttpStatus {
                provider, status, ..
            } => format!("{} rejected the request (HTTP {})", provider, status),
            Self::MalformedPage {
                provider, field, ..
            } => format!("{} returned an unexpected response (no '{}')", provider, field),
            Self::MissingCredential { provider, name } => {
                format!("{} needs an API key in {}", provider, name)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check your network connection or raise timeout_seconds",
            Self::HttpStatus { status, .. } if *status == 401 || *status == 403 => {
                "Check that the API key is valid"
            }
            Self::HttpStatus { .. } => "Retry later or lower max_pages to stay within the API limits",
            Self::MalformedPage { .. } => "Check that the provider endpoint points at the vacancy search API",
            Self::MissingCredential { .. } => "Set SJ_KEY in the environment or in a .env file",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            Self::CsvError(_) | Self::SerializationError(_) | Self::IoError(_) => {
                "Check that the output path is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
