use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Malformed price attribute: {value:?}")]
    MalformedPriceError { value: Option<String> },

    #[error("Invalid selector `{selector}`: {reason}")]
    SelectorError { selector: String, reason: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScanError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScanError::MalformedPriceError { .. } => ErrorSeverity::Low,
            ScanError::HttpError(_) | ScanError::HttpStatusError { .. } => ErrorSeverity::Medium,
            ScanError::CsvError(_)
            | ScanError::SerializationError(_)
            | ScanError::UrlError(_)
            | ScanError::SelectorError { .. } => ErrorSeverity::High,
            ScanError::ConfigValidationError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::MissingConfigError { .. } => ErrorSeverity::High,
            ScanError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScanError::HttpError(_) | ScanError::HttpStatusError { .. } => {
                "Check network connectivity and that the search URL is reachable".to_string()
            }
            ScanError::MalformedPriceError { .. } => {
                "Check the price attribute name in the [selectors] section".to_string()
            }
            ScanError::SelectorError { selector, .. } => {
                format!("Fix the CSS selector `{}`", selector)
            }
            ScanError::UrlError(_) => "Use an absolute http(s) URL".to_string(),
            ScanError::ConfigValidationError { field, .. }
            | ScanError::InvalidConfigValueError { field, .. }
            | ScanError::MissingConfigError { field } => {
                format!("Review the `{}` setting", field)
            }
            ScanError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            ScanError::CsvError(_) | ScanError::SerializationError(_) => {
                "Re-run with --verbose to inspect the report data".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScanError::HttpError(_) | ScanError::HttpStatusError { .. } => {
                format!("Could not load the marketplace page: {}", self)
            }
            ScanError::ConfigValidationError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::SelectorError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
