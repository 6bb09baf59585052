use std::fmt;

use reqwest::Error as ReqwestError;

/// Hint appended to parse errors when Reddit answers with an HTML page.
pub const RATE_LIMIT_HINT: &str =
    "received HTML instead of JSON; the request quota may have been exceeded";

/// An application-level error reported by Reddit inside `json.errors`.
///
/// Wire shape is `[code, message]` or `[code, message, field]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} (field: {})", self.code, self.message, field),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

// Custom error type for everything that can go wrong talking to Reddit
#[derive(Debug, thiserror::Error)]
pub enum RedditClientError {
    #[error("Request error: {0}")]
    Request(#[from] ReqwestError),

    #[error("I/O error while reading response: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {source}{}; body: {raw}", rate_limit_suffix(.rate_limit_suspected))]
    Parse {
        raw: String,
        rate_limit_suspected: bool,
        #[source]
        source: serde_json::Error,
    },

    #[error("Server returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reddit API error: {}", join_api_errors(.0))]
    Api(Vec<ApiError>),

    #[error("Missing required field '{field}' for {variant}")]
    MissingField {
        field: &'static str,
        variant: &'static str,
    },

    #[error("Field '{field}' for {variant} is not a valid {expected}")]
    FieldType {
        field: &'static str,
        variant: &'static str,
        expected: &'static str,
    },

    #[error("Expected a thing of kind '{expected}', found '{found}'")]
    UnexpectedKind { expected: &'static str, found: String },

    #[error("Malformed submission response: {0}")]
    MalformedSubmission(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RedditClientError {
    /// True when a parse failure looked like an HTML page rather than JSON.
    pub fn is_rate_limit_suspected(&self) -> bool {
        matches!(
            self,
            RedditClientError::Parse {
                rate_limit_suspected: true,
                ..
            }
        )
    }
}

fn rate_limit_suffix(suspected: &bool) -> String {
    if *suspected {
        format!(" ({})", RATE_LIMIT_HINT)
    } else {
        String::new()
    }
}

fn join_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ApiError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, RedditClientError>;
