use thiserror::Error;

/// Core error types for fwctl
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed invocation, resolved by printing usage
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// HTTP transport failed (connect, TLS, timeout, client construction)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (API URL, token)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Invocation-shape errors detected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("no arguments given")]
    MissingArguments,

    #[error("expected 3 arguments, found {found}")]
    WrongArity { found: usize },

    #[error("service id must be an integer, got '{0}'")]
    InvalidServiceId(String),

    #[error("action must not be numeric, got '{0}'")]
    NumericAction(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Builds the message shown for a fatal error at the top level.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Usage(usage) => ErrorTranslation::new(format!("Invalid command: {usage}"))
                .with_suggestion("Run 'fwctl firewall --help' for usage"),
            Error::Http(http) if http.is_timeout() => {
                ErrorTranslation::new("The firewall API did not respond in time")
                    .with_suggestion("Check your network connection")
                    .with_suggestion("Raise timeout_secs in the config file (max 300)")
            }
            Error::Http(http) if http.is_connect() => {
                ErrorTranslation::new("Could not connect to the firewall API")
                    .with_suggestion("Check the API URL (--api-url or FWCTL_API_URL)")
                    .with_suggestion("Verify your network or proxy settings")
            }
            Error::Http(http) => ControlPlaneErrorPattern::match_error(&http.to_string()),
            Error::Serialization(_) => {
                ErrorTranslation::new("The firewall API returned an unexpected response")
                    .with_suggestion("Make sure --api-url points at the control-plane API")
                    .with_suggestion("Re-run with -vv to log the request")
            }
            Error::Config(msg) => ErrorTranslation::new(format!("Invalid configuration: {msg}"))
                .with_suggestion(config_location_hint()),
            Error::Io(io) => ControlPlaneErrorPattern::match_error(&io.to_string()),
        }
    }
}

fn config_location_hint() -> String {
    match crate::utils::get_config_dir() {
        Some(dir) => format!("Check {}", dir.join("config.json").display()),
        None => "Pass --api-url and --token explicitly".to_string(),
    }
}

/// Database of transport error patterns and their translations
pub struct ControlPlaneErrorPattern;

impl ControlPlaneErrorPattern {
    /// Matches an error message against known patterns and returns a user-friendly translation.
    pub fn match_error(msg: &str) -> ErrorTranslation {
        let lower = msg.to_lowercase();

        if lower.contains("401") || lower.contains("unauthorized") {
            return ErrorTranslation::new("The firewall API rejected your credentials")
                .with_suggestion("Set a valid token with --token or FWCTL_API_TOKEN")
                .with_suggestion("Tokens may expire; generate a new one in the dashboard");
        }

        if lower.contains("403") || lower.contains("forbidden") {
            return ErrorTranslation::new("Your token is not allowed to manage this firewall")
                .with_suggestion("Check that the service belongs to your account");
        }

        if lower.contains("certificate") || lower.contains("tls") {
            return ErrorTranslation::new("TLS handshake with the firewall API failed")
                .with_suggestion("Check that the API URL uses the correct host")
                .with_suggestion("Verify the system clock is correct");
        }

        if lower.contains("dns") || lower.contains("resolve") {
            return ErrorTranslation::new("Could not resolve the firewall API host")
                .with_suggestion("Check the API URL for typos")
                .with_suggestion("Verify your DNS settings");
        }

        if lower.contains("timeout") || lower.contains("timed out") {
            return ErrorTranslation::new("Operation timed out")
                .with_suggestion("Try again in a moment");
        }

        if lower.contains("permission denied") {
            return ErrorTranslation::new("Permission denied while reading local files")
                .with_suggestion(config_location_hint());
        }

        // Generic fallback
        ErrorTranslation::new(format!("Firewall request failed: {msg}"))
            .with_suggestion("Re-run with -vv for details")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
