use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Missing input: {field} must not be empty")]
    MissingInput { field: &'static str },

    #[error("Invalid service name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid port '{value}': must be a non-negative integer")]
    InvalidPort { value: String },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Archive is corrupt or unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive entry '{name}' escapes the extraction directory")]
    UnsafeArchiveEntry { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed template: {reason}")]
    Template { reason: String },

    #[error("Expected exactly one top-level entry in {}, found {found}", .root.display())]
    AmbiguousArchiveLayout { root: PathBuf, found: usize },

    #[error("Failed to transform {}: {source}", .path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: Box<ScaffoldError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad service parameters, fixable by re-entering them.
    Input,
    /// Network or filesystem trouble, usually fixed by re-running.
    Environment,
    /// The template project itself is broken.
    Template,
    /// The archive does not have the expected shape.
    Layout,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScaffoldError {
    pub fn template(reason: impl Into<String>) -> Self {
        Self::Template {
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Annotates an error raised while processing `path` during the tree walk.
    pub fn at_path(path: impl Into<PathBuf>, source: ScaffoldError) -> Self {
        Self::Transform {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Unwraps `Transform` annotations down to the underlying failure.
    pub fn root_cause(&self) -> &ScaffoldError {
        match self {
            Self::Transform { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transform { source, .. } => source.category(),
            Self::MissingInput { .. } | Self::InvalidName { .. } | Self::InvalidPort { .. } => {
                ErrorCategory::Input
            }
            Self::Network(_)
            | Self::HttpStatus { .. }
            | Self::Archive(_)
            | Self::UnsafeArchiveEntry { .. }
            | Self::Io(_) => ErrorCategory::Environment,
            Self::Template { .. } => ErrorCategory::Template,
            Self::AmbiguousArchiveLayout { .. } => ErrorCategory::Layout,
            Self::Config { .. } | Self::InvalidConfigValue { .. } | Self::Serialization(_) => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Environment => ErrorSeverity::Medium,
            ErrorCategory::Template | ErrorCategory::Layout => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Transform { source, .. } => source.recovery_suggestion(),
            Self::MissingInput { .. } => "Provide a value for every prompt or flag",
            Self::InvalidName { .. } => {
                "Use a hyphen-separated service name such as 'destination-basic'"
            }
            Self::InvalidPort { .. } => "Enter the port as digits only, e.g. 9201",
            Self::Network(_) | Self::HttpStatus { .. } => {
                "Check the template source and your network connection, then re-run"
            }
            Self::Archive(_) | Self::UnsafeArchiveEntry { .. } => {
                "The downloaded archive could not be unpacked; re-run or pick another template"
            }
            Self::Io(_) => "Check disk space and permissions on the bootstrap and output directories",
            Self::Template { .. } => "The template project contains a malformed placeholder; report it to its maintainers",
            Self::AmbiguousArchiveLayout { .. } => {
                "Template archives must contain a single top-level directory"
            }
            Self::Config { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the command-line arguments or the settings file"
            }
            Self::Serialization(_) => "Re-run with --verbose and report the output",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transform { path, source } => format!(
                "Could not render {}: {}",
                path.display(),
                source.user_friendly_message()
            ),
            Self::Network(e) if e.is_connect() => "Could not reach the template host".to_string(),
            Self::Network(e) if e.is_timeout() => "Timed out downloading the template".to_string(),
            other => other.to_string(),
        }
    }
}
