//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Missing Preconditions
    // ─────────────────────────────────────────────────────────────
    #[error("You need to be signed in to {action}")]
    NotSignedIn { action: String },

    #[error("No strategy plan yet. Generate a strategy first.")]
    NoStrategyPlan,

    #[error("Insufficient credits: {action} costs {required}, {available} available")]
    InsufficientCredits {
        action: String,
        required: u32,
        available: u32,
    },

    #[error("{feature} requires the {tier} plan")]
    UpgradeRequired { feature: String, tier: String },

    #[error("Free export limit reached ({used}/{limit}). Upgrade to export more.")]
    ExportLimitReached { used: u32, limit: u32 },

    #[error("Invalid strategy configuration: {message}")]
    InvalidConfig { message: String },

    // ─────────────────────────────────────────────────────────────
    // Operation Failures
    // ─────────────────────────────────────────────────────────────
    #[error("{operation} failed: {message}")]
    Service { operation: String, message: String },

    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    #[error("Plan changed while {target} was being regenerated")]
    Conflict { target: String },

    #[error("No {kind} at position {index}")]
    ItemNotFound { kind: String, index: usize },

    #[error("Expected a {expected} but got a {actual}")]
    ItemKindMismatch { expected: String, actual: String },

    #[error("Unknown template: {id}")]
    TemplateNotFound { id: String },

    #[error("Unknown credit reservation: {id}")]
    ReservationNotFound { id: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration/Storage Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error at {path}: {message}")]
    Storage { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn not_signed_in(action: impl Into<String>) -> Self {
        Self::NotSignedIn {
            action: action.into(),
        }
    }

    pub fn upgrade_required(feature: impl Into<String>, tier: impl Into<String>) -> Self {
        Self::UpgradeRequired {
            feature: feature.into(),
            tier: tier.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn service(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            secs,
        }
    }

    pub fn conflict(target: impl Into<String>) -> Self {
        Self::Conflict {
            target: target.into(),
        }
    }

    pub fn item_not_found(kind: impl Into<String>, index: usize) -> Self {
        Self::ItemNotFound {
            kind: kind.into(),
            index,
        }
    }

    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// A missing precondition: the user can fix it (sign in, generate,
    /// buy credits, upgrade) and nothing was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NotSignedIn { .. }
                | Error::NoStrategyPlan
                | Error::InsufficientCredits { .. }
                | Error::UpgradeRequired { .. }
                | Error::ExportLimitReached { .. }
                | Error::InvalidConfig { .. }
        )
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        self.is_precondition()
            || matches!(
                self,
                Error::Service { .. }
                    | Error::Timeout { .. }
                    | Error::Conflict { .. }
                    | Error::ItemNotFound { .. }
                    | Error::ItemKindMismatch { .. }
                    | Error::TemplateNotFound { .. }
                    | Error::ChannelSend { .. }
            )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Terminal { .. } | Error::ChannelClosed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::service("Regenerate goal", "upstream returned 502");
        assert_eq!(
            err.to_string(),
            "Regenerate goal failed: upstream returned 502"
        );

        let err = Error::NoStrategyPlan;
        assert!(err.to_string().contains("Generate a strategy first"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_precondition_errors() {
        assert!(Error::NoStrategyPlan.is_precondition());
        assert!(Error::not_signed_in("save").is_precondition());
        assert!(Error::InsufficientCredits {
            action: "regenerate".to_string(),
            required: 1,
            available: 0,
        }
        .is_precondition());
        assert!(Error::ExportLimitReached { used: 5, limit: 5 }.is_precondition());
        assert!(Error::upgrade_required("Template", "ultimate").is_precondition());
    }

    #[test]
    fn test_operation_failures_are_not_preconditions() {
        assert!(!Error::service("save", "boom").is_precondition());
        assert!(!Error::timeout("generate", 120).is_precondition());
        assert!(!Error::conflict("pillar 2").is_precondition());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::service("save", "boom").is_recoverable());
        assert!(Error::NoStrategyPlan.is_recoverable());
        assert!(!Error::ChannelClosed.is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::terminal("init failed").is_fatal());
        assert!(Error::ChannelClosed.is_fatal());
        assert!(!Error::NoStrategyPlan.is_fatal());
    }

    #[test]
    fn test_insufficient_credits_message() {
        let err = Error::InsufficientCredits {
            action: "regenerate".to_string(),
            required: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient credits: regenerate costs 2, 1 available"
        );
    }

    #[test]
    fn test_storage_error_includes_path() {
        let err = Error::storage("/tmp/store.json", "locked");
        assert!(err.to_string().contains("/tmp/store.json"));
    }
}
