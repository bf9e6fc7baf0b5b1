// Error taxonomy for the confirm-transfer flow
use std::fmt;

/// Credential provider failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No stored session at all
    Missing,
    /// Stored session exists but cannot be parsed
    Malformed(String),
    /// Session exists but the token expiry has passed
    Expired,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "No session found"),
            Self::Malformed(msg) => write!(f, "Stored session is malformed: {}", msg),
            Self::Expired => write!(f, "Session expired"),
        }
    }
}

impl std::error::Error for CredentialError {}

impl CredentialError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Missing => "SESSION_MISSING",
            Self::Malformed(_) => "SESSION_MALFORMED",
            Self::Expired => "SESSION_EXPIRED",
        }
    }

    /// Whether the shell should route to sign-in instead of a bare retry.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::Expired | Self::Missing)
    }

    /// Single human-readable string shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Missing | Self::Expired => {
                "Your session has ended. Please sign in again.".to_string()
            }
            Self::Malformed(_) => "Could not read your session. Please sign in again.".to_string(),
        }
    }
}

/// Fee estimator failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// Transport-level failure, safe to retry via refresh
    Network(String),
    /// Business rejection with a backend-supplied message
    Rejected(String),
    /// Credentials rejected by the fee service
    Unauthorized,
}

impl fmt::Display for FeeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Fee request failed: {}", msg),
            Self::Rejected(msg) => write!(f, "Fee rejected: {}", msg),
            Self::Unauthorized => write!(f, "Fee request unauthorized"),
        }
    }
}

impl std::error::Error for FeeError {}

impl FeeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "FEE_NETWORK_ERROR",
            Self::Rejected(_) => "FEE_REJECTED",
            Self::Unauthorized => "FEE_UNAUTHORIZED",
        }
    }

    pub fn needs_reauth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not load the transfer fee. Pull to retry.".to_string(),
            Self::Rejected(msg) => msg.clone(),
            Self::Unauthorized => "Your session has ended. Please sign in again.".to_string(),
        }
    }
}

/// Submission executor failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Transport-level failure; the user may re-trigger PIN verification
    Network(String),
    /// Business rejection with a backend-supplied message
    Rejected(String),
    /// No credentials were captured before the PIN handoff.
    /// Programming-invariant violation: fail fast, no network call.
    AuthMissing,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Transfer submission failed: {}", msg),
            Self::Rejected(msg) => write!(f, "Transfer rejected: {}", msg),
            Self::AuthMissing => write!(f, "Submission attempted without captured credentials"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl SubmitError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "SUBMIT_NETWORK_ERROR",
            Self::Rejected(_) => "SUBMIT_REJECTED",
            Self::AuthMissing => "SUBMIT_AUTH_MISSING",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not send the transfer. Please try again.".to_string(),
            Self::Rejected(msg) => msg.clone(),
            Self::AuthMissing => "Something went wrong. Please sign in and try again.".to_string(),
        }
    }
}

/// What the coordinator records when a step fails: one message for the
/// alert, plus whether the shell should route to re-authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFailure {
    pub message: String,
    pub needs_reauth: bool,
}

impl FlowFailure {
    pub fn from_credential(err: &CredentialError) -> Self {
        Self {
            message: err.user_message(),
            needs_reauth: err.needs_reauth(),
        }
    }

    pub fn from_fee(err: &FeeError) -> Self {
        Self {
            message: err.user_message(),
            needs_reauth: err.needs_reauth(),
        }
    }

    pub fn from_submit(err: &SubmitError) -> Self {
        Self {
            message: err.user_message(),
            needs_reauth: false,
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            needs_reauth: false,
        }
    }
}
