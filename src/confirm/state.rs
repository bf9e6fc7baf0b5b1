//! Confirmation Flow State Machine
//!
//! Defines the FSM states, events, and transition function for the
//! confirm-transfer screen flow.

use serde::{Deserialize, Serialize};

/// Flow FSM states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    /// Flow entered, acquiring credentials
    Initializing,
    /// Credentials in hand, waiting for fee quote
    FetchingFee,
    /// Quote in hand, submission enabled
    FeeReady,
    /// Credential or quote fetch failed, submission disabled
    FeeFailed,
    /// PIN handoff or executor call in flight
    Submitting,
    /// Transfer created, receipt handed off ✅
    Submitted,
    /// Executor call failed, submission re-enabled ❌
    SubmitFailed,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Initializing => "initializing",
            FlowState::FetchingFee => "fetching_fee",
            FlowState::FeeReady => "fee_ready",
            FlowState::FeeFailed => "fee_failed",
            FlowState::Submitting => "submitting",
            FlowState::Submitted => "submitted",
            FlowState::SubmitFailed => "submit_failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "initializing" => Some(FlowState::Initializing),
            "fetching_fee" => Some(FlowState::FetchingFee),
            "fee_ready" => Some(FlowState::FeeReady),
            "fee_failed" => Some(FlowState::FeeFailed),
            "submitting" => Some(FlowState::Submitting),
            "submitted" => Some(FlowState::Submitted),
            "submit_failed" => Some(FlowState::SubmitFailed),
            _ => None,
        }
    }

    /// Check if this is a terminal state (flow instance is done, screen navigates away)
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Submitted)
    }

    /// Single derived flag for the spinner / processing indicator.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FlowState::Initializing | FlowState::FetchingFee | FlowState::Submitting
        )
    }

    /// Single derived gate for the submit affordance.
    ///
    /// Disabled whenever the fee is loading, the fee fetch failed, or a
    /// submission is in flight - one OR'd condition, derived from one
    /// value, so the three cases can never drift apart. A failed
    /// submission keeps its quote and may be re-triggered.
    pub fn submit_enabled(&self) -> bool {
        matches!(self, FlowState::FeeReady | FlowState::SubmitFailed)
    }
}

/// FSM Events (inputs that trigger state transitions)
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// Credential provider returned credentials
    CredentialsOk,
    /// Credential provider failed
    CredentialsFail,
    /// Fee estimator returned a quote
    QuoteOk,
    /// Fee estimator failed
    QuoteFail,
    /// User pressed submit, PIN handoff begins
    SubmitRequested,
    /// PIN gate declined (or was abandoned)
    PinDeclined,
    /// Submission executor returned a receipt
    ExecutorOk,
    /// Submission executor failed
    ExecutorFail,
    /// User pulled to refresh
    Refresh,
}

/// State transition function
///
/// Given the current state and an event, returns the next state.
/// Invalid transitions return the current state (no change).
pub fn transition(current: FlowState, event: FlowEvent) -> FlowState {
    use FlowEvent::*;
    use FlowState::*;

    // Submitted is terminal - stable under every event
    if current.is_terminal() {
        return current;
    }

    match (current, event) {
        // From Initializing
        (Initializing, CredentialsOk) => FetchingFee,
        (Initializing, CredentialsFail) => FeeFailed,

        // From FetchingFee
        (FetchingFee, QuoteOk) => FeeReady,
        (FetchingFee, QuoteFail) => FeeFailed,

        // From FeeReady (and from a failed submission, retrying with the
        // same draft and fee through a fresh PIN approval)
        (FeeReady, SubmitRequested) => Submitting,
        (SubmitFailed, SubmitRequested) => Submitting,

        // From Submitting
        (Submitting, PinDeclined) => FeeReady,
        (Submitting, ExecutorOk) => Submitted,
        (Submitting, ExecutorFail) => SubmitFailed,

        // Pull-to-refresh re-enters the flow from any non-terminal state
        (_, Refresh) => Initializing,

        // Invalid transitions - stay in current state
        _ => current,
    }
}
