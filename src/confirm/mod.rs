//! Confirm module - main module file
//!
//! This module provides the confirm-transfer flow: an FSM-owning
//! coordinator, the adapter boundaries it talks through, and the one-shot
//! PIN handoff primitives.

pub mod state;
pub mod types;
pub mod errors;
pub mod pin;
pub mod coordinator;
pub mod adapters;

// Re-export commonly used types
pub use state::{transition, FlowEvent, FlowState};
pub use types::{
    Credentials, FeeQuote, FlowId, ResultScreenParams, SubmissionReceipt, TransferDraft,
};
pub use errors::{CredentialError, FeeError, FlowFailure, SubmitError};
pub use pin::{PinDecision, PinReceiver, PinTicket};
pub use coordinator::ConfirmationCoordinator;
pub use adapters::{CredentialProvider, FeeEstimator, PinGate, SubmissionExecutor};
