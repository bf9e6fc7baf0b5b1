//! Adapter traits for the confirm-transfer flow
//!
//! The coordinator only ever talks to these four boundaries. Production
//! implementations live in `http.rs` / `stored.rs`; tests use `mock.rs`.

use async_trait::async_trait;

use crate::confirm::errors::{CredentialError, FeeError, SubmitError};
use crate::confirm::pin::PinTicket;
use crate::confirm::types::{Credentials, FeeQuote, FlowId, SubmissionReceipt, TransferDraft};

/// Opaque credential provider (token storage lives behind it)
///
/// MUST be idempotent and side-effect-free from the coordinator's
/// perspective; it is called once at flow entry and again on every
/// manual refresh, and its results are never cached across calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get_credentials(&self) -> Result<Credentials, CredentialError>;
}

/// Fee estimator boundary
///
/// Read-only: must not mutate the draft. Credential expiry is checked by
/// the callee, not pre-validated by the coordinator.
#[async_trait]
pub trait FeeEstimator: Send + Sync {
    /// Compute the fee for `draft`.
    ///
    /// Returns:
    /// - Ok(quote): supersedes any previous quote wholesale
    /// - Err(Network): safe to retry via refresh
    /// - Err(Rejected): business refusal, carries the display message
    /// - Err(Unauthorized): signal to re-acquire credentials
    async fn quote(
        &self,
        draft: &TransferDraft,
        credentials: &Credentials,
    ) -> Result<FeeQuote, FeeError>;
}

/// Submission executor boundary
///
/// One-shot create-transfer call. Never retried internally: a failure
/// returns control to the user, and a new attempt goes through a fresh
/// PIN approval.
#[async_trait]
pub trait SubmissionExecutor: Send + Sync {
    /// Ok(None) means the backend acknowledged without receipt fields.
    async fn submit(
        &self,
        draft: &TransferDraft,
        quote: &FeeQuote,
        credentials: &Credentials,
    ) -> Result<Option<SubmissionReceipt>, SubmitError>;
}

/// Interactive PIN verification boundary
///
/// The gate MUST consume the ticket: settle it with `approve()` or
/// `decline()`, or drop it, which the flow reads as abandonment.
#[async_trait]
pub trait PinGate: Send + Sync {
    async fn verify(&self, flow_id: FlowId, ticket: PinTicket);
}
