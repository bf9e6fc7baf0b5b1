//! Core types for the confirm-transfer flow
//!
//! This module defines the fundamental types passed between the coordinator
//! and its adapters, plus the wire types for the fee and submission calls.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flow instance ID - one per activation of the confirmation screen
///
/// Doubles as the correlation id for the PIN handoff, so a late PIN
/// decision can always be matched to the flow that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(Uuid);

impl FlowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FlowId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable description of the intended transfer
///
/// Created once when the user finishes the preceding form screen and
/// never mutated by the coordinator; a flow instance owns exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDraft {
    /// Sender full name
    pub sender_name: String,
    /// Amount in the source wallet's currency
    pub amount: Decimal,
    /// Wallet the funds leave from
    pub source_wallet_id: String,
    /// Backend transfer-type discriminator
    pub transfer_type_id: u32,
    /// Recipient full name
    pub recipient_name: String,
    /// Recipient location (city / pickup point)
    pub recipient_location: String,
    /// Recipient identity document number
    pub recipient_document: String,
    /// Free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TransferDraft {
    /// Validate the fields the fee estimator depends on.
    ///
    /// Returns the first violation as a human-readable message.
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("Amount must be greater than 0, got {}", self.amount));
        }
        if self.source_wallet_id.trim().is_empty() {
            return Err("Source wallet is required".to_string());
        }
        Ok(())
    }
}

/// Session credentials, treated as a capability
///
/// Obtained fresh at flow entry and again on every refresh; the
/// coordinator never caches them across flow instances.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub session_token: String,
    pub user_id: String,
    pub token_expiration: DateTime<Utc>,
}

impl Credentials {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expiration <= now
    }
}

/// One fee computation, valid for the currently displayed draft
///
/// Superseded wholesale by each new fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee_amount: Decimal,
    pub currency: String,
    /// When the quote was computed (ms since epoch)
    pub computed_at: i64,
}

/// Backend confirmation artifact for a successfully created transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub confirmation_code: String,
    pub final_fee: Decimal,
    pub final_total: Decimal,
}

/// Parameters forwarded to the result screen on the Submitted transition
#[derive(Debug, Clone)]
pub struct ResultScreenParams {
    pub message: String,
    /// None when the backend acknowledged without receipt fields
    pub receipt: Option<SubmissionReceipt>,
}

// ===== Wire types for the two remote calls =====

/// Read-only fee request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    pub user_id: String,
    pub amount: Decimal,
    pub source_wallet_id: String,
    pub transfer_type_id: u32,
}

impl FeeRequest {
    pub fn from_draft(draft: &TransferDraft, credentials: &Credentials) -> Self {
        Self {
            user_id: credentials.user_id.clone(),
            amount: draft.amount,
            source_wallet_id: draft.source_wallet_id.clone(),
            transfer_type_id: draft.transfer_type_id,
        }
    }
}

/// Fee response body: an application status code plus either a fee or a message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeResponse {
    pub status: u16,
    pub total_fees: Option<Decimal>,
    pub currency: Option<String>,
    pub message: Option<String>,
}

/// Write request carrying the full draft plus the accepted fee
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(flatten)]
    pub draft: TransferDraft,
    pub user_id: String,
    pub accepted_fee: Decimal,
}

impl SubmitRequest {
    pub fn new(draft: &TransferDraft, quote: &FeeQuote, credentials: &Credentials) -> Self {
        Self {
            draft: draft.clone(),
            user_id: credentials.user_id.clone(),
            accepted_fee: quote.fee_amount,
        }
    }
}

/// Submission response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub status: u16,
    pub confirmation_code: Option<String>,
    pub fees: Option<Decimal>,
    pub total: Option<Decimal>,
    pub message: Option<String>,
}

impl SubmitResponse {
    /// Extract the receipt, if the backend returned all its fields.
    pub fn receipt(&self) -> Option<SubmissionReceipt> {
        Some(SubmissionReceipt {
            confirmation_code: self.confirmation_code.clone()?,
            final_fee: self.fees?,
            final_total: self.total?,
        })
    }
}
