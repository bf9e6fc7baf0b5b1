//! Mock adapters for testing
//!
//! Each mock returns a scripted result and counts its invocations, so
//! tests can assert exactly how many remote calls a flow performed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::confirm::errors::{CredentialError, FeeError, SubmitError};
use crate::confirm::pin::PinTicket;
use crate::confirm::types::{
    Credentials, FeeQuote, FlowId, SubmissionReceipt, TransferDraft,
};
use super::traits::{CredentialProvider, FeeEstimator, PinGate, SubmissionExecutor};

fn test_credentials() -> Credentials {
    Credentials {
        session_token: "mock-token".to_string(),
        user_id: "u-mock".to_string(),
        token_expiration: Utc::now() + chrono::Duration::hours(1),
    }
}

/// Mock credential provider
pub struct MockCredentialProvider {
    result: Mutex<Result<Credentials, CredentialError>>,
    calls: AtomicU64,
}

impl MockCredentialProvider {
    pub fn ok() -> Self {
        Self {
            result: Mutex::new(Ok(test_credentials())),
            calls: AtomicU64::new(0),
        }
    }

    pub fn failing(err: CredentialError) -> Self {
        Self {
            result: Mutex::new(Err(err)),
            calls: AtomicU64::new(0),
        }
    }

    pub fn set_result(&self, result: Result<Credentials, CredentialError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CredentialProvider for MockCredentialProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.result.lock().unwrap().clone()
    }
}

/// Mock fee estimator
pub struct MockFeeEstimator {
    result: Mutex<Result<FeeQuote, FeeError>>,
    calls: AtomicU64,
}

impl MockFeeEstimator {
    pub fn quoting(fee: &str) -> Self {
        Self {
            result: Mutex::new(Ok(Self::quote_of(fee))),
            calls: AtomicU64::new(0),
        }
    }

    pub fn failing(err: FeeError) -> Self {
        Self {
            result: Mutex::new(Err(err)),
            calls: AtomicU64::new(0),
        }
    }

    pub fn quote_of(fee: &str) -> FeeQuote {
        FeeQuote {
            fee_amount: fee.parse::<Decimal>().expect("bad fee literal"),
            currency: "CVE".to_string(),
            computed_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn set_result(&self, result: Result<FeeQuote, FeeError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeeEstimator for MockFeeEstimator {
    async fn quote(
        &self,
        draft: &TransferDraft,
        _credentials: &Credentials,
    ) -> Result<FeeQuote, FeeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "[mock-fee] quote(amount={}, wallet={})",
            draft.amount,
            draft.source_wallet_id
        );
        self.result.lock().unwrap().clone()
    }
}

/// Mock submission executor
pub struct MockSubmissionExecutor {
    result: Mutex<Result<Option<SubmissionReceipt>, SubmitError>>,
    calls: AtomicU64,
}

impl MockSubmissionExecutor {
    pub fn succeeding(receipt: Option<SubmissionReceipt>) -> Self {
        Self {
            result: Mutex::new(Ok(receipt)),
            calls: AtomicU64::new(0),
        }
    }

    pub fn failing(err: SubmitError) -> Self {
        Self {
            result: Mutex::new(Err(err)),
            calls: AtomicU64::new(0),
        }
    }

    pub fn set_result(&self, result: Result<Option<SubmissionReceipt>, SubmitError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SubmissionExecutor for MockSubmissionExecutor {
    async fn submit(
        &self,
        draft: &TransferDraft,
        quote: &FeeQuote,
        _credentials: &Credentials,
    ) -> Result<Option<SubmissionReceipt>, SubmitError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "[mock-executor] submit(amount={}, fee={})",
            draft.amount,
            quote.fee_amount
        );
        self.result.lock().unwrap().clone()
    }
}

/// What the mock gate does with each ticket it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateScript {
    Approve,
    Decline,
    /// Drop the ticket without deciding (user backed out)
    Abandon,
}

/// Mock PIN gate
pub struct MockPinGate {
    script: Mutex<GateScript>,
    handoffs: AtomicU64,
}

impl MockPinGate {
    pub fn scripted(script: GateScript) -> Self {
        Self {
            script: Mutex::new(script),
            handoffs: AtomicU64::new(0),
        }
    }

    pub fn set_script(&self, script: GateScript) {
        *self.script.lock().unwrap() = script;
    }

    pub fn handoffs(&self) -> u64 {
        self.handoffs.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PinGate for MockPinGate {
    async fn verify(&self, flow_id: FlowId, ticket: PinTicket) {
        self.handoffs.fetch_add(1, Ordering::Relaxed);
        let script = *self.script.lock().unwrap();
        log::debug!("[mock-pin] verify(flow={}) -> {:?}", flow_id, script);
        match script {
            GateScript::Approve => ticket.approve(),
            GateScript::Decline => ticket.decline(),
            GateScript::Abandon => drop(ticket),
        }
    }
}
