//! Confirmation Coordinator
//!
//! Orchestrates the confirm-transfer flow: credential fetch, fee quote,
//! PIN handoff, one-shot submission. Owns the screen-level FSM; every UI
//! affordance (spinner, submit gate, alert) is derived from it.

use std::sync::Arc;

use crate::confirm::adapters::{CredentialProvider, FeeEstimator, PinGate, SubmissionExecutor};
use crate::confirm::errors::{FlowFailure, SubmitError};
use crate::confirm::pin::{PinDecision, PinTicket};
use crate::confirm::state::{transition, FlowEvent, FlowState};
use crate::confirm::types::{
    Credentials, FeeQuote, FlowId, ResultScreenParams, TransferDraft,
};

const SUBMITTED_MESSAGE: &str = "Your transfer was created successfully";

/// Confirmation Coordinator - one instance per activation of the screen
///
/// All operations take `&mut self`: the exclusive borrow is the
/// single-UI-queue model, so no two coordinator operations ever overlap
/// and an outstanding submission can never race a second one.
pub struct ConfirmationCoordinator {
    flow_id: FlowId,
    draft: TransferDraft,
    credentials_provider: Arc<dyn CredentialProvider>,
    fee_estimator: Arc<dyn FeeEstimator>,
    executor: Arc<dyn SubmissionExecutor>,

    state: FlowState,
    credentials: Option<Credentials>,
    quote: Option<FeeQuote>,
    failure: Option<FlowFailure>,
    result: Option<ResultScreenParams>,
}

impl ConfirmationCoordinator {
    pub fn new(
        draft: TransferDraft,
        credentials_provider: Arc<dyn CredentialProvider>,
        fee_estimator: Arc<dyn FeeEstimator>,
        executor: Arc<dyn SubmissionExecutor>,
    ) -> Self {
        Self {
            flow_id: FlowId::new(),
            draft,
            credentials_provider,
            fee_estimator,
            executor,
            state: FlowState::Initializing,
            credentials: None,
            quote: None,
            failure: None,
            result: None,
        }
    }

    /// Run flow entry: acquire credentials, then fetch the fee quote.
    /// Returns the state the flow landed in.
    pub async fn enter(&mut self) -> FlowState {
        if self.state.is_terminal() {
            return self.state;
        }

        self.state = FlowState::Initializing;
        self.failure = None;

        // Credentials are fetched fresh every entry, never cached across flows
        match self.credentials_provider.get_credentials().await {
            Ok(credentials) => {
                log::debug!("flow {}: credentials for user {}", self.flow_id, credentials.user_id);
                self.credentials = Some(credentials);
                self.apply(FlowEvent::CredentialsOk);
            }
            Err(e) => {
                log::warn!("flow {}: credential fetch failed: {}", self.flow_id, e);
                self.credentials = None;
                self.quote = None;
                self.failure = Some(FlowFailure::from_credential(&e));
                self.apply(FlowEvent::CredentialsFail);
                return self.state;
            }
        }

        self.fetch_quote().await;
        self.state
    }

    /// Pull-to-refresh: re-run entry from any non-terminal state.
    /// The draft is owned by the flow instance and is never cleared.
    pub async fn refresh(&mut self) -> FlowState {
        if self.state.is_terminal() {
            log::debug!("flow {}: refresh ignored, flow already submitted", self.flow_id);
            return self.state;
        }
        self.apply(FlowEvent::Refresh);
        self.enter().await
    }

    /// Fetch a fee quote for the current draft. Each success supersedes
    /// the previous quote wholesale; each failure clears it.
    async fn fetch_quote(&mut self) {
        // Local validation first: a draft the estimator would refuse
        // never leaves the device.
        if let Err(msg) = self.draft.validate() {
            log::warn!("flow {}: invalid draft: {}", self.flow_id, msg);
            self.quote = None;
            self.failure = Some(FlowFailure::local(msg));
            self.apply(FlowEvent::QuoteFail);
            return;
        }

        // enter() only reaches this point with credentials in hand
        let credentials = match &self.credentials {
            Some(c) => c.clone(),
            None => return,
        };

        match self.fee_estimator.quote(&self.draft, &credentials).await {
            Ok(quote) => {
                log::info!(
                    "flow {}: fee {} {} for amount {}",
                    self.flow_id,
                    quote.fee_amount,
                    quote.currency,
                    self.draft.amount
                );
                self.quote = Some(quote);
                self.apply(FlowEvent::QuoteOk);
            }
            Err(e) => {
                log::warn!("flow {}: fee quote failed: {}", self.flow_id, e);
                self.quote = None;
                self.failure = Some(FlowFailure::from_fee(&e));
                self.apply(FlowEvent::QuoteFail);
            }
        }
    }

    /// User pressed submit: hand off to the PIN gate, then perform at most
    /// one executor call for this approval.
    ///
    /// Ignored unless the submit gate is open (FeeReady, or SubmitFailed
    /// when retrying with the same draft and fee) - which is also what
    /// makes a second trigger during an outstanding submission a no-op.
    pub async fn submit(&mut self, gate: &dyn PinGate) -> FlowState {
        if !self.state.submit_enabled() {
            log::warn!(
                "flow {}: submit ignored in state {}",
                self.flow_id,
                self.state.as_str()
            );
            return self.state;
        }

        // Capture draft companions before the handoff
        let Some(credentials) = self.credentials.clone() else {
            // Invariant violation: FeeReady without captured credentials.
            // Fail fast with the distinct AuthMissing message, no network call.
            let e = SubmitError::AuthMissing;
            log::error!("flow {}: {}", self.flow_id, e);
            self.failure = Some(FlowFailure::from_submit(&e));
            self.apply(FlowEvent::SubmitRequested);
            self.apply(FlowEvent::ExecutorFail);
            return self.state;
        };
        let Some(quote) = self.quote.clone() else {
            let e = SubmitError::AuthMissing;
            log::error!("flow {}: FeeReady without a quote", self.flow_id);
            self.failure = Some(FlowFailure::from_submit(&e));
            self.apply(FlowEvent::SubmitRequested);
            self.apply(FlowEvent::ExecutorFail);
            return self.state;
        };

        // Processing indicator stays on from handoff until the decision
        // (or the executor outcome) lands.
        self.failure = None;
        self.apply(FlowEvent::SubmitRequested);

        let (ticket, receiver) = PinTicket::new();
        gate.verify(self.flow_id, ticket).await;
        let decision = receiver.decision().await;

        match decision {
            PinDecision::Declined | PinDecision::Abandoned => {
                // The user merely canceled: back to FeeReady, quote
                // untouched, no alert.
                log::info!("flow {}: pin {}", self.flow_id, match decision {
                    PinDecision::Abandoned => "abandoned (treated as decline)",
                    _ => "declined",
                });
                self.apply(FlowEvent::PinDeclined);
            }
            PinDecision::Approved => {
                match self.executor.submit(&self.draft, &quote, &credentials).await {
                    Ok(receipt) => {
                        match &receipt {
                            Some(r) => log::info!(
                                "flow {}: submitted, confirmation {}",
                                self.flow_id,
                                r.confirmation_code
                            ),
                            None => log::info!(
                                "flow {}: submitted, backend returned no receipt",
                                self.flow_id
                            ),
                        }
                        self.result = Some(ResultScreenParams {
                            message: SUBMITTED_MESSAGE.to_string(),
                            receipt,
                        });
                        self.apply(FlowEvent::ExecutorOk);
                    }
                    Err(e) => {
                        log::warn!("flow {}: submission failed: {}", self.flow_id, e);
                        self.failure = Some(FlowFailure::from_submit(&e));
                        self.apply(FlowEvent::ExecutorFail);
                    }
                }
            }
        }

        self.state
    }

    fn apply(&mut self, event: FlowEvent) {
        let next = transition(self.state, event.clone());
        if next != self.state {
            log::debug!(
                "flow {}: {} --{:?}--> {}",
                self.flow_id,
                self.state.as_str(),
                event,
                next.as_str()
            );
        }
        self.state = next;
    }

    // ===== Accessors (everything the screen renders from) =====

    pub fn flow_id(&self) -> FlowId {
        self.flow_id
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn fee_quote(&self) -> Option<&FeeQuote> {
        self.quote.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.submit_enabled()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn last_failure(&self) -> Option<&FlowFailure> {
        self.failure.as_ref()
    }

    /// Hand the result-screen parameters over; ownership passes with them.
    pub fn take_result(&mut self) -> Option<ResultScreenParams> {
        self.result.take()
    }
}
