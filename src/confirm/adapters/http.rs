//! HTTP-backed fee estimator and submission executor
//!
//! Thin reqwest clients over the transfer backend. Both map transport
//! failures to the retryable Network kind and let application-level
//! status codes in the body drive the business outcome.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::StatusCode;

use crate::configure::AppConfig;
use crate::confirm::errors::{FeeError, SubmitError};
use crate::confirm::types::{
    Credentials, FeeQuote, FeeRequest, FeeResponse, SubmissionReceipt, SubmitRequest,
    SubmitResponse, TransferDraft,
};
use super::traits::{FeeEstimator, SubmissionExecutor};

const FEE_PATH: &str = "/api/transfers/fee";
const SUBMIT_PATH: &str = "/api/transfers";

fn is_app_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Credential rejection at the transport layer, before any body parsing.
fn is_unauthorized(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Classify a parsed fee response body into a quote or a failure.
///
/// Non-success body status carries the backend message as a rejection;
/// a success body without the fee value is a malformed reply and maps to
/// the retryable Network kind.
fn classify_fee_response(body: FeeResponse, fallback_currency: &str) -> Result<FeeQuote, FeeError> {
    if !is_app_success(body.status) {
        let message = body
            .message
            .unwrap_or_else(|| format!("Fee service returned status {}", body.status));
        return Err(FeeError::Rejected(message));
    }

    let fee_amount = body
        .total_fees
        .ok_or_else(|| FeeError::Network("fee response missing totalFees".to_string()))?;

    Ok(FeeQuote {
        fee_amount,
        currency: body.currency.unwrap_or_else(|| fallback_currency.to_string()),
        computed_at: Utc::now().timestamp_millis(),
    })
}

/// Classify a parsed submission response body.
///
/// A success without receipt fields is still an acknowledged submission.
fn classify_submit_response(body: SubmitResponse) -> Result<Option<SubmissionReceipt>, SubmitError> {
    if !is_app_success(body.status) {
        let message = body
            .message
            .unwrap_or_else(|| format!("Transfer service returned status {}", body.status));
        return Err(SubmitError::Rejected(message));
    }

    Ok(body.receipt())
}

/// Fee estimator backed by the remote fee endpoint
pub struct HttpFeeEstimator {
    client: Client,
    url: String,
    timeout: Duration,
    fallback_currency: String,
}

impl HttpFeeEstimator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", config.api_base_url.trim_end_matches('/'), FEE_PATH),
            timeout: Duration::from_millis(config.request_timeout_ms),
            fallback_currency: config.default_currency.clone(),
        }
    }
}

#[async_trait]
impl FeeEstimator for HttpFeeEstimator {
    async fn quote(
        &self,
        draft: &TransferDraft,
        credentials: &Credentials,
    ) -> Result<FeeQuote, FeeError> {
        let request = FeeRequest::from_draft(draft, credentials);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&credentials.session_token)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FeeError::Network(e.to_string()))?;

        let http_status = response.status();
        if is_unauthorized(http_status) {
            log::warn!("Fee quote unauthorized (HTTP {})", http_status);
            return Err(FeeError::Unauthorized);
        }

        let body: FeeResponse = response
            .json()
            .await
            .map_err(|e| FeeError::Network(format!("bad fee response: {}", e)))?;

        classify_fee_response(body, &self.fallback_currency).inspect_err(|e| {
            log::warn!("Fee quote failed: {}", e);
        })
    }
}

/// Submission executor backed by the remote create-transfer endpoint
pub struct HttpSubmissionExecutor {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSubmissionExecutor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", config.api_base_url.trim_end_matches('/'), SUBMIT_PATH),
            timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }
}

#[async_trait]
impl SubmissionExecutor for HttpSubmissionExecutor {
    async fn submit(
        &self,
        draft: &TransferDraft,
        quote: &FeeQuote,
        credentials: &Credentials,
    ) -> Result<Option<SubmissionReceipt>, SubmitError> {
        let request = SubmitRequest::new(draft, quote, credentials);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&credentials.session_token)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Network(format!("bad submit response: {}", e)))?;

        classify_submit_response(body).inspect_err(|e| {
            log::warn!("Submission failed: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fee_body(json: &str) -> FeeResponse {
        serde_json::from_str(json).unwrap()
    }

    fn submit_body(json: &str) -> SubmitResponse {
        serde_json::from_str(json).unwrap()
    }

    // ===== Unauthorized detection (transport layer) =====

    #[test]
    fn test_unauthorized_http_statuses() {
        assert!(is_unauthorized(StatusCode::UNAUTHORIZED));
        assert!(is_unauthorized(StatusCode::FORBIDDEN));

        assert!(!is_unauthorized(StatusCode::OK));
        assert!(!is_unauthorized(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!is_unauthorized(StatusCode::INTERNAL_SERVER_ERROR));
    }

    // ===== Fee response classification =====

    #[test]
    fn test_fee_success_yields_quote() {
        let body = fee_body(r#"{"status":200,"totalFees":"5.00","currency":"EUR"}"#);
        let quote = classify_fee_response(body, "CVE").unwrap();
        assert_eq!(quote.fee_amount, dec("5.00"));
        assert_eq!(quote.currency, "EUR");
        assert!(quote.computed_at > 0);
    }

    #[test]
    fn test_fee_success_without_currency_uses_fallback() {
        let body = fee_body(r#"{"status":200,"totalFees":"5.00"}"#);
        let quote = classify_fee_response(body, "CVE").unwrap();
        assert_eq!(quote.currency, "CVE");
    }

    #[test]
    fn test_fee_rejection_carries_backend_message() {
        let body = fee_body(r#"{"status":422,"message":"Invalid wallet"}"#);
        let err = classify_fee_response(body, "CVE").unwrap_err();
        assert_eq!(err, FeeError::Rejected("Invalid wallet".to_string()));
    }

    #[test]
    fn test_fee_rejection_without_message_names_the_status() {
        let body = fee_body(r#"{"status":500}"#);
        match classify_fee_response(body, "CVE").unwrap_err() {
            FeeError::Rejected(msg) => assert!(msg.contains("500")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_fee_success_missing_total_is_retryable() {
        // A success body without the fee value is malformed, not a
        // business refusal: Network, so refresh may retry it.
        let body = fee_body(r#"{"status":200}"#);
        assert!(matches!(
            classify_fee_response(body, "CVE").unwrap_err(),
            FeeError::Network(_)
        ));
    }

    // ===== Submission response classification =====

    #[test]
    fn test_submit_success_with_full_receipt() {
        let body = submit_body(
            r#"{"status":200,"confirmationCode":"M123","fees":"5.00","total":"105.00"}"#,
        );
        let receipt = classify_submit_response(body).unwrap().unwrap();
        assert_eq!(receipt.confirmation_code, "M123");
        assert_eq!(receipt.final_fee, dec("5.00"));
        assert_eq!(receipt.final_total, dec("105.00"));
    }

    #[test]
    fn test_submit_ack_without_receipt_fields() {
        let body = submit_body(r#"{"status":201}"#);
        assert_eq!(classify_submit_response(body).unwrap(), None);
    }

    #[test]
    fn test_submit_rejection_carries_backend_message() {
        let body = submit_body(r#"{"status":409,"message":"Duplicate transfer"}"#);
        assert_eq!(
            classify_submit_response(body).unwrap_err(),
            SubmitError::Rejected("Duplicate transfer".to_string())
        );
    }

    #[test]
    fn test_submit_rejection_without_message_names_the_status() {
        let body = submit_body(r#"{"status":503}"#);
        match classify_submit_response(body).unwrap_err() {
            SubmitError::Rejected(msg) => assert!(msg.contains("503")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    // ===== Transport failure maps to Network =====

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on the discard port; the send() itself fails.
        let config = AppConfig {
            log_level: "info".to_string(),
            log_to_file: false,
            log_file: String::new(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 500,
            default_currency: "CVE".to_string(),
        };
        let estimator = HttpFeeEstimator::new(&config);

        let draft = TransferDraft {
            sender_name: "Ana Lima".to_string(),
            amount: dec("100"),
            source_wallet_id: "W1".to_string(),
            transfer_type_id: 2,
            recipient_name: "Joao Lima".to_string(),
            recipient_location: "Praia".to_string(),
            recipient_document: "CV-1234".to_string(),
            note: None,
        };
        let credentials = Credentials {
            session_token: "tok".to_string(),
            user_id: "u-1".to_string(),
            token_expiration: Utc::now() + chrono::Duration::hours(1),
        };

        assert!(matches!(
            estimator.quote(&draft, &credentials).await.unwrap_err(),
            FeeError::Network(_)
        ));

        let executor = HttpSubmissionExecutor::new(&config);
        let quote = FeeQuote {
            fee_amount: dec("5.00"),
            currency: "CVE".to_string(),
            computed_at: 0,
        };
        assert!(matches!(
            executor.submit(&draft, &quote, &credentials).await.unwrap_err(),
            SubmitError::Network(_)
        ));
    }
}
