//! End-to-end demo of the confirm-transfer flow against mock adapters.
//!
//! Runs one happy-path flow: enter, refresh, submit with an approving
//! PIN gate, then prints the result-screen payload.

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use confirmer::configure::load_config;
use confirmer::confirm::adapters::{
    GateScript, MockCredentialProvider, MockFeeEstimator, MockPinGate, MockSubmissionExecutor,
};
use confirmer::confirm::{ConfirmationCoordinator, SubmissionReceipt, TransferDraft};
use confirmer::logger::setup_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    setup_logger(&config).map_err(|e| anyhow::anyhow!("logger init failed: {}", e))?;

    let draft = TransferDraft {
        sender_name: "Ana Lima".to_string(),
        amount: Decimal::from(100),
        source_wallet_id: "W1".to_string(),
        transfer_type_id: 2,
        recipient_name: "Joao Lima".to_string(),
        recipient_location: "Praia".to_string(),
        recipient_document: "CV-1234".to_string(),
        note: Some("rent".to_string()),
    };

    let receipt = SubmissionReceipt {
        confirmation_code: "M123".to_string(),
        final_fee: "5.00".parse()?,
        final_total: "105.00".parse()?,
    };

    let mut coordinator = ConfirmationCoordinator::new(
        draft,
        Arc::new(MockCredentialProvider::ok()),
        Arc::new(MockFeeEstimator::quoting("5.00")),
        Arc::new(MockSubmissionExecutor::succeeding(Some(receipt))),
    );

    let state = coordinator.enter().await;
    log::info!("after enter: state={}, submit_enabled={}", state.as_str(), coordinator.submit_enabled());

    let state = coordinator.refresh().await;
    log::info!("after refresh: state={}", state.as_str());

    let gate = MockPinGate::scripted(GateScript::Approve);
    let state = coordinator.submit(&gate).await;
    log::info!("after submit: state={}", state.as_str());

    if let Some(result) = coordinator.take_result() {
        println!("{}", result.message);
        if let Some(r) = result.receipt {
            println!(
                "confirmation={} fee={} total={}",
                r.confirmation_code, r.final_fee, r.final_total
            );
        }
    }

    Ok(())
}
