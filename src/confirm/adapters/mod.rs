//! Adapters module - boundaries the coordinator talks through

pub mod traits;
pub mod http;
pub mod stored;
pub mod mock;

pub use traits::{CredentialProvider, FeeEstimator, PinGate, SubmissionExecutor};

// Production adapters
pub use http::{HttpFeeEstimator, HttpSubmissionExecutor};
pub use stored::{StoredCredentialProvider, StoredSession, TokenStore};

// Test / demo adapters
pub use mock::{
    GateScript, MockCredentialProvider, MockFeeEstimator, MockPinGate, MockSubmissionExecutor,
};
