//! Card balance lookup abstraction.
//!
//! The service never talks to the gift card website itself; it goes through
//! a [`CardLookup`] so the HTTP layer can be exercised against a test double.

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

use crate::models::Card;

/// What the upstream answered, independent of whether a card came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: StatusCode,
}

impl LookupResponse {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }
}

/// Error type for lookup operations.
///
/// The `Display` text is what callers see in the `error` field.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The upstream could not be reached or did not answer in time.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered and refused the lookup, e.g. a wrong PIN.
    #[error("{message}")]
    Rejected {
        message: String,
        response: LookupResponse,
    },

    /// The upstream answered successfully but with an unreadable card.
    #[error("{message}")]
    InvalidPayload {
        message: String,
        response: LookupResponse,
    },
}

impl LookupError {
    pub fn rejected(message: impl Into<String>, status: StatusCode) -> Self {
        LookupError::Rejected {
            message: message.into(),
            response: LookupResponse::new(status),
        }
    }

    /// The upstream response attached to the failure, if one was received.
    pub fn response(&self) -> Option<&LookupResponse> {
        match self {
            LookupError::Transport(_) => None,
            LookupError::Rejected { response, .. }
            | LookupError::InvalidPayload { response, .. } => Some(response),
        }
    }
}

/// Gift card balance lookup.
///
/// Implementations are shared by all in-flight requests and must tolerate
/// concurrent calls. Timeouts are the implementation's business.
#[async_trait]
pub trait CardLookup: Send + Sync {
    async fn get_card(
        &self,
        card_no: &str,
        pin: &str,
    ) -> Result<(Card, LookupResponse), LookupError>;
}
