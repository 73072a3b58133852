//! `POST /card`: balance lookup by card number and PIN.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::CardRequest,
    services::{record_lookup, LookupError},
    AppState,
};

pub const CARD_NO_REQUIRED: &str = "card no is required";
pub const PIN_REQUIRED: &str = "pin is required";
/// Replaces the upstream's message when it failed with a 500.
pub const UPSTREAM_UNREACHABLE: &str = "the perfect gift card website unreachable.";

/// Look up a card.
///
/// Lookup failures always answer 400; a successful lookup answers with the
/// status the upstream reported. A body that cannot be read is handled like
/// an empty one.
pub async fn get_card(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable card request body");
        Bytes::new()
    });
    let payload = CardRequest::from_body(&body);

    if payload.card_no.is_empty() {
        return Err(AppError::bad_request(CARD_NO_REQUIRED));
    }
    if payload.pin.is_empty() {
        return Err(AppError::bad_request(PIN_REQUIRED));
    }

    let card_no = payload.masked_card_no();
    tracing::info!(card_no = %card_no, "Looking up card");

    match state.lookup.get_card(&payload.card_no, &payload.pin).await {
        Ok((card, response)) => {
            record_lookup("success");
            tracing::info!(
                card_no = %card_no,
                status = %response.status,
                transactions = card.transactions.len(),
                "Card lookup succeeded"
            );
            Ok((response.status, Json(card)).into_response())
        }
        Err(err) => {
            let message = failure_message(&err);
            record_lookup(failure_outcome(&err));
            tracing::warn!(
                card_no = %card_no,
                upstream_status = ?err.response().map(|r| r.status),
                error = %err,
                "Card lookup failed"
            );
            Err(AppError::bad_request(message))
        }
    }
}

fn upstream_failed(err: &LookupError) -> bool {
    err.response()
        .is_some_and(|response| response.status == StatusCode::INTERNAL_SERVER_ERROR)
}

/// Message returned to the caller for a failed lookup.
pub fn failure_message(err: &LookupError) -> String {
    if upstream_failed(err) {
        UPSTREAM_UNREACHABLE.to_string()
    } else {
        err.to_string()
    }
}

fn failure_outcome(err: &LookupError) -> &'static str {
    if upstream_failed(err) {
        return "unreachable";
    }
    match err {
        LookupError::Transport(_) => "transport",
        LookupError::Rejected { .. } => "rejected",
        LookupError::InvalidPayload { .. } => "invalid_payload",
    }
}
