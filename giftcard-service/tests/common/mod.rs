#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use giftcard_service::config::ServerSettings;
use giftcard_service::models::{Card, Transaction};
use giftcard_service::services::{CardLookup, LookupError, LookupResponse};
use giftcard_service::startup::{build_router, Application};
use giftcard_service::AppState;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

pub const CARD_NO: &str = "50211234567890";
pub const PIN: &str = "0000";

pub fn expected_card() -> Card {
    Card {
        card_no: CARD_NO.to_string(),
        account_no: "000000000".to_string(),
        loads_to_date: "$100.00".to_string(),
        purchases_to_date: "-$54.32".to_string(),
        available_balance: "$12.34".to_string(),
        purchased_date: "1 Jan 2018".to_string(),
        expiry_date: "1 Jan 2021".to_string(),
        transactions: vec![
            Transaction {
                date: "1 Jan 2018 12:04:45 PM".to_string(),
                details: "Store Address".to_string(),
                description: "Refund - Store Address".to_string(),
                amount: "$100.00".to_string(),
                balance: "$100.00".to_string(),
            },
            Transaction {
                date: "2 Jan 2018 07:50:53 PM".to_string(),
                details: "Store A".to_string(),
                description: "Purchase - Store A".to_string(),
                amount: "$12.34-".to_string(),
                balance: "$56.78".to_string(),
            },
        ],
    }
}

pub fn card_body(card_no: &str, pin: &str) -> String {
    format!(r#"{{"card_no": "{}", "pin": "{}"}}"#, card_no, pin)
}

/// Canned lookup behaviour for [`MockCardLookup`].
#[derive(Clone)]
pub enum MockOutcome {
    Found(Card, StatusCode),
    Rejected(String, StatusCode),
    Transport(String),
}

/// Test double recording every call it receives.
pub struct MockCardLookup {
    outcome: MockOutcome,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockCardLookup {
    pub fn new(outcome: MockOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn found(card: Card, status: StatusCode) -> Arc<Self> {
        Self::new(MockOutcome::Found(card, status))
    }

    pub fn rejected(message: &str, status: StatusCode) -> Arc<Self> {
        Self::new(MockOutcome::Rejected(message.to_string(), status))
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CardLookup for MockCardLookup {
    async fn get_card(
        &self,
        card_no: &str,
        pin: &str,
    ) -> Result<(Card, LookupResponse), LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((card_no.to_string(), pin.to_string()));

        match &self.outcome {
            MockOutcome::Found(card, status) => Ok((card.clone(), LookupResponse::new(*status))),
            MockOutcome::Rejected(message, status) => {
                Err(LookupError::rejected(message.clone(), *status))
            }
            MockOutcome::Transport(message) => Err(LookupError::Transport(message.clone())),
        }
    }
}

pub fn router_with(lookup: Arc<MockCardLookup>) -> Router {
    build_router(AppState::new(lookup))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Drive a single `POST /card` through the router.
pub async fn post_card(router: Router, body: impl Into<Body>) -> TestResponse {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/card")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .expect("router never fails");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).expect("response body is JSON");

    TestResponse {
        status,
        headers,
        body,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Serve the real application on a random port.
    pub async fn spawn(lookup: Arc<MockCardLookup>) -> Self {
        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        };

        let app = Application::build_with_lookup(&server, lookup)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
