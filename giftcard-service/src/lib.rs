pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::CardLookup;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn CardLookup>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn CardLookup>) -> Self {
        Self { lookup }
    }
}
