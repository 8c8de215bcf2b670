pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use crate::config::Settings;
use crate::middleware::{policy_for, PageGate};
use crate::services::Clock;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub clock: Arc<dyn Clock>,
    pub gate: PageGate,
}

impl AppState {
    pub fn new(settings: Arc<Settings>, clock: Arc<dyn Clock>) -> Self {
        let gate = PageGate::new(policy_for(&settings.access));
        Self {
            settings,
            clock,
            gate,
        }
    }
}
