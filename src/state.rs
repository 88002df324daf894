//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{config::Config, evaluation::EvaluationService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    evaluation: Arc<EvaluationService>,
    config: Config,
}

impl AppState {
    pub fn new(evaluation: Arc<EvaluationService>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { evaluation, config }),
        }
    }

    /// Get a reference to the evaluation service
    pub fn evaluation(&self) -> &EvaluationService {
        &self.inner.evaluation
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
