use std::sync::Arc;

use crate::analysis::AnalysisSource;
use crate::config::Config;
use crate::dashboard::session::{AnalysisSession, BusyObserver};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analysis backend. Chosen at startup via ANALYSIS_BACKEND.
    pub analysis_source: Arc<dyn AnalysisSource>,
    /// The single dashboard session; owns the display regions and the busy state.
    pub session: Arc<AnalysisSession>,
}

impl AppState {
    pub fn new(
        config: Config,
        analysis_source: Arc<dyn AnalysisSource>,
        observer: Arc<dyn BusyObserver>,
    ) -> Self {
        let session = Arc::new(AnalysisSession::new(
            analysis_source.clone(),
            observer,
            config.analysis_timeout,
        ));
        Self {
            config,
            analysis_source,
            session,
        }
    }

    /// Default configuration around a given backend.
    #[cfg(test)]
    pub fn for_source(analysis_source: Arc<dyn AnalysisSource>) -> Self {
        let config = Config::from_lookup(|_| None).expect("default config is valid");
        Self::new(
            config,
            analysis_source,
            Arc::new(crate::dashboard::session::LoggingObserver),
        )
    }
}
