use combinability_scoreboard::pricing::combinability::{CombinabilityService, ScoreboardConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn scoreboard_service(config: &ScoreboardConfig) -> Arc<CombinabilityService> {
    Arc::new(CombinabilityService::new(config.clone()))
}
