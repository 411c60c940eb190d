use metrics_exporter_prometheus::PrometheusHandle;
use sp_roaster::analysis::AccountAuditor;
use sp_roaster::config::EngineConfig;
use sp_roaster::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine thresholds come from `ROASTER_*` environment overrides, with the
/// stock defaults when nothing is set.
pub(crate) fn build_auditor() -> Result<AccountAuditor, AppError> {
    let engine = EngineConfig::from_env()?;
    Ok(AccountAuditor::new(
        engine.classifier_config(),
        engine.scoring_config(),
    )?)
}
