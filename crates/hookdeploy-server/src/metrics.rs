use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref GIT_COMMANDS: IntCounter =
        IntCounter::new("git_commands", "Git commands").unwrap();
    pub static ref SFTP_WRITES: IntCounter =
        IntCounter::new("sftp_writes", "SFTP file writes").unwrap();
    pub static ref DEPLOYMENTS_SUCCEEDED: IntCounter =
        IntCounter::new("deployments_succeeded", "Successful deployments").unwrap();
    pub static ref DEPLOYMENTS_FAILED: IntCounter =
        IntCounter::new("deployments_failed", "Failed deployments").unwrap();
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError { source: e })?;

    setup_process_metrics(&prometheus)?;

    for counter in [
        &*GIT_COMMANDS,
        &*SFTP_WRITES,
        &*DEPLOYMENTS_SUCCEEDED,
        &*DEPLOYMENTS_FAILED,
    ] {
        prometheus.registry.register(Box::new(counter.clone()))?;
    }

    Ok(prometheus)
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))?;
    Ok(())
}

#[cfg(windows)]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::warn!("Process metrics are not supported on Windows.");
    Ok(())
}
