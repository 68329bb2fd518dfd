use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "pricing_quotes_total",
        "Total number of successful pricing quotes"
    );
    describe_counter!(
        "pricing_validation_errors_total",
        "Total number of rejected prospect counts"
    );
    describe_counter!(
        "campaign_launches_total",
        "Campaign launch attempts by outcome"
    );
    describe_histogram!(
        "upstream_request_duration_seconds",
        "Campaign backend request duration in seconds"
    );
    describe_gauge!(
        "prospect_pricing_info",
        "Service version and build information"
    );

    gauge!("prospect_pricing_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a computed quote
pub fn record_quote(plan: &str, custom: bool) {
    counter!(
        "pricing_quotes_total",
        "plan" => plan.to_string(),
        "custom" => custom.to_string(),
    )
    .increment(1);
}

/// Record a rejected prospect count
pub fn record_validation_error(kind: &str) {
    counter!(
        "pricing_validation_errors_total",
        "kind" => kind.to_string(),
    )
    .increment(1);
}

/// Record a launch attempt (`launched`, `rejected`, `insufficient_balance`, `invalid`, `error`)
pub fn record_launch(outcome: &str) {
    counter!(
        "campaign_launches_total",
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}

/// Record how long a backend call took
pub fn record_upstream_duration(endpoint: &str, duration: Duration) {
    histogram!(
        "upstream_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_quote("starter", false);
        record_quote("professional", true);
        record_validation_error("below_minimum");
        record_launch("launched");
        record_upstream_duration("/chat", Duration::from_millis(120));

        // Just verify the function calls don't panic
    }

    #[test]
    fn test_rendered_output_contains_quotes() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_quote("dominator", false);
        });

        let rendered = handle.render();
        assert!(rendered.contains("pricing_quotes_total"));
        assert!(rendered.contains("plan=\"dominator\""));
    }
}
