use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: events successfully created.
pub const EVENTS_CREATED_TOTAL: &str = "roombook_events_created_total";

/// Counter: events successfully cancelled.
pub const EVENTS_CANCELLED_TOTAL: &str = "roombook_events_cancelled_total";

/// Counter: rejected requests. Labels: op, reason.
pub const REQUESTS_REJECTED_TOTAL: &str = "roombook_requests_rejected_total";

// ── USE metrics (collaborator utilization) ──────────────────────

/// Histogram: repository call latency in seconds. Labels: op.
pub const REPOSITORY_CALL_DURATION_SECONDS: &str = "roombook_repository_call_duration_seconds";

/// Install the default fmt subscriber for hosts that have none.
pub fn init_logging() {
    // A host may already have installed its own subscriber.
    let _ = tracing_subscriber::fmt().try_init();
}

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}
