use std::str::FromStr;

/// Scheduler limits and process settings.
///
/// Every limit is off unless set; an unset limit never produces
/// `LimitExceeded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Max event name length in bytes, after trimming.
    pub max_name_len: Option<usize>,
    /// Longest single event.
    pub max_event_duration_ms: Option<i64>,
    /// Widest window `query_events` accepts.
    pub max_query_window_ms: Option<i64>,
    /// Prometheus listener port; metrics are disabled when unset.
    pub metrics_port: Option<u16>,
}

impl SchedulerConfig {
    /// Read `ROOMBOOK_*` variables. Anything missing or unparseable stays
    /// unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_name_len: parse_var(&lookup, "ROOMBOOK_MAX_NAME_LEN"),
            max_event_duration_ms: parse_var(&lookup, "ROOMBOOK_MAX_EVENT_DURATION_MS"),
            max_query_window_ms: parse_var(&lookup, "ROOMBOOK_MAX_QUERY_WINDOW_MS"),
            metrics_port: parse_var(&lookup, "ROOMBOOK_METRICS_PORT"),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
