use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Return time now in seconds or 0
pub(crate) fn time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::new(0, 0))
        .as_secs()
}

/// Convert a `SystemTime` to an ISO8601 UTC string
pub(crate) fn systemtime_to_iso(time: SystemTime) -> String {
    let date: DateTime<Utc> = time.into();
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert seconds and nanoseconds since UNIXEPOCH to an ISO8601 UTC string
pub(crate) fn unixepoch_to_iso(seconds: i64, nanos: i64) -> Option<String> {
    let nanos = u32::try_from(nanos).unwrap_or(0);
    DateTime::<Utc>::from_timestamp(seconds, nanos)
        .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true))
}
