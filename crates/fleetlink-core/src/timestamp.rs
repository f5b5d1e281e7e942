//! Local wall-clock timestamps for outbound frames.

use chrono::Local;

/// Current local time as ISO-8601 with millisecond precision and no
/// UTC-offset suffix, e.g. `2021-03-14T15:09:26.535`.
///
/// The server and its log consumers treat frame timestamps as presentation
/// data in the operator's local time, so the offset is deliberately
/// stripped rather than converted.
pub fn local_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.3f")
        .to_string()
}
