/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Calendar date (UTC) of a millisecond timestamp as `YYYYMMDD`
pub fn date_stamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .format("%Y%m%d")
        .to_string()
}

/// Fresh UUID v4 string for entity ids
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
