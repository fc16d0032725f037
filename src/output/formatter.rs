use chrono::{DateTime, Utc};

use crate::cache::PullRequestRecord;

/// First line of the report
pub const CSV_HEADER: &str = "number, created_at, first_comment_created_at, merged_at";

const FIELD_SEPARATOR: &str = ", ";

/// Format a timestamp for the report, empty when absent
/// Format: "2016-05-03 17:21:07" (UTC)
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Format one record as a report line
/// Format: "{number}, {created_at}, {first_comment_created_at}, {closed_at}"
pub fn format_csv_line(record: &PullRequestRecord) -> String {
    [
        record.number.to_string(),
        format_timestamp(Some(record.created_at)),
        format_timestamp(record.first_comment_created_at),
        format_timestamp(record.closed_at),
    ]
    .join(FIELD_SEPARATOR)
}

/// Format the header plus one line per record, in the order given
///
/// Values are not quoted or escaped; timestamps never contain commas.
pub fn format_csv(records: &[PullRequestRecord]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(records.iter().map(format_csv_line))
        .collect::<Vec<_>>()
        .join("\n")
}
