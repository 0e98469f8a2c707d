/// Case-insensitive substring filter over log records.
///
/// A record matches when the lowercased filter text occurs in any of its
/// timestamp, type, action, details or user fields. Empty text matches
/// everything. Output keeps input order.
use super::LogRecord;

/// Return the records matching `text`, in their original order.
pub fn filter_logs<'a>(records: &'a [LogRecord], text: &str) -> Vec<&'a LogRecord> {
    if text.is_empty() {
        return records.iter().collect();
    }

    let needle = text.to_lowercase();
    records.iter().filter(|r| matches(r, &needle)).collect()
}

/// Whether a record contains the already-lowercased `needle`.
pub fn matches(record: &LogRecord, needle: &str) -> bool {
    let fields = [
        record.timestamp_iso(),
        record.level.as_str().to_string(),
        record.action.clone(),
        record.details.clone(),
        record.user.clone(),
    ];
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Match count label shown next to the filter box.
pub fn count_text(matches: usize) -> String {
    format!("{matches} matches")
}
