/// Log filter tests.
///
/// Checks the filter laws (identity, subset, idempotence, stability) over
/// freshly generated batches and a hand-built one.
use chrono::{TimeZone, Utc};
use mockboard::logs::filter::{filter_logs, matches};
use mockboard::logs::{LogLevel, LogRecord, generate_logs};
use mockboard::random::{SeededRandom, ThreadRandom};

fn batch() -> Vec<LogRecord> {
    generate_logs(Utc::now(), &mut ThreadRandom::new())
}

fn record(level: LogLevel, user: &str, action: &str) -> LogRecord {
    LogRecord {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap(),
        level,
        action: action.to_string(),
        details: format!("{user} - {action} - Event ID: abc123xyz"),
        user: user.to_string(),
    }
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let records = batch();
    let out: Vec<LogRecord> = filter_logs(&records, "").into_iter().cloned().collect();
    assert_eq!(out, records);
}

#[test]
fn results_are_an_ordered_subsequence_that_all_match() {
    let records = batch();
    for text in ["admin", "API", "sync", "warn", "Event ID", "-", "2"] {
        let out = filter_logs(&records, text);
        let needle = text.to_lowercase();
        assert!(out.iter().all(|r| matches(r, &needle)), "{text}");

        // Order check: positions in the source are strictly increasing.
        let positions: Vec<usize> = out
            .iter()
            .map(|r| records.iter().position(|x| std::ptr::eq(x, *r)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }
}

#[test]
fn filtering_is_idempotent() {
    let records = batch();
    for text in ["user", "backup", "failed", "error"] {
        let once: Vec<LogRecord> = filter_logs(&records, text).into_iter().cloned().collect();
        let twice: Vec<LogRecord> = filter_logs(&once, text).into_iter().cloned().collect();
        assert_eq!(once, twice, "{text}");
    }
}

#[test]
fn error_filter_count_matches_generated_error_count() {
    let records = generate_logs(Utc::now(), &mut SeededRandom::new(17));
    let errors = records.iter().filter(|r| r.level == LogLevel::Error).count();
    let out = filter_logs(&records, "ERROR");
    assert_eq!(out.len(), errors);
    assert!(out.iter().all(|r| r.level == LogLevel::Error));
}

#[test]
fn every_field_is_searched() {
    let records = vec![
        record(LogLevel::Info, "admin", "User login attempt"),
        record(LogLevel::Warn, "system", "API request timeout"),
        record(LogLevel::Error, "api-service", "Payment processing failed"),
    ];

    // timestamp
    assert_eq!(filter_logs(&records, "2024-03-09t08:30").len(), 3);
    // type
    assert_eq!(filter_logs(&records, "warn").len(), 1);
    // action
    assert_eq!(filter_logs(&records, "PAYMENT").len(), 1);
    // user
    assert_eq!(filter_logs(&records, "Admin").len(), 1);
    // details only
    assert_eq!(filter_logs(&records, "ABC123XYZ").len(), 3);
    // no field
    assert!(filter_logs(&records, "database").is_empty());
}

#[test]
fn api_matches_user_and_action() {
    let records = vec![
        record(LogLevel::Info, "api-service", "System health check"),
        record(LogLevel::Info, "admin", "API request timeout"),
        record(LogLevel::Info, "system", "Data sync completed"),
    ];
    let out = filter_logs(&records, "api");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].user, "api-service");
    assert_eq!(out[1].user, "admin");
}
