#![allow(clippy::unwrap_used, clippy::expect_used)]

use verso_core::errors::{ExError, ExErrorKind, LedgerError};
use verso_core::logging_facility::test_capture::init_test_capture;
use verso_core::{log_op_end, log_op_error, log_op_start};
use verso_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMMIT_ID, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_SURROGATE_KEY,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(starts, 1);
}

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LedgerError::DuplicateCommit {
        commit_id: "5".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10, commit_id = "5");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_DUPLICATE_COMMIT".to_string())
    );
    assert_eq!(
        event.fields.get(FIELD_ERR_KIND),
        Some(&"DuplicateCommit".to_string())
    );
    assert_eq!(event.fields.get(FIELD_COMMIT_ID), Some(&"5".to_string()));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Persistence).with_message("database is locked");
    log_op_error!(op_name, err, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
}

#[test]
fn test_single_start_and_end_per_operation() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_5";

    log_op_start!(op_name, commit_id = "1");
    log_op_end!(op_name, duration_ms = 2, surrogate_key = 7_i64);

    let events = capture.events_for_op(op_name);
    let kinds: Vec<_> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);
    assert_eq!(events[1].fields.get(FIELD_SURROGATE_KEY), Some(&"7".to_string()));
}
