use parliament_execution::logging::{self, LOG_FILE_PREFIX, LoggingOptions};
use tempfile::TempDir;

// Only one global subscriber can exist per process, so this file holds a
// single test.
#[test]
fn test_init_writes_rolling_file_and_rejects_second_init() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let guard = logging::init(
        LoggingOptions {
            level: "debug".to_string(),
            log_dir: Some(log_dir.clone()),
            events: None,
        }
        .with_events(tx),
    )
    .unwrap();

    tracing::info!(target: "parliament_cli", meeting_id = "m-9", "Council adjourned");
    drop(guard);

    let files: Vec<String> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(
        files.iter().any(|f| f.starts_with(LOG_FILE_PREFIX)),
        "rolling file created: {files:?}"
    );

    let event = rx.try_recv().unwrap();
    assert_eq!(event.message, "Council adjourned");

    assert!(logging::init(LoggingOptions::default()).is_err());
}
