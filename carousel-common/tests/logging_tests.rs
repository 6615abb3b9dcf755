//! Global subscriber installation
//!
//! Kept in its own test binary: the global subscriber can only be set once
//! per process.

use carousel_common::config::LoggingConfig;
use carousel_common::logging::{init_logging, LOG_ENV_VAR};
use carousel_common::Error;

#[test]
fn test_init_logging_to_file_then_reject_second_init() {
    std::env::remove_var(LOG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("carousel.log");

    let config = LoggingConfig {
        level: "info".to_string(),
        file: Some(log_path.clone()),
    };
    init_logging(&config).unwrap();

    tracing::info!("carousel logging smoke test");
    tracing::debug!("filtered out at info level");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("carousel logging smoke test"));
    assert!(!contents.contains("filtered out"));

    // Second installation fails cleanly
    assert!(matches!(
        init_logging(&LoggingConfig::default()),
        Err(Error::Logging(_))
    ));
}
