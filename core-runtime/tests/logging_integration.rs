//! Integration tests for logging system

use bridge_traits::logging::LogLevel;
use core_runtime::logging::{redact_if_sensitive, strip_query, LogFormat, LoggingConfig};
use core_runtime::{init_logging, Error};

#[test]
fn test_logging_initialization() {
    // Only one global subscriber per process: the first call wins, the
    // second must report the conflict instead of panicking.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    init_logging(config.clone()).expect("first init succeeds");
    tracing::info!(target: "core_playback", track_id = "t-1", "logging ready");

    let second = init_logging(config);
    assert!(matches!(second, Err(Error::LoggingAlreadyInitialized)));
}

#[test]
fn test_redaction_of_credentials() {
    assert_eq!(redact_if_sensitive("access_token", "abc"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer abc"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("password", "my_password"), "[REDACTED]");
}

#[test]
fn test_redaction_of_emails() {
    let redacted = redact_if_sensitive("email", "listener@example.com");

    assert!(redacted.starts_with('l'));
    assert!(redacted.contains("[REDACTED]"));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_normal_values_pass_through() {
    assert_eq!(redact_if_sensitive("track_id", "12345"), "12345");
    assert_eq!(redact_if_sensitive("title", "Ocean Breath"), "Ocean Breath");
    assert_eq!(redact_if_sensitive("index", "3"), "3");
}

#[test]
fn test_signed_url_query_is_dropped() {
    assert_eq!(
        strip_query("https://cdn.example.com/hypnosis/42.mp3?Expires=1&Signature=x"),
        "https://cdn.example.com/hypnosis/42.mp3"
    );
    assert_eq!(strip_query("file.mp3"), "file.mp3");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_filter("core_playback=debug,bridge_desktop=trace")
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(
        config.filter.as_deref(),
        Some("core_playback=debug,bridge_desktop=trace")
    );
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
