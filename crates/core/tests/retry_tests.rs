use crate::core::retry::{RetryConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL};
use std::time::Duration;

#[test]
fn test_default_budget() {
    let config = RetryConfig::default();
    assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.interval, DEFAULT_RETRY_INTERVAL);
    assert_eq!(config.interval, Duration::from_millis(1000));
}

#[test]
fn test_fixed_delay_until_exhausted() {
    let config = RetryConfig::fixed(3, Duration::from_millis(250));

    assert_eq!(config.delay_for(1), Some(Duration::from_millis(250)));
    assert_eq!(config.delay_for(2), Some(Duration::from_millis(250)));
    assert_eq!(config.delay_for(3), Some(Duration::from_millis(250)));
    assert_eq!(config.delay_for(4), None);
    assert_eq!(config.delay_for(0), None);
}

#[test]
fn test_none_never_retries() {
    let config = RetryConfig::none();
    assert_eq!(config.delay_for(1), None);
}
