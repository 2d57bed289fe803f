use statspost::error::GENERIC_FAILURE_MESSAGE;
use statspost::{Result, StatsError};

#[test]
fn test_validation_message_is_shown_verbatim() {
    let err = StatsError::validation("Please enter a valid Request Id");
    assert_eq!(err.to_string(), "Please enter a valid Request Id");
    assert_eq!(err.user_message(), "Please enter a valid Request Id");
    assert!(err.is_validation());
}

#[test]
fn test_backend_message_is_shown_verbatim() {
    let err = StatsError::Backend("Stats already running".to_string());
    assert_eq!(err.user_message(), "Stats already running");
    assert!(!err.is_validation());
}

#[test]
fn test_decode_failures_are_hidden_from_user() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: StatsError = json_err.into();
    assert!(err.to_string().starts_with("JSON 解析错误"));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn test_poll_limit_message() {
    let err = StatsError::PollLimit(5);
    assert_eq!(err.user_message(), "Job still running after 5 polls");
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let err: StatsError = anyhow_err.into();
    assert!(err.to_string().contains("test anyhow error"));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(StatsError::Config("bad settings".to_string()))
    }

    match returns_error() {
        Err(StatsError::Config(msg)) => assert_eq!(msg, "bad settings"),
        _ => panic!("Expected Config error"),
    }
}
