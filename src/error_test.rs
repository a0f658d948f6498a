use super::*;

#[test]
fn config_error_wraps_json_failure() {
    let Err(err) = serde_json::from_str::<serde_json::Value>("{") else {
        panic!("truncated json must fail");
    };
    let message = ConfigError::from(err).to_string();
    assert!(message.starts_with("invalid config json:"), "{message}");
}

#[test]
fn parse_theme_error_quotes_value() {
    assert_eq!(ParseThemeError("blue".to_owned()).to_string(), "unknown theme: \"blue\"");
}

#[test]
fn browser_error_messages() {
    assert_eq!(BrowserError::NoWindow.to_string(), "no window object");
    assert_eq!(BrowserError::Js("boom".to_owned()).to_string(), "javascript error: boom");
    assert_eq!(SubmitError::Transport("offline".to_owned()).to_string(), "submission transport failed: offline");
}
