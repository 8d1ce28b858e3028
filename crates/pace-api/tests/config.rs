use std::collections::HashMap;
use std::time::Duration;

use pace_api::config::ServerConfig;
use pace_chat::prompt::DEFAULT_SYSTEM_PROMPT;
use pace_core::image_url::DEFAULT_ARCHIVE_BASE_URL;

fn config(vars: &[(&str, &str)]) -> eyre::Result<ServerConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = config(&[]).unwrap();

    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
    assert_eq!(config.chat_dir.to_str(), Some("chats"));
    assert_eq!(config.archive_base_url, DEFAULT_ARCHIVE_BASE_URL);
    assert_eq!(config.archive_timeout, Duration::from_secs(30));
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.model, "gpt-3.5-turbo");
    assert_eq!(config.openai.timeout, Duration::from_secs(60));
    assert!(config.openai.api_key.is_empty());
    assert_eq!(config.system_prompt().unwrap(), DEFAULT_SYSTEM_PROMPT);
}

#[test]
fn overrides_are_read() {
    let config = config(&[
        ("PACE_BIND_ADDR", "127.0.0.1:9090"),
        ("PACE_CHAT_DIR", "/var/lib/pace/chats"),
        ("PACE_ARCHIVE_BASE_URL", "http://mirror.local/images"),
        ("PACE_CHAT_TIMEOUT_SECS", "5"),
        ("PACE_CHAT_MODEL", "gpt-4o-mini"),
        ("OPENAI_API_KEY", "sk-abc"),
    ])
    .unwrap();

    assert_eq!(config.bind_addr.port(), 9090);
    assert_eq!(config.chat_dir.to_str(), Some("/var/lib/pace/chats"));
    assert_eq!(config.archive_base_url, "http://mirror.local/images/");
    assert_eq!(config.openai.timeout, Duration::from_secs(5));
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.api_key, "sk-abc");
}

#[test]
fn empty_values_fall_back_to_defaults() {
    let config = config(&[("PACE_CHAT_MODEL", "  ")]).unwrap();
    assert_eq!(config.openai.model, "gpt-3.5-turbo");
}

#[test]
fn malformed_values_are_errors() {
    assert!(config(&[("PACE_BIND_ADDR", "not-an-addr")]).is_err());
    assert!(config(&[("PACE_ARCHIVE_TIMEOUT_SECS", "soon")]).is_err());
}

#[test]
fn system_prompt_can_come_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompt.md");
    std::fs::write(&path, "Talk only about ocean color.").unwrap();

    let config = config(&[("PACE_SYSTEM_PROMPT_FILE", path.to_str().unwrap())]).unwrap();
    assert_eq!(config.system_prompt().unwrap(), "Talk only about ocean color.");

    let missing = config_missing_prompt();
    assert!(missing.system_prompt().is_err());
}

fn config_missing_prompt() -> ServerConfig {
    config(&[("PACE_SYSTEM_PROMPT_FILE", "/nonexistent/prompt.md")]).unwrap()
}
