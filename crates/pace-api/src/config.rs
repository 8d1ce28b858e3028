use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use pace_chat::completion::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, OpenAiConfig};
use pace_chat::prompt::DEFAULT_SYSTEM_PROMPT;
use pace_core::image_url::DEFAULT_ARCHIVE_BASE_URL;
use pace_core::keys::CHATS_DIR;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ARCHIVE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 60;

/// Server settings, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub chat_dir: PathBuf,
    /// Always ends with `/`.
    pub archive_base_url: String,
    pub archive_timeout: Duration,
    pub openai: OpenAiConfig,
    pub system_prompt_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset and empty values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let bind_addr = var_or("PACE_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid PACE_BIND_ADDR {bind_addr:?}: {e}"))?;

        let mut archive_base_url = var_or("PACE_ARCHIVE_BASE_URL", DEFAULT_ARCHIVE_BASE_URL);
        if !archive_base_url.ends_with('/') {
            archive_base_url.push('/');
        }

        let secs = |key: &str, default: u64| -> eyre::Result<Duration> {
            match var(key) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| eyre::eyre!("invalid {key} {raw:?}: {e}")),
            }
        };

        Ok(Self {
            bind_addr,
            chat_dir: PathBuf::from(var_or("PACE_CHAT_DIR", CHATS_DIR)),
            archive_base_url,
            archive_timeout: secs("PACE_ARCHIVE_TIMEOUT_SECS", DEFAULT_ARCHIVE_TIMEOUT_SECS)?,
            openai: OpenAiConfig {
                base_url: var_or("PACE_OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                api_key: var("OPENAI_API_KEY").unwrap_or_default(),
                model: var_or("PACE_CHAT_MODEL", DEFAULT_MODEL),
                timeout: secs("PACE_CHAT_TIMEOUT_SECS", DEFAULT_CHAT_TIMEOUT_SECS)?,
            },
            system_prompt_file: var("PACE_SYSTEM_PROMPT_FILE").map(PathBuf::from),
        })
    }

    /// The system instruction for new conversations: the configured file's
    /// contents, or the built-in prompt.
    pub fn system_prompt(&self) -> eyre::Result<String> {
        match &self.system_prompt_file {
            None => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                eyre::eyre!("failed to read system prompt at {}: {e}", path.display())
            }),
        }
    }
}
