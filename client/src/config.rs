use crate::error::RemoteError;
use crate::poller::DEFAULT_POLL_INTERVAL;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:6001";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub relay_url: Url,
    pub poll_interval: Duration,
    /// Explicit settings file; `None` means search the default locations.
    pub settings_file: Option<PathBuf>,
    pub clipboard_command: Option<String>,
}

impl AppConfig {
    /// Reads `.env` and the process environment.
    pub fn new() -> Result<Self, RemoteError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, RemoteError> {
        let relay_url_input = get("RELAY_URL").unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
        let relay_url = Url::parse(&relay_url_input)?;
        if relay_url.scheme() != "http" && relay_url.scheme() != "https" {
            return Err(RemoteError::Config(format!(
                "RELAY_URL must start with 'http://' or 'https://', got '{}'",
                relay_url_input
            )));
        }

        let poll_interval = match get("POLL_INTERVAL_MS") {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    RemoteError::Config(format!("POLL_INTERVAL_MS is not a number: '{}'", raw))
                })?;
                if millis == 0 {
                    return Err(RemoteError::Config(
                        "POLL_INTERVAL_MS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_millis(millis)
            }
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            relay_url,
            poll_interval,
            settings_file: get("SETTINGS_FILE").map(PathBuf::from),
            clipboard_command: get("CLIPBOARD_COMMAND").filter(|c| !c.trim().is_empty()),
        })
    }
}
