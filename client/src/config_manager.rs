use crate::error::RemoteError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Endpoint presets shared with the relay's own settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub send_endpoints: Vec<String>,
    #[serde(default)]
    pub receive_endpoints: Vec<String>,
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

/// `data/settings.json` first, then the platform config directory.
fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("data").join(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("api_remote").join(SETTINGS_FILE_NAME));
    }
    paths
}

pub fn read_settings(path: &Path) -> Result<Settings, RemoteError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let settings = serde_json::from_reader(reader)?;
    Ok(settings)
}

/// Loads settings from `explicit` or the default locations.
///
/// A missing file yields empty settings; a malformed one is an error.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, RemoteError> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => default_settings_paths(),
    };

    for path in &candidates {
        if path.exists() {
            info!("Loading settings from {}", path.display());
            return read_settings(path);
        }
    }

    warn!(
        "Settings file not found (looked in {:?}). Copy data/settings.example.json to data/settings.json to preset endpoints.",
        candidates
    );
    Ok(Settings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("api_remote_{}_{}", std::process::id(), name))
    }

    #[test]
    fn settings_file_is_parsed() {
        let path = temp_path("settings_ok.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"send_endpoints": ["https://httpbin.org/post"], "receive_endpoints": ["/hook"], "default_headers": {{"X-Test": "1"}}}}"#
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.send_endpoints, ["https://httpbin.org/post"]);
        assert_eq!(settings.receive_endpoints, ["/hook"]);
        assert_eq!(settings.default_headers.get("X-Test").map(String::as_str), Some("1"));
    }

    #[test]
    fn missing_file_yields_empty_settings() {
        let settings = load_settings(Some(&temp_path("does_not_exist.json"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("settings_bad.json");
        std::fs::write(&path, "{ nope").unwrap();
        let result = load_settings(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RemoteError::Json(_))));
    }
}
