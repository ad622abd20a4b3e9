use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Number of send and receive slots shown by the remote.
pub const SLOT_COUNT: usize = 4;

pub const DEFAULT_PAYLOAD: &str = "{}";

/// Editor text shown whenever a receive slot is opened; its saved text is never loaded back.
pub const RECEIVE_PLACEHOLDER: &str = r#"{"message": "This is a receiving endpoint"}"#;

const SEEDED_PAYLOADS: [&str; SLOT_COUNT] = [
    r#"{"message": "Hello from API Remote"}"#,
    r#"{"data": "test data"}"#,
    r#"{"title": "Test Post", "body": "This is a test", "userId": 1}"#,
    r#"{"key": "value"}"#,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unsupported method '{}'", wanted))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Send,
    Receive,
}

impl SlotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Send => "send",
            SlotKind::Receive => "receive",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "send" => Ok(SlotKind::Send),
            "receive" => Ok(SlotKind::Receive),
            other => Err(format!("unknown slot kind '{}'", other)),
        }
    }
}

/// In-memory method and payload configuration, keyed by slot index.
#[derive(Debug, Clone)]
pub struct SlotConfig {
    methods: HashMap<usize, Method>,
    payloads: HashMap<usize, String>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        let methods = (0..SLOT_COUNT).map(|i| (i, Method::Post)).collect();
        let payloads = SEEDED_PAYLOADS
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.to_string()))
            .collect();
        Self {
            methods,
            payloads,
        }
    }
}

impl SlotConfig {
    pub fn method(&self, index: usize) -> Option<Method> {
        self.methods.get(&index).copied()
    }

    pub fn set_method(&mut self, index: usize, method: Method) {
        self.methods.insert(index, method);
    }

    pub fn payload(&self, index: usize) -> Option<&str> {
        self.payloads.get(&index).map(String::as_str)
    }

    pub fn set_payload(&mut self, index: usize, text: impl Into<String>) {
        self.payloads.insert(index, text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_defaults_to_post_with_valid_json() {
        let config = SlotConfig::default();
        for i in 0..SLOT_COUNT {
            assert_eq!(config.method(i), Some(Method::Post));
            let payload = config.payload(i).expect("seeded payload");
            assert!(serde_json::from_str::<serde_json::Value>(payload).is_ok());
        }
    }

    #[test]
    fn unknown_slot_has_no_configuration() {
        let config = SlotConfig::default();
        assert_eq!(config.method(SLOT_COUNT), None);
        assert_eq!(config.payload(SLOT_COUNT), None);
    }

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("patch".parse::<Method>(), Ok(Method::Patch));
        assert_eq!(" DELETE ".parse::<Method>(), Ok(Method::Delete));
        assert!("TRACE".parse::<Method>().is_err());
        assert_eq!(serde_json::to_string(&Method::Put).unwrap(), "\"PUT\"");
    }

    #[test]
    fn slot_kind_round_trips_through_text() {
        assert_eq!("Send".parse::<SlotKind>(), Ok(SlotKind::Send));
        assert_eq!(SlotKind::Receive.to_string(), "receive");
        assert!("both".parse::<SlotKind>().is_err());
    }
}
