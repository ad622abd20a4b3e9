use url::Url;

/// Port assumed for webhook URLs when the page's own port is empty.
pub const DEFAULT_PORT: &str = "6001";

/// Protocol, hostname and port the remote is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme with its trailing colon, e.g. `http:`.
    pub protocol: String,
    pub hostname: String,
    /// Empty when the scheme's default port is in use.
    pub port: String,
}

impl PageLocation {
    pub fn from_url(url: &Url) -> Self {
        Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// `<protocol>//<hostname>:<port>`, with [`DEFAULT_PORT`] standing in for an empty port.
    pub fn base_url(&self) -> String {
        let port = if self.port.is_empty() {
            DEFAULT_PORT
        } else {
            &self.port
        };
        format!("{}//{}:{}", self.protocol, self.hostname, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_reads_as_empty() {
        let location = PageLocation::from_url(&Url::parse("https://remote.example/").unwrap());
        assert_eq!(location.port, "");
        assert_eq!(location.base_url(), "https://remote.example:6001");
    }

    #[test]
    fn explicit_port_is_kept() {
        let location = PageLocation::from_url(&Url::parse("http://localhost:8080/x").unwrap());
        assert_eq!(location.protocol, "http:");
        assert_eq!(location.base_url(), "http://localhost:8080");
    }
}
