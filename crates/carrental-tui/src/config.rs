//! Client configuration.

use std::path::PathBuf;

use carrental_app::SessionConfig;

/// Default broker address.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:61613";

/// Default log file. The terminal is owned by the UI, so logs go to disk.
pub const DEFAULT_LOG_FILE: &str = "carrental-tui.log";

/// Runtime configuration for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Broker address (host:port).
    pub server_addr: String,
    /// Virtual host sent in CONNECT.
    pub host: String,
    /// Optional broker login.
    pub login: Option<String>,
    /// Optional broker passcode.
    pub passcode: Option<String>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log destination.
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_owned(),
            host: "localhost".to_owned(),
            login: None,
            passcode: None,
            log_level: "info".to_owned(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ClientConfig {
    /// CONNECT parameters.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            host: self.host.clone(),
            login: self.login.clone(),
            passcode: self.passcode.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_carries_credentials() {
        let config = ClientConfig {
            host: "rental".into(),
            login: Some("guest".into()),
            ..ClientConfig::default()
        };

        let session = config.session();
        assert_eq!(session.host, "rental");
        assert_eq!(session.login.as_deref(), Some("guest"));
        assert_eq!(session.passcode, None);
    }

    #[test]
    fn default_session_matches_app_default() {
        assert_eq!(ClientConfig::default().session(), SessionConfig::default());
    }
}
