use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Base URL of the router web interface, e.g. `http://192.168.1.1`.
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub login: String,

    #[serde(default)]
    pub password: String,

    /// Session cookies are kept here so later runs can skip the handshake.
    #[serde(default = "default_session_file")]
    pub session_file: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            login: String::new(),
            password: String::new(),
            session_file: default_session_file(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_session_file() -> String {
    "./router-session.json".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}
