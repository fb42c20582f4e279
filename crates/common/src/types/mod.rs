use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub status: String,
    pub environment: String,
    pub timestamp: String,
    pub database: String,
    /// Seconds since process start.
    pub uptime: f64,
}

/// Body of `GET /api/info`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Info {
    pub app: String,
    pub version: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Reported database state. Only reflects whether a URL is configured;
/// no connection is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseIndicator {
    Connected,
    Disconnected,
}

impl DatabaseIndicator {
    pub fn from_configured(configured: bool) -> Self {
        if configured { Self::Connected } else { Self::Disconnected }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}
