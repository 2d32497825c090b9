//! Connection status indicator.

use serde::{Deserialize, Serialize};

/// Connection state shown by the global status indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// Full class attribute for the indicator element.
    pub fn css_class(&self) -> String {
        format!("status-indicator {}", self.as_str())
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Holds the single global status value. No transition rules: any state may
/// follow any other.
#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    status: ConnectionStatus,
    changes: u64,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.changes += 1;
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// How many times `set_status` has been called.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}
