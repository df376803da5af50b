//! JSON-RPC method routing.

use std::fmt;

/// Prefix of client notifications.
const NOTIFICATION_PREFIX: &str = "notifications/";

/// A JSON-RPC method the server recognizes, or the name it did not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpMethod {
    /// Session handshake.
    Initialize,
    /// `tools/list`.
    ListTools,
    /// `tools/call`.
    CallTool,
    /// Liveness check.
    Ping,
    /// Any `notifications/*` message; acknowledged and otherwise ignored.
    Notification(String),
    /// Anything else; answered with "method not found".
    Unknown(String),
}

impl McpMethod {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::ListTools => "tools/list",
            Self::CallTool => "tools/call",
            Self::Ping => "ping",
            Self::Notification(name) | Self::Unknown(name) => name,
        }
    }

    /// Returns true unless the method is [`McpMethod::Unknown`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for McpMethod {
    fn from(name: &str) -> Self {
        match name {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ListTools,
            "tools/call" => Self::CallTool,
            "ping" => Self::Ping,
            other if other.starts_with(NOTIFICATION_PREFIX) => Self::Notification(other.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for McpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("initialize", &McpMethod::Initialize)]
    #[test_case("tools/list", &McpMethod::ListTools)]
    #[test_case("tools/call", &McpMethod::CallTool)]
    #[test_case("ping", &McpMethod::Ping)]
    fn test_known_methods_round_trip(name: &str, expected: &McpMethod) {
        let method = McpMethod::from(name);
        assert_eq!(&method, expected);
        assert_eq!(method.as_str(), name);
        assert!(method.is_known());
    }

    #[test]
    fn test_notifications_are_known() {
        let method = McpMethod::from("notifications/initialized");
        assert_eq!(method, McpMethod::Notification("notifications/initialized".to_string()));
        assert!(method.is_known());
    }

    #[test]
    fn test_unknown_method_keeps_its_name() {
        let method = McpMethod::from("resources/list");
        assert!(!method.is_known());
        assert_eq!(method.to_string(), "resources/list");
    }
}
