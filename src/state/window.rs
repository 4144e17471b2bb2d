use serde::{Deserialize, Serialize};

/// The fixed set of windows the desktop knows about.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum WindowId {
    Terminal,
    TaskManager,
    SystemMonitor,
}

impl WindowId {
    pub const ALL: [WindowId; 3] = [
        WindowId::Terminal,
        WindowId::TaskManager,
        WindowId::SystemMonitor,
    ];

    /// Parse from the camelCase name used by the dock and config
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "terminal" => Some(WindowId::Terminal),
            "taskManager" => Some(WindowId::TaskManager),
            "systemMonitor" => Some(WindowId::SystemMonitor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowId::Terminal => "terminal",
            WindowId::TaskManager => "taskManager",
            WindowId::SystemMonitor => "systemMonitor",
        }
    }

    /// Short label shown on the dock
    pub fn label(&self) -> &'static str {
        match self {
            WindowId::Terminal => "Terminal",
            WindowId::TaskManager => "Tasks",
            WindowId::SystemMonitor => "System",
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub is_open: bool,
    pub is_minimized: bool, // Only meaningful while open
}

impl WindowState {
    pub const OPEN: WindowState = WindowState {
        is_open: true,
        is_minimized: false,
    };

    pub const CLOSED: WindowState = WindowState {
        is_open: false,
        is_minimized: false,
    };

    /// Minimized as far as rendering is concerned; closed takes precedence.
    pub fn is_effectively_minimized(&self) -> bool {
        self.is_open && self.is_minimized
    }

    /// Open and not minimized
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

impl Default for WindowState {
    fn default() -> Self {
        WindowState::OPEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_id_names_round_trip() {
        for id in WindowId::ALL {
            assert_eq!(WindowId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(WindowId::from_str("browser"), None);
        assert_eq!(WindowId::from_str("Terminal"), None);
    }

    #[test]
    fn test_closed_takes_precedence_over_minimized() {
        let stale = WindowState {
            is_open: false,
            is_minimized: true,
        };
        assert!(!stale.is_effectively_minimized());
        assert!(!stale.is_visible());

        let minimized = WindowState {
            is_open: true,
            is_minimized: true,
        };
        assert!(minimized.is_effectively_minimized());
        assert!(!minimized.is_visible());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&WindowId::TaskManager).unwrap();
        assert_eq!(json, "\"taskManager\"");

        let state: WindowState =
            serde_json::from_str(r#"{"isOpen":true,"isMinimized":true}"#).unwrap();
        assert!(state.is_effectively_minimized());
    }
}
