use std::collections::BTreeMap;

use self::window::{WindowId, WindowState};

pub mod window;

/// Stacking base for windows; the focus order position is added on top.
pub const BASE_Z: i32 = 50;

const TARGET: &str = "cypher_desktop::registry";

/// Authoritative open/minimized state and focus order for the fixed window set.
///
/// Views never mutate this directly: they return intents that the desktop
/// applies here, then every view is re-synced from the new state.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, WindowState>,
    focus_order: Vec<WindowId>, // Last entry is topmost
    base_z: i32,
}

impl WindowRegistry {
    /// All windows open, default stacking with the terminal on top
    pub fn new() -> Self {
        Self::with_focus_order(
            &[
                WindowId::SystemMonitor,
                WindowId::TaskManager,
                WindowId::Terminal,
            ],
            BASE_Z,
        )
    }

    /// Build with a custom initial stacking.
    ///
    /// Duplicates are dropped (first occurrence wins) and windows missing from
    /// `order` are placed underneath the listed ones, so every open window is
    /// reachable in the focus order.
    pub fn with_focus_order(order: &[WindowId], base_z: i32) -> Self {
        let mut focus_order: Vec<WindowId> = Vec::with_capacity(WindowId::ALL.len());
        for id in WindowId::ALL {
            if !order.contains(&id) {
                focus_order.push(id);
            }
        }
        for id in order {
            if !focus_order.contains(id) {
                focus_order.push(*id);
            }
        }

        let windows = WindowId::ALL
            .iter()
            .map(|id| (*id, WindowState::OPEN))
            .collect();

        Self {
            windows,
            focus_order,
            base_z,
        }
    }

    /// Open a window (also restores it). Idempotent.
    pub fn open(&mut self, id: WindowId) -> WindowState {
        self.set(id, WindowState::OPEN);
        if !self.focus_order.contains(&id) {
            self.focus_order.push(id);
        }
        WindowState::OPEN
    }

    /// Close a window. Idempotent; the focus order is left untouched.
    pub fn close(&mut self, id: WindowId) -> WindowState {
        self.set(id, WindowState::CLOSED);
        WindowState::CLOSED
    }

    /// Flip the minimized flag of an open window. Closed windows are left alone.
    pub fn toggle_minimize(&mut self, id: WindowId) -> WindowState {
        let current = self.state(id);
        if !current.is_open {
            tracing::debug!(target: TARGET, window = id.as_str(), "minimize ignored, window closed");
            return current;
        }
        let next = WindowState {
            is_open: true,
            is_minimized: !current.is_minimized,
        };
        self.set(id, next);
        next
    }

    /// Bring a window to the top of the stack
    pub fn focus(&mut self, id: WindowId) {
        if self.focus_order.last() == Some(&id) {
            return;
        }
        self.focus_order.retain(|x| *x != id);
        self.focus_order.push(id);
        tracing::debug!(target: TARGET, window = id.as_str(), order = ?self.focus_order, "focused");
    }

    /// Three-way cycle used by the dock: closed -> open, minimized -> restored,
    /// open -> minimized. Decided from the state before this call.
    pub fn dock_toggle(&mut self, id: WindowId) -> WindowState {
        let current = self.state(id);
        let next = if !current.is_open {
            WindowState::OPEN
        } else if current.is_minimized {
            WindowState {
                is_open: true,
                is_minimized: false,
            }
        } else {
            WindowState {
                is_open: true,
                is_minimized: true,
            }
        };

        if next.is_open && !self.focus_order.contains(&id) {
            self.focus_order.push(id);
        }
        self.set(id, next);
        next
    }

    /// `dock_toggle` by name; names outside the fixed set are ignored.
    pub fn dock_toggle_named(&mut self, name: &str) -> Option<WindowState> {
        match WindowId::from_str(name) {
            Some(id) => Some(self.dock_toggle(id)),
            None => {
                tracing::warn!(target: TARGET, name, "dock toggle for unknown window ignored");
                None
            }
        }
    }

    /// Stacking value for a window: `base_z + position` in the focus order.
    /// A window missing from the focus order sits below every listed one.
    pub fn z_index_of(&self, id: WindowId) -> i32 {
        match self.focus_order.iter().position(|x| *x == id) {
            Some(index) => self.base_z + index as i32,
            None => self.base_z - 1,
        }
    }

    pub fn state(&self, id: WindowId) -> WindowState {
        self.windows.get(&id).copied().unwrap_or(WindowState::CLOSED)
    }

    pub fn states(&self) -> &BTreeMap<WindowId, WindowState> {
        &self.windows
    }

    pub fn focus_order(&self) -> &[WindowId] {
        &self.focus_order
    }

    /// Every window id from bottom to top
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut ids = WindowId::ALL.to_vec();
        ids.sort_by_key(|id| self.z_index_of(*id));
        ids
    }

    /// Topmost window that is open and not minimized
    pub fn topmost_visible(&self) -> Option<WindowId> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|id| self.state(*id).is_visible())
    }

    fn set(&mut self, id: WindowId, new_state: WindowState) {
        let previous = self.windows.insert(id, new_state);
        if previous != Some(new_state) {
            tracing::debug!(
                target: TARGET,
                window = id.as_str(),
                is_open = new_state.is_open,
                is_minimized = new_state.is_minimized,
                "window state changed"
            );
        }
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
