// Dock: fixed control strip mapping clicks to registry mutations

use std::collections::BTreeMap;

use crate::state::window::{WindowId, WindowState};

const TARGET: &str = "cypher_desktop::dock";

/// What a dock item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTarget {
    /// Back to the bio page; a dock item only in the compact variant
    Home,
    Window(WindowId),
    Projects,
    Contact,
}

impl DockTarget {
    pub fn label(&self) -> &'static str {
        match self {
            DockTarget::Home => "Home",
            DockTarget::Window(id) => id.label(),
            DockTarget::Projects => "Projects",
            DockTarget::Contact => "Contact",
        }
    }
}

/// Page in the hero panel: beside the windows on the desktop, filling the
/// content band in compact mode when no view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Projects,
    Contact,
}

/// Small dot under an item showing that its window is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    None,
    Dim,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockItem {
    pub target: DockTarget,
    pub highlighted: bool,
    pub indicator: Indicator,
}

/// Layout variant of the dock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockMode {
    /// Floating windows: one toggle per window
    Desktop,
    /// Narrow screens: a single active view replaces the window set
    Compact { active_view: Option<WindowId> },
}

/// Result of clicking a dock item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    Toggle(WindowId),
    ShowView(Option<WindowId>),
    ShowPage(Page),
}

/// Stateless apart from its mode; every visual is derived from the states
/// and page it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dock {
    mode: DockMode,
}

impl Dock {
    pub fn new(mode: DockMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DockMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DockMode) {
        self.mode = mode;
    }

    pub fn items(&self, states: &BTreeMap<WindowId, WindowState>, page: Page) -> Vec<DockItem> {
        let mut items = Vec::with_capacity(WindowId::ALL.len() + 3);
        // Pages only show where no compact view covers them
        let page_visible = match self.mode {
            DockMode::Desktop => true,
            DockMode::Compact { active_view } => active_view.is_none(),
        };

        match self.mode {
            DockMode::Desktop => {
                for id in WindowId::ALL {
                    let state = states.get(&id).copied().unwrap_or(WindowState::CLOSED);
                    let indicator = if state.is_effectively_minimized() {
                        Indicator::Dim
                    } else if state.is_open {
                        Indicator::Bright
                    } else {
                        Indicator::None
                    };
                    items.push(DockItem {
                        target: DockTarget::Window(id),
                        highlighted: state.is_visible(),
                        indicator,
                    });
                }
            }
            DockMode::Compact { active_view } => {
                items.push(DockItem {
                    target: DockTarget::Home,
                    highlighted: page_visible && page == Page::Home,
                    indicator: Indicator::None,
                });
                for id in WindowId::ALL {
                    let active = active_view == Some(id);
                    items.push(DockItem {
                        target: DockTarget::Window(id),
                        highlighted: active,
                        indicator: if active {
                            Indicator::Bright
                        } else {
                            Indicator::None
                        },
                    });
                }
            }
        }

        for (target, shows) in [
            (DockTarget::Projects, Page::Projects),
            (DockTarget::Contact, Page::Contact),
        ] {
            items.push(DockItem {
                target,
                highlighted: page_visible && page == shows,
                indicator: Indicator::None,
            });
        }
        items
    }

    /// Map a click to an action for the owner to apply
    pub fn activate(&self, target: DockTarget) -> DockAction {
        let action = match (self.mode, target) {
            (_, DockTarget::Home) => DockAction::ShowPage(Page::Home),
            (_, DockTarget::Projects) => DockAction::ShowPage(Page::Projects),
            (_, DockTarget::Contact) => DockAction::ShowPage(Page::Contact),
            (DockMode::Desktop, DockTarget::Window(id)) => DockAction::Toggle(id),
            (DockMode::Compact { .. }, DockTarget::Window(id)) => DockAction::ShowView(Some(id)),
        };
        tracing::debug!(target: TARGET, ?target, ?action, "dock activated");
        action
    }
}
