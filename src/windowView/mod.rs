// Window view: one movable, closable, minimizable panel.
// Holds only transient UI state; everything authoritative lives in the registry.

pub mod drag;
pub mod lifecycle;
pub mod sizing;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::window::WindowId;

pub use drag::{DragSession, Position};
pub use lifecycle::{Effect, Lifecycle, LifecycleEvent, CLOSE_ANIMATION};
pub use sizing::{resolve_width, Dimension, Placement, Size};

const TARGET: &str = "cypher_desktop::window";

/// Static description of a window, normally loaded from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowSpec {
    pub title: String,
    pub placement: Placement,
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: f64,
    pub max_width: Option<f64>,
    pub show_controls: bool,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            placement: Placement::default(),
            width: Dimension::auto(),
            height: Dimension::auto(),
            min_width: 28.0,
            max_width: None,
            show_controls: true,
        }
    }
}

/// Registry-derived inputs, pushed into every view after each mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProps {
    pub is_open: bool,
    pub is_minimized: bool,
    pub z_index: i32,
}

/// Requests a view makes of its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowIntent {
    Focus(WindowId),
    Minimize(WindowId),
    Close(WindowId),
}

/// Which part of a window a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    CloseButton,
    MinimizeButton,
    TitleBar,
    Body,
}

/// How the window should be drawn right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowVisual {
    Hidden,
    Shown,
    /// Collapsed (minimized or closing): no content, no pointer input
    Shrunk,
}

pub struct WindowView {
    id: WindowId,
    spec: WindowSpec,
    props: WindowProps,
    lifecycle: Lifecycle,
    position: Position,
    drag: Option<DragSession>,
    /// Set once the user has moved the window; parent resizes stop re-deriving
    /// the position from the placement after that.
    dragged: bool,
    parent: Option<Size>,
    close_delay: Duration,
    closing_elapsed: Duration,
}

impl WindowView {
    pub fn new(id: WindowId, spec: WindowSpec, props: WindowProps, close_delay: Duration) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::from_props(props.is_open, props.is_minimized),
            spec,
            props,
            position: Position::default(),
            drag: None,
            dragged: false,
            parent: None,
            close_delay,
            closing_elapsed: Duration::ZERO,
        }
    }

    /// First layout pass: measure the parent and derive the position.
    pub fn mount(&mut self, parent: Option<Size>) {
        self.parent = parent;
        self.position = self.spec.placement.resolve(parent);
        self.dragged = false;
    }

    /// Parent region changed size. Re-derives the position unless the window
    /// has been dragged.
    pub fn on_parent_resize(&mut self, parent: Option<Size>) {
        self.parent = parent;
        if !self.dragged {
            self.position = self.spec.placement.resolve(parent);
        }
    }

    /// Push new registry-derived props
    pub fn set_props(&mut self, props: WindowProps) {
        self.props = props;
        self.apply(LifecycleEvent::Props {
            is_open: props.is_open,
            is_minimized: props.is_minimized,
        });
        if !self.lifecycle.is_open() || self.lifecycle.is_shrunk() {
            self.drag = None;
        }
    }

    /// Pointer pressed on this window. Always asks for focus; on the title bar
    /// (outside the controls) it also starts a drag.
    pub fn pointer_down(&mut self, pointer: Position, target: HitTarget) -> Vec<WindowIntent> {
        if !self.is_interactive() {
            return Vec::new();
        }

        let mut intents = vec![WindowIntent::Focus(self.id)];
        match target {
            HitTarget::TitleBar => {
                self.drag = Some(DragSession::begin(pointer, self.position));
                tracing::trace!(target: TARGET, window = self.id.as_str(), "drag started");
            }
            HitTarget::CloseButton if self.spec.show_controls => {
                intents.extend(self.click_close());
            }
            HitTarget::MinimizeButton if self.spec.show_controls => {
                intents.extend(self.click_minimize());
            }
            _ => {}
        }
        intents
    }

    pub fn pointer_move(&mut self, pointer: Position) {
        if let Some(session) = self.drag {
            self.position = session.position_for(pointer);
            self.dragged = true;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            tracing::trace!(
                target: TARGET,
                window = self.id.as_str(),
                x = self.position.x,
                y = self.position.y,
                "drag finished"
            );
        }
    }

    /// Pointer capture went away mid-gesture (e.g. the terminal lost focus)
    pub fn capture_lost(&mut self) {
        self.drag = None;
    }

    /// Close button. Starts the exit animation; the close intent is only
    /// emitted by `tick` once the animation has finished.
    pub fn click_close(&mut self) -> Option<WindowIntent> {
        self.apply(LifecycleEvent::CloseClicked)
    }

    pub fn click_minimize(&mut self) -> Option<WindowIntent> {
        self.apply(LifecycleEvent::MinimizeClicked)
    }

    /// Advance the view's clock
    pub fn tick(&mut self, elapsed: Duration) -> Option<WindowIntent> {
        if self.lifecycle != Lifecycle::Closing {
            return None;
        }
        self.closing_elapsed += elapsed;
        if self.closing_elapsed >= self.close_delay {
            self.apply(LifecycleEvent::AnimationFinished)
        } else {
            None
        }
    }

    fn apply(&mut self, event: LifecycleEvent) -> Option<WindowIntent> {
        let (next, effect) = self.lifecycle.next(event);
        if next != self.lifecycle {
            tracing::debug!(
                target: TARGET,
                window = self.id.as_str(),
                from = ?self.lifecycle,
                to = ?next,
                "lifecycle transition"
            );
            if next == Lifecycle::Closing {
                self.closing_elapsed = Duration::ZERO;
                self.drag = None;
            }
            self.lifecycle = next;
        }

        effect.map(|effect| match effect {
            Effect::NotifyMinimize => WindowIntent::Minimize(self.id),
            Effect::NotifyClose => WindowIntent::Close(self.id),
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn z_index(&self) -> i32 {
        self.props.z_index
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Open, fully shown and accepting pointer input
    pub fn is_interactive(&self) -> bool {
        self.lifecycle == Lifecycle::OpenActive
    }

    pub fn visual(&self) -> WindowVisual {
        match self.lifecycle {
            Lifecycle::Closed => WindowVisual::Hidden,
            Lifecycle::OpenActive => WindowVisual::Shown,
            Lifecycle::OpenMinimized | Lifecycle::Closing => WindowVisual::Shrunk,
        }
    }

    /// Width after clamping against the bounds and the measured parent
    pub fn width(&self) -> Dimension {
        resolve_width(
            &self.spec.width,
            self.spec.min_width,
            self.spec.max_width,
            self.parent,
        )
    }

    pub fn height(&self) -> &Dimension {
        &self.spec.height
    }
}
