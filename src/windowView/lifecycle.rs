// Open / minimize / close state machine for a single window view

use std::time::Duration;

/// Default length of the close animation
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Closed,
    OpenActive,
    OpenMinimized,
    /// Exit animation playing; the registry still reports the window open
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Registry state pushed down to the view
    Props { is_open: bool, is_minimized: bool },
    MinimizeClicked,
    CloseClicked,
    /// The close animation ran to completion
    AnimationFinished,
}

/// What the view has to report to its owner after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    NotifyMinimize,
    NotifyClose,
}

impl Lifecycle {
    /// Initial state for the given registry flags
    pub fn from_props(is_open: bool, is_minimized: bool) -> Self {
        Lifecycle::Closed
            .next(LifecycleEvent::Props {
                is_open,
                is_minimized,
            })
            .0
    }

    /// Transition table
    pub fn next(self, event: LifecycleEvent) -> (Lifecycle, Option<Effect>) {
        use Lifecycle::*;
        use LifecycleEvent::*;

        match (self, event) {
            // Closing externally always wins and never animates
            (_, Props { is_open: false, .. }) => (Closed, None),

            // A close that is already playing is only cancelled by a minimize
            (Closing, Props { is_minimized: true, .. }) => (OpenMinimized, None),
            (Closing, Props { .. }) => (Closing, None),
            (_, Props { is_minimized: true, .. }) => (OpenMinimized, None),
            (_, Props { .. }) => (OpenActive, None),

            (OpenActive, MinimizeClicked) => (OpenMinimized, Some(Effect::NotifyMinimize)),
            (OpenMinimized, MinimizeClicked) => (OpenActive, Some(Effect::NotifyMinimize)),
            (state, MinimizeClicked) => (state, None),

            (OpenActive, CloseClicked) => (Closing, None),
            (state, CloseClicked) => (state, None),

            (Closing, AnimationFinished) => (Closed, Some(Effect::NotifyClose)),
            // Completion arriving after the close was cancelled
            (state, AnimationFinished) => (state, None),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Lifecycle::Closed)
    }

    /// Drawn collapsed and ignoring pointer input
    pub fn is_shrunk(&self) -> bool {
        matches!(self, Lifecycle::OpenMinimized | Lifecycle::Closing)
    }
}
