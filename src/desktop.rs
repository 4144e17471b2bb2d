// Desktop controller: owns the registry, the window views and the dock,
// routes terminal input and applies view intents back onto the registry.

use std::collections::BTreeMap;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use uuid::Uuid;

use crate::config::{DesktopConfig, Profile, Project};
use crate::content::{BodyContext, BOOT_LINES};
use crate::dock::{Dock, DockAction, DockMode, DockTarget, Page};
use crate::reveal::RevealStore;
use crate::state::window::WindowId;
use crate::state::WindowRegistry;
use crate::ui::layout::{desktop_layout, dock_slots, rect_contains, window_frame, DesktopLayout};
use crate::window_view::{Position, Size, WindowIntent, WindowProps, WindowView, WindowVisual};

const TARGET: &str = "cypher_desktop::desktop";

/// Reveal key for the terminal's boot log
pub const BOOT_REVEAL_KEY: &str = "terminal.boot";
pub const BOOT_LINE_INTERVAL: Duration = Duration::from_millis(150);
pub const CURSOR_BLINK: Duration = Duration::from_millis(530);

pub struct Desktop {
    config: DesktopConfig,
    registry: WindowRegistry,
    views: BTreeMap<WindowId, WindowView>,
    dock: Dock,
    page: Page,
    reveal: RevealStore,
    layout: DesktopLayout,
    mounted: bool,
    session_id: String,
    status_message: Option<String>,
    /// Window holding the pointer while a drag is in progress
    captured: Option<WindowId>,
    boot_elapsed: Duration,
    cursor_elapsed: Duration,
    cursor_visible: bool,
    should_quit: bool,
}

impl Desktop {
    pub fn new(config: DesktopConfig, area: Rect) -> Self {
        let registry = WindowRegistry::with_focus_order(&config.focus_order, config.base_z);

        let views = WindowId::ALL
            .iter()
            .map(|id| {
                let view = WindowView::new(
                    *id,
                    config.window_spec(*id),
                    props_for(&registry, *id),
                    config.close_delay(),
                );
                (*id, view)
            })
            .collect();

        let session_id = Uuid::new_v4().to_string();
        tracing::info!(target: TARGET, session = %session_id, "desktop created");

        let mut desktop = Self {
            config,
            registry,
            views,
            dock: Dock::new(DockMode::Desktop),
            page: Page::Home,
            reveal: RevealStore::new(),
            layout: desktop_layout(Rect::default(), false),
            mounted: false,
            session_id,
            status_message: None,
            captured: None,
            boot_elapsed: Duration::ZERO,
            cursor_elapsed: Duration::ZERO,
            cursor_visible: true,
            should_quit: false,
        };
        desktop.resize(area);
        desktop
    }

    /// Use an existing reveal store instead of a fresh one
    pub fn with_reveal_store(mut self, reveal: RevealStore) -> Self {
        self.reveal = reveal;
        self
    }

    /// Re-layout for a new terminal size
    pub fn resize(&mut self, area: Rect) {
        let compact = area.width < self.config.compact_below;
        self.layout = desktop_layout(area, compact);

        match (compact, self.dock.mode()) {
            (true, DockMode::Desktop) => {
                self.release_capture();
                self.dock.set_mode(DockMode::Compact { active_view: None });
            }
            (false, DockMode::Compact { .. }) => self.dock.set_mode(DockMode::Desktop),
            _ => {}
        }

        let region = self.layout.windows;
        let parent = if region.width == 0 || region.height == 0 {
            None
        } else {
            Some(Size::new(region.width as f64, region.height as f64))
        };

        for view in self.views.values_mut() {
            if self.mounted {
                view.on_parent_resize(parent);
            } else {
                view.mount(parent);
            }
        }
        self.mounted = true;
        tracing::debug!(target: TARGET, width = area.width, height = area.height, compact, "layout updated");
    }

    /// Route one terminal event. Returns whether anything may have changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                true
            }
            Event::FocusLost => {
                self.release_capture();
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('1') => self.dock_activate(DockTarget::Window(WindowId::Terminal)),
            KeyCode::Char('2') => self.dock_activate(DockTarget::Window(WindowId::TaskManager)),
            KeyCode::Char('3') => self.dock_activate(DockTarget::Window(WindowId::SystemMonitor)),
            KeyCode::Char('h') => self.dock_activate(DockTarget::Home),
            KeyCode::Char('p') => self.dock_activate(DockTarget::Projects),
            KeyCode::Char('c') => self.dock_activate(DockTarget::Contact),
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let pointer = Position::new(mouse.column as f64, mouse.row as f64);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // The dock is stacked above every window
                if let Some(target) = self.dock_target_at(mouse.column, mouse.row) {
                    self.dock_activate(target);
                    return true;
                }
                if self.is_compact() {
                    return false;
                }
                self.press_window(mouse.column, mouse.row, pointer)
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.captured {
                Some(id) => {
                    if let Some(view) = self.views.get_mut(&id) {
                        view.pointer_move(pointer);
                    }
                    true
                }
                None => false,
            },
            MouseEventKind::Up(MouseButton::Left) => match self.captured.take() {
                Some(id) => {
                    if let Some(view) = self.views.get_mut(&id) {
                        view.pointer_up();
                    }
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Pointer-down over the window stack; the topmost window under the
    /// pointer takes it.
    fn press_window(&mut self, column: u16, row: u16, pointer: Position) -> bool {
        let region = self.layout.windows;

        for id in self.registry.stacking_order().into_iter().rev() {
            let Some(view) = self.views.get_mut(&id) else {
                continue;
            };
            if !view.is_interactive() {
                continue;
            }
            let frame = window_frame(view, region);
            let Some(target) = frame.hit_target(column, row, view.spec().show_controls) else {
                continue;
            };

            let intents = view.pointer_down(pointer, target);
            if view.is_dragging() {
                self.captured = Some(id);
            }
            self.apply_intents(intents);
            return true;
        }
        false
    }

    fn dock_target_at(&self, column: u16, row: u16) -> Option<DockTarget> {
        let items = self.dock.items(self.registry.states(), self.page);
        dock_slots(self.layout.dock, items.len())
            .into_iter()
            .zip(items)
            .find(|(slot, _)| rect_contains(*slot, column, row))
            .map(|(_, item)| item.target)
    }

    /// Apply a dock click
    pub fn dock_activate(&mut self, target: DockTarget) {
        match self.dock.activate(target) {
            DockAction::Toggle(id) => {
                self.registry.dock_toggle(id);
                self.sync_views();
            }
            DockAction::ShowView(active_view) => {
                if let DockMode::Compact { .. } = self.dock.mode() {
                    self.dock.set_mode(DockMode::Compact { active_view });
                }
            }
            DockAction::ShowPage(page) => self.show_page(page),
        }
    }

    fn show_page(&mut self, page: Page) {
        match self.dock.mode() {
            // Clicking the shown page again goes back to the bio
            DockMode::Desktop if self.page == page => self.page = Page::Home,
            DockMode::Desktop => self.page = page,
            DockMode::Compact { .. } => {
                self.dock.set_mode(DockMode::Compact { active_view: None });
                self.page = page;
            }
        }
        if page == Page::Contact {
            self.status_message = Some(format!("contact: mailto:{}", self.config.profile.email));
        }
        tracing::debug!(target: TARGET, page = ?self.page, "page shown");
    }

    /// Apply intents reported by views, then push the new state back down
    pub fn apply_intents(&mut self, intents: impl IntoIterator<Item = WindowIntent>) {
        let mut changed = false;
        for intent in intents {
            match intent {
                WindowIntent::Focus(id) => self.registry.focus(id),
                WindowIntent::Minimize(id) => {
                    self.registry.toggle_minimize(id);
                }
                WindowIntent::Close(id) => {
                    self.registry.close(id);
                }
            }
            changed = true;
        }
        if changed {
            self.sync_views();
        }
    }

    fn sync_views(&mut self) {
        for (id, view) in self.views.iter_mut() {
            view.set_props(props_for(&self.registry, *id));
        }
        if let Some(id) = self.captured {
            if self.views.get(&id).is_some_and(|v| !v.is_dragging()) {
                self.captured = None;
            }
        }
    }

    fn release_capture(&mut self) {
        if let Some(id) = self.captured.take() {
            if let Some(view) = self.views.get_mut(&id) {
                view.capture_lost();
            }
        }
    }

    /// Advance timers: close animations, cursor blink, boot log
    pub fn tick(&mut self, elapsed: Duration) {
        let finished: Vec<WindowIntent> = self
            .views
            .values_mut()
            .filter_map(|view| view.tick(elapsed))
            .collect();
        self.apply_intents(finished);

        self.cursor_elapsed += elapsed;
        while self.cursor_elapsed >= CURSOR_BLINK {
            self.cursor_elapsed -= CURSOR_BLINK;
            self.cursor_visible = !self.cursor_visible;
        }

        if !self.reveal.has_played(BOOT_REVEAL_KEY) && self.terminal_on_screen() {
            self.boot_elapsed += elapsed;
            if self.boot_lines_shown() >= BOOT_LINES.len() {
                self.reveal.mark_played(BOOT_REVEAL_KEY);
            }
        }
    }

    fn terminal_on_screen(&self) -> bool {
        match self.dock.mode() {
            DockMode::Compact { active_view } => active_view == Some(WindowId::Terminal),
            DockMode::Desktop => self
                .views
                .get(&WindowId::Terminal)
                .is_some_and(|v| v.visual() == WindowVisual::Shown),
        }
    }

    pub fn boot_lines_shown(&self) -> usize {
        if self.reveal.has_played(BOOT_REVEAL_KEY) {
            return BOOT_LINES.len();
        }
        let steps = self.boot_elapsed.as_millis() / BOOT_LINE_INTERVAL.as_millis();
        (steps as usize).min(BOOT_LINES.len())
    }

    pub fn body_context(&self) -> BodyContext<'_> {
        BodyContext {
            session_id: &self.session_id,
            boot_lines_shown: self.boot_lines_shown(),
            cursor_visible: self.cursor_visible,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn view(&self, id: WindowId) -> Option<&WindowView> {
        self.views.get(&id)
    }

    /// Views from bottom to top
    pub fn views_in_stacking_order(&self) -> Vec<&WindowView> {
        self.registry
            .stacking_order()
            .into_iter()
            .filter_map(|id| self.views.get(&id))
            .collect()
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    pub fn layout(&self) -> &DesktopLayout {
        &self.layout
    }

    pub fn is_compact(&self) -> bool {
        matches!(self.dock.mode(), DockMode::Compact { .. })
    }

    pub fn profile(&self) -> &Profile {
        &self.config.profile
    }

    pub fn projects(&self) -> &[Project] {
        &self.config.projects
    }

    /// Page in the hero panel
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn reveal_store(&self) -> &RevealStore {
        &self.reveal
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn props_for(registry: &WindowRegistry, id: WindowId) -> WindowProps {
    let state = registry.state(id);
    WindowProps {
        is_open: state.is_open,
        is_minimized: state.is_minimized,
        z_index: registry.z_index_of(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::window::WindowState;
    use crate::window_view::{Lifecycle, Placement};
    use crossterm::event::{KeyModifiers, MouseEvent};

    // 120x40: windows region is x 54..120, y 1..36
    fn desktop() -> Desktop {
        Desktop::new(DesktopConfig::default(), Rect::new(0, 0, 120, 40))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn click(desktop: &mut Desktop, column: u16, row: u16) {
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column, row));
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn dock_slot(desktop: &Desktop, target: DockTarget) -> (u16, u16) {
        let items = desktop.dock().items(desktop.registry().states(), desktop.page());
        let index = items.iter().position(|i| i.target == target).unwrap();
        let slot = dock_slots(desktop.layout().dock, items.len())[index];
        (slot.x + 1, slot.y + 1)
    }

    #[test]
    fn test_windows_mount_at_percent_positions() {
        let desktop = desktop();
        let terminal = desktop.view(WindowId::Terminal).unwrap();
        // 0% / 45% of a 66x35 region
        assert_eq!(terminal.position(), Position::new(0.0, 15.75));

        let frame = window_frame(terminal, desktop.layout().windows);
        assert_eq!((frame.x, frame.y, frame.width, frame.height), (54, 17, 60, 16));
    }

    #[test]
    fn test_close_button_waits_for_animation() {
        let mut desktop = desktop();
        click(&mut desktop, 56, 17);

        let terminal = desktop.view(WindowId::Terminal).unwrap();
        assert_eq!(terminal.lifecycle(), Lifecycle::Closing);
        assert!(desktop.registry().state(WindowId::Terminal).is_open);

        desktop.tick(Duration::from_millis(150));
        assert!(desktop.registry().state(WindowId::Terminal).is_open);

        desktop.tick(Duration::from_millis(50));
        assert_eq!(desktop.registry().state(WindowId::Terminal), WindowState::CLOSED);
        assert_eq!(desktop.view(WindowId::Terminal).unwrap().lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn test_dock_restore_during_close_cancels_it() {
        let mut desktop = desktop();
        click(&mut desktop, 56, 17);
        desktop.tick(Duration::from_millis(100));

        // Minimize then restore from the dock before the animation ends
        desktop.dock_activate(DockTarget::Window(WindowId::Terminal));
        desktop.dock_activate(DockTarget::Window(WindowId::Terminal));
        desktop.tick(Duration::from_millis(500));

        assert_eq!(desktop.registry().state(WindowId::Terminal), WindowState::OPEN);
        assert_eq!(
            desktop.view(WindowId::Terminal).unwrap().lifecycle(),
            Lifecycle::OpenActive
        );
    }

    #[test]
    fn test_title_bar_drag_moves_only_that_window() {
        let mut desktop = desktop();
        let before = desktop.view(WindowId::SystemMonitor).unwrap().position();

        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 70, 17));
        desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 80, 20));
        desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 80, 20));
        // Moves after release go nowhere
        desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));

        assert_eq!(
            desktop.view(WindowId::Terminal).unwrap().position(),
            Position::new(10.0, 18.75)
        );
        assert_eq!(desktop.view(WindowId::SystemMonitor).unwrap().position(), before);
    }

    #[test]
    fn test_focus_lost_cancels_drag() {
        let mut desktop = desktop();
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 70, 17));
        desktop.handle_event(&Event::FocusLost);
        desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 90, 30));

        assert_eq!(
            desktop.view(WindowId::Terminal).unwrap().position(),
            Position::new(0.0, 15.75)
        );
    }

    #[test]
    fn test_click_focuses_topmost_window_under_pointer() {
        let mut desktop = desktop();

        // Only the system monitor covers this cell
        click(&mut desktop, 60, 5);
        assert_eq!(desktop.registry().focus_order().last(), Some(&WindowId::SystemMonitor));

        // System monitor and task manager overlap here; the monitor is on top now
        click(&mut desktop, 95, 10);
        assert_eq!(desktop.registry().focus_order().last(), Some(&WindowId::SystemMonitor));

        // Task manager only
        click(&mut desktop, 95, 14);
        assert_eq!(desktop.registry().focus_order().last(), Some(&WindowId::TaskManager));
        assert!(
            desktop.view(WindowId::TaskManager).unwrap().z_index()
                > desktop.view(WindowId::SystemMonitor).unwrap().z_index()
        );
    }

    #[test]
    fn test_dock_click_cycles_window() {
        let mut desktop = desktop();
        let (column, row) = dock_slot(&desktop, DockTarget::Window(WindowId::Terminal));

        click(&mut desktop, column, row);
        assert!(desktop.registry().state(WindowId::Terminal).is_effectively_minimized());
        assert_eq!(
            desktop.view(WindowId::Terminal).unwrap().visual(),
            WindowVisual::Shrunk
        );

        click(&mut desktop, column, row);
        assert_eq!(desktop.registry().state(WindowId::Terminal), WindowState::OPEN);
    }

    #[test]
    fn test_minimized_window_ignores_clicks() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1'));
        let order_before = desktop.registry().focus_order().to_vec();

        // Where the terminal body used to be
        click(&mut desktop, 60, 25);
        assert_eq!(desktop.registry().focus_order(), order_before.as_slice());
    }

    #[test]
    fn test_contact_sets_status() {
        let mut desktop = desktop();
        desktop.handle_event(&key('c'));
        assert_eq!(
            desktop.status_message(),
            Some("contact: mailto:alap.parate@gmail.com")
        );
    }

    #[test]
    fn test_projects_page_toggles_on_desktop() {
        let mut desktop = desktop();
        let (column, row) = dock_slot(&desktop, DockTarget::Projects);

        click(&mut desktop, column, row);
        assert_eq!(desktop.page(), Page::Projects);
        // Windows stay as they were
        assert_eq!(desktop.registry().state(WindowId::Terminal), WindowState::OPEN);

        click(&mut desktop, column, row);
        assert_eq!(desktop.page(), Page::Home);

        desktop.handle_event(&key('c'));
        assert_eq!(desktop.page(), Page::Contact);
        desktop.handle_event(&key('p'));
        assert_eq!(desktop.page(), Page::Projects);
    }

    #[test]
    fn test_compact_page_replaces_active_view() {
        let mut desktop = Desktop::new(DesktopConfig::default(), Rect::new(0, 0, 70, 30));
        desktop.handle_event(&key('1'));
        desktop.handle_event(&key('p'));

        assert_eq!(desktop.dock().mode(), DockMode::Compact { active_view: None });
        assert_eq!(desktop.page(), Page::Projects);

        // Every dock item is reachable on a narrow screen
        let items = desktop.dock().items(desktop.registry().states(), desktop.page());
        assert_eq!(dock_slots(desktop.layout().dock, items.len()).len(), items.len());
        let (column, row) = dock_slot(&desktop, DockTarget::Contact);
        click(&mut desktop, column, row);
        assert_eq!(desktop.page(), Page::Contact);
    }

    #[test]
    fn test_far_pixel_placement_does_not_panic() {
        let mut config = DesktopConfig::default();
        for x in [3.0e9, -3.0e9, f64::MAX] {
            if let Some(spec) = config.windows.get_mut(&WindowId::Terminal) {
                spec.placement = Placement::Pixel { x, y: 0.0 };
            }
            let mut desktop = Desktop::new(config.clone(), Rect::new(0, 0, 120, 40));

            // Only the system monitor is under this cell; the terminal is far away
            click(&mut desktop, 60, 5);
            assert_eq!(
                desktop.registry().focus_order().last(),
                Some(&WindowId::SystemMonitor)
            );
        }
    }

    #[test]
    fn test_compact_mode_switches_views() {
        let mut desktop = Desktop::new(DesktopConfig::default(), Rect::new(0, 0, 70, 30));
        assert!(desktop.is_compact());

        desktop.handle_event(&key('2'));
        assert_eq!(
            desktop.dock().mode(),
            DockMode::Compact {
                active_view: Some(WindowId::TaskManager)
            }
        );
        // Registry untouched by compact navigation
        assert_eq!(desktop.registry().state(WindowId::TaskManager), WindowState::OPEN);

        desktop.handle_event(&key('h'));
        assert_eq!(desktop.dock().mode(), DockMode::Compact { active_view: None });

        desktop.handle_event(&Event::Resize(120, 40));
        assert!(!desktop.is_compact());
    }

    #[test]
    fn test_boot_log_reveals_once() {
        let mut desktop = desktop();
        assert_eq!(desktop.boot_lines_shown(), 0);

        desktop.tick(Duration::from_millis(300));
        assert_eq!(desktop.boot_lines_shown(), 2);

        desktop.tick(Duration::from_millis(300));
        assert_eq!(desktop.boot_lines_shown(), BOOT_LINES.len());
        assert!(desktop.reveal_store().has_played(BOOT_REVEAL_KEY));

        // A desktop sharing the store skips the boot log
        let store = desktop.reveal_store().clone();
        let again = Desktop::new(DesktopConfig::default(), Rect::new(0, 0, 120, 40))
            .with_reveal_store(store);
        assert_eq!(again.boot_lines_shown(), BOOT_LINES.len());

        let mut fresh = RevealStore::new();
        fresh.mark_played("something.else");
        fresh.reset();
        let reset = Desktop::new(DesktopConfig::default(), Rect::new(0, 0, 120, 40))
            .with_reveal_store(fresh);
        assert_eq!(reset.boot_lines_shown(), 0);
    }

    #[test]
    fn test_boot_log_waits_while_terminal_hidden() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1')); // minimize terminal
        desktop.tick(Duration::from_secs(2));
        assert_eq!(desktop.boot_lines_shown(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut desktop = desktop();
        assert!(!desktop.should_quit());
        desktop.handle_event(&key('q'));
        assert!(desktop.should_quit());
    }
}
