// Cell geometry for the desktop: regions, window frames, title-bar controls
// and dock slots. Shared by drawing and hit-testing so both agree.

use ratatui::layout::Rect;

use crate::window_view::{Dimension, HitTarget, WindowView};

/// Size used for "auto" tokens
pub const AUTO_WIDTH: u16 = 40;
pub const AUTO_HEIGHT: u16 = 10;

/// Share of the middle band given to the hero panel on the desktop layout
pub const HERO_PERCENT: u16 = 45;

pub const DOCK_HEIGHT: u16 = 3;
pub const DOCK_SLOT_WIDTH: u16 = 11;
/// Border plus three label cells
pub const MIN_DOCK_SLOT_WIDTH: u16 = 5;

/// Column offsets of the controls inside the title bar, from the left edge
pub const CLOSE_BUTTON_OFFSET: i32 = 2;
pub const DECOR_BUTTON_OFFSET: i32 = 4;
pub const MINIMIZE_BUTTON_OFFSET: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopLayout {
    pub top_bar: Rect,
    /// Bio panel; in compact mode this is the whole content band
    pub hero: Rect,
    /// Parent region of the floating windows; in compact mode the active view
    pub windows: Rect,
    pub dock: Rect,
    pub status: Rect,
}

pub fn desktop_layout(area: Rect, compact: bool) -> DesktopLayout {
    let top_bar = Rect::new(area.x, area.y, area.width, area.height.min(1));
    let status = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        area.height.min(1),
    );
    let dock_height = DOCK_HEIGHT.min(area.height.saturating_sub(2));
    let dock = Rect::new(
        area.x,
        (area.y + area.height).saturating_sub(1 + dock_height),
        area.width,
        dock_height,
    );
    let middle = Rect::new(
        area.x,
        area.y + top_bar.height,
        area.width,
        area.height.saturating_sub(2 + dock_height),
    );

    if compact {
        return DesktopLayout {
            top_bar,
            hero: middle,
            windows: middle,
            dock,
            status,
        };
    }

    let hero_width = middle.width * HERO_PERCENT / 100;
    DesktopLayout {
        top_bar,
        hero: Rect::new(middle.x, middle.y, hero_width, middle.height),
        windows: Rect::new(
            middle.x + hero_width,
            middle.y,
            middle.width - hero_width,
            middle.height,
        ),
        dock,
        status,
    }
}

/// Screen frame of a window. May extend past the screen in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WindowFrame {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (column, row) = (column as i64, row as i64);
        column >= self.x as i64
            && column < self.right()
            && row >= self.y as i64
            && row < self.bottom()
    }

    // Edges in i64: a frame parked near i32::MAX must not overflow
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Which part of the window a cell belongs to
    pub fn hit_target(&self, column: u16, row: u16, show_controls: bool) -> Option<HitTarget> {
        if !self.contains(column, row) {
            return None;
        }
        if row as i32 != self.y {
            return Some(HitTarget::Body);
        }
        let offset = column as i32 - self.x;
        Some(match offset {
            CLOSE_BUTTON_OFFSET if show_controls => HitTarget::CloseButton,
            MINIMIZE_BUTTON_OFFSET if show_controls => HitTarget::MinimizeButton,
            _ => HitTarget::TitleBar,
        })
    }

    /// Part of the frame inside `area`, if any
    pub fn clip(&self, area: Rect) -> Option<Rect> {
        let left = (self.x as i64).max(area.x as i64);
        let top = (self.y as i64).max(area.y as i64);
        let right = self.right().min(area.right() as i64);
        let bottom = self.bottom().min(area.bottom() as i64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    /// Whether the frame's origin and title bar are on screen, so the
    /// block border and title line up with the hit-test offsets
    pub fn is_anchored_in(&self, area: Rect) -> bool {
        self.x >= area.x as i32 && self.y >= area.y as i32
    }
}

fn resolve_cells(dimension: &Dimension, parent: u16, auto: u16) -> u16 {
    match dimension {
        Dimension::Pixels(px) => px.round().clamp(3.0, u16::MAX as f64) as u16,
        Dimension::Token(token) => match token.trim().strip_suffix('%') {
            Some(percent) => percent
                .trim()
                .parse::<f64>()
                .map(|p| ((parent as f64) * p / 100.0).round().max(3.0) as u16)
                .unwrap_or(auto),
            None => auto,
        },
    }
}

/// `origin + delta` in cells. Positions are never clamped, so far-away
/// values saturate at the i32 range instead of overflowing.
fn cell_offset(origin: u16, delta: f64) -> i32 {
    (delta.round() as i64)
        .saturating_add(origin as i64)
        .clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Frame of a floating window placed inside `region`
pub fn window_frame(view: &WindowView, region: Rect) -> WindowFrame {
    let position = view.position();
    WindowFrame {
        x: cell_offset(region.x, position.x),
        y: cell_offset(region.y, position.y),
        width: resolve_cells(&view.width(), region.width, AUTO_WIDTH),
        height: resolve_cells(view.height(), region.height, AUTO_HEIGHT),
    }
}

/// Item slots centred in the dock band
pub fn dock_slots(dock: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || dock.height == 0 {
        return Vec::new();
    }
    let count = count as u16;
    let gaps = count - 1;
    // Narrow docks shrink every slot before any item falls off the end
    let width = (dock.width.saturating_sub(gaps) / count).clamp(MIN_DOCK_SLOT_WIDTH, DOCK_SLOT_WIDTH);
    let total = count * width + gaps;
    let start = dock.x + dock.width.saturating_sub(total) / 2;

    (0..count)
        .map(|i| Rect::new(start + i * (width + 1), dock.y, width, dock.height))
        .filter(|slot| slot.right() <= dock.right())
        .collect()
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}
