// Drawing the desktop with ratatui

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::layout::{dock_slots, window_frame, WindowFrame};
use crate::config::Profile;
use crate::content::{body_lines, contact_lines, project_lines, BodyContext, ACCENT, DIM, LIME, MUTED};
use crate::desktop::Desktop;
use crate::dock::{DockMode, Indicator, Page};
use crate::window_view::{Lifecycle, WindowView, WindowVisual};

const CLOSE_RED: Color = Color::Rgb(255, 95, 86);
const DECOR_YELLOW: Color = Color::Rgb(255, 189, 46);
const MINIMIZE_GREEN: Color = Color::Rgb(39, 202, 63);

pub fn draw(frame: &mut Frame, desktop: &Desktop) {
    let area = frame.area();
    let layout = *desktop.layout();

    draw_top_bar(frame, layout.top_bar, desktop.profile());

    match desktop.dock().mode() {
        DockMode::Desktop => {
            draw_hero(frame, layout.hero, desktop);
            draw_windows(frame, desktop, layout.windows, area);
        }
        DockMode::Compact { active_view: None } => {
            draw_hero(frame, layout.hero, desktop);
        }
        DockMode::Compact {
            active_view: Some(id),
        } => {
            if let Some(view) = desktop.view(id) {
                draw_page(frame, view, layout.windows, &desktop.body_context());
            }
        }
    }

    draw_dock(frame, desktop, layout.dock);
    draw_status(frame, layout.status, desktop);
}

fn draw_top_bar(frame: &mut Frame, area: Rect, profile: &Profile) {
    if area.height == 0 {
        return;
    }
    let line = Line::from(vec![
        Span::styled(" cypher_os ", Style::default().fg(Color::Black).bg(ACCENT)),
        Span::styled(format!("  {}", profile.name), Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_hero(frame: &mut Frame, area: Rect, desktop: &Desktop) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let lines = match desktop.page() {
        Page::Home => bio_lines(desktop.profile()),
        Page::Projects => project_lines(desktop.projects()),
        Page::Contact => contact_lines(desktop.profile()),
    };
    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width - 4,
        area.height - 1,
    );
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn bio_lines(profile: &Profile) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, part) in profile.name.split_whitespace().enumerate() {
        let style = if i == 0 {
            Style::default().fg(MUTED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::styled(part.to_string(), style));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(":: {} ::", profile.role),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(profile.bio.clone(), Style::default().fg(Color::White)));
    lines
}

fn draw_windows(frame: &mut Frame, desktop: &Desktop, region: Rect, area: Rect) {
    let focused = desktop.registry().topmost_visible();
    let ctx = desktop.body_context();

    for view in desktop.views_in_stacking_order() {
        let frame_rect = window_frame(view, region);
        match view.visual() {
            WindowVisual::Hidden => {}
            WindowVisual::Shown => {
                draw_window(frame, view, frame_rect, area, focused == Some(view.id()), &ctx);
            }
            WindowVisual::Shrunk => {
                // Closing collapses to its title bar; minimized windows live in the dock
                if view.lifecycle() == Lifecycle::Closing {
                    draw_collapsing(frame, view, frame_rect, area);
                }
            }
        }
    }
}

fn title_line(view: &WindowView, controls: bool, title_style: Style) -> Line<'static> {
    let mut spans = Vec::new();
    if controls {
        spans.extend([
            Span::raw(" "),
            Span::styled("●", Style::default().fg(CLOSE_RED)),
            Span::raw(" "),
            Span::styled("●", Style::default().fg(DECOR_YELLOW)),
            Span::raw(" "),
            Span::styled("●", Style::default().fg(MINIMIZE_GREEN)),
            Span::raw(" "),
        ]);
    }
    spans.push(Span::styled(format!(" {} ", view.title()), title_style));
    Line::from(spans)
}

fn draw_window(
    frame: &mut Frame,
    view: &WindowView,
    frame_rect: WindowFrame,
    area: Rect,
    focused: bool,
    ctx: &BodyContext<'_>,
) {
    let Some(visible) = frame_rect.clip(area) else {
        return;
    };

    let border = if focused { ACCENT } else { DIM };
    // Controls only line up with the hit-test offsets when the left edge is on screen
    let controls = view.spec().show_controls && frame_rect.is_anchored_in(area);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title_line(view, controls, Style::default().fg(MUTED)));
    let inner = block.inner(visible);

    frame.render_widget(Clear, visible);
    frame.render_widget(block, visible);
    frame.render_widget(Paragraph::new(body_lines(view.id(), ctx)), inner);
}

fn draw_collapsing(frame: &mut Frame, view: &WindowView, frame_rect: WindowFrame, area: Rect) {
    let bar = WindowFrame {
        height: 1,
        ..frame_rect
    };
    let Some(visible) = bar.clip(area) else {
        return;
    };
    frame.render_widget(Clear, visible);
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("╶ {} ╴", view.title()),
            Style::default().fg(DIM),
        )),
        visible,
    );
}

/// Compact layout: one window's content filling the content band
fn draw_page(frame: &mut Frame, view: &WindowView, area: Rect, ctx: &BodyContext<'_>) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(title_line(view, false, Style::default().fg(MUTED)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(body_lines(view.id(), ctx)).wrap(Wrap { trim: false }),
        inner,
    );
}

fn draw_dock(frame: &mut Frame, desktop: &Desktop, area: Rect) {
    if area.height < 3 {
        return;
    }
    let items = desktop.dock().items(desktop.registry().states(), desktop.page());
    let slots = dock_slots(area, items.len());

    for (item, slot) in items.iter().zip(slots) {
        let (border, label) = if item.highlighted {
            (ACCENT, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        } else {
            (DIM, Style::default().fg(MUTED))
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(slot);

        frame.render_widget(Clear, slot);
        frame.render_widget(block, slot);
        frame.render_widget(
            Paragraph::new(Line::styled(item.target.label(), label)).alignment(Alignment::Center),
            inner,
        );

        let dot = match item.indicator {
            Indicator::None => None,
            Indicator::Dim => Some(DIM),
            Indicator::Bright => Some(LIME),
        };
        if let Some(color) = dot {
            let spot = Rect::new(slot.x + slot.width / 2, slot.bottom() - 1, 1, 1);
            frame.render_widget(Span::styled("•", Style::default().fg(color)), spot);
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, desktop: &Desktop) {
    if area.height == 0 {
        return;
    }
    let profile = desktop.profile();
    let hint = match desktop.dock().mode() {
        DockMode::Desktop => "1-3 windows · p projects · c contact · q quit",
        DockMode::Compact { .. } => "h home · 1-3 views · p projects · c contact · q quit",
    };

    let mut spans = vec![
        Span::styled(" STATUS: ", Style::default().fg(MUTED)),
        Span::styled(profile.status.clone(), Style::default().fg(LIME)),
        Span::styled(" │ ", Style::default().fg(DIM)),
    ];
    match desktop.status_message() {
        Some(message) => spans.push(Span::styled(message.to_string(), Style::default().fg(ACCENT))),
        None => spans.push(Span::styled(hint, Style::default().fg(DIM))),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
