// Window bodies. Decorative: everything here renders from fixed data.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::{Profile, Project};
use crate::state::window::WindowId;

pub const ACCENT: Color = Color::Rgb(56, 189, 248);
pub const LIME: Color = Color::Rgb(163, 230, 53);
pub const MUTED: Color = Color::Gray;
pub const DIM: Color = Color::DarkGray;

/// Boot lines printed by the terminal before the banner
pub const BOOT_LINES: [&str; 4] = [
    "Initializing kernel...",
    "Loading modules...",
    "Mounting file system...",
    "Starting network services...",
];

/// Generates the session banner shown under the boot log
pub fn system_banner(session_id: &str) -> Vec<String> {
    let arch = std::env::consts::ARCH;
    let os = std::env::consts::OS;

    // Format session ID as short hex
    let session_hex: String = session_id
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .take(6)
        .collect();

    vec![
        "╔════════════════════════════════════════╗".to_string(),
        "║  C Y P H E R   O S   v1.0              ║".to_string(),
        "╠════════════════════════════════════════╣".to_string(),
        format!("║  CPU ARCH....... {:<14} [OK]   ║", arch),
        format!("║  TARGET OS...... {:<14} [OK]   ║", os),
        format!(
            "║  SESSION........ {:<14} [LIVE] ║",
            format!("0x{}", session_hex.to_uppercase())
        ),
        "╚════════════════════════════════════════╝".to_string(),
    ]
}

/// Inputs for drawing a window body
#[derive(Debug, Clone, Copy)]
pub struct BodyContext<'a> {
    pub session_id: &'a str,
    /// How many boot lines are visible; the banner follows once all are
    pub boot_lines_shown: usize,
    pub cursor_visible: bool,
}

pub fn body_lines(id: WindowId, ctx: &BodyContext<'_>) -> Vec<Line<'static>> {
    match id {
        WindowId::Terminal => terminal_lines(ctx),
        WindowId::TaskManager => task_manager_lines(),
        WindowId::SystemMonitor => system_monitor_lines(),
    }
}

fn terminal_lines(ctx: &BodyContext<'_>) -> Vec<Line<'static>> {
    let shown = ctx.boot_lines_shown.min(BOOT_LINES.len());
    let mut lines: Vec<Line<'static>> = BOOT_LINES[..shown]
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(DIM)))
        .collect();

    if shown < BOOT_LINES.len() {
        return lines;
    }

    lines.push(Line::styled(
        "Welcome to Cypher OS v1.0",
        Style::default().fg(Color::White),
    ));
    for row in system_banner(ctx.session_id) {
        lines.push(Line::styled(
            row,
            Style::default().fg(LIME).add_modifier(Modifier::BOLD),
        ));
    }

    let cursor = if ctx.cursor_visible { "█" } else { " " };
    lines.push(Line::from(vec![
        Span::styled("➜ ", Style::default().fg(LIME)),
        Span::styled("~ ", Style::default().fg(ACCENT)),
        Span::styled(cursor, Style::default().fg(LIME)),
    ]));
    lines
}

const PROCESSES: [(u32, &str, f32, &str); 6] = [
    (101, "docker-daemon", 0.0, "Running"),
    (102, "pm2", 0.0, "Running"),
    (103, "nginx", 1.2, "Active"),
    (104, "kafka-stream", 0.5, "Sleeping"),
    (105, "redis-server", 2.1, "Syncing"),
    (106, "mysql-server", 0.1, "Active"),
];

fn task_manager_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!("Running Processes      Tasks: {} total", PROCESSES.len()),
            Style::default().fg(MUTED),
        ),
        Line::styled(
            format!("{:<6}{:<16}{:>6}  {}", "PID", "COMMAND", "CPU%", "STATUS"),
            Style::default().fg(ACCENT),
        ),
    ];

    for (pid, command, cpu, status) in PROCESSES {
        let status_color = match status {
            "Running" | "Active" => Color::Rgb(74, 222, 128),
            "Syncing" => MUTED,
            _ => DIM,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<6}{:<16}{:>6.1}  ", pid, command, cpu),
                Style::default().fg(Color::White),
            ),
            Span::styled(status, Style::default().fg(status_color)),
        ]));
    }
    lines
}

fn meter(label: &str, percent: u16, color: Color) -> Line<'static> {
    let filled = (percent.min(100) / 5) as usize;
    Line::from(vec![
        Span::styled(format!("{:<5}", label), Style::default().fg(MUTED)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(20 - filled), Style::default().fg(DIM)),
        Span::styled(format!(" {:>3}%", percent), Style::default().fg(color)),
    ])
}

fn system_monitor_lines() -> Vec<Line<'static>> {
    vec![
        meter("CPU", 14, LIME),
        meter("MEM", 27, ACCENT),
        Line::raw(""),
        Line::from(vec![
            Span::styled("NET ↓ ", Style::default().fg(MUTED)),
            Span::styled("1.2 MB/s", Style::default().fg(Color::White)),
            Span::styled("   NET ↑ ", Style::default().fg(MUTED)),
            Span::styled("840 KB/s", Style::default().fg(Color::White)),
        ]),
    ]
}

/// Projects page: one card per project, numbered from 1
pub fn project_lines(projects: &[Project]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "SELECTED WORKS ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({:02})", projects.len()), Style::default().fg(MUTED)),
        ]),
        Line::raw(""),
    ];

    for (index, project) in projects.iter().enumerate() {
        let mut header = vec![
            Span::styled(
                format!(" PRJ-{} ", index + 1),
                Style::default().fg(Color::Black).bg(Color::White),
            ),
            Span::raw(" "),
            Span::styled(
                project.title.to_uppercase(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ];
        if project.work_in_progress {
            header.push(Span::styled("  [WIP]", Style::default().fg(LIME)));
        }
        lines.push(Line::from(header));

        if !project.description.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("▌ ", Style::default().fg(DIM)),
                Span::styled(project.description.clone(), Style::default().fg(Color::White)),
            ]));
        }
        if !project.tech_stack.is_empty() {
            lines.push(Line::styled(
                project.tech_stack.join(" · "),
                Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
            ));
        }
        for (label, url) in project.links.published() {
            lines.push(link_line(label, url));
        }
        lines.push(Line::raw(""));
    }
    lines
}

/// Contact page: e-mail, social accounts and the booking link
pub fn contact_lines(profile: &Profile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "READY TO ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "SCALE?",
                Style::default()
                    .fg(ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ),
        ]),
        Line::raw(""),
        Line::styled(
            "Let's build something extraordinary.",
            Style::default().fg(MUTED),
        ),
        Line::raw(""),
        Line::styled("DROP A LINE", Style::default().fg(DIM)),
        Line::styled(
            profile.email.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Line::raw(""),
    ];

    for (label, url) in profile.socials.links() {
        lines.push(link_line(label, url));
    }
    if let Some(calendly) = &profile.calendly_link {
        lines.push(link_line("Book a call", calendly));
    }
    lines
}

fn link_line(label: &str, url: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(DIM)),
        Span::styled(url.to_string(), Style::default().fg(ACCENT)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_banner_uses_session_prefix() {
        let banner = system_banner("ab12cd34-0000-4000-8000-000000000000");
        assert!(banner.iter().any(|row| row.contains("0xAB12CD")));
    }

    #[test]
    fn test_terminal_holds_banner_until_boot_finishes() {
        let partial = BodyContext {
            session_id: "abcdef",
            boot_lines_shown: 2,
            cursor_visible: true,
        };
        let lines = body_lines(WindowId::Terminal, &partial);
        assert_eq!(lines.len(), 2);

        let full = BodyContext {
            boot_lines_shown: BOOT_LINES.len(),
            ..partial
        };
        let lines = body_lines(WindowId::Terminal, &full);
        assert!(lines.iter().any(|l| text(l).contains("Welcome to Cypher OS")));
        assert!(text(lines.last().unwrap()).ends_with('█'));
    }

    #[test]
    fn test_task_manager_lists_every_process() {
        let ctx = BodyContext {
            session_id: "",
            boot_lines_shown: 0,
            cursor_visible: false,
        };
        let lines = body_lines(WindowId::TaskManager, &ctx);
        assert_eq!(lines.len(), PROCESSES.len() + 2);
        assert!(text(&lines[2]).contains("docker-daemon"));
    }

    #[test]
    fn test_project_cards_skip_placeholder_links() {
        let projects = crate::config::DesktopConfig::default().projects;
        let lines: Vec<String> = project_lines(&projects).iter().map(text).collect();

        assert!(lines[0].contains("(02)"));
        assert!(lines.iter().any(|l| l.contains("PRJ-2") && l.contains("STRAND-AUTH")));
        assert!(lines.iter().any(|l| l.contains("[WIP]")));
        assert!(lines.iter().any(|l| l.contains("TYPESCRIPT · NESTJS · TEMPLATE")));
        assert!(lines
            .iter()
            .any(|l| l.contains("https://github.com/alap-parate/strand-auth")));
        assert!(!lines.iter().any(|l| l.contains("Case study") || l.contains("Live")));
    }

    #[test]
    fn test_contact_lists_socials_and_booking_link() {
        let mut profile = Profile::default();
        profile.socials.twitter = None;
        let lines: Vec<String> = contact_lines(&profile).iter().map(text).collect();

        assert!(lines.iter().any(|l| l == "alap.parate@gmail.com"));
        assert!(lines.iter().any(|l| l.starts_with("GitHub") && l.ends_with("https://github.com/alap-parate")));
        assert!(lines.iter().any(|l| l.starts_with("LinkedIn")));
        assert!(!lines.iter().any(|l| l.contains("x.com")));
        assert!(lines.iter().any(|l| l.contains("https://calendly.com/alap-parate")));
    }
}
