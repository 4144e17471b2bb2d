//! Desktop configuration loaded from a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::window::WindowId;
use crate::state::BASE_Z;
use crate::window_view::{Dimension, Placement, WindowSpec};

/// Environment variable holding the config path when none is passed
pub const CONFIG_ENV: &str = "CYPHER_DESKTOP_CONFIG";

/// Link value the portfolio uses for "not published yet"
pub const PLACEHOLDER_LINK: &str = "#";

/// Who the portfolio belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub email: String,
    pub status: String,
    pub socials: Socials,
    pub calendly_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Socials {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

impl Socials {
    /// Configured accounts as `(label, url)`
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.github),
            ("LinkedIn", &self.linkedin),
            ("X", &self.twitter),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub case_study: Option<String>,
    pub live: Option<String>,
}

impl ProjectLinks {
    /// Links worth showing as `(label, url)`: set and not a placeholder
    pub fn published(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.github),
            ("LinkedIn", &self.linkedin),
            ("Case study", &self.case_study),
            ("Live", &self.live),
        ]
        .into_iter()
        .filter_map(|(label, url)| match url.as_deref() {
            Some(url) if url != PLACEHOLDER_LINK && !url.is_empty() => Some((label, url)),
            _ => None,
        })
        .collect()
    }
}

/// One entry of the projects page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub links: ProjectLinks,
    pub work_in_progress: bool,
}

fn placeholder() -> Option<String> {
    Some(PLACEHOLDER_LINK.to_string())
}

fn default_projects() -> Vec<Project> {
    let tags = |tags: &[&str]| -> Vec<String> { tags.iter().map(|t| t.to_string()).collect() };
    vec![
        Project {
            title: "NESTJS STARTER TEMPLATE".to_string(),
            description:
                "Starter Template with basic setup to get started without getting overwhelmed."
                    .to_string(),
            tech_stack: tags(&["TYPESCRIPT", "NESTJS", "TEMPLATE"]),
            links: ProjectLinks {
                github: Some("https://github.com/alap-parate/NestJS-Starter-Template".to_string()),
                linkedin: placeholder(),
                case_study: placeholder(),
                live: placeholder(),
            },
            work_in_progress: true,
        },
        Project {
            title: "strand-auth".to_string(),
            description: "Auth designed to keep auth fast and decoupled while providing \
                forensic visibility into token misuse, expiry, and key-rotation issues."
                .to_string(),
            tech_stack: tags(&["TYPESCRIPT", "NESTJS", "AUTHENTICATION", "AUTHORIZATION", "JWT"]),
            links: ProjectLinks {
                github: Some("https://github.com/alap-parate/strand-auth".to_string()),
                linkedin: placeholder(),
                case_study: placeholder(),
                live: placeholder(),
            },
            work_in_progress: true,
        },
    ]
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "ALAP DASHRATH PARATE".to_string(),
            role: "BACKEND DEVELOPER".to_string(),
            bio: "Building High-Performance Backend Systems, turning ideas into scalable solutions."
                .to_string(),
            email: "alap.parate@gmail.com".to_string(),
            status: "AVAILABLE".to_string(),
            socials: Socials {
                github: Some("https://github.com/alap-parate".to_string()),
                linkedin: Some("https://www.linkedin.com/in/alapparate/".to_string()),
                twitter: Some("https://x.com/alapparate".to_string()),
            },
            calendly_link: Some("https://calendly.com/alap-parate".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesktopConfig {
    pub base_z: i32,
    pub close_animation_ms: u64,
    /// Terminal widths below this use the compact layout
    pub compact_below: u16,
    /// Initial stacking, bottom to top
    pub focus_order: Vec<WindowId>,
    pub windows: BTreeMap<WindowId, WindowSpec>,
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub log_file: Option<PathBuf>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        let mut windows = BTreeMap::new();
        windows.insert(
            WindowId::SystemMonitor,
            WindowSpec {
                title: "system_monitor".to_string(),
                placement: Placement::Percent { x: 5.0, y: 5.0 },
                width: Dimension::Pixels(55.0),
                height: Dimension::auto(),
                min_width: 32.0,
                max_width: Some(65.0),
                show_controls: true,
            },
        );
        windows.insert(
            WindowId::TaskManager,
            WindowSpec {
                title: "task_manager".to_string(),
                placement: Placement::Percent { x: 55.0, y: 20.0 },
                width: Dimension::Pixels(45.0),
                height: Dimension::auto(),
                min_width: 30.0,
                max_width: Some(55.0),
                show_controls: true,
            },
        );
        windows.insert(
            WindowId::Terminal,
            WindowSpec {
                title: "terminal — zsh".to_string(),
                placement: Placement::Percent { x: 0.0, y: 45.0 },
                width: Dimension::Pixels(60.0),
                height: Dimension::Pixels(16.0),
                min_width: 35.0,
                max_width: Some(75.0),
                show_controls: true,
            },
        );

        Self {
            base_z: BASE_Z,
            close_animation_ms: 200,
            compact_below: 80,
            focus_order: vec![
                WindowId::SystemMonitor,
                WindowId::TaskManager,
                WindowId::Terminal,
            ],
            windows,
            profile: Profile::default(),
            projects: default_projects(),
            log_file: None,
        }
    }
}

impl DesktopConfig {
    /// Read a config file. Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: DesktopConfig =
            serde_json::from_str(&raw).map_err(|e| Error::config(path, e))?;
        tracing::info!(target: "cypher_desktop::config", path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Config from an explicit path, else `CYPHER_DESKTOP_CONFIG`, else defaults
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let path = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_animation_ms)
    }

    /// Spec for a window. Windows missing from a partial `windows` map fall
    /// back to the built-in defaults.
    pub fn window_spec(&self, id: WindowId) -> WindowSpec {
        if let Some(spec) = self.windows.get(&id) {
            return spec.clone();
        }
        DesktopConfig::default()
            .windows
            .remove(&id)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_cover_every_window() {
        let config = DesktopConfig::default();
        for id in WindowId::ALL {
            assert!(config.windows.contains_key(&id));
        }
        assert_eq!(config.close_delay(), Duration::from_millis(200));
        assert_eq!(config.base_z, 50);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "closeAnimationMs": 120,
                "windows": {{
                    "terminal": {{
                        "title": "tty",
                        "placement": {{ "mode": "pixel", "x": 2, "y": 3 }},
                        "width": 700,
                        "minWidth": 350,
                        "maxWidth": 750
                    }}
                }},
                "profile": {{ "email": "someone@example.com" }}
            }}"#
        )
        .unwrap();

        let config = DesktopConfig::load(file.path()).unwrap();
        assert_eq!(config.close_delay(), Duration::from_millis(120));
        assert_eq!(config.compact_below, 80);
        assert_eq!(config.profile.email, "someone@example.com");
        assert_eq!(config.profile.status, "AVAILABLE");

        let terminal = config.window_spec(WindowId::Terminal);
        assert_eq!(terminal.title, "tty");
        assert_eq!(terminal.placement, Placement::Pixel { x: 2.0, y: 3.0 });
        assert_eq!(terminal.width, Dimension::Pixels(700.0));
        assert_eq!(terminal.height, Dimension::auto());
        assert!(terminal.show_controls);

        // Not listed in the file: built-in default
        assert_eq!(config.window_spec(WindowId::TaskManager).title, "task_manager");
    }

    #[test]
    fn test_projects_and_socials_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "projects": [
                    {{
                        "title": "ledger",
                        "techStack": ["RUST"],
                        "links": {{ "github": "https://github.com/me/ledger", "live": "#" }},
                        "workInProgress": false
                    }}
                ],
                "profile": {{ "socials": {{ "github": "https://github.com/me" }} }}
            }}"##
        )
        .unwrap();

        let config = DesktopConfig::load(file.path()).unwrap();
        assert_eq!(config.projects.len(), 1);
        let ledger = &config.projects[0];
        assert_eq!(ledger.tech_stack, vec!["RUST".to_string()]);
        assert!(!ledger.work_in_progress);
        // The "#" placeholder is not a published link
        assert_eq!(
            ledger.links.published(),
            vec![("GitHub", "https://github.com/me/ledger")]
        );

        assert_eq!(
            config.profile.socials.links(),
            vec![("GitHub", "https://github.com/me")]
        );
        // Untouched profile fields keep their defaults
        assert_eq!(
            config.profile.calendly_link.as_deref(),
            Some("https://calendly.com/alap-parate")
        );
    }

    #[test]
    fn test_default_projects_hide_placeholder_links() {
        let config = DesktopConfig::default();
        assert_eq!(config.projects.len(), 2);
        for project in &config.projects {
            let published = project.links.published();
            assert_eq!(published.len(), 1);
            assert_eq!(published[0].0, "GitHub");
        }
        assert_eq!(config.profile.socials.links().len(), 3);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"baseZ\": \"high\" }}").unwrap();

        let err = DesktopConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesktopConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
