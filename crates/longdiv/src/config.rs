//! Application configuration.
//!
//! Resolution order: built-in defaults, then environment variables, then
//! command-line flags. Environment lookups go through a closure so tests can
//! supply their own environment.

use std::path::PathBuf;

use longdiv_render::GlyphMode;

/// Glyph mode override (`unicode` or `ascii`).
pub const ENV_GLYPHS: &str = "LONGDIV_GLYPHS";
/// Open the history panel at startup (`1/0/true/false`).
pub const ENV_HISTORY: &str = "LONGDIV_HISTORY";
/// `tracing` filter directives, e.g. `longdiv=debug`.
pub const ENV_LOG: &str = "LONGDIV_LOG";
/// File that receives log output.
pub const ENV_LOG_FILE: &str = "LONGDIV_LOG_FILE";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub glyphs: GlyphMode,
    pub history_open: bool,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            glyphs: GlyphMode::Unicode,
            history_open: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub ascii: bool,
    pub history: bool,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Resolve using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            glyphs: detect_glyphs(&get_env),
            ..Self::default()
        };

        if let Some(value) = get_env(ENV_HISTORY)
            && let Some(open) = parse_bool(&value)
        {
            config.history_open = open;
        }
        if let Some(filter) = get_env(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }
        if let Some(path) = get_env(ENV_LOG_FILE).filter(|v| !v.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(path.trim()));
        }

        config
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.ascii {
            self.glyphs = GlyphMode::Ascii;
        }
        if overrides.history {
            self.history_open = true;
        }
        if let Some(level) = &overrides.log_level {
            self.log_filter.clone_from(level);
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
        self
    }
}

fn detect_glyphs<F>(get_env: &F) -> GlyphMode
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = get_env(ENV_GLYPHS)
        && let Some(mode) = GlyphMode::parse(&value)
    {
        return mode;
    }

    let term = get_env("TERM").unwrap_or_default().to_ascii_lowercase();
    if matches!(term.as_str(), "dumb" | "linux" | "vt100" | "vt102") {
        return GlyphMode::Ascii;
    }
    GlyphMode::Unicode
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
