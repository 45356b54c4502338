use longdiv_core::{Problem, ProblemError};

use crate::error::{AppError, Result};

/// A named example problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub dividend: String,
    pub divisor: String,
}

impl Preset {
    /// Validate the preset's operands.
    pub fn problem(&self) -> std::result::Result<Problem, ProblemError> {
        Problem::new(&self.dividend, &self.divisor)
    }
}

const BUILTIN: &str = include_str!("../presets/builtin.env");

/// All built-in presets, in file order.
#[must_use]
pub fn builtin_presets() -> Vec<Preset> {
    parse_preset_content(BUILTIN)
}

pub fn find_preset(name: &str) -> Result<Preset> {
    builtin_presets()
        .into_iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| AppError::PresetNotFound {
            name: name.to_string(),
        })
}

/// Parse `name=dividend,divisor` lines. Blank lines, `#` comments and
/// malformed lines are skipped.
#[must_use]
pub fn parse_preset_content(content: &str) -> Vec<Preset> {
    let mut presets = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, operands)) = line.split_once('=') else {
            continue;
        };
        let Some((dividend, divisor)) = operands.split_once(',') else {
            continue;
        };

        presets.push(Preset {
            name: name.trim().to_string(),
            dividend: dividend.trim().to_string(),
            divisor: divisor.trim().to_string(),
        });
    }

    presets
}
