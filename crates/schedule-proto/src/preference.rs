//! Persisted light/dark theme choice.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored choice first, then the OS hint, then light.
    pub fn resolve(stored: Option<Theme>, os_prefers_dark: bool) -> Self {
        stored.unwrap_or(if os_prefers_dark { Self::Dark } else { Self::Light })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    theme: Option<String>,
}

/// Reads and writes the `theme` key of the preferences file.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, if the file exists and holds a known value.
    pub fn stored(&self) -> Option<Theme> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let file: PreferenceFile = match toml::from_str(&content) {
            Ok(f) => f,
            Err(e) => {
                debug!("ignoring unreadable preferences {}: {}", self.path.display(), e);
                return None;
            }
        };
        file.theme.as_deref().and_then(Theme::parse)
    }

    pub fn load(&self, os_prefers_dark: bool) -> Theme {
        Theme::resolve(self.stored(), os_prefers_dark)
    }

    pub fn save(&self, theme: Theme) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = PreferenceFile {
            theme: Some(theme.as_str().to_string()),
        };
        std::fs::write(&self.path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }

    /// Flip `current`, persist it, and return the new theme.
    pub fn toggle(&self, current: Theme) -> anyhow::Result<Theme> {
        let next = current.toggled();
        self.save(next)?;
        info!("theme switched to {}", next.as_str());
        Ok(next)
    }
}
