use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// File name of the persisted preference, shared with the web client.
pub const STORAGE_NAME: &str = "theme-storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Persisted document shape: `{"state":{"theme":"dark"}}`.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    state: ThemeState,
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeState {
    theme: Theme,
}

pub fn config_dir() -> PathBuf {
    env::var("HAEYA_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".haeya"))
}

/// Missing or corrupt preference files fall back to the default theme.
pub fn load_theme(dir: &Path) -> Theme {
    let path = dir.join(STORAGE_NAME);
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str::<ThemeDocument>(&raw) {
            Ok(doc) => doc.state.theme,
            Err(e) => {
                warn!("Ignoring corrupt theme preference {}: {}", path.display(), e);
                Theme::default()
            }
        },
        Err(_) => Theme::default(),
    }
}

pub fn save_theme(dir: &Path, theme: Theme) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let doc = ThemeDocument {
        state: ThemeState { theme },
    };
    let raw = serde_json::to_string(&doc).map_err(io::Error::other)?;
    fs::write(dir.join(STORAGE_NAME), raw)
}
