// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the Rota application.
pub const APP_NAME: &str = "rota";

/// Configuration for the Rota application.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing the schedule database. Defaults to the
    /// user-specific state directory.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.state_dir {
            Some(dir) => {
                self.state_dir = Some(
                    expand_path(dir)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(dir) => self.state_dir = Some(dir.join(APP_NAME)),
                Err(e) => tracing::warn!("failed to get state directory: {e}"),
            },
        };

        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
