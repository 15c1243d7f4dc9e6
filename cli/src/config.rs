// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::fs;

use rota_core::{APP_NAME, Config as CoreConfig};

const ROTA_CONFIG_ENV: &str = "ROTA_CONFIG";

/// Resolve and parse the configuration file.
///
/// Precedence: the `--config` flag, then the `ROTA_CONFIG` environment
/// variable, then `config.toml` in the user config directory. Rota works
/// out of the box, so a missing default file yields the default
/// configuration rather than an error.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        Some(path)
    } else if let Ok(env_path) = std::env::var(ROTA_CONFIG_ENV) {
        Some(PathBuf::from(env_path))
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        config.exists().then_some(config)
    };

    let Some(path) = path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(CoreConfig::default());
    };

    let raw: ConfigRaw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {e}", path.display()))?
        .parse()?;
    Ok(raw.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    const CONFIG_TOML: &str = r#"
[core]
state_dir = "/tmp/rota-test-state"
"#;

    #[tokio::test]
    async fn cli_flag_points_at_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, CONFIG_TOML).unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(ROTA_CONFIG_ENV);
        }

        let config = parse_config(Some(config_path)).await.unwrap();
        assert_eq!(
            config.state_dir,
            Some(PathBuf::from("/tmp/rota-test-state"))
        );
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let _guard = env_lock().lock().await;
        let result = parse_config(Some(missing)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn env_var_is_used_when_no_flag_is_given() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("env_config.toml");
        fs::write(&config_path, CONFIG_TOML).unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(ROTA_CONFIG_ENV, config_path.to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();

        unsafe {
            std::env::remove_var(ROTA_CONFIG_ENV);
        }

        assert_eq!(
            config.state_dir,
            Some(PathBuf::from("/tmp/rota-test-state"))
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_default_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(ROTA_CONFIG_ENV);
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let config = parse_config(None).await.unwrap();

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }

        assert_eq!(config.state_dir, None);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let raw: ConfigRaw = "".parse().unwrap();
        assert_eq!(raw.core.state_dir, None);
    }
}
