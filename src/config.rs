use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// An angular quantity in degrees.
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display, Deref, From, Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Degrees(f64);

impl Degrees {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }
}

/// What happens to the dial value when it leaves [0, 360).
///
/// `Free` leaves the value unconstrained: it may go negative or past a full
/// revolution. `Wrapped` normalizes it back into [0, 360) after every
/// update.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    #[default]
    #[strum(serialize = "free", serialize = "unconstrained")]
    Free,
    #[strum(serialize = "wrapped", serialize = "normalized")]
    Wrapped,
}

impl WrapMode {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Free => value,
            Self::Wrapped => value.rem_euclid(360.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialConfig {
    /// Degrees applied per `+`/`-` key release.
    #[serde(default = "default_step")]
    pub keyboard_step: Degrees,
    /// Degrees applied per wheel notch; the sign of the rotation is inverted.
    #[serde(default = "default_step")]
    pub wheel_step: Degrees,
    #[serde(default)]
    pub wrap: WrapMode,
}

fn default_step() -> Degrees {
    Degrees::new(1.0)
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            keyboard_step: default_step(),
            wheel_step: default_step(),
            wrap: WrapMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dial: DialConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "dialkit", "dial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("DIAL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(p) => log::info!("Wrote default configuration to {}", p.display()),
            Err(e) => log::warn!("Could not write default configuration: {}", e),
        }
        return Config::default();
    }

    load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default configuration: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
