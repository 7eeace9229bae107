use crate::events::AppEvent;
use anyhow::Context;
use async_channel::Sender;
use config::ConfigBuilder;
use config::builder::DefaultState;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wedge::{MenuError, MenuStyle};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuStyle,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Style(#[from] MenuError),
}

/// Command line values that win over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleOverrides {
    pub outer_radius: Option<f64>,
    pub inner_radius: Option<f64>,
}

impl StyleOverrides {
    pub fn apply(&self, mut style: MenuStyle) -> MenuStyle {
        if let Some(r) = self.outer_radius {
            style.outer_radius = r;
        }
        if let Some(r) = self.inner_radius {
            style.inner_radius = r;
        }
        style
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pinwheel", "pinwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PINWHEEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let config: Config = builder.build()?.try_deserialize()?;
    config.menu.validate()?;
    Ok(config)
}

/// Reads `path` (optional) layered with `PINWHEEL_MENU__*` variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    finish(
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(environment()),
    )
}

pub fn load_or_default(path: &Path) -> Config {
    load_config(path).unwrap_or_else(|e| {
        log::warn!(
            "Ignoring config at {}: {}, using defaults",
            path.display(),
            e
        );
        Config::default()
    })
}

/// Whether `event` touches the config file itself rather than a sibling.
fn affects(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] each time `config_path` changes on disk,
/// until the receiving side goes away.
pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    if let Err(e) = watch_config(&tx, &config_path).await {
        log::error!(
            "Config watcher for {} stopped: {:#}",
            config_path.display(),
            e
        );
    }
}

async fn watch_config(tx: &Sender<AppEvent>, config_path: &Path) -> anyhow::Result<()> {
    let dir = config_path
        .parent()
        .context("config path has no parent directory")?;
    fs_err::create_dir_all(dir)?;

    // notify calls back on its own thread
    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .context("failed to create watcher")?;
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;
    log::debug!("Watching {} for config changes", dir.display());

    while let Ok(res) = events_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::warn!("Watch error: {}", e);
                continue;
            }
        };
        if !affects(&event, config_path) {
            continue;
        }

        log::info!(
            "{} changed ({:?}), reloading",
            config_path.display(),
            event.kind
        );
        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
    Ok(())
}
