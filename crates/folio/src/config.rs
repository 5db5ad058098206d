use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use folio_core::backdrop::{DEFAULT_RADIUS, DEFAULT_SPACING, GridStyle};
use folio_core::content::ContentError;
use folio_core::theme::{ThemeChoice, ThemePolicy};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub policy: ThemePolicy,
    #[serde(default)]
    pub initial: ThemeChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BackdropConfig {
    #[serde(default)]
    pub style: GridStyle,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_spacing() -> f64 {
    DEFAULT_SPACING
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            style: GridStyle::default(),
            spacing: DEFAULT_SPACING,
            radius: DEFAULT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub backdrop: BackdropConfig,
    /// Directory the project images are resolved against.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    /// Replaces the built-in profile and project list.
    #[serde(default)]
    pub content: Option<PathBuf>,
}

impl Config {
    /// Configured directory, then `./assets`, then the per-user data dir.
    pub fn assets_dir(&self) -> PathBuf {
        if let Some(dir) = &self.assets_dir {
            return dir.clone();
        }
        let local = PathBuf::from("assets");
        if local.is_dir() {
            return local;
        }
        project_dirs()
            .map(|d| d.data_dir().join("assets"))
            .unwrap_or(local)
    }

    /// Configured content file, else a `content.toml` beside `config_path`.
    pub fn content_path(&self, config_path: &Path) -> Option<PathBuf> {
        self.content
            .clone()
            .or_else(|| sibling_content(config_path).filter(|p| p.is_file()))
    }
}

fn sibling_content(config_path: &Path) -> Option<PathBuf> {
    config_path.parent().map(|dir| dir.join("content.toml"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "folio", "folio")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `explicit` wins over the per-user location.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path),
        None => get_config_path(),
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Falls back to defaults when the file is broken so the viewer still starts.
pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Files the watcher reports changes for.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchTargets {
    pub config: PathBuf,
    /// Watched even while absent so that creating it takes effect.
    pub content: Option<PathBuf>,
}

impl WatchTargets {
    pub fn new(config: &Config, config_path: &Path) -> Self {
        Self {
            config: config_path.to_path_buf(),
            content: config
                .content
                .clone()
                .or_else(|| sibling_content(config_path)),
        }
    }

    fn dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = [Some(&self.config), self.content.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .collect();
        dirs.dedup();
        dirs
    }

    /// Maps a filesystem event to the reload it calls for.
    pub fn classify(&self, event: &notify::Event) -> Option<AppEvent> {
        if !matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
        ) {
            return None;
        }
        let touches = |target: &Path| event.paths.iter().any(|p| p == target);
        if touches(&self.config) {
            Some(AppEvent::ConfigReload)
        } else if self.content.as_deref().is_some_and(touches) {
            Some(AppEvent::ContentReload)
        } else {
            None
        }
    }
}

fn watch_dirs(
    targets: &WatchTargets,
    events: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    if let Some(dir) = targets.config.parent() {
        fs_err::create_dir_all(dir)?;
    }
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    for dir in targets.dirs() {
        if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
            log::warn!("Not watching {}: {}", dir.display(), e);
        }
    }
    Ok(watcher)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>, targets: WatchTargets) {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // Dropping the watcher stops delivery, so it lives for the whole loop.
    let _watcher = match watch_dirs(&targets, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("File watching disabled: {}", e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if let Some(reload) = targets.classify(&event) {
            log::debug!("{:?} from {:?}", reload, event.paths);
            if tx.send(reload).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_default_config_matches_defaults() {
        let config = load_config(Path::new("/nonexistent/folio/config.toml")).unwrap();
        assert_eq!(config.theme, ThemeConfig::default());
        assert_eq!(config.backdrop, BackdropConfig::default());
        assert!(config.assets_dir.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "theme": {"policy": "follow-system", "initial": "Dark"},
            "backdrop": {"style": "lattice"}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme.policy, ThemePolicy::FollowSystem);
        assert_eq!(config.theme.initial, ThemeChoice::Dark);
        assert_eq!(config.backdrop.style, GridStyle::Lattice);
        assert_eq!(config.backdrop.spacing, DEFAULT_SPACING);
    }

    #[test]
    fn test_content_path_prefers_setting() {
        let config = Config {
            content: Some(PathBuf::from("/srv/content.toml")),
            ..Config::default()
        };
        let path = config.content_path(Path::new("/nonexistent/folio/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/srv/content.toml")));
        assert_eq!(
            Config::default().content_path(Path::new("/nonexistent/folio/config.toml")),
            None
        );
    }

    #[test]
    fn test_watch_targets_default_to_sibling_content() {
        let config_path = Path::new("/home/u/.config/folio/config.toml");
        let targets = WatchTargets::new(&Config::default(), config_path);
        assert_eq!(
            targets.content,
            Some(PathBuf::from("/home/u/.config/folio/content.toml"))
        );
        assert_eq!(targets.dirs(), vec![PathBuf::from("/home/u/.config/folio")]);

        let config = Config {
            content: Some(PathBuf::from("/srv/site/content.toml")),
            ..Config::default()
        };
        let targets = WatchTargets::new(&config, config_path);
        assert_eq!(targets.dirs().len(), 2);
    }

    #[test]
    fn test_classify_routes_file_changes() {
        let targets =
            WatchTargets::new(&Config::default(), Path::new("/cfg/folio/config.toml"));
        let modified = |path: &str| {
            notify::Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from(path))
        };

        assert!(matches!(
            targets.classify(&modified("/cfg/folio/config.toml")),
            Some(AppEvent::ConfigReload)
        ));
        assert!(matches!(
            targets.classify(&modified("/cfg/folio/content.toml")),
            Some(AppEvent::ContentReload)
        ));
        assert!(targets.classify(&modified("/cfg/folio/notes.txt")).is_none());

        let created = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/cfg/folio/content.toml"));
        assert!(matches!(
            targets.classify(&created),
            Some(AppEvent::ContentReload)
        ));
        let read = notify::Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/cfg/folio/config.toml"));
        assert!(targets.classify(&read).is_none());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/folio.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/folio.toml"));
    }
}
