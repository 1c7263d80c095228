use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is omitted.
pub const DEFAULT_CONFIG_FILE: &str = "snip.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub on_collision: CollisionPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("snippets")
}

/// What the store does when a derived file name already exists.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file; the older index row keeps pointing at it.
    #[default]
    Overwrite,
    /// Reject the ingestion.
    Fail,
    /// Write to the first free `<name>_N.txt`.
    Suffix,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default = "default_index_path")]
    pub path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
        }
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from("snippets.db")
}

/// Comment markers, merged over the built-in table.
#[derive(Debug, Deserialize, Clone)]
pub struct MarkersConfig {
    #[serde(default = "default_marker")]
    pub default: Vec<String>,
    #[serde(default)]
    pub languages: HashMap<String, Vec<String>>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            default: default_marker(),
            languages: HashMap::new(),
        }
    }
}

fn default_marker() -> Vec<String> {
    vec!["#".to_string()]
}

impl Config {
    /// Load `path` if given, else `./snip.toml` if present, else built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => load_config(p),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    load_config(local)
                } else {
                    log::debug!("no {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Ok(Config::default())
                }
            }
        }
    }

    /// Defaults rooted under `dir` instead of the working directory.
    pub fn rooted_at(dir: &Path) -> Config {
        Config {
            store: StoreConfig {
                root: dir.join("snippets"),
                ..StoreConfig::default()
            },
            index: IndexConfig {
                path: dir.join("snippets.db"),
            },
            markers: MarkersConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.store.root.as_os_str().is_empty() {
        anyhow::bail!("store.root must not be empty");
    }
    if config.index.path.as_os_str().is_empty() {
        anyhow::bail!("index.path must not be empty");
    }

    check_markers("markers.default", &config.markers.default)?;
    for (language, markers) in &config.markers.languages {
        check_markers(&format!("markers.languages.{}", language), markers)?;
    }

    Ok(())
}

fn check_markers(key: &str, markers: &[String]) -> Result<()> {
    if markers.is_empty() {
        anyhow::bail!("{} must list at least one marker", key);
    }
    if markers.iter().any(|m| m.trim().is_empty()) {
        anyhow::bail!("{} must not contain empty markers", key);
    }
    Ok(())
}
