use anyhow::{Context, Result};
use kakeibo_core::{CategoryMap, ColumnMap, HeaderScheme, TranslationPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Years offered by the year selector when the config names none
pub const DEFAULT_YEARS: [i32; 3] = [2022, 2023, 2024];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub years: Vec<i32>,
    pub header_scheme: HeaderScheme,
    pub translate_categories: bool,
    pub strict_categories: bool,
    /// Extra or overriding category translations
    pub categories: BTreeMap<String, String>,
    /// Extra or overriding header renames
    pub columns: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            years: DEFAULT_YEARS.to_vec(),
            header_scheme: HeaderScheme::Auto,
            translate_categories: true,
            strict_categories: false,
            categories: BTreeMap::new(),
            columns: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn policy(&self) -> TranslationPolicy {
        if self.strict_categories {
            TranslationPolicy::Strict
        } else {
            TranslationPolicy::BestEffort
        }
    }

    pub fn column_map(&self) -> ColumnMap {
        let mut map = ColumnMap::for_scheme(self.header_scheme);
        for (from, to) in &self.columns {
            map.insert(from.clone(), to.clone());
        }
        map
    }

    /// `None` when category translation is switched off
    pub fn category_map(&self) -> Option<CategoryMap> {
        if !self.translate_categories {
            return None;
        }
        let mut map = CategoryMap::japanese();
        map.extend(self.categories.clone());
        Some(map)
    }
}

/// `~/.kakeibo/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".kakeibo").join("config.toml"))
}

fn resolve(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Read `path`, or the default location when `None`. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = resolve(path)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

/// Write `cfg` to `path`, creating its directory first
pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))
}

/// Write the default config unless one is already there. Returns the path
/// and whether a file was written.
pub fn init_config(path: Option<&Path>) -> Result<(PathBuf, bool)> {
    let p = resolve(path)?;
    if p.exists() {
        return Ok((p, false));
    }
    save_config(&Config::default(), &p)?;
    Ok((p, true))
}
