use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::{IconStyle, DEFAULT_SIZES};
use crate::logger::log_line;
use crate::screenshots::Target;

pub const CONFIG_FILE_NAME: &str = "loops-assets.conf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub icons_dir: PathBuf,
    pub screenshots_dir: PathBuf,
    pub webstore_dir: PathBuf,
    pub icon_sizes: Vec<u32>,
    #[serde(with = "style_str")]
    pub icon_style: IconStyle,
    pub target_width: u32,
    pub target_height: u32,
    pub manifest_prefix: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("icons"),
            screenshots_dir: PathBuf::from("dist/screenshots"),
            webstore_dir: PathBuf::from("dist/screenshots/webstore"),
            icon_sizes: DEFAULT_SIZES.to_vec(),
            icon_style: IconStyle::default(),
            target_width: 1280,
            target_height: 800,
            manifest_prefix: "icons/".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn target(&self) -> Target {
        Target { width: self.target_width, height: self.target_height }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "loops", "LoopsAssets")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Where the config is read from: explicit path, `./loops-assets.conf`, then
/// the per-user config dir. `None` means defaults.
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|p| p.is_file())
}

/// An explicit path that cannot be read is an error; a missing implicit one is not.
pub fn read_config(explicit: Option<&Path>) -> Result<AssetConfig> {
    let Some(path) = config_file_path(explicit) else {
        return Ok(AssetConfig::default());
    };
    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(parse_config(&content))
}

pub fn parse_config(content: &str) -> AssetConfig {
    let mut cfg = AssetConfig::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            match k.trim() {
                "icons_dir" => cfg.icons_dir = PathBuf::from(v),
                "screenshots_dir" => cfg.screenshots_dir = PathBuf::from(v),
                "webstore_dir" => cfg.webstore_dir = PathBuf::from(v),
                "icon_sizes" => {
                    if let Some(sizes) = parse_sizes(v) {
                        cfg.icon_sizes = sizes;
                    }
                }
                "icon_style" => cfg.icon_style = v.parse().unwrap_or_default(),
                "target_width" => cfg.target_width = v.parse::<u32>().ok().filter(|&n| n > 0).unwrap_or(1280),
                "target_height" => cfg.target_height = v.parse::<u32>().ok().filter(|&n| n > 0).unwrap_or(800),
                "manifest_prefix" => cfg.manifest_prefix = v.to_string(),
                other => log::debug!("Ignoring unknown config key {}", other),
            }
        }
    }
    cfg
}

/// Comma separated list of positive sizes; `None` if any entry is bad.
pub fn parse_sizes(v: &str) -> Option<Vec<u32>> {
    let sizes: Option<Vec<u32>> = v
        .split(',')
        .map(|s| s.trim().parse::<u32>().ok().filter(|&n| n > 0))
        .collect();
    sizes.filter(|s| !s.is_empty())
}

pub fn save_config(cfg: &AssetConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut f = fs::File::create(path)?;
    write_config(cfg, &mut f)?;
    log_line(&format!("Saved config to {}", path.display()));
    Ok(())
}

pub fn write_config<W: Write>(cfg: &AssetConfig, w: &mut W) -> Result<()> {
    let sizes: Vec<String> = cfg.icon_sizes.iter().map(|s| s.to_string()).collect();
    writeln!(w, "icons_dir={}", cfg.icons_dir.display())?;
    writeln!(w, "screenshots_dir={}", cfg.screenshots_dir.display())?;
    writeln!(w, "webstore_dir={}", cfg.webstore_dir.display())?;
    writeln!(w, "icon_sizes={}", sizes.join(","))?;
    writeln!(w, "icon_style={}", cfg.icon_style)?;
    writeln!(w, "target_width={}", cfg.target_width)?;
    writeln!(w, "target_height={}", cfg.target_height)?;
    writeln!(w, "manifest_prefix={}", cfg.manifest_prefix)?;
    Ok(())
}

mod style_str {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::icon::IconStyle;

    pub fn serialize<S: Serializer>(style: &IconStyle, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(style.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<IconStyle, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
