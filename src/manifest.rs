use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};

use crate::error::Result;
use crate::icon::icon_file_name;

/// The `"icons"` object of an extension manifest, keyed by size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconManifest {
    entries: Vec<(u32, String)>,
}

impl IconManifest {
    pub fn new(sizes: &[u32], prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        let entries = sizes
            .iter()
            .map(|&s| {
                let file = icon_file_name(s);
                let path = if prefix.is_empty() { file } else { format!("{}/{}", prefix, file) };
                (s, path)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, size: u32) -> Option<&str> {
        self.entries.iter().find(|(s, _)| *s == size).map(|(_, p)| p.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `icons.json` into `dir`.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("icons.json");
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}

// keeps size order; serde_json's default map would sort "128" before "16"
impl Serialize for IconManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(s, p)| (s.to_string(), p)))
    }
}
