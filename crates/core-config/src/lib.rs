//! Configuration loading and parsing.
//!
//! Parses `ash.toml` (or an override path provided by the host) into two tables:
//!
//! - `[editor]`: per-viewport defaults (`tab_size`, `show_line_numbers`, `stylize`,
//!   `soft_wrap`, `hard_wrap`). Every new viewport is seeded from these.
//! - `[keys]`: binding name (e.g. `"MOVE_CURSOR_LEFT"`) to a list of integer key
//!   codes. Listed bindings replace their default codes; unlisted ones keep them.
//!
//! Unknown fields are ignored (TOML deserialization tolerance). A missing or
//! unparsable file yields defaults rather than an error so a broken config never
//! prevents the editor from starting.

use anyhow::Result;
use core_keymap::{Binding, KeyBindings};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const TAB_SIZE_MIN: usize = 1;
pub const TAB_SIZE_MAX: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    #[serde(default = "EditorOptions::default_tab_size")]
    pub tab_size: usize,
    #[serde(default = "EditorOptions::default_true")]
    pub show_line_numbers: bool,
    #[serde(default = "EditorOptions::default_true")]
    pub stylize: bool,
    #[serde(default)]
    pub soft_wrap: bool,
    #[serde(default)]
    pub hard_wrap: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_size: Self::default_tab_size(),
            show_line_numbers: true,
            stylize: true,
            soft_wrap: false,
            hard_wrap: false,
        }
    }
}

impl EditorOptions {
    const fn default_tab_size() -> usize {
        4
    }
    const fn default_true() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorOptions,
    #[serde(default)]
    pub keys: BTreeMap<String, Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("ash.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ash").join("ash.toml");
    }
    PathBuf::from("ash.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(mut file) => {
            clamp_tab_size(&mut file.editor);
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn clamp_tab_size(editor: &mut EditorOptions) {
    let raw = editor.tab_size;
    let clamped = raw.clamp(TAB_SIZE_MIN, TAB_SIZE_MAX);
    if clamped != raw {
        info!(
            target: "config",
            raw,
            clamped,
            min = TAB_SIZE_MIN,
            max = TAB_SIZE_MAX,
            "tab_size_clamped"
        );
        editor.tab_size = clamped;
    }
}

impl Config {
    pub fn editor(&self) -> &EditorOptions {
        &self.file.editor
    }

    /// Default bindings overlaid with the `[keys]` table.
    pub fn keymap(&self) -> KeyBindings {
        let mut keys = KeyBindings::defaults();
        for (name, codes) in &self.file.keys {
            match Binding::from_name(name) {
                Some(binding) => keys.bind(binding, codes),
                None => warn!(target: "config", name = %name, "unknown_key_binding_ignored"),
            }
        }
        for (code, bindings) in keys.conflicts() {
            warn!(target: "config", code, bindings = ?bindings, "key_binding_conflict");
        }
        keys
    }
}
