use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(clap::ValueEnum, Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Dracula,
}

/// Named color slots, as `#rrggbb` strings.
///
/// Slots missing from the config file are taken from the preset named by
/// `name`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "ThemeFile")]
pub struct Theme {
    pub name: ThemeName,
    pub background: String,
    pub foreground: String,
    pub selection: String,
    pub accent: String,
    pub line_numbers: String,
}

impl Theme {
    pub fn preset(name: ThemeName) -> Self {
        let (background, foreground, selection, accent, line_numbers) = match name {
            ThemeName::Dark => ("#282c34", "#abb2bf", "#3e4451", "#61afef", "#4b5263"),
            ThemeName::Light => ("#ffffff", "#383a42", "#e5e5e6", "#4078f2", "#9d9d9f"),
            ThemeName::Dracula => ("#282a36", "#f8f8f2", "#44475a", "#bd93f9", "#6272a4"),
        };
        Self {
            name,
            background: background.to_string(),
            foreground: foreground.to_string(),
            selection: selection.to_string(),
            accent: accent.to_string(),
            line_numbers: line_numbers.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemeName::Dark)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    #[serde(default)]
    name: ThemeName,
    background: Option<String>,
    foreground: Option<String>,
    selection: Option<String>,
    accent: Option<String>,
    line_numbers: Option<String>,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        let preset = Self::preset(file.name);
        Self {
            name: file.name,
            background: file.background.unwrap_or(preset.background),
            foreground: file.foreground.unwrap_or(preset.foreground),
            selection: file.selection.unwrap_or(preset.selection),
            accent: file.accent.unwrap_or(preset.accent),
            line_numbers: file.line_numbers.unwrap_or(preset.line_numbers),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub show_line_numbers: bool,
    pub tab_width: usize,
    pub word_wrap: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            tab_width: 4,
            word_wrap: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    pub show_scrollbar: bool,
    pub show_status: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            show_status: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Keybindings {
    pub quit_key: String,
    pub toggle_wrap_key: String,
    pub toggle_lines_key: String,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            quit_key: "q".to_string(),
            toggle_wrap_key: "ctrl+w".to_string(),
            toggle_lines_key: "ctrl+l".to_string(),
        }
    }
}

/// Static viewer settings loaded from `config.json`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub theme: Theme,
    pub editor: EditorConfig,
    pub ui: UiConfig,
    pub keybindings: Keybindings,
}

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<ThemeName>,
    pub no_line_numbers: bool,
    pub wrap: bool,
    pub tab_width: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(name) = self.theme {
            config.theme = Theme::preset(name);
        }
        if self.no_line_numbers {
            config.editor.show_line_numbers = false;
        }
        if self.wrap {
            config.editor.word_wrap = true;
        }
        if let Some(width) = self.tab_width {
            config.editor.tab_width = width;
        }
        config
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("glance").join("config.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("glance")
                .join("config.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("glance").join("config.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("glance")
                .join("config.json");
        }
    }

    local_config_path()
}

pub fn local_config_path() -> PathBuf {
    PathBuf::from("config.json")
}

/// Pick the config file: explicit path, then `./config.json`, then the
/// per-user location.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = local_config_path();
    if local.exists() {
        local
    } else {
        global_config_path()
    }
}

/// Load a config file; a missing file yields the defaults.
///
/// Nothing is written here. The defaults reach disk only through
/// [`save_config`] (`--save`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Load a config file, falling back to defaults on any failure.
pub fn load_config_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err:#}; using default configuration");
            Config::default()
        }
    }
}

/// Write `config` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, format!("{data}\n"))
        .with_context(|| format!("Failed to write config {}", path.display()))
}
