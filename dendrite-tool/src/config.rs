use std::path::{Path, PathBuf};

use dendrite_core::BoxLayout;
use serde::Deserialize;

use crate::error::DndError;

/// Environment variable naming the message file.
pub const DATA_ENV: &str = "DENDRITE_DATA";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Message file used when `--data` is not given.
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub compact: bool,
    #[serde(default = "default_color")]
    pub color: bool,
    /// Content budget for boxes; the stock 50/30 columns when unset.
    pub max_width: Option<usize>,
}

fn default_color() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            compact: false,
            color: default_color(),
            max_width: None,
        }
    }
}

impl RenderConfig {
    /// Box layout for the flowchart, honouring a configured width.
    pub fn layout(&self, compact: bool) -> Result<BoxLayout, DndError> {
        match self.max_width {
            Some(width) => Ok(BoxLayout::new(width)?.compact(compact)),
            None => Ok(BoxLayout::for_mode(compact)),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dendrite").join("config.toml"))
}

/// Loads the user config, or defaults when there is none.
pub fn load_config() -> Result<Config, DndError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<Config, DndError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(toml::from_str(&content)?)
}

/// Picks the message file: CLI flag, then environment, then config.
/// `None` means the built-in sample conversation.
pub fn resolve_data_path(cli_data: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    cli_data
        .or_else(|| {
            std::env::var_os(DATA_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| config.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();

        assert!(config.data.is_none());
        assert!(!config.render.compact);
        assert!(config.render.color);
    }

    #[test]
    fn parses_render_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data = \"/tmp/messages.json\"\n[render]\ncompact = true\ncolor = false\nmax_width = 40\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.data, Some(PathBuf::from("/tmp/messages.json")));
        assert!(config.render.compact);
        assert!(!config.render.color);

        let layout = config.render.layout(true).unwrap();
        assert_eq!(layout.max_width(), 40);
        assert!(layout.is_compact());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "render = [").unwrap();

        assert!(matches!(load_config_from(&path), Err(DndError::Config(_))));
    }

    #[test]
    fn narrow_width_is_rejected() {
        let render = RenderConfig {
            max_width: Some(3),
            ..RenderConfig::default()
        };
        assert!(matches!(
            render.layout(false),
            Err(DndError::Core(dendrite_core::Error::InvalidWidth(3)))
        ));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        let config = Config {
            data: Some(PathBuf::from("from-config.json")),
            render: RenderConfig::default(),
        };

        let chosen = resolve_data_path(Some(PathBuf::from("from-cli.json")), &config);
        assert_eq!(chosen, Some(PathBuf::from("from-cli.json")));
    }
}
