//! Game configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::layout::{Layout, LayoutError};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Settings for a new [`crate::game::Game`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Inline layout text; takes precedence over `layout_path`
    pub layout: Option<String>,
    pub layout_path: Option<PathBuf>,
    /// Append to the move log
    pub record_moves: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            layout: None,
            layout_path: None,
            record_moves: true,
        }
    }
}

impl GameConfig {
    /// Resolve the starting position: inline text, then file, then the
    /// standard opening.
    pub fn load_layout(&self) -> Result<Layout, ConfigError> {
        if let Some(text) = &self.layout {
            return Ok(Layout::parse(text)?);
        }
        if let Some(path) = &self.layout_path {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            return Ok(Layout::parse(&text)?);
        }
        Ok(Layout::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_opening() {
        let config = GameConfig::default();
        assert!(config.record_moves);
        assert_eq!(config.load_layout().unwrap(), Layout::standard());
    }

    #[test]
    fn test_inline_layout() {
        let config = GameConfig {
            layout: Some("3x3\nk,_,_\n_,_,_\n_,_,K\n".to_string()),
            ..GameConfig::default()
        };
        let layout = config.load_layout().unwrap();
        assert_eq!(layout.board.dims().width(), 3);
    }

    #[test]
    fn test_missing_file() {
        let config = GameConfig {
            layout_path: Some(PathBuf::from("/nonexistent/layout.txt")),
            ..GameConfig::default()
        };
        assert!(matches!(config.load_layout(), Err(ConfigError::Io { .. })));
    }
}
