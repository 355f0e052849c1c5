use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use shogi_rules::GameConfig;

/// Settings file for `shogi-play`
///
/// ```toml
/// json = false
///
/// [game]
/// layout_path = "layouts/mini.txt"
/// record_moves = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub game: GameConfig,
    /// Print a JSON snapshot after every accepted action
    pub json: bool,
}

impl PlayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config: PlayConfig = toml::from_str(
            r#"
json = true

[game]
layout = """
3x3
k,_,_
_,_,_
_,_,K
"""
record_moves = false
"#,
        )
        .unwrap();
        assert!(config.json);
        assert!(!config.game.record_moves);
        assert!(config.game.load_layout().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: PlayConfig = toml::from_str("").unwrap();
        assert!(!config.json);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_unknown_game_key_is_rejected() {
        assert!(toml::from_str::<PlayConfig>("[game]\nlayuot = \"x\"\n").is_err());
    }
}
