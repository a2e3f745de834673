//! Runtime configuration.
//!
//! An optional `config.toml` in the working directory can pin paths; CLI
//! flags take precedence over it.

use std::error::Error;

use ::config::{Config, File as ConfigFile};

/// Stock bitcoind chainstate location.
pub const DEFAULT_CHAINSTATE_DIR: &str = "~/.bitcoin/chainstate";

pub fn load() -> Result<Config, Box<dyn Error>> {
    let config = Config::builder()
        .add_source(ConfigFile::with_name("config.toml").required(false))
        .build()?;
    Ok(config)
}

/// Chainstate directory from `paths.chainstate_dir`, tilde-expanded, with
/// the stock default as fallback.
pub fn chainstate_dir(config: &Config) -> String {
    let dir = config
        .get_string("paths.chainstate_dir")
        .unwrap_or_else(|_| DEFAULT_CHAINSTATE_DIR.to_string());
    shellexpand::tilde(&dir).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let config = Config::builder().build().unwrap();
        let dir = chainstate_dir(&config);
        assert!(dir.ends_with("/.bitcoin/chainstate"));
        assert!(!dir.starts_with('~'));
    }

    #[test]
    fn config_value_wins_over_default() {
        let config = Config::builder()
            .set_override("paths.chainstate_dir", "/tmp/chainstate-copy")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(chainstate_dir(&config), "/tmp/chainstate-copy");
    }
}
