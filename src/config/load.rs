use std::{env, path::PathBuf};

use crate::error::{Error, Result};
use crate::library::RECENTLY_PLAYED_LIMIT;
use crate::player::MAX_CROSSFADE_SECONDS;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CADENCE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and the config file at the resolved path.
    pub fn load() -> Result<Self> {
        Self::load_from(resolve_config_path())
    }

    /// Load settings from environment and an explicit (optional) config file.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENCE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("catalog.base_url must not be empty".to_string()));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(Error::InvalidConfig("catalog.timeout_secs must be >= 1".to_string()));
        }
        if self.playback.crossfade_seconds > MAX_CROSSFADE_SECONDS {
            return Err(Error::InvalidConfig(format!(
                "playback.crossfade_seconds must be <= {MAX_CROSSFADE_SECONDS}"
            )));
        }
        if !(1..=RECENTLY_PLAYED_LIMIT).contains(&self.library.recently_played_limit) {
            return Err(Error::InvalidConfig(format!(
                "library.recently_played_limit must be between 1 and {RECENTLY_PLAYED_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Render these settings as a TOML document.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `CADENCE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENCE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadence/config.toml`
/// or `~/.config/cadence/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("cadence").join("config.toml"))
}
