use std::path::PathBuf;

use cadence::config::{Settings, resolve_config_path};

/// Settings plus the reason defaults were used, if they were.
///
/// Tracing is not up yet when settings load (the filter comes from them), so
/// the problem is carried out and logged by the caller.
pub struct LoadedSettings {
    pub settings: Settings,
    pub problem: Option<String>,
}

pub fn load_settings(explicit: Option<PathBuf>) -> LoadedSettings {
    let path = explicit.or_else(resolve_config_path);
    match Settings::load_from(path) {
        Ok(s) => match s.validate() {
            Ok(()) => LoadedSettings {
                settings: s,
                problem: None,
            },
            Err(e) => LoadedSettings {
                settings: Settings::default(),
                problem: Some(format!("{e}; using defaults")),
            },
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => LoadedSettings {
            settings: Settings::default(),
            problem: Some(format!("failed to load config, using defaults: {e}")),
        },
    }
}
