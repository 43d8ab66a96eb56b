use std::{env, path::PathBuf};

use chrono::format::{Item, StrftimeItems};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then applies environment
/// variables (prefix `PLAYSPLICE__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYSPLICE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.export.channels == 0 {
            return Err("export.channels must be >= 1".to_string());
        }
        let ext = self.export.extension.trim_start_matches('.');
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!(
                "export.extension must be alphanumeric, got `{}`",
                self.export.extension
            ));
        }
        if self.prompt.abort_token.trim().is_empty() {
            return Err("prompt.abort_token must not be empty".to_string());
        }

        if StrftimeItems::new(&self.output.timestamp_format)
            .any(|item| matches!(item, Item::Error))
        {
            return Err(format!(
                "output.timestamp_format is not a valid strftime format: `{}`",
                self.output.timestamp_format
            ));
        }

        let success = &self.output.success_manifest;
        let failure = &self.output.failure_manifest;
        for (key, name) in [
            ("output.success_manifest", success),
            ("output.failure_manifest", failure),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(format!("{key} must be a plain file name, got `{name}`"));
            }
        }
        if success == failure {
            return Err(
                "output.success_manifest and output.failure_manifest must differ".to_string(),
            );
        }
        Ok(())
    }

    /// Render the settings as a TOML document suitable for `config.toml`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `PLAYSPLICE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYSPLICE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playsplice/config.toml`
/// or `~/.config/playsplice/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("playsplice").join("config.toml"))
}
