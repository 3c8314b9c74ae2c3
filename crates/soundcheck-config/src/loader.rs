use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::SoundcheckConfig;

/// Loads the Soundcheck configuration. The config is read once at
/// startup; a smoke run never outlives a config change worth tracking.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the config path: explicit path > SOUNDCHECK_CONFIG env > ./soundcheck.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SOUNDCHECK_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("soundcheck.toml")
    }

    /// Load the config from disk, falling back to defaults.
    ///
    /// An explicitly supplied path must exist; the implicit locations may
    /// be absent, in which case defaults (plus env overrides) apply.
    pub fn load(path: Option<&Path>) -> soundcheck_core::Result<SoundcheckConfig> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path).map_err(|e| {
                soundcheck_core::SoundcheckError::Config(format!(
                    "failed to read {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            toml::from_str::<SoundcheckConfig>(&raw).map_err(|e| {
                soundcheck_core::SoundcheckError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else if path.is_some() {
            return Err(soundcheck_core::SoundcheckError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        } else {
            warn!(?config_path, "config file not found, using defaults");
            SoundcheckConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(soundcheck_core::SoundcheckError::Config(e));
            }
        }

        Ok(config)
    }

    /// Apply env var overrides (SOUNDCHECK_MODEL, ANTHROPIC_API_KEY).
    fn apply_env_overrides(mut config: SoundcheckConfig) -> SoundcheckConfig {
        if let Ok(v) = std::env::var("SOUNDCHECK_MODEL") {
            config.smoke.model = v;
        }
        // API key: env var fills in when config file doesn't have the key set.
        // This means config file takes priority, env is the fallback.
        if config.services.anthropic_api_key.is_none() {
            if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
                config.services.anthropic_api_key = Some(v);
            }
        }
        config
    }
}
