use super::{derivation::DerivationConfig, sampling::SamplingConfig, traits::ConfigSection};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment variables overriding file settings,
/// e.g. `PHENOCODEC__SAMPLING__SEED=7`.
pub const ENV_PREFIX: &str = "PHENOCODEC";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub derivation: DerivationConfig,
    pub sampling: SamplingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CodecError> {
        check_section(&self.derivation)?;
        check_section(&self.sampling)?;
        Ok(())
    }
}

fn check_section<S: ConfigSection>(section: &S) -> Result<(), CodecError> {
    section.validate().map_err(|e| match e {
        CodecError::Configuration(msg) => {
            CodecError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layers the file (if any) and `PHENOCODEC__*` environment variables over the defaults.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), CodecError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CodecError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| CodecError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        *self.write_lock()? = config;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CodecError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| CodecError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CodecError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| CodecError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CodecError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, CodecError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| CodecError::Configuration("Config lock poisoned".to_string()))
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.write_lock()?;
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, CodecError> {
        self.config
            .write()
            .map_err(|_| CodecError::Configuration("Config lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_invalid_change() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.sampling.mutation_rate = 2.0);
        assert!(result.unwrap_err().to_string().contains("[sampling]"));
        assert_eq!(manager.get().unwrap().sampling.mutation_rate, 0.1);

        manager.update(|c| c.sampling.seed = Some(9)).unwrap();
        assert_eq!(manager.get().unwrap().sampling.seed, Some(9));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [derivation]
            default_max_length = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.derivation.default_max_length, 4);
        assert_eq!(config.derivation.default_min_length, 0);
        assert_eq!(config.sampling.sample_count, 1);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("phenocodec-config-{}.toml", std::process::id()));
        let manager = ConfigManager::new();
        manager.update(|c| c.sampling.sample_count = 5).unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get().unwrap().sampling.sample_count, 5);

        let layered = ConfigManager::new();
        layered.load_layered(Some(&path)).unwrap();
        assert_eq!(layered.get().unwrap().sampling.sample_count, 5);
        std::fs::remove_file(&path).ok();
    }
}
