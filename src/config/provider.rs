//! Configuration Provider Trait

use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::{ConfigError, ConfigResult};

/// Core configuration provider trait
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Get a raw configuration value
    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;

    /// List keys matching a prefix
    fn list_keys(&self, prefix: &str) -> ConfigResult<Vec<String>>;
}

/// Extension methods for typed configuration access
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a JSON-encoded configuration value
    fn get<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value through its `FromStr` impl
    fn get_parsed<T>(&self, key: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_raw(key)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Accepts `true/false`, `1/0`, `yes/no`, `on/off`
    fn get_bool(&self, key: &str) -> ConfigResult<Option<bool>> {
        match self.get_raw(key)? {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                other => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected a boolean, got '{}'", other),
                }),
            },
            None => Ok(None),
        }
    }

    /// Get a required value
    fn require(&self, key: &str) -> ConfigResult<String> {
        self.get_raw(key)?.ok_or_else(|| ConfigError::NotFound {
            key: key.to_string(),
        })
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}
