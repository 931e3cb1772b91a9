//! Environment lookup.

use std::collections::HashMap;

/// Variable holding the default connection string.
pub const REDIS_URL: &str = "REDIS_URL";
/// Variable holding the default username.
pub const REDIS_USERNAME: &str = "REDIS_USERNAME";
/// Variable holding the default password.
pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";
/// Variable holding the default sentinel password.
pub const REDIS_SENTINEL_PASSWORD: &str = "REDIS_SENTINEL_PASSWORD";

/// Connection string used when neither an explicit URL nor `REDIS_URL` is given.
pub const DEFAULT_URL: &str = "redis://127.0.0.1";

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a variable exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Default environment source using `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create a new map-based environment source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Add multiple variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source() {
        let source = MapEnvSource::new()
            .set(REDIS_URL, "redis://cache:6380")
            .set(REDIS_PASSWORD, "secret");

        assert_eq!(source.get(REDIS_URL).as_deref(), Some("redis://cache:6380"));
        assert!(source.contains(REDIS_PASSWORD));
        assert!(!source.contains(REDIS_USERNAME));
    }

    #[test]
    fn test_with_vars() {
        let mut vars = HashMap::new();
        vars.insert(REDIS_USERNAME.to_string(), "admin".to_string());
        let source = MapEnvSource::new().with_vars(vars);
        assert_eq!(source.get(REDIS_USERNAME).as_deref(), Some("admin"));
    }

    #[test]
    fn test_reference_source() {
        let source = MapEnvSource::new().set(REDIS_SENTINEL_PASSWORD, "s3");
        let by_ref: &dyn EnvSource = &source;
        assert_eq!(by_ref.get(REDIS_SENTINEL_PASSWORD).as_deref(), Some("s3"));
    }
}
