//! Credential-matching configuration.

use serde::{Deserialize, Serialize};

use realmkit_core::{DomainError, DomainResult};

/// Iteration count used when the configured value is zero or negative.
pub const DEFAULT_HASH_ITERATIONS: u32 = 1024;

/// Algorithm used when none is configured.
pub const DEFAULT_HASH_ALGORITHM: &str = "SHA-256";

pub const HASH_ALGORITHM_ENV: &str = "REALMKIT_HASH_ALGORITHM";
pub const HASH_ITERATIONS_ENV: &str = "REALMKIT_HASH_ITERATIONS";

/// Effective iteration count for a configured value.
pub fn effective_iterations(configured: i32) -> u32 {
    if configured <= 0 {
        DEFAULT_HASH_ITERATIONS
    } else {
        configured.unsigned_abs()
    }
}

/// Hash settings a realm source reports through `hash_algorithm()` and
/// `hash_iterations()`.
///
/// Deserializable so embedding applications can keep it in their own config
/// files; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashSettings {
    pub algorithm: String,
    /// Raw configured value; `<= 0` means [`DEFAULT_HASH_ITERATIONS`].
    pub iterations: i32,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            iterations: DEFAULT_HASH_ITERATIONS as i32,
        }
    }
}

impl HashSettings {
    pub fn new(algorithm: impl Into<String>, iterations: i32) -> Self {
        Self {
            algorithm: algorithm.into(),
            iterations,
        }
    }

    /// Read `REALMKIT_HASH_ALGORITHM` / `REALMKIT_HASH_ITERATIONS`.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(algorithm) = lookup(HASH_ALGORITHM_ENV).filter(|v| !v.trim().is_empty()) {
            settings.algorithm = algorithm.trim().to_string();
        }

        if let Some(raw) = lookup(HASH_ITERATIONS_ENV).filter(|v| !v.trim().is_empty()) {
            settings.iterations = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{HASH_ITERATIONS_ENV}={raw:?}: {e}"))
            })?;
        }

        Ok(settings)
    }

    pub fn effective_iterations(&self) -> u32 {
        effective_iterations(self.iterations)
    }
}
