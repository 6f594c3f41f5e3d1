//! Default cost parameters and their environment overrides.
//!
//! The constants are the library-wide defaults. They are meant to be raised
//! over time as hardware gets faster; deployments that want to tune them
//! without a rebuild can use [`CostDefaults::from_env`].

use std::env;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::request::HashCandidate;

/// Default digest length in bytes.
pub const DEFAULT_HASH_LENGTH: u32 = 32;

/// Default number of passes.
pub const DEFAULT_TIME_COST: u32 = 2;

/// Default memory cost in KiB.
pub const DEFAULT_MEMORY_COST: u32 = 512;

/// Default lane (and thread) count.
pub const DEFAULT_PARALLELISM: u32 = 4;

/// Default length of a generated salt in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 16;

pub const HASH_LENGTH_ENV: &str = "ARGON_HASH_HASH_LENGTH";
pub const TIME_COST_ENV: &str = "ARGON_HASH_TIME_COST";
pub const MEMORY_COST_ENV: &str = "ARGON_HASH_MEMORY_COST";
pub const PARALLELISM_ENV: &str = "ARGON_HASH_PARALLELISM";

/// Tunable cost knobs, applied to candidates before validation.
///
/// Values are kept signed and unchecked here; the validator is the single
/// place that rejects non-positive costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostDefaults {
    pub hash_length: i64,
    pub time_cost: i64,
    /// KiB.
    pub memory_cost: i64,
    pub parallelism: i64,
}

impl Default for CostDefaults {
    fn default() -> Self {
        Self {
            hash_length: i64::from(DEFAULT_HASH_LENGTH),
            time_cost: i64::from(DEFAULT_TIME_COST),
            memory_cost: i64::from(DEFAULT_MEMORY_COST),
            parallelism: i64::from(DEFAULT_PARALLELISM),
        }
    }
}

impl CostDefaults {
    /// Reads overrides from the environment on top of the built-in defaults.
    ///
    /// Reads:
    /// - `ARGON_HASH_HASH_LENGTH`
    /// - `ARGON_HASH_TIME_COST`
    /// - `ARGON_HASH_MEMORY_COST` (KiB)
    /// - `ARGON_HASH_PARALLELISM`
    ///
    /// Unset variables keep their default.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but is not
    /// an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            hash_length: read_var(HASH_LENGTH_ENV, defaults.hash_length)?,
            time_cost: read_var(TIME_COST_ENV, defaults.time_cost)?,
            memory_cost: read_var(MEMORY_COST_ENV, defaults.memory_cost)?,
            parallelism: read_var(PARALLELISM_ENV, defaults.parallelism)?,
        };

        debug!(
            hash_length = config.hash_length,
            time_cost = config.time_cost,
            memory_cost = config.memory_cost,
            parallelism = config.parallelism,
            "cost defaults loaded"
        );
        Ok(config)
    }

    /// Seeds a candidate with these costs.
    #[must_use]
    pub fn apply(&self, candidate: HashCandidate) -> HashCandidate {
        candidate
            .with_hash_length(self.hash_length)
            .with_time_cost(self.time_cost)
            .with_memory_cost(self.memory_cost)
            .with_parallelism(self.parallelism)
    }
}

fn read_var(var: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| {
            warn!(var, "rejected unparseable cost override");
            ConfigError::InvalidValue { var, value }
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets an environment variable for the lifetime of the guard.
    struct ScopedEnv {
        key: &'static str,
        original: Option<String>,
    }

    impl ScopedEnv {
        fn new(key: &'static str, value: &str) -> Self {
            let original = env::var(key).ok();
            unsafe { env::set_var(key, value) };
            Self { key, original }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            match &self.original {
                Some(val) => unsafe { env::set_var(self.key, val) },
                None => unsafe { env::remove_var(self.key) },
            }
        }
    }

    fn clear_all() {
        for key in [HASH_LENGTH_ENV, TIME_COST_ENV, MEMORY_COST_ENV, PARALLELISM_ENV] {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_unset_env_gives_defaults() {
        clear_all();
        assert_eq!(CostDefaults::from_env().unwrap(), CostDefaults::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_env_overrides_individual_knobs() {
        clear_all();
        let _time = ScopedEnv::new(TIME_COST_ENV, "5");
        let _memory = ScopedEnv::new(MEMORY_COST_ENV, " 2048 ");

        let config = CostDefaults::from_env().unwrap();
        assert_eq!(config.time_cost, 5);
        assert_eq!(config.memory_cost, 2048);
        assert_eq!(config.hash_length, 32);
        assert_eq!(config.parallelism, i64::from(DEFAULT_PARALLELISM));
    }

    #[test]
    #[serial_test::serial]
    fn test_garbage_env_value_is_an_error() {
        clear_all();
        let _parallelism = ScopedEnv::new(PARALLELISM_ENV, "lots");

        let err = CostDefaults::from_env().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: PARALLELISM_ENV,
                value: "lots".to_string()
            }
        );
    }

    #[test]
    #[serial_test::serial]
    #[tracing_test::traced_test]
    fn test_garbage_env_value_is_logged() {
        clear_all();
        let _hash_length = ScopedEnv::new(HASH_LENGTH_ENV, "32 bytes");

        assert!(CostDefaults::from_env().is_err());
        assert!(logs_contain("rejected unparseable cost override"));
        assert!(logs_contain(HASH_LENGTH_ENV));
    }

    #[test]
    #[serial_test::serial]
    fn test_negative_env_value_is_left_for_the_validator() {
        clear_all();
        let _time = ScopedEnv::new(TIME_COST_ENV, "-1");
        assert_eq!(CostDefaults::from_env().unwrap().time_cost, -1);
    }

    #[test]
    fn test_apply_seeds_candidate() {
        let config = CostDefaults {
            hash_length: 16,
            time_cost: 3,
            memory_cost: 1024,
            parallelism: 2,
        };
        let candidate = config.apply(HashCandidate::new("pw", "somesalt"));
        assert_eq!(candidate.hash_length(), 16);
        assert_eq!(candidate.time_cost(), 3);
        assert_eq!(candidate.memory_cost(), 1024);
        assert_eq!(candidate.parallelism(), 2);
    }

    #[test]
    fn test_deserializes_partial_config() {
        let config: CostDefaults = serde_json::from_str(r#"{"time_cost": 4}"#).unwrap();
        assert_eq!(config.time_cost, 4);
        assert_eq!(config.memory_cost, i64::from(DEFAULT_MEMORY_COST));

        let json = serde_json::to_string(&CostDefaults::default()).unwrap();
        assert!(json.contains("\"memory_cost\":512"));
    }
}
