//! Configuration handling for the extraction engine.
//!
//! The engine itself is pure and takes its thresholds as plain values. This
//! module loads those values from the environment with defaults tuned for a
//! single marketplace layout, so that a caller can loosen or tighten the
//! noise heuristics without recompiling. `Config::from_env` performs that
//! loading and validates every override.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable names. Public so that tests and wrapping services can
/// refer to them.
pub const ENV_MAX_BULLETS: &str = "LISTING_MAX_BULLETS";
pub const ENV_FALLBACK_MIN: &str = "LISTING_FALLBACK_MIN";
pub const ENV_NUMERIC_RATIO_MAX: &str = "LISTING_NUMERIC_RATIO_MAX";
pub const ENV_NUMERIC_MIN_LEN: &str = "LISTING_NUMERIC_MIN_LEN";
pub const ENV_FINAL_SPEC_HITS: &str = "LISTING_FINAL_SPEC_HITS";
pub const ENV_FINAL_SPEC_MIN_LEN: &str = "LISTING_FINAL_SPEC_MIN_LEN";

const DEFAULT_MAX_BULLETS: usize = 8;
const DEFAULT_FALLBACK_MIN: usize = 4;
const DEFAULT_NUMERIC_RATIO_MAX: f64 = 0.2;
const DEFAULT_NUMERIC_MIN_LEN: usize = 120;
const DEFAULT_FINAL_SPEC_HITS: usize = 5;
const DEFAULT_FINAL_SPEC_MIN_LEN: usize = 100;

/// Limits applied by the bullet classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletPolicy {
    /// Hard cap on the number of bullets returned.
    pub max_bullets: usize,
    /// How many bullets the relaxed pass collects (bounded by `max_bullets`).
    pub fallback_min: usize,
}

impl Default for BulletPolicy {
    fn default() -> Self {
        Self {
            max_bullets: DEFAULT_MAX_BULLETS,
            fallback_min: DEFAULT_FALLBACK_MIN,
        }
    }
}

impl BulletPolicy {
    pub fn fallback_target(&self) -> usize {
        self.fallback_min.min(self.max_bullets)
    }
}

/// Thresholds for the two description heuristics that are known to misfire on
/// technical product prose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptionPolicy {
    /// Digit characters over non-space characters above which non-sentential
    /// text is treated as a numeric dump.
    pub numeric_ratio_max: f64,
    /// The numeric-dump rule only applies to text longer than this.
    pub numeric_min_len: usize,
    /// Spec keyword hits at which long text is rejected outright.
    pub final_spec_hits: usize,
    /// The final density rule only applies to text longer than this.
    pub final_spec_min_len: usize,
}

impl Default for DescriptionPolicy {
    fn default() -> Self {
        Self {
            numeric_ratio_max: DEFAULT_NUMERIC_RATIO_MAX,
            numeric_min_len: DEFAULT_NUMERIC_MIN_LEN,
            final_spec_hits: DEFAULT_FINAL_SPEC_HITS,
            final_spec_min_len: DEFAULT_FINAL_SPEC_MIN_LEN,
        }
    }
}

/// Engine runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Config {
    bullets: BulletPolicy,
    description: DescriptionPolicy,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(bullets: BulletPolicy, description: DescriptionPolicy) -> Self {
        Self {
            bullets,
            description,
        }
    }

    /// Load from environment variables, falling back to the defaults for any
    /// variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bullets = BulletPolicy {
            max_bullets: read_var(ENV_MAX_BULLETS, "max_bullets", DEFAULT_MAX_BULLETS)?,
            fallback_min: read_var(ENV_FALLBACK_MIN, "fallback_min", DEFAULT_FALLBACK_MIN)?,
        };
        let description = DescriptionPolicy {
            numeric_ratio_max: read_var(
                ENV_NUMERIC_RATIO_MAX,
                "numeric_ratio_max",
                DEFAULT_NUMERIC_RATIO_MAX,
            )?,
            numeric_min_len: read_var(
                ENV_NUMERIC_MIN_LEN,
                "numeric_min_len",
                DEFAULT_NUMERIC_MIN_LEN,
            )?,
            final_spec_hits: read_var(
                ENV_FINAL_SPEC_HITS,
                "final_spec_hits",
                DEFAULT_FINAL_SPEC_HITS,
            )?,
            final_spec_min_len: read_var(
                ENV_FINAL_SPEC_MIN_LEN,
                "final_spec_min_len",
                DEFAULT_FINAL_SPEC_MIN_LEN,
            )?,
        };

        let config = Self::new(bullets, description);
        config.validate()?;
        Ok(config)
    }

    pub fn bullets(&self) -> BulletPolicy {
        self.bullets
    }

    pub fn description(&self) -> DescriptionPolicy {
        self.description
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bullets.max_bullets == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_bullets",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.bullets.fallback_min == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fallback_min",
                reason: "must be at least 1".to_string(),
            });
        }
        let ratio = self.description.numeric_ratio_max;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "numeric_ratio_max",
                reason: format!("{ratio} is outside (0, 1]"),
            });
        }
        Ok(())
    }
}

fn read_var<T>(key: &str, field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
