use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How `sparse_repeat` treats a repeat count of zero.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZeroRepeatPolicy {
    /// Fail with an invalid-argument error.
    #[default]
    Reject,
    /// Produce a matrix whose repeated axis has length zero, like a dense
    /// `repeat(0, k)`.
    Empty,
}

impl FromStr for ZeroRepeatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(ZeroRepeatPolicy::Reject),
            "empty" => Ok(ZeroRepeatPolicy::Empty),
            _ => Err(format!(
                "Unknown zero repeat policy: {}. Expected `reject` or `empty`",
                s
            )),
        }
    }
}

/// Knobs shared by the sparse utilities.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SparseConfig {
    pub zero_repeat: ZeroRepeatPolicy,

    /// Dense entries with `|v| <= drop_tolerance` are not stored when
    /// converting to sparse. `0.0` keeps every non-zero.
    pub drop_tolerance: f64,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            zero_repeat: ZeroRepeatPolicy::Reject,
            drop_tolerance: 0.0,
        }
    }
}

impl SparseConfig {
    pub fn new(zero_repeat: ZeroRepeatPolicy, drop_tolerance: f64) -> Self {
        Self {
            zero_repeat,
            drop_tolerance,
        }
    }

    /// Parse a possibly partial JSON document. Missing or malformed fields
    /// keep their default value and emit a warning.
    pub fn from_json_str(config_json: &str) -> anyhow::Result<Self> {
        let partial: serde_json::Value =
            serde_json::from_str(config_json).context("Failed to parse sparse config JSON")?;
        let mut config = SparseConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            };
        }

        load_or_default!(zero_repeat);
        load_or_default!(drop_tolerance);

        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        Self::from_json_str(&config_json)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.drop_tolerance.is_finite() || self.drop_tolerance < 0.0 {
            anyhow::bail!(
                "drop_tolerance must be a finite, non-negative number (got {})",
                self.drop_tolerance
            );
        }
        Ok(())
    }
}
