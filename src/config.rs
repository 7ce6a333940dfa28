use crate::index::Slot;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Traffic data configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of time slots (one per hour by default).
    pub n_slots: usize,

    /// Upper bound (exclusive) of sampled speeds (km/h).
    pub max_speed: u32,
    /// Upper bound (exclusive) of sampled congestion levels (vph).
    pub max_congestion: u32,

    /// Seed of the sample data generator.
    pub seed: Option<u64>,

    /// Explicit slot measurements, used instead of sample data.
    pub slots: Option<Vec<Slot>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_slots: 24,
            max_speed: 120,
            max_congestion: 2500,
            seed: None,
            slots: None,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Keys missing from the file take their default values.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.n_slots, 1..=10_000).context("invalid number of slots")?;
        check_num(self.max_speed, 1..=1_000).context("invalid maximum speed")?;
        check_num(self.max_congestion, 1..=1_000_000).context("invalid maximum congestion")?;

        if let Some(slots) = &self.slots {
            let len = slots.len();
            if len != self.n_slots {
                bail!("number of slots must be {}, but is {len}", self.n_slots);
            }
            for (i_slot, slot) in slots.iter().enumerate() {
                check_slot(slot).with_context(|| format!("invalid slot {i_slot}"))?;
            }
        }

        Ok(())
    }
}

/// Check that both measurements of a slot are finite and non-negative.
pub fn check_slot(slot: &Slot) -> Result<()> {
    check_num(slot.speed, 0.0..f64::INFINITY).context("invalid speed")?;
    check_num(slot.congestion, 0.0..f64::INFINITY).context("invalid congestion")?;
    Ok(())
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
