use crate::config::Config;
use crate::index::Slot;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Uniform;

/// Generate random slot measurements.
///
/// Speeds and congestion levels are whole numbers drawn uniformly from
/// `0..max_speed` and `0..max_congestion`. The generator is seeded from
/// `cfg.seed` if present and from the OS otherwise.
pub fn generate_slots(cfg: &Config) -> Result<Vec<Slot>> {
    let mut rng = match cfg.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng")?,
    };

    let speed_dist = Uniform::new(0, cfg.max_speed)?;
    let congestion_dist = Uniform::new(0, cfg.max_congestion)?;

    let slots = (0..cfg.n_slots)
        .map(|_| {
            let speed = speed_dist.sample(&mut rng);
            let congestion = congestion_dist.sample(&mut rng);
            Slot::new(speed.into(), congestion.into())
        })
        .collect();

    Ok(slots)
}
