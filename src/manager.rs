use crate::config::{Config, check_slot};
use crate::index::{Average, RangeIndex, Slot};
use crate::sample::generate_slots;
use anyhow::{Context, Result};
use std::fmt;

/// Owns the index built from a [`Config`].
pub struct Manager {
    index: RangeIndex,
}

impl Manager {
    /// Build the index from the configured slots, or from sample data if none are given.
    pub fn new(cfg: Config) -> Result<Self> {
        log::info!("{cfg:#?}");

        let slots = match &cfg.slots {
            Some(slots) => {
                log::info!("using {} configured slots", slots.len());
                slots.clone()
            }
            None => {
                let slots = generate_slots(&cfg).context("failed to generate sample slots")?;
                log::info!("generated {} sample slots", slots.len());
                slots
            }
        };

        let index = RangeIndex::build(cfg.n_slots, &slots).context("failed to build index")?;

        Ok(Self { index })
    }

    /// Average measurements over the hours `l..=r`.
    pub fn query(&self, l: usize, r: usize) -> Result<RangeReport> {
        let avg = self
            .index
            .average(l, r)
            .with_context(|| format!("failed to query hours {l} to {r}"))?;
        Ok(RangeReport {
            l,
            r,
            avg,
            updated: false,
        })
    }

    /// Replace the measurements of one hour, then report the average over `l..=r`.
    pub fn update(
        &mut self,
        index: usize,
        slot: Slot,
        l: usize,
        r: usize,
    ) -> Result<RangeReport> {
        check_slot(&slot).context("invalid new measurements")?;
        self.index
            .update(index, slot)
            .with_context(|| format!("failed to update hour {index}"))?;
        log::info!("updated hour {index} to {slot:?}");

        let mut report = self.query(l, r)?;
        report.updated = true;
        Ok(report)
    }

    /// Current measurements of every hour followed by the whole-range average.
    pub fn summary(&self) -> Result<Summary> {
        let slots = (0..self.index.n_slots())
            .map(|i_slot| self.index.slot(i_slot))
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read slots")?;
        let total = self.index.total().average(self.index.n_slots());
        Ok(Summary { slots, total })
    }
}

/// Average measurements over a range of hours.
#[derive(Debug, PartialEq, Clone)]
pub struct RangeReport {
    pub l: usize,
    pub r: usize,
    pub avg: Average,
    pub updated: bool,
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.updated { "UPDATED " } else { "" };
        writeln!(
            f,
            "{prefix}AVERAGE DATA FROM {} HOURS TO {} HOURS:",
            self.l, self.r
        )?;
        writeln!(f, "\tSpeed: {:.2} km/h", self.avg.speed)?;
        write!(f, "\tCongestion: {} vph", self.avg.congestion.trunc())
    }
}

/// Per-hour measurements and their overall average.
#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    pub slots: Vec<Slot>,
    pub total: Average,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HOUR    SPEED (km/h)    CONGESTION (vph)")?;
        for (i_slot, slot) in self.slots.iter().enumerate() {
            writeln!(
                f,
                "{i_slot:>4} {:>15.2} {:>19}",
                slot.speed,
                slot.congestion.trunc()
            )?;
        }
        write!(
            f,
            " ALL {:>15.2} {:>19}",
            self.total.speed,
            self.total.congestion.trunc()
        )
    }
}
