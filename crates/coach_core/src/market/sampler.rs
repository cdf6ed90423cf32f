// Hiring market sampling
use super::filter::MarketFilter;
use crate::catalog::CoachCatalog;
use crate::coach::CoachRecord;
use crate::config::MarketConfig;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Draw `count` distinct candidates uniformly without replacement; when fewer
/// exist, return them all (catalog order) padded with placeholders.
fn draw<R: Rng + ?Sized>(
    candidates: Vec<&Arc<CoachRecord>>,
    count: usize,
    rng: &mut R,
) -> Vec<Arc<CoachRecord>> {
    if candidates.len() >= count {
        return index::sample(rng, candidates.len(), count)
            .into_iter()
            .map(|idx| Arc::clone(candidates[idx]))
            .collect();
    }

    let mut picked: Vec<Arc<CoachRecord>> = candidates.into_iter().cloned().collect();
    picked.resize_with(count, || Arc::new(CoachRecord::placeholder()));
    picked
}

/// Sample a hiring-market batch from every record matching `filter`.
pub fn sample_market<R: Rng + ?Sized>(
    catalog: &CoachCatalog,
    filter: MarketFilter,
    count: usize,
    rng: &mut R,
) -> Vec<Arc<CoachRecord>> {
    let candidates: Vec<_> = catalog.iter().filter(|c| filter.matches(c)).collect();
    let matched = candidates.len();
    let batch = draw(candidates, count, rng);
    log::debug!(
        "Market sample [{}]: {} matched, {} requested, {} placeholder(s)",
        filter,
        matched,
        count,
        count.saturating_sub(matched)
    );
    batch
}

/// Like [`sample_market`] but skips coaches that are currently employed.
pub fn sample_available<R: Rng + ?Sized>(
    catalog: &CoachCatalog,
    filter: MarketFilter,
    count: usize,
    rng: &mut R,
) -> Vec<Arc<CoachRecord>> {
    let candidates: Vec<_> =
        catalog.iter().filter(|c| filter.matches(c) && !c.is_employed()).collect();
    draw(candidates, count, rng)
}

/// Market sampler owning its own seeded RNG.
pub struct MarketSampler {
    rng: ChaCha8Rng,
}

impl MarketSampler {
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn sample(
        &mut self,
        catalog: &CoachCatalog,
        filter: MarketFilter,
        count: usize,
    ) -> Vec<Arc<CoachRecord>> {
        sample_market(catalog, filter, count, &mut self.rng)
    }

    pub fn sample_available(
        &mut self,
        catalog: &CoachCatalog,
        filter: MarketFilter,
        count: usize,
    ) -> Vec<Arc<CoachRecord>> {
        sample_available(catalog, filter, count, &mut self.rng)
    }
}
