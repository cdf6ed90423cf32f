//! Hiring market: category filters and randomized candidate batches.

pub mod filter;
pub mod sampler;

pub use filter::MarketFilter;
pub use sampler::{sample_available, sample_market, MarketSampler};
