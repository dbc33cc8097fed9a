#![deny(unsafe_code)]
//! # atkin-core
//!
//! Prime engine built on the Sieve of Atkin.
//!
//! Provides bounded (`primes_up_to`) and counted (`first_n_primes`) prime
//! queries, plus text and PNG renderings of the sieve. Every call is a pure
//! function of its input; persistence of rendered images goes through an
//! [`ImageStore`] supplied by the caller.

pub mod bound;
pub mod engine;
pub mod error;
pub mod extract;
pub mod render;
pub mod sieve;
pub mod storage;
pub mod types;

pub use bound::BoundEstimator;
pub use engine::SieveEngine;
pub use error::{SieveError, SieveResult};
pub use extract::PrimeExtractor;
pub use render::{Bitmap, VisualizationRenderer};
pub use sieve::Sieve;
pub use storage::{ImageReference, ImageStore, InMemoryImageStore};
pub use types::{PrimeList, RenderedImage, SieveConfig, Visualization, VisualizationFormat};

/// All primes `<= limit`, using [`SieveConfig::default`].
pub fn primes_up_to(limit: i64) -> SieveResult<PrimeList> {
    SieveEngine::default().primes_up_to(limit)
}

/// The first `n` primes, using [`SieveConfig::default`].
pub fn first_n_primes(n: i64) -> SieveResult<PrimeList> {
    SieveEngine::default().first_n_primes(n)
}

/// Render the sieve for `limit` in the requested format, using [`SieveConfig::default`].
pub fn render(limit: i64, format: VisualizationFormat) -> SieveResult<Visualization> {
    SieveEngine::default().render(limit, format)
}
