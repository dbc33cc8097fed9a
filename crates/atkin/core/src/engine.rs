use tracing::{debug, info};

use crate::bound::BoundEstimator;
use crate::error::{SieveError, SieveResult};
use crate::extract::PrimeExtractor;
use crate::render::VisualizationRenderer;
use crate::sieve::Sieve;
use crate::storage::{ImageReference, ImageStore};
use crate::types::{PrimeList, RenderedImage, SieveConfig, Visualization, VisualizationFormat};

/// Entry point for prime queries and visualizations.
///
/// Holds only its [`SieveConfig`]; every call builds its own sieve and keeps
/// nothing afterwards, so one engine can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct SieveEngine {
    config: SieveConfig,
    estimator: BoundEstimator,
}

impl SieveEngine {
    /// Create an engine, rejecting an inconsistent configuration.
    pub fn new(config: SieveConfig) -> SieveResult<Self> {
        config.validate()?;
        Ok(Self {
            estimator: BoundEstimator::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// All primes `<= limit`.
    pub fn primes_up_to(&self, limit: i64) -> SieveResult<PrimeList> {
        let sieve = self.build(limit)?;
        Ok(PrimeExtractor::extract(&sieve))
    }

    /// The first `n` primes. Empty for `n == 0`, invalid for `n < 0`.
    pub fn first_n_primes(&self, n: i64) -> SieveResult<PrimeList> {
        self.estimator.estimate_and_grow(n)
    }

    /// Render the sieve for `limit`.
    pub fn render(&self, limit: i64, format: VisualizationFormat) -> SieveResult<Visualization> {
        let sieve = self.build(limit)?;
        VisualizationRenderer::render(&sieve, format)
    }

    /// Like [`SieveEngine::render`], with the format given by name.
    ///
    /// The name is parsed before any sieving, so an unknown format fails
    /// with [`SieveError::UnsupportedFormat`] and no work is done.
    pub fn render_named(&self, limit: i64, format: &str) -> SieveResult<Visualization> {
        let format = format.parse::<VisualizationFormat>()?;
        self.render(limit, format)
    }

    /// PNG rendering of the sieve for `limit`.
    pub fn render_image(&self, limit: i64) -> SieveResult<RenderedImage> {
        let sieve = self.build(limit)?;
        VisualizationRenderer::render_image(&sieve)
    }

    /// Render the PNG for `limit` and hand it to `store`.
    pub async fn persist(&self, store: &dyn ImageStore, limit: i64) -> SieveResult<ImageReference> {
        let image = self.render_image(limit)?;
        let reference = store.persist(&format!("sieve_{limit}"), &image).await?;
        info!(limit, bytes = image.len(), %reference, "sieve image persisted");
        Ok(reference)
    }

    fn build(&self, limit: i64) -> SieveResult<Sieve> {
        if limit < 0 {
            return Err(SieveError::InvalidArgument(format!(
                "limit must be >= 0, got {limit}"
            )));
        }
        if limit as u64 > self.config.max_limit {
            return Err(SieveError::ResourceExhausted(format!(
                "limit {limit} exceeds the configured cap {}",
                self.config.max_limit
            )));
        }
        debug!(limit, "building sieve");
        Sieve::build(limit)
    }
}
