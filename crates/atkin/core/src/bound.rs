use tracing::{debug, warn};

use crate::error::{SieveError, SieveResult};
use crate::extract::PrimeExtractor;
use crate::sieve::Sieve;
use crate::types::{PrimeList, SieveConfig};

/// Smallest starting limit; holds the first six primes.
const SMALL_COUNT_LIMIT: u64 = 13;

/// Answers "first `n` primes" by guessing a sieve limit and widening it until
/// the sieve holds at least `n` primes.
///
/// Widening is bounded by [`SieveConfig::max_limit`] and
/// [`SieveConfig::max_growth_rounds`]; running past either is reported as
/// [`SieveError::ResourceExhausted`].
#[derive(Clone, Debug, Default)]
pub struct BoundEstimator {
    config: SieveConfig,
}

impl BoundEstimator {
    pub fn new(config: SieveConfig) -> Self {
        Self { config }
    }

    /// Starting limit for a count query.
    ///
    /// `13` for `n < 6`, otherwise `floor(n (ln n + ln ln n) * 1.2)`, which
    /// over-estimates the n-th prime.
    pub fn initial_limit(n: u64) -> u64 {
        if n < 6 {
            return SMALL_COUNT_LIMIT;
        }
        let n = n as f64;
        (n * (n.ln() + n.ln().ln()) * 1.2) as u64
    }

    /// The first `n` primes.
    ///
    /// `n == 0` yields an empty list without sieving; `n < 0` is an
    /// [`SieveError::InvalidArgument`].
    pub fn estimate_and_grow(&self, n: i64) -> SieveResult<PrimeList> {
        if n < 0 {
            return Err(SieveError::InvalidArgument(format!(
                "prime count must be >= 0, got {n}"
            )));
        }
        if n == 0 {
            return Ok(PrimeList::empty());
        }
        let wanted = n as u64;
        self.search(wanted, Self::initial_limit(wanted))
    }

    fn search(&self, wanted: u64, start: u64) -> SieveResult<PrimeList> {
        let cap = self.config.max_limit;
        let mut limit = start.min(cap);

        for round in 0..self.config.max_growth_rounds {
            let sieve = Sieve::build(i64::try_from(limit).unwrap_or(i64::MAX))?;
            let primes = PrimeExtractor::extract(&sieve);
            let found = primes.len() as u64;

            if found >= wanted {
                debug!(wanted, limit, round, "count query satisfied");
                return Ok(primes.take(wanted as usize));
            }
            if limit >= cap {
                warn!(wanted, found, cap, "count query hit the limit cap");
                return Err(SieveError::ResourceExhausted(format!(
                    "only {found} primes up to the cap {cap}, {wanted} requested"
                )));
            }

            let next = (limit as f64 * self.config.growth_factor) as u64;
            debug!(wanted, found, limit, next, "too few primes, widening");
            limit = next.max(limit + 1).min(cap);
        }

        warn!(wanted, limit, "count query ran out of widening rounds");
        Err(SieveError::ResourceExhausted(format!(
            "{wanted} primes not reached after {} widening rounds",
            self.config.max_growth_rounds
        )))
    }
}
