use tracing::debug;

use crate::sieve::Sieve;
use crate::types::PrimeList;

/// Turns a completed [`Sieve`] into an ordered [`PrimeList`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimeExtractor;

impl PrimeExtractor {
    /// Every prime `<= sieve.limit()`.
    ///
    /// 2 and 3 are prepended only when the limit admits them; the rest come
    /// from scanning indices `5..=limit` in ascending order.
    pub fn extract(sieve: &Sieve) -> PrimeList {
        let primes: Vec<u64> = sieve.primes().collect();
        debug!(limit = sieve.limit(), count = primes.len(), "primes extracted");
        PrimeList::from_ascending(primes)
    }
}
