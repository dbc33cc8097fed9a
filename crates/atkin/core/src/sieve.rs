//! Sieve of Atkin.
//!
//! Two passes over a boolean table indexed `0..=limit`:
//!
//! 1. Quadratic-form marking: for every `x, y >= 1` with `x², y² <= limit`,
//!    toggle `n = 4x² + y²` when `n mod 12 ∈ {1, 5}`, `n = 3x² + y²` when
//!    `n mod 12 = 7`, and `n = 3x² − y²` (for `x > y`) when `n mod 12 = 11`.
//!    An index ends up set iff it has an odd number of representations.
//! 2. Square-free filtering: for each surviving `r >= 5` with `r² <= limit`,
//!    clear every multiple of `r²`.
//!
//! After both passes the flag at `i >= 5` is set iff `i` is prime. Indices
//! 0 through 4 are never set; 2 and 3 are answered by [`Sieve::is_prime`]
//! and [`Sieve::primes`] directly.

use tracing::debug;

use crate::error::{SieveError, SieveResult};

/// Completed sieve table. Immutable once [`Sieve::build`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sieve {
    flags: Box<[bool]>,
}

// `build` always allocates `limit + 1 >= 1` entries, so a sieve is never empty.
#[allow(clippy::len_without_is_empty)]
impl Sieve {
    /// Build the sieve for `[0, limit]`.
    ///
    /// Fails with [`SieveError::InvalidArgument`] for a negative limit and with
    /// [`SieveError::ResourceExhausted`] if the table cannot be allocated.
    pub fn build(limit: i64) -> SieveResult<Self> {
        if limit < 0 {
            return Err(SieveError::InvalidArgument(format!(
                "limit must be >= 0, got {limit}"
            )));
        }
        let len = usize::try_from(limit)
            .ok()
            .and_then(|l| l.checked_add(1))
            .ok_or_else(|| {
                SieveError::ResourceExhausted(format!(
                    "limit {limit} does not fit in addressable memory"
                ))
            })?;

        let mut flags: Vec<bool> = Vec::new();
        flags.try_reserve_exact(len).map_err(|e| {
            SieveError::ResourceExhausted(format!("cannot allocate sieve of {len} entries: {e}"))
        })?;
        flags.resize(len, false);

        mark_quadratic_forms(&mut flags);
        clear_square_multiples(&mut flags);

        debug!(limit, "sieve built");
        Ok(Self {
            flags: flags.into_boxed_slice(),
        })
    }

    /// Inclusive upper bound of the table.
    pub fn limit(&self) -> u64 {
        (self.flags.len() - 1) as u64
    }

    /// Number of entries, `limit + 1`.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Raw Atkin flags. Indices 2 and 3 read `false`.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Prime membership for `n`, with 2 and 3 answered directly.
    pub fn is_prime(&self, n: u64) -> bool {
        if n > self.limit() {
            return false;
        }
        match n {
            2 | 3 => true,
            _ => self.flags[n as usize],
        }
    }

    /// Ascending primes `<= limit`.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        let limit = self.limit();
        [2u64, 3]
            .into_iter()
            .filter(move |&p| p <= limit)
            .chain(
                self.flags
                    .iter()
                    .enumerate()
                    .skip(5)
                    .filter_map(|(i, &set)| set.then_some(i as u64)),
            )
    }
}

fn mark_quadratic_forms(flags: &mut [bool]) {
    let limit = (flags.len() - 1) as u64;

    let mut x = 1u64;
    while x * x <= limit {
        let xx = x * x;
        let mut y = 1u64;
        while y * y <= limit {
            let yy = y * y;

            let n = 4 * xx + yy;
            if n <= limit && matches!(n % 12, 1 | 5) {
                flags[n as usize] ^= true;
            }

            let n = 3 * xx + yy;
            if n <= limit && n % 12 == 7 {
                flags[n as usize] ^= true;
            }

            if x > y {
                let n = 3 * xx - yy;
                if n <= limit && n % 12 == 11 {
                    flags[n as usize] ^= true;
                }
            }

            y += 1;
        }
        x += 1;
    }
}

fn clear_square_multiples(flags: &mut [bool]) {
    let limit = flags.len() - 1;

    let mut r = 5usize;
    while r * r <= limit {
        if flags[r] {
            let square = r * r;
            for multiple in (square..=limit).step_by(square) {
                flags[multiple] = false;
            }
        }
        r += 1;
    }
}
