#![deny(unsafe_code)]
//! Shared oracles for the atkin integration suites.

/// Trial-division primality, independent of the sieve.
pub fn is_prime_by_trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// All primes `<= limit` by trial division.
pub fn reference_primes(limit: u64) -> Vec<u64> {
    (0..=limit).filter(|&n| is_prime_by_trial_division(n)).collect()
}

/// Side of the visualization grid for a sieve of `limit`: `floor(sqrt(limit + 1))`.
pub fn expected_side(limit: u64) -> u64 {
    let len = limit + 1;
    let mut side = 0;
    while (side + 1) * (side + 1) <= len {
        side += 1;
    }
    side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_agrees_with_known_values() {
        assert_eq!(reference_primes(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(!is_prime_by_trial_division(1));
        assert!(!is_prime_by_trial_division(91));
        assert!(is_prime_by_trial_division(7919));
    }

    #[test]
    fn expected_side_is_floor_sqrt() {
        assert_eq!(expected_side(0), 1);
        assert_eq!(expected_side(2), 1);
        assert_eq!(expected_side(3), 2);
        assert_eq!(expected_side(10), 3);
        assert_eq!(expected_side(99), 10);
    }
}
