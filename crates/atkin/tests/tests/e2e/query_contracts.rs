//! End-to-end test: the public query contracts of the engine.

use atkin_core::{first_n_primes, primes_up_to, SieveConfig, SieveEngine, SieveError};

#[test]
fn primes_up_to_ten() {
    assert_eq!(primes_up_to(10).unwrap().as_slice(), &[2, 3, 5, 7]);
}

#[test]
fn first_ten_primes() {
    assert_eq!(
        first_n_primes(10).unwrap().as_slice(),
        &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
    );
}

#[test]
fn zero_count_is_empty_and_negative_count_is_invalid() {
    assert!(first_n_primes(0).unwrap().is_empty());
    assert!(matches!(
        first_n_primes(-1),
        Err(SieveError::InvalidArgument(_))
    ));
}

#[test]
fn limits_below_five() {
    assert!(primes_up_to(0).unwrap().is_empty());
    assert!(primes_up_to(1).unwrap().is_empty());
    assert_eq!(primes_up_to(2).unwrap().as_slice(), &[2]);
    assert_eq!(primes_up_to(3).unwrap().as_slice(), &[2, 3]);
    assert_eq!(primes_up_to(4).unwrap().as_slice(), &[2, 3]);
}

#[test]
fn large_count_lands_on_known_prime() {
    let engine = SieveEngine::new(SieveConfig::small()).unwrap();
    let primes = engine.first_n_primes(10_000).unwrap();
    assert_eq!(primes.len(), 10_000);
    assert_eq!(primes.last(), Some(&104_729));
}

#[test]
fn engine_is_stateless_across_calls() {
    let engine = SieveEngine::default();
    let first = engine.primes_up_to(1_000).unwrap();
    let _ = engine.primes_up_to(50).unwrap();
    let _ = engine.first_n_primes(77).unwrap();
    assert_eq!(engine.primes_up_to(1_000).unwrap(), first);
}

#[test]
fn engine_can_be_shared_across_threads() {
    let engine = std::sync::Arc::new(SieveEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.first_n_primes(100 * (i + 1)).unwrap().len())
        })
        .collect();
    let lens: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(lens, vec![100, 200, 300, 400]);
}
