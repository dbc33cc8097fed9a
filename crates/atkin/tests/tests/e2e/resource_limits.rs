//! End-to-end test: configured caps turn runaway requests into explicit errors.

use atkin_core::{SieveConfig, SieveEngine, SieveError, VisualizationFormat};

fn capped(max_limit: u64) -> SieveEngine {
    SieveEngine::new(SieveConfig::default().with_max_limit(max_limit)).unwrap()
}

#[test]
fn bounded_query_above_cap_fails_before_sieving() {
    let err = capped(1_000).primes_up_to(1_001).unwrap_err();
    assert!(matches!(err, SieveError::ResourceExhausted(_)));
}

#[test]
fn render_above_cap_fails() {
    let err = capped(1_000)
        .render(5_000, VisualizationFormat::BinaryImage)
        .unwrap_err();
    assert!(matches!(err, SieveError::ResourceExhausted(_)));
}

#[test]
fn counted_query_beyond_cap_fails() {
    // 168 primes exist up to 1000.
    let engine = capped(1_000);
    assert_eq!(engine.first_n_primes(168).unwrap().len(), 168);
    assert!(matches!(
        engine.first_n_primes(169),
        Err(SieveError::ResourceExhausted(_))
    ));
}

#[test]
fn absurd_count_fails_instead_of_growing_forever() {
    let err = SieveEngine::new(SieveConfig::small())
        .unwrap()
        .first_n_primes(i64::MAX)
        .unwrap_err();
    assert!(matches!(err, SieveError::ResourceExhausted(_)));
}

#[test]
fn config_rejects_non_growing_factor() {
    let config = SieveConfig {
        growth_factor: 0.5,
        ..SieveConfig::default()
    };
    assert!(matches!(
        SieveEngine::new(config),
        Err(SieveError::InvalidArgument(_))
    ));
}
