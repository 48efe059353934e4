//! Accuracy regression tests for cdtw-engine.
//!
//! Reference scenarios are fixed values; the property checks run over seeded
//! random sequence pairs so failures are reproducible.

use cdtw_engine::{
    Dtw, DtwError, NearestNeighbourSearch, SakoeChibaBand, TimeSeries, distance, l1_distance,
    nearest_neighbour,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ts(values: Vec<f64>) -> TimeSeries {
    TimeSeries::new(values).expect("valid test series")
}

/// 40 seeded random pairs with lengths between 1 and 24.
fn random_pairs(seed: u64) -> Vec<(TimeSeries, TimeSeries)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..40)
        .map(|_| {
            let n = rng.gen_range(1..=24);
            let a: Vec<f64> = (0..n).map(|_| rng.gen_range(-5.0..5.0)).collect();
            let b: Vec<f64> = (0..n).map(|_| rng.gen_range(-5.0..5.0)).collect();
            (ts(a), ts(b))
        })
        .collect()
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// a) reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn reference_pair_matches_known_values() {
    let a = [1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let b = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.0, 6.0, 7.0];
    let got: Vec<f64> = [0, 1, 2]
        .iter()
        .map(|&r| distance(&a, &b, r).unwrap().value())
        .collect();
    assert_eq!(got, vec![8.0, 4.0, 0.0]);
}

#[test]
fn single_point_series() {
    for r in [0, 1, 3, 100] {
        assert_eq!(distance(&[5.0], &[9.0], r).unwrap().value(), 4.0);
    }
}

#[test]
fn nearest_neighbour_tie_scenario() {
    let candidates = vec![
        ts(vec![0.0, 0.0, 0.0]),
        ts(vec![1.0, 1.0, 1.0]),
        ts(vec![1.0, 1.0, 1.0]),
    ];
    let result = nearest_neighbour(ts(vec![1.0, 1.0, 1.0]).as_view(), &candidates, 0).unwrap();
    let raw: Vec<f64> = result.distances.iter().map(|d| d.value()).collect();
    assert_eq!(raw, vec![3.0, 0.0, 0.0]);
    assert_eq!(result.best_index, 1);
}

#[test]
fn length_mismatch_produces_no_scalar() {
    let err = distance(&[1.0; 5], &[1.0; 4], 1).unwrap_err();
    assert_eq!(err, DtwError::LengthMismatch { left: 5, right: 4 });
}

#[test]
fn negative_radius_rejected() {
    assert!(matches!(
        SakoeChibaBand::try_from(-3_i64),
        Err(DtwError::NegativeRadius { radius: -3 })
    ));
}

// ---------------------------------------------------------------------------
// b) metric-like properties over random pairs
// ---------------------------------------------------------------------------

#[test]
fn non_negative_and_symmetric() {
    for (i, (a, b)) in random_pairs(7).iter().enumerate() {
        for r in [0, 1, 2, 5] {
            let dtw = Dtw::with_sakoe_chiba(r);
            let ab = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
            let ba = dtw.distance(b.as_view(), a.as_view()).unwrap().value();
            assert!(ab >= 0.0, "pair {i} r={r}: negative distance {ab}");
            assert!((ab - ba).abs() < TOL, "pair {i} r={r}: {ab} != {ba}");
        }
    }
}

#[test]
fn identity_is_zero() {
    for (a, _) in random_pairs(11) {
        for r in [0, 1, 4, a.len()] {
            let d = Dtw::with_sakoe_chiba(r).distance(a.as_view(), a.as_view()).unwrap();
            assert_eq!(d.value(), 0.0);
        }
    }
}

#[test]
fn monotone_non_increasing_in_radius() {
    for (i, (a, b)) in random_pairs(23).iter().enumerate() {
        let mut previous = f64::INFINITY;
        for r in 0..=a.len() {
            let d = Dtw::with_sakoe_chiba(r)
                .distance(a.as_view(), b.as_view())
                .unwrap()
                .value();
            assert!(d <= previous + TOL, "pair {i}: r={r} gave {d} > {previous}");
            previous = d;
        }
    }
}

#[test]
fn radius_zero_is_pointwise_sum() {
    for (a, b) in random_pairs(31) {
        let expected: f64 = a
            .as_ref()
            .iter()
            .zip(b.as_ref())
            .map(|(x, y)| (x - y).abs())
            .sum();
        let d = Dtw::with_sakoe_chiba(0).distance(a.as_view(), b.as_view()).unwrap();
        assert!((d.value() - expected).abs() < TOL);
        assert_eq!(d, l1_distance(a.as_view(), b.as_view()).unwrap());
    }
}

#[test]
fn wide_radius_matches_full_band() {
    for (a, b) in random_pairs(43) {
        let n = a.len();
        let full = Dtw::with_sakoe_chiba(n.saturating_sub(1))
            .distance(a.as_view(), b.as_view())
            .unwrap();
        for r in [n, n + 7, usize::MAX] {
            let wide = Dtw::with_sakoe_chiba(r).distance(a.as_view(), b.as_view()).unwrap();
            assert_eq!(wide, full);
        }
    }
}

// ---------------------------------------------------------------------------
// c) search determinism
// ---------------------------------------------------------------------------

#[test]
fn parallel_and_sequential_search_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let n = 16;
    let mut candidates: Vec<TimeSeries> = (0..50)
        .map(|_| ts((0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()))
        .collect();
    // Duplicate a candidate further down so the minimum is tied.
    let query = ts((0..n).map(|_| rng.gen_range(-1.0..1.0)).collect());
    candidates[30] = query.clone();
    candidates[41] = query.clone();

    let dtw = Dtw::with_sakoe_chiba(3);
    let par = NearestNeighbourSearch::new(dtw)
        .search(query.as_view(), &candidates)
        .unwrap();
    let seq = NearestNeighbourSearch::new(dtw)
        .with_parallel(false)
        .search(query.as_view(), &candidates)
        .unwrap();

    assert_eq!(par, seq);
    assert_eq!(par.best_index, 30);
    assert_eq!(par.best_distance().value(), 0.0);
}
