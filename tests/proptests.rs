//! Property-based tests for membership functions, aggregation and
//! defuzzification.

use fuzzy_mamdani::{
    aggregate, centroid, defuzzify_all, membership_at, MembershipFunction, Universe,
};
use proptest::prelude::*;

// ===== Strategies =====

/// Integer-spaced universe `[0, n)` with memberships over it
fn arb_set(max_len: usize) -> impl Strategy<Value = MembershipFunction> {
    (2..max_len)
        .prop_flat_map(|n| prop::collection::vec(0.0f64..=1.0, n))
        .prop_map(|values| {
            let universe = Universe::arange(0., values.len() as f64, 1.).unwrap();
            MembershipFunction::new(universe, values).unwrap()
        })
}

/// `count` sets sharing one universe
fn arb_sets(count: usize) -> impl Strategy<Value = Vec<MembershipFunction>> {
    (2usize..40)
        .prop_flat_map(move |n| prop::collection::vec(prop::collection::vec(0.0f64..=1.0, n), count))
        .prop_map(|rows| {
            let universe = Universe::arange(0., rows[0].len() as f64, 1.).unwrap();
            rows.into_iter()
                .map(|values| MembershipFunction::new(universe.clone(), values).unwrap())
                .collect()
        })
}

/// Sorts integer breakpoints into non-decreasing shape parameters
fn sorted<const N: usize>(mut points: [u32; N]) -> [f64; N] {
    points.sort_unstable();
    points.map(f64::from)
}

// ===== Properties =====

proptest! {
    #[test]
    fn prop_zero_outside_universe(set in arb_set(30), below in 0.001f64..1e6, above in 0.001f64..1e6) {
        let universe = set.universe();

        prop_assert_eq!(membership_at(universe, &set, universe.first() - below), Ok(0.));
        prop_assert_eq!(membership_at(universe, &set, universe.last() + above), Ok(0.));
    }

    #[test]
    fn prop_exact_at_samples(set in arb_set(30)) {
        for (x, m) in set.points() {
            prop_assert_eq!(membership_at(set.universe(), &set, x), Ok(m));
        }
    }

    #[test]
    fn prop_interpolation_between_neighbours(set in arb_set(30), t in 0.0f64..1.0) {
        let values = set.values();

        for i in 0..values.len() - 1 {
            let x = i as f64 + t;
            let m = set.at(x);
            let (lo, hi) = (values[i].min(values[i + 1]), values[i].max(values[i + 1]));

            prop_assert!(m >= lo - 1e-12 && m <= hi + 1e-12);
        }
    }

    #[test]
    fn prop_triangular_peak_and_feet([a, b, c] in prop::array::uniform3(0u32..=100).prop_map(sorted)) {
        let universe = Universe::arange(0., 101., 1.).unwrap();
        let mf = MembershipFunction::triangular(&universe, a, b, c).unwrap();

        prop_assert_eq!(mf.at(b), 1.);
        if a < b {
            prop_assert_eq!(mf.at(a), 0.);
        }
        if b < c {
            prop_assert_eq!(mf.at(c), 0.);
        }
        prop_assert!(mf.values().iter().all(|v| (0. ..=1.).contains(v)));
    }

    #[test]
    fn prop_trapezoidal_plateau([a, b, c, d] in prop::array::uniform4(0u32..=100).prop_map(sorted), t in 0.0f64..=1.0) {
        let universe = Universe::arange(0., 101., 1.).unwrap();
        let mf = MembershipFunction::trapezoidal(&universe, a, b, c, d).unwrap();

        prop_assert_eq!(mf.at(b + t * (c - b)), 1.);
    }

    #[test]
    fn prop_clip_bounded_and_idempotent(set in arb_set(30), s in 0.0f64..=1.0, extra in 0.0f64..=1.0) {
        let clipped = set.clip(s);

        for (&c, &m) in clipped.values().iter().zip(set.values()) {
            prop_assert!(c <= s);
            prop_assert!(c <= m);
        }
        prop_assert_eq!(&clipped.clip(s), &clipped);
        prop_assert_eq!(&clipped.clip((s + extra).min(1.)), &clipped);
    }

    #[test]
    fn prop_max_commutative_associative(sets in arb_sets(3)) {
        let (a, b, c) = (&sets[0], &sets[1], &sets[2]);

        prop_assert_eq!(a.pointwise_max(b).unwrap(), b.pointwise_max(a).unwrap());
        prop_assert_eq!(
            a.pointwise_max(b).unwrap().pointwise_max(c).unwrap(),
            a.pointwise_max(&b.pointwise_max(c).unwrap()).unwrap()
        );
        prop_assert_eq!(&aggregate([a, a]).unwrap(), a);
    }

    #[test]
    fn prop_maxima_ordering(set in arb_set(40)) {
        prop_assume!(!set.is_empty_set());

        let result = defuzzify_all(&set).unwrap();

        prop_assert!(result.min_of_maximum <= result.mean_of_maximum);
        prop_assert!(result.mean_of_maximum <= result.max_of_maximum);
        prop_assert!(result.centroid >= set.universe().first() && result.centroid <= set.universe().last());
        prop_assert!(result.bisector >= set.universe().first() && result.bisector <= set.universe().last());
    }

    #[test]
    fn prop_symmetric_centroid(half in prop::collection::vec(0.0f64..=1.0, 1..20), peak in 0.01f64..=1.0) {
        let mut values = half.clone();
        values.push(peak);
        values.extend(half.iter().rev());

        let center = half.len() as f64;
        let universe = Universe::arange(0., values.len() as f64, 1.).unwrap();
        let set = MembershipFunction::new(universe, values).unwrap();

        prop_assert!((centroid(&set).unwrap() - center).abs() < 1e-9 * center.max(1.));
    }
}
