//! Fuzzy operators: combining degrees into a firing strength, firing a rule
//! against its consequent, and aggregating fired consequents.

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;

/// A rule's firing strength, in `[0, 1]`.
pub type FiringStrength = f64;

/// The pointwise maximum of every clipped consequent of one inference pass.
pub type AggregatedSet = MembershipFunction;

// NaN is no evidence at all, so it counts as degree 0
fn degree(d: f64) -> f64 {
    if d.is_nan() {
        0.
    } else {
        d
    }
}

/// Fuzzy AND: the minimum of all degrees. With no degrees this is the
/// identity of `min` over `[0, 1]`, i.e. `1.0`. A NaN degree counts as `0.0`.
pub fn fuzzy_and(degrees: impl IntoIterator<Item = f64>) -> FiringStrength {
    degrees.into_iter().map(degree).fold(1., f64::min)
}

/// Fuzzy OR: the maximum of all degrees. With no degrees this is `0.0`.
/// A NaN degree counts as `0.0`.
pub fn fuzzy_or(degrees: impl IntoIterator<Item = f64>) -> FiringStrength {
    degrees.into_iter().map(degree).fold(0., f64::max)
}

/// Mamdani implication: the consequent clipped at the firing strength.
/// A NaN strength is treated as `0.0`, see [`MembershipFunction::clip`].
pub fn fire_rule(strength: FiringStrength, consequent: &MembershipFunction) -> MembershipFunction {
    consequent.clip(strength)
}

/// Pointwise maximum of one or more fuzzy sets over the same universe.
///
/// All-zero sets are valid inputs and leave the result unchanged.
pub fn aggregate<'a>(sets: impl IntoIterator<Item = &'a MembershipFunction>) -> Result<AggregatedSet> {
    let mut iter = sets.into_iter();
    let first = iter.next().ok_or(FuzzyError::EmptyInput)?;

    iter.try_fold(first.clone(), |agg, next| agg.pointwise_max(next))
}

#[test]
fn test_fuzzy_and_or() {
    assert_eq!(fuzzy_and([1.0, 0.0]), 0.);
    assert_eq!(fuzzy_and([0.7, 0.3, 0.9]), 0.3);
    assert_eq!(fuzzy_or([0.7, 0.3, 0.9]), 0.9);
    assert_eq!(fuzzy_and([]), 1.);
    assert_eq!(fuzzy_or([]), 0.);

    // not old AND not high power, with "not x" spelled as OR of the other terms
    let (year_md, year_hi) = (0.2, 0.6);
    let (power_lo, power_md) = (0., 0.4);
    let strength = fuzzy_and([fuzzy_or([year_md, year_hi]), fuzzy_or([power_lo, power_md])]);

    assert_eq!(strength, 0.4);
}

#[test]
fn test_nan_degree_is_zero() {
    assert_eq!(fuzzy_and([f64::NAN, 0.5]), 0.);
    assert_eq!(fuzzy_and([0.5, f64::NAN]), 0.);
    assert_eq!(fuzzy_or([f64::NAN, 0.5]), 0.5);
    assert_eq!(fuzzy_or([f64::NAN]), 0.);
}

#[test]
fn test_fire_rule() {
    use crate::universe::Universe;

    let u = Universe::arange(0., 101., 1.).unwrap();
    let hi = MembershipFunction::trapezoidal(&u, 60., 85., 100., 100.).unwrap();

    assert!(fire_rule(0., &hi).is_empty_set());
    assert_eq!(fire_rule(1., &hi), hi);
    assert_eq!(fire_rule(0.3, &hi).max_membership(), 0.3);
    assert!(fire_rule(f64::NAN, &hi).is_empty_set());
}

#[test]
fn test_aggregate() {
    use crate::universe::Universe;

    let u = Universe::arange(0., 5., 1.).unwrap();
    let a = MembershipFunction::new(u.clone(), vec![1., 0.5, 0., 0., 0.]).unwrap();
    let b = MembershipFunction::new(u.clone(), vec![0., 0., 0.3, 0.3, 0.1]).unwrap();
    let zero = MembershipFunction::zeros(&u);

    let agg = aggregate([&a, &b, &zero]).unwrap();

    assert_eq!(agg.values(), &[1., 0.5, 0.3, 0.3, 0.1]);
    assert_eq!(aggregate([&a, &a]).unwrap(), a);
    assert_eq!(aggregate([&a]).unwrap(), a);
    assert_eq!(aggregate([&zero, &b]).unwrap(), b);
}

#[test]
fn test_aggregate_errors() {
    use crate::universe::Universe;

    assert_eq!(aggregate(std::iter::empty()), Err(FuzzyError::EmptyInput));

    let a = MembershipFunction::zeros(&Universe::arange(0., 5., 1.).unwrap());
    let b = MembershipFunction::zeros(&Universe::arange(0., 6., 1.).unwrap());

    assert_eq!(
        aggregate([&a, &b]),
        Err(FuzzyError::UniverseMismatch { expected: 5, actual: 6 })
    );
}
