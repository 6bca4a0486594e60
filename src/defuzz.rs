//! Reductions of an aggregated fuzzy set to a crisp value.
//!
//! Every method works on the discrete samples of the set and is a pure
//! function of it. A set whose memberships are all zero has no meaningful
//! crisp value, so every method fails with [`FuzzyError::EmptySet`] for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Membership-weighted mean of the universe
    Centroid,
    /// Value splitting the membership mass in half
    Bisector,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Smallest value for which the membership function is maximum
    Som,
    /// Largest value for which the membership function is maximum
    Lom,
}

impl DefuzzificationOp {
    pub const ALL: [DefuzzificationOp; 5] = [Self::Centroid, Self::Bisector, Self::Mom, Self::Som, Self::Lom];

    pub fn call(self, set: &MembershipFunction) -> Result<f64> {
        match self {
            Self::Centroid => centroid(set),
            Self::Bisector => bisector(set),
            Self::Mom => mean_of_maximum(set),
            Self::Som => min_of_maximum(set),
            Self::Lom => max_of_maximum(set),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::Mom => "mom",
            Self::Som => "som",
            Self::Lom => "lom",
        }
    }
}

impl fmt::Display for DefuzzificationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefuzzificationOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "centroid" => Ok(Self::Centroid),
            "bisector" => Ok(Self::Bisector),
            "mom" => Ok(Self::Mom),
            "som" => Ok(Self::Som),
            "lom" => Ok(Self::Lom),
            other => Err(format!("unknown defuzzification method: {other}")),
        }
    }
}

/// All five crisp values of one aggregated set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefuzzificationResult {
    pub centroid: f64,
    pub bisector: f64,
    pub mean_of_maximum: f64,
    pub min_of_maximum: f64,
    pub max_of_maximum: f64,
}

impl DefuzzificationResult {
    /// Every method reporting the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            centroid: value,
            bisector: value,
            mean_of_maximum: value,
            min_of_maximum: value,
            max_of_maximum: value,
        }
    }

    pub fn get(&self, op: DefuzzificationOp) -> f64 {
        match op {
            DefuzzificationOp::Centroid => self.centroid,
            DefuzzificationOp::Bisector => self.bisector,
            DefuzzificationOp::Mom => self.mean_of_maximum,
            DefuzzificationOp::Som => self.min_of_maximum,
            DefuzzificationOp::Lom => self.max_of_maximum,
        }
    }
}

/// Runs all five reductions over the same set.
pub fn defuzzify_all(set: &MembershipFunction) -> Result<DefuzzificationResult> {
    Ok(DefuzzificationResult {
        centroid: centroid(set)?,
        bisector: bisector(set)?,
        mean_of_maximum: mean_of_maximum(set)?,
        min_of_maximum: min_of_maximum(set)?,
        max_of_maximum: max_of_maximum(set)?,
    })
}

fn total_membership(set: &MembershipFunction) -> Result<f64> {
    let total = set.values().iter().sum::<f64>();

    if total > 0. {
        Ok(total)
    } else {
        Err(FuzzyError::EmptySet)
    }
}

/// Σ(x·μ(x)) / Σμ(x)
pub fn centroid(set: &MembershipFunction) -> Result<f64> {
    let den = total_membership(set)?;
    let num = set.points().map(|(x, m)| x * m).sum::<f64>();

    Ok(num / den)
}

/// The first sample at which the running sum of memberships reaches half the total.
pub fn bisector(set: &MembershipFunction) -> Result<f64> {
    let target = total_membership(set)? / 2.;
    let mut cum = 0.;

    for (x, m) in set.points() {
        cum += m;
        if cum >= target {
            return Ok(x);
        }
    }

    // Rounding can leave the final running sum a hair under the target
    Ok(set.universe().last())
}

/// Universe values attaining the global maximum membership, in order.
fn maxima(set: &MembershipFunction) -> Result<impl Iterator<Item = f64> + '_> {
    let maximum = set.max_membership();

    if maximum == 0. {
        return Err(FuzzyError::EmptySet);
    }

    Ok(set.points().filter(move |&(_, m)| m == maximum).map(|(x, _)| x))
}

pub fn mean_of_maximum(set: &MembershipFunction) -> Result<f64> {
    let (len, sum) = maxima(set)?.fold((0usize, 0.), |(len, sum), x| (len + 1, sum + x));

    Ok(sum / len as f64)
}

pub fn min_of_maximum(set: &MembershipFunction) -> Result<f64> {
    maxima(set)?.next().ok_or(FuzzyError::EmptySet)
}

pub fn max_of_maximum(set: &MembershipFunction) -> Result<f64> {
    maxima(set)?.last().ok_or(FuzzyError::EmptySet)
}

#[cfg(test)]
fn set(values: Vec<f64>) -> MembershipFunction {
    use crate::universe::Universe;

    let universe = Universe::arange(0., values.len() as f64, 1.).unwrap();

    MembershipFunction::new(universe, values).unwrap()
}

#[test]
fn test_centroid_symmetric() {
    let s = set(vec![0., 0.25, 0.5, 1., 0.5, 0.25, 0.]);

    assert_eq!(centroid(&s), Ok(3.));

    use crate::universe::Universe;
    let u = Universe::arange(0., 101., 1.).unwrap();
    let tri = MembershipFunction::triangular(&u, 20., 50., 80.).unwrap();

    assert!((centroid(&tri).unwrap() - 50.).abs() < 1e-9);
}

#[test]
fn test_bisector() {
    // Total 2.0, half is reached exactly at index 1
    let s = set(vec![0.5, 0.5, 0., 0.5, 0.5]);

    assert_eq!(bisector(&s), Ok(1.));

    let s = set(vec![0., 0., 1., 0., 0.]);

    assert_eq!(bisector(&s), Ok(2.));

    let s = set(vec![1., 1., 1., 1.]);

    assert_eq!(bisector(&s), Ok(1.));
}

#[test]
fn test_maxima() {
    let s = set(vec![0., 0.5, 1., 1., 0.2, 1., 0.]);

    assert_eq!(min_of_maximum(&s), Ok(2.));
    assert_eq!(max_of_maximum(&s), Ok(5.));
    assert_eq!(mean_of_maximum(&s), Ok(10. / 3.));
}

#[test]
fn test_single_maximum_coincides() {
    let s = set(vec![0., 0.3, 0.8, 0.3, 0.]);
    let result = defuzzify_all(&s).unwrap();

    assert_eq!(result.min_of_maximum, 2.);
    assert_eq!(result.mean_of_maximum, 2.);
    assert_eq!(result.max_of_maximum, 2.);
}

#[test]
fn test_shouldered_trapezoid() {
    use crate::universe::Universe;

    let u = Universe::arange(0., 101., 1.).unwrap();
    let hi = MembershipFunction::trapezoidal(&u, 60., 85., 100., 100.).unwrap();
    let result = defuzzify_all(&hi).unwrap();

    assert!((result.centroid - 85.57142857142857).abs() < 1e-9);
    assert_eq!(result.bisector, 86.);
    assert_eq!(result.mean_of_maximum, 92.5);
    assert_eq!(result.min_of_maximum, 85.);
    assert_eq!(result.max_of_maximum, 100.);
}

#[test]
fn test_empty_set() {
    let s = set(vec![0.; 5]);

    for op in DefuzzificationOp::ALL {
        assert_eq!(op.call(&s), Err(FuzzyError::EmptySet), "{op}");
    }
    assert_eq!(defuzzify_all(&s), Err(FuzzyError::EmptySet));
}

#[test]
fn test_op_dispatch() {
    let s = set(vec![0., 0.5, 1., 1., 0.]);
    let result = defuzzify_all(&s).unwrap();

    for op in DefuzzificationOp::ALL {
        assert_eq!(op.call(&s), Ok(result.get(op)));
        assert_eq!(op.as_str().parse::<DefuzzificationOp>(), Ok(op));
    }
    assert_eq!("MOM".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Mom));
    assert!("cog".parse::<DefuzzificationOp>().is_err());
}
