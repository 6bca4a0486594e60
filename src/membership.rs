use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::universe::Universe;

/// Breakpoints of a piecewise-linear membership shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Shape {
    /// Zero at `a`, one at `b`, zero again at `c`
    Triangular { a: f64, b: f64, c: f64 },
    /// Zero at `a`, one on `[b, c]`, zero again at `d`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl Shape {
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Self::Triangular { a, b, c }
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::Trapezoidal { a, b, c, d }
    }

    /// Checks the breakpoints are finite and non-decreasing.
    pub fn validate(&self) -> Result<()> {
        let points = match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        };

        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidShape(format!("breakpoint {p} is not finite")));
        }
        if points.windows(2).any(|w| w[0] > w[1]) {
            return Err(FuzzyError::InvalidShape(format!(
                "breakpoints must be non-decreasing, got {points:?}"
            )));
        }

        Ok(())
    }

    /// Membership degree of a single crisp value. Assumes a validated shape.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                if x == b {
                    1.
                } else if x <= a || x >= c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if b <= x && x <= c {
                    1.
                } else if x <= a || x >= d {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            },
        }
    }

    /// Evaluates the shape at every sample of `universe`.
    pub fn sample(&self, universe: &Universe) -> Result<MembershipFunction> {
        self.validate()?;

        let values = universe.iter().map(|&x| self.eval(x)).collect();

        Ok(MembershipFunction {
            universe: universe.clone(),
            values,
        })
    }
}

/// A fuzzy set sampled over a [`Universe`]: one degree in `[0, 1]` per sample,
/// index-aligned with the universe.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipFunction {
    universe: Universe,
    values: Vec<f64>,
}

impl MembershipFunction {
    pub fn new(universe: Universe, values: Vec<f64>) -> Result<Self> {
        if values.len() != universe.len() {
            return Err(FuzzyError::UniverseMismatch {
                expected: universe.len(),
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0. ..=1.).contains(*v))
        {
            return Err(FuzzyError::MembershipOutOfRange { index, value });
        }

        Ok(Self { universe, values })
    }

    /// The empty fuzzy set: zero everywhere.
    pub fn zeros(universe: &Universe) -> Self {
        Self {
            universe: universe.clone(),
            values: vec![0.; universe.len()],
        }
    }

    pub fn triangular(universe: &Universe, a: f64, b: f64, c: f64) -> Result<Self> {
        Shape::triangular(a, b, c).sample(universe)
    }

    pub fn trapezoidal(universe: &Universe, a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        Shape::trapezoidal(a, b, c, d).sample(universe)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(x, membership)` pairs, e.g. as an x/y series for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe.iter().copied().zip(self.values.iter().copied())
    }

    pub fn max_membership(&self) -> f64 {
        self.values.iter().copied().fold(0., f64::max)
    }

    pub fn is_empty_set(&self) -> bool {
        self.values.iter().all(|&v| v == 0.)
    }

    /// Interpolated membership of a crisp value, see [`membership_at`].
    pub fn at(&self, x: f64) -> f64 {
        interp(x, self.universe.samples(), &self.values)
    }

    /// Caps every sample at `strength`, which is first clamped into `[0, 1]`.
    /// A NaN strength fires nothing and yields the empty set.
    pub fn clip(&self, strength: f64) -> Self {
        let strength = if strength.is_nan() { 0. } else { strength.clamp(0., 1.) };

        Self {
            universe: self.universe.clone(),
            values: self.values.iter().map(|&v| f64::min(v, strength)).collect(),
        }
    }

    pub fn pointwise_max(&self, other: &Self) -> Result<Self> {
        self.check_same_universe(other)?;

        Ok(Self {
            universe: self.universe.clone(),
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&u, &v)| f64::max(u, v))
                .collect(),
        })
    }

    pub(crate) fn check_same_universe(&self, other: &Self) -> Result<()> {
        self.universe.check_same(&other.universe)
    }
}

/// Membership degree of `x` against `function` sampled over `universe`.
///
/// Zero outside `[universe.first(), universe.last()]`, the stored value when
/// `x` is exactly a sample, and linear interpolation between the bracketing
/// samples otherwise. Fails if `function` was sampled over another grid.
pub fn membership_at(universe: &Universe, function: &MembershipFunction, x: f64) -> Result<f64> {
    universe.check_same(function.universe())?;

    Ok(interp(x, universe.samples(), function.values()))
}

#[test]
fn test_triangular() {
    let u = Universe::arange(0., 101., 1.).unwrap();
    let mf = MembershipFunction::triangular(&u, 20., 50., 80.).unwrap();

    assert_eq!(mf.values()[20], 0.);
    assert_eq!(mf.values()[35], 0.5);
    assert_eq!(mf.values()[50], 1.);
    assert_eq!(mf.values()[65], 0.5);
    assert_eq!(mf.values()[80], 0.);
    assert_eq!(mf.values()[90], 0.);
}

#[test]
fn test_degenerate_triangular() {
    let u = Universe::arange(0., 11., 1.).unwrap();

    let left = MembershipFunction::triangular(&u, 0., 0., 10.).unwrap();
    assert_eq!(left.values()[0], 1.);
    assert_eq!(left.values()[5], 0.5);
    assert_eq!(left.values()[10], 0.);

    let right = MembershipFunction::triangular(&u, 0., 10., 10.).unwrap();
    assert_eq!(right.values()[0], 0.);
    assert_eq!(right.values()[10], 1.);

    let spike = MembershipFunction::triangular(&u, 4., 4., 4.).unwrap();
    assert_eq!(spike.values()[3], 0.);
    assert_eq!(spike.values()[4], 1.);
    assert_eq!(spike.values()[5], 0.);
    assert!(spike.values().iter().all(|v| v.is_finite()));
}

#[test]
fn test_trapezoidal() {
    let u = Universe::arange(0., 101., 1.).unwrap();
    let mf = MembershipFunction::trapezoidal(&u, 60., 85., 100., 100.).unwrap();

    assert_eq!(mf.values()[59], 0.);
    assert_eq!(mf.values()[60], 0.);
    assert_eq!(mf.values()[70], 0.4);
    assert!(mf.values()[85..=100].iter().all(|&v| v == 1.));

    let shoulder = MembershipFunction::trapezoidal(&u, 0., 0., 20., 40.).unwrap();
    assert_eq!(shoulder.values()[0], 1.);
    assert_eq!(shoulder.values()[30], 0.5);
    assert_eq!(shoulder.values()[40], 0.);
}

#[test]
fn test_invalid_shapes() {
    let u = Universe::arange(0., 10., 1.).unwrap();

    assert!(matches!(
        MembershipFunction::triangular(&u, 5., 2., 8.),
        Err(FuzzyError::InvalidShape(_))
    ));
    assert!(matches!(
        MembershipFunction::trapezoidal(&u, 0., 5., 4., 8.),
        Err(FuzzyError::InvalidShape(_))
    ));
    assert!(matches!(
        MembershipFunction::trapezoidal(&u, 0., 1., 2., f64::NAN),
        Err(FuzzyError::InvalidShape(_))
    ));
}

#[test]
fn test_new_validates() {
    let u = Universe::arange(0., 3., 1.).unwrap();

    assert!(MembershipFunction::new(u.clone(), vec![0., 0.5, 1.]).is_ok());
    assert_eq!(
        MembershipFunction::new(u.clone(), vec![0., 1.]),
        Err(FuzzyError::UniverseMismatch { expected: 3, actual: 2 })
    );
    assert_eq!(
        MembershipFunction::new(u.clone(), vec![0., 1.5, 1.]),
        Err(FuzzyError::MembershipOutOfRange { index: 1, value: 1.5 })
    );
    assert!(matches!(
        MembershipFunction::new(u, vec![0., f64::NAN, 1.]),
        Err(FuzzyError::MembershipOutOfRange { index: 1, .. })
    ));
}

#[test]
fn test_clip() {
    let u = Universe::arange(0., 5., 1.).unwrap();
    let mf = MembershipFunction::new(u, vec![0., 0.25, 1., 0.5, 0.]).unwrap();
    let clipped = mf.clip(0.4);

    assert_eq!(clipped.values(), &[0., 0.25, 0.4, 0.4, 0.]);
    assert_eq!(clipped.clip(0.4), clipped);
    assert_eq!(clipped.clip(0.9), clipped);
    // Receiver untouched
    assert_eq!(mf.values(), &[0., 0.25, 1., 0.5, 0.]);

    assert!(mf.clip(f64::NAN).is_empty_set());
    assert_eq!(mf.clip(1.5), mf);
    assert!(mf.clip(-0.5).is_empty_set());
}

#[test]
fn test_pointwise_max() {
    let u = Universe::arange(0., 4., 1.).unwrap();
    let a = MembershipFunction::new(u.clone(), vec![0., 0.2, 0.9, 0.]).unwrap();
    let b = MembershipFunction::new(u, vec![0.5, 0.1, 0.3, 0.]).unwrap();

    assert_eq!(a.pointwise_max(&b).unwrap().values(), &[0.5, 0.2, 0.9, 0.]);
    assert_eq!(a.pointwise_max(&b), b.pointwise_max(&a));

    let other = Universe::arange(0., 5., 1.).unwrap();
    let c = MembershipFunction::zeros(&other);

    assert_eq!(
        a.pointwise_max(&c),
        Err(FuzzyError::UniverseMismatch { expected: 4, actual: 5 })
    );

    let shifted = Universe::arange(1., 5., 1.).unwrap();
    let d = MembershipFunction::zeros(&shifted);

    assert_eq!(
        a.pointwise_max(&d),
        Err(FuzzyError::GridMismatch {
            index: 0,
            expected: 0.,
            actual: 1.
        })
    );
}

#[test]
fn test_membership_at() {
    let year = Universe::arange(1990., 2020., 1.).unwrap();
    let hi = MembershipFunction::trapezoidal(&year, 2010., 2015., 2020., 2020.).unwrap();

    assert_eq!(membership_at(&year, &hi, 2016.), Ok(1.));
    assert!((membership_at(&year, &hi, 2012.5).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(membership_at(&year, &hi, 2019.), Ok(1.));
    // Past the last sample even though the shape is still 1 there
    assert_eq!(membership_at(&year, &hi, 2019.5), Ok(0.));
    assert_eq!(membership_at(&year, &hi, 1989.), Ok(0.));
    assert_eq!(hi.at(2016.), 1.);
}

#[test]
fn test_membership_at_other_grid() {
    let small = Universe::arange(0., 3., 1.).unwrap();
    let tri = MembershipFunction::triangular(&small, 0., 1., 2.).unwrap();

    assert_eq!(
        membership_at(&Universe::arange(0., 10., 1.).unwrap(), &tri, 7.5),
        Err(FuzzyError::UniverseMismatch { expected: 10, actual: 3 })
    );
    assert_eq!(
        membership_at(&Universe::arange(100., 103., 1.).unwrap(), &tri, 101.),
        Err(FuzzyError::GridMismatch {
            index: 0,
            expected: 100.,
            actual: 0.
        })
    );
    // An equal grid built separately is accepted
    assert_eq!(membership_at(&Universe::arange(0., 3., 1.).unwrap(), &tri, 1.), Ok(1.));
}

#[test]
fn test_points() {
    let u = Universe::arange(0., 3., 1.).unwrap();
    let mf = MembershipFunction::triangular(&u, 0., 1., 2.).unwrap();
    let points: Vec<_> = mf.points().collect();

    assert_eq!(points, vec![(0., 0.), (1., 1.), (2., 0.)]);
    assert_eq!(mf.max_membership(), 1.);
    assert!(!mf.is_empty_set());
    assert!(MembershipFunction::zeros(&u).is_empty_set());
}
