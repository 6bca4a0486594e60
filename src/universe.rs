use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::arange::Arange;
use crate::error::{FuzzyError, Result};

/// The discretized domain of one variable: a strictly increasing sequence of
/// at least two finite samples.
///
/// Samples are shared behind an `Arc`, so every membership function built over
/// a universe holds a cheap handle to the same grid.
#[derive(Clone, Debug)]
pub struct Universe(Arc<[f64]>);

impl Universe {
    /// Evenly spaced samples over the half-open range `[start, stop)`.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(FuzzyError::InvalidRange(format!(
                "bounds must be finite (start={start}, stop={stop}, step={step})"
            )));
        }
        if step <= 0. {
            return Err(FuzzyError::InvalidRange(format!("step must be positive, got {step}")));
        }
        if start >= stop {
            return Err(FuzzyError::InvalidRange(format!(
                "start ({start}) must be less than stop ({stop})"
            )));
        }

        Self::from_samples(Arange::new(start, stop, step).collect())
    }

    /// Arbitrarily spaced samples.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(FuzzyError::InvalidRange(format!(
                "a universe needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if let Some(x) = samples.iter().find(|x| !x.is_finite()) {
            return Err(FuzzyError::InvalidRange(format!("sample {x} is not finite")));
        }
        if let Some(i) = samples.windows(2).position(|w| w[0] >= w[1]) {
            return Err(FuzzyError::InvalidRange(format!(
                "samples must be strictly increasing ({} at index {i} is followed by {})",
                samples[i],
                samples[i + 1]
            )));
        }

        Ok(Universe(samples.into()))
    }

    pub fn samples(&self) -> &[f64] {
        &self.0
    }

    pub fn first(&self) -> f64 {
        self.0[0]
    }

    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Halfway between the first and last sample.
    pub fn midpoint(&self) -> f64 {
        (self.first() + self.last()) / 2.
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }

    /// Same grid, either the same allocation or equal sample-by-sample.
    pub fn same_as(&self, other: &Universe) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }

    /// Fails unless `other` is the same grid, naming the first difference.
    pub fn check_same(&self, other: &Universe) -> Result<()> {
        if self.same_as(other) {
            return Ok(());
        }
        if self.len() != other.len() {
            return Err(FuzzyError::UniverseMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let (index, (&expected, &actual)) = self
            .iter()
            .zip(other.iter())
            .enumerate()
            .find(|(_, (a, b))| a != b)
            .unwrap_or((0, (&self.0[0], &other.0[0])));

        Err(FuzzyError::GridMismatch { index, expected, actual })
    }
}

impl Deref for Universe {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

/// Serializable `arange` parameters for a universe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniverseRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl UniverseRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    pub fn build(&self) -> Result<Universe> {
        Universe::arange(self.start, self.stop, self.step)
    }
}

#[test]
fn test_arange_universe() {
    let u = Universe::arange(0., 101., 1.).unwrap();

    assert_eq!(u.len(), 101);
    assert_eq!(u.first(), 0.);
    assert_eq!(u.last(), 100.);
    assert_eq!(u.midpoint(), 50.);
    assert_eq!(u.mean(), 50.);
}

#[test]
fn test_invalid_ranges() {
    assert!(matches!(Universe::arange(0., 10., 0.), Err(FuzzyError::InvalidRange(_))));
    assert!(matches!(Universe::arange(0., 10., -1.), Err(FuzzyError::InvalidRange(_))));
    assert!(matches!(Universe::arange(10., 10., 1.), Err(FuzzyError::InvalidRange(_))));
    assert!(matches!(Universe::arange(10., 0., 1.), Err(FuzzyError::InvalidRange(_))));
    assert!(matches!(Universe::arange(0., f64::NAN, 1.), Err(FuzzyError::InvalidRange(_))));
    // Only one sample fits
    assert!(matches!(Universe::arange(0., 1., 1.), Err(FuzzyError::InvalidRange(_))));
}

#[test]
fn test_from_samples() {
    let u = Universe::from_samples(vec![0., 0.5, 2., 10.]).unwrap();

    assert_eq!(u.samples(), &[0., 0.5, 2., 10.]);

    assert!(Universe::from_samples(vec![0., 1., 1.]).is_err());
    assert!(Universe::from_samples(vec![0., 2., 1.]).is_err());
    assert!(Universe::from_samples(vec![0.]).is_err());
    assert!(Universe::from_samples(vec![0., f64::INFINITY]).is_err());
}

#[test]
fn test_universe_equality() {
    let a = Universe::arange(0., 10., 1.).unwrap();
    let b = Universe::arange(0., 10., 1.).unwrap();
    let c = Universe::arange(0., 11., 1.).unwrap();

    assert_eq!(a, a.clone());
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_check_same() {
    let u = Universe::arange(0., 5., 1.).unwrap();

    assert_eq!(u.check_same(&u.clone()), Ok(()));
    assert_eq!(u.check_same(&Universe::arange(0., 5., 1.).unwrap()), Ok(()));
    assert_eq!(
        u.check_same(&Universe::arange(0., 6., 1.).unwrap()),
        Err(FuzzyError::UniverseMismatch { expected: 5, actual: 6 })
    );
    assert_eq!(
        u.check_same(&Universe::from_samples(vec![0., 1., 2.5, 3., 4.]).unwrap()),
        Err(FuzzyError::GridMismatch {
            index: 2,
            expected: 2.,
            actual: 2.5
        })
    );
}
