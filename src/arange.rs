/// Half-open range of evenly spaced samples, `[start, stop)`.
pub(crate) struct Arange {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Arange {
    /// Callers validate `step > 0` and `start < stop` beforehand.
    pub(crate) fn new(start: f64, stop: f64, step: f64) -> Self {
        // Same length rule as numpy.arange: ceil((stop - start) / step)
        let len = ((stop - start) / step).ceil();
        let len = if len.is_finite() && len > 0. { len as usize } else { 0 };

        Arange {
            start,
            step,
            index: 0,
            len,
        }
    }
}

impl Iterator for Arange {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            // Multiply rather than accumulate so error doesn't build up along the grid
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Arange {}

#[test]
fn test_arange_excludes_stop() {
    let xs: Vec<_> = Arange::new(0., 5., 1.).collect();

    assert_eq!(xs, vec![0., 1., 2., 3., 4.]);

    let xs: Vec<_> = Arange::new(1990., 2020., 1.).collect();

    assert_eq!(xs.len(), 30);
    assert_eq!(xs.first(), Some(&1990.));
    assert_eq!(xs.last(), Some(&2019.));
}

#[test]
fn test_arange_partial_last_step() {
    let xs: Vec<_> = Arange::new(0., 1., 0.3).collect();

    assert_eq!(xs.len(), 4);
    assert!((xs[3] - 0.9).abs() < 1e-12);
}
