use num::Float;

/// Similar to numpy.interp for a single point, except values outside
/// `[xp[0], xp[n - 1]]` map to zero rather than being clamped to the edges.
///
/// `xp` must be strictly increasing and the same length as `fp`.
pub(crate) fn interp<F: Float>(x: F, xp: &[F], fp: &[F]) -> F {
    debug_assert_eq!(xp.len(), fp.len());

    let (Some(&first), Some(&last)) = (xp.first(), xp.last()) else {
        return F::zero();
    };

    // NaN fails both comparisons and lands here too
    if !(first <= x && x <= last) {
        return F::zero();
    }

    // First sample >= x; always in bounds since x <= last
    let i = xp.partition_point(|&s| s < x);

    // Exact hits return the stored value untouched
    if xp[i] == x {
        return fp[i];
    }

    let (x1, x2) = (xp[i - 1], xp[i]);
    let (y1, y2) = (fp[i - 1], fp[i]);

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    assert_eq!(interp(0., &xs, &ys), 0.);
    assert_eq!(interp(1., &xs, &ys), 3.);
    assert_eq!(interp(1.5, &xs, &ys), 2.5);
    assert_eq!(interp(2.72, &xs, &ys), 0.5599999999999996);
    assert_eq!(interp(3., &xs, &ys), 0.);
    assert_eq!(interp(3.24, &xs, &ys), 0.);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(2.5, &xs, &ys), 4.);
    assert_eq!(interp(-1., &xs, &ys), 0.);
    assert_eq!(interp(4.5, &xs, &ys), 2.);
    assert_eq!(interp(7.5, &xs, &ys), 0.);
    assert_eq!(interp(f64::NAN, &xs, &ys), 0.);
}

#[test]
fn test_interp_f32() {
    let xs = [0f32, 10.];
    let ys = [0f32, 1.];

    assert_eq!(interp(5f32, &xs, &ys), 0.5);
}
