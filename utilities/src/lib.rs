use std::f64::consts::PI;

use num_complex::Complex64;
use num_traits::{Float, Zero};
use rand::{distributions::Uniform, prelude::*};

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Element-wise closeness of two real signals.
///
/// # Panics
///
/// Panics if the lengths differ or any pair of samples is further apart than `epsilon`
#[track_caller]
pub fn assert_reals_closeness(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "signal lengths differ");
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_float_closeness(*a, *e, epsilon);
    }
}

/// Element-wise closeness of two complex signals, checked per component.
///
/// # Panics
///
/// Panics if the lengths differ or any component is further apart than `epsilon`
#[track_caller]
pub fn assert_complex_closeness(actual: &[Complex64], expected: &[Complex64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "signal lengths differ");
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_float_closeness(a.re, e.re, epsilon);
        assert_float_closeness(a.im, e.im, epsilon);
    }
}

/// Generate a random real signal of `len` samples in `[-1, 1)`
pub fn gen_random_real_signal(len: usize) -> Vec<f64> {
    let mut rng = thread_rng();
    let uniform_dist = Uniform::new(-1.0, 1.0);
    (0..len).map(|_| uniform_dist.sample(&mut rng)).collect()
}

/// Generate a random complex signal of `len` samples, both components in `[-1, 1)`
pub fn gen_random_complex_signal(len: usize) -> Vec<Complex64> {
    let mut rng = thread_rng();
    let uniform_dist = Uniform::new(-1.0, 1.0);
    (0..len)
        .map(|_| Complex64::new(uniform_dist.sample(&mut rng), uniform_dist.sample(&mut rng)))
        .collect()
}

/// Slow but obviously correct unscaled DFT, to be used as a reference in tests.
///
/// `inverse` flips the sign of the exponent; no `1/n` factor is applied.
pub fn naive_dft(input: &[Complex64], inverse: bool) -> Vec<Complex64> {
    let n = input.len();
    let sign = if inverse { 1.0 } else { -1.0 };

    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .fold(Complex64::zero(), |acc, (t, &value)| {
                    let angle = sign * 2.0 * PI * (k * t) as f64 / n as f64;
                    acc + value * Complex64::new(angle.cos(), angle.sin())
                })
        })
        .collect()
}
