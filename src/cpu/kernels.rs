//! Lane-level helpers shared by the CPU transforms
use bytemuck::cast_slice_mut;
use num_complex::Complex64;
use num_traits::Zero;

use super::error::{EngineError, Result};
use crate::options::Normalization;

/// Parses the engine-level normalization string; `None` means backward
pub(crate) fn parse_norm(norm: Option<&str>) -> Result<Normalization> {
    match norm {
        None => Ok(Normalization::Backward),
        Some(mode) => mode
            .parse()
            .map_err(|_| EngineError::InvalidNorm(mode.to_owned())),
    }
}

/// Factor applied to the output of a transform of logical length `len`
pub(crate) fn scale_factor(norm: Normalization, len: usize, forward: bool) -> f64 {
    match (norm, forward) {
        (Normalization::Backward, true) | (Normalization::Forward, false) => 1.0,
        (Normalization::Backward, false) | (Normalization::Forward, true) => 1.0 / len as f64,
        (Normalization::Ortho, _) => 1.0 / (len as f64).sqrt(),
    }
}

#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
/// Multiplies every component of `values` by `factor`
pub(crate) fn scale_reals(values: &mut [f64], factor: f64) {
    values.iter_mut().for_each(|x| *x *= factor);
}

/// Scales complex values in place by viewing them as interleaved `f64` pairs
pub(crate) fn scale_complex(values: &mut [Complex64], factor: f64) {
    if factor != 1.0 {
        scale_reals(cast_slice_mut(values), factor);
    }
}

/// Copies `lane` into `out`, truncating or zero-padding to `out.len()`
pub(crate) fn resize_into<T: Copy + Zero>(lane: &[T], out: &mut [T]) {
    let keep = lane.len().min(out.len());
    out[..keep].copy_from_slice(&lane[..keep]);
    out[keep..].iter_mut().for_each(|x| *x = T::zero());
}

/// Rebuilds the full `out.len()`-point spectrum of a real signal from its leading
/// non-negative frequency bins, filling the rest with `X[n - k] = conj(X[k])`.
///
/// Missing bins are taken as zero and bins past `out.len() / 2` are ignored.
pub(crate) fn expand_hermitian(one_sided: &[Complex64], out: &mut [Complex64]) {
    let n = out.len();
    let half = n / 2 + 1;
    resize_into(&one_sided[..one_sided.len().min(half)], &mut out[..half.min(n)]);
    for k in half..n {
        out[k] = out[n - k].conj();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_norm_is_backward() {
        assert_eq!(parse_norm(None), Ok(Normalization::Backward));
        assert_eq!(parse_norm(Some("ortho")), Ok(Normalization::Ortho));
        assert_eq!(
            parse_norm(Some("sideways")),
            Err(EngineError::InvalidNorm("sideways".to_owned()))
        );
    }

    #[test]
    fn factors_split_between_directions() {
        assert_eq!(scale_factor(Normalization::Backward, 4, true), 1.0);
        assert_eq!(scale_factor(Normalization::Backward, 4, false), 0.25);
        assert_eq!(scale_factor(Normalization::Forward, 4, true), 0.25);
        assert_eq!(scale_factor(Normalization::Forward, 4, false), 1.0);
        assert_eq!(scale_factor(Normalization::Ortho, 4, true), 0.5);
        assert_eq!(scale_factor(Normalization::Ortho, 4, false), 0.5);
    }

    #[test]
    fn complex_scaling_touches_both_components() {
        let mut values = vec![Complex64::new(2.0, -4.0), Complex64::new(1.0, 3.0)];
        scale_complex(&mut values, 0.5);
        assert_eq!(
            values,
            vec![Complex64::new(1.0, -2.0), Complex64::new(0.5, 1.5)]
        );
    }

    #[test]
    fn resize_truncates_and_pads() {
        let mut short = [0.0; 2];
        resize_into(&[1.0, 2.0, 3.0], &mut short);
        assert_eq!(short, [1.0, 2.0]);

        let mut long = [9.0; 5];
        resize_into(&[1.0, 2.0, 3.0], &mut long);
        assert_eq!(long, [1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn hermitian_expansion_mirrors_conjugates() {
        let one_sided = [
            Complex64::new(10.0, 0.0),
            Complex64::new(1.0, 2.0),
            Complex64::new(3.0, -1.0),
        ];

        let mut even = [Complex64::zero(); 4];
        expand_hermitian(&one_sided, &mut even);
        assert_eq!(
            even,
            [
                Complex64::new(10.0, 0.0),
                Complex64::new(1.0, 2.0),
                Complex64::new(3.0, -1.0),
                Complex64::new(1.0, -2.0),
            ]
        );

        let mut odd = [Complex64::zero(); 5];
        expand_hermitian(&one_sided, &mut odd);
        assert_eq!(odd[3], Complex64::new(3.0, 1.0));
        assert_eq!(odd[4], Complex64::new(1.0, -2.0));

        let mut padded = [Complex64::new(7.0, 7.0); 8];
        expand_hermitian(&one_sided, &mut padded);
        assert_eq!(padded[3], Complex64::zero());
        assert_eq!(padded[4], Complex64::zero());
        assert_eq!(padded[7], Complex64::new(1.0, -2.0));
    }
}
