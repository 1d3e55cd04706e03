//! Reference engine running the transforms on the CPU with [`rustfft`].
//!
//! Tensors are owned, contiguous, row-major arrays of `f64` or `Complex64`. Argument handling
//! follows the usual tensor-library conventions:
//!
//! - `dim` may be negative and counts from the last axis
//! - an explicit `n` must be at least 1 and at most [`MAX_TRANSFORM_LEN`]; lanes along `dim`
//!   are zero-padded or truncated to it
//! - `norm` is one of `"backward"` (default), `"forward"` or `"ortho"`
//! - `irfft` and `hfft` default to `n = 2 * (m - 1)` for an input of `m` bins
use log::trace;
use num_traits::Zero;

use crate::engine::{FftEngine, TransformKind};
use crate::options::Normalization;

use self::kernels::{expand_hermitian, parse_norm, resize_into, scale_complex, scale_factor};
use self::planner::{Direction, PlanCache};
use self::tensor::{checked_numel, map_lanes, wrap_dim, zeroed};

pub use num_complex::Complex64;

pub use self::error::{EngineError, Result};
pub use self::tensor::{Tensor, TensorData};

mod error;
mod kernels;
mod planner;
mod tensor;

/// Longest transform the engine will plan.
///
/// Lengths are checked before any plan or buffer is built, so an absurd `n` is an error rather
/// than an allocation failure.
pub const MAX_TRANSFORM_LEN: usize = 1 << 30;

/// CPU implementation of [`FftEngine`].
///
/// The engine is `Send + Sync`; plans are cached internally and shared between threads.
#[derive(Default)]
pub struct CpuEngine {
    plans: PlanCache,
}

/// Arguments of one call, validated and resolved against the input tensor
struct Resolved {
    axis: usize,
    len: usize,
    norm: Normalization,
}

impl CpuEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct `(length, direction)` plans built so far
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    /// Validates `dim`, `n` and `norm`; `default_len` maps the input size along `dim` to the
    /// length used when `n` is absent.
    fn resolve(
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
        default_len: impl FnOnce(usize) -> usize,
    ) -> Result<Resolved> {
        let axis = wrap_dim(dim, input.ndim())?;
        let len = match n {
            Some(requested) if requested < 1 => {
                return Err(EngineError::InvalidLength { n: requested })
            }
            Some(requested) => usize::try_from(requested).map_err(|_| {
                EngineError::LengthTooLarge {
                    n: requested,
                    max: MAX_TRANSFORM_LEN,
                }
            })?,
            None => default_len(input.shape()[axis]),
        };
        if len == 0 {
            return Err(EngineError::InvalidLength { n: 0 });
        }
        if len > MAX_TRANSFORM_LEN {
            return Err(EngineError::LengthTooLarge {
                n: i64::try_from(len).unwrap_or(i64::MAX),
                max: MAX_TRANSFORM_LEN,
            });
        }
        // Every output is at most `len` complex elements per lane
        if checked_numel(input.shape(), axis, len).is_none() {
            return Err(EngineError::OutputTooLarge {
                shape: Self::output_shape(input, axis, len),
            });
        }
        let norm = parse_norm(norm)?;
        Ok(Resolved { axis, len, norm })
    }

    fn output_shape(input: &Tensor, axis: usize, len: usize) -> Vec<usize> {
        let mut shape = input.shape().to_vec();
        shape[axis] = len;
        shape
    }

    fn require_real<'t>(kind: TransformKind, input: &'t Tensor) -> Result<&'t [f64]> {
        input.as_real().ok_or(EngineError::DtypeMismatch {
            operation: kind.name(),
            expected: "real",
            got: input.data().dtype_name(),
        })
    }

    fn log_transform(kind: TransformKind, input: &Tensor, resolved: &Resolved) {
        trace!(
            "{kind}: shape={:?} axis={} len={} norm={}",
            input.shape(),
            resolved.axis,
            resolved.len,
            resolved.norm
        );
    }

    /// Complex-to-complex transform of every lane, used by `fft` and `ifft`
    fn c2c(
        &self,
        kind: TransformKind,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        let resolved = Self::resolve(input, n, dim, norm, |size| size)?;
        Self::log_transform(kind, input, &resolved);
        let Resolved { axis, len, norm } = resolved;

        let direction = if kind.is_forward() {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        let plan = self.plans.plan(len, direction);
        let factor = scale_factor(norm, len, kind.is_forward());

        let data = input.to_complex();
        let output = map_lanes(&data, input.shape(), axis, len, |lane, out: &mut [Complex64]| {
            resize_into(lane, out);
            plan.process(out);
            scale_complex(out, factor);
        })?;

        Tensor::from_complex(Self::output_shape(input, axis, len), output)
    }

    /// Real-to-one-sided transform of every lane, used by `rfft` and `ihfft`
    fn r2c(
        &self,
        kind: TransformKind,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        let data = Self::require_real(kind, input)?;
        let resolved = Self::resolve(input, n, dim, norm, |size| size)?;
        Self::log_transform(kind, input, &resolved);
        let Resolved { axis, len, norm } = resolved;

        let bins = len / 2 + 1;
        let plan = self.plans.plan(len, Direction::Forward);
        let factor = scale_factor(norm, len, kind.is_forward());
        let conjugate = !kind.is_forward();

        let mut buffer: Vec<Complex64> = zeroed(len)?;
        let output = map_lanes(data, input.shape(), axis, bins, |lane, out: &mut [Complex64]| {
            let keep = lane.len().min(len);
            for (z, &re) in buffer.iter_mut().zip(&lane[..keep]) {
                *z = Complex64::new(re, 0.0);
            }
            buffer[keep..].iter_mut().for_each(|z| *z = Complex64::zero());

            plan.process(&mut buffer);

            out.copy_from_slice(&buffer[..bins]);
            if conjugate {
                out.iter_mut().for_each(|z| *z = z.conj());
            }
            scale_complex(out, factor);
        })?;

        Tensor::from_complex(Self::output_shape(input, axis, bins), output)
    }

    /// One-sided-to-real transform of every lane, used by `irfft` and `hfft`
    fn c2r(
        &self,
        kind: TransformKind,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        let resolved = Self::resolve(input, n, dim, norm, |bins| 2 * bins.saturating_sub(1))?;
        Self::log_transform(kind, input, &resolved);
        let Resolved { axis, len, norm } = resolved;

        // hfft(x) is the unscaled inverse transform of conj(x) read as a forward transform
        let conjugate = kind.is_forward();
        let plan = self.plans.plan(len, Direction::Reverse);
        let factor = scale_factor(norm, len, kind.is_forward());

        let data = input.to_complex();
        let mut buffer: Vec<Complex64> = zeroed(len)?;
        let output = map_lanes(&data, input.shape(), axis, len, |lane, out: &mut [f64]| {
            expand_hermitian(lane, &mut buffer);
            if conjugate {
                buffer.iter_mut().for_each(|z| *z = z.conj());
            }

            plan.process(&mut buffer);

            for (x, z) in out.iter_mut().zip(&buffer) {
                *x = z.re * factor;
            }
        })?;

        Tensor::from_real(Self::output_shape(input, axis, len), output)
    }
}

impl FftEngine for CpuEngine {
    type Tensor = Tensor;
    type Error = EngineError;

    fn fft_fft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.c2c(TransformKind::Fft, input, n, dim, norm)
    }

    fn fft_ifft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.c2c(TransformKind::Ifft, input, n, dim, norm)
    }

    fn fft_rfft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.r2c(TransformKind::Rfft, input, n, dim, norm)
    }

    fn fft_irfft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.c2r(TransformKind::Irfft, input, n, dim, norm)
    }

    fn fft_hfft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.c2r(TransformKind::Hfft, input, n, dim, norm)
    }

    fn fft_ihfft(
        &self,
        input: &Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Tensor> {
        self.r2c(TransformKind::Ihfft, input, n, dim, norm)
    }
}
