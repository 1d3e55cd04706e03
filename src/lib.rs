//! Named one-dimensional Fourier transforms over a pluggable tensor engine.
//!
//! The six entry points ([`fft`], [`ifft`], [`rfft`], [`irfft`], [`hfft`], [`ihfft`]) take a
//! tensor, an [`FftOptions`] bundle and an engine, and forward the call to the matching
//! [`FftEngine`] primitive. Nothing is validated or translated on the way: whatever the engine
//! returns, result or error, is what the caller gets.
//!
//! With the default `cpu` feature, [`cpu::CpuEngine`] provides a ready-to-use engine.
//!
//! ```
//! # #[cfg(feature = "cpu")]
//! # {
//! use tensor_fft::cpu::{CpuEngine, Tensor};
//! use tensor_fft::{irfft, rfft, FftOptions};
//!
//! let engine = CpuEngine::new();
//! let signal = Tensor::real_vector((0..128).map(f64::from).collect());
//!
//! let spectrum = rfft(&engine, &signal, FftOptions::default()).unwrap();
//! assert!(spectrum.is_complex());
//! assert_eq!(spectrum.shape(), &[65]);
//!
//! let restored = irfft(&engine, &spectrum, FftOptions::new().n(128)).unwrap();
//! assert_eq!(restored.shape(), &[128]);
//! # }
//! ```
use log::trace;

pub use crate::engine::{FftEngine, TransformKind};
pub use crate::options::{FftOptions, Normalization, UnknownNormalization};

pub mod engine;
pub mod options;

#[cfg(feature = "cpu")]
pub mod cpu;

fn log_dispatch(kind: TransformKind, options: &FftOptions) {
    trace!(
        "dispatching {kind}: n={:?} dim={} norm={:?}",
        options.n,
        options.dim,
        options.norm
    );
}

/// Computes the one-dimensional discrete Fourier transform over `options.dim`.
///
/// Real input is accepted by engines that promote it to complex.
pub fn fft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Fft, &options);
    engine.fft_fft(input, options.n, options.dim, options.norm_str())
}

/// Computes the one-dimensional inverse discrete Fourier transform over `options.dim`.
pub fn ifft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Ifft, &options);
    engine.fft_ifft(input, options.n, options.dim, options.norm_str())
}

/// Computes the FFT of real input with one-sided Hermitian output.
///
/// A signal of length `n` yields `n / 2 + 1` complex bins along `options.dim`.
pub fn rfft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Rfft, &options);
    engine.fft_rfft(input, options.n, options.dim, options.norm_str())
}

/// Computes the inverse of [`rfft`].
///
/// The input is a one-sided Hermitian Fourier domain signal and the output is real.
/// Pass the original signal length as `n`; odd lengths cannot be inferred from the
/// one-sided input.
pub fn irfft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Irfft, &options);
    engine.fft_irfft(input, options.n, options.dim, options.norm_str())
}

/// Computes the FFT of a one-sided Hermitian signal.
///
/// The input represents a Hermitian symmetric time domain signal, so its Fourier domain
/// representation is real-valued.
pub fn hfft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Hfft, &options);
    engine.fft_hfft(input, options.n, options.dim, options.norm_str())
}

/// Computes the inverse FFT of a real-valued Fourier domain signal.
///
/// The output is the one-sided representation of the Hermitian symmetric time domain signal.
pub fn ihfft<E: FftEngine>(
    engine: &E,
    input: &E::Tensor,
    options: FftOptions,
) -> Result<E::Tensor, E::Error> {
    log_dispatch(TransformKind::Ihfft, &options);
    engine.fft_ihfft(input, options.n, options.dim, options.norm_str())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        kind: TransformKind,
        input: u32,
        n: Option<i64>,
        dim: i64,
        norm: Option<String>,
    }

    /// Records every primitive call and answers with a canned tensor id,
    /// or with the configured failure.
    #[derive(Default)]
    struct RecordingEngine {
        calls: RefCell<Vec<Call>>,
        failure: Option<&'static str>,
    }

    impl RecordingEngine {
        fn failing(message: &'static str) -> Self {
            Self {
                calls: RefCell::default(),
                failure: Some(message),
            }
        }

        fn record(
            &self,
            kind: TransformKind,
            input: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.calls.borrow_mut().push(Call {
                kind,
                input: *input,
                n,
                dim,
                norm: norm.map(str::to_owned),
            });
            match self.failure {
                Some(message) => Err(message.to_owned()),
                None => Ok(1000 + self.calls.borrow().len() as u32),
            }
        }

        fn last_call(&self) -> Call {
            self.calls.borrow().last().cloned().unwrap()
        }
    }

    impl FftEngine for RecordingEngine {
        type Tensor = u32;
        type Error = String;

        fn fft_fft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Fft, x, n, dim, norm)
        }

        fn fft_ifft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Ifft, x, n, dim, norm)
        }

        fn fft_rfft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Rfft, x, n, dim, norm)
        }

        fn fft_irfft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Irfft, x, n, dim, norm)
        }

        fn fft_hfft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Hfft, x, n, dim, norm)
        }

        fn fft_ihfft(
            &self,
            x: &u32,
            n: Option<i64>,
            dim: i64,
            norm: Option<&str>,
        ) -> Result<u32, String> {
            self.record(TransformKind::Ihfft, x, n, dim, norm)
        }
    }

    type EntryPoint = fn(&RecordingEngine, &u32, FftOptions) -> Result<u32, String>;

    fn entry_points() -> [(TransformKind, EntryPoint); 6] {
        [
            (TransformKind::Fft, fft),
            (TransformKind::Ifft, ifft),
            (TransformKind::Rfft, rfft),
            (TransformKind::Irfft, irfft),
            (TransformKind::Hfft, hfft),
            (TransformKind::Ihfft, ihfft),
        ]
    }

    #[test]
    fn each_entry_point_reaches_its_own_primitive() {
        for (kind, entry_point) in entry_points() {
            let engine = RecordingEngine::default();
            let output = entry_point(&engine, &7, FftOptions::default()).unwrap();

            assert_eq!(output, 1001);
            assert_eq!(engine.calls.borrow().len(), 1);
            assert_eq!(engine.last_call().kind, kind);
            assert_eq!(engine.last_call().input, 7);
        }
    }

    #[test]
    fn defaults_are_forwarded_as_absent_and_last_axis() {
        for (kind, entry_point) in entry_points() {
            let engine = RecordingEngine::default();
            entry_point(&engine, &3, FftOptions::default()).unwrap();

            assert_eq!(
                engine.last_call(),
                Call {
                    kind,
                    input: 3,
                    n: None,
                    dim: -1,
                    norm: None,
                }
            );
        }
    }

    #[test]
    fn explicit_options_pass_through_unchanged() {
        for (kind, entry_point) in entry_points() {
            let engine = RecordingEngine::default();
            let options = FftOptions::new().n(128).dim(2).norm(Normalization::Ortho);
            entry_point(&engine, &5, options).unwrap();

            assert_eq!(
                engine.last_call(),
                Call {
                    kind,
                    input: 5,
                    n: Some(128),
                    dim: 2,
                    norm: Some("ortho".to_owned()),
                }
            );
        }
    }

    #[test]
    fn out_of_range_values_are_not_filtered() {
        let engine = RecordingEngine::default();
        let options = FftOptions::new().n(-4).dim(-9).norm("not-a-mode");
        rfft(&engine, &1, options).unwrap();

        let call = engine.last_call();
        assert_eq!(call.n, Some(-4));
        assert_eq!(call.dim, -9);
        assert_eq!(call.norm.as_deref(), Some("not-a-mode"));
    }

    #[test]
    fn engine_errors_are_returned_verbatim() {
        for (_, entry_point) in entry_points() {
            let engine = RecordingEngine::failing("dimension out of range");
            let error = entry_point(&engine, &1, FftOptions::new().dim(4)).unwrap_err();
            assert_eq!(error, "dimension out of range");
        }
    }

    #[test]
    fn engines_can_be_passed_by_reference() {
        let engine = RecordingEngine::default();
        let by_ref = &engine;
        hfft(&by_ref, &9, FftOptions::new().n(16)).unwrap();
        assert_eq!(engine.last_call().kind, TransformKind::Hfft);
        assert_eq!(engine.last_call().n, Some(16));
    }
}
