//! The boundary to the tensor computation engine.
//!
//! The transform entry points of this crate do no numerical work. They hand every call to an
//! [`FftEngine`], which owns tensor storage, validates arguments and runs the transform.
use std::fmt;

/// A tensor backend able to run the six one-dimensional Fourier transforms.
///
/// Every primitive receives the input tensor, the requested logical length `n` (if any),
/// the axis `dim` (negative values count from the end) and the normalization mode (if any),
/// exactly as the caller supplied them. Validating those arguments is the engine's job, and the
/// engine's error is what the caller sees.
///
/// Implementations must return a freshly allocated tensor and leave `input` untouched.
pub trait FftEngine {
    /// Handle to an n-dimensional array owned by the engine
    type Tensor;
    /// Failure reported by the engine for invalid arguments
    type Error;

    /// Forward complex-to-complex transform
    fn fft_fft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;

    /// Inverse complex-to-complex transform
    fn fft_ifft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;

    /// Forward transform of a real signal, keeping the `n / 2 + 1` non-redundant bins
    fn fft_rfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;

    /// Inverse of [`FftEngine::fft_rfft`], producing a real signal of length `n`
    fn fft_irfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;

    /// Forward transform of a one-sided Hermitian signal, producing a real spectrum
    fn fft_hfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;

    /// Inverse transform of a real spectrum, producing the one-sided Hermitian signal
    fn fft_ihfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error>;
}

impl<E: FftEngine + ?Sized> FftEngine for &E {
    type Tensor = E::Tensor;
    type Error = E::Error;

    fn fft_fft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_fft(input, n, dim, norm)
    }

    fn fft_ifft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_ifft(input, n, dim, norm)
    }

    fn fft_rfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_rfft(input, n, dim, norm)
    }

    fn fft_irfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_irfft(input, n, dim, norm)
    }

    fn fft_hfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_hfft(input, n, dim, norm)
    }

    fn fft_ihfft(
        &self,
        input: &Self::Tensor,
        n: Option<i64>,
        dim: i64,
        norm: Option<&str>,
    ) -> Result<Self::Tensor, Self::Error> {
        (**self).fft_ihfft(input, n, dim, norm)
    }
}

/// The six transforms, named after their entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Fft,
    Ifft,
    Rfft,
    Irfft,
    Hfft,
    Ihfft,
}

impl TransformKind {
    pub const ALL: [TransformKind; 6] = [
        Self::Fft,
        Self::Ifft,
        Self::Rfft,
        Self::Irfft,
        Self::Hfft,
        Self::Ihfft,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fft => "fft",
            Self::Ifft => "ifft",
            Self::Rfft => "rfft",
            Self::Irfft => "irfft",
            Self::Hfft => "hfft",
            Self::Ihfft => "ihfft",
        }
    }

    /// Whether the transform counts as forward for normalization purposes
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Fft | Self::Rfft | Self::Hfft)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
