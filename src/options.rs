//! Per-call parameters shared by every transform entry point.
use std::fmt;
use std::str::FromStr;

/// The optional parameters of a transform call.
///
/// Calling a transform with `FftOptions::default()` leaves every decision to the engine:
/// the length is inferred from the input, the transform runs over the last axis and the
/// engine's default normalization is applied.
///
/// ```
/// use tensor_fft::{FftOptions, Normalization};
///
/// let options = FftOptions::new().n(128).dim(0).norm(Normalization::Ortho);
/// assert_eq!(options.n, Some(128));
/// assert_eq!(options.dim, 0);
/// assert_eq!(options.norm_str(), Some("ortho"));
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FftOptions {
    /// Logical length of the transformed axis; `None` lets the engine infer it.
    ///
    /// Signed on purpose: a non-positive request is the engine's to reject.
    pub n: Option<i64>,
    /// Axis to transform. Negative values count from the end, `-1` is the last axis.
    pub dim: i64,
    /// Normalization mode understood by the engine; `None` selects the engine default.
    pub norm: Option<String>,
}

impl Default for FftOptions {
    fn default() -> Self {
        Self {
            n: None,
            dim: -1,
            norm: None,
        }
    }
}

impl FftOptions {
    /// Same as [`FftOptions::default`]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn n(mut self, n: i64) -> Self {
        self.n = Some(n);
        self
    }

    #[must_use]
    pub fn dim(mut self, dim: i64) -> Self {
        self.dim = dim;
        self
    }

    /// Accepts either a raw mode string or a [`Normalization`].
    /// The value is not checked here.
    #[must_use]
    pub fn norm(mut self, norm: impl AsRef<str>) -> Self {
        self.norm = Some(norm.as_ref().to_owned());
        self
    }

    /// The normalization mode as handed to the engine
    pub fn norm_str(&self) -> Option<&str> {
        self.norm.as_deref()
    }
}

/// Normalization conventions recognized by common tensor engines.
///
/// With a transform of logical length `n`:
/// - `Backward` scales only the inverse transform by `1/n`
/// - `Forward` scales only the forward transform by `1/n`
/// - `Ortho` scales both directions by `1/sqrt(n)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Normalization {
    Forward,
    #[default]
    Backward,
    Ortho,
}

impl Normalization {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Ortho => "ortho",
        }
    }
}

impl AsRef<str> for Normalization {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`Normalization`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNormalization(pub String);

impl fmt::Display for UnknownNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown normalization mode \"{}\", expected one of \"forward\", \"backward\", \"ortho\"",
            self.0
        )
    }
}

impl std::error::Error for UnknownNormalization {}

impl FromStr for Normalization {
    type Err = UnknownNormalization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "ortho" => Ok(Self::Ortho),
            other => Err(UnknownNormalization(other.to_owned())),
        }
    }
}
