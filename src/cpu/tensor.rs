use num_complex::Complex64;
use num_traits::Zero;

use super::error::{EngineError, Result};

/// Element storage of a [`Tensor`]
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    Real(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl TensorData {
    pub fn len(&self) -> usize {
        match self {
            Self::Real(data) => data.len(),
            Self::Complex(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn dtype_name(&self) -> &'static str {
        match self {
            Self::Real(_) => "real",
            Self::Complex(_) => "complex",
        }
    }
}

/// Owned, contiguous, row-major n-dimensional array of `f64` or `Complex64`
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: TensorData,
}

impl Tensor {
    /// Builds a real tensor.
    ///
    /// Fails with [`EngineError::ShapeMismatch`] if `data` does not hold exactly
    /// `shape.iter().product()` elements.
    pub fn from_real(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        Self::new(shape, TensorData::Real(data))
    }

    /// Builds a complex tensor, with the same checks as [`Tensor::from_real`]
    pub fn from_complex(shape: Vec<usize>, data: Vec<Complex64>) -> Result<Self> {
        Self::new(shape, TensorData::Complex(data))
    }

    pub fn new(shape: Vec<usize>, data: TensorData) -> Result<Self> {
        if shape.iter().product::<usize>() != data.len() {
            return Err(EngineError::ShapeMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional real tensor
    pub fn real_vector(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data: TensorData::Real(data),
        }
    }

    /// One-dimensional complex tensor
    pub fn complex_vector(data: Vec<Complex64>) -> Self {
        Self {
            shape: vec![data.len()],
            data: TensorData::Complex(data),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn is_complex(&self) -> bool {
        matches!(self.data, TensorData::Complex(_))
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match &self.data {
            TensorData::Real(data) => Some(data),
            TensorData::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[Complex64]> {
        match &self.data {
            TensorData::Complex(data) => Some(data),
            TensorData::Real(_) => None,
        }
    }

    /// Size along `dim`, where negative values count from the last axis
    pub fn size(&self, dim: i64) -> Result<usize> {
        Ok(self.shape[wrap_dim(dim, self.ndim())?])
    }

    /// Copy of the elements as complex numbers, promoting real data
    pub fn to_complex(&self) -> Vec<Complex64> {
        match &self.data {
            TensorData::Real(data) => data.iter().map(|&re| Complex64::new(re, 0.0)).collect(),
            TensorData::Complex(data) => data.clone(),
        }
    }

    /// Real components of the elements
    pub fn real_part(&self) -> Vec<f64> {
        match &self.data {
            TensorData::Real(data) => data.clone(),
            TensorData::Complex(data) => data.iter().map(|z| z.re).collect(),
        }
    }
}

/// Maps a possibly negative axis index into `[0, ndim)`
pub(crate) fn wrap_dim(dim: i64, ndim: usize) -> Result<usize> {
    let rank = ndim as i64;
    if ndim == 0 || dim < -rank || dim >= rank {
        return Err(EngineError::InvalidDim { dim, ndim });
    }
    let wrapped = if dim < 0 { dim + rank } else { dim };
    Ok(wrapped as usize)
}

/// Number of complex elements in `shape` once `shape[axis]` becomes `len`.
///
/// `None` if the count overflows or a `Complex64` buffer of that size could not be addressed.
pub(crate) fn checked_numel(shape: &[usize], axis: usize, len: usize) -> Option<usize> {
    let elements = shape
        .iter()
        .enumerate()
        .filter(|&(d, _)| d != axis)
        .try_fold(len, |acc, (_, &size)| acc.checked_mul(size))?;
    let bytes = elements.checked_mul(std::mem::size_of::<Complex64>())?;
    (bytes <= isize::MAX as usize).then_some(elements)
}

/// Zero-filled buffer of `len` elements, reporting allocation failure instead of aborting
pub(crate) fn zeroed<T: Copy + Zero>(len: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| EngineError::AllocationFailed { elements: len })?;
    buffer.resize(len, T::zero());
    Ok(buffer)
}

/// Applies `transform` to every one-dimensional lane of `data` along `axis`.
///
/// `transform` receives a lane of `shape[axis]` elements and must fill an output lane of
/// `out_len` elements. Returns the output elements laid out in the same row-major order, with
/// `shape[axis]` replaced by `out_len`.
pub(crate) fn map_lanes<I, O, F>(
    data: &[I],
    shape: &[usize],
    axis: usize,
    out_len: usize,
    mut transform: F,
) -> Result<Vec<O>>
where
    I: Copy,
    O: Copy + Zero,
    F: FnMut(&[I], &mut [O]),
{
    let in_len = shape[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();

    let mut output = zeroed(outer * out_len * inner)?;
    let mut lane_in = Vec::with_capacity(in_len);
    let mut lane_out = zeroed(out_len)?;

    for o in 0..outer {
        let in_base = o * in_len * inner;
        let out_base = o * out_len * inner;
        for i in 0..inner {
            lane_in.clear();
            lane_in.extend((0..in_len).map(|k| data[in_base + k * inner + i]));

            transform(&lane_in, &mut lane_out);

            for (k, value) in lane_out.iter().enumerate() {
                output[out_base + k * inner + i] = *value;
            }
        }
    }

    Ok(output)
}
