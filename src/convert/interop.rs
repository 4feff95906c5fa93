// Optional conversions between host arrays and ndarray types.
//
// ndarray defaults to row-major (C order) layout, the opposite of the host's
// column-major storage. Inbound conversions therefore build Fortran-order
// arrays so the buffer can be adopted as-is, and outbound conversions walk
// the transposed view, which visits elements in column-major order. Element
// positions are preserved either way; only the memory walk differs.

use ndarray::{Array2, Array3, ShapeBuilder};

use crate::array::MxArray;
use crate::class::MxScalar;
use crate::error::{ExchangeError, Result};

/// Copy a 2-D host array into an `Array2` with Fortran (column-major) layout.
pub fn mx_to_array2<T: MxScalar>(arr: &MxArray) -> Result<Array2<T>> {
    if arr.ndims() != 2 {
        return Err(ExchangeError::DimensionMismatch { expected: 2, actual: arr.ndims() });
    }
    let data = arr.as_slice::<T>()?.to_vec();
    let shaped = Array2::from_shape_vec((arr.rows(), arr.cols()).f(), data)
        .expect("buffer length matches extents");
    Ok(shaped)
}

/// Copy an `Array2` of any layout into a freshly allocated 2-D host array.
pub fn array2_to_mx<T: MxScalar>(array: &Array2<T>) -> Result<MxArray> {
    let (rows, cols) = array.dim();
    let mut out = MxArray::numeric(T::CLASS, rows, cols)?;
    let dst = out.as_mut_slice::<T>()?;
    // The transposed view iterates the source in column-major element order
    // regardless of its memory layout.
    for (d, &s) in dst.iter_mut().zip(array.t().iter()) {
        *d = s;
    }
    Ok(out)
}

/// Copy a 2-D or 3-D host array into an `Array3` with axes
/// (rows, cols, channels) in Fortran layout. A 2-D array yields a channel
/// extent of 1.
pub fn mx_to_array3<T: MxScalar>(arr: &MxArray) -> Result<Array3<T>> {
    let data = arr.as_slice::<T>()?.to_vec();
    let shaped = Array3::from_shape_vec((arr.rows(), arr.cols(), arr.channels()).f(), data)
        .expect("buffer length matches extents");
    Ok(shaped)
}

/// Copy an `Array3` with axes (rows, cols, channels), in any layout, into a
/// freshly allocated 3-D host array.
pub fn array3_to_mx<T: MxScalar>(array: &Array3<T>) -> Result<MxArray> {
    let (rows, cols, channels) = array.dim();
    let mut out = MxArray::numeric_3d(T::CLASS, rows, cols, channels)?;
    let dst = out.as_mut_slice::<T>()?;
    // t() reverses all axes, so iteration runs rows fastest, channels slowest.
    for (d, &s) in dst.iter_mut().zip(array.t().iter()) {
        *d = s;
    }
    Ok(out)
}
