// Conversion routines between nalgebra dense matrices and host numeric arrays.
//
// Both sides store elements contiguously in column-major order, which is the
// entire reason every conversion here is a bulk copy or a stride-free view
// rather than per-element translation.

#[cfg(feature = "ndarray")]
pub mod interop;

use nalgebra::{DMatrix, DMatrixView, DMatrixViewMut};

use crate::array::MxArray;
use crate::class::MxScalar;
use crate::error::{ExchangeError, Result};

/// Copy a dense matrix into a freshly allocated 2-D host array.
///
/// The result carries the matrix's extents and `T`'s class tag, and is fully
/// independent of the source after the call.
pub fn dense_to_mx<T: MxScalar>(mat: &DMatrix<T>) -> Result<MxArray> {
    let (rows, cols) = mat.shape();
    let mut out = MxArray::numeric(T::CLASS, rows, cols)?;
    out.as_mut_slice::<T>()?.copy_from_slice(mat.as_slice());
    Ok(out)
}

/// Copy an ordered sequence of same-shaped matrices into a freshly allocated
/// 3-D host array with extents (rows, cols, channel count).
///
/// Channel order is preserved: channel `i` lands in the `i`-th `rows * cols`
/// region of the destination, channels slowest-varying. The sequence must be
/// non-empty and shape-uniform; both are checked.
pub fn stack_to_mx<T: MxScalar>(channels: &[DMatrix<T>]) -> Result<MxArray> {
    let first = channels.first().ok_or(ExchangeError::EmptyStack)?;
    let (rows, cols) = first.shape();
    for (i, ch) in channels.iter().enumerate() {
        if ch.shape() != (rows, cols) {
            return Err(ExchangeError::ChannelShapeMismatch {
                channel: i,
                expected: (rows, cols),
                found: ch.shape(),
            });
        }
    }

    let mut out = MxArray::numeric_3d(T::CLASS, rows, cols, channels.len())?;
    let plane = rows * cols;
    let dst = out.as_mut_slice::<T>()?;
    for (i, ch) in channels.iter().enumerate() {
        dst[i * plane..(i + 1) * plane].copy_from_slice(ch.as_slice());
    }
    Ok(out)
}

/// Copy a 2-D host array into a freshly allocated dense matrix.
pub fn mx_to_dense<T: MxScalar>(arr: &MxArray) -> Result<DMatrix<T>> {
    expect_2d(arr)?;
    Ok(DMatrix::from_column_slice(arr.rows(), arr.cols(), arr.as_slice::<T>()?))
}

/// Borrow a 2-D host array as a dense matrix view without copying.
///
/// The view maps the array's backing storage directly; it cannot outlive the
/// array, and the array cannot be mutated while the view is alive.
pub fn mx_to_dense_view<T: MxScalar>(arr: &MxArray) -> Result<DMatrixView<'_, T>> {
    expect_2d(arr)?;
    Ok(DMatrixView::from_slice(arr.as_slice::<T>()?, arr.rows(), arr.cols()))
}

/// Mutable variant of [`mx_to_dense_view`]: writes through the view land in
/// the array's backing storage.
pub fn mx_to_dense_view_mut<T: MxScalar>(arr: &mut MxArray) -> Result<DMatrixViewMut<'_, T>> {
    expect_2d(arr)?;
    let (rows, cols) = (arr.rows(), arr.cols());
    Ok(DMatrixViewMut::from_slice(arr.as_mut_slice::<T>()?, rows, cols))
}

/// Copy a 2-D or 3-D host array into one dense matrix per channel.
///
/// A 2-D array yields exactly one channel. The read cursor advances by
/// `rows * cols` elements per channel, preserving channel order.
pub fn mx_to_stack<T: MxScalar>(arr: &MxArray) -> Result<Vec<DMatrix<T>>> {
    let (rows, cols) = (arr.rows(), arr.cols());
    let plane = rows * cols;
    let data = arr.as_slice::<T>()?;
    if plane == 0 {
        // chunks_exact has no chunk size here; the channels are all empty.
        return Ok(vec![DMatrix::from_column_slice(rows, cols, data); arr.channels()]);
    }
    Ok(data
        .chunks_exact(plane)
        .map(|region| DMatrix::from_column_slice(rows, cols, region))
        .collect())
}

/// Borrow a 2-D or 3-D host array as one dense matrix view per channel,
/// without copying. Same lifetime contract as [`mx_to_dense_view`].
pub fn mx_to_stack_views<T: MxScalar>(arr: &MxArray) -> Result<Vec<DMatrixView<'_, T>>> {
    let (rows, cols) = (arr.rows(), arr.cols());
    let plane = rows * cols;
    let data = arr.as_slice::<T>()?;
    if plane == 0 {
        return Ok((0..arr.channels())
            .map(|_| DMatrixView::from_slice(data, rows, cols))
            .collect());
    }
    Ok(data
        .chunks_exact(plane)
        .map(|region| DMatrixView::from_slice(region, rows, cols))
        .collect())
}

fn expect_2d(arr: &MxArray) -> Result<()> {
    if arr.ndims() != 2 {
        return Err(ExchangeError::DimensionMismatch { expected: 2, actual: arr.ndims() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassId;

    #[test]
    fn dense_roundtrip_preserves_shape_and_order() {
        let mat = DMatrix::<i64>::from_row_slice(2, 3, &[1, 2, 3, 4, 5, 6]);
        let arr = dense_to_mx(&mat).unwrap();
        assert_eq!(arr.class(), ClassId::Int64);
        assert_eq!((arr.rows(), arr.cols()), (2, 3));
        // Column-major storage of [1,2,3;4,5,6].
        assert_eq!(arr.as_slice::<i64>().unwrap(), &[1, 4, 2, 5, 3, 6][..]);
        assert_eq!(mx_to_dense::<i64>(&arr).unwrap(), mat);
    }

    #[test]
    fn copied_matrix_is_independent_of_the_array() {
        let mat = DMatrix::<f64>::from_element(2, 2, 1.5);
        let mut arr = dense_to_mx(&mat).unwrap();
        let copy = mx_to_dense::<f64>(&arr).unwrap();
        arr.as_mut_slice::<f64>().unwrap().fill(0.0);
        assert_eq!(copy, mat);
    }

    #[test]
    fn view_maps_the_backing_storage() {
        let mat = DMatrix::<u16>::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let arr = dense_to_mx(&mat).unwrap();
        let view = mx_to_dense_view::<u16>(&arr).unwrap();
        assert_eq!(view[(0, 1)], 2);
        assert_eq!(view[(1, 0)], 3);
        assert_eq!(view.as_ptr(), arr.data_ptr() as *const u16);
    }

    #[test]
    fn writes_through_a_mutable_view_alias_the_array() {
        let mut arr = MxArray::numeric(ClassId::Int32, 2, 2).unwrap();
        {
            let mut view = mx_to_dense_view_mut::<i32>(&mut arr).unwrap();
            view[(0, 0)] = 7;
            view[(1, 1)] = -7;
        }
        assert_eq!(arr.as_slice::<i32>().unwrap(), &[7, 0, 0, -7][..]);
    }

    #[test]
    fn stack_roundtrip_preserves_channel_order() {
        let a = DMatrix::<f32>::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DMatrix::<f32>::from_row_slice(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let arr = stack_to_mx(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(arr.ndims(), 3);
        assert_eq!(arr.dims(), &[2, 2, 2][..]);
        let back = mx_to_stack::<f32>(&arr).unwrap();
        assert_eq!(back, vec![a, b]);
    }

    #[test]
    fn stack_views_share_the_backing_storage() {
        let a = DMatrix::<f64>::from_element(3, 2, 1.0);
        let b = DMatrix::<f64>::from_element(3, 2, 2.0);
        let arr = stack_to_mx(&[a, b]).unwrap();
        let views = mx_to_stack_views::<f64>(&arr).unwrap();
        assert_eq!(views.len(), 2);
        assert!(views[0].iter().all(|&x| x == 1.0));
        assert!(views[1].iter().all(|&x| x == 2.0));
        // Channel 1 starts one plane past channel 0.
        let plane = arr.rows() * arr.cols();
        assert_eq!(unsafe { views[0].as_ptr().add(plane) }, views[1].as_ptr());
    }

    #[test]
    fn two_dimensional_array_yields_one_channel() {
        let mat = DMatrix::<u8>::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let arr = dense_to_mx(&mat).unwrap();
        let stack = mx_to_stack::<u8>(&arr).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0], mat);
        assert_eq!(mx_to_stack_views::<u8>(&arr).unwrap().len(), 1);
    }

    #[test]
    fn empty_stack_is_rejected() {
        let channels: Vec<DMatrix<f64>> = vec![];
        assert_eq!(stack_to_mx(&channels).unwrap_err(), ExchangeError::EmptyStack);
    }

    #[test]
    fn channel_shape_mismatch_is_rejected() {
        let a = DMatrix::<f64>::zeros(2, 2);
        let b = DMatrix::<f64>::zeros(3, 2);
        let err = stack_to_mx(&[a, b]).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::ChannelShapeMismatch {
                channel: 1,
                expected: (2, 2),
                found: (3, 2),
            }
        );
    }

    #[test]
    fn two_dimensional_path_rejects_three_dimensional_arrays() {
        let arr = MxArray::numeric_3d(ClassId::Double, 2, 2, 2).unwrap();
        assert_eq!(
            mx_to_dense::<f64>(&arr).unwrap_err(),
            ExchangeError::DimensionMismatch { expected: 2, actual: 3 },
        );
        assert!(mx_to_dense_view::<f64>(&arr).is_err());
    }

    #[test]
    fn class_mismatch_is_rejected_without_casting() {
        let mat = DMatrix::<f32>::zeros(2, 2);
        let arr = dense_to_mx(&mat).unwrap();
        assert_eq!(
            mx_to_dense::<f64>(&arr).unwrap_err(),
            ExchangeError::ClassMismatch {
                requested: ClassId::Double,
                actual: ClassId::Single,
            },
        );
    }

    #[test]
    fn zero_sized_planes_produce_empty_channels() {
        let arr = MxArray::numeric_3d(ClassId::Double, 0, 4, 3).unwrap();
        let stack = mx_to_stack::<f64>(&arr).unwrap();
        assert_eq!(stack.len(), 3);
        assert!(stack.iter().all(|m| m.shape() == (0, 4)));
        assert_eq!(mx_to_stack_views::<f64>(&arr).unwrap().len(), 3);
    }
}
