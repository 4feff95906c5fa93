// Owned model of the host environment's numeric array handle.

use std::fmt;
use std::slice;

use log::trace;

use crate::class::{ClassId, MxScalar};
use crate::error::{ExchangeError, Result};

/// A host-style numeric array: a class tag, 2 or 3 extents, and an untyped
/// column-major backing buffer.
///
/// This is the handle shape the engine bridge's send/receive calls traffic
/// in. Allocation mirrors the host's "create numeric array of given extents
/// and class" primitive; reading back mirrors "extents, class tag, backing
/// pointer". Dimension counts other than 2 and 3 are not representable.
///
/// The buffer is zero-filled on allocation and always exactly
/// `rows * cols * channels * elem_size` bytes long.
#[derive(Clone)]
pub struct MxArray {
    class: ClassId,
    dims: [usize; 3],
    ndims: usize,
    buf: RawBuf,
}

impl MxArray {
    /// Allocate a zero-filled 2-D numeric array.
    ///
    /// Fails with [`ExchangeError::UnsupportedClass`] for `ClassId::Unknown`
    /// and [`ExchangeError::TooLarge`] when the extents overflow.
    pub fn numeric(class: ClassId, rows: usize, cols: usize) -> Result<Self> {
        Self::with_dims(class, [rows, cols, 1], 2)
    }

    /// Allocate a zero-filled 3-D numeric array with `channels` as the
    /// slowest-varying dimension.
    pub fn numeric_3d(class: ClassId, rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::with_dims(class, [rows, cols, channels], 3)
    }

    fn with_dims(class: ClassId, dims: [usize; 3], ndims: usize) -> Result<Self> {
        let elem = class.elem_size().ok_or(ExchangeError::UnsupportedClass)?;
        let len = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .ok_or(ExchangeError::TooLarge)?;
        let bytes = len.checked_mul(elem).ok_or(ExchangeError::TooLarge)?;
        trace!(
            "allocating {:?} array {}x{}x{} ({} bytes)",
            class, dims[0], dims[1], dims[2], bytes
        );
        Ok(Self { class, dims, ndims, buf: RawBuf::zeroed(bytes) })
    }

    /// The array's numeric class tag.
    pub fn class(&self) -> ClassId { self.class }

    /// Number of dimensions, always 2 or 3.
    pub fn ndims(&self) -> usize { self.ndims }

    /// The per-dimension extents, `ndims()` entries long.
    pub fn dims(&self) -> &[usize] { &self.dims[..self.ndims] }

    /// Row count (first, fastest-varying dimension).
    pub fn rows(&self) -> usize { self.dims[0] }

    /// Column count (second dimension).
    pub fn cols(&self) -> usize { self.dims[1] }

    /// Channel count (third, slowest-varying dimension); 1 for 2-D arrays.
    pub fn channels(&self) -> usize { self.dims[2] }

    /// Total element count across all channels.
    pub fn len(&self) -> usize { self.dims[0] * self.dims[1] * self.dims[2] }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Length of the backing buffer in bytes.
    pub fn byte_len(&self) -> usize { self.buf.bytes }

    /// Raw pointer to the backing storage, the way the host API exposes it.
    pub fn data_ptr(&self) -> *const u8 { self.buf.as_ptr() }

    /// Mutable raw pointer to the backing storage.
    pub fn data_ptr_mut(&mut self) -> *mut u8 { self.buf.as_mut_ptr() }

    /// The backing storage as typed elements in column-major order, channels
    /// concatenated.
    ///
    /// Fails with [`ExchangeError::ClassMismatch`] when `T` does not match
    /// the array's class tag; data is never reinterpreted across classes.
    pub fn as_slice<T: MxScalar>(&self) -> Result<&[T]> {
        self.check_class(T::CLASS)?;
        // The class check guarantees the buffer holds exactly len() elements
        // of T, and the block allocation guarantees their alignment.
        Ok(unsafe { slice::from_raw_parts(self.buf.as_ptr() as *const T, self.len()) })
    }

    /// Mutable variant of [`MxArray::as_slice`].
    pub fn as_mut_slice<T: MxScalar>(&mut self) -> Result<&mut [T]> {
        self.check_class(T::CLASS)?;
        let len = self.len();
        Ok(unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr() as *mut T, len) })
    }

    fn check_class(&self, requested: ClassId) -> Result<()> {
        if self.class != requested {
            return Err(ExchangeError::ClassMismatch { requested, actual: self.class });
        }
        Ok(())
    }
}

impl fmt::Debug for MxArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MxArray")
            .field("class", &self.class)
            .field("dims", &self.dims())
            .finish_non_exhaustive()
    }
}

/// Untyped backing storage. Allocated in u64 blocks so the buffer is aligned
/// for every supported element class.
#[derive(Clone)]
struct RawBuf {
    blocks: Vec<u64>,
    bytes: usize,
}

impl RawBuf {
    fn zeroed(bytes: usize) -> Self {
        Self { blocks: vec![0u64; bytes.div_ceil(8)], bytes }
    }

    fn as_ptr(&self) -> *const u8 { self.blocks.as_ptr() as *const u8 }

    fn as_mut_ptr(&mut self) -> *mut u8 { self.blocks.as_mut_ptr() as *mut u8 }
}
