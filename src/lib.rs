//! Bidirectional, low-copy conversions between [`nalgebra`] dense matrices
//! and MATLAB-style numeric arrays.
//!
//! The crate bridges two column-major worlds: `DMatrix<T>` on the Rust side
//! and the host environment's self-describing numeric array ([`MxArray`]) on
//! the other. Because both store elements contiguously in column-major
//! order, every conversion is a bulk copy or a zero-copy view; no element
//! ever moves relative to its neighbours.
//!
//! An engine bridge (init / exec / send / receive) is expected to sit on top
//! of this layer and traffic in the [`MxArray`] handles it produces and
//! consumes; that bridge is deliberately not part of this crate.
//!
//! Supported element types are the 8/16/32/64-bit signed and unsigned
//! integers plus `f32` and `f64`, tagged by [`ClassId`]. Conversions never
//! cast between element types: asking for the wrong type is an error, not a
//! coercion.
//!
//! # Copies and views
//!
//! Each inbound path comes in a copying flavour ([`mx_to_dense`],
//! [`mx_to_stack`]) and a borrowing flavour ([`mx_to_dense_view`],
//! [`mx_to_dense_view_mut`], [`mx_to_stack_views`]). A view maps the array's
//! backing storage directly: it costs nothing, writes through a mutable view
//! are visible to every other reader of the array, and the borrow checker
//! keeps it from outliving the array it maps.
//!
//! # Example
//!
//! The round trip below mirrors a typical engine session: receive `X`,
//! compute on it, send `Y` back.
//!
//! ```
//! use nalgebra::DMatrix;
//! use nalgebra_matlab::{dense_to_mx, mx_to_dense};
//!
//! // Host side: X = uint32([1,2;3,4]).
//! let x = DMatrix::<u32>::from_row_slice(2, 2, &[1, 2, 3, 4]);
//! let x_host = dense_to_mx(&x)?;
//!
//! // Native side: pull it across, double it, push the result back.
//! let x_native: DMatrix<u32> = mx_to_dense(&x_host)?;
//! let y_native = &x_native + &x_native;
//! let y_host = dense_to_mx(&y_native)?;
//!
//! // Column-major storage: [2, 6, 4, 8] displays as [2,4;6,8] by row.
//! assert_eq!(y_host.as_slice::<u32>()?, &[2, 6, 4, 8][..]);
//! # Ok::<(), nalgebra_matlab::ExchangeError>(())
//! ```

pub mod array;
pub mod class;
pub mod convert;
pub mod error;

pub use crate::array::MxArray;
pub use crate::class::{ClassId, MxScalar};
pub use crate::convert::{
    dense_to_mx, mx_to_dense, mx_to_dense_view, mx_to_dense_view_mut, mx_to_stack,
    mx_to_stack_views, stack_to_mx,
};
pub use crate::error::{ExchangeError, Result};
