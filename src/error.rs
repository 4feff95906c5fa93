// Error types shared across the exchange layer.

use crate::class::ClassId;

/// Recoverable errors raised by array allocation and conversion.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The requested element type has no numeric class on the host side.
    /// Allocating with the `Unknown` sentinel would produce a garbage array,
    /// so the allocator refuses up front.
    #[error("element type has no host numeric class")]
    UnsupportedClass,

    /// The array's class tag does not match the requested element type.
    /// The exchange layer never casts between numeric types.
    #[error("array holds {actual:?} data, requested {requested:?}")]
    ClassMismatch { requested: ClassId, actual: ClassId },

    /// The array has the wrong number of dimensions for this conversion path.
    #[error("expected a {expected}-dimensional array, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A channel stack conversion was handed an empty sequence, leaving the
    /// output extents undefined.
    #[error("channel stack is empty")]
    EmptyStack,

    /// A channel's shape differs from channel 0; copying it would read or
    /// write out of bounds.
    #[error("channel {channel} is {found:?}, expected {expected:?}")]
    ChannelShapeMismatch {
        channel: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// The product of the requested extents overflows addressable memory.
    #[error("requested extents overflow addressable memory")]
    TooLarge,
}

/// Convenience alias for results using ExchangeError.
pub type Result<T> = std::result::Result<T, ExchangeError>;
