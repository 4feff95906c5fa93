// Mapping between Rust element types and host numeric class tags.

use std::any::TypeId;

use nalgebra::Scalar;

/// Numeric class identifiers the host environment uses to self-describe
/// array element types. Real-valued classes only; complex, sparse, cell and
/// struct classes are outside this layer's scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassId {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Single,
    Double,
    /// Sentinel for element types the host has no numeric class for.
    Unknown,
}

impl ClassId {
    /// Look up the class tag for a Rust element type.
    ///
    /// Unsupported types map to `Unknown`. Callers must treat `Unknown` as an
    /// error before allocating anything with it; [`crate::MxArray`]'s
    /// constructors enforce this.
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();
        if id == TypeId::of::<i8>() { ClassId::Int8 }
        else if id == TypeId::of::<u8>() { ClassId::Uint8 }
        else if id == TypeId::of::<i16>() { ClassId::Int16 }
        else if id == TypeId::of::<u16>() { ClassId::Uint16 }
        else if id == TypeId::of::<i32>() { ClassId::Int32 }
        else if id == TypeId::of::<u32>() { ClassId::Uint32 }
        else if id == TypeId::of::<i64>() { ClassId::Int64 }
        else if id == TypeId::of::<u64>() { ClassId::Uint64 }
        else if id == TypeId::of::<f32>() { ClassId::Single }
        else if id == TypeId::of::<f64>() { ClassId::Double }
        else { ClassId::Unknown }
    }

    /// Element width in bytes, or `None` for `Unknown`.
    pub fn elem_size(self) -> Option<usize> {
        match self {
            ClassId::Int8 | ClassId::Uint8 => Some(1),
            ClassId::Int16 | ClassId::Uint16 => Some(2),
            ClassId::Int32 | ClassId::Uint32 | ClassId::Single => Some(4),
            ClassId::Int64 | ClassId::Uint64 | ClassId::Double => Some(8),
            ClassId::Unknown => None,
        }
    }
}

/// Element types the exchange layer supports, with the matching class tag
/// attached at compile time.
///
/// The runtime table and this compile-time table agree:
/// `ClassId::of::<T>() == T::CLASS` for every implementor.
pub trait MxScalar: Scalar + Copy {
    /// The host class tag for this element type.
    const CLASS: ClassId;
}

impl MxScalar for i8 { const CLASS: ClassId = ClassId::Int8; }
impl MxScalar for u8 { const CLASS: ClassId = ClassId::Uint8; }
impl MxScalar for i16 { const CLASS: ClassId = ClassId::Int16; }
impl MxScalar for u16 { const CLASS: ClassId = ClassId::Uint16; }
impl MxScalar for i32 { const CLASS: ClassId = ClassId::Int32; }
impl MxScalar for u32 { const CLASS: ClassId = ClassId::Uint32; }
impl MxScalar for i64 { const CLASS: ClassId = ClassId::Int64; }
impl MxScalar for u64 { const CLASS: ClassId = ClassId::Uint64; }
impl MxScalar for f32 { const CLASS: ClassId = ClassId::Single; }
impl MxScalar for f64 { const CLASS: ClassId = ClassId::Double; }
