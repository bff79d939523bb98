//! Byte views of vertex and index data for buffer upload.

use crate::draw::{DrawIdx, DrawVert};

/// Plain-old-data values that may be viewed as raw bytes.
///
/// # Safety
///
/// Only implement on `#[repr(C)]` types (or primitives) made of plain
/// numeric fields, with no pointers and no padding bytes.
pub unsafe trait AsBytes: Sized {}

// 8 + 8 + 4 bytes, no padding.
unsafe impl AsBytes for DrawVert {}
unsafe impl AsBytes for DrawIdx {}

/// The bytes of a whole slice, `len * size_of::<T>()` long.
pub fn slice_as_bytes<T: AsBytes>(values: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(values.as_ptr().cast(), std::mem::size_of_val(values)) }
}
