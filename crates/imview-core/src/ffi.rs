//! Raw codes and C-repr structs for hosts that talk to the bridge through a
//! C ABI.
//!
//! Modifier bits follow the FLTK layout most viewer hosts expose.

#![allow(non_snake_case)]

// =====================================================================
// Modifier bits
// =====================================================================
pub const MOD_SHIFT: u32 = 0x0001_0000;
pub const MOD_CAPS_LOCK: u32 = 0x0002_0000;
pub const MOD_CTRL: u32 = 0x0004_0000;
pub const MOD_ALT: u32 = 0x0008_0000;

// =====================================================================
// Draw pass bits
// =====================================================================
pub const PASS_LINES: u32 = 1 << 0;
pub const PASS_OPAQUE: u32 = 1 << 1;
pub const PASS_TRANSPARENT: u32 = 1 << 2;
pub const PASS_SHADOW: u32 = 1 << 3;
pub const PASS_STIPPLED: u32 = 1 << 4;

// =====================================================================
// Mouse buttons, host numbering
// =====================================================================
pub const BUTTON_LEFT: i32 = 1;
pub const BUTTON_MIDDLE: i32 = 2;
pub const BUTTON_RIGHT: i32 = 3;

/// One viewer callback, flattened.
///
/// `event` and `transformMode` carry the discriminants of
/// [`crate::EventKind`] and [`crate::TransformMode`]; `passes` is a set of
/// `PASS_*` bits.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct ViewerEventStruct {
    pub event: i32,
    pub mouseX: f32,
    pub mouseY: f32,
    pub button: i32,
    pub state: u32,
    pub viewportWidth: u32,
    pub viewportHeight: u32,
    pub visibleWidth: u32,
    pub visibleHeight: u32,
    pub transformMode: i32,
    pub passes: u32,
}
