//! The host viewer as seen from an overlay callback.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::ffi;

/// Kind of the event the host is currently delivering.
///
/// Draw passes are reported through the same channel by the host, so the
/// `Draw*` kinds show up while overlays are being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(i32)]
pub enum EventKind {
    NoEvent = 0,
    Push = 1,
    Drag = 2,
    Release = 3,
    Move = 4,
    Key = 5,
    KeyUp = 6,
    DrawOpaque = 10,
    DrawTransparent = 11,
    DrawStippled = 12,
    DrawShadow = 13,
    DrawLines = 14,
}

impl EventKind {
    /// Decode a raw host event code. Unknown codes become [`EventKind::NoEvent`].
    pub fn from_raw(code: i32) -> Self {
        Self::from_i32(code).unwrap_or_else(|| {
            tracing::trace!(code, "unrecognised host event code");
            EventKind::NoEvent
        })
    }
}

/// Viewer transform mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(i32)]
pub enum TransformMode {
    Viewer2d = 0,
    Perspective = 1,
    Orthographic = 2,
}

impl TransformMode {
    pub fn from_raw(code: i32) -> Self {
        Self::from_i32(code).unwrap_or(TransformMode::Viewer2d)
    }
}

/// Draw passes the host runs overlay callbacks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPass {
    Lines,
    Opaque,
    Transparent,
    Shadow,
    Stippled,
}

impl DrawPass {
    /// Bit of this pass in [`ffi::ViewerEventStruct::passes`].
    pub fn bit(self) -> u32 {
        match self {
            DrawPass::Lines => ffi::PASS_LINES,
            DrawPass::Opaque => ffi::PASS_OPAQUE,
            DrawPass::Transparent => ffi::PASS_TRANSPARENT,
            DrawPass::Shadow => ffi::PASS_SHADOW,
            DrawPass::Stippled => ffi::PASS_STIPPLED,
        }
    }
}

/// Host modifier-key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u32);

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers(ffi::MOD_SHIFT);
    pub const CTRL: Modifiers = Modifiers(ffi::MOD_CTRL);
    pub const ALT: Modifiers = Modifiers(ffi::MOD_ALT);

    pub fn ctrl(self) -> bool {
        self.0 & ffi::MOD_CTRL != 0
    }

    pub fn shift(self) -> bool {
        self.0 & ffi::MOD_SHIFT != 0
    }

    pub fn alt(self) -> bool {
        self.0 & ffi::MOD_ALT != 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// What the bridge reads from, and asks of, the host viewer.
///
/// One value is handed to each overlay callback; it describes the event or
/// draw pass currently in progress.
pub trait ViewerContext {
    fn event(&self) -> EventKind;

    /// Pointer position in viewport pixels.
    fn mouse_position(&self) -> (f32, f32);

    /// Host number of the button involved in the current event.
    fn button(&self) -> i32;

    fn modifiers(&self) -> Modifiers;

    /// Full viewport size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Visible part of the viewport. Hosts on high-density displays report
    /// this in logical pixels; defaults to [`ViewerContext::viewport_size`].
    fn visible_viewport_size(&self) -> (u32, u32) {
        self.viewport_size()
    }

    fn transform_mode(&self) -> TransformMode;

    /// Whether the callback runs during `pass`.
    fn in_pass(&self, pass: DrawPass) -> bool;

    /// Ask the host to route clicks anywhere in the viewer to this overlay
    /// with the given handle index.
    fn add_anywhere_handle(&mut self, index: i32);

    /// Ask the host to draw the viewer again as soon as possible.
    fn request_redraw(&mut self);
}

/// True when the viewer shows a flat 2D image.
pub fn is_2d_viewer(viewer: &dyn ViewerContext) -> bool {
    viewer.transform_mode() == TransformMode::Viewer2d
}
