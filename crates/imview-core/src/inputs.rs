//! Inputs from the host to the bridge

use crate::ffi::*;
use crate::viewer::{DrawPass, EventKind, Modifiers, TransformMode, ViewerContext};

/// Owned snapshot of one viewer callback.
///
/// Hosts with a C ABI fill a [`ViewerEventStruct`] and convert it; the
/// requests the bridge makes back (`add_anywhere_handle`, `request_redraw`)
/// are collected here for the host to act on after the callback returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub event: EventKind,
    pub mouse: (f32, f32),
    pub button: i32,
    pub modifiers: Modifiers,
    pub viewport: (u32, u32),
    pub visible_viewport: (u32, u32),
    pub transform_mode: TransformMode,
    pub passes: u32,
    /// Handle indices registered during the callback.
    pub anywhere_handles: Vec<i32>,
    pub redraw_requested: bool,
}

impl ViewerSnapshot {
    pub fn new(event: EventKind, viewport: (u32, u32)) -> Self {
        Self {
            event,
            mouse: (0.0, 0.0),
            button: 0,
            modifiers: Modifiers::default(),
            viewport,
            visible_viewport: viewport,
            transform_mode: TransformMode::Viewer2d,
            passes: 0,
            anywhere_handles: Vec::new(),
            redraw_requested: false,
        }
    }

    pub fn with_mouse(mut self, x: f32, y: f32) -> Self {
        self.mouse = (x, y);
        self
    }

    pub fn with_button(mut self, button: i32) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_pass(mut self, pass: DrawPass) -> Self {
        self.passes |= pass.bit();
        self
    }

    pub fn with_transform_mode(mut self, mode: TransformMode) -> Self {
        self.transform_mode = mode;
        self
    }
}

impl From<&ViewerEventStruct> for ViewerSnapshot {
    fn from(val: &ViewerEventStruct) -> ViewerSnapshot {
        ViewerSnapshot {
            event: EventKind::from_raw(val.event),
            mouse: (val.mouseX, val.mouseY),
            button: val.button,
            modifiers: Modifiers(val.state),
            viewport: (val.viewportWidth, val.viewportHeight),
            visible_viewport: (val.visibleWidth, val.visibleHeight),
            transform_mode: TransformMode::from_raw(val.transformMode),
            passes: val.passes,
            anywhere_handles: Vec::new(),
            redraw_requested: false,
        }
    }
}

impl ViewerContext for ViewerSnapshot {
    fn event(&self) -> EventKind {
        self.event
    }

    fn mouse_position(&self) -> (f32, f32) {
        self.mouse
    }

    fn button(&self) -> i32 {
        self.button
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn visible_viewport_size(&self) -> (u32, u32) {
        self.visible_viewport
    }

    fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    fn in_pass(&self, pass: DrawPass) -> bool {
        self.passes & pass.bit() != 0
    }

    fn add_anywhere_handle(&mut self, index: i32) {
        self.anywhere_handles.push(index);
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
