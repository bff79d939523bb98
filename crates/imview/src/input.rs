//! Host viewer events to GUI input.

use imgui::{Io, Key, MouseButton};
use imview_core::ffi::{BUTTON_LEFT, BUTTON_RIGHT};
use imview_core::{EventKind, ViewerContext};
use tracing::{debug, trace};

/// Number of mouse buttons the GUI tracks.
pub const MOUSE_BUTTONS: usize = 5;

/// Map a host button number to a GUI button index.
///
/// The host numbers left, middle, right as 1, 2, 3; the GUI wants left,
/// right, middle as 0, 1, 2. Buttons above 3 keep their order.
///
/// `i32::MIN` has no predecessor and is returned unchanged, which no slot
/// accepts.
pub fn remap_button(button: i32) -> i32 {
    let Some(zero_based) = button.checked_sub(1) else {
        return button;
    };
    if button == BUTTON_LEFT || button > BUTTON_RIGHT {
        zero_based
    } else {
        zero_based % 2 + 1
    }
}

/// Pointer, button and modifier state, accumulated across host events and
/// written into the GUI once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub mouse_pos: [f32; 2],
    /// Button latches; they persist until the matching release.
    pub mouse_down: [bool; MOUSE_BUTTONS],
    pub key_ctrl: bool,
    pub key_shift: bool,
    pub key_alt: bool,
}

impl FrameInput {
    /// Fold one host event into the state.
    pub fn apply(&mut self, viewer: &dyn ViewerContext) {
        let event = viewer.event();
        match event {
            EventKind::Push => self.set_button(viewer.button(), true),
            EventKind::Release => self.set_button(viewer.button(), false),
            _ => {}
        }

        if event == EventKind::Release {
            self.key_ctrl = false;
            self.key_shift = false;
            self.key_alt = false;
        } else {
            let modifiers = viewer.modifiers();
            self.key_ctrl = modifiers.ctrl();
            self.key_shift = modifiers.shift();
            self.key_alt = modifiers.alt();
        }

        self.track_pointer(viewer);
        trace!(?event, input = ?self, "host event applied");
    }

    /// Only follow the pointer.
    pub fn track_pointer(&mut self, viewer: &dyn ViewerContext) {
        let (x, y) = viewer.mouse_position();
        self.mouse_pos = [x, y];
    }

    fn set_button(&mut self, host_button: i32, down: bool) {
        let index = remap_button(host_button);
        match usize::try_from(index) {
            Ok(slot) if slot < MOUSE_BUTTONS => self.mouse_down[slot] = down,
            _ => debug!(host_button, index, "ignoring unmapped mouse button"),
        }
    }

    /// Queue the state as GUI input events for the next frame.
    pub(crate) fn write_to(&self, io: &mut Io) {
        io.add_mouse_pos_event(self.mouse_pos);
        for (button, down) in MouseButton::VARIANTS.into_iter().zip(self.mouse_down) {
            io.add_mouse_button_event(button, down);
        }
        io.add_key_event(Key::ModCtrl, self.key_ctrl);
        io.add_key_event(Key::ModShift, self.key_shift);
        io.add_key_event(Key::ModAlt, self.key_alt);
    }
}
