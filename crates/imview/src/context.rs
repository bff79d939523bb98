//! The guest GUI context and its lifecycle.
//!
//! One [`ImGuiBridge`] owns a Dear ImGui context together with the render
//! device that draws it. Linked overlays get followers of the owner: they
//! share its context while it lives and become inert once it is gone. Only
//! the owner ever tears the context down.
//!
//! No guest context stays current between calls. Every operation activates
//! its bridge's context, does its work and suspends it again, so any number
//! of bridges can live on one thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use imgui::{Context, SuspendedContext, Ui};
use imview_core::ViewerContext;
use imview_gl::{OwnedFontAtlas, RenderDevice};
use tracing::{debug, trace, warn};

use crate::guest::{draw_batch, GuestFontAtlas};
use crate::input::FrameInput;

/// Renderer name reported to the guest library.
pub const RENDERER_NAME: &str = "imview-gl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Initialized,
    /// Inside [`ImGuiBridge::frame`].
    FrameActive,
    /// Torn down; every later call is skipped.
    Destroyed,
}

pub(crate) struct Shared<R> {
    guest: Option<SuspendedContext>,
    device: R,
    input: FrameInput,
    display_size: [f32; 2],
    state: BridgeState,
}

impl<R: RenderDevice> Shared<R> {
    fn new(device: R) -> Self {
        Self {
            guest: None,
            device,
            input: FrameInput::default(),
            display_size: [0.0; 2],
            state: BridgeState::Uninitialized,
        }
    }

    /// Run `f` with this bridge's guest context current.
    ///
    /// Returns `None` without running `f` when there is no context or when a
    /// foreign context is current and ours cannot be activated.
    fn with_active<T>(&mut self, f: impl FnOnce(&mut Context, &mut R, &mut FrameInput) -> T) -> Option<T> {
        let suspended = self.guest.take()?;
        match suspended.activate() {
            Ok(mut context) => {
                let out = f(&mut context, &mut self.device, &mut self.input);
                self.guest = Some(context.suspend());
                Some(out)
            }
            Err(suspended) => {
                warn!("another GUI context is current, skipping");
                self.guest = Some(suspended);
                None
            }
        }
    }

    fn init(&mut self, width: u32, height: u32) -> bool {
        let created = self.guest.is_none();
        if created {
            self.guest = Some(SuspendedContext::create());
        }

        let size = [width as f32, height as f32];
        self.display_size = size;
        let applied = self
            .with_active(|context, _, _| {
                if created {
                    context.set_ini_filename(None);
                    context.set_renderer_name(Some(RENDERER_NAME.to_owned()));
                    context.style_mut().use_dark_colors();
                    debug!(width, height, "GUI context created");
                }
                context.io_mut().display_size = size;
            })
            .is_some();

        if applied && self.state == BridgeState::Uninitialized {
            self.state = BridgeState::Initialized;
        }
        applied
    }

    fn frame(&mut self, content: impl FnOnce(&Ui)) -> bool {
        if self.state == BridgeState::Uninitialized {
            warn!("frame requested before init, skipping");
            return false;
        }

        self.state = BridgeState::FrameActive;
        let produced = self
            .with_active(|context, device, input| {
                if !device.has_fonts_texture() {
                    debug!("creating device objects");
                    device.create_device_objects(&mut GuestFontAtlas(context.fonts()));
                }

                input.write_to(context.io_mut());
                let ui = context.new_frame();
                content(ui);

                let batch = draw_batch(context.render());
                device.render_draw_data(batch);
            })
            .is_some();
        self.state = BridgeState::Initialized;

        produced
    }

    fn teardown(&mut self) {
        if self.state == BridgeState::Destroyed {
            return;
        }

        if self.guest.is_some() {
            let released = self
                .with_active(|context, device, _| {
                    device.destroy_device_objects(&mut GuestFontAtlas(context.fonts()));
                })
                .is_some();
            if !released {
                // The atlas is unreachable; GL objects are released all the same.
                self.device.destroy_device_objects(&mut OwnedFontAtlas::default());
            }
        }

        self.guest = None;
        self.state = BridgeState::Destroyed;
        debug!("GUI context destroyed");
    }
}

enum Handle<R> {
    Owner(Rc<RefCell<Shared<R>>>),
    Follower(Weak<RefCell<Shared<R>>>),
}

/// Connects one guest GUI context and its render device to a host viewer.
pub struct ImGuiBridge<R: RenderDevice> {
    handle: Handle<R>,
}

impl<R: RenderDevice> ImGuiBridge<R> {
    /// A new owner. The guest context is created by the first [`init`].
    ///
    /// [`init`]: ImGuiBridge::init
    pub fn new(device: R) -> Self {
        Self {
            handle: Handle::Owner(Rc::new(RefCell::new(Shared::new(device)))),
        }
    }

    /// A handle sharing this bridge's context without owning it.
    pub fn follower(&self) -> Self {
        let weak = match &self.handle {
            Handle::Owner(shared) => Rc::downgrade(shared),
            Handle::Follower(weak) => weak.clone(),
        };
        Self {
            handle: Handle::Follower(weak),
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self.handle, Handle::Owner(_))
    }

    /// The lifecycle state. Reads as [`BridgeState::FrameActive`] from
    /// inside a frame of this bridge or of a linked one.
    pub fn state(&self) -> BridgeState {
        let Some(shared) = self.upgrade() else {
            return BridgeState::Destroyed;
        };
        let state = match shared.try_borrow() {
            Ok(shared) => shared.state,
            Err(_) => BridgeState::FrameActive,
        };
        state
    }

    /// The last display size passed to [`ImGuiBridge::init`]. `None` once
    /// the owner is gone or while a frame is running.
    pub fn display_size(&self) -> Option<[f32; 2]> {
        let shared = self.upgrade()?;
        let size = shared.try_borrow().ok().map(|shared| shared.display_size);
        size
    }

    /// The accumulated input the next frame will see. `None` once the owner
    /// is gone or while a frame is running.
    pub fn input(&self) -> Option<FrameInput> {
        let shared = self.upgrade()?;
        let input = shared.try_borrow().ok().map(|shared| shared.input);
        input
    }

    fn upgrade(&self) -> Option<Rc<RefCell<Shared<R>>>> {
        match &self.handle {
            Handle::Owner(shared) => Some(Rc::clone(shared)),
            Handle::Follower(weak) => weak.upgrade(),
        }
    }

    /// Run `f` on the shared state, unless the bridge is gone, destroyed or
    /// in the middle of a frame.
    fn live<T>(&self, operation: &str, f: impl FnOnce(&mut Shared<R>) -> T) -> Option<T> {
        let Some(shared) = self.upgrade() else {
            warn!(operation, "bridge owner is gone, skipping");
            return None;
        };
        let Ok(mut shared) = shared.try_borrow_mut() else {
            warn!(operation, "GUI frame in progress, skipping");
            return None;
        };
        if shared.state == BridgeState::Destroyed {
            warn!(operation, "bridge already cleaned up, skipping");
            return None;
        }
        Some(f(&mut shared))
    }

    /// Create the guest context if there is none yet and set the display
    /// size. Returns whether the size was applied.
    pub fn init(&self, width: u32, height: u32) -> bool {
        self.live("init", |shared| shared.init(width, height)).unwrap_or(false)
    }

    /// Feed one host event to the GUI. The event is always consumed.
    pub fn handle(&self, viewer: &dyn ViewerContext, index: i32) -> bool {
        trace!(index, event = ?viewer.event(), "handle");
        self.live("handle", |shared| shared.input.apply(viewer));
        true
    }

    /// Refresh the pointer position without touching buttons or modifiers.
    pub fn track_pointer(&self, viewer: &dyn ViewerContext) {
        self.live("track_pointer", |shared| shared.input.track_pointer(viewer));
    }

    /// Run one GUI frame: begin it with the accumulated input, let `content`
    /// issue widgets, then render the result through the device.
    ///
    /// The shared state stays borrowed for the whole frame, so calls on this
    /// bridge or a linked one from inside `content` or a draw callback are
    /// skipped. Returns whether a frame was produced.
    pub fn frame(&self, content: impl FnOnce(&Ui)) -> bool {
        self.live("frame", |shared| shared.frame(content)).unwrap_or(false)
    }

    /// Destroy the device objects and the guest context. Only the owner
    /// does anything; the bridge is unusable afterwards.
    pub fn cleanup(&mut self) {
        match &self.handle {
            Handle::Owner(shared) => match shared.try_borrow_mut() {
                Ok(mut shared) => shared.teardown(),
                Err(_) => warn!("cleanup requested during a GUI frame, skipping"),
            },
            Handle::Follower(_) => trace!("follower cleanup skipped"),
        }
    }
}

impl<R: RenderDevice> Drop for ImGuiBridge<R> {
    fn drop(&mut self) {
        if let Handle::Owner(shared) = &self.handle {
            match shared.try_borrow_mut() {
                Ok(mut shared) => shared.teardown(),
                Err(_) => warn!("bridge dropped while in use, GUI context leaked"),
            }
        }
    }
}
