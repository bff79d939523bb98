//! Drives an [`ImGuiOverlay`] from the host viewer's callbacks.

use imview_core::{DrawPass, EventKind, ViewerContext};
use imview_gl::RenderDevice;
use tracing::trace;

use crate::context::ImGuiBridge;
use crate::overlay::ImGuiOverlay;

/// Handle index registered so clicks anywhere in the viewer reach the GUI.
pub const ANYWHERE_HANDLE: i32 = 0;

/// The three host callbacks of one overlay.
pub struct ViewerOverlay<O: ImGuiOverlay, R: RenderDevice> {
    overlay: O,
    bridge: ImGuiBridge<R>,
}

impl<O: ImGuiOverlay, R: RenderDevice> ViewerOverlay<O, R> {
    pub fn new(overlay: O, bridge: ImGuiBridge<R>) -> Self {
        Self { overlay, bridge }
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    pub fn bridge(&self) -> &ImGuiBridge<R> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut ImGuiBridge<R> {
        &mut self.bridge
    }

    /// Size the GUI to the viewer and report whether the overlay wants
    /// draw and event callbacks.
    pub fn build_handle(&mut self, viewer: &dyn ViewerContext) -> bool {
        let (width, height) = gui_area(viewer);
        self.bridge.init(width, height);
        self.overlay.should_build_handles(viewer)
    }

    /// Render one GUI frame. Only acts in the line pass; returns whether a
    /// frame was produced.
    pub fn draw_handle(&mut self, viewer: &mut dyn ViewerContext) -> bool {
        if !viewer.in_pass(DrawPass::Lines) {
            return false;
        }

        self.bridge.track_pointer(viewer);

        let overlay = &mut self.overlay;
        let shown: &dyn ViewerContext = &*viewer;
        let produced = self.bridge.frame(|ui| overlay.draw(ui, shown));

        let event = viewer.event();
        if matches!(event, EventKind::DrawOpaque | EventKind::Push | EventKind::Drag) {
            viewer.add_anywhere_handle(ANYWHERE_HANDLE);
        }
        viewer.request_redraw();
        trace!(?event, produced, "overlay drawn");

        produced
    }

    pub fn handle(&mut self, viewer: &dyn ViewerContext, index: i32) -> bool {
        self.bridge.handle(viewer, index)
    }
}

/// The viewer area the GUI covers: the visible part on macOS, where the
/// host reports a larger backing viewport.
fn gui_area(viewer: &dyn ViewerContext) -> (u32, u32) {
    if cfg!(target_os = "macos") {
        viewer.visible_viewport_size()
    } else {
        viewer.viewport_size()
    }
}
