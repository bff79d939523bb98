use imgui::Ui;
use imview_core::ViewerContext;

/// A GUI drawn over a host viewer.
///
/// Implementations only issue widgets; context handling, input and
/// rendering are done by [`crate::ViewerOverlay`].
pub trait ImGuiOverlay {
    /// Issue this frame's widgets.
    fn draw(&mut self, ui: &Ui, viewer: &dyn ViewerContext);

    /// Whether the host should call back for drawing and events in this
    /// viewer at all.
    fn should_build_handles(&self, viewer: &dyn ViewerContext) -> bool {
        let _ = viewer;
        true
    }
}
