//! Dear ImGui overlays inside a host application's viewer.
//!
//! The host owns the window, the event loop and the GL context; this crate
//! plugs a GUI into its viewer callbacks:
//!
//! - [`ImGuiBridge`] owns a guest context and a [`RenderDevice`], translates
//!   host events into GUI input and runs frames.
//! - [`ImGuiOverlay`] is what an integration implements: the widgets and
//!   whether the viewer should call back at all.
//! - [`ViewerOverlay`] ties the two to the host's `build`, `draw` and
//!   `handle` callbacks.
//!
//! ```rust,ignore
//! let config = BridgeConfig::global();
//! imview_core::log::init_logging(config);
//!
//! // Inside a host callback, with the host's GL context current:
//! let renderer = unsafe { GlRenderer::from_host_context(config) };
//! let mut overlay = ViewerOverlay::new(MyPanel::default(), ImGuiBridge::new(renderer));
//!
//! if overlay.build_handle(&viewer) {
//!     overlay.draw_handle(&mut viewer);
//! }
//! ```

mod context;
mod drawing;
mod guest;
pub mod input;
mod overlay;

pub use context::{BridgeState, ImGuiBridge, RENDERER_NAME};
pub use drawing::{ViewerOverlay, ANYWHERE_HANDLE};
pub use input::{remap_button, FrameInput};
pub use overlay::ImGuiOverlay;

pub use imgui;
pub use imview_core::{BridgeConfig, ViewerContext};
pub use imview_gl::{GlRenderer, RenderDevice};
