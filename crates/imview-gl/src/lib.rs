//! OpenGL render manager for the imview GUI bridge.
//!
//! [`GlRenderer`] owns the device objects (shader program, vertex and index
//! buffers, font texture) and turns a [`DrawBatch`] into GL draw calls inside
//! the host's context. Every call goes through [`GlApi`]; [`RawGl`] is the
//! implementation backed by the driver.
//!
//! The host's GL state is captured before drawing and restored afterwards
//! (see [`state`]), so the renderer can run in the middle of a foreign
//! rendering pipeline.

pub mod api;
pub mod atlas;
pub mod bytes;
pub mod device;
pub mod draw;
pub mod gl_backend;
pub mod glsl;
pub mod renderer;
pub mod state;

pub use api::GlApi;
pub use atlas::{FontAtlas, FontAtlasImage, OwnedFontAtlas};
pub use device::{AttribLocations, DeviceObjects};
pub use draw::{DrawBatch, DrawCommand, DrawIdx, DrawList, DrawVert};
pub use gl_backend::RawGl;
pub use glsl::{GlslVersion, ShaderVariant};
pub use renderer::{ortho_projection, scissor_rect, GlRenderer, RenderDevice};
pub use state::{BindingBackup, GlStateBackup};

pub use gl::types::GLuint;
