//! The per-frame draw batch handed from the GUI to the renderer.

use std::fmt;

use gl::types::GLuint;

/// Index type of every draw list.
pub type DrawIdx = u16;

/// One GUI vertex, laid out exactly as the vertex shaders read it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// RGBA, normalized to `0.0..=1.0` by the attribute pointer.
    pub col: [u8; 4],
}

impl DrawVert {
    pub const STRIDE: usize = std::mem::size_of::<DrawVert>();
    pub const POS_OFFSET: usize = std::mem::offset_of!(DrawVert, pos);
    pub const UV_OFFSET: usize = std::mem::offset_of!(DrawVert, uv);
    pub const COL_OFFSET: usize = std::mem::offset_of!(DrawVert, col);
}

pub enum DrawCommand {
    /// Draw `count` indices starting at the running index offset.
    Elements {
        count: usize,
        /// `[min_x, min_y, max_x, max_y]` in display coordinates.
        clip_rect: [f32; 4],
        texture: GLuint,
    },
    /// Re-apply the renderer's own GL setup.
    ResetRenderState,
    /// User code run in place of a draw.
    Callback(Box<dyn FnOnce()>),
}

impl fmt::Debug for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Elements {
                count,
                clip_rect,
                texture,
            } => f
                .debug_struct("Elements")
                .field("count", count)
                .field("clip_rect", clip_rect)
                .field("texture", texture)
                .finish(),
            DrawCommand::ResetRenderState => f.write_str("ResetRenderState"),
            DrawCommand::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[derive(Debug, Default)]
pub struct DrawList {
    pub vertices: Vec<DrawVert>,
    pub indices: Vec<DrawIdx>,
    pub commands: Vec<DrawCommand>,
}

/// All draw lists of one frame.
#[derive(Debug)]
pub struct DrawBatch {
    pub display_pos: [f32; 2],
    pub display_size: [f32; 2],
    /// Framebuffer pixels per display unit.
    pub framebuffer_scale: [f32; 2],
    pub lists: Vec<DrawList>,
}

impl Default for DrawBatch {
    fn default() -> Self {
        Self {
            display_pos: [0.0; 2],
            display_size: [0.0; 2],
            framebuffer_scale: [1.0; 2],
            lists: Vec::new(),
        }
    }
}

impl DrawBatch {
    /// Framebuffer size in pixels, truncated; `None` when either side is not
    /// positive.
    pub fn framebuffer_size(&self) -> Option<(i32, i32)> {
        let width = (self.display_size[0] * self.framebuffer_scale[0]) as i32;
        let height = (self.display_size[1] * self.framebuffer_scale[1]) as i32;
        (width > 0 && height > 0).then_some((width, height))
    }
}
