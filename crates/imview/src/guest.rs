//! Adapters from Dear ImGui types to the renderer's.

use imgui::internal::RawWrapper;
use imgui::{DrawCmd, DrawData, DrawList as GuestDrawList, TextureId};
use imview_gl::{DrawBatch, DrawCommand, DrawList, DrawVert, FontAtlas, FontAtlasImage, GLuint};

/// Lets the renderer build and upload a guest font atlas.
pub(crate) struct GuestFontAtlas<'a>(pub(crate) &'a mut imgui::FontAtlas);

impl FontAtlas for GuestFontAtlas<'_> {
    fn rgba32_image(&mut self) -> FontAtlasImage<'_> {
        let texture = self.0.build_rgba32_texture();
        FontAtlasImage {
            width: texture.width,
            height: texture.height,
            pixels: texture.data,
        }
    }

    fn set_texture_id(&mut self, texture: GLuint) {
        self.0.tex_id = TextureId::new(texture as usize);
    }
}

/// Copy a finished frame out of the guest context.
pub(crate) fn draw_batch(draw_data: &DrawData) -> DrawBatch {
    // An empty frame leaves the list array null.
    let lists = if draw_data.draw_lists_count() == 0 {
        Vec::new()
    } else {
        draw_data.draw_lists().map(draw_list).collect()
    };

    DrawBatch {
        display_pos: draw_data.display_pos,
        display_size: draw_data.display_size,
        framebuffer_scale: draw_data.framebuffer_scale,
        lists,
    }
}

fn draw_list(list: &GuestDrawList) -> DrawList {
    let vertices = list
        .vtx_buffer()
        .iter()
        .map(|v| DrawVert {
            pos: v.pos,
            uv: v.uv,
            col: v.col,
        })
        .collect();

    let commands = list
        .commands()
        .map(|command| match command {
            DrawCmd::Elements { count, cmd_params } => DrawCommand::Elements {
                count,
                clip_rect: cmd_params.clip_rect,
                texture: cmd_params.texture_id.id() as GLuint,
            },
            DrawCmd::ResetRenderState => DrawCommand::ResetRenderState,
            DrawCmd::RawCallback { callback, raw_cmd } => {
                // SAFETY: the batch is rendered before the guest context
                // starts its next frame, so both pointers still point into
                // the live draw data.
                let raw_list = unsafe { list.raw() } as *const _;
                DrawCommand::Callback(Box::new(move || unsafe { callback(raw_list, raw_cmd) }))
            }
        })
        .collect();

    DrawList {
        vertices,
        indices: list.idx_buffer().to_vec(),
        commands,
    }
}
