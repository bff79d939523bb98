//! [`GlRenderer`]: draws GUI batches into the host's GL context.

use gl::types::{GLint, GLsizei, GLuint};
use imview_core::BridgeConfig;
use tracing::trace;

use crate::api::GlApi;
use crate::atlas::FontAtlas;
use crate::bytes::slice_as_bytes;
use crate::device::DeviceObjects;
use crate::draw::{DrawBatch, DrawCommand, DrawIdx, DrawVert};
use crate::gl_backend::RawGl;
use crate::glsl::GlslVersion;
use crate::state::GlStateBackup;

/// What the GUI bridge needs from a renderer.
pub trait RenderDevice {
    /// Whether the font atlas has been uploaded; device objects are created
    /// lazily when it has not.
    fn has_fonts_texture(&self) -> bool;

    fn create_device_objects(&mut self, atlas: &mut dyn FontAtlas);

    fn destroy_device_objects(&mut self, atlas: &mut dyn FontAtlas);

    /// Draw one frame's batch, leaving the host's GL state as it was.
    fn render_draw_data(&mut self, batch: DrawBatch);
}

/// OpenGL 2/3/4 and ES 3 renderer for GUI draw batches.
#[derive(Debug)]
pub struct GlRenderer<G: GlApi> {
    pub(crate) gl: G,
    pub(crate) glsl_override: Option<u32>,
    /// Fixed when device objects are created.
    pub(crate) version: GlslVersion,
    pub(crate) objects: DeviceObjects,
}

impl GlRenderer<RawGl> {
    /// A renderer for the GL context the host has current.
    ///
    /// # Safety
    ///
    /// See [`RawGl::load`]: the renderer must only be used while the host's
    /// context is current on the calling thread.
    pub unsafe fn from_host_context(config: &BridgeConfig) -> Self {
        GlRenderer::new(RawGl::load()).with_glsl_override(config.glsl_version_override)
    }
}

impl<G: GlApi> GlRenderer<G> {
    pub fn new(gl: G) -> Self {
        Self {
            gl,
            glsl_override: None,
            version: GlslVersion::from_number(130),
            objects: DeviceObjects::default(),
        }
    }

    /// Compile for `version` instead of what the driver reports.
    pub fn with_glsl_override(mut self, version: Option<u32>) -> Self {
        self.glsl_override = version;
        self
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn objects(&self) -> &DeviceObjects {
        &self.objects
    }

    pub fn glsl_version(&self) -> GlslVersion {
        self.version
    }

    fn setup_render_state(
        &self,
        display_pos: [f32; 2],
        display_size: [f32; 2],
        (fb_width, fb_height): (i32, i32),
        vertex_array: GLuint,
    ) {
        let gl = &self.gl;
        let objects = &self.objects;

        gl.enable(gl::BLEND);
        gl.blend_equation(gl::FUNC_ADD);
        gl.blend_func(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        gl.disable(gl::CULL_FACE);
        gl.disable(gl::DEPTH_TEST);
        gl.enable(gl::SCISSOR_TEST);
        if self.version.has_polygon_mode() {
            gl.polygon_mode(gl::FRONT_AND_BACK, gl::FILL);
        }

        gl.viewport(0, 0, fb_width, fb_height);
        let projection = ortho_projection(display_pos, display_size);

        gl.use_program(objects.program);
        gl.uniform_1i(objects.locations.texture, 0);
        gl.uniform_matrix_4fv(objects.locations.proj_mtx, &projection);
        if self.version.has_sampler_binding() {
            gl.bind_sampler(0, 0);
        }

        gl.bind_vertex_array(vertex_array);
        gl.bind_buffer(gl::ARRAY_BUFFER, objects.vertex_buffer);
        gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, objects.index_buffer);

        let stride = DrawVert::STRIDE as GLsizei;
        let attributes = [
            (objects.locations.position, 2, gl::FLOAT, false, DrawVert::POS_OFFSET),
            (objects.locations.uv, 2, gl::FLOAT, false, DrawVert::UV_OFFSET),
            (objects.locations.color, 4, gl::UNSIGNED_BYTE, true, DrawVert::COL_OFFSET),
        ];
        for (location, size, kind, normalized, offset) in attributes {
            if location < 0 {
                continue;
            }
            gl.enable_vertex_attrib_array(location as GLuint);
            gl.vertex_attrib_pointer(location as GLuint, size, kind, normalized, stride, offset);
        }
    }

    /// Draw `batch` and restore every piece of GL state it touched.
    ///
    /// Does nothing (not a single GL call) when the framebuffer would be
    /// empty. When the program is missing or failed to link only the
    /// batch's callbacks run.
    pub fn render_draw_data(&mut self, batch: DrawBatch) {
        let Some((fb_width, fb_height)) = batch.framebuffer_size() else {
            return;
        };
        if !self.objects.can_render() {
            trace!("device objects not ready, running callbacks only");
            run_callbacks(batch);
            return;
        }

        let DrawBatch {
            display_pos,
            display_size,
            framebuffer_scale,
            lists,
        } = batch;
        let framebuffer = (fb_width, fb_height);

        let gl = &self.gl;
        let backup = GlStateBackup::capture(gl, self.version);

        let vertex_array = gl.gen_vertex_array();
        self.setup_render_state(display_pos, display_size, framebuffer, vertex_array);

        for list in lists {
            gl.buffer_data(gl::ARRAY_BUFFER, slice_as_bytes(&list.vertices), gl::STREAM_DRAW);
            gl.buffer_data(gl::ELEMENT_ARRAY_BUFFER, slice_as_bytes(&list.indices), gl::STREAM_DRAW);

            let mut index_offset = 0usize;
            for command in list.commands {
                match command {
                    DrawCommand::Elements {
                        count,
                        clip_rect,
                        texture,
                    } => {
                        if let Some([x, y, w, h]) = scissor_rect(
                            clip_rect,
                            display_pos,
                            framebuffer_scale,
                            framebuffer,
                            backup.clip_origin_upper_left,
                        ) {
                            gl.scissor(x, y, w, h);
                            gl.bind_texture(gl::TEXTURE_2D, texture);
                            gl.draw_elements(
                                gl::TRIANGLES,
                                count as GLsizei,
                                gl::UNSIGNED_SHORT,
                                index_offset * std::mem::size_of::<DrawIdx>(),
                            );
                        }
                        index_offset += count;
                    }
                    DrawCommand::ResetRenderState => {
                        self.setup_render_state(display_pos, display_size, framebuffer, vertex_array);
                    }
                    DrawCommand::Callback(callback) => callback(),
                }
            }
        }

        gl.delete_vertex_array(vertex_array);
        backup.restore(gl);
    }
}

impl<G: GlApi> RenderDevice for GlRenderer<G> {
    fn has_fonts_texture(&self) -> bool {
        self.objects.font_texture != 0
    }

    fn create_device_objects(&mut self, atlas: &mut dyn FontAtlas) {
        GlRenderer::create_device_objects(self, atlas);
    }

    fn destroy_device_objects(&mut self, atlas: &mut dyn FontAtlas) {
        GlRenderer::destroy_device_objects(self, atlas);
    }

    fn render_draw_data(&mut self, batch: DrawBatch) {
        GlRenderer::render_draw_data(self, batch);
    }
}

fn run_callbacks(batch: DrawBatch) {
    for command in batch.lists.into_iter().flat_map(|list| list.commands) {
        if let DrawCommand::Callback(callback) = command {
            callback();
        }
    }
}

/// Orthographic projection mapping the display rectangle to clip space, top
/// edge up. Column-major, as `glUniformMatrix4fv` expects.
pub fn ortho_projection(display_pos: [f32; 2], display_size: [f32; 2]) -> [[f32; 4]; 4] {
    let left = display_pos[0];
    let right = display_pos[0] + display_size[0];
    let top = display_pos[1];
    let bottom = display_pos[1] + display_size[1];
    [
        [2.0 / (right - left), 0.0, 0.0, 0.0],
        [0.0, 2.0 / (top - bottom), 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [(right + left) / (left - right), (top + bottom) / (bottom - top), 0.0, 1.0],
    ]
}

/// Project a display-space clip rectangle into a framebuffer scissor box
/// `[x, y, width, height]`, or `None` when it lies entirely outside.
///
/// With the default lower-left clip origin the box is flipped vertically.
pub fn scissor_rect(
    clip_rect: [f32; 4],
    clip_offset: [f32; 2],
    clip_scale: [f32; 2],
    framebuffer: (i32, i32),
    upper_left_origin: bool,
) -> Option<[GLint; 4]> {
    let (fb_width, fb_height) = framebuffer;
    let x = (clip_rect[0] - clip_offset[0]) * clip_scale[0];
    let y = (clip_rect[1] - clip_offset[1]) * clip_scale[1];
    let z = (clip_rect[2] - clip_offset[0]) * clip_scale[0];
    let w = (clip_rect[3] - clip_offset[1]) * clip_scale[1];

    if x >= fb_width as f32 || y >= fb_height as f32 || z < 0.0 || w < 0.0 {
        return None;
    }

    let width = (z - x) as GLint;
    let height = (w - y) as GLint;
    if upper_left_origin {
        Some([x as GLint, y as GLint, width, height])
    } else {
        Some([x as GLint, (fb_height as f32 - w) as GLint, width, height])
    }
}
