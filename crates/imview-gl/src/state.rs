//! Save / restore of the host's GL state around our own GL work.

use gl::types::{GLenum, GLint, GLuint};

use crate::api::GlApi;
use crate::glsl::GlslVersion;

/// Everything [`crate::GlRenderer::render_draw_data`] changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlStateBackup {
    pub active_texture: GLenum,
    pub program: GLuint,
    /// 2D texture bound on unit 0.
    pub texture: GLuint,
    /// Sampler bound on unit 0, when the context has sampler objects.
    pub sampler: Option<GLuint>,
    pub array_buffer: GLuint,
    pub vertex_array: GLuint,
    /// Front and back polygon mode, when the context has `glPolygonMode`.
    pub polygon_mode: Option<[GLint; 2]>,
    pub viewport: [GLint; 4],
    pub scissor_box: [GLint; 4],
    pub blend_src_rgb: GLenum,
    pub blend_dst_rgb: GLenum,
    pub blend_src_alpha: GLenum,
    pub blend_dst_alpha: GLenum,
    pub blend_equation_rgb: GLenum,
    pub blend_equation_alpha: GLenum,
    pub blend: bool,
    pub cull_face: bool,
    pub depth_test: bool,
    pub scissor_test: bool,
    /// `true` when `GL_CLIP_ORIGIN` is `GL_UPPER_LEFT`.
    pub clip_origin_upper_left: bool,
}

impl GlStateBackup {
    /// Read the current state.
    ///
    /// Leaves texture unit 0 active; [`GlStateBackup::restore`] puts the
    /// original unit back.
    pub fn capture(gl: &impl GlApi, version: GlslVersion) -> Self {
        let active_texture = gl.get_integer(gl::ACTIVE_TEXTURE) as GLenum;
        gl.active_texture(gl::TEXTURE0);

        let program = gl.get_integer(gl::CURRENT_PROGRAM) as GLuint;
        let texture = gl.get_integer(gl::TEXTURE_BINDING_2D) as GLuint;
        let sampler = version
            .has_sampler_binding()
            .then(|| gl.get_integer(gl::SAMPLER_BINDING) as GLuint);
        let array_buffer = gl.get_integer(gl::ARRAY_BUFFER_BINDING) as GLuint;
        let vertex_array = gl.get_integer(gl::VERTEX_ARRAY_BINDING) as GLuint;

        let polygon_mode = version.has_polygon_mode().then(|| {
            let mut mode = [0; 2];
            gl.get_integer_v(gl::POLYGON_MODE, &mut mode);
            mode
        });

        let mut viewport = [0; 4];
        gl.get_integer_v(gl::VIEWPORT, &mut viewport);
        let mut scissor_box = [0; 4];
        gl.get_integer_v(gl::SCISSOR_BOX, &mut scissor_box);

        let clip_origin_upper_left = version.has_clip_origin()
            && gl.get_integer(gl::CLIP_ORIGIN) as GLenum == gl::UPPER_LEFT;

        Self {
            active_texture,
            program,
            texture,
            sampler,
            array_buffer,
            vertex_array,
            polygon_mode,
            viewport,
            scissor_box,
            blend_src_rgb: gl.get_integer(gl::BLEND_SRC_RGB) as GLenum,
            blend_dst_rgb: gl.get_integer(gl::BLEND_DST_RGB) as GLenum,
            blend_src_alpha: gl.get_integer(gl::BLEND_SRC_ALPHA) as GLenum,
            blend_dst_alpha: gl.get_integer(gl::BLEND_DST_ALPHA) as GLenum,
            blend_equation_rgb: gl.get_integer(gl::BLEND_EQUATION_RGB) as GLenum,
            blend_equation_alpha: gl.get_integer(gl::BLEND_EQUATION_ALPHA) as GLenum,
            blend: gl.is_enabled(gl::BLEND),
            cull_face: gl.is_enabled(gl::CULL_FACE),
            depth_test: gl.is_enabled(gl::DEPTH_TEST),
            scissor_test: gl.is_enabled(gl::SCISSOR_TEST),
            clip_origin_upper_left,
        }
    }

    /// Put back every captured value.
    pub fn restore(&self, gl: &impl GlApi) {
        // Unit 0 is still active here, so bindings land where they were read.
        gl.bind_texture(gl::TEXTURE_2D, self.texture);
        if let Some(sampler) = self.sampler {
            gl.bind_sampler(0, sampler);
        }
        gl.active_texture(self.active_texture);

        gl.use_program(self.program);
        gl.bind_vertex_array(self.vertex_array);
        gl.bind_buffer(gl::ARRAY_BUFFER, self.array_buffer);

        gl.blend_equation_separate(self.blend_equation_rgb, self.blend_equation_alpha);
        gl.blend_func_separate(
            self.blend_src_rgb,
            self.blend_dst_rgb,
            self.blend_src_alpha,
            self.blend_dst_alpha,
        );
        gl.set_enabled(gl::BLEND, self.blend);
        gl.set_enabled(gl::CULL_FACE, self.cull_face);
        gl.set_enabled(gl::DEPTH_TEST, self.depth_test);
        gl.set_enabled(gl::SCISSOR_TEST, self.scissor_test);

        if let Some([front, _]) = self.polygon_mode {
            gl.polygon_mode(gl::FRONT_AND_BACK, front as GLenum);
        }

        let [x, y, w, h] = self.viewport;
        gl.viewport(x, y, w, h);
        let [x, y, w, h] = self.scissor_box;
        gl.scissor(x, y, w, h);
    }
}

/// The bindings device-object creation disturbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingBackup {
    pub texture: GLuint,
    pub array_buffer: GLuint,
    pub vertex_array: GLuint,
    pub unpack_row_length: Option<GLint>,
}

impl BindingBackup {
    pub fn capture(gl: &impl GlApi, version: GlslVersion) -> Self {
        Self {
            texture: gl.get_integer(gl::TEXTURE_BINDING_2D) as GLuint,
            array_buffer: gl.get_integer(gl::ARRAY_BUFFER_BINDING) as GLuint,
            vertex_array: gl.get_integer(gl::VERTEX_ARRAY_BINDING) as GLuint,
            unpack_row_length: has_unpack_row_length(version)
                .then(|| gl.get_integer(gl::UNPACK_ROW_LENGTH)),
        }
    }

    pub fn restore(&self, gl: &impl GlApi) {
        gl.bind_texture(gl::TEXTURE_2D, self.texture);
        gl.bind_buffer(gl::ARRAY_BUFFER, self.array_buffer);
        gl.bind_vertex_array(self.vertex_array);
        if let Some(row_length) = self.unpack_row_length {
            gl.pixel_store_i(gl::UNPACK_ROW_LENGTH, row_length);
        }
    }
}

/// `GL_UNPACK_ROW_LENGTH` is missing from ES 2.0 but present everywhere we
/// compile for.
pub(crate) fn has_unpack_row_length(version: GlslVersion) -> bool {
    !version.es || version.number >= 300
}
