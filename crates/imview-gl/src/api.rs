//! The OpenGL entry points the render manager uses.

use gl::types::{GLenum, GLint, GLsizei, GLuint};

/// The subset of OpenGL the renderer calls, one method per GL function.
///
/// [`crate::RawGl`] forwards to the driver loaded from the host's context.
/// Other implementations can stand in for it where no driver is available.
///
/// Names of value `0` mean "no object", exactly as in GL.
pub trait GlApi {
    // -----------------------------------------------------------------------
    // State queries
    // -----------------------------------------------------------------------

    fn get_integer(&self, pname: GLenum) -> GLint;

    /// Multi-valued query (viewport, scissor box, polygon mode).
    fn get_integer_v(&self, pname: GLenum, out: &mut [GLint]);

    fn get_string(&self, name: GLenum) -> Option<String>;

    fn is_enabled(&self, cap: GLenum) -> bool;

    fn enable(&self, cap: GLenum);

    fn disable(&self, cap: GLenum);

    fn set_enabled(&self, cap: GLenum, enabled: bool) {
        if enabled {
            self.enable(cap);
        } else {
            self.disable(cap);
        }
    }

    // -----------------------------------------------------------------------
    // Bindings
    // -----------------------------------------------------------------------

    fn active_texture(&self, unit: GLenum);

    fn bind_texture(&self, target: GLenum, texture: GLuint);

    fn bind_sampler(&self, unit: GLuint, sampler: GLuint);

    fn bind_buffer(&self, target: GLenum, buffer: GLuint);

    fn bind_vertex_array(&self, vertex_array: GLuint);

    fn use_program(&self, program: GLuint);

    // -----------------------------------------------------------------------
    // Textures
    // -----------------------------------------------------------------------

    fn gen_texture(&self) -> GLuint;

    fn delete_texture(&self, texture: GLuint);

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint);

    fn pixel_store_i(&self, pname: GLenum, param: GLint);

    /// Upload tightly packed RGBA8 pixels to level 0 of the bound 2D texture.
    fn tex_image_2d_rgba(&self, width: GLsizei, height: GLsizei, pixels: &[u8]);

    // -----------------------------------------------------------------------
    // Buffers and vertex arrays
    // -----------------------------------------------------------------------

    fn gen_buffer(&self) -> GLuint;

    fn delete_buffer(&self, buffer: GLuint);

    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum);

    fn gen_vertex_array(&self) -> GLuint;

    fn delete_vertex_array(&self, vertex_array: GLuint);

    fn enable_vertex_attrib_array(&self, index: GLuint);

    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        kind: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    );

    // -----------------------------------------------------------------------
    // Fixed-function state
    // -----------------------------------------------------------------------

    fn blend_equation(&self, mode: GLenum);

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum);

    fn blend_func(&self, src: GLenum, dst: GLenum);

    fn blend_func_separate(
        &self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    );

    fn polygon_mode(&self, face: GLenum, mode: GLenum);

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    // -----------------------------------------------------------------------
    // Shaders and programs
    // -----------------------------------------------------------------------

    fn create_shader(&self, kind: GLenum) -> GLuint;

    /// Set the source of `shader` to the concatenation of `sources`.
    fn shader_source(&self, shader: GLuint, sources: &[&str]);

    fn compile_shader(&self, shader: GLuint);

    fn shader_compiled(&self, shader: GLuint) -> bool;

    fn shader_info_log(&self, shader: GLuint) -> String;

    fn delete_shader(&self, shader: GLuint);

    fn attach_shader(&self, program: GLuint, shader: GLuint);

    fn detach_shader(&self, program: GLuint, shader: GLuint);

    fn create_program(&self) -> GLuint;

    fn link_program(&self, program: GLuint);

    fn program_linked(&self, program: GLuint) -> bool;

    fn program_info_log(&self, program: GLuint) -> String;

    fn delete_program(&self, program: GLuint);

    /// `-1` when `name` is not an active uniform.
    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint;

    /// `-1` when `name` is not an active attribute.
    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint;

    fn uniform_1i(&self, location: GLint, value: GLint);

    fn uniform_matrix_4fv(&self, location: GLint, matrix: &[[f32; 4]; 4]);

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Indexed draw from the bound element buffer, `offset` in bytes.
    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum, offset: usize);
}
