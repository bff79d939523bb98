//! [`RawGl`]: the [`GlApi`] backed by the host's own OpenGL context.

use std::ffi::{c_void, CStr, CString};
use std::sync::Once;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

use crate::api::GlApi;

pub(crate) static GL_INIT_ONCE: Once = Once::new();

/// Forwards every call to the driver of whatever GL context is current.
#[derive(Debug)]
pub struct RawGl {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl RawGl {
    /// Load GL function pointers (exactly once per process, via `gl_loader`)
    /// and return a handle to call them.
    ///
    /// # Safety
    ///
    /// Every use of the returned value must happen on a thread where the host
    /// has made its OpenGL context current, i.e. inside the host's viewer
    /// draw and event callbacks. Calling it anywhere else is undefined
    /// behaviour.
    pub unsafe fn load() -> Self {
        GL_INIT_ONCE.call_once(|| {
            gl_loader::init_gl();
            gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        });

        Self {
            _not_send: std::marker::PhantomData,
        }
    }
}

fn c_name(name: &str) -> Option<CString> {
    CString::new(name).ok()
}

fn read_info_log(len: GLint, fill: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fill(len, &mut written, buf.as_mut_ptr().cast());
    buf.truncate(written.clamp(0, len) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

impl GlApi for RawGl {
    fn get_integer(&self, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetIntegerv(pname, &mut value) };
        value
    }

    fn get_integer_v(&self, pname: GLenum, out: &mut [GLint]) {
        unsafe { gl::GetIntegerv(pname, out.as_mut_ptr()) };
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        unsafe {
            let ptr = gl::GetString(name);
            if ptr.is_null() {
                return None;
            }
            Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
        }
    }

    fn is_enabled(&self, cap: GLenum) -> bool {
        unsafe { gl::IsEnabled(cap) == gl::TRUE }
    }

    fn enable(&self, cap: GLenum) {
        unsafe { gl::Enable(cap) };
    }

    fn disable(&self, cap: GLenum) {
        unsafe { gl::Disable(cap) };
    }

    fn active_texture(&self, unit: GLenum) {
        unsafe { gl::ActiveTexture(unit) };
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        unsafe { gl::BindTexture(target, texture) };
    }

    fn bind_sampler(&self, unit: GLuint, sampler: GLuint) {
        unsafe { gl::BindSampler(unit, sampler) };
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe { gl::BindBuffer(target, buffer) };
    }

    fn bind_vertex_array(&self, vertex_array: GLuint) {
        unsafe { gl::BindVertexArray(vertex_array) };
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }

    fn gen_texture(&self) -> GLuint {
        let mut texture = 0;
        unsafe { gl::GenTextures(1, &mut texture) };
        texture
    }

    fn delete_texture(&self, texture: GLuint) {
        unsafe { gl::DeleteTextures(1, &texture) };
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint) {
        unsafe { gl::TexParameteri(target, pname, param) };
    }

    fn pixel_store_i(&self, pname: GLenum, param: GLint) {
        unsafe { gl::PixelStorei(pname, param) };
    }

    fn tex_image_2d_rgba(&self, width: GLsizei, height: GLsizei, pixels: &[u8]) {
        debug_assert!(pixels.len() >= (width.max(0) * height.max(0) * 4) as usize);
        unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as GLint,
                width,
                height,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr().cast(),
            );
        }
    }

    fn gen_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
        unsafe {
            gl::BufferData(
                target,
                data.len() as gl::types::GLsizeiptr,
                data.as_ptr().cast(),
                usage,
            );
        }
    }

    fn gen_vertex_array(&self) -> GLuint {
        let mut vertex_array = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };
        vertex_array
    }

    fn delete_vertex_array(&self, vertex_array: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array) };
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        kind: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    ) {
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::VertexAttribPointer(index, size, kind, normalized, stride, offset as *const c_void)
        };
    }

    fn blend_equation(&self, mode: GLenum) {
        unsafe { gl::BlendEquation(mode) };
    }

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        unsafe { gl::BlendEquationSeparate(mode_rgb, mode_alpha) };
    }

    fn blend_func(&self, src: GLenum, dst: GLenum) {
        unsafe { gl::BlendFunc(src, dst) };
    }

    fn blend_func_separate(
        &self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) {
        unsafe { gl::BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha) };
    }

    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        unsafe { gl::PolygonMode(face, mode) };
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { gl::Scissor(x, y, width, height) };
    }

    fn create_shader(&self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let ptrs: Vec<*const GLchar> = sources.iter().map(|s| s.as_ptr().cast()).collect();
        let lens: Vec<GLint> = sources.iter().map(|s| s.len() as GLint).collect();
        unsafe {
            gl::ShaderSource(shader, sources.len() as GLsizei, ptrs.as_ptr(), lens.as_ptr());
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        let mut status = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |cap, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, cap, written, buf)
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_linked(&self, program: GLuint) -> bool {
        let mut status = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |cap, written, buf| unsafe {
            gl::GetProgramInfoLog(program, cap, written, buf)
        })
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        match c_name(name) {
            Some(name) => unsafe { gl::GetUniformLocation(program, name.as_ptr()) },
            None => -1,
        }
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        match c_name(name) {
            Some(name) => unsafe { gl::GetAttribLocation(program, name.as_ptr()) },
            None => -1,
        }
    }

    fn uniform_1i(&self, location: GLint, value: GLint) {
        unsafe { gl::Uniform1i(location, value) };
    }

    fn uniform_matrix_4fv(&self, location: GLint, matrix: &[[f32; 4]; 4]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr().cast()) };
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum, offset: usize) {
        unsafe { gl::DrawElements(mode, count, kind, offset as *const c_void) };
    }
}
