//! Device objects: shader program, vertex/index buffers and the font texture.

use anyhow::{bail, Result};
use gl::types::{GLenum, GLint, GLsizei, GLuint};
use tracing::{debug, error, warn};

use crate::api::GlApi;
use crate::atlas::FontAtlas;
use crate::glsl::GlslVersion;
use crate::renderer::GlRenderer;
use crate::state::{has_unpack_row_length, BindingBackup};

/// Cached attribute and uniform locations; `-1` when inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLocations {
    pub texture: GLint,
    pub proj_mtx: GLint,
    pub position: GLint,
    pub uv: GLint,
    pub color: GLint,
}

impl Default for AttribLocations {
    fn default() -> Self {
        Self {
            texture: -1,
            proj_mtx: -1,
            position: -1,
            uv: -1,
            color: -1,
        }
    }
}

/// GL names owned by one renderer. `0` means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceObjects {
    pub program: GLuint,
    pub vertex_shader: GLuint,
    pub fragment_shader: GLuint,
    pub program_linked: bool,
    pub locations: AttribLocations,
    pub vertex_buffer: GLuint,
    pub index_buffer: GLuint,
    pub font_texture: GLuint,
}

impl DeviceObjects {
    /// No GL object is held.
    pub fn is_empty(&self) -> bool {
        self.program == 0
            && self.vertex_shader == 0
            && self.fragment_shader == 0
            && self.vertex_buffer == 0
            && self.index_buffer == 0
            && self.font_texture == 0
    }

    /// A linked program and both buffers exist.
    pub fn can_render(&self) -> bool {
        self.program != 0 && self.program_linked && self.vertex_buffer != 0 && self.index_buffer != 0
    }
}

fn check_shader(gl: &impl GlApi, shader: GLuint, stage: &str) -> Result<()> {
    if gl.shader_compiled(shader) {
        return Ok(());
    }
    bail!("failed to compile {stage} shader: {}", gl.shader_info_log(shader))
}

fn check_program(gl: &impl GlApi, program: GLuint, version: GlslVersion) -> Result<()> {
    if gl.program_linked(program) {
        return Ok(());
    }
    bail!(
        "failed to link shader program (GLSL {}): {}",
        version.number,
        gl.program_info_log(program)
    )
}

fn compile_stage(gl: &impl GlApi, kind: GLenum, header: &str, body: &str) -> (GLuint, Result<()>) {
    let shader = gl.create_shader(kind);
    gl.shader_source(shader, &[header, body]);
    gl.compile_shader(shader);
    let stage = if kind == gl::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let status = check_shader(gl, shader, stage);
    (shader, status)
}

impl<G: GlApi> GlRenderer<G> {
    /// Which GLSL the shaders are compiled for: the configured override, or
    /// what the driver reports.
    fn resolve_glsl_version(&self) -> GlslVersion {
        if let Some(number) = self.glsl_override {
            return GlslVersion::from_number(number);
        }
        GlslVersion::query(&self.gl).unwrap_or_else(|| {
            warn!("no GLSL version reported, assuming 130");
            GlslVersion::from_number(130)
        })
    }

    /// Compile the shaders, allocate the buffers and upload the font atlas.
    ///
    /// Shader failures are logged, not returned; the renderer then draws
    /// nothing until the objects are destroyed and created again.
    pub fn create_device_objects(&mut self, atlas: &mut dyn FontAtlas) {
        let version = self.resolve_glsl_version();
        self.version = version;

        let backup = BindingBackup::capture(&self.gl, version);

        let variant = version.variant();
        let header = version.header();
        debug!(glsl = version.number, es = version.es, ?variant, "creating device objects");

        let gl = &self.gl;
        let (vertex_shader, vs_status) =
            compile_stage(gl, gl::VERTEX_SHADER, &header, variant.vertex_source());
        let (fragment_shader, fs_status) =
            compile_stage(gl, gl::FRAGMENT_SHADER, &header, variant.fragment_source());
        for status in [vs_status, fs_status] {
            if let Err(err) = status {
                error!("{err:#}");
            }
        }

        let program = gl.create_program();
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);
        let program_linked = match check_program(gl, program, version) {
            Ok(()) => true,
            Err(err) => {
                error!("{err:#}");
                false
            }
        };

        let locations = AttribLocations {
            texture: gl.get_uniform_location(program, "Texture"),
            proj_mtx: gl.get_uniform_location(program, "ProjMtx"),
            position: gl.get_attrib_location(program, "Position"),
            uv: gl.get_attrib_location(program, "UV"),
            color: gl.get_attrib_location(program, "Color"),
        };

        self.objects.program = program;
        self.objects.vertex_shader = vertex_shader;
        self.objects.fragment_shader = fragment_shader;
        self.objects.program_linked = program_linked;
        self.objects.locations = locations;
        self.objects.vertex_buffer = gl.gen_buffer();
        self.objects.index_buffer = gl.gen_buffer();

        self.create_fonts_texture(atlas);

        backup.restore(&self.gl);
    }

    /// Upload the atlas bitmap as a linear-filtered RGBA texture and record
    /// its name in the atlas.
    pub fn create_fonts_texture(&mut self, atlas: &mut dyn FontAtlas) {
        if self.objects.font_texture != 0 {
            warn!(
                texture = self.objects.font_texture,
                "font texture already exists, the previous one is leaked"
            );
        }

        let gl = &self.gl;
        let previous = gl.get_integer(gl::TEXTURE_BINDING_2D) as GLuint;

        let texture = gl.gen_texture();
        gl.bind_texture(gl::TEXTURE_2D, texture);
        gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
        if has_unpack_row_length(self.version) {
            gl.pixel_store_i(gl::UNPACK_ROW_LENGTH, 0);
        }

        let image = atlas.rgba32_image();
        debug!(width = image.width, height = image.height, texture, "uploading font atlas");
        gl.tex_image_2d_rgba(image.width as GLsizei, image.height as GLsizei, image.pixels);

        self.objects.font_texture = texture;
        atlas.set_texture_id(texture);

        gl.bind_texture(gl::TEXTURE_2D, previous);
    }

    /// Delete every device object that exists. Safe to call repeatedly.
    pub fn destroy_device_objects(&mut self, atlas: &mut dyn FontAtlas) {
        let gl = &self.gl;
        let objects = &mut self.objects;

        if objects.vertex_buffer != 0 {
            gl.delete_buffer(objects.vertex_buffer);
            objects.vertex_buffer = 0;
        }
        if objects.index_buffer != 0 {
            gl.delete_buffer(objects.index_buffer);
            objects.index_buffer = 0;
        }

        for shader in [&mut objects.vertex_shader, &mut objects.fragment_shader] {
            if *shader == 0 {
                continue;
            }
            if objects.program != 0 {
                gl.detach_shader(objects.program, *shader);
            }
            gl.delete_shader(*shader);
            *shader = 0;
        }

        if objects.program != 0 {
            gl.delete_program(objects.program);
            objects.program = 0;
        }
        objects.program_linked = false;
        objects.locations = AttribLocations::default();

        self.destroy_fonts_texture(atlas);
    }

    pub fn destroy_fonts_texture(&mut self, atlas: &mut dyn FontAtlas) {
        if self.objects.font_texture == 0 {
            return;
        }
        self.gl.delete_texture(self.objects.font_texture);
        atlas.set_texture_id(0);
        self.objects.font_texture = 0;
    }
}
