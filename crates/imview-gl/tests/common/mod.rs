#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use gl::types::{GLenum, GLint, GLsizei, GLuint};
use imview_gl::{DrawBatch, DrawCommand, DrawList, DrawVert, GlApi, GlRenderer, OwnedFontAtlas};

/// Host-visible GL state. Two snapshots compare equal when a host could not
/// tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlSnapshot {
    pub active_texture: GLenum,
    /// 2D texture per texture unit.
    pub textures: BTreeMap<GLenum, GLuint>,
    /// Sampler per texture unit index.
    pub samplers: BTreeMap<GLuint, GLuint>,
    pub program: GLuint,
    pub array_buffer: GLuint,
    pub vertex_array: GLuint,
    /// Element buffer recorded in each vertex array.
    pub element_buffers: BTreeMap<GLuint, GLuint>,
    pub polygon_mode: GLenum,
    pub viewport: [GLint; 4],
    pub scissor_box: [GLint; 4],
    pub blend_src_rgb: GLenum,
    pub blend_dst_rgb: GLenum,
    pub blend_src_alpha: GLenum,
    pub blend_dst_alpha: GLenum,
    pub blend_equation_rgb: GLenum,
    pub blend_equation_alpha: GLenum,
    pub enabled: BTreeSet<GLenum>,
    pub unpack_row_length: GLint,
}

impl Default for GlSnapshot {
    fn default() -> Self {
        Self {
            active_texture: gl::TEXTURE0,
            textures: BTreeMap::new(),
            samplers: BTreeMap::new(),
            program: 0,
            array_buffer: 0,
            vertex_array: 0,
            element_buffers: BTreeMap::new(),
            polygon_mode: gl::FILL,
            viewport: [0, 0, 640, 480],
            scissor_box: [0, 0, 640, 480],
            blend_src_rgb: gl::ONE,
            blend_dst_rgb: gl::ZERO,
            blend_src_alpha: gl::ONE,
            blend_dst_alpha: gl::ZERO,
            blend_equation_rgb: gl::FUNC_ADD,
            blend_equation_alpha: gl::FUNC_ADD,
            enabled: BTreeSet::new(),
            unpack_row_length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub count: GLsizei,
    pub offset: usize,
    pub texture: GLuint,
    pub scissor: [GLint; 4],
    pub viewport: [GLint; 4],
}

#[derive(Debug, Default)]
pub struct Objects {
    pub textures: BTreeSet<GLuint>,
    pub buffers: BTreeSet<GLuint>,
    pub vertex_arrays: BTreeSet<GLuint>,
    pub shaders: BTreeSet<GLuint>,
    pub programs: BTreeSet<GLuint>,
    pub attached: BTreeSet<(GLuint, GLuint)>,
    pub shader_sources: BTreeMap<GLuint, String>,
}

/// A GL that only tracks state, for tests that have no driver.
#[derive(Debug)]
pub struct FakeGl {
    pub state: RefCell<GlSnapshot>,
    pub objects: RefCell<Objects>,
    pub calls: RefCell<Vec<&'static str>>,
    pub draws: RefCell<Vec<RecordedDraw>>,
    pub uploads: RefCell<Vec<(GLenum, usize)>>,
    pub shading_language_version: Option<String>,
    pub clip_origin: GLenum,
    pub fail_compile: Cell<bool>,
    pub fail_link: Cell<bool>,
    next_name: Cell<GLuint>,
}

impl FakeGl {
    pub fn new(version: &str) -> Self {
        Self {
            state: RefCell::new(GlSnapshot::default()),
            objects: RefCell::new(Objects::default()),
            calls: RefCell::new(Vec::new()),
            draws: RefCell::new(Vec::new()),
            uploads: RefCell::new(Vec::new()),
            shading_language_version: Some(version.to_owned()),
            clip_origin: gl::LOWER_LEFT,
            fail_compile: Cell::new(false),
            fail_link: Cell::new(false),
            next_name: Cell::new(100),
        }
    }

    pub fn snapshot(&self) -> GlSnapshot {
        self.state.borrow().clone()
    }

    pub fn set_snapshot(&self, snapshot: GlSnapshot) {
        *self.state.borrow_mut() = snapshot;
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn clear_log(&self) {
        self.calls.borrow_mut().clear();
        self.draws.borrow_mut().clear();
        self.uploads.borrow_mut().clear();
    }

    pub fn called(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    /// Objects still alive, of every kind.
    pub fn live_objects(&self) -> usize {
        let objects = self.objects.borrow();
        objects.textures.len()
            + objects.buffers.len()
            + objects.vertex_arrays.len()
            + objects.shaders.len()
            + objects.programs.len()
    }

    fn log(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }

    fn gen_name(&self) -> GLuint {
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        name
    }
}

impl GlApi for FakeGl {
    fn get_integer(&self, pname: GLenum) -> GLint {
        self.log("get_integer");
        let s = self.state.borrow();
        let value = match pname {
            gl::ACTIVE_TEXTURE => s.active_texture,
            gl::CURRENT_PROGRAM => s.program,
            gl::TEXTURE_BINDING_2D => s.textures.get(&s.active_texture).copied().unwrap_or(0),
            gl::SAMPLER_BINDING => s
                .samplers
                .get(&(s.active_texture - gl::TEXTURE0))
                .copied()
                .unwrap_or(0),
            gl::ARRAY_BUFFER_BINDING => s.array_buffer,
            gl::VERTEX_ARRAY_BINDING => s.vertex_array,
            gl::ELEMENT_ARRAY_BUFFER_BINDING => {
                s.element_buffers.get(&s.vertex_array).copied().unwrap_or(0)
            }
            gl::BLEND_SRC_RGB => s.blend_src_rgb,
            gl::BLEND_DST_RGB => s.blend_dst_rgb,
            gl::BLEND_SRC_ALPHA => s.blend_src_alpha,
            gl::BLEND_DST_ALPHA => s.blend_dst_alpha,
            gl::BLEND_EQUATION_RGB => s.blend_equation_rgb,
            gl::BLEND_EQUATION_ALPHA => s.blend_equation_alpha,
            gl::UNPACK_ROW_LENGTH => return s.unpack_row_length,
            gl::CLIP_ORIGIN => self.clip_origin,
            other => panic!("unexpected glGetIntegerv({other:#x})"),
        };
        value as GLint
    }

    fn get_integer_v(&self, pname: GLenum, out: &mut [GLint]) {
        self.log("get_integer_v");
        let s = self.state.borrow();
        match pname {
            gl::VIEWPORT => out.copy_from_slice(&s.viewport),
            gl::SCISSOR_BOX => out.copy_from_slice(&s.scissor_box),
            gl::POLYGON_MODE => out.fill(s.polygon_mode as GLint),
            other => panic!("unexpected glGetIntegerv({other:#x})"),
        }
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        self.log("get_string");
        assert_eq!(name, gl::SHADING_LANGUAGE_VERSION);
        self.shading_language_version.clone()
    }

    fn is_enabled(&self, cap: GLenum) -> bool {
        self.log("is_enabled");
        self.state.borrow().enabled.contains(&cap)
    }

    fn enable(&self, cap: GLenum) {
        self.log("enable");
        self.state.borrow_mut().enabled.insert(cap);
    }

    fn disable(&self, cap: GLenum) {
        self.log("disable");
        self.state.borrow_mut().enabled.remove(&cap);
    }

    fn active_texture(&self, unit: GLenum) {
        self.log("active_texture");
        self.state.borrow_mut().active_texture = unit;
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.log("bind_texture");
        assert_eq!(target, gl::TEXTURE_2D);
        let mut s = self.state.borrow_mut();
        let unit = s.active_texture;
        if texture == 0 {
            s.textures.remove(&unit);
        } else {
            s.textures.insert(unit, texture);
        }
    }

    fn bind_sampler(&self, unit: GLuint, sampler: GLuint) {
        self.log("bind_sampler");
        let mut s = self.state.borrow_mut();
        if sampler == 0 {
            s.samplers.remove(&unit);
        } else {
            s.samplers.insert(unit, sampler);
        }
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.log("bind_buffer");
        let mut s = self.state.borrow_mut();
        match target {
            gl::ARRAY_BUFFER => s.array_buffer = buffer,
            gl::ELEMENT_ARRAY_BUFFER => {
                let vertex_array = s.vertex_array;
                if buffer == 0 {
                    s.element_buffers.remove(&vertex_array);
                } else {
                    s.element_buffers.insert(vertex_array, buffer);
                }
            }
            other => panic!("unexpected buffer target {other:#x}"),
        }
    }

    fn bind_vertex_array(&self, vertex_array: GLuint) {
        self.log("bind_vertex_array");
        self.state.borrow_mut().vertex_array = vertex_array;
    }

    fn use_program(&self, program: GLuint) {
        self.log("use_program");
        self.state.borrow_mut().program = program;
    }

    fn gen_texture(&self) -> GLuint {
        self.log("gen_texture");
        let name = self.gen_name();
        self.objects.borrow_mut().textures.insert(name);
        name
    }

    fn delete_texture(&self, texture: GLuint) {
        self.log("delete_texture");
        assert!(self.objects.borrow_mut().textures.remove(&texture), "double delete");
    }

    fn tex_parameter_i(&self, _target: GLenum, _pname: GLenum, _param: GLint) {
        self.log("tex_parameter_i");
    }

    fn pixel_store_i(&self, pname: GLenum, param: GLint) {
        self.log("pixel_store_i");
        assert_eq!(pname, gl::UNPACK_ROW_LENGTH);
        self.state.borrow_mut().unpack_row_length = param;
    }

    fn tex_image_2d_rgba(&self, width: GLsizei, height: GLsizei, pixels: &[u8]) {
        self.log("tex_image_2d");
        assert_eq!(pixels.len(), (width * height * 4) as usize);
    }

    fn gen_buffer(&self) -> GLuint {
        self.log("gen_buffer");
        let name = self.gen_name();
        self.objects.borrow_mut().buffers.insert(name);
        name
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.log("delete_buffer");
        assert!(self.objects.borrow_mut().buffers.remove(&buffer), "double delete");
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
        self.log("buffer_data");
        assert_eq!(usage, gl::STREAM_DRAW);
        self.uploads.borrow_mut().push((target, data.len()));
    }

    fn gen_vertex_array(&self) -> GLuint {
        self.log("gen_vertex_array");
        let name = self.gen_name();
        self.objects.borrow_mut().vertex_arrays.insert(name);
        name
    }

    fn delete_vertex_array(&self, vertex_array: GLuint) {
        self.log("delete_vertex_array");
        assert!(self.objects.borrow_mut().vertex_arrays.remove(&vertex_array));
        let mut s = self.state.borrow_mut();
        s.element_buffers.remove(&vertex_array);
        if s.vertex_array == vertex_array {
            s.vertex_array = 0;
        }
    }

    fn enable_vertex_attrib_array(&self, _index: GLuint) {
        self.log("enable_vertex_attrib_array");
    }

    fn vertex_attrib_pointer(
        &self,
        _index: GLuint,
        _size: GLint,
        _kind: GLenum,
        _normalized: bool,
        stride: GLsizei,
        _offset: usize,
    ) {
        self.log("vertex_attrib_pointer");
        assert_eq!(stride as usize, std::mem::size_of::<DrawVert>());
    }

    fn blend_equation(&self, mode: GLenum) {
        self.log("blend_equation");
        let mut s = self.state.borrow_mut();
        s.blend_equation_rgb = mode;
        s.blend_equation_alpha = mode;
    }

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        self.log("blend_equation_separate");
        let mut s = self.state.borrow_mut();
        s.blend_equation_rgb = mode_rgb;
        s.blend_equation_alpha = mode_alpha;
    }

    fn blend_func(&self, src: GLenum, dst: GLenum) {
        self.log("blend_func");
        let mut s = self.state.borrow_mut();
        s.blend_src_rgb = src;
        s.blend_src_alpha = src;
        s.blend_dst_rgb = dst;
        s.blend_dst_alpha = dst;
    }

    fn blend_func_separate(
        &self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) {
        self.log("blend_func_separate");
        let mut s = self.state.borrow_mut();
        s.blend_src_rgb = src_rgb;
        s.blend_dst_rgb = dst_rgb;
        s.blend_src_alpha = src_alpha;
        s.blend_dst_alpha = dst_alpha;
    }

    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        self.log("polygon_mode");
        assert_eq!(face, gl::FRONT_AND_BACK);
        self.state.borrow_mut().polygon_mode = mode;
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.log("viewport");
        self.state.borrow_mut().viewport = [x, y, width, height];
    }

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.log("scissor");
        self.state.borrow_mut().scissor_box = [x, y, width, height];
    }

    fn create_shader(&self, _kind: GLenum) -> GLuint {
        self.log("create_shader");
        let name = self.gen_name();
        self.objects.borrow_mut().shaders.insert(name);
        name
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        self.log("shader_source");
        self.objects
            .borrow_mut()
            .shader_sources
            .insert(shader, sources.concat());
    }

    fn compile_shader(&self, _shader: GLuint) {
        self.log("compile_shader");
    }

    fn shader_compiled(&self, _shader: GLuint) -> bool {
        !self.fail_compile.get()
    }

    fn shader_info_log(&self, _shader: GLuint) -> String {
        "0:1(10): error: GLSL 9.99 is not supported".to_owned()
    }

    fn delete_shader(&self, shader: GLuint) {
        self.log("delete_shader");
        let mut objects = self.objects.borrow_mut();
        assert!(
            !objects.attached.iter().any(|(_, s)| *s == shader),
            "shader deleted while attached"
        );
        assert!(objects.shaders.remove(&shader), "double delete");
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.log("attach_shader");
        self.objects.borrow_mut().attached.insert((program, shader));
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.log("detach_shader");
        self.objects.borrow_mut().attached.remove(&(program, shader));
    }

    fn create_program(&self) -> GLuint {
        self.log("create_program");
        let name = self.gen_name();
        self.objects.borrow_mut().programs.insert(name);
        name
    }

    fn link_program(&self, _program: GLuint) {
        self.log("link_program");
    }

    fn program_linked(&self, _program: GLuint) -> bool {
        !self.fail_link.get() && !self.fail_compile.get()
    }

    fn program_info_log(&self, _program: GLuint) -> String {
        "error: linking with uncompiled shader".to_owned()
    }

    fn delete_program(&self, program: GLuint) {
        self.log("delete_program");
        assert!(self.objects.borrow_mut().programs.remove(&program), "double delete");
    }

    fn get_uniform_location(&self, _program: GLuint, name: &str) -> GLint {
        match name {
            "Texture" => 0,
            "ProjMtx" => 1,
            _ => -1,
        }
    }

    fn get_attrib_location(&self, _program: GLuint, name: &str) -> GLint {
        match name {
            "Position" => 0,
            "UV" => 1,
            "Color" => 2,
            _ => -1,
        }
    }

    fn uniform_1i(&self, _location: GLint, _value: GLint) {
        self.log("uniform_1i");
    }

    fn uniform_matrix_4fv(&self, _location: GLint, _matrix: &[[f32; 4]; 4]) {
        self.log("uniform_matrix_4fv");
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum, offset: usize) {
        self.log("draw_elements");
        assert_eq!(mode, gl::TRIANGLES);
        assert_eq!(kind, gl::UNSIGNED_SHORT);
        let s = self.state.borrow();
        self.draws.borrow_mut().push(RecordedDraw {
            count,
            offset,
            texture: s.textures.get(&s.active_texture).copied().unwrap_or(0),
            scissor: s.scissor_box,
            viewport: s.viewport,
        });
    }
}

/// A renderer on a fake GL reporting `version`, with device objects created.
pub fn ready_renderer(version: &str) -> (GlRenderer<FakeGl>, OwnedFontAtlas) {
    let mut renderer = GlRenderer::new(FakeGl::new(version));
    let mut atlas = OwnedFontAtlas::solid(8, 4);
    renderer.create_device_objects(&mut atlas);
    renderer.gl().clear_log();
    (renderer, atlas)
}

/// One quad (two triangles) per clip rectangle, all on `texture`.
pub fn quads_list(clip_rects: &[[f32; 4]], texture: GLuint) -> DrawList {
    let mut list = DrawList::default();
    for rect in clip_rects {
        let base = list.vertices.len() as u16;
        for (x, y) in [(rect[0], rect[1]), (rect[2], rect[1]), (rect[2], rect[3]), (rect[0], rect[3])] {
            list.vertices.push(DrawVert {
                pos: [x, y],
                uv: [0.0, 0.0],
                col: [255, 255, 255, 255],
            });
        }
        list.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        list.commands.push(DrawCommand::Elements {
            count: 6,
            clip_rect: *rect,
            texture,
        });
    }
    list
}

pub fn batch(display_size: [f32; 2], scale: [f32; 2], lists: Vec<DrawList>) -> DrawBatch {
    DrawBatch {
        display_pos: [0.0, 0.0],
        display_size,
        framebuffer_scale: scale,
        lists,
    }
}
