//! The font atlas the renderer uploads as its one texture.

use gl::types::GLuint;

/// An RGBA32 bitmap, `width * height * 4` bytes, rows top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct FontAtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

/// A GUI library's font atlas, as the renderer sees it.
pub trait FontAtlas {
    /// Build (if needed) and return the RGBA32 bitmap.
    fn rgba32_image(&mut self) -> FontAtlasImage<'_>;

    /// Record the GL texture holding the atlas; `0` clears it.
    fn set_texture_id(&mut self, texture: GLuint);
}

/// An atlas with a fixed bitmap, for hosts that rasterize fonts themselves.
#[derive(Debug, Clone, Default)]
pub struct OwnedFontAtlas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub texture_id: GLuint,
}

impl OwnedFontAtlas {
    /// A `width` x `height` atlas filled with opaque white.
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xff; (width * height * 4) as usize],
            texture_id: 0,
        }
    }
}

impl FontAtlas for OwnedFontAtlas {
    fn rgba32_image(&mut self) -> FontAtlasImage<'_> {
        FontAtlasImage {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    fn set_texture_id(&mut self, texture: GLuint) {
        self.texture_id = texture;
    }
}
