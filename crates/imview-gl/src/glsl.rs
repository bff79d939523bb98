//! GLSL version detection and shader variant selection.

use crate::api::GlApi;

/// GLSL number reported by OpenGL ES 3.0 drivers.
pub const ES_MARKER_VERSION: u32 = 300;

/// A parsed `GL_SHADING_LANGUAGE_VERSION`, e.g. `460` for `"4.60 NVIDIA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlslVersion {
    pub number: u32,
    /// Reported by an OpenGL ES driver; the `#version` line needs ` es`.
    pub es: bool,
}

impl GlslVersion {
    /// A version given as a plain number, e.g. from configuration.
    pub fn from_number(number: u32) -> Self {
        Self {
            number,
            es: number == ES_MARKER_VERSION,
        }
    }

    /// Parse a driver version string.
    ///
    /// The first whitespace-separated token starting with a digit is read as
    /// `major.minor`; the minor part is normalised to two digits, so `"1.5"`
    /// reads as 150.
    pub fn parse(version: &str) -> Option<Self> {
        let token = version
            .split_whitespace()
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))?;

        let (major, rest) = token.split_once('.').unwrap_or((token, ""));
        let major: u32 = major.parse().ok()?;

        let minor_digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        let minor = match minor_digits.len() {
            0 => 0,
            1 => minor_digits.parse::<u32>().ok()? * 10,
            _ => minor_digits[..2].parse::<u32>().ok()?,
        };

        let es = version.split_whitespace().any(|t| t == "ES");

        Some(Self {
            number: major.checked_mul(100)?.checked_add(minor)?,
            es,
        })
    }

    /// Ask the current context.
    pub fn query(gl: &impl GlApi) -> Option<Self> {
        let reported = gl.get_string(gl::SHADING_LANGUAGE_VERSION)?;
        let parsed = Self::parse(&reported);
        if parsed.is_none() {
            tracing::warn!(reported, "unparseable GL_SHADING_LANGUAGE_VERSION");
        }
        parsed
    }

    /// The `#version` line prepended to every shader stage.
    pub fn header(&self) -> String {
        if self.es {
            format!("#version {} es\n", self.number)
        } else {
            format!("#version {}\n", self.number)
        }
    }

    pub fn variant(&self) -> ShaderVariant {
        ShaderVariant::select(self.number)
    }

    /// `GL_SAMPLER_BINDING` exists from GL 3.3 / ES 3.0.
    pub fn has_sampler_binding(&self) -> bool {
        self.number >= 330 || (self.es && self.number >= 300)
    }

    /// `glPolygonMode` does not exist on ES.
    pub fn has_polygon_mode(&self) -> bool {
        !self.es
    }

    /// `GL_CLIP_ORIGIN` exists from GL 4.5.
    pub fn has_clip_origin(&self) -> bool {
        !self.es && self.number >= 450
    }
}

/// The four embedded shader pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderVariant {
    /// GLSL 1.10/1.20, `attribute`/`varying`.
    Legacy120,
    /// GLSL 1.30 up to 4.00.
    Core130,
    /// GLSL ES 3.00.
    Es300,
    /// GLSL 4.10 and later, explicit attribute locations.
    Core410,
}

impl ShaderVariant {
    /// Pick the variant for a GLSL version number.
    ///
    /// Precedence: below 130 is legacy, 410 and above is core 410, exactly
    /// 300 is ES, everything else is core 130.
    pub fn select(version: u32) -> Self {
        if version < 130 {
            ShaderVariant::Legacy120
        } else if version >= 410 {
            ShaderVariant::Core410
        } else if version == ES_MARKER_VERSION {
            ShaderVariant::Es300
        } else {
            ShaderVariant::Core130
        }
    }

    pub fn vertex_source(self) -> &'static str {
        match self {
            ShaderVariant::Legacy120 => VERTEX_SHADER_GLSL_120,
            ShaderVariant::Core130 => VERTEX_SHADER_GLSL_130,
            ShaderVariant::Es300 => VERTEX_SHADER_GLSL_300_ES,
            ShaderVariant::Core410 => VERTEX_SHADER_GLSL_410_CORE,
        }
    }

    pub fn fragment_source(self) -> &'static str {
        match self {
            ShaderVariant::Legacy120 => FRAGMENT_SHADER_GLSL_120,
            ShaderVariant::Core130 => FRAGMENT_SHADER_GLSL_130,
            ShaderVariant::Es300 => FRAGMENT_SHADER_GLSL_300_ES,
            ShaderVariant::Core410 => FRAGMENT_SHADER_GLSL_410_CORE,
        }
    }
}

const VERTEX_SHADER_GLSL_120: &str = "\
uniform mat4 ProjMtx;
attribute vec2 Position;
attribute vec2 UV;
attribute vec4 Color;
varying vec2 Frag_UV;
varying vec4 Frag_Color;
void main()
{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy,0,1);
}
";

const VERTEX_SHADER_GLSL_130: &str = "\
uniform mat4 ProjMtx;
in vec2 Position;
in vec2 UV;
in vec4 Color;
out vec2 Frag_UV;
out vec4 Frag_Color;
void main()
{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy,0,1);
}
";

const VERTEX_SHADER_GLSL_300_ES: &str = "\
precision mediump float;
layout (location = 0) in vec2 Position;
layout (location = 1) in vec2 UV;
layout (location = 2) in vec4 Color;
uniform mat4 ProjMtx;
out vec2 Frag_UV;
out vec4 Frag_Color;
void main()
{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy,0,1);
}
";

const VERTEX_SHADER_GLSL_410_CORE: &str = "\
layout (location = 0) in vec2 Position;
layout (location = 1) in vec2 UV;
layout (location = 2) in vec4 Color;
uniform mat4 ProjMtx;
out vec2 Frag_UV;
out vec4 Frag_Color;
void main()
{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy,0,1);
}
";

const FRAGMENT_SHADER_GLSL_120: &str = "\
#ifdef GL_ES
    precision mediump float;
#endif
uniform sampler2D Texture;
varying vec2 Frag_UV;
varying vec4 Frag_Color;
void main()
{
    gl_FragColor = Frag_Color * texture2D(Texture, Frag_UV.st);
}
";

const FRAGMENT_SHADER_GLSL_130: &str = "\
uniform sampler2D Texture;
in vec2 Frag_UV;
in vec4 Frag_Color;
out vec4 Out_Color;
void main()
{
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
";

const FRAGMENT_SHADER_GLSL_300_ES: &str = "\
precision mediump float;
uniform sampler2D Texture;
in vec2 Frag_UV;
in vec4 Frag_Color;
layout (location = 0) out vec4 Out_Color;
void main()
{
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
";

const FRAGMENT_SHADER_GLSL_410_CORE: &str = "\
in vec2 Frag_UV;
in vec4 Frag_Color;
uniform sampler2D Texture;
layout (location = 0) out vec4 Out_Color;
void main()
{
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
";
