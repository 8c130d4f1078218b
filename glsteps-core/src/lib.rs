//! The GPU-independent half of glsteps. This crate contains everything the
//! demo stages describe about their scenes (geometry, camera matrices,
//! animation timing, texture and lighting parameters) as well as the stage
//! catalogue and user settings.

pub mod animation;
pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod settings;
pub mod texture;

/// Name of a vertex/fragment shader pair used by one or more stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderSet {
    Quad,
    Color,
    Texture,
    Lighting,
}

impl ShaderSet {
    /// The directory name the shader pair lives under.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ShaderSet::Quad => "quad",
            ShaderSet::Color => "color",
            ShaderSet::Texture => "texture",
            ShaderSet::Lighting => "lighting",
        }
    }
}

/// One step of the demo sequence. Every stage adds a single feature on top
/// of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Clear,
    Quad,
    ShadedQuad,
    AnimatedQuad,
    Cube,
    TexturedCube,
    LitCube,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Clear,
        Stage::Quad,
        Stage::ShadedQuad,
        Stage::AnimatedQuad,
        Stage::Cube,
        Stage::TexturedCube,
        Stage::LitCube,
    ];

    /// 1-based position in the sequence.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Clear => "clear",
            Stage::Quad => "quad",
            Stage::ShadedQuad => "shaded-quad",
            Stage::AnimatedQuad => "animated-quad",
            Stage::Cube => "cube",
            Stage::TexturedCube => "textured-cube",
            Stage::LitCube => "lit-cube",
        }
    }

    /// Short description of what the stage adds.
    pub fn summary(&self) -> &'static str {
        match self {
            Stage::Clear => "acquire a context and clear the canvas",
            Stage::Quad => "compile a shader program and draw a 2D quad",
            Stage::ShadedQuad => "interpolate per-vertex colors",
            Stage::AnimatedQuad => "rotate the quad every frame",
            Stage::Cube => "draw an indexed 3D cube with depth testing",
            Stage::TexturedCube => "map an image texture onto the cube",
            Stage::LitCube => "shade the cube with ambient and directional light",
        }
    }

    /// The shader pair the stage loads, `None` for the clear-only stage.
    pub fn shader_set(&self) -> Option<ShaderSet> {
        match self {
            Stage::Clear => None,
            Stage::Quad => Some(ShaderSet::Quad),
            Stage::ShadedQuad | Stage::AnimatedQuad | Stage::Cube => Some(ShaderSet::Color),
            Stage::TexturedCube => Some(ShaderSet::Texture),
            Stage::LitCube => Some(ShaderSet::Lighting),
        }
    }

    pub fn is_animated(&self) -> bool {
        *self >= Stage::AnimatedQuad
    }

    pub fn is_3d(&self) -> bool {
        *self >= Stage::Cube
    }

    pub fn uses_colors(&self) -> bool {
        matches!(self, Stage::ShadedQuad | Stage::AnimatedQuad | Stage::Cube)
    }

    pub fn uses_texture(&self) -> bool {
        *self >= Stage::TexturedCube
    }

    pub fn uses_lighting(&self) -> bool {
        *self == Stage::LitCube
    }

    /// The rotation axes applied to the model-view matrix.
    pub fn rotation_axes(&self) -> camera::RotationAxes {
        if self.is_3d() {
            camera::RotationAxes::Tumble
        } else if self.is_animated() {
            camera::RotationAxes::Z
        } else {
            camera::RotationAxes::None
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{}", self.number(), self.name())
    }
}

/// Error returned when a stage name or number is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage '{0}', expected a number 1-7 or one of: {names}", names = stage_names())]
pub struct UnknownStage(pub String);

fn stage_names() -> String {
    Stage::ALL
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::str::FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|i| Stage::ALL.get(i).copied())
                .ok_or_else(|| UnknownStage(s.to_string()));
        }
        // Accept the `NN-name` form printed by `Display` as well.
        let name = match trimmed.split_once('-') {
            Some((prefix, rest)) if prefix.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => trimmed,
        };
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}
