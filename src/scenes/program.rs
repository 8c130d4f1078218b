//! A linked shader program together with the attribute locations a stage
//! feeds it.

use std::sync::Arc;

use glsteps_core::Stage;

use crate::{abs::ShaderProgram, error::Error, shaders::ShaderSources};

pub const POSITION_ATTRIB: &str = "aVertexPosition";
pub const COLOR_ATTRIB: &str = "aVertexColor";
pub const TEXTURE_COORD_ATTRIB: &str = "aTextureCoord";
pub const NORMAL_ATTRIB: &str = "aVertexNormal";

pub const PROJECTION_UNIFORM: &str = "uProjectionMatrix";
pub const MODEL_VIEW_UNIFORM: &str = "uModelViewMatrix";
pub const NORMAL_MATRIX_UNIFORM: &str = "uNormalMatrix";
pub const SAMPLER_UNIFORM: &str = "uSampler";
pub const AMBIENT_UNIFORM: &str = "uAmbientLight";
pub const LIGHT_COLOR_UNIFORM: &str = "uDirectionalLightColor";
pub const LIGHT_DIRECTION_UNIFORM: &str = "uLightDirection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLocations {
    pub position: u32,
    pub color: Option<u32>,
    pub texture_coord: Option<u32>,
    pub normal: Option<u32>,
}

impl AttribLocations {
    /// Resolves every attribute through `lookup`. Position is always
    /// required; the others only when `stage` feeds them.
    pub fn resolve(stage: Stage, lookup: impl Fn(&str) -> Option<u32>) -> Result<Self, Error> {
        let require = |name: &'static str, needed: bool| match lookup(name) {
            Some(location) => Ok(Some(location)),
            None if needed => Err(Error::MissingAttribute { stage, name }),
            None => Ok(None),
        };
        let position = lookup(POSITION_ATTRIB).ok_or(Error::MissingAttribute {
            stage,
            name: POSITION_ATTRIB,
        })?;

        Ok(Self {
            position,
            color: require(COLOR_ATTRIB, stage.uses_colors())?,
            texture_coord: require(TEXTURE_COORD_ATTRIB, stage.uses_texture())?,
            normal: require(NORMAL_ATTRIB, stage.uses_lighting())?,
        })
    }
}

pub struct ProgramInfo {
    pub program: ShaderProgram,
    pub attribs: AttribLocations,
}

impl ProgramInfo {
    /// Compiles and links `sources`, then resolves the attributes `stage` needs.
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: Stage,
        sources: &ShaderSources,
    ) -> Result<Self, Error> {
        let program = ShaderProgram::from_sources(gl, &sources.vertex, &sources.fragment)?;
        log::debug!("Linked shader program for stage {stage}");

        let attribs = AttribLocations::resolve(stage, |name| program.attrib_location(name))?;
        log::debug!("Attribute locations: {attribs:?}");

        Ok(Self { program, attribs })
    }
}
