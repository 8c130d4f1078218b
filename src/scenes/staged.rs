//! Stages 2 to 7: one mesh, one program, one draw call per frame.

use std::sync::Arc;

use glam::Vec4;
use glsteps_core::{
    Stage,
    camera::{self, Projection},
    geometry::Geometry,
    lighting::DirectionalLight,
    settings::Settings,
};
use image::{DynamicImage, Rgba, RgbaImage};

use super::{Frame, Scene, clear_frame, program::*};
use crate::{
    abs::{Mesh, Texture},
    error::Error,
    shaders::ShaderSources,
};

/// Side length of the built-in checkerboard texture.
const CHECKER_SIZE: u32 = 64;
const CHECKER_CELL: u32 = 8;

pub struct StagedScene {
    gl: Arc<glow::Context>,
    stage: Stage,
    info: ProgramInfo,
    mesh: Mesh,
    texture: Option<Texture>,
    clear_color: Vec4,
    projection: Projection,
    camera_distance: f32,
    light: DirectionalLight,
}

impl StagedScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: Stage,
        geometry: &Geometry,
        settings: &Settings,
        sources: &ShaderSources,
    ) -> Result<Self, Error> {
        let info = ProgramInfo::new(gl, stage, sources)?;
        let mesh = upload(gl, geometry, &info.attribs)?;

        let texture = if stage.uses_texture() {
            Some(match &settings.texture {
                Some(path) => Texture::load(gl, path)?,
                None => Texture::from_image(gl, &checkerboard())?,
            })
        } else {
            None
        };

        Ok(Self {
            gl: Arc::clone(gl),
            stage,
            info,
            mesh,
            texture,
            clear_color: settings.clear_color,
            projection: settings.projection,
            camera_distance: settings.camera_distance,
            light: settings.light,
        })
    }
}

/// Uploads every attribute the program reads, plus the indices.
fn upload(
    gl: &Arc<glow::Context>,
    geometry: &Geometry,
    attribs: &AttribLocations,
) -> Result<Mesh, Error> {
    let mut mesh = Mesh::new(gl, geometry.primitive)?;
    mesh.attribute(attribs.position, &geometry.positions)?;
    let optional = [
        (attribs.color, &geometry.colors),
        (attribs.texture_coord, &geometry.texture_coords),
        (attribs.normal, &geometry.normals),
    ];
    for (location, attribute) in optional {
        if let (Some(location), Some(attribute)) = (location, attribute) {
            mesh.attribute(location, attribute)?;
        }
    }
    if let Some(indices) = &geometry.indices {
        mesh.indices(indices)?;
    }
    log::debug!("Uploaded mesh with {} elements", mesh.count());
    Ok(mesh)
}

/// Two-tone checkerboard used when no texture image is configured.
fn checkerboard() -> DynamicImage {
    let image = RgbaImage::from_fn(CHECKER_SIZE, CHECKER_SIZE, |x, y| {
        if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
            Rgba([230, 230, 230, 255])
        } else {
            Rgba([40, 90, 200, 255])
        }
    });
    DynamicImage::ImageRgba8(image)
}

impl Scene for StagedScene {
    fn stage(&self) -> Stage {
        self.stage
    }

    fn render(&mut self, frame: &Frame) {
        clear_frame(&self.gl, self.clear_color, true);

        let rotation = if self.stage.is_animated() {
            frame.rotation
        } else {
            0.0
        };
        let projection = self.projection.matrix(frame.aspect);
        let model_view =
            camera::model_view(self.camera_distance, rotation, self.stage.rotation_axes());

        let program = &self.info.program;
        program.use_program();
        program.set_uniform(PROJECTION_UNIFORM, projection);
        program.set_uniform(MODEL_VIEW_UNIFORM, model_view);

        if self.stage.uses_lighting() {
            program.set_uniform(NORMAL_MATRIX_UNIFORM, camera::normal_matrix3(model_view));
            program.set_uniform(AMBIENT_UNIFORM, self.light.ambient);
            program.set_uniform(LIGHT_COLOR_UNIFORM, self.light.color);
            program.set_uniform(LIGHT_DIRECTION_UNIFORM, self.light.direction());
        }

        if let Some(texture) = &self.texture {
            texture.bind(0);
            program.set_uniform(SAMPLER_UNIFORM, 0i32);
        }

        self.mesh.draw();
    }
}
