//! Module providing the `Scene` trait and the scene for every stage.

use std::sync::Arc;

use glam::Vec4;
use glsteps_core::{Stage, geometry::Geometry, settings::Settings};

use crate::{error::Error, shaders::ShaderLibrary};

pub mod clear;
pub mod program;
pub mod staged;

/// Per-frame inputs to a scene.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Accumulated rotation in radians.
    pub rotation: f32,
    /// Viewport width over height.
    pub aspect: f32,
}

/// The Scene trait defines the common interface for all stage scenes.
pub trait Scene {
    /// The stage this scene demonstrates.
    fn stage(&self) -> Stage;

    /// Renders one frame.
    fn render(&mut self, frame: &Frame);
}

/// Builds the scene for `stage`: compiles its program and uploads its buffers.
pub fn build(
    gl: &Arc<glow::Context>,
    stage: Stage,
    settings: &Settings,
    shaders: &ShaderLibrary,
) -> Result<Box<dyn Scene>, Error> {
    let scene: Box<dyn Scene> = match (stage.shader_set(), Geometry::for_stage(stage)) {
        (Some(set), Some(geometry)) => {
            let sources = shaders.load(set)?;
            Box::new(staged::StagedScene::new(gl, stage, &geometry, settings, &sources)?)
        }
        _ => Box::new(clear::ClearScene::new(gl, settings.clear_color)),
    };
    log::info!("Built scene for stage {stage}: {}", stage.summary());
    Ok(scene)
}

/// Clear color and depth state every geometry stage starts its frame with.
pub(crate) fn clear_frame(gl: &glow::Context, color: Vec4, depth: bool) {
    use glow::HasContext;

    unsafe {
        gl.clear_color(color.x, color.y, color.z, color.w);
        if depth {
            gl.clear_depth_f32(1.0);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LEQUAL);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        } else {
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}
