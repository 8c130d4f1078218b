//! Stage 1: nothing but a cleared canvas.

use std::sync::Arc;

use glam::Vec4;
use glsteps_core::Stage;

use super::{Frame, Scene, clear_frame};

pub struct ClearScene {
    gl: Arc<glow::Context>,
    color: Vec4,
}

impl ClearScene {
    pub fn new(gl: &Arc<glow::Context>, color: Vec4) -> Self {
        Self {
            gl: Arc::clone(gl),
            color,
        }
    }
}

impl Scene for ClearScene {
    fn stage(&self) -> Stage {
        Stage::Clear
    }

    fn render(&mut self, _frame: &Frame) {
        clear_frame(&self.gl, self.color, false);
    }
}
