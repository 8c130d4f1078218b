//! This module contains the thin wrappers around OpenGL objects the stages share:
//! application setup, shader programs, meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
