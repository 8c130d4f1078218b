//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing vertex data on the GPU side.
//! Each attribute lives in its own buffer; indices, when present, are `u16`.

use std::sync::Arc;

use glow::HasContext;
use glsteps_core::geometry::{Attribute, Primitive};

use crate::error::Error;

fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    buffers: Vec<glow::Buffer>,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Creates an empty mesh drawn with the given primitive.
    pub fn new(gl: &Arc<glow::Context>, primitive: Primitive) -> Result<Self, Error> {
        let draw_mode = match primitive {
            Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
            Primitive::Triangles => glow::TRIANGLES,
        };
        let vao = unsafe { gl.create_vertex_array().map_err(Error::Gl)? };
        Ok(Self {
            gl: Arc::clone(gl),
            draw_mode,
            vao,
            buffers: Vec::new(),
            ebo: None,
            count: 0,
        })
    }

    /// Uploads an attribute into a new buffer and points `location` at it.
    ///
    /// Without an index buffer the draw count is the attribute's vertex count.
    pub fn attribute(&mut self, location: u32, attribute: &Attribute) -> Result<(), Error> {
        unsafe {
            let buffer = self.gl.create_buffer().map_err(Error::Gl)?;
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                as_bytes(&attribute.data),
                glow::STATIC_DRAW,
            );
            self.gl.vertex_attrib_pointer_f32(
                location,
                attribute.components as i32,
                glow::FLOAT,
                false,
                0,
                0,
            );
            self.gl.enable_vertex_attrib_array(location);

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.buffers.push(buffer);
        }
        if self.ebo.is_none() {
            self.count = attribute.vertex_count();
        }
        Ok(())
    }

    /// Uploads the element array; the mesh is then drawn indexed.
    pub fn indices(&mut self, indices: &[u16]) -> Result<(), Error> {
        unsafe {
            let ebo = match self.ebo {
                Some(ebo) => ebo,
                None => self.gl.create_buffer().map_err(Error::Gl)?,
            };
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                as_bytes(indices),
                glow::STATIC_DRAW,
            );
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
            self.ebo = Some(ebo);
        }
        self.count = indices.len();
        Ok(())
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_SHORT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the amount of vertices submitted per draw.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            for buffer in self.buffers.drain(..) {
                self.gl.delete_buffer(buffer);
            }
            if let Some(ebo) = self.ebo.take() {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
