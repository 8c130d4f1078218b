//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.
//! A texture starts out as a single placeholder pixel and is replaced once an
//! image has been decoded.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use glsteps_core::texture::{PLACEHOLDER_PIXEL, Sampling, flip_rows};
use image::{DynamicImage, ImageResult, RgbaImage};

use crate::error::Error;

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a 1x1 texture holding [`PLACEHOLDER_PIXEL`].
    pub fn placeholder(gl: &Arc<glow::Context>) -> Result<Self, Error> {
        let id = unsafe { gl.create_texture().map_err(Error::Gl)? };
        let mut texture = Self {
            gl: Arc::clone(gl),
            id,
            width: 0,
            height: 0,
        };
        texture.upload(1, 1, &PLACEHOLDER_PIXEL);
        Ok(texture)
    }

    /// Creates a texture from the image at `path`, keeping the placeholder if
    /// the image cannot be read.
    pub fn load(gl: &Arc<glow::Context>, path: &Path) -> Result<Self, Error> {
        let mut texture = Self::placeholder(gl)?;
        match decode(path) {
            Ok(pixels) => {
                texture.upload(pixels.width(), pixels.height(), &pixels);
                log::info!(
                    "Loaded texture {} ({}x{})",
                    path.display(),
                    texture.width,
                    texture.height
                );
            }
            Err(e) => log::warn!("Could not load texture {}: {e}", path.display()),
        }
        Ok(texture)
    }

    /// Creates a texture from an already decoded image.
    pub fn from_image(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, Error> {
        let mut texture = Self::placeholder(gl)?;
        texture.set_image(image);
        Ok(texture)
    }

    /// Replaces the texture contents with `image`.
    pub fn set_image(&mut self, image: &DynamicImage) {
        let pixels = upload_order(image);
        self.upload(pixels.width(), pixels.height(), &pixels);
    }

    fn upload(&mut self, width: u32, height: u32, data: &[u8]) {
        let sampling = Sampling::for_size(width, height);
        log::debug!("Uploading {width}x{height} texture with {sampling:?} sampling");
        let gl = &self.gl;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            match sampling {
                Sampling::Mipmapped => {
                    gl.generate_mipmap(glow::TEXTURE_2D);
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_S,
                        glow::REPEAT as i32,
                    );
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_T,
                        glow::REPEAT as i32,
                    );
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_MIN_FILTER,
                        glow::LINEAR_MIPMAP_LINEAR as i32,
                    );
                }
                Sampling::ClampLinear => {
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_S,
                        glow::CLAMP_TO_EDGE as i32,
                    );
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_T,
                        glow::CLAMP_TO_EDGE as i32,
                    );
                    gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_MIN_FILTER,
                        glow::LINEAR as i32,
                    );
                }
            }
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        self.width = width;
        self.height = height;
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

/// Reads and decodes the image at `path` into RGBA rows ready for upload,
/// bottom row first.
pub fn decode(path: &Path) -> ImageResult<RgbaImage> {
    let image = image::open(path)?;
    Ok(upload_order(&image))
}

fn upload_order(image: &DynamicImage) -> RgbaImage {
    let mut pixels = image.to_rgba8();
    let (width, height) = pixels.dimensions();
    flip_rows(&mut pixels, width, height);
    pixels
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageError, Rgba};

    use super::*;

    const TOP: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BOTTOM: Rgba<u8> = Rgba([0, 255, 0, 255]);

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageError::IoError(_)));
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(decode(&path).is_err());
    }

    #[test]
    fn test_decode_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripes.png");
        let image = RgbaImage::from_fn(2, 2, |_, y| if y == 0 { TOP } else { BOTTOM });
        image.save(&path).unwrap();

        let pixels = decode(&path).unwrap();
        assert_eq!(pixels.dimensions(), (2, 2));
        // The first image row ends up last, where v = 1 samples it.
        assert_eq!(*pixels.get_pixel(0, 0), BOTTOM);
        assert_eq!(*pixels.get_pixel(1, 1), TOP);
    }
}
