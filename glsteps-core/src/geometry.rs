//! Vertex data for the demo scenes.
//!
//! Attributes are kept in separate flat arrays, one per GPU buffer, instead of
//! an interleaved vertex struct.

use crate::Stage;

/// How the vertices are assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    TriangleStrip,
    Triangles,
}

/// A flat `f32` attribute array together with its component count.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub components: usize,
    pub data: Vec<f32>,
}

impl Attribute {
    fn new(components: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len() % components, 0);
        Self { components, data }
    }

    /// Number of vertices this attribute describes.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.components
    }
}

/// All per-vertex arrays a stage uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Attribute,
    pub colors: Option<Attribute>,
    pub texture_coords: Option<Attribute>,
    pub normals: Option<Attribute>,
    pub indices: Option<Vec<u16>>,
    pub primitive: Primitive,
}

impl Geometry {
    /// Assembles the arrays used by `stage`, `None` for the clear-only stage.
    pub fn for_stage(stage: Stage) -> Option<Self> {
        match stage {
            Stage::Clear => None,
            Stage::Quad => Some(Self::square(false)),
            Stage::ShadedQuad | Stage::AnimatedQuad => Some(Self::square(true)),
            Stage::Cube => Some(Self::cube(true, false, false)),
            Stage::TexturedCube => Some(Self::cube(false, true, false)),
            Stage::LitCube => Some(Self::cube(false, true, true)),
        }
    }

    fn square(with_colors: bool) -> Self {
        Self {
            positions: Attribute::new(2, SQUARE_POSITIONS.to_vec()),
            colors: with_colors.then(|| Attribute::new(4, SQUARE_COLORS.concat())),
            texture_coords: None,
            normals: None,
            indices: None,
            primitive: Primitive::TriangleStrip,
        }
    }

    fn cube(with_colors: bool, with_texture: bool, with_normals: bool) -> Self {
        Self {
            positions: Attribute::new(3, CUBE_POSITIONS.to_vec()),
            colors: with_colors.then(|| Attribute::new(4, cube_colors())),
            texture_coords: with_texture.then(|| Attribute::new(2, cube_texture_coords())),
            normals: with_normals.then(|| Attribute::new(3, cube_normals())),
            indices: Some(cube_indices()),
            primitive: Primitive::Triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.vertex_count()
    }

    /// Number of vertices submitted by the draw call.
    pub fn element_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }
}

/// Quad corners as (x, y), ordered for a triangle strip.
pub const SQUARE_POSITIONS: [f32; 8] = [
    1.0, 1.0, // right top
    -1.0, 1.0, // left top
    1.0, -1.0, // right bottom
    -1.0, -1.0, // left bottom
];

/// White, red, green, blue.
pub const SQUARE_COLORS: [[f32; 4]; 4] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
];

pub const CUBE_FACES: usize = 6;
const VERTICES_PER_FACE: usize = 4;

#[rustfmt::skip]
pub const CUBE_POSITIONS: [f32; 72] = [
    // Front
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    // Back
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    // Top
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
    // Bottom
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    // Right
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // Left
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
];

/// One color per face, same face order as [`CUBE_POSITIONS`].
pub const CUBE_FACE_COLORS: [[f32; 4]; CUBE_FACES] = [
    [1.0, 1.0, 1.0, 1.0], // white
    [1.0, 0.0, 0.0, 1.0], // red
    [0.0, 1.0, 0.0, 1.0], // green
    [0.0, 0.0, 1.0, 1.0], // blue
    [1.0, 1.0, 0.0, 1.0], // yellow
    [1.0, 0.0, 1.0, 1.0], // purple
];

/// Outward normal of every face.
pub const CUBE_FACE_NORMALS: [[f32; 3]; CUBE_FACES] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

const FACE_TEXTURE_COORDS: [[f32; 2]; VERTICES_PER_FACE] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Repeats a per-face value for each of the face's four vertices.
fn per_face<const N: usize>(values: &[[f32; N]]) -> Vec<f32> {
    values
        .iter()
        .flat_map(|value| std::iter::repeat_n(value, VERTICES_PER_FACE))
        .flatten()
        .copied()
        .collect()
}

pub fn cube_colors() -> Vec<f32> {
    per_face(&CUBE_FACE_COLORS)
}

pub fn cube_normals() -> Vec<f32> {
    per_face(&CUBE_FACE_NORMALS)
}

pub fn cube_texture_coords() -> Vec<f32> {
    std::iter::repeat_n(FACE_TEXTURE_COORDS.concat(), CUBE_FACES)
        .flatten()
        .collect()
}

/// Two triangles per face: `o, o+1, o+2` and `o, o+2, o+3`.
pub fn cube_indices() -> Vec<u16> {
    (0..CUBE_FACES as u16)
        .flat_map(|face| {
            let o = face * VERTICES_PER_FACE as u16;
            [o, o + 1, o + 2, o, o + 2, o + 3]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_square_is_a_four_vertex_strip() {
        let square = Geometry::for_stage(Stage::Quad).unwrap();
        assert_eq!(square.primitive, Primitive::TriangleStrip);
        assert_eq!(square.vertex_count(), 4);
        assert_eq!(square.element_count(), 4);
        assert!(square.colors.is_none());

        let shaded = Geometry::for_stage(Stage::ShadedQuad).unwrap();
        let colors = shaded.colors.unwrap();
        assert_eq!(colors.vertex_count(), 4);
        assert_eq!(&colors.data[4..8], &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clear_stage_has_no_geometry() {
        assert!(Geometry::for_stage(Stage::Clear).is_none());
    }

    #[test]
    fn test_cube_attribute_counts_match() {
        for stage in [Stage::Cube, Stage::TexturedCube, Stage::LitCube] {
            let cube = Geometry::for_stage(stage).unwrap();
            let count = cube.vertex_count();
            assert_eq!(count, 24);
            assert_eq!(cube.element_count(), 36);
            for attr in [&cube.colors, &cube.texture_coords, &cube.normals]
                .into_iter()
                .flatten()
            {
                assert_eq!(attr.vertex_count(), count);
            }
        }
        let lit = Geometry::for_stage(Stage::LitCube).unwrap();
        assert!(lit.normals.is_some() && lit.texture_coords.is_some());
        assert!(lit.colors.is_none());
    }

    #[test]
    fn test_cube_indices_stay_in_range() {
        let indices = cube_indices();
        assert_eq!(&indices[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&indices[30..], &[20, 21, 22, 20, 22, 23]);
        assert!(indices.iter().all(|&i| (i as usize) < 24));
    }

    #[test]
    fn test_normals_point_out_of_their_face() {
        let normals = cube_normals();
        for vertex in 0..24 {
            let p = Vec3::from_slice(&CUBE_POSITIONS[vertex * 3..]);
            let n = Vec3::from_slice(&normals[vertex * 3..]);
            assert!((n.length() - 1.0).abs() < 1e-6);
            // Every vertex of a face sits on the plane the normal points at.
            assert_eq!(p.dot(n), 1.0);
        }
    }

    #[test]
    fn test_face_colors_repeat_per_vertex() {
        let colors = cube_colors();
        assert_eq!(colors.len(), 24 * 4);
        // Vertices 16..20 form the right face, which is yellow.
        for vertex in 16..20 {
            assert_eq!(&colors[vertex * 4..vertex * 4 + 4], &CUBE_FACE_COLORS[4]);
        }
    }

    #[test]
    fn test_geometry_exactly_when_shaders() {
        for stage in Stage::ALL {
            assert_eq!(
                Geometry::for_stage(stage).is_some(),
                stage.shader_set().is_some(),
                "{stage}"
            );
        }
    }
}
