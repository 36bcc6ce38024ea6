//! Built-in cube geometry

use celery_core::{Color, Vec2, Vec3};

/// Indexed triangle mesh with one flat color per face.
///
/// Every face owns four vertices and two triangles, so the triangle at index
/// `t` belongs to face `t / 2`.
#[derive(Clone, Copy, Debug)]
pub struct Mesh {
    pub positions: &'static [[f64; 3]],
    pub uvs: &'static [[f64; 2]],
    pub face_colors: &'static [Color],
    pub indices: &'static [u16],
}

/// A mesh vertex in object space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

/// One triangle resolved from the index list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTriangle {
    pub corners: [MeshVertex; 3],
    pub color: Color,
}

/// The textured cube streamed by the driver.
///
/// 24 vertices so each face keeps its own texture coordinates.
pub const CUBE: Mesh = Mesh {
    positions: &CUBE_POSITIONS,
    uvs: &CUBE_UVS,
    face_colors: &CUBE_FACE_COLORS,
    indices: &CUBE_INDICES,
};

const CUBE_POSITIONS: [[f64; 3]; 24] = [
    // Front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // Back
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    // Top
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    // Bottom
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    // Right
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    // Left
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
];

const FACE_UVS: [[f64; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

const CUBE_UVS: [[f64; 2]; 24] = {
    let mut uvs = [[0.0; 2]; 24];
    let mut i = 0;
    while i < 24 {
        uvs[i] = FACE_UVS[i % 4];
        i += 1;
    }
    uvs
};

const CUBE_FACE_COLORS: [Color; 6] = [
    Color::rgb(1.0, 0.8, 0.8), // Front - light red
    Color::rgb(0.8, 1.0, 0.8), // Back - light green
    Color::rgb(0.8, 0.8, 1.0), // Top - light blue
    Color::rgb(1.0, 1.0, 0.8), // Bottom - light yellow
    Color::rgb(1.0, 0.8, 1.0), // Right - light magenta
    Color::rgb(0.8, 1.0, 1.0), // Left - light cyan
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2,    0, 2, 3,    // Front
    4, 5, 6,    4, 6, 7,    // Back
    8, 9, 10,   8, 10, 11,  // Top
    12, 13, 14, 12, 14, 15, // Bottom
    16, 17, 18, 16, 18, 19, // Right
    20, 21, 22, 20, 22, 23, // Left
];

impl Mesh {
    /// Number of triangles described by the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `triangle`
    pub fn triangle_indices(&self, triangle: usize) -> [u16; 3] {
        let base = triangle * 3;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ]
    }

    /// Flat color of the face that triangle `triangle` belongs to
    pub fn face_color(&self, triangle: usize) -> Color {
        self.face_colors[triangle / 2]
    }

    pub fn position(&self, index: u16) -> Vec3 {
        Vec3::from_array(self.positions[index as usize])
    }

    pub fn uv(&self, index: u16) -> Vec2 {
        Vec2::from_array(self.uvs[index as usize])
    }

    /// Object-space vertex at `index`
    pub fn vertex(&self, index: u16) -> MeshVertex {
        MeshVertex {
            position: self.position(index),
            uv: self.uv(index),
        }
    }

    /// Resolve triangle `triangle` into its corners and face color
    pub fn triangle(&self, triangle: usize) -> MeshTriangle {
        let [i0, i1, i2] = self.triangle_indices(triangle);
        MeshTriangle {
            corners: [self.vertex(i0), self.vertex(i1), self.vertex(i2)],
            color: self.face_color(triangle),
        }
    }

    /// Iterate over all triangles in index order
    pub fn triangles(&self) -> impl Iterator<Item = MeshTriangle> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }
}
