/// Geometry primitives for procedural fan meshes
use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// An RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels by a shading intensity, leaving alpha untouched
    pub fn scaled(&self, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            r: self.r * intensity,
            g: self.g * intensity,
            b: self.b * intensity,
            a: self.a,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

/// A quad face referencing four mesh vertices in counter-clockwise order.
///
/// Triangles are represented by repeating the last index; the repeated
/// corner produces a zero-area half that rasterizers discard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face(pub [usize; 4]);

impl Face {
    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self([a, b, c, d])
    }

    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c, c])
    }
}

/// An indexed 3D mesh. Meshes are regenerated from scratch each frame,
/// never mutated in place after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, point: Point3<f32>) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Unit normal of a face, computed from its first three vertices.
    /// Returns `None` for degenerate (zero-area) faces.
    pub fn face_normal(&self, face: &Face) -> Option<Unit<Vector3<f32>>> {
        let v0 = self.vertices[face.0[0]];
        let v1 = self.vertices[face.0[1]];
        let v2 = self.vertices[face.0[2]];

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Unit::try_new(edge1.cross(&edge2), 1e-9)
    }

    /// True when every face index references an existing vertex
    pub fn is_consistent(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.0.iter().all(|&i| i < self.vertices.len()))
    }

    /// Radius of the smallest origin-centered sphere containing the mesh
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, f32::max)
    }

    /// Merge another mesh into this one, rebasing its face indices
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| Face(face.0.map(|i| i + base))),
        );
    }

    /// Return a fresh mesh with every vertex transformed by `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| matrix.transform_point(v))
                .collect(),
            faces: self.faces.clone(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.push_vertex(Point3::new(1.0, 1.0, 0.0));
        let d = mesh.push_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.push_face(Face::quad(a, b, c, d));
        mesh
    }

    #[test]
    fn test_ccw_quad_normal_points_up() {
        let mesh = unit_quad();
        let normal = mesh.face_normal(&mesh.faces[0]).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_face_has_no_normal() {
        let mut mesh = Mesh::new();
        let a = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.push_face(Face::triangle(a, b, a));
        assert!(mesh.face_normal(&mesh.faces[0]).is_none());
    }

    #[test]
    fn test_consistency_check() {
        let mut mesh = unit_quad();
        assert!(mesh.is_consistent());
        mesh.push_face(Face::quad(0, 1, 2, 99));
        assert!(!mesh.is_consistent());
    }

    #[test]
    fn test_transform_returns_fresh_mesh() {
        let mesh = unit_quad();
        let shift = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 2.0));
        let moved = mesh.transformed(&shift);

        assert!((moved.vertices[0].z - 2.0).abs() < 1e-6);
        // Original untouched
        assert!((mesh.vertices[0].z).abs() < 1e-6);
        assert_eq!(mesh.faces, moved.faces);
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut mesh = unit_quad();
        let other = unit_quad();
        mesh.append(&other);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.faces[1], Face::quad(4, 5, 6, 7));
        assert!(mesh.is_consistent());
    }

    #[test]
    fn test_color_scaling_preserves_alpha() {
        let color = Rgba::new(0.8, 0.4, 0.2, 0.9);
        let shaded = color.scaled(0.5);
        assert!((shaded.r - 0.4).abs() < 1e-6);
        assert!((shaded.a - 0.9).abs() < 1e-6);
        assert!(color.is_valid() && shaded.is_valid());
    }
}
