/// Per-face shading under selectable lighting modes
use crate::geometry::{Mesh, Rgba};
use nalgebra::{Unit, Vector3};
use std::fmt;

/// Number of discrete intensity levels in flat mode
const FLAT_LEVELS: f32 = 4.0;
/// Fill intensity given to back-facing faces in dramatic mode
const DRAMATIC_RIM: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    Realistic,
    Flat,
    Dramatic,
}

impl LightingMode {
    /// Next mode in the cycle order: Realistic → Flat → Dramatic → ...
    pub fn cycle(self) -> Self {
        match self {
            LightingMode::Realistic => LightingMode::Flat,
            LightingMode::Flat => LightingMode::Dramatic,
            LightingMode::Dramatic => LightingMode::Realistic,
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightingMode::Realistic => "Realistic",
            LightingMode::Flat => "Flat",
            LightingMode::Dramatic => "Dramatic",
        };
        write!(f, "{name}")
    }
}

/// Light direction and shading coefficients for one mode.
///
/// All constants are fixed per mode; the context only changes on an
/// explicit mode-cycle input.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingContext {
    pub mode: LightingMode,
    pub light_direction: Unit<Vector3<f32>>,
    pub ambient: f32,
    pub diffuse: f32,
}

impl LightingContext {
    pub fn new(mode: LightingMode) -> Self {
        match mode {
            LightingMode::Realistic | LightingMode::Flat => Self {
                mode,
                light_direction: Unit::new_normalize(Vector3::new(0.5, 0.5, 1.0)),
                ambient: 0.3,
                diffuse: 0.7,
            },
            // Steep grazing light with an amplified diffuse term for
            // strong contrast and rim lighting.
            LightingMode::Dramatic => Self {
                mode,
                light_direction: Unit::new_normalize(Vector3::new(1.0, 0.2, 0.15)),
                ambient: 0.15,
                diffuse: 1.2,
            },
        }
    }

    /// Shading intensity in [0, 1] for a face normal
    pub fn shade_normal(&self, normal: &Unit<Vector3<f32>>) -> f32 {
        let dot = normal.dot(&self.light_direction);
        match self.mode {
            LightingMode::Realistic => (self.ambient + self.diffuse * dot.max(0.0)).clamp(0.0, 1.0),
            LightingMode::Flat => {
                // Quantize the diffuse term to a small palette
                let quantized = ((dot.max(0.0) * FLAT_LEVELS).ceil() / FLAT_LEVELS).min(1.0);
                (self.ambient + self.diffuse * quantized).clamp(0.0, 1.0)
            }
            LightingMode::Dramatic => {
                if dot <= 0.0 {
                    // Secondary fill light keeps back faces visible
                    DRAMATIC_RIM
                } else {
                    (self.ambient + self.diffuse * dot).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// One intensity per face. Degenerate faces fall back to the ambient
    /// level; output is independent of draw order and fully reproducible.
    pub fn shade_mesh(&self, mesh: &Mesh) -> Vec<f32> {
        mesh.faces
            .iter()
            .map(|face| match mesh.face_normal(face) {
                Some(normal) => self.shade_normal(&normal),
                None => self.ambient,
            })
            .collect()
    }

    /// Apply shading intensities to a base color, one RGBA per face
    pub fn tint(&self, mesh: &Mesh, base: Rgba) -> Vec<Rgba> {
        self.shade_mesh(mesh)
            .into_iter()
            .map(|intensity| base.scaled(intensity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use nalgebra::Point3;

    /// A single quad in the xy-plane with its normal on +z
    fn up_facing_quad() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.push_vertex(Point3::new(1.0, 1.0, 0.0));
        let d = mesh.push_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.push_face(Face::quad(a, b, c, d));
        mesh
    }

    #[test]
    fn test_realistic_head_on_light() {
        let mut ctx = LightingContext::new(LightingMode::Realistic);
        ctx.light_direction = Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0));
        let intensities = ctx.shade_mesh(&up_facing_quad());
        assert_eq!(intensities.len(), 1);
        assert!((intensities[0] - 1.0).abs() < 1e-6); // 0.3 + 0.7 * 1.0
    }

    #[test]
    fn test_realistic_back_face_gets_ambient_only() {
        let mut ctx = LightingContext::new(LightingMode::Realistic);
        ctx.light_direction = Unit::new_normalize(Vector3::new(0.0, 0.0, -1.0));
        let intensities = ctx.shade_mesh(&up_facing_quad());
        assert!((intensities[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_shading_is_idempotent() {
        let ctx = LightingContext::new(LightingMode::Realistic);
        let mesh = up_facing_quad();
        assert_eq!(ctx.shade_mesh(&mesh), ctx.shade_mesh(&mesh));
    }

    #[test]
    fn test_flat_mode_quantizes() {
        let ctx = LightingContext::new(LightingMode::Flat);
        let mesh = up_facing_quad();
        // Sample many light directions; the diffuse term must only take
        // FLAT_LEVELS + 1 distinct values.
        let mut seen = Vec::new();
        for i in 0..64 {
            let angle = i as f32 / 63.0 * std::f32::consts::PI;
            let mut ctx = ctx.clone();
            ctx.light_direction =
                Unit::new_normalize(Vector3::new(angle.sin(), 0.0, angle.cos()));
            let intensity = ctx.shade_mesh(&mesh)[0];
            if !seen.iter().any(|s: &f32| (s - intensity).abs() < 1e-6) {
                seen.push(intensity);
            }
        }
        assert!(seen.len() <= FLAT_LEVELS as usize + 1, "levels: {seen:?}");
    }

    #[test]
    fn test_dramatic_rim_floor() {
        let mut ctx = LightingContext::new(LightingMode::Dramatic);
        ctx.light_direction = Unit::new_normalize(Vector3::new(0.0, 0.0, -1.0));
        let intensities = ctx.shade_mesh(&up_facing_quad());
        assert!((intensities[0] - DRAMATIC_RIM).abs() < 1e-6);
    }

    #[test]
    fn test_intensities_stay_in_range() {
        for mode in [
            LightingMode::Realistic,
            LightingMode::Flat,
            LightingMode::Dramatic,
        ] {
            let ctx = LightingContext::new(mode);
            for intensity in ctx.shade_mesh(&up_facing_quad()) {
                assert!((0.0..=1.0).contains(&intensity));
            }
        }
    }

    #[test]
    fn test_mode_cycle_order() {
        let mode = LightingMode::Realistic;
        assert_eq!(mode.cycle(), LightingMode::Flat);
        assert_eq!(mode.cycle().cycle(), LightingMode::Dramatic);
        assert_eq!(mode.cycle().cycle().cycle(), LightingMode::Realistic);
    }
}
