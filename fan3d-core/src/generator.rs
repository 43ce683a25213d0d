/// Procedural mesh generators for blades, housing, stand and cage.
///
/// Every builder is a deterministic function of its arguments: identical
/// inputs always produce identical meshes.
use crate::config::FanConfig;
use crate::geometry::{Face, Mesh};
use nalgebra::Point3;
use std::f32::consts::{PI, TAU};

/// Half depth of the motor housing along the spin axis
const HOUSING_HALF_DEPTH: f32 = 0.2;
/// Nominal pole radius before the mid-pole bulge
const POLE_RADIUS: f32 = 0.05;
const BASE_RADIUS: f32 = 0.3;
const BASE_HEIGHT: f32 = 0.05;
/// Axial positions of the cage's front and rear lattices
const CAGE_FRONT_Z: f32 = 0.05;
const CAGE_REAR_Z: f32 = -0.15;

/// Tessellation parameters. Defaults carry the documented counts; none of
/// them are baked into the builders.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    /// Span stations along each blade
    pub blade_segments: usize,
    /// Camber lift of the blade's top surface at mid-span
    pub camber_top: f32,
    /// Camber drop of the blade's bottom edge at mid-span
    pub camber_bottom: f32,
    /// Stations whose half-width falls below this are skipped
    pub degenerate_width: f32,
    pub housing_sides: usize,
    pub housing_rings: usize,
    pub stand_sides: usize,
    pub stand_rings: usize,
    pub cage_rings: usize,
    pub cage_spokes: usize,
    /// Radial clearance between blade tips and the cage
    pub cage_clearance: f32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            blade_segments: 20,
            camber_top: 0.1,
            camber_bottom: 0.05,
            degenerate_width: 1e-4,
            housing_sides: 32,
            housing_rings: 5,
            stand_sides: 16,
            stand_rings: 20,
            cage_rings: 8,
            cage_spokes: 16,
            cage_clearance: 0.2,
        }
    }
}

/// Rotation about the chord axis as a function of span position t ∈ [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TwistProfile {
    /// Peaks at mid-span, flat at root and tip
    Sinusoidal { max_angle: f32 },
    /// Increases monotonically from root to tip
    Linear { tip_angle: f32 },
}

impl TwistProfile {
    pub fn angle_at(&self, t: f32) -> f32 {
        match self {
            TwistProfile::Sinusoidal { max_angle } => max_angle * (t * PI).sin(),
            TwistProfile::Linear { tip_angle } => tip_angle * t,
        }
    }
}

impl Default for TwistProfile {
    fn default() -> Self {
        TwistProfile::Sinusoidal {
            max_angle: 15.0_f32.to_radians(),
        }
    }
}

/// One span station: leading and trailing edge points
struct BladeStation {
    top: Point3<f32>,
    bottom: Point3<f32>,
}

/// Build a single blade swept across the span stations, spun to
/// `spin_angle` around the hub axis.
pub fn build_blade(
    config: &FanConfig,
    params: &GeneratorParams,
    twist: &TwistProfile,
    spin_angle: f32,
) -> Mesh {
    let segments = params.blade_segments;
    let mut stations = Vec::with_capacity(segments + 1);

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let span = (t * PI).sin();

        // Chord tapers toward the tip and collapses at both ends
        let half_width = config.blade_width * (1.0 - t * 0.5) * span;
        if half_width < params.degenerate_width {
            log::debug!("skipping degenerate blade station t={t:.3}");
            continue;
        }

        let radius = config.motor_radius + t * config.blade_length;
        let angle = spin_angle + twist.angle_at(t);
        let (sin_a, cos_a) = angle.sin_cos();

        stations.push(BladeStation {
            top: Point3::new(
                radius * cos_a - half_width * sin_a,
                radius * sin_a + half_width * cos_a,
                span * params.camber_top,
            ),
            bottom: Point3::new(
                radius * cos_a + half_width * sin_a,
                radius * sin_a - half_width * cos_a,
                -span * params.camber_bottom,
            ),
        });
    }

    let mut mesh = Mesh::with_capacity(stations.len() * 2, stations.len().saturating_sub(1));
    for station in &stations {
        mesh.push_vertex(station.top);
        mesh.push_vertex(station.bottom);
    }
    for i in 0..stations.len().saturating_sub(1) {
        let top = i * 2;
        let bottom = top + 1;
        // Counter-clockwise seen from above: normal carries +z
        mesh.push_face(Face::quad(bottom, bottom + 2, top + 2, top));
    }
    mesh
}

/// The full rotor: one blade per `blade_count`, evenly spaced around the
/// hub and spun to `angular_position`.
pub fn build_blade_set(
    config: &FanConfig,
    params: &GeneratorParams,
    twist: &TwistProfile,
    angular_position: f32,
) -> Mesh {
    let mut rotor = Mesh::new();
    for i in 0..config.blade_count {
        let offset = TAU * i as f32 / config.blade_count as f32;
        rotor.append(&build_blade(config, params, twist, angular_position + offset));
    }
    rotor
}

/// Capped motor cylinder with a gentle bulge across its rings
pub fn build_housing(config: &FanConfig, params: &GeneratorParams) -> Mesh {
    let sides = params.housing_sides;
    let rings = params.housing_rings;
    let mut mesh = Mesh::with_capacity((rings + 1) * sides + 2, (rings + 2) * sides);

    for i in 0..=rings {
        let t = i as f32 / rings as f32;
        let z = -HOUSING_HALF_DEPTH + 2.0 * HOUSING_HALF_DEPTH * t;
        let radius = config.motor_radius * (1.0 + 0.1 * (t * PI).sin());

        for j in 0..sides {
            let theta = TAU * j as f32 / sides as f32;
            mesh.push_vertex(Point3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
    }

    // Wall quads, seam wrapped back to the first column
    for i in 0..rings {
        for j in 0..sides {
            let next = (j + 1) % sides;
            mesh.push_face(Face::quad(
                i * sides + j,
                i * sides + next,
                (i + 1) * sides + next,
                (i + 1) * sides + j,
            ));
        }
    }

    // End caps as triangle fans around center vertices
    let bottom_center = mesh.push_vertex(Point3::new(0.0, 0.0, -HOUSING_HALF_DEPTH));
    let top_center = mesh.push_vertex(Point3::new(0.0, 0.0, HOUSING_HALF_DEPTH));
    let top_row = rings * sides;
    for j in 0..sides {
        let next = (j + 1) % sides;
        mesh.push_face(Face::triangle(bottom_center, next, j));
        mesh.push_face(Face::triangle(top_center, top_row + j, top_row + next));
    }
    mesh
}

/// Stand pole and base disc; empty when the config has no stand
pub fn build_stand(config: &FanConfig, params: &GeneratorParams) -> Mesh {
    if !config.has_stand {
        return Mesh::new();
    }

    let sides = params.stand_sides;
    let rings = params.stand_rings;
    let height = config.pole_height;
    let mut mesh = Mesh::new();

    // Pole from the floor up to the housing, thicker at mid-height
    for i in 0..rings {
        let t = i as f32 / (rings - 1) as f32;
        let z = -height + t * (height - HOUSING_HALF_DEPTH);
        let mid_offset = (z + height / 2.0).abs() / (height / 2.0);
        let radius = POLE_RADIUS * (1.0 + 0.2 * (1.0 - mid_offset));

        for j in 0..sides {
            let theta = TAU * j as f32 / sides as f32;
            mesh.push_vertex(Point3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
    }
    for i in 0..rings - 1 {
        for j in 0..sides {
            let next = (j + 1) % sides;
            mesh.push_face(Face::quad(
                i * sides + j,
                i * sides + next,
                (i + 1) * sides + next,
                (i + 1) * sides + j,
            ));
        }
    }

    // Base plate: a short, slightly tapered cylinder under the pole
    let base_bottom = mesh.vertices.len();
    for j in 0..sides {
        let theta = TAU * j as f32 / sides as f32;
        mesh.push_vertex(Point3::new(
            BASE_RADIUS * theta.cos(),
            BASE_RADIUS * theta.sin(),
            -height,
        ));
    }
    let base_top = mesh.vertices.len();
    for j in 0..sides {
        let theta = TAU * j as f32 / sides as f32;
        mesh.push_vertex(Point3::new(
            BASE_RADIUS * 0.9 * theta.cos(),
            BASE_RADIUS * 0.9 * theta.sin(),
            -height + BASE_HEIGHT,
        ));
    }
    for j in 0..sides {
        let next = (j + 1) % sides;
        mesh.push_face(Face::quad(
            base_bottom + j,
            base_bottom + next,
            base_top + next,
            base_top + j,
        ));
    }
    let floor_center = mesh.push_vertex(Point3::new(0.0, 0.0, -height));
    let plate_center = mesh.push_vertex(Point3::new(0.0, 0.0, -height + BASE_HEIGHT));
    for j in 0..sides {
        let next = (j + 1) % sides;
        mesh.push_face(Face::triangle(floor_center, base_bottom + next, base_bottom + j));
        mesh.push_face(Face::triangle(plate_center, base_top + j, base_top + next));
    }
    mesh
}

/// Safety cage: concentric front and rear ring lattices joined by quads,
/// enclosing the blade sweep radius. Empty when the config has no cage.
pub fn build_cage(config: &FanConfig, params: &GeneratorParams) -> Mesh {
    if !config.has_cage {
        return Mesh::new();
    }

    let rings = params.cage_rings;
    let spokes = params.cage_spokes;
    let cage_radius = config.blade_length + params.cage_clearance;
    let mut mesh = Mesh::with_capacity(rings * spokes * 2, rings * spokes);

    for &z in &[CAGE_FRONT_Z, CAGE_REAR_Z] {
        for ring in 0..rings {
            let radius = cage_radius * (ring + 1) as f32 / rings as f32;
            for spoke in 0..spokes {
                let theta = TAU * spoke as f32 / spokes as f32;
                mesh.push_vertex(Point3::new(radius * theta.cos(), radius * theta.sin(), z));
            }
        }
    }

    let rear = rings * spokes;
    for ring in 0..rings {
        for spoke in 0..spokes {
            let next = (spoke + 1) % spokes;
            mesh.push_face(Face::quad(
                ring * spokes + spoke,
                ring * spokes + next,
                rear + ring * spokes + next,
                rear + ring * spokes + spoke,
            ));
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FanConfig, FanType};

    fn defaults() -> (FanConfig, GeneratorParams, TwistProfile) {
        (
            FanConfig::preset(FanType::Ceiling),
            GeneratorParams::default(),
            TwistProfile::default(),
        )
    }

    #[test]
    fn test_blade_counts_are_deterministic_functions_of_segments() {
        let (config, params, twist) = defaults();
        let blade = build_blade(&config, &params, &twist, 0.0);

        // Root and tip stations have zero width and are skipped
        let kept = params.blade_segments - 1;
        assert_eq!(blade.vertices.len(), kept * 2);
        assert_eq!(blade.faces.len(), kept - 1);
        assert!(blade.is_consistent());
    }

    #[test]
    fn test_blade_has_no_degenerate_faces() {
        let (config, params, twist) = defaults();
        let blade = build_blade(&config, &params, &twist, 1.3);
        for face in &blade.faces {
            assert!(blade.face_normal(face).is_some());
        }
    }

    #[test]
    fn test_blade_generation_is_deterministic() {
        let (config, params, twist) = defaults();
        let a = build_blade_set(&config, &params, &twist, 0.42);
        let b = build_blade_set(&config, &params, &twist, 0.42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blade_set_replicates_per_blade_count() {
        let (config, params, twist) = defaults();
        let single = build_blade(&config, &params, &twist, 0.0);
        let rotor = build_blade_set(&config, &params, &twist, 0.0);
        assert_eq!(rotor.faces.len(), single.faces.len() * config.blade_count as usize);
        assert!(rotor.is_consistent());
    }

    #[test]
    fn test_blade_spin_moves_vertices() {
        let (config, params, twist) = defaults();
        let a = build_blade_set(&config, &params, &twist, 0.0);
        let b = build_blade_set(&config, &params, &twist, 0.5);
        assert_eq!(a.vertices.len(), b.vertices.len());
        assert_ne!(a, b);
    }

    #[test]
    fn test_twist_profiles() {
        let sinusoidal = TwistProfile::default();
        assert!(sinusoidal.angle_at(0.0).abs() < 1e-6);
        assert!((sinusoidal.angle_at(0.5) - 15.0_f32.to_radians()).abs() < 1e-6);

        let linear = TwistProfile::Linear { tip_angle: 0.4 };
        assert!((linear.angle_at(1.0) - 0.4).abs() < 1e-6);
        assert!((linear.angle_at(0.25) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_housing_is_watertight_enough_for_normals() {
        let (config, params, _) = defaults();
        let housing = build_housing(&config, &params);
        assert!(housing.is_consistent());
        assert_eq!(
            housing.vertices.len(),
            (params.housing_rings + 1) * params.housing_sides + 2
        );
        assert_eq!(
            housing.faces.len(),
            (params.housing_rings + 2) * params.housing_sides
        );
        for face in &housing.faces {
            assert!(housing.face_normal(face).is_some());
        }
    }

    #[test]
    fn test_stand_only_when_configured() {
        let params = GeneratorParams::default();
        let ceiling = FanConfig::preset(FanType::Ceiling);
        assert!(build_stand(&ceiling, &params).is_empty());

        let table = FanConfig::preset(FanType::Table);
        let stand = build_stand(&table, &params);
        assert!(!stand.is_empty());
        assert!(stand.is_consistent());
        // Base sits on the floor at the pole height
        let lowest = stand.vertices.iter().map(|v| v.z).fold(f32::MAX, f32::min);
        assert!((lowest + table.pole_height).abs() < 1e-5);
    }

    #[test]
    fn test_tower_pole_is_taller() {
        let params = GeneratorParams::default();
        let tower = build_stand(&FanConfig::preset(FanType::Tower), &params);
        let table = build_stand(&FanConfig::preset(FanType::Table), &params);
        let depth = |mesh: &Mesh| mesh.vertices.iter().map(|v| v.z).fold(f32::MAX, f32::min);
        assert!(depth(&tower) < depth(&table));
    }

    #[test]
    fn test_cage_encloses_blade_sweep() {
        let params = GeneratorParams::default();
        let table = FanConfig::preset(FanType::Table);
        let cage = build_cage(&table, &params);
        assert!(cage.is_consistent());
        let radius = cage.bounding_radius();
        assert!(radius >= table.blade_length + params.cage_clearance - 1e-4);

        let ceiling = FanConfig::preset(FanType::Ceiling);
        assert!(build_cage(&ceiling, &params).is_empty());
    }
}
