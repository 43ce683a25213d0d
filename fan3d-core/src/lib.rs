/// FAN3D Core Library - Parametric fan geometry, physics and lighting
///
/// This library provides the renderer-agnostic core for animating
/// parametric 3D fan models: procedural mesh generation for blades,
/// housing, stand and safety cage, fixed-step rotation/oscillation
/// physics, and per-face shading under selectable lighting modes.
///
/// Frame drivers own the event loop and rendering; the core consumes
/// discrete input events and produces a renderable frame per tick.

pub mod config;
pub mod generator;
pub mod geometry;
pub mod lighting;
pub mod model;
pub mod physics;
pub mod transform;

// Re-export commonly used types
pub use config::{ConfigError, FanConfig, FanType};
pub use generator::{GeneratorParams, TwistProfile};
pub use geometry::{Face, Mesh, Rgba};
pub use lighting::{LightingContext, LightingMode};
pub use model::{FanModel, FanPart, InputEvent, MeshGroup, RenderableFrame};
pub use physics::{PhysicsParams, PhysicsState};
pub use transform::Assembly;
