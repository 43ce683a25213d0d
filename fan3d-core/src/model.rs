/// Fan model composition: physics + generators + lighting per frame
use crate::config::{ConfigError, FanConfig, FanType};
use crate::generator::{self, GeneratorParams, TwistProfile};
use crate::geometry::{Mesh, Rgba};
use crate::lighting::{LightingContext, LightingMode};
use crate::physics::{PhysicsParams, PhysicsState};
use crate::transform::Assembly;

/// Discrete control inputs forwarded by the frame driver.
///
/// The core owns no input devices; whatever windowing or terminal layer
/// drives it maps its own events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SpeedUp,
    SpeedDown,
    TogglePower,
    ToggleOscillation,
    CycleLighting,
    SelectFanType(FanType),
}

/// Which sub-assembly a mesh group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanPart {
    Blades,
    Housing,
    Stand,
    Cage,
}

/// One shaded sub-mesh: geometry plus a per-face color
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub part: FanPart,
    pub mesh: Mesh,
    pub colors: Vec<Rgba>,
}

/// Everything the renderer needs for one frame, handed over by value
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableFrame {
    pub groups: Vec<MeshGroup>,
}

impl RenderableFrame {
    /// Radius of the whole assembly, for camera framing
    pub fn bounding_radius(&self) -> f32 {
        self.groups
            .iter()
            .map(|group| group.mesh.bounding_radius())
            .fold(0.0, f32::max)
    }
}

/// One fan instance: owns its configuration, physics state and lighting
/// mode, and produces a shaded face list once per tick.
///
/// Instances share no state; multiple fans can be advanced independently
/// from separate call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct FanModel {
    fan_type: FanType,
    config: FanConfig,
    physics: PhysicsState,
    lighting_mode: LightingMode,
    physics_params: PhysicsParams,
    generator_params: GeneratorParams,
    twist: TwistProfile,
}

impl FanModel {
    pub fn new(fan_type: FanType) -> Result<Self, ConfigError> {
        let config = FanConfig::preset(fan_type);
        config.validate()?;
        let physics_params = PhysicsParams::default();
        Ok(Self {
            fan_type,
            config,
            physics: PhysicsState::at_rest(physics_params.clone()),
            lighting_mode: LightingMode::Realistic,
            physics_params,
            generator_params: GeneratorParams::default(),
            twist: TwistProfile::default(),
        })
    }

    /// Swap to a fan type preset, resetting the physics state to rest.
    /// On error the previous configuration and physics survive untouched.
    pub fn configure(&mut self, fan_type: FanType) -> Result<(), ConfigError> {
        self.apply_config(fan_type, FanConfig::preset(fan_type))
    }

    /// Same contract as [`configure`](Self::configure) for a
    /// caller-supplied configuration.
    pub fn configure_custom(&mut self, config: FanConfig) -> Result<(), ConfigError> {
        self.apply_config(self.fan_type, config)
    }

    fn apply_config(&mut self, fan_type: FanType, config: FanConfig) -> Result<(), ConfigError> {
        // Validate before touching anything so a rejected configuration
        // leaves no partial mutation behind.
        config.validate()?;
        self.fan_type = fan_type;
        self.config = config;
        self.physics = PhysicsState::at_rest(self.physics_params.clone());
        Ok(())
    }

    /// Apply one discrete control input. Mutates control targets only;
    /// never renders. Only fan-type selection can fail.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), ConfigError> {
        match event {
            InputEvent::SpeedUp => self.physics.speed_up(),
            InputEvent::SpeedDown => self.physics.speed_down(),
            InputEvent::TogglePower => self.physics.toggle_power(),
            InputEvent::ToggleOscillation => self.physics.toggle_oscillation(),
            InputEvent::CycleLighting => self.lighting_mode = self.lighting_mode.cycle(),
            InputEvent::SelectFanType(fan_type) => self.configure(fan_type)?,
        }
        Ok(())
    }

    /// Advance the physics one step and rebuild the shaded face list.
    /// Infallible under a valid configuration: no I/O, no external calls.
    pub fn advance_frame(&mut self, dt: f32) -> RenderableFrame {
        self.physics.advance(dt);

        // Tilt and oscillation orient the head; the stand stays bolted
        // to the floor.
        let head = Assembly::orientation(
            self.config.tilt_angle.to_radians(),
            self.physics.yaw_offset(),
        );
        let context = LightingContext::new(self.lighting_mode);

        let mut groups = Vec::with_capacity(4);
        let mut push = |part: FanPart, mesh: Mesh, base: Rgba| {
            if !mesh.is_empty() {
                let colors = context.tint(&mesh, base);
                groups.push(MeshGroup { part, mesh, colors });
            }
        };

        let rotor = generator::build_blade_set(
            &self.config,
            &self.generator_params,
            &self.twist,
            self.physics.angular_position,
        );
        push(FanPart::Blades, rotor.transformed(&head), self.config.base_color);
        push(
            FanPart::Housing,
            generator::build_housing(&self.config, &self.generator_params).transformed(&head),
            self.config.motor_color,
        );
        push(
            FanPart::Stand,
            generator::build_stand(&self.config, &self.generator_params),
            self.config.stand_color,
        );
        push(
            FanPart::Cage,
            generator::build_cage(&self.config, &self.generator_params).transformed(&head),
            self.config.cage_color,
        );

        RenderableFrame { groups }
    }

    pub fn fan_type(&self) -> FanType {
        self.fan_type
    }

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsState {
        &self.physics
    }

    pub fn lighting_mode(&self) -> LightingMode {
        self.lighting_mode
    }

    pub fn is_powered(&self) -> bool {
        self.physics.powered
    }

    pub fn is_oscillating(&self) -> bool {
        self.physics.oscillating
    }

    pub fn current_speed_rpm(&self) -> f32 {
        self.physics.current_speed_rpm()
    }

    pub fn target_speed_rpm(&self) -> f32 {
        self.physics.target_speed_rpm()
    }
}
