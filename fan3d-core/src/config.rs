/// Fan type presets and validated configuration
use crate::geometry::Rgba;
use std::fmt;
use thiserror::Error;

/// Errors raised when a fan configuration is rejected.
///
/// Raised synchronously at configuration time; an invalid configuration
/// never replaces the previous valid one.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fan must have at least one blade")]
    ZeroBladeCount,
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
    #[error("{name} has a component outside [0, 1]")]
    ColorOutOfRange { name: &'static str },
}

/// The five supported fan types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanType {
    Ceiling,
    Table,
    Tower,
    Industrial,
    Desk,
}

impl FanType {
    pub const ALL: [FanType; 5] = [
        FanType::Ceiling,
        FanType::Table,
        FanType::Tower,
        FanType::Industrial,
        FanType::Desk,
    ];

    /// Map the 1-5 keyboard selection to a fan type
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(FanType::Ceiling),
            2 => Some(FanType::Table),
            3 => Some(FanType::Tower),
            4 => Some(FanType::Industrial),
            5 => Some(FanType::Desk),
            _ => None,
        }
    }
}

impl fmt::Display for FanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FanType::Ceiling => "Ceiling",
            FanType::Table => "Table",
            FanType::Tower => "Tower",
            FanType::Industrial => "Industrial",
            FanType::Desk => "Desk",
        };
        write!(f, "{name}")
    }
}

/// Immutable parameters describing one fan's shape and colors.
///
/// Selected once per fan-type switch; geometry is rebuilt from it every
/// frame but the configuration itself never changes mid-animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FanConfig {
    pub blade_count: u32,
    pub blade_length: f32,
    pub blade_width: f32,
    pub motor_radius: f32,
    pub has_stand: bool,
    pub has_cage: bool,
    /// Pitch of the fan head relative to its mount, in degrees
    pub tilt_angle: f32,
    /// Height of the stand pole, ignored when `has_stand` is false
    pub pole_height: f32,
    pub base_color: Rgba,
    pub motor_color: Rgba,
    pub stand_color: Rgba,
    pub cage_color: Rgba,
}

const BLADE_COLOR: Rgba = Rgba::new(0.2, 0.3, 0.5, 0.9);
const MOTOR_COLOR: Rgba = Rgba::new(0.3, 0.3, 0.3, 1.0);
const STAND_COLOR: Rgba = Rgba::new(0.4, 0.4, 0.4, 1.0);
const CAGE_COLOR: Rgba = Rgba::new(0.5, 0.5, 0.5, 0.3);

impl FanConfig {
    /// The built-in configuration for a fan type
    pub fn preset(fan_type: FanType) -> Self {
        let base = Self {
            blade_count: 3,
            blade_length: 1.5,
            blade_width: 0.3,
            motor_radius: 0.2,
            has_stand: false,
            has_cage: false,
            tilt_angle: 0.0,
            pole_height: 1.5,
            base_color: BLADE_COLOR,
            motor_color: MOTOR_COLOR,
            stand_color: STAND_COLOR,
            cage_color: CAGE_COLOR,
        };
        match fan_type {
            FanType::Ceiling => base,
            FanType::Table => Self {
                blade_count: 4,
                blade_length: 0.8,
                blade_width: 0.2,
                motor_radius: 0.15,
                has_stand: true,
                has_cage: true,
                tilt_angle: 15.0,
                ..base
            },
            FanType::Tower => Self {
                blade_count: 20,
                blade_length: 0.3,
                blade_width: 0.1,
                motor_radius: 0.1,
                has_stand: true,
                pole_height: 2.5,
                ..base
            },
            FanType::Industrial => Self {
                blade_count: 5,
                blade_length: 2.0,
                blade_width: 0.4,
                motor_radius: 0.3,
                has_stand: true,
                ..base
            },
            FanType::Desk => Self {
                blade_count: 3,
                blade_length: 0.5,
                blade_width: 0.15,
                motor_radius: 0.1,
                has_stand: true,
                has_cage: true,
                tilt_angle: 20.0,
                ..base
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blade_count == 0 {
            return Err(ConfigError::ZeroBladeCount);
        }
        let dimensions = [
            ("blade_length", self.blade_length),
            ("blade_width", self.blade_width),
            ("motor_radius", self.motor_radius),
            ("pole_height", self.pole_height),
        ];
        for (name, value) in dimensions {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        let colors = [
            ("base_color", &self.base_color),
            ("motor_color", &self.motor_color),
            ("stand_color", &self.stand_color),
            ("cage_color", &self.cage_color),
        ];
        for (name, color) in colors {
            if !color.is_valid() {
                return Err(ConfigError::ColorOutOfRange { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_validate() {
        for fan_type in FanType::ALL {
            let config = FanConfig::preset(fan_type);
            assert_eq!(config.validate(), Ok(()), "{fan_type} preset invalid");
        }
    }

    #[test]
    fn test_zero_blade_count_rejected() {
        let mut config = FanConfig::preset(FanType::Ceiling);
        config.blade_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBladeCount));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut config = FanConfig::preset(FanType::Table);
        config.blade_length = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension {
                name: "blade_length",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_nan_dimension_rejected() {
        let mut config = FanConfig::preset(FanType::Desk);
        config.motor_radius = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDimension {
                name: "motor_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range_color_rejected() {
        let mut config = FanConfig::preset(FanType::Ceiling);
        config.base_color = Rgba::new(1.5, 0.0, 0.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ColorOutOfRange { name: "base_color" })
        );
    }

    #[test]
    fn test_fan_type_index_mapping() {
        assert_eq!(FanType::from_index(1), Some(FanType::Ceiling));
        assert_eq!(FanType::from_index(5), Some(FanType::Desk));
        assert_eq!(FanType::from_index(0), None);
        assert_eq!(FanType::from_index(6), None);
    }
}
