//! Platform gesture thresholds.
//!
//! Values are in logical pixels unless noted. The host resolves one
//! [`ViewConfiguration`] per display and hands it to panels; trackers read it
//! once per gesture session and cache what they need.

use std::fmt;

use dragpanel_animation::{FlingCalculator, DEFAULT_MIN_VELOCITY};

/// Distance a pointer must travel before a press becomes a drag.
///
/// Matches the common platform touch slop (8dp).
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NegativeTouchSlop(f32),
    InvalidVelocity { name: &'static str, value: f32 },
    MinVelocityAboveMax { min: f32, max: f32 },
    InvalidFriction(f32),
    InvalidDensity(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeTouchSlop(value) => {
                write!(f, "touch slop must be finite and non-negative, got {value}")
            }
            ConfigError::InvalidVelocity { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            ConfigError::MinVelocityAboveMax { min, max } => {
                write!(f, "min fling velocity {min} exceeds max fling velocity {max}")
            }
            ConfigError::InvalidFriction(value) => {
                write!(f, "scroll friction must be finite and positive, got {value}")
            }
            ConfigError::InvalidDensity(value) => {
                write!(f, "density must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfiguration {
    touch_slop: f32,
    min_fling_velocity: f32,
    max_fling_velocity: f32,
    scroll_friction: f32,
    density: f32,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            scroll_friction: FlingCalculator::DEFAULT_FRICTION,
            density: 1.0,
        }
    }
}

impl ViewConfiguration {
    /// Defaults for a display with the given density.
    pub fn new(density: f32) -> Result<Self, ConfigError> {
        Self::builder().density(density).build()
    }

    pub fn builder() -> ViewConfigurationBuilder {
        ViewConfigurationBuilder {
            config: Self::default(),
        }
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    /// Touch slop in device pixels.
    pub fn scaled_touch_slop(&self) -> i32 {
        (self.touch_slop * self.density).round() as i32
    }

    pub fn min_fling_velocity(&self) -> f32 {
        self.min_fling_velocity
    }

    pub fn max_fling_velocity(&self) -> f32 {
        self.max_fling_velocity
    }

    pub fn scroll_friction(&self) -> f32 {
        self.scroll_friction
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn fling_calculator(&self) -> FlingCalculator {
        FlingCalculator::new(self.scroll_friction, self.density)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ViewConfigurationBuilder {
    config: ViewConfiguration,
}

impl ViewConfigurationBuilder {
    pub fn touch_slop(mut self, touch_slop: f32) -> Self {
        self.config.touch_slop = touch_slop;
        self
    }

    pub fn min_fling_velocity(mut self, velocity: f32) -> Self {
        self.config.min_fling_velocity = velocity;
        self
    }

    pub fn max_fling_velocity(mut self, velocity: f32) -> Self {
        self.config.max_fling_velocity = velocity;
        self
    }

    pub fn scroll_friction(mut self, friction: f32) -> Self {
        self.config.scroll_friction = friction;
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        self.config.density = density;
        self
    }

    pub fn build(self) -> Result<ViewConfiguration, ConfigError> {
        let config = self.config;
        if !config.touch_slop.is_finite() || config.touch_slop < 0.0 {
            return Err(ConfigError::NegativeTouchSlop(config.touch_slop));
        }
        for (name, value) in [
            ("min fling velocity", config.min_fling_velocity),
            ("max fling velocity", config.max_fling_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidVelocity { name, value });
            }
        }
        if config.min_fling_velocity > config.max_fling_velocity {
            return Err(ConfigError::MinVelocityAboveMax {
                min: config.min_fling_velocity,
                max: config.max_fling_velocity,
            });
        }
        if !config.scroll_friction.is_finite() || config.scroll_friction <= 0.0 {
            return Err(ConfigError::InvalidFriction(config.scroll_friction));
        }
        if !config.density.is_finite() || config.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(config.density));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_constants() {
        let config = ViewConfiguration::default();
        assert_eq!(config.scaled_touch_slop(), 8);
        assert_eq!(config.max_fling_velocity(), 8_000.0);
        assert_eq!(config.min_fling_velocity(), 1.0);
        assert_eq!(config.scroll_friction(), 0.015);
    }

    #[test]
    fn touch_slop_scales_with_density() {
        let config = ViewConfiguration::new(2.625).expect("valid density");
        assert_eq!(config.scaled_touch_slop(), 21);
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert_eq!(
            ViewConfiguration::builder().touch_slop(-1.0).build(),
            Err(ConfigError::NegativeTouchSlop(-1.0))
        );
        assert_eq!(
            ViewConfiguration::new(0.0),
            Err(ConfigError::InvalidDensity(0.0))
        );
        assert_eq!(
            ViewConfiguration::builder()
                .min_fling_velocity(100.0)
                .max_fling_velocity(50.0)
                .build(),
            Err(ConfigError::MinVelocityAboveMax {
                min: 100.0,
                max: 50.0
            })
        );
        assert!(matches!(
            ViewConfiguration::builder()
                .max_fling_velocity(f32::INFINITY)
                .build(),
            Err(ConfigError::InvalidVelocity { .. })
        ));
        assert!(matches!(
            ViewConfiguration::builder().scroll_friction(0.0).build(),
            Err(ConfigError::InvalidFriction(_))
        ));
    }

    #[test]
    fn errors_render_readable_messages() {
        let message = ConfigError::InvalidDensity(-2.0).to_string();
        assert_eq!(message, "density must be finite and positive, got -2");
    }
}
