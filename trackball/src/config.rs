//! Static configuration of the trackball engine.
//!
//! The configuration is built once at startup, either in code or decoded from
//! postcard bytes, and is validated before any task is started. Nothing in it
//! changes at runtime.

use embassy_time::Duration;
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Time given to the sensor to power up (or settle) around every power rail switch.
pub const GRACE_PERIOD: Duration = Duration::from_millis(100);

/// Distance measure used by the acceleration curve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Norm {
    /// `dx² + dy²`
    Euclidean = 1,
    /// `(|dx| + |dy|)²`, favours diagonal motion
    Max = 2,
}

impl TryFrom<u8> for Norm {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Norm::Euclidean),
            2 => Ok(Norm::Max),
            _ => Err(ConfigError::InvalidNorm(value)),
        }
    }
}

/// Per-axis settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Multiplier applied to the raw delta before acceleration
    pub move_factor: i32,
    pub invert_move: bool,
    /// Percentage of the accumulated motion kept back every cycle
    pub move_inertia: u8,
    /// Raw delta is divided by this in scroll mode
    pub scroll_divisor: i32,
    pub invert_scroll: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            move_factor: 20,
            invert_move: false,
            move_inertia: 30,
            scroll_divisor: 2,
            invert_scroll: false,
        }
    }
}

impl AxisConfig {
    /// Move factor with the invert flag folded into its sign.
    pub fn signed_move_factor(&self) -> i32 {
        if self.invert_move { -self.move_factor } else { self.move_factor }
    }
}

/// Configuration of the trackball engine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackballConfig {
    pub x: AxisConfig,
    pub y: AxisConfig,
    /// Swap x and y of the raw sample
    pub swap_axes: bool,
    pub poll_interval_ms: u32,
    /// HID mouse button index (0 = left) reported for the ball click
    pub button: u8,
    pub norm: Norm,
    pub exactness: i32,
    pub max_accel: i32,
    /// Mode at startup
    pub mode: Mode,
    /// Idle time after which the default layer is requested, 0 disables the timer
    pub idle_timeout_secs: u32,
    /// Layer gating the sensor power, 0 keeps the sensor always on
    pub power_layer: u8,
}

impl Default for TrackballConfig {
    fn default() -> Self {
        Self {
            x: AxisConfig::default(),
            y: AxisConfig::default(),
            swap_axes: false,
            poll_interval_ms: 10,
            button: 0,
            norm: Norm::Euclidean,
            exactness: 10,
            max_accel: 50,
            mode: Mode::Move,
            idle_timeout_secs: 0,
            power_layer: 0,
        }
    }
}

/// Errors of configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Exactness must be positive
    InvalidExactness(i32),
    /// Max acceleration must be positive
    InvalidMaxAccel(i32),
    /// Scroll divisor must not be zero
    ZeroScrollDivisor,
    /// Move factor must not be negative, use `invert_move` instead
    NegativeMoveFactor(i32),
    /// Scroll divisor must not be negative, use `invert_scroll` instead
    NegativeScrollDivisor(i32),
    /// Inertia must stay below 100%, otherwise motion never decays
    InvalidInertia(u8),
    /// Poll interval must not be zero
    ZeroPollInterval,
    /// Button index doesn't fit the HID button bitmask
    InvalidButton(u8),
    /// Unknown norm encoding
    InvalidNorm(u8),
    /// Unknown mode encoding
    InvalidMode(u8),
    /// Serialized configuration couldn't be decoded
    Decode,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidExactness(v) => write!(f, "exactness must be positive, got {}", v),
            ConfigError::InvalidMaxAccel(v) => write!(f, "max_accel must be positive, got {}", v),
            ConfigError::ZeroScrollDivisor => write!(f, "scroll divisor must not be zero"),
            ConfigError::NegativeMoveFactor(v) => write!(f, "move factor must not be negative, got {}", v),
            ConfigError::NegativeScrollDivisor(v) => write!(f, "scroll divisor must not be negative, got {}", v),
            ConfigError::InvalidInertia(v) => write!(f, "inertia must be at most 99%, got {}%", v),
            ConfigError::ZeroPollInterval => write!(f, "poll interval must not be zero"),
            ConfigError::InvalidButton(v) => write!(f, "mouse button index {} out of range", v),
            ConfigError::InvalidNorm(v) => write!(f, "unknown norm {}", v),
            ConfigError::InvalidMode(v) => write!(f, "unknown mode {}", v),
            ConfigError::Decode => write!(f, "malformed configuration"),
        }
    }
}

impl TrackballConfig {
    const MAX_INERTIA: u8 = 99;
    const MAX_BUTTON: u8 = 7;

    /// Decode a postcard encoded configuration and validate it.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field that the engine would otherwise divide by, or that would break an invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exactness <= 0 {
            return Err(ConfigError::InvalidExactness(self.exactness));
        }
        if self.max_accel <= 0 {
            return Err(ConfigError::InvalidMaxAccel(self.max_accel));
        }
        for axis in [&self.x, &self.y] {
            if axis.move_factor < 0 {
                return Err(ConfigError::NegativeMoveFactor(axis.move_factor));
            }
            if axis.scroll_divisor < 0 {
                return Err(ConfigError::NegativeScrollDivisor(axis.scroll_divisor));
            }
            if axis.scroll_divisor == 0 {
                return Err(ConfigError::ZeroScrollDivisor);
            }
            if axis.move_inertia > Self::MAX_INERTIA {
                return Err(ConfigError::InvalidInertia(axis.move_inertia));
            }
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.button > Self::MAX_BUTTON {
            return Err(ConfigError::InvalidButton(self.button));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms as u64)
    }

    /// `None` when the idle timer is disabled
    pub fn idle_timeout(&self) -> Option<Duration> {
        match self.idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs as u64)),
        }
    }

    /// `None` when power gating is disabled
    pub fn power_layer(&self) -> Option<u8> {
        match self.power_layer {
            0 => None,
            layer => Some(layer),
        }
    }

    /// Move factors `(x, y)` with the invert flags applied.
    pub fn move_factors(&self) -> (i32, i32) {
        (self.x.signed_move_factor(), self.y.signed_move_factor())
    }

    /// Scroll divisors `(x, y)` with the invert flags applied.
    ///
    /// The y axis is negated unless inverted: HID wheel values grow upwards while sensor y grows downwards.
    pub fn scroll_divisors(&self) -> (i32, i32) {
        let x = if self.x.invert_scroll {
            -self.x.scroll_divisor
        } else {
            self.x.scroll_divisor
        };
        let y = if self.y.invert_scroll {
            self.y.scroll_divisor
        } else {
            -self.y.scroll_divisor
        };
        (x, y)
    }
}
