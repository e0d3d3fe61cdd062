//! Decoder construction parameters and their validation.

/// Error type for decoder construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Lower bound is greater than the upper bound.
    InvalidBounds { min: i32, max: i32 },
}

/// Hardware identifiers of the two encoder lines.
///
/// Opaque to the decoder; kept so logs can say which encoder spoke.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Line A.
    pub left: u8,
    /// Line B.
    pub right: u8,
}

impl PinAssignment {
    #[must_use]
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }
}

/// Inclusive value range `[min, max]` with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    min: i32,
    max: i32,
}

impl Bounds {
    /// Create a range, rejecting `min > max`.
    pub const fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            Err(ConfigError::InvalidBounds { min, max })
        } else {
            Ok(Self { min, max })
        }
    }

    #[inline]
    #[must_use]
    pub const fn min(self) -> i32 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> i32 {
        self.max
    }

    /// Constrain `value` to the range.
    #[inline]
    #[must_use]
    pub const fn clamp(self, value: i32) -> i32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Whether a detent that clamping swallowed still notifies the observer.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaturationPolicy {
    /// Notify on every committed detent, even when the value sits at a bound.
    #[default]
    Notify,
    /// Skip the observer when the value did not actually change.
    Suppress,
}

/// Configuration for a [`QuadratureDecoder`](crate::QuadratureDecoder).
///
/// Defaults to bounds `0..=100`, start value `0`, and
/// [`SaturationPolicy::Notify`].
///
/// # Example
///
/// ```
/// use quadrature_encoder::{DecoderConfig, PinAssignment, SaturationPolicy};
///
/// let config = DecoderConfig::new(PinAssignment::new(26, 19))
///     .with_bounds(-10, 10)
///     .with_start_value(0)
///     .with_saturation(SaturationPolicy::Suppress);
/// assert_eq!(config.max_value, 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    pub pins: PinAssignment,
    pub min_value: i32,
    pub max_value: i32,
    /// Initial value. Clamped into the bounds at construction.
    pub start_value: i32,
    pub saturation: SaturationPolicy,
}

impl DecoderConfig {
    /// Default configuration for the given pins.
    #[must_use]
    pub const fn new(pins: PinAssignment) -> Self {
        Self {
            pins,
            min_value: 0,
            max_value: 100,
            start_value: 0,
            saturation: SaturationPolicy::Notify,
        }
    }

    #[must_use]
    pub const fn with_pins(self, pins: PinAssignment) -> Self {
        Self { pins, ..self }
    }

    #[must_use]
    pub const fn with_bounds(self, min_value: i32, max_value: i32) -> Self {
        Self {
            min_value,
            max_value,
            ..self
        }
    }

    #[must_use]
    pub const fn with_start_value(self, start_value: i32) -> Self {
        Self {
            start_value,
            ..self
        }
    }

    #[must_use]
    pub const fn with_saturation(self, saturation: SaturationPolicy) -> Self {
        Self { saturation, ..self }
    }

    /// Validate the configured range.
    pub const fn bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::new(self.min_value, self.max_value)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new(PinAssignment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_rejects_inverted_range() {
        assert_eq!(
            Bounds::new(10, 0),
            Err(ConfigError::InvalidBounds { min: 10, max: 0 })
        );
    }

    #[test]
    fn test_bounds_single_point_range() {
        let bounds = Bounds::new(7, 7).unwrap();
        assert_eq!(bounds.clamp(-100), 7);
        assert_eq!(bounds.clamp(100), 7);
        assert!(bounds.contains(7));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(-5, 5).unwrap();
        assert_eq!(bounds.clamp(-6), -5);
        assert_eq!(bounds.clamp(0), 0);
        assert_eq!(bounds.clamp(i32::MAX), 5);
        assert!(!bounds.contains(6));
    }

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.min_value, 0);
        assert_eq!(config.max_value, 100);
        assert_eq!(config.start_value, 0);
        assert_eq!(config.saturation, SaturationPolicy::Notify);
    }

    #[test]
    fn test_builder_helpers() {
        let config = DecoderConfig::default()
            .with_pins(PinAssignment::new(26, 19))
            .with_bounds(1, 3)
            .with_start_value(2)
            .with_saturation(SaturationPolicy::Suppress);
        assert_eq!(config.pins, PinAssignment::new(26, 19));
        assert_eq!(config.bounds(), Bounds::new(1, 3));
        assert_eq!(config.start_value, 2);
        assert_eq!(config.saturation, SaturationPolicy::Suppress);
    }
}
