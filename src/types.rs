//! Core encoder types: PinState, Direction, Detent.

/// Logical levels of the two encoder lines packed into two bits.
///
/// Bit 1 is line A (left pin) and bit 0 is line B (right pin), so the
/// constants read the same way as the quadrature cycle is usually written:
/// `S10` means A high, B low.
///
/// # Example
///
/// ```
/// use quadrature_encoder::PinState;
///
/// assert_eq!(PinState::from_levels(true, false), PinState::S10);
/// assert!(PinState::S10.a());
/// assert!(!PinState::S10.b());
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinState(u8);

impl PinState {
    /// Both lines low. The rest position between detents.
    pub const S00: Self = Self(0b00);
    /// A low, B high.
    pub const S01: Self = Self(0b01);
    /// A high, B low.
    pub const S10: Self = Self(0b10);
    /// Both lines high.
    pub const S11: Self = Self(0b11);

    /// Alias for [`PinState::S00`].
    pub const REST: Self = Self::S00;

    /// Build a state from the two sampled line levels.
    #[inline]
    #[must_use]
    pub const fn from_levels(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Build a state from raw bits. Anything above bit 1 is ignored.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Level of line A (left pin).
    #[inline]
    #[must_use]
    pub const fn a(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Level of line B (right pin).
    #[inline]
    #[must_use]
    pub const fn b(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Check if both lines are low.
    #[inline]
    #[must_use]
    pub const fn is_rest(self) -> bool {
        self.0 == 0
    }
}

/// Rotation direction of the encoder shaft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Counter-clockwise. Decrements the value.
    Left,
    /// Clockwise. Increments the value.
    Right,
}

impl Direction {
    /// Signed value delta for one detent in this direction.
    #[inline]
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Single-letter tag (`'L'` or `'R'`) for compact log output.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// A committed detent: one full step of the quadrature cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Detent {
    /// Value after the step (already clamped).
    pub value: i32,
    /// Value before the step.
    pub previous: i32,
    /// Direction the shaft turned.
    pub direction: Direction,
}

impl Detent {
    /// Check if clamping swallowed the step, leaving the value unchanged.
    #[inline]
    #[must_use]
    pub const fn is_saturated(&self) -> bool {
        self.value == self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_state_from_levels() {
        assert_eq!(PinState::from_levels(false, false), PinState::S00);
        assert_eq!(PinState::from_levels(false, true), PinState::S01);
        assert_eq!(PinState::from_levels(true, false), PinState::S10);
        assert_eq!(PinState::from_levels(true, true), PinState::S11);
    }

    #[test]
    fn test_pin_state_from_bits_masks_high_bits() {
        assert_eq!(PinState::from_bits(0b1110), PinState::S10);
        assert_eq!(PinState::from_bits(0xFF), PinState::S11);
    }

    #[test]
    fn test_pin_state_levels() {
        assert!(PinState::S11.a() && PinState::S11.b());
        assert!(!PinState::S01.a() && PinState::S01.b());
        assert!(PinState::REST.is_rest());
        assert!(!PinState::S01.is_rest());
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Left.step(), -1);
        assert_eq!(Direction::Right.step(), 1);
        assert_eq!(Direction::Right.as_char(), 'R');
    }

    #[test]
    fn test_detent_saturated() {
        let detent = Detent {
            value: 100,
            previous: 100,
            direction: Direction::Right,
        };
        assert!(detent.is_saturated());

        let detent = Detent {
            value: 4,
            previous: 5,
            direction: Direction::Left,
        };
        assert!(!detent.is_saturated());
    }
}
