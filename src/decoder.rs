//! Quadrature detent state machine.

use crate::config::{Bounds, ConfigError, DecoderConfig, PinAssignment, SaturationPolicy};
use crate::observer::{ObserverError, ValueObserver};
use crate::types::{Detent, Direction, PinState};

/// Decodes 2-bit pin samples into detents and tracks a bounded value.
///
/// Transitions that latch a direction:
///
/// | from | to   | direction |
/// |------|------|-----------|
/// | `00` | `01` | Right     |
/// | `01` | `11` | Right     |
/// | `11` | `10` | Right     |
/// | `00` | `10` | Left      |
/// | `10` | `11` | Left      |
/// | `11` | `01` | Left      |
///
/// Transitions back to rest commit a step: `01 -> 00` commits Left,
/// `10 -> 00` commits Right, each only if the latched direction agrees.
/// `11 -> 00` means one intermediate edge was missed and commits whatever
/// direction is latched. Every other pair (including a repeated state or a
/// double skip such as `00 -> 11`) is ignored.
///
/// The pin state advances on every event, matched or not.
pub struct QuadratureDecoder<O = ()> {
    pins: PinAssignment,
    bounds: Bounds,
    saturation: SaturationPolicy,
    state: PinState,
    direction: Option<Direction>,
    value: i32,
    observer: O,
}

impl<O: ValueObserver> QuadratureDecoder<O> {
    /// Create a decoder at rest.
    ///
    /// Fails if `min_value > max_value`. A start value outside the bounds
    /// is clamped.
    pub fn new(config: DecoderConfig, observer: O) -> Result<Self, ConfigError> {
        let bounds = config.bounds()?;

        Ok(Self {
            pins: config.pins,
            bounds,
            saturation: config.saturation,
            state: PinState::REST,
            direction: None,
            value: bounds.clamp(config.start_value),
            observer,
        })
    }

    /// Feed the two sampled line levels.
    #[inline]
    pub fn on_levels(&mut self, a: bool, b: bool) -> Result<Option<Detent>, ObserverError> {
        self.on_pin_change(PinState::from_levels(a, b))
    }

    /// Feed one pin-change event.
    ///
    /// Returns the committed detent, if this edge completed one. The detent
    /// is reported even when the observer is skipped or fails; an observer
    /// error is returned after the decoder state is already updated.
    pub fn on_pin_change(
        &mut self,
        new_state: PinState,
    ) -> Result<Option<Detent>, ObserverError> {
        let step = self.transition(new_state);
        self.state = new_state;

        let Some(direction) = step else {
            return Ok(None);
        };

        let detent = self.commit(direction);
        if detent.is_saturated() && self.saturation == SaturationPolicy::Suppress {
            return Ok(Some(detent));
        }

        self.observer.on_change(detent.value, detent.direction)?;
        Ok(Some(detent))
    }

    /// Latch a direction or return the direction to commit.
    fn transition(&mut self, new_state: PinState) -> Option<Direction> {
        match (self.state, new_state) {
            (PinState::S00, PinState::S01)
            | (PinState::S01, PinState::S11)
            | (PinState::S11, PinState::S10) => {
                self.direction = Some(Direction::Right);
                None
            }
            (PinState::S00, PinState::S10)
            | (PinState::S10, PinState::S11)
            | (PinState::S11, PinState::S01) => {
                self.direction = Some(Direction::Left);
                None
            }
            (PinState::S01, PinState::S00) => self.direction.filter(|d| *d == Direction::Left),
            (PinState::S10, PinState::S00) => self.direction.filter(|d| *d == Direction::Right),
            // Skipped 01 or 10 on the way back to rest.
            (PinState::S11, PinState::S00) => self.direction,
            _ => None,
        }
    }

    fn commit(&mut self, direction: Direction) -> Detent {
        let previous = self.value;
        self.value = self.bounds.clamp(previous.saturating_add(direction.step()));

        Detent {
            value: self.value,
            previous,
            direction,
        }
    }

    /// Get the current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrite the value, clamped into the bounds.
    ///
    /// Does not notify the observer and leaves the pin state and latched
    /// direction alone. Returns the stored value.
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.value = self.bounds.clamp(value);
        self.value
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Pin state as of the last processed event.
    #[inline]
    #[must_use]
    pub fn state(&self) -> PinState {
        self.state
    }

    /// Most recently latched direction, `None` until the first edge out of rest.
    #[inline]
    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn pins(&self) -> PinAssignment {
        self.pins
    }

    #[inline]
    #[must_use]
    pub fn saturation(&self) -> SaturationPolicy {
        self.saturation
    }

    /// Get a reference to the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Get a mutable reference to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Drop the decoder and hand back its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec;
    use std::vec::Vec;

    const CW: [PinState; 4] = [PinState::S01, PinState::S11, PinState::S10, PinState::S00];
    const CCW: [PinState; 4] = [PinState::S10, PinState::S11, PinState::S01, PinState::S00];

    // Records every notification
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(i32, Direction)>,
    }

    impl ValueObserver for Recorder {
        fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError> {
            self.calls.push((value, direction));
            Ok(())
        }
    }

    // Always fails
    struct Failing {
        attempts: usize,
    }

    impl ValueObserver for Failing {
        fn on_change(&mut self, _value: i32, _direction: Direction) -> Result<(), ObserverError> {
            self.attempts += 1;
            Err(ObserverError::Rejected)
        }
    }

    fn decoder(min: i32, max: i32, start: i32) -> QuadratureDecoder<Recorder> {
        let config = DecoderConfig::default()
            .with_bounds(min, max)
            .with_start_value(start);
        QuadratureDecoder::new(config, Recorder::default()).unwrap()
    }

    fn feed<O: ValueObserver>(
        decoder: &mut QuadratureDecoder<O>,
        states: &[PinState],
    ) -> Vec<Detent> {
        states
            .iter()
            .filter_map(|s| decoder.on_pin_change(*s).unwrap())
            .collect()
    }

    #[test]
    fn test_new_starts_at_rest() {
        let d = decoder(0, 100, 42);
        assert_eq!(d.value(), 42);
        assert_eq!(d.state(), PinState::REST);
        assert_eq!(d.last_direction(), None);
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let config = DecoderConfig::default().with_bounds(5, 1);
        let result = QuadratureDecoder::new(config, ());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidBounds { min: 5, max: 1 })
        ));
    }

    #[test]
    fn test_new_clamps_start_value() {
        assert_eq!(decoder(0, 10, 50).value(), 10);
        assert_eq!(decoder(0, 10, -3).value(), 0);
    }

    #[test]
    fn test_clockwise_detent() {
        let mut d = decoder(0, 100, 10);
        let detents = feed(&mut d, &CW);

        assert_eq!(d.value(), 11);
        assert_eq!(
            detents,
            vec![Detent {
                value: 11,
                previous: 10,
                direction: Direction::Right
            }]
        );
        assert_eq!(d.observer().calls, vec![(11, Direction::Right)]);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut d = decoder(0, 100, 10);
        feed(&mut d, &CCW);

        assert_eq!(d.value(), 9);
        assert_eq!(d.observer().calls, vec![(9, Direction::Left)]);
    }

    #[test]
    fn test_one_notification_per_detent() {
        let mut d = decoder(0, 100, 0);
        // Only the final edge back to rest commits
        for state in &CW[..3] {
            assert_eq!(d.on_pin_change(*state), Ok(None));
        }
        assert!(d.observer().calls.is_empty());
        assert!(d.on_pin_change(PinState::S00).unwrap().is_some());
        assert_eq!(d.observer().calls.len(), 1);
    }

    #[test]
    fn test_skipped_intermediate_edge_still_commits() {
        let mut d = decoder(0, 100, 10);
        feed(&mut d, &[PinState::S01, PinState::S11, PinState::S00]);
        assert_eq!(d.value(), 11);
        assert_eq!(d.observer().calls, vec![(11, Direction::Right)]);

        feed(&mut d, &[PinState::S10, PinState::S11, PinState::S00]);
        assert_eq!(d.value(), 10);
        assert_eq!(d.observer().calls[1], (10, Direction::Left));
    }

    #[test]
    fn test_double_skip_is_lost() {
        let mut d = decoder(0, 100, 10);
        feed(&mut d, &[PinState::S11]);
        assert_eq!(d.value(), 10);
        assert_eq!(d.state(), PinState::S11);
        assert_eq!(d.last_direction(), None);

        // Straight back to rest with no latched direction
        feed(&mut d, &[PinState::S00]);
        assert_eq!(d.value(), 10);
        assert!(d.observer().calls.is_empty());
    }

    #[test]
    fn test_repeated_state_is_noop() {
        let mut d = decoder(0, 100, 10);
        feed(&mut d, &[PinState::S00, PinState::S00]);
        feed(&mut d, &[PinState::S01, PinState::S01, PinState::S11, PinState::S11]);
        assert_eq!(d.value(), 10);
        assert!(d.observer().calls.is_empty());
        assert_eq!(d.state(), PinState::S11);
    }

    #[test]
    fn test_saturation_notifies_by_default() {
        let mut d = decoder(0, 5, 5);
        let detents = feed(&mut d, &CW);

        assert_eq!(d.value(), 5);
        assert!(detents[0].is_saturated());
        assert_eq!(d.observer().calls, vec![(5, Direction::Right)]);

        let mut d = decoder(0, 5, 0);
        feed(&mut d, &CCW);
        assert_eq!(d.value(), 0);
        assert_eq!(d.observer().calls, vec![(0, Direction::Left)]);
    }

    #[test]
    fn test_saturation_suppressed() {
        let config = DecoderConfig::default()
            .with_bounds(0, 1)
            .with_start_value(0)
            .with_saturation(SaturationPolicy::Suppress);
        let mut d = QuadratureDecoder::new(config, Recorder::default()).unwrap();

        feed(&mut d, &CW);
        let detents = feed(&mut d, &CW);

        assert_eq!(d.value(), 1);
        // Detent is still reported to the caller, just not to the observer
        assert_eq!(detents.len(), 1);
        assert_eq!(d.observer().calls, vec![(1, Direction::Right)]);
    }

    #[test]
    fn test_direction_memory_across_cycles() {
        let mut d = decoder(0, 100, 50);
        feed(&mut d, &CCW);
        feed(&mut d, &CW);
        feed(&mut d, &CW);
        feed(&mut d, &CCW);

        assert_eq!(d.value(), 50);
        assert_eq!(
            d.observer().calls,
            vec![
                (49, Direction::Left),
                (50, Direction::Right),
                (51, Direction::Right),
                (50, Direction::Left)
            ]
        );
    }

    #[test]
    fn test_reversal_mid_cycle() {
        let mut d = decoder(0, 100, 50);
        // Start clockwise, back off before reaching 11
        feed(&mut d, &[PinState::S01, PinState::S00]);
        assert_eq!(d.value(), 50);
        assert!(d.observer().calls.is_empty());

        // Start clockwise, turn back at 11, finish counter-clockwise
        feed(&mut d, &[PinState::S01, PinState::S11, PinState::S01, PinState::S00]);
        assert_eq!(d.value(), 49);
    }

    #[test]
    fn test_failing_observer_does_not_stall_state() {
        let config = DecoderConfig::default().with_start_value(10);
        let mut d = QuadratureDecoder::new(config, Failing { attempts: 0 }).unwrap();

        for state in &CW[..3] {
            assert_eq!(d.on_pin_change(*state), Ok(None));
        }
        assert_eq!(d.on_pin_change(PinState::S00), Err(ObserverError::Rejected));

        assert_eq!(d.value(), 11);
        assert_eq!(d.state(), PinState::S00);
        assert_eq!(d.observer().attempts, 1);

        // Next detent is decoded normally
        let _ = d.on_pin_change(PinState::S10);
        let _ = d.on_pin_change(PinState::S11);
        let _ = d.on_pin_change(PinState::S01);
        let _ = d.on_pin_change(PinState::S00);
        assert_eq!(d.value(), 10);
        assert_eq!(d.observer().attempts, 2);
    }

    #[test]
    fn test_set_value_clamps_without_notifying() {
        let mut d = decoder(-10, 10, 0);
        feed(&mut d, &[PinState::S01]);

        assert_eq!(d.set_value(25), 10);
        assert_eq!(d.value(), 10);
        assert_eq!(d.set_value(-3), -3);
        assert_eq!(d.set_value(i32::MIN), -10);

        assert!(d.observer().calls.is_empty());
        assert_eq!(d.state(), PinState::S01);
        assert_eq!(d.last_direction(), Some(Direction::Right));
    }

    #[test]
    fn test_on_levels() {
        let mut d = decoder(0, 100, 0);
        d.on_levels(false, true).unwrap();
        d.on_levels(true, true).unwrap();
        d.on_levels(true, false).unwrap();
        let detent = d.on_levels(false, false).unwrap();
        assert_eq!(detent.map(|d| d.direction), Some(Direction::Right));
        assert_eq!(d.value(), 1);
    }

    #[test]
    fn test_closure_observer() {
        let mut last = None;
        {
            let observer = |value: i32, direction: Direction| last = Some((value, direction));
            let mut d = QuadratureDecoder::new(DecoderConfig::default(), observer).unwrap();
            for state in CW {
                d.on_pin_change(state).unwrap();
            }
        }
        assert_eq!(last, Some((1, Direction::Right)));
    }

    #[test]
    fn test_value_stays_in_bounds() {
        let mut d = decoder(-3, 4, 0);
        // Simple LCG for a deterministic noisy event stream
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..10_000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            d.on_pin_change(PinState::from_bits((seed >> 16) as u8)).unwrap();
            assert!(d.bounds().contains(d.value()));
        }
        for (value, _) in &d.observer().calls {
            assert!((-3..=4).contains(value));
        }
    }

    #[test]
    fn test_many_detents_saturate_at_bounds() {
        let mut d = decoder(0, 3, 0);
        for _ in 0..10 {
            feed(&mut d, &CW);
        }
        assert_eq!(d.value(), 3);
        assert_eq!(d.observer().calls.len(), 10);

        for _ in 0..10 {
            feed(&mut d, &CCW);
        }
        assert_eq!(d.value(), 0);
    }
}
