//! Value observer trait and error types.

use crate::types::Direction;

/// Error type for observer notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObserverError {
    /// The observer refused the notification.
    Rejected,
    /// The observer's queue is full and the notification was dropped.
    Full,
}

/// Synchronous sink for value-change notifications.
///
/// Called from inside [`QuadratureDecoder::on_pin_change`](crate::QuadratureDecoder::on_pin_change),
/// on the event delivery path. Implementations must return quickly: a slow
/// observer delays the next edge and can cost a detent.
///
/// The decoder has already committed its state by the time the observer
/// runs, so an error here never leaves the decoder inconsistent.
///
/// `()` is the "no observer" observer, and any `FnMut(i32, Direction)`
/// closure is an infallible observer. A pair `(A, B)` notifies both halves
/// in order; `B` still runs when `A` fails, and the first error is returned.
pub trait ValueObserver {
    /// The value changed to `value` after a detent in `direction`.
    fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError>;
}

impl ValueObserver for () {
    #[inline]
    fn on_change(&mut self, _value: i32, _direction: Direction) -> Result<(), ObserverError> {
        Ok(())
    }
}

impl<O: ValueObserver> ValueObserver for Option<O> {
    #[inline]
    fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError> {
        match self {
            Some(observer) => observer.on_change(value, direction),
            None => Ok(()),
        }
    }
}

impl<A: ValueObserver, B: ValueObserver> ValueObserver for (A, B) {
    fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError> {
        let first = self.0.on_change(value, direction);
        let second = self.1.on_change(value, direction);
        first.and(second)
    }
}

impl<F> ValueObserver for F
where
    F: FnMut(i32, Direction),
{
    #[inline]
    fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError> {
        self(value, direction);
        Ok(())
    }
}
