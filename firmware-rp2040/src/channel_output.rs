//! Observer that publishes encoder value changes to other tasks.
//!
//! The decoder runs inside the encoder task and must never block there.
//! [`PublishingObserver`] pairs the [`EncoderValue`] mirror (an atomic
//! store) with a [`ChannelObserver`] (a non-blocking `try_send`). The pair
//! runs the mirror first and always runs both, so the polled value stays
//! current even when the change queue is full.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicI32, Ordering};
use quadrature_encoder::{Direction, ObserverError, ValueObserver};

/// Number of changes buffered for the change task before new ones are dropped.
pub const CHANGE_QUEUE_DEPTH: usize = 8;

/// A value change as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ValueChange {
    pub value: i32,
    pub direction: Direction,
}

/// Queue of value changes, drained by whoever wants to react to each one.
pub type ChangeChannel = Channel<CriticalSectionRawMutex, ValueChange, CHANGE_QUEUE_DEPTH>;

/// Latest encoder value, readable from any task.
pub struct EncoderValue(AtomicI32);

impl ValueObserver for &EncoderValue {
    #[inline]
    fn on_change(&mut self, value: i32, _direction: Direction) -> Result<(), ObserverError> {
        self.set(value);
        Ok(())
    }
}

impl EncoderValue {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(AtomicI32::new(value))
    }

    /// Get the most recently published value.
    #[inline]
    pub fn get(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: i32) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Queues every change on a [`ChangeChannel`], reporting a full queue.
pub struct ChannelObserver<'a> {
    changes: &'a ChangeChannel,
}

impl<'a> ChannelObserver<'a> {
    #[must_use]
    pub fn new(changes: &'a ChangeChannel) -> Self {
        Self { changes }
    }
}

impl ValueObserver for ChannelObserver<'_> {
    fn on_change(&mut self, value: i32, direction: Direction) -> Result<(), ObserverError> {
        self.changes
            .try_send(ValueChange { value, direction })
            .map_err(|_| ObserverError::Full)
    }
}

/// Mirror plus queue: the observer the firmware hands to the decoder.
pub type PublishingObserver<'a> = (&'a EncoderValue, ChannelObserver<'a>);

/// Build a [`PublishingObserver`] over the shared value and change queue.
#[must_use]
pub fn publishing_observer<'a>(
    value: &'a EncoderValue,
    changes: &'a ChangeChannel,
) -> PublishingObserver<'a> {
    (value, ChannelObserver::new(changes))
}
